use crate::interface_adapters::handlers::{get_state, pause, reset, rollout, step};
use crate::interface_adapters::net::body_state_ws;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/step", post(step))
        .route("/state", get(get_state).post(get_state))
        .route("/reset", post(reset))
        .route("/rollout", post(rollout))
        .route("/pause", post(pause))
        .route("/body_state", get(body_state_ws))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::config::WorldConfig;
    use crate::frameworks::world_setup::build_context;
    use crate::use_cases::PauseFlag;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::broadcast;
    use tower::ServiceExt;

    fn build_test_app() -> Router {
        let sim = build_context(&WorldConfig::default(), PauseFlag::default())
            .expect("expected default world to build");
        let (snapshot_tx, _snapshot_rx) = broadcast::channel(4);
        app(AppState {
            sim: Arc::new(sim),
            snapshot_tx,
        })
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("expected request to build")
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("expected response body");
        serde_json::from_slice(&body).expect("expected json body")
    }

    #[tokio::test]
    async fn when_step_is_posted_then_returns_200_with_advanced_simtime() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/step",
                r#"{"ctrl":{"speed":1.0,"steering_angle":0.0}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        let simtime = payload["body_state"]["simtime"].as_f64().expect("expected simtime");
        assert!(simtime >= 1.0 / 60.0);
        assert_eq!(payload["body_state"]["states"][0]["name"], "buddy");
        assert_eq!(payload["body_state"]["states"][1]["name"], "block");
    }

    #[tokio::test]
    async fn when_state_is_requested_with_get_then_returns_zero_simtime() {
        let app = build_test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/state")
            .body(Body::empty())
            .expect("expected request to build");
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["body_state"]["simtime"], 0.0);
        assert!(payload["body_state"]["capture_time"]["secs"].as_u64().is_some());
    }

    #[tokio::test]
    async fn when_reset_lengths_mismatch_then_returns_400_and_error_message() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/reset",
                r#"{"body_names":["buddy","block"],"init_state":[{"position":{"x":1.0}}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = json_body(response).await;
        assert_eq!(
            payload["error"],
            "body_names has 2 entries but init_state has 1"
        );
    }

    #[tokio::test]
    async fn when_reset_names_a_body_then_returns_its_new_pose() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/reset",
                r#"{"body_names":["buddy"],"init_state":[{"position":{"x":2.5,"y":-1.0,"z":0.0},"orientation":{"w":1.0,"x":0.0,"y":0.0,"z":0.0}}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        let buddy = &payload["body_state"]["states"][0];
        assert_eq!(buddy["name"], "buddy");
        assert_eq!(buddy["pose"]["position"]["x"], 2.5);
        assert_eq!(buddy["pose"]["position"]["y"], -1.0);
        assert_eq!(payload["body_state"]["simtime"], 0.0);
    }

    #[tokio::test]
    async fn when_pause_is_posted_then_step_no_longer_advances_time() {
        let app = build_test_app();

        let response = app
            .clone()
            .oneshot(json_request("POST", "/pause", r#"{"paused":true}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["paused"], true);

        let response = app
            .oneshot(json_request(
                "POST",
                "/step",
                r#"{"ctrl":{"speed":1.0,"steering_angle":0.1}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["body_state"]["simtime"], 0.0);
    }

    #[tokio::test]
    async fn when_step_payload_is_missing_ctrl_then_returns_422() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request("POST", "/step", r#"{}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn when_step_route_is_called_with_get_then_returns_405() {
        let app = build_test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/step")
            .body(Body::empty())
            .expect("expected request to build");
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn when_route_does_not_exist_then_returns_404() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request("POST", "/does-not-exist", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn when_rollout_is_posted_then_returns_one_snapshot_per_control() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/rollout",
                r#"{"ctrls":[{"speed":1.0,"steering_angle":0.0},{"speed":1.0,"steering_angle":0.2}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        let states = payload["body_states"].as_array().expect("expected list");
        assert_eq!(states.len(), 2);
        let first = states[0]["simtime"].as_f64().expect("expected simtime");
        let second = states[1]["simtime"].as_f64().expect("expected simtime");
        assert!(first >= 1.0 / 60.0);
        assert!(second >= first + 1.0 / 60.0);
    }
}
