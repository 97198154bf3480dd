use crate::domain::{ControlCommand, SimError};
use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::protocol::{
    BodyStateResponse, PauseRequest, PauseResponse, ResetRequestDto, RolloutRequest,
    RolloutResponse, StepRequest,
};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::{
    GetStateUseCase, PauseUseCase, ResetRequest, ResetUseCase, RolloutUseCase, StepUseCase,
};
use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

type HandlerError = (StatusCode, Json<ErrorResponse>);

// Handler for advancing the simulation by one rate-limited window.
pub async fn step(
    State(state): State<AppState>,
    Json(payload): Json<StepRequest>,
) -> Result<Json<BodyStateResponse>, HandlerError> {
    let use_case = StepUseCase {
        ctx: state.sim.clone(),
        clock: SystemClock,
    };
    let command = ControlCommand::from(payload.ctrl);

    let snapshot = run_blocking(move || use_case.execute(command)).await?;
    Ok(Json(BodyStateResponse::from(snapshot)))
}

// Handler for running several step windows back to back.
pub async fn rollout(
    State(state): State<AppState>,
    Json(payload): Json<RolloutRequest>,
) -> Result<Json<RolloutResponse>, HandlerError> {
    let use_case = RolloutUseCase {
        ctx: state.sim.clone(),
        clock: SystemClock,
    };
    let commands: Vec<ControlCommand> =
        payload.ctrls.into_iter().map(ControlCommand::from).collect();

    let snapshots = run_blocking(move || use_case.execute(&commands)).await?;
    Ok(Json(RolloutResponse::from(snapshots)))
}

// Handler for reading the current state without stepping.
pub async fn get_state(
    State(state): State<AppState>,
) -> Result<Json<BodyStateResponse>, HandlerError> {
    let use_case = GetStateUseCase {
        ctx: state.sim.clone(),
        clock: SystemClock,
    };

    let snapshot = run_blocking(move || use_case.execute()).await?;
    Ok(Json(BodyStateResponse::from(snapshot)))
}

// Handler for resetting the world and placing named bodies.
pub async fn reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequestDto>,
) -> Result<Json<BodyStateResponse>, HandlerError> {
    let use_case = ResetUseCase {
        ctx: state.sim.clone(),
        clock: SystemClock,
    };
    let request = ResetRequest::from(payload);

    let snapshot = run_blocking(move || use_case.execute(request)).await?;
    Ok(Json(BodyStateResponse::from(snapshot)))
}

// Handler for the administrative pause switch.
pub async fn pause(
    State(state): State<AppState>,
    Json(payload): Json<PauseRequest>,
) -> Json<PauseResponse> {
    let use_case = PauseUseCase {
        pause: state.sim.pause.clone(),
    };

    Json(PauseResponse {
        paused: use_case.execute(payload.paused),
    })
}

// Guarded work blocks on the simulation lock, so keep it off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, HandlerError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, SimError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| {
            error!(error = %err, "simulation task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "simulation task failed")
        })?
        .map_err(map_sim_error)
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

// Maps domain errors to HTTP responses.
fn map_sim_error(err: SimError) -> HandlerError {
    match err {
        SimError::ResetLengthMismatch { .. } => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        SimError::StatePoisoned | SimError::ClockStalled { .. } => {
            error!(error = %err, "simulation unavailable");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
        SimError::UnknownControlledBody(_)
        | SimError::DuplicateBody(_)
        | SimError::InvalidRate(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "simulation misconfigured")
        }
    }
}
