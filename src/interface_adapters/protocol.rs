// Wire protocol DTOs and conversions for the simulation endpoints.

use crate::domain::{BodyState, ControlCommand, Pose, Quat, StateSnapshot, Twist, Vec3};
use crate::use_cases::ResetRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3Dto {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QuatDto {
    pub w: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Default for QuatDto {
    fn default() -> Self {
        Quat::IDENTITY.into()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PoseDto {
    #[serde(default)]
    pub position: Vec3Dto,
    #[serde(default)]
    pub orientation: QuatDto,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TwistDto {
    pub linear: Vec3Dto,
    pub angular: Vec3Dto,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyStateDto {
    pub name: String,
    pub pose: PoseDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twist: Option<TwistDto>,
}

// Wall-clock capture stamp split like a ROS header stamp.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StampDto {
    pub secs: u64,
    pub nanos: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotDto {
    pub simtime: f64,
    pub capture_time: StampDto,
    pub states: Vec<BodyStateDto>,
}

/// Envelope shared by step, state and reset responses and the body_state stream.
#[derive(Debug, Clone, Serialize)]
pub struct BodyStateResponse {
    pub body_state: SnapshotDto,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DriveDto {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub steering_angle: f64,
}

// Request payload for a step.
#[derive(Debug, Clone, Deserialize)]
pub struct StepRequest {
    pub ctrl: DriveDto,
}

// Request payload for a rollout: one stepping window per control.
#[derive(Debug, Clone, Deserialize)]
pub struct RolloutRequest {
    pub ctrls: Vec<DriveDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RolloutResponse {
    pub body_states: Vec<SnapshotDto>,
}

// Request payload for a reset; lengths are checked by the use case.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetRequestDto {
    #[serde(default)]
    pub body_names: Vec<String>,
    #[serde(default)]
    pub init_state: Vec<PoseDto>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PauseRequest {
    pub paused: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PauseResponse {
    pub paused: bool,
}

impl From<Vec3> for Vec3Dto {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3Dto> for Vec3 {
    fn from(v: Vec3Dto) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Quat> for QuatDto {
    fn from(q: Quat) -> Self {
        Self {
            w: q.w,
            x: q.x,
            y: q.y,
            z: q.z,
        }
    }
}

impl From<QuatDto> for Quat {
    fn from(q: QuatDto) -> Self {
        Quat {
            w: q.w,
            x: q.x,
            y: q.y,
            z: q.z,
        }
    }
}

impl From<Pose> for PoseDto {
    fn from(pose: Pose) -> Self {
        Self {
            position: pose.position.into(),
            orientation: pose.orientation.into(),
        }
    }
}

impl From<PoseDto> for Pose {
    fn from(pose: PoseDto) -> Self {
        Pose::new(pose.position.into(), pose.orientation.into())
    }
}

impl From<Twist> for TwistDto {
    fn from(twist: Twist) -> Self {
        Self {
            linear: twist.linear.into(),
            angular: twist.angular.into(),
        }
    }
}

impl From<BodyState> for BodyStateDto {
    fn from(state: BodyState) -> Self {
        Self {
            name: state.name,
            pose: state.pose.into(),
            twist: state.twist.map(TwistDto::from),
        }
    }
}

impl From<u64> for StampDto {
    fn from(micros: u64) -> Self {
        Self {
            secs: micros / 1_000_000,
            nanos: ((micros % 1_000_000) * 1_000) as u32,
        }
    }
}

impl From<StateSnapshot> for SnapshotDto {
    fn from(snapshot: StateSnapshot) -> Self {
        Self {
            simtime: snapshot.simtime,
            capture_time: snapshot.capture_time_us.into(),
            states: snapshot.states.into_iter().map(BodyStateDto::from).collect(),
        }
    }
}

impl From<StateSnapshot> for BodyStateResponse {
    fn from(snapshot: StateSnapshot) -> Self {
        Self {
            body_state: snapshot.into(),
        }
    }
}

impl From<Vec<StateSnapshot>> for RolloutResponse {
    fn from(snapshots: Vec<StateSnapshot>) -> Self {
        Self {
            body_states: snapshots.into_iter().map(SnapshotDto::from).collect(),
        }
    }
}

impl From<DriveDto> for ControlCommand {
    fn from(drive: DriveDto) -> Self {
        ControlCommand::new(drive.speed, drive.steering_angle)
    }
}

impl From<ResetRequestDto> for ResetRequest {
    fn from(request: ResetRequestDto) -> Self {
        Self {
            body_names: request.body_names,
            init_state: request.init_state.into_iter().map(Pose::from).collect(),
        }
    }
}
