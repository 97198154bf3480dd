//! Planar kinematic physics used as the default simulation backend.
//!
//! Cars follow a kinematic bicycle model; props never move on their own.
//! Any engine implementing [`Physics`] can replace this one.

use crate::domain::{
    BodyState, ControlCommand, HalfStep, Physics, Pose, Quat, SimBody, Twist, Vec3,
};

/// Index of a body inside a [`KinematicWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyId(usize);

#[derive(Debug, Clone)]
struct BodyFrame {
    pose: Pose,
    yaw: f64,
    // Some(wheelbase) for steerable bodies.
    wheelbase: Option<f64>,
    speed: f64,
    steering_angle: f64,
    yaw_rate: f64,
}

impl BodyFrame {
    fn at_rest(pose: Pose, wheelbase: Option<f64>) -> Self {
        let pose = Pose::new(pose.position, pose.orientation.normalized());
        Self {
            yaw: pose.orientation.yaw(),
            pose,
            wheelbase,
            speed: 0.0,
            steering_angle: 0.0,
            yaw_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KinematicWorld {
    time: f64,
    timestep: f64,
    frames: Vec<BodyFrame>,
    baseline: Vec<BodyFrame>,
}

impl KinematicWorld {
    pub fn new(timestep: f64) -> Self {
        Self {
            time: 0.0,
            timestep,
            frames: Vec::new(),
            baseline: Vec::new(),
        }
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    pub fn add_car(&mut self, pose: Pose, wheelbase: f64) -> BodyId {
        self.push(BodyFrame::at_rest(pose, Some(wheelbase)))
    }

    pub fn add_prop(&mut self, pose: Pose) -> BodyId {
        self.push(BodyFrame::at_rest(pose, None))
    }

    fn push(&mut self, frame: BodyFrame) -> BodyId {
        self.baseline.push(frame.clone());
        self.frames.push(frame);
        BodyId(self.frames.len() - 1)
    }

    fn frame(&self, id: BodyId) -> &BodyFrame {
        &self.frames[id.0]
    }

    fn frame_mut(&mut self, id: BodyId) -> &mut BodyFrame {
        &mut self.frames[id.0]
    }
}

impl Physics for KinematicWorld {
    fn time(&self) -> f64 {
        self.time
    }

    fn advance_half_step(&mut self, half: HalfStep) {
        match half {
            // Heading follows any pose written since the last sub-step.
            HalfStep::First => {
                for frame in &mut self.frames {
                    frame.yaw = frame.pose.orientation.yaw();
                }
            }
            HalfStep::Second => {
                let dt = self.timestep;
                for frame in &mut self.frames {
                    let Some(wheelbase) = frame.wheelbase.filter(|w| *w > 0.0) else {
                        continue;
                    };
                    frame.yaw_rate = frame.speed * frame.steering_angle.tan() / wheelbase;
                    frame.pose.position.x += frame.speed * frame.yaw.cos() * dt;
                    frame.pose.position.y += frame.speed * frame.yaw.sin() * dt;
                    frame.yaw += frame.yaw_rate * dt;
                    frame.pose.orientation = Quat::from_yaw(frame.yaw);
                }
                self.time += dt;
            }
        }
    }

    fn reset_to_baseline(&mut self) {
        self.frames.clone_from(&self.baseline);
        self.time = 0.0;
    }
}

// Steerable car; clamps steering to the configured limit.
pub struct CarBody {
    name: String,
    id: BodyId,
    max_steering_angle: f64,
}

impl CarBody {
    pub fn new(name: impl Into<String>, id: BodyId, max_steering_angle: f64) -> Self {
        Self {
            name: name.into(),
            id,
            max_steering_angle: max_steering_angle.abs(),
        }
    }
}

impl SimBody<KinematicWorld> for CarBody {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply_control(&self, world: &mut KinematicWorld, command: &ControlCommand) {
        let limit = self.max_steering_angle;
        let frame = world.frame_mut(self.id);
        frame.speed = command.speed;
        frame.steering_angle = command.steering_angle.clamp(-limit, limit);
    }

    fn extract_state(&self, world: &KinematicWorld) -> BodyState {
        let frame = world.frame(self.id);
        BodyState::new(self.name.clone(), frame.pose).with_twist(Twist {
            linear: Vec3::new(
                frame.speed * frame.yaw.cos(),
                frame.speed * frame.yaw.sin(),
                0.0,
            ),
            angular: Vec3::new(0.0, 0.0, frame.yaw_rate),
        })
    }

    fn set_pose(&self, world: &mut KinematicWorld, pose: &Pose) {
        let frame = world.frame_mut(self.id);
        frame.pose = Pose::new(pose.position, pose.orientation.normalized());
        frame.yaw = frame.pose.orientation.yaw();
    }
}

// Static prop; repositioned only by reset.
pub struct PropBody {
    name: String,
    id: BodyId,
}

impl PropBody {
    pub fn new(name: impl Into<String>, id: BodyId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

impl SimBody<KinematicWorld> for PropBody {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract_state(&self, world: &KinematicWorld) -> BodyState {
        BodyState::new(self.name.clone(), world.frame(self.id).pose)
    }

    fn set_pose(&self, world: &mut KinematicWorld, pose: &Pose) {
        let frame = world.frame_mut(self.id);
        frame.pose = Pose::new(pose.position, pose.orientation.normalized());
        frame.yaw = frame.pose.orientation.yaw();
    }
}
