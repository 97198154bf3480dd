use crate::domain::ports::{Clock, HalfStep, Physics, SimBody};
use crate::domain::{BodyState, ControlCommand, EntityRegistry, Pose, Twist, Vec3};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_micros(&self) -> u64 {
        self.0
    }
}

// Minimal physics world: bodies slide along +X at their commanded speed.
// Records every half-step so tests can check ordering around controls.
#[derive(Debug, Clone)]
pub(crate) struct TallyWorld {
    pub time: f64,
    pub timestep: f64,
    pub poses: Vec<Pose>,
    pub speeds: Vec<f64>,
    pub half_steps: Vec<HalfStep>,
    pub controls_applied: usize,
    pub resets: usize,
    baseline: Vec<Pose>,
}

impl TallyWorld {
    pub(crate) fn new(timestep: f64, poses: Vec<Pose>) -> Self {
        Self {
            time: 0.0,
            timestep,
            speeds: vec![0.0; poses.len()],
            baseline: poses.clone(),
            poses,
            half_steps: Vec::new(),
            controls_applied: 0,
            resets: 0,
        }
    }

    pub(crate) fn substeps(&self) -> usize {
        self.half_steps
            .iter()
            .filter(|h| **h == HalfStep::Second)
            .count()
    }
}

impl Physics for TallyWorld {
    fn time(&self) -> f64 {
        self.time
    }

    fn advance_half_step(&mut self, half: HalfStep) {
        self.half_steps.push(half);
        if half == HalfStep::Second {
            for (pose, speed) in self.poses.iter_mut().zip(&self.speeds) {
                pose.position.x += speed * self.timestep;
            }
            self.time += self.timestep;
        }
    }

    fn reset_to_baseline(&mut self) {
        self.time = 0.0;
        self.poses = self.baseline.clone();
        self.speeds.iter_mut().for_each(|s| *s = 0.0);
        self.resets += 1;
    }
}

pub(crate) struct TallyCar {
    name: String,
    index: usize,
}

impl TallyCar {
    pub(crate) fn new(name: &str, index: usize) -> Self {
        Self {
            name: name.to_string(),
            index,
        }
    }
}

impl SimBody<TallyWorld> for TallyCar {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply_control(&self, world: &mut TallyWorld, command: &ControlCommand) {
        world.speeds[self.index] = command.speed;
        world.controls_applied += 1;
    }

    fn extract_state(&self, world: &TallyWorld) -> BodyState {
        BodyState::new(self.name.clone(), world.poses[self.index]).with_twist(Twist {
            linear: Vec3::new(world.speeds[self.index], 0.0, 0.0),
            angular: Vec3::ZERO,
        })
    }

    fn set_pose(&self, world: &mut TallyWorld, pose: &Pose) {
        world.poses[self.index] = *pose;
    }
}

// Passive body: keeps the default no-op control.
pub(crate) struct TallyProp {
    name: String,
    index: usize,
}

impl TallyProp {
    pub(crate) fn new(name: &str, index: usize) -> Self {
        Self {
            name: name.to_string(),
            index,
        }
    }
}

impl SimBody<TallyWorld> for TallyProp {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract_state(&self, world: &TallyWorld) -> BodyState {
        BodyState::new(self.name.clone(), world.poses[self.index])
    }

    fn set_pose(&self, world: &mut TallyWorld, pose: &Pose) {
        world.poses[self.index] = *pose;
    }
}

// World with one car "buddy" (index 0) and one prop "block" (index 1).
pub(crate) fn buddy_world(timestep: f64) -> (TallyWorld, EntityRegistry<TallyWorld>) {
    let world = TallyWorld::new(
        timestep,
        vec![Pose::planar(0.0, 0.0, 0.0), Pose::planar(2.0, 1.0, 0.0)],
    );
    let mut registry = EntityRegistry::new();
    registry
        .insert_actuated(Box::new(TallyCar::new("buddy", 0)))
        .expect("expected buddy insert");
    registry
        .insert_passive(Box::new(TallyProp::new("block", 1)))
        .expect("expected block insert");
    (world, registry)
}
