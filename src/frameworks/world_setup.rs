// Builds the kinematic world and body registry from a world description.

use tracing::info;

use crate::domain::{EntityRegistry, Pose, Quat, SimError, Vec3};
use crate::frameworks::config::{PoseConfig, WorldConfig};
use crate::frameworks::kinematics::{CarBody, KinematicWorld, PropBody};
use crate::use_cases::context::{PauseFlag, SimContext, StepSettings};

impl From<PoseConfig> for Pose {
    fn from(pose: PoseConfig) -> Self {
        Pose::new(
            Vec3::new(pose.position.x, pose.position.y, pose.position.z),
            Quat::from_yaw(pose.yaw),
        )
    }
}

pub fn build_context(
    config: &WorldConfig,
    pause: PauseFlag,
) -> Result<SimContext<KinematicWorld>, SimError> {
    let mut world = KinematicWorld::new(config.timestep);
    let mut registry = EntityRegistry::new();

    for car in &config.cars {
        let id = world.add_car(car.pose.into(), car.wheelbase);
        registry.insert_actuated(Box::new(CarBody::new(
            car.name.clone(),
            id,
            car.max_steering_angle,
        )))?;
    }

    for body in &config.bodies {
        let id = world.add_prop(body.pose.into());
        registry.insert_passive(Box::new(PropBody::new(body.name.clone(), id)))?;
    }

    let settings = StepSettings::new(config.max_rate, config.controlled_body.clone())?;
    info!(
        cars = config.cars.len(),
        props = config.bodies.len(),
        registered = registry.len(),
        timestep = world.timestep(),
        max_rate = settings.max_rate(),
        controlled_body = settings.controlled_body(),
        "world loaded"
    );

    SimContext::new(world, registry, pause, settings)
}
