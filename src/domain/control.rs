// Drive command applied to the controlled body for the length of one step request.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlCommand {
    pub speed: f64,          // m/s, signed
    pub steering_angle: f64, // rad, positive turns left
}

impl ControlCommand {
    pub fn new(speed: f64, steering_angle: f64) -> Self {
        Self {
            speed,
            steering_angle,
        }
    }
}
