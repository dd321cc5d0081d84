use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("No arms to draw from")]
    NoArmsAvailable,
    #[error("Arm {0} not found")]
    ArmNotFound(usize),
    #[error("Arm {arm_id} returned reward {reward}, expected a 0/1 reward")]
    IncompatibleRewardModel { arm_id: usize, reward: f64 },
}
