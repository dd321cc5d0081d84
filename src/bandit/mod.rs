mod arm;
mod problem;

pub use arm::Arm;
pub use problem::BanditProblem;
