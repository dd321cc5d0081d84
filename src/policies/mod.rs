pub mod arm;
pub mod epsilon_greedy;
pub mod errors;
mod policy;
mod rng;
pub mod thompson_sampling;
pub mod ucb;

pub use policy::{Policy, PolicyStats, PolicyType};
pub use rng::MaybeSeededRng;
