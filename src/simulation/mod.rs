mod metrics;
mod simulator;

pub use metrics::{AlgorithmResult, SimulationMetrics, SimulationSummary};
pub use simulator::{SetupOutcome, Simulator};
