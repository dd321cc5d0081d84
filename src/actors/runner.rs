use crate::api::requests::SimulationRequest;
use crate::api::responses::SimulationResponse;
use crate::config::SimulationConfig;
use crate::errors::SimulationError;

use actix::prelude::*;
use std::time::Instant;
use tracing::info;

/// Runs simulation requests on a dedicated thread, several of them are
/// started in a `SyncArbiter`.
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Actor for SimulationRunner {
    type Context = SyncContext<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        info!("Starting simulation runner");
    }
}

// Messages
#[derive(Message)]
#[rtype(result = "Result<SimulationResponse, SimulationError>")]
pub struct RunSimulation {
    pub request: SimulationRequest,
}

// Handlers
impl Handler<RunSimulation> for SimulationRunner {
    type Result = Result<SimulationResponse, SimulationError>;

    fn handle(&mut self, msg: RunSimulation, _: &mut Self::Context) -> Self::Result {
        let request = msg.request;
        let num_steps = request.num_steps;
        let num_runs = request.num_runs();
        self.config
            .check_limits(num_steps, num_runs, request.setups.len())?;

        let simulator = request.to_simulator()?;
        info!(
            num_arms = %simulator.problem().num_arms(),
            num_setups = %simulator.num_setups(),
            "Running simulation"
        );

        let started = Instant::now();
        let outcomes = simulator.run(num_steps, num_runs)?;
        info!(
            num_setups = %outcomes.len(),
            failed = %outcomes.iter().filter(|outcome| outcome.result.is_err()).count(),
            elapsed_ms = %started.elapsed().as_millis(),
            "Simulation completed"
        );

        Ok(SimulationResponse::from(outcomes))
    }
}
