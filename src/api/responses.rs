use crate::simulation::{SetupOutcome, SimulationMetrics, SimulationSummary};

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SetupResponse {
    Completed {
        setup_id: String,
        metrics: SimulationMetrics,
        summary: SimulationSummary,
    },
    Failed {
        setup_id: String,
        error: String,
    },
}

impl From<SetupOutcome> for SetupResponse {
    fn from(outcome: SetupOutcome) -> Self {
        let SetupOutcome { setup_id, result } = outcome;
        match result {
            Ok(result) => SetupResponse::Completed {
                setup_id,
                metrics: result.metrics,
                summary: result.summary,
            },
            Err(err) => SetupResponse::Failed {
                setup_id,
                error: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub results: Vec<SetupResponse>,
}

impl From<Vec<SetupOutcome>> for SimulationResponse {
    fn from(outcomes: Vec<SetupOutcome>) -> Self {
        Self {
            results: outcomes.into_iter().map(SetupResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
