use crate::bandit::{Arm, BanditProblem};
use crate::catalog::{DEFAULT_C, DEFAULT_EPSILON, DEFAULT_MEAN, DEFAULT_P, DEFAULT_STDDEV};
use crate::errors::SimulationError;
use crate::policies::PolicyType;
use crate::simulation::Simulator;

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Loosely typed parameters as sent by clients, parsed once into typed configs.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, Value>);

impl Params {
    fn float(&self, name: &str, default: f64) -> Result<f64, SimulationError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    SimulationError::InvalidConfiguration(format!(
                        "parameter {name} must be a number, got {value}"
                    ))
                }),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DistributionConfig {
    pub id: String,
    #[serde(default)]
    pub params: Params,
}

impl DistributionConfig {
    pub fn to_arm(&self) -> Result<Arm, SimulationError> {
        match self.id.as_str() {
            "bernoulli" => Arm::bernoulli(self.params.float("p", DEFAULT_P)?),
            "gaussian" => Arm::gaussian(
                self.params.float("mean", DEFAULT_MEAN)?,
                self.params.float("stddev", DEFAULT_STDDEV)?,
            ),
            other => Err(SimulationError::UnknownVariant {
                kind: "distribution",
                id: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ArmConfig {
    pub distribution: DistributionConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BanditProblemConfig {
    pub arms: Vec<ArmConfig>,
}

impl BanditProblemConfig {
    pub fn to_problem(&self) -> Result<BanditProblem, SimulationError> {
        let arms = self
            .arms
            .iter()
            .map(|arm| arm.distribution.to_arm())
            .collect::<Result<Vec<Arm>, SimulationError>>()?;

        BanditProblem::new(arms)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AlgorithmConfig {
    pub id: String,
    #[serde(default)]
    pub params: Params,
}

impl AlgorithmConfig {
    pub fn to_policy_type(&self) -> Result<PolicyType, SimulationError> {
        match self.id.as_str() {
            "epsilon_greedy" => {
                PolicyType::epsilon_greedy(self.params.float("epsilon", DEFAULT_EPSILON)?)
            }
            "ucb1" => PolicyType::ucb1(self.params.float("c", DEFAULT_C)?),
            "thompson_sampling" => Ok(PolicyType::ThompsonSampling),
            other => Err(SimulationError::UnknownVariant {
                kind: "algorithm",
                id: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SetupConfig {
    pub setup_id: String,
    pub algorithm: AlgorithmConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SimulationRequest {
    pub bandit_problem: BanditProblemConfig,
    pub setups: Vec<SetupConfig>,
    pub num_steps: usize,
    pub num_runs: Option<usize>,
    pub seed: Option<u64>,
}

impl SimulationRequest {
    pub fn num_runs(&self) -> usize {
        self.num_runs.unwrap_or(1)
    }

    /// Builds the simulator. Errors on the bandit problem or the request shape
    /// fail the whole request, errors on a single algorithm only fail its setup.
    pub fn to_simulator(&self) -> Result<Simulator, SimulationError> {
        if self.setups.is_empty() {
            return Err(SimulationError::InvalidConfiguration(
                "at least one setup is required".to_string(),
            ));
        }

        let mut simulator = Simulator::new(self.bandit_problem.to_problem()?, self.seed);
        for setup in &self.setups {
            match setup.algorithm.to_policy_type() {
                Ok(policy_type) => simulator.add_setup(setup.setup_id.as_str(), policy_type)?,
                Err(err) => simulator.add_rejected_setup(setup.setup_id.as_str(), err)?,
            }
        }

        Ok(simulator)
    }
}
