use super::arm::ArmStats;
use super::epsilon_greedy::EpsilonGreedy;
use super::errors::PolicyError;
use super::rng::MaybeSeededRng;
use super::thompson_sampling::ThompsonSampling;
use super::ucb::Ucb1;

use crate::errors::SimulationError;

use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct PolicyStats {
    pub t: u64,
    pub arms: Vec<ArmStats>,
}

/// Validated policy configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum PolicyType {
    EpsilonGreedy { epsilon: f64 },
    Ucb1 { c: f64 },
    ThompsonSampling,
}

impl PolicyType {
    pub fn epsilon_greedy(epsilon: f64) -> Result<Self, SimulationError> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "epsilon must be between 0 and 1, got {epsilon}"
            )));
        }
        Ok(Self::EpsilonGreedy { epsilon })
    }

    pub fn ucb1(c: f64) -> Result<Self, SimulationError> {
        if !c.is_finite() || c < 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "UCB1 exploration constant must be non-negative, got {c}"
            )));
        }
        Ok(Self::Ucb1 { c })
    }

    pub fn name(&self) -> &'static str {
        match self {
            PolicyType::EpsilonGreedy { .. } => "epsilon_greedy",
            PolicyType::Ucb1 { .. } => "ucb1",
            PolicyType::ThompsonSampling => "thompson_sampling",
        }
    }

    pub fn into_inner(self, num_arms: usize, rng: MaybeSeededRng) -> Box<dyn Policy + Send> {
        match self {
            PolicyType::EpsilonGreedy { epsilon } => {
                Box::new(EpsilonGreedy::new(num_arms, epsilon, rng))
            }
            // deterministic, the handle is not needed
            PolicyType::Ucb1 { c } => Box::new(Ucb1::new(num_arms, c)),
            PolicyType::ThompsonSampling => Box::new(ThompsonSampling::new(num_arms, rng)),
        }
    }
}

/// Online arm selection strategy over a fixed number of arms.
pub trait Policy: Send {
    fn policy_type(&self) -> PolicyType;
    /// Forget everything learned, back to the state right after construction.
    fn reset(&mut self);
    fn select(&mut self) -> Result<usize, PolicyError>;
    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError>;
    fn stats(&self) -> PolicyStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_epsilon() {
        assert!(PolicyType::epsilon_greedy(0.0).is_ok());
        assert!(PolicyType::epsilon_greedy(1.0).is_ok());
        assert!(matches!(
            PolicyType::epsilon_greedy(1.5),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(PolicyType::epsilon_greedy(-0.1).is_err());
        assert!(PolicyType::epsilon_greedy(f64::NAN).is_err());
    }

    #[test]
    fn validates_exploration_constant() {
        assert!(PolicyType::ucb1(0.0).is_ok());
        assert!(PolicyType::ucb1(1.414).is_ok());
        assert!(PolicyType::ucb1(-1.0).is_err());
        assert!(PolicyType::ucb1(f64::INFINITY).is_err());
    }

    #[test]
    fn builds_matching_policy() {
        let types = [
            PolicyType::EpsilonGreedy { epsilon: 0.2 },
            PolicyType::Ucb1 { c: 2.0 },
            PolicyType::ThompsonSampling,
        ];

        for policy_type in types {
            let policy = policy_type
                .clone()
                .into_inner(3, MaybeSeededRng::new(Some(1)));
            assert_eq!(policy.policy_type(), policy_type);
            assert_eq!(policy.stats().arms.len(), 3);
            assert_eq!(policy.stats().t, 0);
        }
    }
}
