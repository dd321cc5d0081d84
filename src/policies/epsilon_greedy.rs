use super::arm::{argmax, ArmEstimate};
use super::errors::PolicyError;
use super::policy::{Policy, PolicyStats, PolicyType};
use super::rng::MaybeSeededRng;

use rand::Rng;

pub struct EpsilonGreedy {
    arms: Vec<ArmEstimate>,
    epsilon: f64,
    t: u64,
    rng: MaybeSeededRng,
}

impl EpsilonGreedy {
    pub fn new(num_arms: usize, epsilon: f64, rng: MaybeSeededRng) -> Self {
        Self {
            arms: vec![ArmEstimate::default(); num_arms],
            epsilon,
            t: 0,
            rng,
        }
    }
}

impl Policy for EpsilonGreedy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::EpsilonGreedy {
            epsilon: self.epsilon,
        }
    }

    fn reset(&mut self) {
        self.arms.iter_mut().for_each(|arm| arm.reset());
        self.t = 0;
    }

    fn select(&mut self) -> Result<usize, PolicyError> {
        if self.arms.is_empty() {
            return Err(PolicyError::NoArmsAvailable);
        }

        let rng = self.rng.get_rng();
        if rng.random::<f64>() < self.epsilon {
            Ok(rng.random_range(0..self.arms.len()))
        } else {
            argmax(self.arms.iter().map(|arm| arm.value)).ok_or(PolicyError::NoArmsAvailable)
        }
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms
            .get_mut(arm_id)
            .ok_or(PolicyError::ArmNotFound(arm_id))?
            .update(reward);
        self.t += 1;

        Ok(())
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            t: self.t,
            arms: self.arms.iter().map(|arm| arm.stats()).collect(),
        }
    }
}
