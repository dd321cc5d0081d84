use super::arm::{argmax, ArmStats};
use super::errors::PolicyError;
use super::policy::{Policy, PolicyStats, PolicyType};
use super::rng::MaybeSeededRng;

use rand::Rng;
use rand_distr::{Distribution, Exp1};

/// Beta posterior over the success probability of one arm.
#[derive(Clone, Debug)]
struct ThompsonSamplingArm {
    successes: u64,
    failures: u64,
    count: u64,
}

impl Default for ThompsonSamplingArm {
    fn default() -> Self {
        Self {
            successes: 1,
            failures: 1,
            count: 0,
        }
    }
}

impl ThompsonSamplingArm {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn value(&self) -> f64 {
        self.successes as f64 / (self.successes + self.failures) as f64
    }

    // Beta(a, b) = X / (X + Y) with X ~ Gamma(a, 1) and Y ~ Gamma(b, 1)
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let x = gamma(self.successes, rng);
        let y = gamma(self.failures, rng);
        x / (x + y)
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        if reward == 1.0 {
            self.successes += 1;
        } else if reward == 0.0 {
            self.failures += 1;
        } else {
            return Err(PolicyError::IncompatibleRewardModel { arm_id, reward });
        }
        self.count += 1;

        Ok(())
    }

    fn stats(&self) -> ArmStats {
        ArmStats {
            pulls: self.count,
            mean_reward: self.value(),
        }
    }
}

/// Gamma(shape, 1) for an integer shape, as a sum of unit exponentials.
fn gamma<R: Rng + ?Sized>(shape: u64, rng: &mut R) -> f64 {
    let mut total = 0.0;
    for _ in 0..shape {
        let draw: f64 = Exp1.sample(rng);
        total += draw;
    }
    total
}

/// Thompson sampling for 0/1 rewards, with a uniform Beta(1, 1) prior on every arm.
pub struct ThompsonSampling {
    arms: Vec<ThompsonSamplingArm>,
    t: u64,
    rng: MaybeSeededRng,
}

impl ThompsonSampling {
    pub fn new(num_arms: usize, rng: MaybeSeededRng) -> Self {
        Self {
            arms: vec![ThompsonSamplingArm::default(); num_arms],
            t: 0,
            rng,
        }
    }
}

impl Policy for ThompsonSampling {
    fn policy_type(&self) -> PolicyType {
        PolicyType::ThompsonSampling
    }

    fn reset(&mut self) {
        self.arms.iter_mut().for_each(|arm| arm.reset());
        self.t = 0;
    }

    fn select(&mut self) -> Result<usize, PolicyError> {
        let rng = self.rng.get_rng();
        let samples = self
            .arms
            .iter()
            .map(|arm| arm.sample(&mut *rng))
            .collect::<Vec<f64>>();

        argmax(samples).ok_or(PolicyError::NoArmsAvailable)
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms
            .get_mut(arm_id)
            .ok_or(PolicyError::ArmNotFound(arm_id))?
            .update(arm_id, reward)?;
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
