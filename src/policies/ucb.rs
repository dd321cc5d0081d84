use super::arm::{argmax, ArmEstimate};
use super::errors::PolicyError;
use super::policy::{Policy, PolicyStats, PolicyType};

pub struct Ucb1 {
    arms: Vec<ArmEstimate>,
    c: f64,
    t: u64,
}

impl Ucb1 {
    pub fn new(num_arms: usize, c: f64) -> Self {
        Self {
            arms: vec![ArmEstimate::default(); num_arms],
            c,
            t: 0,
        }
    }

    fn score(&self, arm: &ArmEstimate) -> f64 {
        arm.value + self.c * ((self.t as f64).ln() / (arm.count as f64)).sqrt()
    }
}

impl Policy for Ucb1 {
    fn policy_type(&self) -> PolicyType {
        PolicyType::Ucb1 { c: self.c }
    }

    fn reset(&mut self) {
        self.arms.iter_mut().for_each(|arm| arm.reset());
        self.t = 0;
    }

    fn select(&mut self) -> Result<usize, PolicyError> {
        // every arm is pulled once, in order, before any score is computed
        if let Some(arm_id) = self.arms.iter().position(|arm| arm.count == 0) {
            return Ok(arm_id);
        }

        argmax(self.arms.iter().map(|arm| self.score(arm))).ok_or(PolicyError::NoArmsAvailable)
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
