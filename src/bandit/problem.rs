use super::arm::Arm;

use crate::errors::SimulationError;

use rand::Rng;

pub const MIN_ARMS: usize = 2;

/// Fixed set of arms shared by every setup and run of a simulation.
#[derive(Clone, Debug)]
pub struct BanditProblem {
    arms: Vec<Arm>,
}

impl BanditProblem {
    pub fn new(arms: Vec<Arm>) -> Result<Self, SimulationError> {
        if arms.len() < MIN_ARMS {
            return Err(SimulationError::InvalidConfiguration(format!(
                "a bandit problem needs at least {MIN_ARMS} arms, got {}",
                arms.len()
            )));
        }
        Ok(Self { arms })
    }

    pub fn num_arms(&self) -> usize {
        self.arms.len()
    }

    fn arm(&self, arm_id: usize) -> Result<&Arm, SimulationError> {
        self.arms
            .get(arm_id)
            .ok_or(SimulationError::ArmNotFound(arm_id))
    }

    pub fn mean(&self, arm_id: usize) -> Result<f64, SimulationError> {
        self.arm(arm_id).map(Arm::mean)
    }

    pub fn pull<R: Rng + ?Sized>(&self, arm_id: usize, rng: &mut R) -> Result<f64, SimulationError> {
        self.arm(arm_id).map(|arm| arm.pull(rng))
    }

    pub fn optimal_mean(&self) -> f64 {
        self.arms
            .iter()
            .map(Arm::mean)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Lowest index among the arms with the largest mean.
    pub fn optimal_arm(&self) -> usize {
        let optimal_mean = self.optimal_mean();
        self.arms
            .iter()
            .position(|arm| arm.mean() == optimal_mean)
            .unwrap_or_default()
    }
}
