use crate::errors::SimulationError;

use rand::{distr::Open01, Rng};
use std::f64::consts::PI;

/// Reward source of the bandit problem, its mean stays hidden from the policies.
#[derive(Clone, Debug, PartialEq)]
pub enum Arm {
    Bernoulli { p: f64 },
    Gaussian { mean: f64, stddev: f64 },
}

impl Arm {
    pub fn bernoulli(p: f64) -> Result<Self, SimulationError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "Bernoulli p must be between 0 and 1, got {p}"
            )));
        }
        Ok(Self::Bernoulli { p })
    }

    pub fn gaussian(mean: f64, stddev: f64) -> Result<Self, SimulationError> {
        if !mean.is_finite() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "Gaussian mean must be finite, got {mean}"
            )));
        }
        if !stddev.is_finite() || stddev <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "Gaussian stddev must be positive, got {stddev}"
            )));
        }
        Ok(Self::Gaussian { mean, stddev })
    }

    pub fn pull<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Arm::Bernoulli { p } => {
                if rng.random_bool(p) {
                    1.0
                } else {
                    0.0
                }
            }
            Arm::Gaussian { mean, stddev } => mean + stddev * standard_normal(rng),
        }
    }

    pub fn mean(&self) -> f64 {
        match *self {
            Arm::Bernoulli { p } => p,
            Arm::Gaussian { mean, .. } => mean,
        }
    }
}

/// Box-Muller transform, u1 is drawn from (0, 1) so that ln(u1) stays finite.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.sample(Open01);
    let u2: f64 = rng.sample(Open01);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    const SEED: u64 = 1234;

    #[test]
    fn validates_bernoulli() {
        assert!(Arm::bernoulli(0.0).is_ok());
        assert!(Arm::bernoulli(1.0).is_ok());
        assert!(matches!(
            Arm::bernoulli(1.01),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(Arm::bernoulli(-0.5).is_err());
        assert!(Arm::bernoulli(f64::NAN).is_err());
    }

    #[test]
    fn validates_gaussian() {
        assert!(Arm::gaussian(-3.0, 0.5).is_ok());
        assert!(matches!(
            Arm::gaussian(0.0, 0.0),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(Arm::gaussian(0.0, -1.0).is_err());
        assert!(Arm::gaussian(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn means() {
        assert_eq!(Arm::bernoulli(0.3).unwrap().mean(), 0.3);
        assert_eq!(Arm::gaussian(5.0, 2.0).unwrap().mean(), 5.0);
    }

    #[test]
    fn bernoulli_rewards_are_binary() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let arm = Arm::bernoulli(0.4).unwrap();

        let n = 10_000;
        let rewards = (0..n).map(|_| arm.pull(&mut rng)).collect::<Vec<f64>>();
        assert!(rewards.iter().all(|&r| r == 0.0 || r == 1.0));

        let mean = rewards.iter().sum::<f64>() / n as f64;
        assert!((mean - 0.4).abs() < 0.03);
    }

    #[test]
    fn degenerate_bernoulli() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let never = Arm::bernoulli(0.0).unwrap();
        let always = Arm::bernoulli(1.0).unwrap();

        assert!((0..100).all(|_| never.pull(&mut rng) == 0.0));
        assert!((0..100).all(|_| always.pull(&mut rng) == 1.0));
    }

    #[test]
    fn narrow_gaussian_concentrates_on_mean() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let arm = Arm::gaussian(5.0, 0.0000001).unwrap();

        let n = 5_000;
        let mean = (0..n).map(|_| arm.pull(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 5.0).abs() < 1e-6);
    }

    #[test]
    fn gaussian_spread() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let arm = Arm::gaussian(-1.0, 2.0).unwrap();

        let n = 20_000;
        let samples = (0..n).map(|_| arm.pull(&mut rng)).collect::<Vec<f64>>();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(samples.iter().all(|s| s.is_finite()));
        assert!((mean + 1.0).abs() < 0.1);
        assert!((variance.sqrt() - 2.0).abs() < 0.1);
    }
}
