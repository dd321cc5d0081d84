use serde::Serialize;
use std::cmp::Ordering;

/// Running estimate of one arm's reward, as seen by a policy.
#[derive(Clone, Debug, Default)]
pub(super) struct ArmEstimate {
    pub(super) value: f64,
    pub(super) count: u64,
}

impl ArmEstimate {
    pub(super) fn reset(&mut self) {
        self.value = 0.0;
        self.count = 0;
    }

    // incremental mean, avoids keeping a reward sum around
    pub(super) fn update(&mut self, reward: f64) {
        self.count += 1;
        self.value += (reward - self.value) / (self.count as f64);
    }

    pub(super) fn stats(&self) -> ArmStats {
        ArmStats {
            pulls: self.count,
            mean_reward: self.value,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub mean_reward: f64,
}

/// Index of the largest score, the lowest index wins on ties.
pub(super) fn argmax<I>(scores: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    scores
        .into_iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (arm_id, score)| match best {
            Some((_, best_score)) if score.partial_cmp(&best_score) != Some(Ordering::Greater) => {
                best
            }
            _ => Some((arm_id, score)),
        })
        .map(|(arm_id, _)| arm_id)
}
