use serde::Serialize;

/// Time series recorded during a single run.
#[derive(Clone, Debug)]
pub(super) struct RunTrace {
    cumulative_reward: Vec<f64>,
    average_reward: Vec<f64>,
    cumulative_regret: Vec<f64>,
    arm_counts: Vec<u64>,
}

impl RunTrace {
    pub(super) fn new(num_steps: usize, num_arms: usize) -> Self {
        Self {
            cumulative_reward: Vec::with_capacity(num_steps),
            average_reward: Vec::with_capacity(num_steps),
            cumulative_regret: Vec::with_capacity(num_steps),
            arm_counts: vec![0; num_arms],
        }
    }

    pub(super) fn record(&mut self, arm_id: usize, reward: f64, instant_regret: f64) {
        let steps = self.cumulative_reward.len() + 1;
        let total_reward = self.total_reward() + reward;
        let total_regret = self.total_regret() + instant_regret;

        self.cumulative_reward.push(total_reward);
        self.average_reward.push(total_reward / steps as f64);
        self.cumulative_regret.push(total_regret);
        if let Some(count) = self.arm_counts.get_mut(arm_id) {
            *count += 1;
        }
    }

    pub(super) fn total_reward(&self) -> f64 {
        self.cumulative_reward.last().copied().unwrap_or_default()
    }

    pub(super) fn total_regret(&self) -> f64 {
        self.cumulative_regret.last().copied().unwrap_or_default()
    }

    fn cumulative_reward(&self) -> &[f64] {
        &self.cumulative_reward
    }

    fn average_reward(&self) -> &[f64] {
        &self.average_reward
    }

    fn cumulative_regret(&self) -> &[f64] {
        &self.cumulative_regret
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ArmCount {
    pub arm_index: usize,
    pub count: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationMetrics {
    pub steps: Vec<usize>,
    pub avg_cumulative_reward: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stddev_cumulative_reward: Option<Vec<f64>>,
    pub avg_cumulative_regret: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stddev_cumulative_regret: Option<Vec<f64>>,
    pub avg_average_reward: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stddev_average_reward: Option<Vec<f64>>,
    pub avg_arm_counts: Vec<ArmCount>,
    pub raw_data_available: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationSummary {
    pub total_reward: f64,
    pub final_regret: f64,
}

/// Cross-run aggregate of one setup.
#[derive(Clone, Debug, Serialize)]
pub struct AlgorithmResult {
    pub metrics: SimulationMetrics,
    pub summary: SimulationSummary,
}

struct SeriesStats {
    mean: Vec<f64>,
    stddev: Option<Vec<f64>>,
}

// Per step mean across runs, plus the population stddev when there is more than one run.
fn reduce_series(traces: &[RunTrace], series: fn(&RunTrace) -> &[f64]) -> SeriesStats {
    let num_runs = traces.len() as f64;
    let num_steps = traces.first().map(|trace| series(trace).len()).unwrap_or_default();

    let mean = (0..num_steps)
        .map(|step| traces.iter().map(|trace| series(trace)[step]).sum::<f64>() / num_runs)
        .collect::<Vec<f64>>();

    let stddev = (traces.len() > 1).then(|| {
        mean.iter()
            .enumerate()
            .map(|(step, m)| {
                let variance = traces
                    .iter()
                    .map(|trace| (series(trace)[step] - m).powi(2))
                    .sum::<f64>()
                    / num_runs;
                variance.sqrt()
            })
            .collect()
    });

    SeriesStats { mean, stddev }
}

impl AlgorithmResult {
    /// Reduces the traces of all runs of a setup, which must all have the same length.
    pub(super) fn from_traces(traces: &[RunTrace]) -> Self {
        let num_runs = traces.len() as f64;
        let num_arms = traces
            .first()
            .map(|trace| trace.arm_counts.len())
            .unwrap_or_default();

        let cumulative_reward = reduce_series(traces, RunTrace::cumulative_reward);
        let average_reward = reduce_series(traces, RunTrace::average_reward);
        let cumulative_regret = reduce_series(traces, RunTrace::cumulative_regret);

        let avg_arm_counts = (0..num_arms)
            .map(|arm_index| ArmCount {
                arm_index,
                count: traces
                    .iter()
                    .map(|trace| trace.arm_counts[arm_index] as f64)
                    .sum::<f64>()
                    / num_runs,
            })
            .collect();

        let summary = SimulationSummary {
            total_reward: cumulative_reward.mean.last().copied().unwrap_or_default(),
            final_regret: cumulative_regret.mean.last().copied().unwrap_or_default(),
        };

        let metrics = SimulationMetrics {
            steps: (0..cumulative_reward.mean.len()).collect(),
            avg_cumulative_reward: cumulative_reward.mean,
            stddev_cumulative_reward: cumulative_reward.stddev,
            avg_cumulative_regret: cumulative_regret.mean,
            stddev_cumulative_regret: cumulative_regret.stddev,
            avg_average_reward: average_reward.mean,
            stddev_average_reward: average_reward.stddev,
            avg_arm_counts,
            raw_data_available: true,
        };

        Self { metrics, summary }
    }
}
