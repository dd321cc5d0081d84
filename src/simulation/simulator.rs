use super::metrics::{AlgorithmResult, RunTrace};

use crate::bandit::BanditProblem;
use crate::errors::SimulationError;
use crate::policies::{MaybeSeededRng, Policy, PolicyType};

use tracing::{debug, info, warn};

struct Setup {
    setup_id: String,
    policy: Result<Box<dyn Policy + Send>, SimulationError>,
    // arm pulls of this setup only
    environment: MaybeSeededRng,
}

/// Result of one setup, in the order the setups were added.
#[derive(Debug)]
pub struct SetupOutcome {
    pub setup_id: String,
    pub result: Result<AlgorithmResult, SimulationError>,
}

/// Runs every configured policy against the same bandit problem.
pub struct Simulator {
    problem: BanditProblem,
    setups: Vec<Setup>,
    rng: MaybeSeededRng,
}

impl Simulator {
    pub fn new(problem: BanditProblem, seed: Option<u64>) -> Self {
        Self {
            problem,
            setups: Vec::new(),
            rng: MaybeSeededRng::new(seed),
        }
    }

    pub fn problem(&self) -> &BanditProblem {
        &self.problem
    }

    pub fn num_setups(&self) -> usize {
        self.setups.len()
    }

    fn check_setup_id(&self, setup_id: &str) -> Result<(), SimulationError> {
        if self.setups.iter().any(|setup| setup.setup_id == setup_id) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "duplicate setup id {setup_id}"
            )));
        }
        Ok(())
    }

    pub fn add_setup(
        &mut self,
        setup_id: impl Into<String>,
        policy_type: PolicyType,
    ) -> Result<(), SimulationError> {
        let setup_id = setup_id.into();
        self.check_setup_id(&setup_id)?;

        let policy = policy_type.into_inner(self.problem.num_arms(), self.rng.derive());
        self.setups.push(Setup {
            setup_id,
            policy: Ok(policy),
            environment: self.rng.derive(),
        });
        Ok(())
    }

    /// Registers a setup whose configuration could not be built. It is reported
    /// as failed without affecting the other setups.
    pub fn add_rejected_setup(
        &mut self,
        setup_id: impl Into<String>,
        error: SimulationError,
    ) -> Result<(), SimulationError> {
        let setup_id = setup_id.into();
        self.check_setup_id(&setup_id)?;

        // keeps the streams of later setups tied to their position
        self.rng.derive();
        self.setups.push(Setup {
            setup_id,
            policy: Err(error),
            environment: self.rng.derive(),
        });
        Ok(())
    }

    pub fn run(
        mut self,
        num_steps: usize,
        num_runs: usize,
    ) -> Result<Vec<SetupOutcome>, SimulationError> {
        if num_steps < 1 {
            return Err(SimulationError::InvalidConfiguration(
                "num_steps must be at least 1".to_string(),
            ));
        }
        if num_runs < 1 {
            return Err(SimulationError::InvalidConfiguration(
                "num_runs must be at least 1".to_string(),
            ));
        }

        let optimal_mean = self.problem.optimal_mean();
        info!(
            optimal_arm = %self.problem.optimal_arm(),
            %optimal_mean,
            seed = ?self.rng.seed(),
            %num_steps,
            %num_runs,
            "Starting simulation"
        );

        let setups = std::mem::take(&mut self.setups);
        let outcomes = setups
            .into_iter()
            .map(
                |Setup {
                     setup_id,
                     policy,
                     mut environment,
                 }| {
                    let result = policy.and_then(|mut policy| {
                        self.run_setup(
                            &setup_id,
                            policy.as_mut(),
                            &mut environment,
                            num_steps,
                            num_runs,
                        )
                    });
                    if let Err(err) = &result {
                        warn!(setup_id = %setup_id, error = %err, "Setup failed");
                    }
                    SetupOutcome { setup_id, result }
                },
            )
            .collect();

        Ok(outcomes)
    }

    fn run_setup(
        &self,
        setup_id: &str,
        policy: &mut dyn Policy,
        environment: &mut MaybeSeededRng,
        num_steps: usize,
        num_runs: usize,
    ) -> Result<AlgorithmResult, SimulationError> {
        let optimal_mean = self.problem.optimal_mean();
        let num_arms = self.problem.num_arms();
        let algorithm = policy.policy_type().name();

        let mut traces = Vec::with_capacity(num_runs);
        for run in 0..num_runs {
            policy.reset();

            let mut trace = RunTrace::new(num_steps, num_arms);
            for _ in 0..num_steps {
                let arm_id = policy.select()?;
                let reward = self.problem.pull(arm_id, environment.get_rng())?;
                policy.update(arm_id, reward)?;
                trace.record(arm_id, reward, optimal_mean - self.problem.mean(arm_id)?);
            }

            debug!(
                setup_id = %setup_id,
                algorithm = %algorithm,
                run = %run,
                total_reward = %trace.total_reward(),
                cumulative_regret = %trace.total_regret(),
                pulls = ?policy.stats().arms.iter().map(|arm| arm.pulls).collect::<Vec<_>>(),
                "Finished run"
            );
            traces.push(trace);
        }

        let result = AlgorithmResult::from_traces(&traces);
        info!(
            setup_id = %setup_id,
            algorithm = %algorithm,
            total_reward = %result.summary.total_reward,
            final_regret = %result.summary.final_regret,
            "Finished setup"
        );

        Ok(result)
    }
}
