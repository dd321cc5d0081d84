use crate::errors::SimulationError;

use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub log_level: String,
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RunnerConfig {
    pub workers: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub max_steps: usize,
    pub max_runs: usize,
    pub max_setups: usize,
}

impl SimulationConfig {
    pub fn check_limits(
        &self,
        num_steps: usize,
        num_runs: usize,
        num_setups: usize,
    ) -> Result<(), SimulationError> {
        if num_steps > self.max_steps {
            return Err(SimulationError::InvalidConfiguration(format!(
                "num_steps {num_steps} exceeds the limit of {}",
                self.max_steps
            )));
        }
        if num_runs > self.max_runs {
            return Err(SimulationError::InvalidConfiguration(format!(
                "num_runs {num_runs} exceeds the limit of {}",
                self.max_runs
            )));
        }
        if num_setups > self.max_setups {
            return Err(SimulationError::InvalidConfiguration(format!(
                "{num_setups} setups exceed the limit of {}",
                self.max_setups
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub runner: RunnerConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(File::with_name("config"), environment())
    }

    fn load<S>(file: S, environment: Environment) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let builder = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?;

        builder.try_deserialize()
    }
}

/// `APP__SECTION__KEY` overrides, lists are comma separated.
fn environment() -> Environment {
    Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("server.cors_origins")
}
