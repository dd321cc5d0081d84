use crate::policies::errors::PolicyError;

use actix::MailboxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Unknown {kind}: {id}")]
    UnknownVariant { kind: &'static str, id: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Arm {0} not found")]
    ArmNotFound(usize),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Mailbox error with actor {actor}: {source}")]
    Mailbox {
        actor: &'static str,
        #[source]
        source: MailboxError,
    },
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
