use slp_core::{NodeId, SlpError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("source {0} is not a field node of this network")]
    InvalidSource(NodeId),

    #[error(transparent)]
    Core(#[from] SlpError),
}

pub type SimResult<T> = Result<T, SimError>;
