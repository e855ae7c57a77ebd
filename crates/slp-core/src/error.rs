//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `SlpError` as one
//! variant via `#[from]`, so configuration failures surface unchanged.

use thiserror::Error;

use crate::NodeId;

/// The top-level error type for `slp-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SlpError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `slp-*` crates.
pub type SlpResult<T> = Result<T, SlpError>;
