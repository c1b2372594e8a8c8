use thiserror::Error;

use crate::graph::NeuronAddress;

pub type Result<T> = std::result::Result<T, NetError>;

/// Every failure the engine reports. Nothing is silently skipped: a mismatched
/// weight list or a missing edge surfaces here and leaves the graph untouched.
#[derive(Debug, Error)]
pub enum NetError {
    /// An operation was invoked before the network reached the stage it needs.
    #[error("{operation} called too early: {reason}")]
    Precondition {
        operation: &'static str,
        reason: String,
    },

    /// A supplied vector or array does not have the structurally required length.
    #[error("{what}: expected {expected} values, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// `disconnect` targeted an edge that does not exist.
    #[error("no edge from {from} to {to}")]
    GraphEdit {
        from: NeuronAddress,
        to: NeuronAddress,
    },

    #[error("no neuron at {0}")]
    UnknownNeuron(NeuronAddress),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl NetError {
    pub(crate) fn precondition(operation: &'static str, reason: impl Into<String>) -> NetError {
        NetError::Precondition { operation, reason: reason.into() }
    }

    pub(crate) fn mismatch(what: &'static str, expected: usize, got: usize) -> NetError {
        NetError::DimensionMismatch { what, expected, got }
    }
}
