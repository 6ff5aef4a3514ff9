//! Error types for the routing crate.

use alsvid_device::DeviceError;
use thiserror::Error;

/// Errors that can occur during placement and routing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RouteError {
    /// Error from the device crate.
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// The mapping handed to a policy is not a valid permutation.
    ///
    /// Policies assume the placer ran first; a corrupt mapping is a caller
    /// contract violation, not a recoverable condition.
    #[error("Corrupt mapping: {0}")]
    CorruptMapping(String),

    /// An operation references a logical qubit outside the device.
    #[error("Qubit {qubit} out of range for device with {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending logical qubit index.
        qubit: u32,
        /// Number of logical qubits on the device.
        num_qubits: u32,
    },

    /// The operation sequence could not be parsed or is degenerate.
    #[error("Malformed sequence: {0}")]
    MalformedSequence(String),

    /// The pinned-site walk has no unpinned detour around a site.
    #[error("No unpinned detour around site {site}")]
    NoDetour {
        /// The pinned site blocking the walk.
        site: u32,
    },

    /// The pinned-site walk exceeded its per-operation step budget.
    #[error("Routing step budget of {budget} exhausted at operation {operation}")]
    StepBudgetExhausted {
        /// The exhausted budget (N^2 for an N-site device).
        budget: usize,
        /// Index of the operation being routed.
        operation: usize,
    },

    /// Report serialization failed.
    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Report file output failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
