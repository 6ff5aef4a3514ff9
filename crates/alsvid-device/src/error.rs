//! Error types for the device crate.

use thiserror::Error;

/// Errors that can occur while building a device model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// A bidirectional coupling graph has a one-way edge.
    #[error("Asymmetric coupling: edge {a} -> {b} has no reverse edge")]
    AsymmetricCoupling {
        /// Source site of the offending edge.
        a: u32,
        /// Destination site of the offending edge.
        b: u32,
    },

    /// The coupling graph is not fully connected.
    #[error("Device not fully connected: no path from site {from} to site {to}")]
    Disconnected {
        /// Source site of the unreachable pair.
        from: u32,
        /// Destination site of the unreachable pair.
        to: u32,
    },

    /// The topology description could not be parsed.
    #[error("Malformed topology: {0}")]
    MalformedTopology(String),

    /// A site index is outside the device.
    #[error("Site {site} out of range for device with {num_sites} sites")]
    SiteOutOfRange {
        /// The offending site index.
        site: u32,
        /// Number of sites on the device.
        num_sites: u32,
    },
}

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;
