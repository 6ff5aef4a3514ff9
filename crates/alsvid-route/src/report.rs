//! Routing run reports: structured JSON output for experiment drivers.

use serde::{Deserialize, Serialize};
use std::path::Path;

use alsvid_device::{CouplingGraph, Directionality};

use crate::error::{RouteError, RouteResult};
use crate::mapping::Mapping;
use crate::policy::RouteOutcome;

/// Report schema version for forward compatibility.
pub const SCHEMA_VERSION: &str = "1";

/// Device summary embedded in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSummary {
    /// Number of physical sites.
    pub sites: usize,
    /// Undirected edge count.
    pub edges: u32,
    /// Edge directionality mode.
    pub directionality: Directionality,
}

impl From<&CouplingGraph> for DeviceSummary {
    fn from(graph: &CouplingGraph) -> Self {
        Self {
            sites: graph.num_sites(),
            edges: graph.num_edges(),
            directionality: graph.directionality(),
        }
    }
}

/// Complete record of one routing run.
///
/// The core performs no console or file output of its own; this is the
/// structure drivers serialize for logging and comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteReport {
    /// Schema version for forward compatibility.
    pub schema_version: String,
    /// Name of the policy that produced the run.
    pub policy: String,
    /// Device the run was routed against.
    pub device: DeviceSummary,
    /// Number of routed operations.
    pub operations: usize,
    /// Number of barrier markers in the input stream (not routed, but part
    /// of the reported totals).
    pub barriers: usize,
    /// Accumulated routing cost.
    pub cost: u64,
    /// Swap count.
    pub swaps: u64,
    /// Bridge count.
    pub bridges: u64,
    /// Pinned-detour count.
    pub detours: u64,
    /// Mapping produced by the placer before routing began.
    pub initial_mapping: Mapping,
    /// Mapping snapshot after each operation, when tracing was requested.
    pub trace: Option<Vec<Mapping>>,
}

impl RouteReport {
    /// Assemble a report from a finished run.
    pub fn new(
        policy: impl Into<String>,
        graph: &CouplingGraph,
        initial_mapping: Mapping,
        barriers: usize,
        outcome: RouteOutcome,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            policy: policy.into(),
            device: DeviceSummary::from(graph),
            operations: outcome.operations,
            barriers,
            cost: outcome.cost,
            swaps: outcome.swaps,
            bridges: outcome.bridges,
            detours: outcome.detours,
            initial_mapping,
            trace: outcome.trace,
        }
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self, pretty: bool) -> RouteResult<String> {
        if pretty {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(serde_json::to_string(self)?)
        }
    }

    /// Write the report to a JSON file.
    pub fn to_file(&self, path: &Path) -> RouteResult<()> {
        let json = self.to_json(true)?;
        std::fs::write(path, json)
            .map_err(|e| RouteError::Io(format!("failed to write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_outcome() -> RouteOutcome {
        RouteOutcome {
            cost: 19,
            swaps: 2,
            bridges: 1,
            detours: 0,
            operations: 3,
            trace: None,
        }
    }

    #[test]
    fn test_report_round_trip() {
        let graph = CouplingGraph::ring(4);
        let report = RouteReport::new(
            "SwapRouter",
            &graph,
            Mapping::identity(4),
            1,
            sample_outcome(),
        );

        let json = report.to_json(false).unwrap();
        let back: RouteReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.policy, "SwapRouter");
        assert_eq!(back.cost, 19);
        assert_eq!(back.barriers, 1);
        assert_eq!(back.device.sites, 4);
    }

    #[test]
    fn test_schema_version_present() {
        let graph = CouplingGraph::linear(3);
        let report = RouteReport::new(
            "BridgeRouter",
            &graph,
            Mapping::identity(3),
            0,
            sample_outcome(),
        );
        let json = report.to_json(true).unwrap();
        assert!(json.contains("\"schema_version\": \"1\""));
    }
}
