//! Routing cost weights.

use serde::{Deserialize, Serialize};

use crate::error::RouteResult;

/// Per-action cost weights shared by every routing policy.
///
/// The weights model the gate overhead of each routing action on real
/// hardware: a swap decomposes into three CNOTs plus corrections, a
/// reversed-orientation CNOT needs basis changes on both qubits, and a
/// bridge replaces a swap chain with four CNOTs whose cost depends on how
/// the two hop edges are oriented. Comparative studies vary these weights
/// rather than the policy code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// One swap of adjacent occupants.
    pub swap: u64,
    /// Executing an operation over a correctly oriented coupling.
    pub direct: u64,
    /// Executing an operation over a coupling that only exists in the
    /// opposite orientation.
    pub reversed: u64,
    /// Bridge with both hop edges correctly oriented.
    pub bridge: u64,
    /// Bridge position with a correctly oriented control edge only: one
    /// extra swap plus a direct execution.
    pub bridge_mixed: u64,
    /// Bridge position whose control edge is not correctly oriented:
    /// full reorientation.
    pub bridge_reversed: u64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            swap: 7,
            direct: 1,
            reversed: 5,
            bridge: 4,
            bridge_mixed: 8,
            bridge_reversed: 10,
        }
    }
}

impl CostModel {
    /// Load a cost model from a JSON document.
    ///
    /// Missing fields keep their default weights, so a study can override
    /// just the weights it varies.
    pub fn from_json(source: &str) -> RouteResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let model = CostModel::default();
        assert_eq!(model.swap, 7);
        assert_eq!(model.direct, 1);
        assert_eq!(model.reversed, 5);
        assert_eq!(model.bridge, 4);
        assert_eq!(model.bridge_mixed, 8);
        assert_eq!(model.bridge_reversed, 10);
    }

    #[test]
    fn test_from_json_partial_override() {
        let model = CostModel::from_json(r#"{"swap": 11}"#).unwrap();
        assert_eq!(model.swap, 11);
        assert_eq!(model.bridge, 4);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(CostModel::from_json("not json").is_err());
    }
}
