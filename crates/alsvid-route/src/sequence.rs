//! Operation sequences: the two-qubit dependency stream fed to the router.
//!
//! A sequence is an ordered list of `(control, target)` logical pairs.
//! Order carries meaning: operations are routed strictly left-to-right with
//! no reordering or look-ahead.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RouteError, RouteResult};
use crate::qubit::Qubit;

/// Sentinel value marking a barrier pair in the text format.
pub const BARRIER_TOKEN: i64 = -1;

/// A single two-qubit operation on logical qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Control operand.
    pub control: Qubit,
    /// Target operand.
    pub target: Qubit,
}

impl Operation {
    /// Create an operation.
    pub fn new(control: impl Into<Qubit>, target: impl Into<Qubit>) -> Self {
        Self {
            control: control.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.control, self.target)
    }
}

/// A parsed operation stream.
///
/// Barrier pairs are synchronization markers: they are counted here but
/// excluded from the routable operations, and drivers fold the count back
/// into reported totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSequence {
    /// Routable operations, in input order.
    pub operations: Vec<Operation>,
    /// Number of barrier pairs encountered.
    pub barriers: usize,
}

/// Parse a whitespace-separated stream of integer pairs.
///
/// A pair whose first element is [`BARRIER_TOKEN`] is a barrier marker.
/// Any other negative value, a trailing unpaired token, or a non-integer
/// token is a [`RouteError::MalformedSequence`].
pub fn parse_sequence(source: &str) -> RouteResult<ParsedSequence> {
    let tokens = source
        .split_whitespace()
        .map(|t| {
            t.parse::<i64>()
                .map_err(|_| RouteError::MalformedSequence(format!("bad token '{t}'")))
        })
        .collect::<RouteResult<Vec<_>>>()?;

    if tokens.len() % 2 != 0 {
        return Err(RouteError::MalformedSequence(format!(
            "odd token count {}",
            tokens.len()
        )));
    }

    let mut operations = Vec::new();
    let mut barriers = 0usize;
    for pair in tokens.chunks_exact(2) {
        let (first, second) = (pair[0], pair[1]);
        if first == BARRIER_TOKEN {
            barriers += 1;
            continue;
        }
        let control = to_qubit(first)?;
        let target = to_qubit(second)?;
        operations.push(Operation { control, target });
    }

    Ok(ParsedSequence {
        operations,
        barriers,
    })
}

fn to_qubit(token: i64) -> RouteResult<Qubit> {
    u32::try_from(token)
        .map(Qubit)
        .map_err(|_| RouteError::MalformedSequence(format!("negative qubit index {token}")))
}

/// Render operations in the pair text format accepted by
/// [`parse_sequence`].
pub fn format_sequence(operations: &[Operation]) -> String {
    let mut out = String::new();
    for op in operations {
        out.push_str(&format!("{} {}\n", op.control.0, op.target.0));
    }
    out
}

/// Generate a uniformly random operation sequence.
///
/// The generator is explicitly seeded so experiment runs are reproducible;
/// the same `(num_qubits, len, seed)` triple always yields the same
/// sequence. Control and target are always distinct. Fewer than two qubits
/// leaves no valid pair, so the result is empty.
pub fn generate_sequence(num_qubits: u32, len: usize, seed: u64) -> Vec<Operation> {
    if num_qubits < 2 {
        return Vec::new();
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut operations = Vec::with_capacity(len);
    while operations.len() < len {
        let control = rng.gen_range(0..num_qubits);
        let target = rng.gen_range(0..num_qubits);
        if control != target {
            operations.push(Operation::new(control, target));
        }
    }
    operations
}
