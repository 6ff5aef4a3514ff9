//! Logical qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a logical qubit.
///
/// Physical sites are plain `u32` indices owned by the device crate; the
/// logical side gets a newtype so the two cannot be confused inside the
/// mapping and placement code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit(pub u32);

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for Qubit {
    fn from(id: u32) -> Self {
        Qubit(id)
    }
}

impl From<usize> for Qubit {
    fn from(id: usize) -> Self {
        Qubit(u32::try_from(id).expect("Qubit overflow: exceeds u32::MAX"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Qubit(3)), "q3");
    }

    #[test]
    fn test_from() {
        assert_eq!(Qubit::from(2u32), Qubit(2));
        assert_eq!(Qubit::from(7usize), Qubit(7));
    }
}
