// src/core/line.rs

use std::fmt;

/// Unique identifier for a single binary line in a circuit.
///
/// A line carries exactly one classical bit through a sequence of reversible
/// operations. Uniqueness is context-dependent within a circuit; the code
/// allocating lines is responsible for not handing out the same identifier
/// twice.
///
/// Analogy: plays the role a qubit index plays in a quantum circuit, except
/// that a line only ever holds a definite 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L({})", self.0)
    }
}
