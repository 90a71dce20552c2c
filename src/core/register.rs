// src/core/register.rs

use super::line::LineId;
use std::fmt;

/// An ordered group of binary lines representing one operand's bits.
///
/// Lines are stored low-to-high: position 0 is the least significant bit and
/// the last position is the sign bit of a two's-complement operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    /// Short name used in diagrams and error messages (e.g. "a", "b").
    name: String,
    /// The lines making up the register, least significant first.
    lines: Vec<LineId>,
}

impl Register {
    /// Creates a register over an explicit list of lines.
    pub fn new(name: impl Into<String>, lines: Vec<LineId>) -> Self {
        Self { name: name.into(), lines }
    }

    /// Creates a register of `width` lines numbered contiguously from `first`.
    ///
    /// This is the usual allocation pattern: the comparator lays out its
    /// A-register, B-register and ancillas over consecutive identifiers.
    pub fn contiguous(name: impl Into<String>, first: u64, width: usize) -> Self {
        let lines = (0..width as u64).map(|i| LineId(first + i)).collect();
        Self { name: name.into(), lines }
    }

    /// The register's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of lines (the bit precision of the operand it holds).
    pub fn width(&self) -> usize {
        self.lines.len()
    }

    /// The line at bit position `idx` (0 = least significant).
    pub fn line(&self, idx: usize) -> LineId {
        self.lines[idx]
    }

    /// The most significant line, i.e. the sign line of a signed operand.
    pub fn msb(&self) -> LineId {
        self.lines[self.lines.len() - 1]
    }

    /// All lines, least significant first.
    pub fn lines(&self) -> &[LineId] {
        &self.lines
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.lines.len())
    }
}
