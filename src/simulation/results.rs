// src/simulation/results.rs
use crate::core::{LineId, Register};
use std::collections::HashMap;
use std::fmt;

/// Holds the results of a circuit simulation.
/// Contains the classical bit recorded for every line that was observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// Maps observed line IDs to the bit they carried at observation time.
    observed: HashMap<LineId, bool>,
}

impl SimulationResult {
    /// Creates a new, empty result set. (Internal visibility)
    pub(crate) fn new() -> Self {
        Self {
            observed: HashMap::new(),
        }
    }

    /// Records the observed bit for a line. (Internal visibility)
    pub(crate) fn record_bit(&mut self, line_id: LineId, bit: bool) {
        self.observed.insert(line_id, bit);
    }

    /// Gets the observed bit for a specific line, if it was observed.
    /// Returns `None` if the line was not observed or not part of the simulation.
    pub fn get_bit(&self, line_id: &LineId) -> Option<bool> {
        self.observed.get(line_id).copied()
    }

    /// Reassembles an unsigned integer from the observed bits of a register
    /// (least significant line first).
    ///
    /// Returns `None` if any of the register's lines was not observed.
    pub fn register_value(&self, register: &Register) -> Option<u64> {
        let mut value = 0u64;
        for (idx, line_id) in register.lines().iter().enumerate() {
            if self.get_bit(line_id)? {
                value |= 1 << idx;
            }
        }
        Some(value)
    }

    /// Returns a reference to the map containing all recorded observations.
    pub fn all_observations(&self) -> &HashMap<LineId, bool> {
        &self.observed
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.observed.is_empty() {
            writeln!(f, "  No lines were observed.")?;
        } else {
            // Sort by LineId for consistent and readable output
            let mut sorted: Vec<_> = self.observed.iter().collect();
            sorted.sort_by_key(|(id, _)| *id);
            writeln!(f, "  Observed Lines:")?;
            for (id, bit) in sorted {
                writeln!(f, "    {}: {}", id, if *bit { 1 } else { 0 })?;
            }
        }
        Ok(())
    }
}
