// src/simulation/engine.rs
use crate::circuits::GateUnit;
use crate::core::{LineId, RevmaxError};
use crate::operations::Operation;
// NOTE: Does not directly use Circuit, operates on ops passed from Simulator
use crate::simulation::SimulationResult;
use std::collections::{HashMap, HashSet};

/// The core simulation engine tracking the classical bit carried by each
/// line as reversible operations are applied.
/// (Internal visibility)
///
/// Because every supported operation is a bit-transform, the full state of N
/// lines is exactly N bits; there is no exponential state vector here.
pub(crate) struct BitEngine {
    /// Maps line IDs to their index (0..N-1) in the bit store.
    line_indices: HashMap<LineId, usize>,
    /// The current bit on every line, indexed per `line_indices`.
    bits: Vec<bool>,
}

impl BitEngine {
    /// Initializes the engine for a given set of lines.
    /// Every line starts at 0, matching the all-zero register convention
    /// the encoders assume.
    pub(crate) fn init(line_ids: &HashSet<LineId>) -> Result<Self, RevmaxError> {
        if line_ids.is_empty() {
            // Cannot simulate zero lines.
            return Err(RevmaxError::InvalidOperation {
                message: "Cannot initialize simulation engine with zero lines".to_string(),
            });
        }

        // Create mapping from LineId to index (0..N-1).
        // Sort IDs to ensure deterministic index assignment regardless of
        // HashSet iteration order.
        let mut sorted_ids: Vec<LineId> = line_ids.iter().cloned().collect();
        sorted_ids.sort(); // Relies on Ord derived for LineId
        let mut line_indices = HashMap::with_capacity(sorted_ids.len());
        for (index, line_id) in sorted_ids.into_iter().enumerate() {
            line_indices.insert(line_id, index);
        }

        let bits = vec![false; line_indices.len()];
        Ok(Self { line_indices, bits })
    }

    // Crate-visible accessors for driving the engine directly in tests.
    #[cfg(test)]
    pub(crate) fn bit(&self, line_id: &LineId) -> Option<bool> {
        self.line_indices.get(line_id).map(|idx| self.bits[*idx])
    }

    /// Applies a single non-observation operation to the bit store.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), RevmaxError> {
        match op {
            Operation::Flip { target } => {
                let idx = self.index_of(target)?;
                self.bits[idx] = !self.bits[idx];
            }
            Operation::ControlledFlip { control, target } => {
                let control_idx = self.index_of(control)?;
                let target_idx = self.index_of(target)?;
                self.controlled_flip(control_idx, target_idx)?;
            }
            Operation::DoublyControlledFlip { controls, target } => {
                let c0 = self.index_of(&controls[0])?;
                let c1 = self.index_of(&controls[1])?;
                let target_idx = self.index_of(target)?;
                self.doubly_controlled_flip(c0, c1, target_idx)?;
            }
            Operation::Unit { unit, lines } => {
                // Resolve the unit's span against the circuit-level index
                // map, then execute the unit positionally.
                let line_map: Vec<usize> = lines
                    .iter()
                    .map(|lid| self.index_of(lid))
                    .collect::<Result<_, _>>()?;
                self.apply_unit(unit, &line_map)?;
            }
            Operation::Observe { .. } => {
                return Err(RevmaxError::InvalidOperation {
                    message: "Observe operation should not be passed directly to apply_operation"
                        .to_string(),
                });
            }
        }
        Ok(())
    }

    /// Executes a `GateUnit` with its local lines resolved positionally:
    /// local line `i` acts on `line_map[i]`. Recurses into nested units,
    /// composing the maps, so arbitrarily deep compositions run against the
    /// one flat bit store.
    fn apply_unit(&mut self, unit: &GateUnit, line_map: &[usize]) -> Result<(), RevmaxError> {
        for op in unit.operations() {
            match op {
                Operation::Flip { target } => {
                    let idx = Self::resolve_local(line_map, *target, unit.name())?;
                    self.bits[idx] = !self.bits[idx];
                }
                Operation::ControlledFlip { control, target } => {
                    let control_idx = Self::resolve_local(line_map, *control, unit.name())?;
                    let target_idx = Self::resolve_local(line_map, *target, unit.name())?;
                    self.controlled_flip(control_idx, target_idx)?;
                }
                Operation::DoublyControlledFlip { controls, target } => {
                    let c0 = Self::resolve_local(line_map, controls[0], unit.name())?;
                    let c1 = Self::resolve_local(line_map, controls[1], unit.name())?;
                    let target_idx = Self::resolve_local(line_map, *target, unit.name())?;
                    self.doubly_controlled_flip(c0, c1, target_idx)?;
                }
                Operation::Unit { unit: inner, lines } => {
                    let inner_map: Vec<usize> = lines
                        .iter()
                        .map(|lid| Self::resolve_local(line_map, *lid, unit.name()))
                        .collect::<Result<_, _>>()?;
                    self.apply_unit(inner, &inner_map)?;
                }
                Operation::Observe { .. } => {
                    return Err(RevmaxError::InvalidOperation {
                        message: format!(
                            "unit '{}' contains an Observe step; units must be purely reversible",
                            unit.name()
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Records the current bit on each target line into the result set.
    /// Observation is non-destructive here: the state is classical already,
    /// so nothing collapses.
    pub(crate) fn observe(
        &self,
        targets: &[LineId],
        result: &mut SimulationResult,
    ) -> Result<(), RevmaxError> {
        for target_line_id in targets {
            let idx = self.index_of(target_line_id)?;
            result.record_bit(*target_line_id, self.bits[idx]);
        }
        Ok(())
    }

    /// Helper to get a line's bit-store index, with a specific error if unknown.
    fn index_of(&self, line_id: &LineId) -> Result<usize, RevmaxError> {
        self.line_indices
            .get(line_id)
            .copied()
            .ok_or_else(|| RevmaxError::Simulation {
                message: format!("Line {} not found in simulation context", line_id),
            })
    }

    /// Maps a unit-local line to a bit-store index through the span map.
    fn resolve_local(
        line_map: &[usize],
        local: LineId,
        unit_name: &str,
    ) -> Result<usize, RevmaxError> {
        line_map
            .get(local.0 as usize)
            .copied()
            .ok_or_else(|| RevmaxError::Simulation {
                message: format!(
                    "unit '{}' references local line {} outside its {}-line span",
                    unit_name,
                    local,
                    line_map.len()
                ),
            })
    }

    fn controlled_flip(&mut self, control: usize, target: usize) -> Result<(), RevmaxError> {
        if control == target {
            return Err(RevmaxError::InvalidOperation {
                message: "Control and target lines cannot be the same for a controlled flip"
                    .to_string(),
            });
        }
        if self.bits[control] {
            self.bits[target] = !self.bits[target];
        }
        Ok(())
    }

    fn doubly_controlled_flip(
        &mut self,
        c0: usize,
        c1: usize,
        target: usize,
    ) -> Result<(), RevmaxError> {
        if c0 == target || c1 == target || c0 == c1 {
            return Err(RevmaxError::InvalidOperation {
                message: "Controls and target of a doubly-controlled flip must be three distinct lines"
                    .to_string(),
            });
        }
        if self.bits[c0] && self.bits[c1] {
            self.bits[target] = !self.bits[target];
        }
        Ok(())
    }
}
