// src/simulation/mod.rs

//! Simulates the execution of `revmax::circuits::Circuit` instances.
//! This module contains the `Simulator` entry point and the internal
//! `BitEngine` responsible for tracking every line's classical bit as the
//! circuit's reversible operations are applied in order.

// Make engine module crate visible for tests
mod results;
pub(crate) mod engine;

// Re-export the main public interface type
pub use results::SimulationResult;

// Import necessary types for the Simulator struct and its methods
use crate::circuits::Circuit;
use crate::core::RevmaxError;
use crate::operations::Operation;
use engine::BitEngine;

/// The main simulator orchestrating the execution of circuits.
///
/// Because every operation in this crate is a classical bit-transform, a
/// run is a pure, deterministic, in-memory transformation: the same circuit
/// always produces the same observations. There is no sampling and no
/// probabilistic outcome selection.
#[derive(Default)] // Allows Simulator::default() -> Simulator::new()
pub struct Simulator {}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a simulation of the provided circuit.
    ///
    /// Executes the sequence of operations defined in the `circuit` against
    /// an all-zero initial state, recording the bits on each line named by an
    /// `Operation::Observe` step as it is reached.
    ///
    /// # Arguments
    /// * `circuit` - The `Circuit` definition to simulate.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` containing the bits recorded at observation steps.
    /// * `Err(RevmaxError)` if the circuit is malformed (unknown lines,
    ///   aliased controls, a unit span that does not resolve).
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult, RevmaxError> {
        // Handle empty circuit case
        if circuit.is_empty() {
            return Ok(SimulationResult::new());
        }

        // 1. Initialize the engine with all unique lines involved in the
        //    circuit. Every line starts at 0.
        let mut engine = BitEngine::init(circuit.lines())?;

        // 2. Initialize the results container.
        let mut result = SimulationResult::new();

        // 3. Iterate through the ordered sequence of operations.
        for op in circuit.operations() {
            match op {
                // Handle observation specifically
                Operation::Observe { targets } => {
                    engine.observe(targets, &mut result)?;
                }
                // For all other operations, instruct the engine to apply them
                _ => {
                    engine.apply_operation(op)?;
                }
            }
        }

        // Return the collected observations.
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    // Import items from the parent module (simulation) and the crate root
    use super::engine::BitEngine;
    use super::*;
    use crate::circuits::GateUnit;
    use crate::core::LineId;
    use std::collections::HashSet;

    // --- Helper Functions ---
    fn lid(id: u64) -> LineId {
        LineId(id)
    }

    fn line_set(ids: &[u64]) -> HashSet<LineId> {
        ids.iter().map(|id| lid(*id)).collect()
    }

    #[test]
    fn engine_rejects_empty_line_set() {
        assert!(BitEngine::init(&HashSet::new()).is_err());
    }

    #[test]
    fn engine_index_assignment_is_sorted() -> Result<(), RevmaxError> {
        // Insert lines out of order; flips must land on the right lines
        // regardless of HashSet iteration order.
        let mut engine = BitEngine::init(&line_set(&[7, 3, 11]))?;
        engine.apply_operation(&Operation::Flip { target: lid(7) })?;

        assert_eq!(engine.bit(&lid(3)), Some(false));
        assert_eq!(engine.bit(&lid(7)), Some(true));
        assert_eq!(engine.bit(&lid(11)), Some(false));
        Ok(())
    }

    #[test]
    fn flip_is_its_own_inverse() -> Result<(), RevmaxError> {
        let mut engine = BitEngine::init(&line_set(&[0]))?;
        engine.apply_operation(&Operation::Flip { target: lid(0) })?;
        engine.apply_operation(&Operation::Flip { target: lid(0) })?;
        assert_eq!(engine.bit(&lid(0)), Some(false));
        Ok(())
    }

    #[test]
    fn controlled_flip_requires_set_control() -> Result<(), RevmaxError> {
        let mut engine = BitEngine::init(&line_set(&[0, 1]))?;

        // Control is 0: target must stay put.
        engine.apply_operation(&Operation::ControlledFlip { control: lid(0), target: lid(1) })?;
        assert_eq!(engine.bit(&lid(1)), Some(false));

        // Set the control, the flip now fires.
        engine.apply_operation(&Operation::Flip { target: lid(0) })?;
        engine.apply_operation(&Operation::ControlledFlip { control: lid(0), target: lid(1) })?;
        assert_eq!(engine.bit(&lid(1)), Some(true));
        Ok(())
    }

    #[test]
    fn controlled_flip_rejects_aliased_lines() -> Result<(), RevmaxError> {
        let mut engine = BitEngine::init(&line_set(&[0]))?;
        let outcome =
            engine.apply_operation(&Operation::ControlledFlip { control: lid(0), target: lid(0) });
        assert!(matches!(outcome, Err(RevmaxError::InvalidOperation { .. })));
        Ok(())
    }

    #[test]
    fn doubly_controlled_flip_truth_table() -> Result<(), RevmaxError> {
        // target flips only in the case where both controls are 1
        for (c0, c1, expected) in [
            (false, false, false),
            (true, false, false),
            (false, true, false),
            (true, true, true),
        ] {
            let mut engine = BitEngine::init(&line_set(&[0, 1, 2]))?;
            if c0 {
                engine.apply_operation(&Operation::Flip { target: lid(0) })?;
            }
            if c1 {
                engine.apply_operation(&Operation::Flip { target: lid(1) })?;
            }
            engine.apply_operation(&Operation::DoublyControlledFlip {
                controls: [lid(0), lid(1)],
                target: lid(2),
            })?;
            assert_eq!(engine.bit(&lid(2)), Some(expected), "controls ({c0},{c1})");
        }
        Ok(())
    }

    #[test]
    fn unit_executes_against_its_span() -> Result<(), RevmaxError> {
        // A two-line unit flipping its local line 1; appended across
        // [L(5), L(9)] it must flip L(9) and leave L(5) alone.
        let mut unit = GateUnit::new("flip_hi", 2);
        unit.push(Operation::Flip { target: lid(1) });

        let mut engine = BitEngine::init(&line_set(&[5, 9]))?;
        engine.apply_operation(&Operation::Unit {
            unit,
            lines: vec![lid(5), lid(9)],
        })?;

        assert_eq!(engine.bit(&lid(5)), Some(false));
        assert_eq!(engine.bit(&lid(9)), Some(true));
        Ok(())
    }

    #[test]
    fn nested_units_compose_line_maps() -> Result<(), RevmaxError> {
        // inner flips its local line 0; outer carries inner across its own
        // local line 1; appended across [L(2), L(4)] the flip lands on L(4).
        let mut inner = GateUnit::new("inner", 1);
        inner.push(Operation::Flip { target: lid(0) });

        let mut outer = GateUnit::new("outer", 2);
        outer.push(Operation::Unit {
            unit: inner,
            lines: vec![lid(1)],
        });

        let mut engine = BitEngine::init(&line_set(&[2, 4]))?;
        engine.apply_operation(&Operation::Unit {
            unit: outer,
            lines: vec![lid(2), lid(4)],
        })?;

        assert_eq!(engine.bit(&lid(2)), Some(false));
        assert_eq!(engine.bit(&lid(4)), Some(true));
        Ok(())
    }

    #[test]
    fn simulator_rerun_is_deterministic() -> Result<(), RevmaxError> {
        let circuit = crate::circuits::CircuitBuilder::new()
            .add_op(Operation::Flip { target: lid(0) })
            .add_op(Operation::ControlledFlip { control: lid(0), target: lid(1) })
            .observe(vec![lid(0), lid(1)])
            .build();

        let simulator = Simulator::new();
        let first = simulator.run(&circuit)?;
        let second = simulator.run(&circuit)?;
        assert_eq!(first, second);
        assert_eq!(first.get_bit(&lid(1)), Some(true));
        Ok(())
    }
}
