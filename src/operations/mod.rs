// src/operations/mod.rs

//! Defines the elementary reversible operations a circuit is built from.
//!
//! Every operation here (other than [`Operation::Observe`]) is its own exact
//! inverse when reapplied, so composed sequences can be chained and undone
//! without loss of information. The set is deliberately small: bit-flips,
//! controlled bit-flips (single and double control, the latter needed by the
//! ripple-carry adder's majority gates), and whole sub-units appended across
//! an explicit line range.

// Import necessary types from the core module
use crate::circuits::GateUnit;
use crate::core::LineId;

/// A single step in a reversible circuit.
///
/// These are the classical counterparts of the X, CX and CCX gates the
/// arithmetic circuits in this crate are lowered to. `Unit` nests a whole
/// [`GateUnit`] as one appendable step, which is how the adder primitive is
/// carried inside the comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Unconditionally inverts the bit on `target`.
    ///
    /// Analogy: the X gate. Used to encode operand bits and to turn the
    /// adder into a subtractor by negating a register.
    Flip {
        /// The line whose bit is inverted.
        target: LineId,
    },

    /// Inverts the bit on `target` when the bit on `control` is 1.
    ///
    /// Analogy: the CNOT gate. Used to copy sign information into an
    /// ancilla line and to fold the carry into the decision line.
    ControlledFlip {
        /// The line whose value gates the flip.
        control: LineId,
        /// The line that is conditionally inverted.
        target: LineId,
    },

    /// Inverts the bit on `target` when both control bits are 1.
    ///
    /// Analogy: the Toffoli gate. The ripple-carry adder's majority and
    /// un-majority steps are built from this.
    DoublyControlledFlip {
        /// Both lines whose values gate the flip.
        controls: [LineId; 2],
        /// The line that is conditionally inverted.
        target: LineId,
    },

    /// Applies a whole [`GateUnit`] across `lines` as one step.
    ///
    /// The unit's internal operations reference unit-local lines
    /// `0..num_lines`; `lines[i]` is the caller's line standing in for local
    /// line `i`. The span length must equal the unit's declared line count.
    Unit {
        /// The sub-unit to apply.
        unit: GateUnit,
        /// The caller's lines the unit is stretched across, in unit order.
        lines: Vec<LineId>,
    },

    /// Records the classical value currently on each target line.
    ///
    /// This instructs the simulator to copy the bits into the
    /// `SimulationResult`. It is the only non-reversible step and is not
    /// allowed inside a `GateUnit`.
    Observe {
        /// The lines whose values should be recorded.
        targets: Vec<LineId>,
    },
}

impl Operation {
    /// Returns all line IDs directly mentioned in the operation's parameters.
    ///
    /// For a `Unit` this is the outer span, not the unit-local lines; nested
    /// units never leak their internal identifiers.
    pub fn involved_lines(&self) -> Vec<LineId> {
        match self {
            Operation::Flip { target } => vec![*target],
            Operation::ControlledFlip { control, target } => vec![*control, *target],
            Operation::DoublyControlledFlip { controls, target } => {
                vec![controls[0], controls[1], *target]
            }
            Operation::Unit { lines, .. } => lines.clone(),
            Operation::Observe { targets } => targets.clone(),
        }
    }
}
