// src/arith/adder.rs

use crate::circuits::GateUnit;
use crate::core::{LineId, RevmaxError};
use crate::operations::Operation;
use crate::validation;
use std::fmt;

/// A reversible ripple-carry adder in half-adder mode (no external carry-in),
/// after Cuccaro et al.'s MAJ/UMA construction — the same circuit Qiskit
/// ships as `CDKMRippleCarryAdder(n, "half")`.
///
/// The adder spans `2*width + 2` lines in fixed order:
///
/// | lines            | role                                   |
/// |------------------|----------------------------------------|
/// | `0 .. w`         | A-register, low-to-high                |
/// | `w .. 2w`        | B-register, low-to-high                |
/// | `2w`             | carry-out                              |
/// | `2w + 1`         | helper (carry-in seat, must start 0)   |
///
/// With the helper line cleared, applying the unit computes in place
/// `B := (A + B) mod 2^w`, toggles the carry-out line by bit `w` of the
/// unsigned sum, and restores both A and the helper.
///
/// The comparator consumes this by composition only: it depends on the line
/// count, on the carry-out convention above, and on the unit being
/// appendable across a contiguous span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleCarryAdder {
    width: usize,
    unit: GateUnit,
}

impl RippleCarryAdder {
    /// Builds the adder unit for registers of `width` bits each.
    ///
    /// # Errors
    /// Returns `RevmaxError::Adder` for a zero width; an adder over empty
    /// registers has no carry chain to ripple.
    pub fn new(width: usize) -> Result<Self, RevmaxError> {
        if width == 0 {
            return Err(RevmaxError::Adder {
                message: "adder width must be a positive number of bits".to_string(),
            });
        }

        let num_lines = 2 * width + 2;
        let mut unit = GateUnit::new("add", num_lines);

        let a: Vec<LineId> = (0..width).map(|i| unit.local_line(i)).collect();
        let b: Vec<LineId> = (0..width).map(|i| unit.local_line(width + i)).collect();
        let carry_out = unit.local_line(2 * width);
        let helper = unit.local_line(2 * width + 1);

        // Carry-in seat for bit position i: the helper line feeds position 0,
        // afterwards the carry rides on the previous A line.
        let carry_seat = |i: usize| if i == 0 { helper } else { a[i - 1] };

        // Forward MAJ cascade: after step i, a[i] holds the carry into
        // position i+1 and b[i] holds a[i] XOR b[i] XOR carry_in.
        for i in 0..width {
            Self::majority(&mut unit, carry_seat(i), b[i], a[i]);
        }

        // Expose the final carry on the dedicated carry-out line.
        unit.push(Operation::ControlledFlip {
            control: a[width - 1],
            target: carry_out,
        });

        // Reverse UMA cascade: unwinds the carries, leaving the sum on B and
        // A restored to its input value.
        for i in (0..width).rev() {
            Self::unmajority(&mut unit, carry_seat(i), b[i], a[i]);
        }

        validation::check_unit(&unit)?;
        Ok(Self { width, unit })
    }

    /// MAJ(c, b, a): computes the majority of the three bits onto `a`.
    fn majority(unit: &mut GateUnit, c: LineId, b: LineId, a: LineId) {
        unit.push(Operation::ControlledFlip { control: a, target: b });
        unit.push(Operation::ControlledFlip { control: a, target: c });
        unit.push(Operation::DoublyControlledFlip { controls: [c, b], target: a });
    }

    /// UMA(c, b, a): inverse of MAJ plus the sum write-back onto `b`.
    fn unmajority(unit: &mut GateUnit, c: LineId, b: LineId, a: LineId) {
        unit.push(Operation::DoublyControlledFlip { controls: [c, b], target: a });
        unit.push(Operation::ControlledFlip { control: a, target: c });
        unit.push(Operation::ControlledFlip { control: c, target: b });
    }

    /// The register width in bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total lines the adder spans (`2 * width + 2`).
    pub fn num_lines(&self) -> usize {
        2 * self.width + 2
    }

    /// Position of the carry-out line within the adder's span.
    pub fn carry_line(&self) -> usize {
        2 * self.width
    }

    /// Position of the internal helper line within the adder's span.
    pub fn helper_line(&self) -> usize {
        2 * self.width + 1
    }

    /// The appendable unit implementing the addition.
    pub fn unit(&self) -> &GateUnit {
        &self.unit
    }
}

impl fmt::Display for RippleCarryAdder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RippleCarryAdder(width={}, half mode)", self.width)
    }
}
