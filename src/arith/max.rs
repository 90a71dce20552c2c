// src/arith/max.rs

//! Builds a reversible circuit that decides which of two fixed-width signed
//! integers is larger.
//!
//! The construction reuses the ripple-carry adder as a subtractor: flip every
//! bit of the A-register, add, then flip A and B again. That leaves `a - b`
//! (two's complement) on the B-register and a borrow signal on the adder's
//! carry-out line. The parity of that carry with the two operand signs is
//! exactly the signed comparison, and two controlled flips fold it onto one
//! decision line.

use super::adder::RippleCarryAdder;
use crate::circuits::GateUnit;
use crate::core::{LineId, Register, RevmaxError};
use crate::operations::Operation;
use crate::validation;

/// Widest supported register: `2^width` must stay representable in the
/// `i64` the operands arrive in.
const MAX_WIDTH: usize = 62;

/// Lifecycle of the memoized build.
///
/// The transition to `Built` happens exactly once per configuration;
/// `set_values` with a different pair drops the state back to `Unbuilt`.
/// `Building` marks a compose in progress, so a build can never observe a
/// half-finished unit.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BuildState {
    Unbuilt,
    Building,
    Built(GateUnit),
}

/// Builds a reversible comparator for two signed integers of a fixed bit width.
///
/// The produced [`GateUnit`] spans `2 * width + 3` lines in fixed order:
/// A-register low-to-high, B-register low-to-high, then three ancilla lines
/// — the adder's carry-out, the adder's internal helper, and the
/// sign/decision line. After the unit runs, the decision line holds 0 when
/// operand A is the maximum (ties included) and 1 when operand B is.
///
/// The builder itself performs no observation; the caller appends the unit
/// into a circuit of its own and observes the last line of the span.
///
/// Example usage:
///
/// ```
/// use revmax::{CircuitBuilder, MaxBuilder, Simulator};
///
/// let mut qmax = MaxBuilder::new(4)?;
/// qmax.set_values(5, -6);
/// let unit = qmax.build()?.clone();
///
/// // Allocate the 2 * 4 + 3 = 11 lines the unit declares and observe the last.
/// let lines = unit.local_lines();
/// let decision = lines[lines.len() - 1];
/// let circuit = CircuitBuilder::new()
///     .append_unit(unit, &lines)?
///     .observe(vec![decision])
///     .build();
///
/// let result = Simulator::new().run(&circuit)?;
/// assert_eq!(result.get_bit(&decision), Some(false)); // 0: 5 is the max
/// # Ok::<(), revmax::RevmaxError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MaxBuilder {
    /// Bit precision of each operand register.
    width: usize,
    /// The two operands to compare, unset until `set_values` is called.
    values: Option<(i64, i64)>,
    /// The adder primitive the subtraction is composed from.
    adder: RippleCarryAdder,
    /// Memoized build lifecycle.
    state: BuildState,
}

impl MaxBuilder {
    /// Creates a comparator builder for `width`-bit signed operands, with a
    /// default half-mode ripple-carry adder constructed internally.
    ///
    /// # Errors
    /// `RevmaxError::Configuration` when `width` is zero or exceeds the
    /// representable maximum.
    pub fn new(width: usize) -> Result<Self, RevmaxError> {
        Self::check_width(width)?;
        let adder = RippleCarryAdder::new(width)?;
        Self::with_adder(width, adder)
    }

    /// Creates a comparator builder around a caller-supplied adder.
    ///
    /// # Errors
    /// `RevmaxError::Configuration` for an invalid width;
    /// `RevmaxError::Adder` when the adder is not sized for `width` —
    /// the adder primitive's own fault, passed through unchanged.
    pub fn with_adder(width: usize, adder: RippleCarryAdder) -> Result<Self, RevmaxError> {
        Self::check_width(width)?;
        if adder.width() != width {
            return Err(RevmaxError::Adder {
                message: format!(
                    "adder is sized for {}-bit registers but the comparator needs {}",
                    adder.width(),
                    width
                ),
            });
        }
        Ok(Self {
            width,
            values: None,
            adder,
            state: BuildState::Unbuilt,
        })
    }

    fn check_width(width: usize) -> Result<(), RevmaxError> {
        if width == 0 {
            return Err(RevmaxError::Configuration {
                message: "comparator width must be a positive number of bits".to_string(),
            });
        }
        if width > MAX_WIDTH {
            return Err(RevmaxError::Configuration {
                message: format!("comparator width {} exceeds the maximum of {}", width, MAX_WIDTH),
            });
        }
        Ok(())
    }

    /// The configured bit precision of each operand register.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The currently configured operand pair, or `None` before `set_values`.
    pub fn values(&self) -> Option<(i64, i64)> {
        self.values
    }

    /// Total lines the built unit spans: `2 * width + 3`.
    pub fn num_lines(&self) -> usize {
        2 * self.width + 3
    }

    /// Position of the decision line within the unit's span (the last line).
    pub fn decision_line(&self) -> usize {
        2 * self.width + 2
    }

    /// Stores the two operands to compare.
    ///
    /// May be called any number of times. Assigning a pair different from
    /// the one a cached unit was built for invalidates that cache; assigning
    /// the same pair again keeps it.
    pub fn set_values(&mut self, a: i64, b: i64) {
        if self.values != Some((a, b)) {
            self.state = BuildState::Unbuilt;
        }
        self.values = Some((a, b));
    }

    /// Checks whether the current configuration allows the circuit to be built.
    ///
    /// # Arguments
    /// * `raise_on_failure` - If true, return an error for an invalid
    ///   configuration. If false, report validity through the boolean only.
    ///
    /// # Returns
    /// `Ok(true)` if the configuration is valid. Otherwise, depending on
    /// `raise_on_failure`, `Err(RevmaxError::Configuration)` or `Ok(false)`.
    pub fn check_configuration(&self, raise_on_failure: bool) -> Result<bool, RevmaxError> {
        let valid = self.values.is_some();
        if !valid && raise_on_failure {
            return Err(RevmaxError::Configuration {
                message: "Not enough values have been set for comparison".to_string(),
            });
        }
        Ok(valid)
    }

    /// If not already built for the current configuration, builds the
    /// comparator unit; returns the cached unit otherwise.
    ///
    /// The build is idempotent: repeated calls on an unchanged configuration
    /// return the identical frozen unit with no re-composition.
    ///
    /// # Errors
    /// * `RevmaxError::Configuration` — fewer than two operands set.
    /// * `RevmaxError::Range` — an operand does not fit in `width` bits
    ///   (surfaced here, at encode time, not when the value was assigned).
    /// * `RevmaxError::Adder` — faults from the adder primitive.
    pub fn build(&mut self) -> Result<&GateUnit, RevmaxError> {
        match self.state {
            BuildState::Built(_) => {}
            BuildState::Building => {
                return Err(RevmaxError::InvalidOperation {
                    message: "comparator build re-entered while already in progress".to_string(),
                });
            }
            BuildState::Unbuilt => {
                self.check_configuration(true)?;
                self.state = BuildState::Building;
                match self.compose() {
                    Ok(unit) => self.state = BuildState::Built(unit),
                    Err(e) => {
                        self.state = BuildState::Unbuilt;
                        return Err(e);
                    }
                }
            }
        }
        match &self.state {
            BuildState::Built(unit) => Ok(unit),
            _ => Err(RevmaxError::InvalidOperation {
                message: "comparator build did not reach the built state".to_string(),
            }),
        }
    }

    /// Composes the full comparator unit for the configured operands.
    fn compose(&self) -> Result<GateUnit, RevmaxError> {
        let (value_a, value_b) = self.values.ok_or_else(|| RevmaxError::Configuration {
            message: "Not enough values have been set for comparison".to_string(),
        })?;

        let w = self.width;
        let mut unit = GateUnit::new("max", 2 * w + 3);

        let reg_a = Register::new("a", (0..w).map(|i| unit.local_line(i)).collect());
        let reg_b = Register::new("b", (0..w).map(|i| unit.local_line(w + i)).collect());
        // Ancilla layout: carry-out and helper belong to the adder, the last
        // line accumulates sign/carry parity and is the decision output.
        let anc_carry = unit.local_line(self.adder.carry_line()); // 2w, shared with the adder span
        let anc_decision = unit.local_line(2 * w + 2);

        // Encode the operand values using flips on an all-zero register.
        self.encode(value_a, &reg_a, &mut unit)?;
        self.encode(value_b, &reg_b, &mut unit)?;

        // Save the sign of register B in the decision ancilla before the
        // subtraction overwrites B.
        unit.push(Operation::ControlledFlip {
            control: reg_b.msb(),
            target: anc_decision,
        });

        // The adder becomes a subtractor when we bit-flip the first operand
        // before adding, and then bit-flip both the sum and the first operand
        // after adding. The carry line gives info about which operand is greater.
        for line in reg_a.lines() {
            unit.push(Operation::Flip { target: *line });
        }
        let adder_span: Vec<LineId> = (0..self.adder.num_lines())
            .map(|i| unit.local_line(i))
            .collect();
        unit.push(Operation::Unit {
            unit: self.adder.unit().clone(),
            lines: adder_span,
        });
        for line in reg_a.lines() {
            unit.push(Operation::Flip { target: *line });
        }
        for line in reg_b.lines() {
            unit.push(Operation::Flip { target: *line });
        }

        // Fold the parity of the carry and both operand signs into the
        // decision line. It ends at 0 exactly when a >= b under signed
        // comparison, 1 otherwise.
        unit.push(Operation::ControlledFlip {
            control: reg_a.msb(),
            target: anc_decision,
        });
        unit.push(Operation::ControlledFlip {
            control: anc_carry,
            target: anc_decision,
        });

        // Freeze: a unit that fails well-formedness never leaves the builder.
        validation::check_unit(&unit)?;
        Ok(unit)
    }

    /// Encodes a signed integer into a register with flips for each 1-bit of
    /// its `width`-bit two's-complement representation.
    fn encode(
        &self,
        value: i64,
        register: &Register,
        unit: &mut GateUnit,
    ) -> Result<(), RevmaxError> {
        let bits = twos_complement(value, self.width)?;
        for idx in 0..self.width {
            if (bits >> idx) & 1 == 1 {
                unit.push(Operation::Flip {
                    target: register.line(idx),
                });
            }
        }
        Ok(())
    }
}

/// Converts a signed value to its `width`-bit two's-complement representation
/// (`v' = v` if `v >= 0`, else `v + 2^width`).
///
/// # Errors
/// `RevmaxError::Range` when the value falls outside
/// `[-2^(width-1), 2^(width-1) - 1]`.
fn twos_complement(value: i64, width: usize) -> Result<u64, RevmaxError> {
    let lo = -(1i64 << (width - 1));
    let hi = (1i64 << (width - 1)) - 1;
    if value < lo || value > hi {
        return Err(RevmaxError::Range { value, width });
    }
    let unsigned = if value < 0 { value + (1i64 << width) } else { value };
    Ok(unsigned as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twos_complement_of_nonnegative_values() {
        assert_eq!(twos_complement(0, 4), Ok(0));
        assert_eq!(twos_complement(5, 4), Ok(5));
        assert_eq!(twos_complement(7, 4), Ok(7));
    }

    #[test]
    fn twos_complement_of_negative_values() {
        assert_eq!(twos_complement(-1, 4), Ok(15));
        assert_eq!(twos_complement(-6, 4), Ok(10));
        assert_eq!(twos_complement(-8, 4), Ok(8));
        assert_eq!(twos_complement(-4, 3), Ok(4));
    }

    #[test]
    fn twos_complement_rejects_out_of_range_values() {
        assert_eq!(twos_complement(8, 4), Err(RevmaxError::Range { value: 8, width: 4 }));
        assert_eq!(twos_complement(-9, 4), Err(RevmaxError::Range { value: -9, width: 4 }));
        assert_eq!(twos_complement(99, 3), Err(RevmaxError::Range { value: 99, width: 3 }));
    }

    #[test]
    fn width_bounds_are_enforced() {
        assert!(matches!(
            MaxBuilder::new(0),
            Err(RevmaxError::Configuration { .. })
        ));
        assert!(matches!(
            MaxBuilder::new(MAX_WIDTH + 1),
            Err(RevmaxError::Configuration { .. })
        ));
        assert!(MaxBuilder::new(MAX_WIDTH).is_ok());
    }

    #[test]
    fn mismatched_adder_is_the_adders_fault() {
        let adder = RippleCarryAdder::new(3).unwrap();
        assert!(matches!(
            MaxBuilder::with_adder(4, adder),
            Err(RevmaxError::Adder { .. })
        ));
    }
}
