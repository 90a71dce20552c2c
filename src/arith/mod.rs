// src/arith/mod.rs

//! Reversible arithmetic units and the public comparison entry point.
//!
//! `adder` vendors the ripple-carry adder primitive; `max` composes it into
//! the signed-integer comparator. [`compare`] wires a built comparator into
//! a circuit, runs the simulator, and interprets the decision bit.

pub mod adder;
pub mod max;

// Re-export the builder types for access via `revmax::arith::TypeName`
pub use adder::RippleCarryAdder;
pub use max::MaxBuilder;

use crate::circuits::CircuitBuilder;
use crate::core::RevmaxError;
use crate::simulation::Simulator;
use std::fmt;

/// Which operand a comparison selected as the maximum.
///
/// Ties favor `A`: the decision line reads 0 (→ `A`) whenever `a >= b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    /// The first operand is the maximum (or the operands are equal).
    A,
    /// The second operand is strictly larger.
    B,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::A => write!(f, "A"),
            Winner::B => write!(f, "B"),
        }
    }
}

/// Compares two `width`-bit signed integers through the reversible
/// comparator circuit and reports which one is larger.
///
/// This is the composed pathway a caller would otherwise write by hand:
/// configure a [`MaxBuilder`], build its unit, allocate `2 * width + 3`
/// lines in a fresh circuit, append the unit across them, observe the
/// decision line through the [`Simulator`], and interpret the recorded bit
/// (`0` → [`Winner::A`], `1` → [`Winner::B`]).
///
/// ```
/// use revmax::{compare, Winner};
///
/// assert_eq!(compare(4, 5, -6)?, Winner::A);
/// assert_eq!(compare(4, 6, 7)?, Winner::B);
/// # Ok::<(), revmax::RevmaxError>(())
/// ```
///
/// # Errors
/// * `RevmaxError::Configuration` for an invalid width.
/// * `RevmaxError::Range` when an operand does not fit in `width` bits.
pub fn compare(width: usize, a: i64, b: i64) -> Result<Winner, RevmaxError> {
    let mut builder = MaxBuilder::new(width)?;
    builder.set_values(a, b);
    let unit = builder.build()?.clone();

    let lines = unit.local_lines();
    let decision = lines[lines.len() - 1];
    let circuit = CircuitBuilder::new()
        .append_unit(unit, &lines)?
        .observe(vec![decision])
        .build();

    let result = Simulator::new().run(&circuit)?;
    match result.get_bit(&decision) {
        Some(false) => Ok(Winner::A),
        Some(true) => Ok(Winner::B),
        None => Err(RevmaxError::Simulation {
            message: "decision line was not observed".to_string(),
        }),
    }
}
