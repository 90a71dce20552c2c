// src/lib.rs

//! `revmax` - Reversible-circuit comparison of signed integers
//!
//! This library builds a reversible arithmetic circuit that decides which of
//! two fixed-width two's-complement integers is larger, without destroying
//! the information needed to undo the computation. The comparator reuses a
//! ripple-carry adder as a subtractor via operand negation and folds the
//! resulting sign and carry signals onto a single decision line.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod arith;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{LineId, Register, RevmaxError};
pub use operations::Operation;
pub use circuits::{Circuit, CircuitBuilder, GateUnit};
pub use arith::{MaxBuilder, RippleCarryAdder, Winner, compare};
pub use simulation::{SimulationResult, Simulator};

// Example 1: One-call comparison
// Demonstrates the composed pathway: configure, build, simulate, interpret.
/// ```
/// use revmax::{compare, Winner};
///
/// // 5 > -6, so the decision line reads 0 and operand A wins.
/// let winner = compare(4, 5, -6).unwrap();
/// assert_eq!(winner, Winner::A);
///
/// // Equal operands also favor A.
/// assert_eq!(compare(4, 3, 3).unwrap(), Winner::A);
///
/// // Out-of-range operands fail at encode time with a Range error.
/// assert!(compare(3, 99, 0).is_err());
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Manual composition
// Demonstrates appending the comparator unit into a larger circuit by hand,
// the way a caller embedding it in a bigger reversible pipeline would.
/// ```
/// use revmax::{CircuitBuilder, LineId, MaxBuilder, Simulator};
///
/// let mut qmax = MaxBuilder::new(3)?;
/// qmax.set_values(-2, 1);
/// let unit = qmax.build()?.clone();
///
/// // The unit declares 2 * 3 + 3 = 9 lines; allocate them and observe the last.
/// assert_eq!(unit.num_lines(), 9);
/// let lines: Vec<LineId> = (0..9).map(LineId).collect();
/// let decision = lines[8];
///
/// let circuit = CircuitBuilder::new()
///     .append_unit(unit, &lines)?
///     .observe(vec![decision])
///     .build();
///
/// let result = Simulator::new().run(&circuit)?;
/// // 1 < -2 is false: B (value 1) is larger, so the decision bit is set.
/// assert_eq!(result.get_bit(&decision), Some(true));
/// # Ok::<(), revmax::RevmaxError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
