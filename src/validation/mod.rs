// src/validation/mod.rs

//! Well-formedness checks for gate units and line spans.
//!
//! A `GateUnit` is only appendable if every operation it carries stays
//! within its declared local line range, never aliases a control onto its
//! own target, and contains no observation steps (observing is the
//! surrounding circuit's job). These checks run when a unit is frozen by a
//! builder and again when it is appended across a caller's span.

use crate::circuits::GateUnit;
use crate::core::{LineId, RevmaxError};
use crate::operations::Operation;
use std::collections::HashSet;

/// Checks that a control line differs from its flip target.
fn check_distinct(controls: &[LineId], target: LineId) -> Result<(), RevmaxError> {
    if controls.contains(&target) {
        return Err(RevmaxError::InvalidOperation {
            message: format!("control line {} cannot also be the flip target", target),
        });
    }
    // A doubly-controlled flip with both controls on one line would be a
    // plain controlled flip in disguise; reject it as malformed.
    if controls.len() == 2 && controls[0] == controls[1] {
        return Err(RevmaxError::InvalidOperation {
            message: format!("both controls of a doubly-controlled flip are {}", controls[0]),
        });
    }
    Ok(())
}

/// Checks that a unit-local line reference is inside the declared range.
fn check_local(line: LineId, num_lines: usize, unit_name: &str) -> Result<(), RevmaxError> {
    if line.0 as usize >= num_lines {
        return Err(RevmaxError::InvalidOperation {
            message: format!(
                "unit '{}' references local line {} but only declares {} lines",
                unit_name, line, num_lines
            ),
        });
    }
    Ok(())
}

/// Validates a whole `GateUnit`, recursing into nested units.
///
/// # Returns
/// * `Ok(())` if every operation references only declared local lines, all
///   controls are distinct from their targets, and no `Observe` step occurs.
/// * `Err(RevmaxError::InvalidOperation)` describing the first violation.
pub fn check_unit(unit: &GateUnit) -> Result<(), RevmaxError> {
    for op in unit.operations() {
        match op {
            Operation::Flip { target } => {
                check_local(*target, unit.num_lines(), unit.name())?;
            }
            Operation::ControlledFlip { control, target } => {
                check_local(*control, unit.num_lines(), unit.name())?;
                check_local(*target, unit.num_lines(), unit.name())?;
                check_distinct(&[*control], *target)?;
            }
            Operation::DoublyControlledFlip { controls, target } => {
                for line in controls.iter().chain(std::iter::once(target)) {
                    check_local(*line, unit.num_lines(), unit.name())?;
                }
                check_distinct(controls, *target)?;
            }
            Operation::Unit { unit: inner, lines } => {
                for line in lines {
                    check_local(*line, unit.num_lines(), unit.name())?;
                }
                check_line_span(inner, lines)?;
                check_unit(inner)?;
            }
            Operation::Observe { .. } => {
                return Err(RevmaxError::InvalidOperation {
                    message: format!(
                        "unit '{}' contains an Observe step; observation belongs to the outer circuit",
                        unit.name()
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Validates the span of lines a unit is being appended across.
///
/// # Returns
/// * `Ok(())` if the span length equals the unit's declared line count and
///   no line appears twice.
/// * `Err(RevmaxError::InvalidOperation)` otherwise.
pub fn check_line_span(unit: &GateUnit, lines: &[LineId]) -> Result<(), RevmaxError> {
    if lines.len() != unit.num_lines() {
        return Err(RevmaxError::InvalidOperation {
            message: format!(
                "unit '{}' spans {} lines but {} were supplied",
                unit.name(),
                unit.num_lines(),
                lines.len()
            ),
        });
    }
    let unique: HashSet<LineId> = lines.iter().cloned().collect();
    if unique.len() != lines.len() {
        return Err(RevmaxError::InvalidOperation {
            message: format!("span for unit '{}' repeats a line", unit.name()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lid(id: u64) -> LineId {
        LineId(id)
    }

    fn unit_with(ops: Vec<Operation>, num_lines: usize) -> GateUnit {
        let mut unit = GateUnit::new("test", num_lines);
        for op in ops {
            unit.push(op);
        }
        unit
    }

    #[test]
    fn accepts_well_formed_unit() {
        let unit = unit_with(
            vec![
                Operation::Flip { target: lid(0) },
                Operation::ControlledFlip { control: lid(0), target: lid(1) },
                Operation::DoublyControlledFlip { controls: [lid(0), lid(1)], target: lid(2) },
            ],
            3,
        );
        assert!(check_unit(&unit).is_ok());
    }

    #[test]
    fn rejects_out_of_range_line() {
        let unit = unit_with(vec![Operation::Flip { target: lid(3) }], 3);
        assert!(matches!(
            check_unit(&unit),
            Err(RevmaxError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn rejects_control_aliasing_target() {
        let unit = unit_with(
            vec![Operation::ControlledFlip { control: lid(1), target: lid(1) }],
            2,
        );
        assert!(check_unit(&unit).is_err());
    }

    #[test]
    fn rejects_observe_inside_unit() {
        let unit = unit_with(vec![Operation::Observe { targets: vec![lid(0)] }], 1);
        assert!(check_unit(&unit).is_err());
    }

    #[test]
    fn rejects_wrong_span_length() {
        let unit = unit_with(vec![], 3);
        assert!(check_line_span(&unit, &[lid(0), lid(1)]).is_err());
        assert!(check_line_span(&unit, &[lid(0), lid(1), lid(1)]).is_err());
        assert!(check_line_span(&unit, &[lid(4), lid(7), lid(9)]).is_ok());
    }
}
