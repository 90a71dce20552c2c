//! Renders the composed comparator as a text diagram.
//!
//! Builds the width-4 comparator for 5 vs -6, appends it into a circuit the
//! way a caller would, and prints the circuit with the comparator expanded
//! into its elementary steps so the encode/subtract/recombine structure is
//! visible.

use revmax::{CircuitBuilder, MaxBuilder, Operation, RevmaxError};

fn main() -> Result<(), RevmaxError> {
    let mut qmax = MaxBuilder::new(4)?;
    qmax.set_values(5, -6);
    let unit = qmax.build()?.clone();

    println!("Composed unit: {}", unit);
    println!();

    // As appended: the whole comparator is one step in the outer circuit.
    let lines = unit.local_lines();
    let decision = lines[lines.len() - 1];
    let outer = CircuitBuilder::new()
        .append_unit(unit.clone(), &lines)?
        .observe(vec![decision])
        .build();
    println!("{}", outer);

    // Expanded: the unit's own operation sequence over its local lines.
    // The nested "add" block is the ripple-carry adder sub-unit.
    let expanded = CircuitBuilder::new()
        .add_ops(unit.operations().iter().cloned())
        .add_op(Operation::Observe { targets: vec![decision] })
        .build();
    println!("{}", expanded);

    Ok(())
}
