// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! reversible operations (`revmax::operations::Operation`).
//!
//! This module provides the `Circuit` structure, an ordered pathway of
//! bit transformations over a set of lines, and `GateUnit`, the frozen,
//! appendable result of a circuit builder (the comparator and the adder are
//! both delivered as `GateUnit`s).

// Import necessary types from other modules
use crate::core::{LineId, RevmaxError};
use crate::operations::Operation;
use crate::validation;
use std::collections::{HashMap, HashSet}; // HashSet to efficiently track unique lines involved
use std::fmt;

/// Represents an ordered sequence of Operations applied to a set of lines.
///
/// The order of operations is the order of execution: a circuit is a
/// specific, fully determined pathway from the all-zero initial state to an
/// output configuration.
///
/// Analogy: similar to `qiskit.QuantumCircuit` or `cirq.Circuit`,
/// representing the sequence of gates and measurements applied to qubits,
/// restricted here to classical reversible steps.
#[derive(Clone, PartialEq, Eq)] // PartialEq useful for testing circuits
pub struct Circuit {
    /// The unique set of lines involved across all operations in this circuit.
    lines: HashSet<LineId>,

    /// The ordered sequence of operations defining the circuit's logic.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            lines: HashSet::new(),
            operations: Vec::new(),
        }
    }

    /// Adds a single operation to the end of the circuit's sequence.
    ///
    /// This method automatically identifies the lines involved in the `op`
    /// and adds them to the circuit's set of known lines.
    ///
    /// # Arguments
    /// * `op` - The `Operation` to append to the sequence.
    pub fn add_operation(&mut self, op: Operation) {
        // Register the lines involved in this operation
        for line_id in op.involved_lines() {
            self.lines.insert(line_id);
        }
        // Add the operation to the ordered list
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator to the end of the circuit's sequence.
    ///
    /// # Arguments
    /// * `ops` - An iterator yielding `Operation` items to append.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Appends a whole `GateUnit` across the given span of lines.
    ///
    /// The caller is responsible for allocating exactly `unit.num_lines()`
    /// distinct lines and listing them in the unit's declared order; the
    /// span is validated before the unit is recorded as a single step.
    ///
    /// # Errors
    /// Returns `RevmaxError::InvalidOperation` if the span length does not
    /// match the unit's line count or the span repeats a line.
    pub fn append_unit(&mut self, unit: GateUnit, lines: &[LineId]) -> Result<(), RevmaxError> {
        validation::check_line_span(&unit, lines)?;
        self.add_operation(Operation::Unit {
            unit,
            lines: lines.to_vec(),
        });
        Ok(())
    }

    /// Returns a reference to the set of unique line IDs involved in this circuit.
    pub fn lines(&self) -> &HashSet<LineId> {
        &self.lines
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

// Implement Default for convenient creation of empty circuits.
impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Gate Unit
//-------------------------------------------------------------------------

/// The frozen, appendable result of building a reversible sub-circuit.
///
/// A `GateUnit` declares how many lines it spans and carries the ordered
/// operations implementing it. The operations reference *unit-local* lines
/// `0..num_lines`; when the unit is appended into a surrounding circuit via
/// [`Circuit::append_unit`] those local lines are stood in for by the
/// caller's span, position by position. Units nest: a unit's own operation
/// list may contain further `Operation::Unit` steps (the comparator carries
/// the adder this way).
///
/// A unit is immutable once handed to a caller and may be freely cloned and
/// appended into any number of circuits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateUnit {
    /// Name shown in diagrams (e.g. "max", "add").
    name: String,
    /// Number of lines the unit spans, fixed at creation.
    num_lines: usize,
    /// Ordered operations over unit-local lines `0..num_lines`.
    operations: Vec<Operation>,
}

impl GateUnit {
    /// Creates a new, empty unit spanning `num_lines` local lines.
    pub(crate) fn new(name: impl Into<String>, num_lines: usize) -> Self {
        Self {
            name: name.into(),
            num_lines,
            operations: Vec::new(),
        }
    }

    /// Appends one operation. (Internal: units are immutable once published.)
    pub(crate) fn push(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// The unit's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of lines the unit spans when appended.
    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    /// The local line at position `idx`, for wiring the unit internally.
    pub(crate) fn local_line(&self, idx: usize) -> LineId {
        LineId(idx as u64)
    }

    /// The full local span `0..num_lines`, in order.
    pub fn local_lines(&self) -> Vec<LineId> {
        (0..self.num_lines as u64).map(LineId).collect()
    }

    /// The ordered operations over unit-local lines.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

impl fmt::Display for GateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GateUnit('{}', {} lines, {} operations)",
            self.name,
            self.num_lines,
            self.operations.len()
        )
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self {
            circuit: Circuit::new(),
        }
    }

    /// Adds a single operation to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Appends a `GateUnit` across `lines`, validating the span.
    ///
    /// Returns `self` for chaining on success.
    pub fn append_unit(mut self, unit: GateUnit, lines: &[LineId]) -> Result<Self, RevmaxError> {
        self.circuit.append_unit(unit, lines)?;
        Ok(self)
    }

    /// Adds an observation of the given lines as the next step.
    pub fn observe(self, targets: Vec<LineId>) -> Self {
        self.add_op(Operation::Observe { targets })
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

// Implement Default for convenient creation of builders.
impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Text diagram rendering
//-------------------------------------------------------------------------

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "revmax::Circuit[0 operations on 0 lines]");
        }

        // --- Setup ---
        let ops = &self.operations;
        let num_ops = ops.len();

        // Get sorted list of unique lines and create row map
        let mut sorted_lines: Vec<LineId> = self.lines.iter().cloned().collect();
        sorted_lines.sort(); // Sort numerically for consistent row order
        let num_lines = sorted_lines.len();
        let line_to_row: HashMap<LineId, usize> = sorted_lines
            .iter()
            .enumerate()
            .map(|(i, lid)| (*lid, i))
            .collect();

        // Determine label width
        let max_label_width = sorted_lines
            .iter()
            .map(|lid| format!("{}", lid).len())
            .max()
            .unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        // Grid dimensions and padding
        const GATE_WIDTH: usize = 7; // e.g., "───X───"
        const WIRE: &str = "───────"; // GATE_WIDTH dashes
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // Initialize grids
        // op_grid[row][time] stores the gate/wire segment string
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_lines];
        // v_connect[row][time] stores the vertical connector char below this row at this time
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_lines];

        // Helper to format a gate symbol centered in a wire segment
        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        // Helper to draw vertical connectors between two rows at time t
        fn connect_rows(v_connect: &mut [Vec<char>], r_min: usize, r_max: usize, t: usize) {
            for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                row_vec[t] = V_WIRE;
            }
        }

        // --- Populate Grids ---
        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Flip { target } => {
                    if let Some(r) = line_to_row.get(target) {
                        op_grid[*r][t] = format_gate("X");
                    }
                }
                Operation::ControlledFlip { control, target } => {
                    if let (Some(r_ctrl), Some(r_tgt)) =
                        (line_to_row.get(control), line_to_row.get(target))
                    {
                        op_grid[*r_ctrl][t] = format_gate("@");
                        op_grid[*r_tgt][t] = format_gate("X");
                        connect_rows(&mut v_connect, (*r_ctrl).min(*r_tgt), (*r_ctrl).max(*r_tgt), t);
                    }
                }
                Operation::DoublyControlledFlip { controls, target } => {
                    let rows: Option<Vec<usize>> = [controls[0], controls[1], *target]
                        .iter()
                        .map(|lid| line_to_row.get(lid).copied())
                        .collect();
                    if let Some(rows) = rows {
                        op_grid[rows[0]][t] = format_gate("@");
                        op_grid[rows[1]][t] = format_gate("@");
                        op_grid[rows[2]][t] = format_gate("X");
                        let r_min = *rows.iter().min().unwrap_or(&0);
                        let r_max = *rows.iter().max().unwrap_or(&0);
                        connect_rows(&mut v_connect, r_min, r_max, t);
                    }
                }
                Operation::Unit { unit, lines } => {
                    // Draw the unit as a block: name on its topmost row,
                    // box segments on the rest, connected vertically.
                    let mut rows: Vec<usize> = lines
                        .iter()
                        .filter_map(|lid| line_to_row.get(lid).copied())
                        .collect();
                    rows.sort_unstable();
                    if let (Some(&r_min), Some(&r_max)) = (rows.first(), rows.last()) {
                        for (i, r) in rows.iter().enumerate() {
                            op_grid[*r][t] = if i == 0 {
                                format_gate(unit.name())
                            } else {
                                format_gate("▒")
                            };
                        }
                        connect_rows(&mut v_connect, r_min, r_max, t);
                    }
                }
                Operation::Observe { targets } => {
                    for target_lid in targets {
                        if let Some(r) = line_to_row.get(target_lid) {
                            op_grid[*r][t] = format_gate("M");
                        }
                    }
                }
            }
        }

        // --- Format Output String ---
        writeln!(
            f,
            "revmax::Circuit[{} operations on {} lines]",
            num_ops, num_lines
        )?;
        for r in 0..num_lines {
            // Print line label row
            let label = format!("{}: ", sorted_lines[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            // Print vertical connector row (if not the last line)
            if r < num_lines - 1 {
                write!(f, "{}", label_padding)?; // Padding for alignment
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?; // Newline after connector row
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
