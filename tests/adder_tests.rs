// tests/adder_tests.rs

use revmax::{
    CircuitBuilder, LineId, Operation, Register, RevmaxError, RippleCarryAdder, SimulationResult,
    simulation::Simulator,
};

fn lid(id: u64) -> LineId {
    LineId(id)
}

/// Encodes `a` and `b` into the adder's registers with plain flips, runs the
/// adder unit over lines `0..2w+2`, and observes every line.
fn run_adder(width: usize, a: u64, b: u64) -> Result<SimulationResult, RevmaxError> {
    let adder = RippleCarryAdder::new(width)?;

    let mut encode_ops = Vec::new();
    for i in 0..width {
        if (a >> i) & 1 == 1 {
            encode_ops.push(Operation::Flip { target: lid(i as u64) });
        }
        if (b >> i) & 1 == 1 {
            encode_ops.push(Operation::Flip { target: lid((width + i) as u64) });
        }
    }

    let span: Vec<LineId> = (0..adder.num_lines() as u64).map(LineId).collect();
    let circuit = CircuitBuilder::new()
        .add_ops(encode_ops)
        .append_unit(adder.unit().clone(), &span)?
        .observe(span)
        .build();

    Simulator::new().run(&circuit)
}

fn check_sum(width: usize, a: u64, b: u64) -> Result<(), RevmaxError> {
    let result = run_adder(width, a, b)?;

    let reg_a = Register::contiguous("a", 0, width);
    let reg_b = Register::contiguous("b", width as u64, width);
    let carry = lid(2 * width as u64);
    let helper = lid(2 * width as u64 + 1);

    let sum = a + b;
    let context = format!("width={} a={} b={}", width, a, b);
    assert_eq!(
        result.register_value(&reg_b),
        Some(sum % (1 << width)),
        "B register should hold the modular sum ({})",
        context
    );
    assert_eq!(
        result.get_bit(&carry),
        Some((sum >> width) & 1 == 1),
        "carry-out should be bit {} of the sum ({})",
        width,
        context
    );
    assert_eq!(
        result.register_value(&reg_a),
        Some(a),
        "A register should be restored ({})",
        context
    );
    assert_eq!(
        result.get_bit(&helper),
        Some(false),
        "helper line should be returned to 0 ({})",
        context
    );
    Ok(())
}

#[test]
fn test_rejects_zero_width() {
    assert!(matches!(
        RippleCarryAdder::new(0),
        Err(RevmaxError::Adder { .. })
    ));
}

#[test]
fn test_line_layout() -> Result<(), RevmaxError> {
    let adder = RippleCarryAdder::new(4)?;
    assert_eq!(adder.width(), 4);
    assert_eq!(adder.num_lines(), 10);
    assert_eq!(adder.carry_line(), 8);
    assert_eq!(adder.helper_line(), 9);
    assert_eq!(adder.unit().num_lines(), 10);
    Ok(())
}

#[test]
fn test_single_bit_sums() -> Result<(), RevmaxError> {
    // Full truth table for the smallest adder
    for a in 0..2 {
        for b in 0..2 {
            check_sum(1, a, b)?;
        }
    }
    Ok(())
}

#[test]
fn test_two_bit_sums_exhaustive() -> Result<(), RevmaxError> {
    for a in 0..4 {
        for b in 0..4 {
            check_sum(2, a, b)?;
        }
    }
    Ok(())
}

#[test]
fn test_three_bit_sums_exhaustive() -> Result<(), RevmaxError> {
    for a in 0..8 {
        for b in 0..8 {
            check_sum(3, a, b)?;
        }
    }
    Ok(())
}

#[test]
fn test_five_bit_carry_boundary() -> Result<(), RevmaxError> {
    // The largest operands produce a carry; zero operands never do.
    check_sum(5, 31, 31)?;
    check_sum(5, 31, 1)?;
    check_sum(5, 0, 0)?;
    Ok(())
}

#[test]
fn test_carry_out_is_a_toggle() -> Result<(), RevmaxError> {
    // The adder toggles the carry-out line rather than writing it: with the
    // line pre-set and a carrying sum, the toggle returns it to 0.
    let width = 2;
    let adder = RippleCarryAdder::new(width)?;
    let carry = lid(2 * width as u64);
    let span: Vec<LineId> = (0..adder.num_lines() as u64).map(LineId).collect();

    let circuit = CircuitBuilder::new()
        .add_op(Operation::Flip { target: lid(0) }) // a0: a = 3
        .add_op(Operation::Flip { target: lid(1) }) // a1
        .add_op(Operation::Flip { target: lid(2) }) // b0: b = 1
        .add_op(Operation::Flip { target: carry }) // pre-set carry-out
        .append_unit(adder.unit().clone(), &span)?
        .observe(span)
        .build();

    let result = Simulator::new().run(&circuit)?;
    // 3 + 1 = 4 carries out of 2 bits, toggling the pre-set line back to 0.
    assert_eq!(result.get_bit(&carry), Some(false));
    let reg_b = Register::contiguous("b", width as u64, width);
    assert_eq!(result.register_value(&reg_b), Some(0));
    Ok(())
}
