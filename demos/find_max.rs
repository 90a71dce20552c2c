//! Demonstrates the one-call comparison pathway: reads a bit width and two
//! signed integers from the command line and prints which one is larger.
//!
//! Usage: `cargo run --example find_max -- [width] [a] [b]`
//! Defaults to `4 5 -6` when arguments are omitted.

use revmax::{Winner, compare};
use std::env;
use std::process::ExitCode;

fn parse_args() -> Result<(usize, i64, i64), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let width = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| format!("invalid width '{}'", raw))?,
        None => 4,
    };
    let a = match args.get(1) {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| format!("invalid first operand '{}'", raw))?,
        None => 5,
    };
    let b = match args.get(2) {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| format!("invalid second operand '{}'", raw))?,
        None => -6,
    };
    Ok((width, a, b))
}

fn main() -> ExitCode {
    let (width, a, b) = match parse_args() {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: find_max [width] [a] [b]");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Finding the largest number among the choices {} and {} at {}-bit precision...",
        a, b, width
    );

    match compare(width, a, b) {
        Ok(winner) => {
            let largest = match winner {
                Winner::A => a,
                Winner::B => b,
            };
            println!("The decision line selected operand {}.", winner);
            println!("The answer is: {}", largest);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Comparison failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
