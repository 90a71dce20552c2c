//! Error handling logic

use std::fmt;

/// Error types for circuit construction and simulation.
///
/// All variants are programmer-input faults reported synchronously to the
/// immediate caller. Nothing here is transient: the same bad input always
/// fails the same way, so there is no retry surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevmaxError {
    /// The comparator was asked to build before both operands were set.
    Configuration {
        /// Configuration failure message
        message: String,
    },

    /// An operand's two's-complement representation does not fit in the
    /// configured bit width. Raised when the value is actually encoded,
    /// not when it is assigned.
    Range {
        /// The offending operand value
        value: i64,
        /// The configured register width in bits
        width: usize,
    },

    /// A fault raised by the adder primitive (e.g. a width mismatch between
    /// the adder and the registers it is composed over). Propagated to the
    /// caller unchanged.
    Adder {
        /// Adder failure message
        message: String,
    },

    /// An operation or unit is inconsistent with the circuit it is applied to
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// General error encountered during the simulation process itself
    Simulation {
        /// Simulation failure message
        message: String,
    },
}

impl fmt::Display for RevmaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevmaxError::Configuration { message } => write!(f, "Configuration Error: {}", message),
            RevmaxError::Range { value, width } => write!(
                f,
                "Range Error: value {} does not fit in a {}-bit two's-complement register",
                value, width
            ),
            RevmaxError::Adder { message } => write!(f, "Adder Error: {}", message),
            RevmaxError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            RevmaxError::Simulation { message } => write!(f, "Simulation Process Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for RevmaxError {}
