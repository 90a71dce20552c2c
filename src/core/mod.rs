// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod line;
pub mod register;

// Re-export public types for convenient access via `revmax::core::TypeName`
pub use error::RevmaxError;
pub use line::LineId;
pub use register::Register;
