//! Domain rules that hold regardless of transport.

pub mod error;
pub mod validation;
