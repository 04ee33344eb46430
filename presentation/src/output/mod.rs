//! Report output

pub mod console;
pub mod formatter;
