//! Report model and output formatters

pub mod formatter;
pub mod report;
