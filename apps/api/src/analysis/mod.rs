// Display model for resume analysis results.
// Everything here is pure: no I/O, no logging.

pub mod models;
pub mod normalizer;
pub mod rating;
