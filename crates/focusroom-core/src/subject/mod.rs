//! Subjects: what a focus interval is spent on.
//!
//! The registry always keeps exactly one subject selected while it is
//! non-empty, and caches each subject's focused minutes.

mod color;
mod registry;

pub use color::Color;
pub use registry::{Subject, SubjectActions, SubjectId, SubjectRegistry};
