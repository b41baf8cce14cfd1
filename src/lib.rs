//! Facade over the workspace crates: word vector tables, matrix building and the format registry.

pub use wordvector::*;
