//! Domain module for the Numbering subsystem
//!
//! - counter: year-scoped sequence counter and rollover rule
//! - prefixes: validated prefix per number series

pub mod counter;
pub mod prefixes;

pub use counter::SequenceCounter;
pub use prefixes::PrefixTable;
