//! Access-control rule construction.
//!
//! Builders used by every resource-specific adapter to assemble its local
//! rules, plus the well-known rule names shared across adapters.

pub mod names;
pub mod rule;

pub use rule::*;
