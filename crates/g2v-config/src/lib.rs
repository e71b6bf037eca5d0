//! Environment-driven runtime configuration and tracing setup for the g2v tools.

pub mod runtime;
pub mod tracing;

pub use crate::runtime::{RuntimeConfig, DEFAULT_LOG_FILTER};
pub use crate::tracing::{init_tracing, InitError, TracingGuard};
