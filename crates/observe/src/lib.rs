//! This crate is intended to contain code that is required to provide or
//! improve the observability of the batch builder. That includes
//! initialization logic for logging as well as logging helper functions.
pub mod config;
pub mod tracing;

pub use config::Config;
