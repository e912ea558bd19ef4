//! Command-line driver for the esdown downleveler.
//!
//! - `args`: clap argument definitions
//! - `config`: `esdown.json` loading and input discovery
//! - `driver`: parallel per-file transpilation and output writing
//! - `reporter`: diagnostic rendering
//! - `tracing_config`: opt-in tracing subscriber

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
