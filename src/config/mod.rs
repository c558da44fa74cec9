//! Configuration module for Sumi-Sieve
//!
//! Every option has a compiled-in default; a TOML file can override any subset.
//!
//! # Example
//!
//! ```no_run
//! use sumi_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Trap threshold: {}", config.content.trap_threshold);
//! ```

pub mod defaults;
mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ContentConfig, OutputConfig, ScopeConfig, ScraperConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
