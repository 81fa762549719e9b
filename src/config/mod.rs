//! Configuration module for kb-harvest
//!
//! This module handles loading, parsing, and validating JSON configuration files.
//!
//! # Example
//!
//! ```no_run
//! use kb_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.json")).unwrap();
//! println!("Artifacts go to: {}", config.html_storage_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, SelectorConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
