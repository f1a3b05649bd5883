//! Triage Configuration Module
//!
//! Classification thresholds, label wording, neighbor-search tuning and the
//! input/export table layout, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. Explicit path (`--config`)
//! 2. `TRIAGE_CONFIG` environment variable (path to TOML file)
//! 3. `triage_config.toml` in the current working directory
//! 4. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! let config = TriageConfig::load(None)?;
//! let classifier = Classifier::new(config.thresholds(), config.classifier_options())?;
//! ```

mod triage_config;
pub mod defaults;
pub mod validation;

pub use triage_config::*;
