//! Configuration management for parsebox
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use parsebox::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! let registry = config.build_registry().expect("Failed to build registry");
//! println!("Parsers: {:?}", registry.media_types());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `PARSEBOX__<section>__<key>`
//!
//! Examples:
//! - `PARSEBOX__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `PARSEBOX__SERVER__MAX_BODY_BYTES=10MB`
//! - `PARSEBOX__REGISTRY__PRIORITY=application/toml,application/json`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/parsebox.toml`.
//! This can be overridden using the `PARSEBOX_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::ByteSize;
pub use models::{Config, RegistryConfig, ServerConfig};
pub use validation::ValidationError;

use std::sync::Arc;
use thiserror::Error;

use crate::parsers::{LenientJsonParser, ParserRegistry, RegistryError, TextParser};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    pub fn build_registry(&self) -> Result<ParserRegistry, RegistryError> {
        self.registry.build()
    }
}

impl RegistryConfig {
    /// Register the enabled parsers, then apply `priority`
    ///
    /// The priority list is applied all-or-nothing, so a typo never leaves a
    /// half-reordered registry behind.
    pub fn build(&self) -> Result<ParserRegistry, RegistryError> {
        let mut registry = if self.builtins {
            ParserRegistry::with_defaults()
        } else {
            ParserRegistry::new()
        };

        if self.lenient_json {
            registry.add(mime::APPLICATION_JSON.into(), Arc::new(LenientJsonParser));
        }
        if self.text_fallback {
            registry.add(mime::STAR_STAR.into(), Arc::new(TextParser));
        }

        registry.set_priority_atomic(&self.priority)?;

        tracing::debug!(
            bindings = registry.len(),
            order = ?registry.media_types().iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Parser registry built"
        );

        Ok(registry)
    }
}
