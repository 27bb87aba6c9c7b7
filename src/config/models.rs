use crate::humanize::ByteSize;
use crate::media::MediaType;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// HTTP host configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Largest request body handed to the registry
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: ByteSize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().unwrap()
}

fn default_max_body_bytes() -> ByteSize {
    ByteSize::mib(5)
}

/// Which parsers get registered at startup, and in what order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Register the JSON, TOML and plain text parsers
    #[serde(default = "default_true")]
    pub builtins: bool,
    /// Append a BOM/empty-body tolerant JSON parser behind the strict one
    #[serde(default)]
    pub lenient_json: bool,
    /// Bind the text parser to `*/*` as the last resort
    #[serde(default)]
    pub text_fallback: bool,
    /// Media types moved to the front, highest priority first
    #[serde(default)]
    pub priority: Vec<MediaType>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            builtins: true,
            lenient_json: false,
            text_fallback: false,
            priority: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// True when at least one binding will be registered
    pub fn registers_any(&self) -> bool {
        self.builtins || self.lenient_json || self.text_fallback
    }
}

fn default_true() -> bool {
    true
}
