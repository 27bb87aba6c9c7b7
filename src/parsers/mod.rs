//! Parser registry and built-in parsers
//!
//! This module maps media types to parsers that decode raw bytes into
//! [`serde_json::Value`], trying candidates in priority order.
//!
//! ## Key Components
//!
//! - [`MediaTypeParser`] - Trait implemented by every parser
//! - [`ParserRegistry`] - Ordered (media type, parser) bindings with fallback parsing
//! - [`Binding`] - A single registered pair
//! - [`JsonParser`], [`LenientJsonParser`], [`TomlParser`], [`TextParser`] - Built-ins
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use parsebox::parsers::{LenientJsonParser, ParserRegistry};
//!
//! let mut registry = ParserRegistry::with_defaults();
//! registry.add(mime::APPLICATION_JSON.into(), Arc::new(LenientJsonParser));
//!
//! let json = "application/json".parse().unwrap();
//! let parsed = registry.parse(b"", &json).unwrap();
//! assert!(parsed.value.is_null());
//! ```

mod json;
mod registry;
mod text;
mod toml;
mod traits;
mod types;

pub use json::{JsonParser, LenientJsonParser};
pub use registry::{ParserRegistry, RegistryError};
pub use text::TextParser;
pub use self::toml::TomlParser;
pub use traits::{MediaTypeParser, ParseError};
pub use types::{Binding, Parsed};
