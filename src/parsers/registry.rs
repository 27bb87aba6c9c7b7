use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::json::JsonParser;
use super::text::TextParser;
use super::toml::TomlParser;
use super::traits::{MediaTypeParser, ParseError};
use super::types::{Binding, Parsed};
use crate::media::MediaType;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("media type not found: {0}")]
    MediaTypeNotFound(MediaType),
    #[error("no suitable parser for media type: {0}")]
    NoSuitableParser(MediaType),
    /// Error of the last parser tried, passed through as-is
    #[error(transparent)]
    Parser(#[from] ParseError),
}

/// Priority-ordered registry of parsers keyed by media type
///
/// Earlier bindings have higher priority. Lookups use wildcard matching
/// ([`MediaType::matches`]) with the stored type on the left; priority
/// changes use exact equality.
#[derive(Clone, Debug, Default)]
pub struct ParserRegistry {
    bindings: Vec<Binding>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Append a binding with the lowest priority
    pub fn add(&mut self, media_type: MediaType, parser: Arc<dyn MediaTypeParser>) {
        self.bindings.push(Binding::new(media_type, parser));
    }

    /// Move the first binding equal to `media_type` to the front
    pub fn set_top_priority(&mut self, media_type: &MediaType) -> Result<(), RegistryError> {
        let index = self
            .position(media_type)
            .ok_or_else(|| RegistryError::MediaTypeNotFound(media_type.clone()))?;

        let binding = self.bindings.remove(index);
        self.bindings.insert(0, binding);
        Ok(())
    }

    /// Put the given media types first, in the given order
    ///
    /// Applies [`set_top_priority`](Self::set_top_priority) from the last
    /// entry to the first and stops at the first missing media type. Moves
    /// made before the failure stay in place; use
    /// [`set_priority_atomic`](Self::set_priority_atomic) to avoid that.
    pub fn set_priority(&mut self, media_types: &[MediaType]) -> Result<(), RegistryError> {
        for media_type in media_types.iter().rev() {
            self.set_top_priority(media_type)?;
        }
        Ok(())
    }

    /// Like [`set_priority`](Self::set_priority), but leaves the order
    /// untouched unless every media type is registered
    pub fn set_priority_atomic(&mut self, media_types: &[MediaType]) -> Result<(), RegistryError> {
        if let Some(missing) = media_types.iter().find(|m| self.position(m).is_none()) {
            return Err(RegistryError::MediaTypeNotFound(missing.clone()));
        }
        self.set_priority(media_types)
    }

    /// Bindings whose media type matches `media_type`, in priority order
    pub fn parsers_for(&self, media_type: &MediaType) -> Vec<&Binding> {
        self.bindings
            .iter()
            .filter(|binding| binding.media_type().matches(media_type))
            .collect()
    }

    /// Registered media types in priority order
    pub fn media_types(&self) -> Vec<&MediaType> {
        self.bindings.iter().map(Binding::media_type).collect()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Decode `data` with the first matching parser that accepts it
    ///
    /// A parser failure only means "try the next candidate". When every
    /// candidate fails the last error is returned; earlier ones are dropped.
    pub fn parse(&self, data: &[u8], media_type: &MediaType) -> Result<Parsed, RegistryError> {
        let mut last_error = None;

        for binding in self.parsers_for(media_type) {
            match binding.parser().parse(data) {
                Ok(value) => {
                    return Ok(Parsed {
                        media_type: binding.media_type().clone(),
                        value,
                    });
                }
                Err(err) => {
                    debug!(
                        query = %media_type,
                        candidate = %binding.media_type(),
                        error = %err,
                        "Parser rejected input, trying next candidate"
                    );
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) => {
                debug!(query = %media_type, "All candidate parsers failed");
                Err(RegistryError::Parser(err))
            }
            None => Err(RegistryError::NoSuitableParser(media_type.clone())),
        }
    }

    /// Registry with the built-in JSON, TOML and plain text parsers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add(mime::APPLICATION_JSON.into(), Arc::new(JsonParser));
        registry.add(TomlParser::media_type(), Arc::new(TomlParser));
        registry.add(mime::TEXT_PLAIN.into(), Arc::new(TextParser));
        registry
    }

    fn position(&self, media_type: &MediaType) -> Option<usize> {
        self.bindings
            .iter()
            .position(|binding| binding.media_type() == media_type)
    }
}
