use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::traits::MediaTypeParser;
use crate::media::MediaType;

/// A registered (media type, parser) pair
///
/// Bindings never change after registration; the registry only moves them.
#[derive(Clone)]
pub struct Binding {
    media_type: MediaType,
    parser: Arc<dyn MediaTypeParser>,
}

impl Binding {
    pub fn new(media_type: MediaType, parser: Arc<dyn MediaTypeParser>) -> Self {
        Self { media_type, parser }
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn parser(&self) -> &Arc<dyn MediaTypeParser> {
        &self.parser
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("media_type", &self.media_type)
            .finish_non_exhaustive()
    }
}

/// Successful parse outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parsed {
    /// Media type of the binding that accepted the input, not the query
    pub media_type: MediaType,
    pub value: Value,
}
