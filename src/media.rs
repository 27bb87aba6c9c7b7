//! Media type value used as the registry key
//!
//! [`MediaType`] wraps [`mime::Mime`] for parsing and formatting and adds the
//! wildcard `matches` predicate the registry resolves candidates with.
//!
//! Two notions of "same media type" are in play:
//!
//! - **Equality** (`==`) is strict: type, subtype, suffix and parameters must
//!   agree. Priority operations use it to find a binding.
//! - **Matching** ([`MediaType::matches`]) honours `*` wildcards on either side
//!   and ignores parameters. Candidate lookup uses it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaTypeError {
    #[error("invalid media type: {0}")]
    Invalid(String),
}

/// A content-type identifier such as `application/json` or `text/*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaType(mime::Mime);

impl MediaType {
    /// Wildcard-aware comparison, symmetric in its arguments
    ///
    /// `*/*` matches everything, `text/*` matches any `text` subtype, and
    /// parameters never take part.
    pub fn matches(&self, other: &MediaType) -> bool {
        let (ty, sub) = (self.0.type_(), self.0.subtype());
        let (other_ty, other_sub) = (other.0.type_(), other.0.subtype());

        if ty == mime::STAR || other_ty == mime::STAR {
            return true;
        }

        ty == other_ty && (sub == mime::STAR || other_sub == mime::STAR || sub == other_sub)
    }
}

impl FromStr for MediaType {
    type Err = MediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<mime::Mime>()
            .map(MediaType)
            .map_err(|_| MediaTypeError::Invalid(s.to_string()))
    }
}

impl TryFrom<String> for MediaType {
    type Error = MediaTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        value.to_string()
    }
}

impl From<mime::Mime> for MediaType {
    fn from(mime: mime::Mime) -> Self {
        Self(mime)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
