use super::models::Config;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("max_body_bytes must be positive")]
    ZeroBodyLimit,

    #[error("Media type '{media_type}' is listed more than once in registry.priority")]
    DuplicatePriority { media_type: String },

    #[error("registry.priority is set but no parsers are enabled")]
    PriorityWithoutParsers,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_priority(config)?;
    Ok(())
}

fn validate_server(config: &Config) -> Result<(), ValidationError> {
    if config.server.max_body_bytes.as_u64() == 0 {
        return Err(ValidationError::ZeroBodyLimit);
    }
    Ok(())
}

/// Whether priority entries are actually registered is only known once the
/// registry is built; here we reject lists that cannot be right
fn validate_priority(config: &Config) -> Result<(), ValidationError> {
    let priority = &config.registry.priority;

    if !priority.is_empty() && !config.registry.registers_any() {
        return Err(ValidationError::PriorityWithoutParsers);
    }

    let mut seen = HashSet::new();
    for media_type in priority {
        if !seen.insert(media_type.to_string()) {
            return Err(ValidationError::DuplicatePriority {
                media_type: media_type.to_string(),
            });
        }
    }

    Ok(())
}
