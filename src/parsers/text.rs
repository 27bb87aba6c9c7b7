use serde_json::Value;

use super::traits::{MediaTypeParser, ParseError};

/// Decodes UTF-8 text into a string value
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl MediaTypeParser for TextParser {
    fn parse(&self, data: &[u8]) -> Result<Value, ParseError> {
        let text = std::str::from_utf8(data)?;
        Ok(Value::String(text.to_owned()))
    }
}
