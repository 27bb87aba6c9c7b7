use serde_json::Value;

use super::traits::{MediaTypeParser, ParseError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Strict JSON parser, the whole body must be exactly one JSON value
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl MediaTypeParser for JsonParser {
    fn parse(&self, data: &[u8]) -> Result<Value, ParseError> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// JSON parser tolerant of a leading UTF-8 BOM and of empty bodies
///
/// An empty or whitespace-only body decodes to `null`. Meant to be bound
/// after [`JsonParser`] so it only sees input the strict parser refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJsonParser;

impl MediaTypeParser for LenientJsonParser {
    fn parse(&self, data: &[u8]) -> Result<Value, ParseError> {
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(data)?)
    }
}
