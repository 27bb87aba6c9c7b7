use serde_json::{Map, Number, Value};

use super::traits::{MediaTypeParser, ParseError};
use crate::media::MediaType;

/// Decodes a TOML document into a JSON-shaped value
///
/// Datetimes become RFC 3339 strings; non-finite floats are rejected since
/// JSON has no representation for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl TomlParser {
    /// `application/toml`, which `mime` has no constant for
    pub fn media_type() -> MediaType {
        // Constant literal, always a valid media type
        "application/toml".parse().unwrap()
    }
}

impl MediaTypeParser for TomlParser {
    fn parse(&self, data: &[u8]) -> Result<Value, ParseError> {
        let text = std::str::from_utf8(data)?;
        let table: ::toml::Table = ::toml::from_str(text)?;
        convert_table(table)
    }
}

fn convert_table(table: ::toml::Table) -> Result<Value, ParseError> {
    let map = table
        .into_iter()
        .map(|(key, value)| convert(value).map(|value| (key, value)))
        .collect::<Result<Map<_, _>, _>>()?;
    Ok(Value::Object(map))
}

fn convert(value: ::toml::Value) -> Result<Value, ParseError> {
    Ok(match value {
        ::toml::Value::String(s) => Value::String(s),
        ::toml::Value::Integer(i) => Value::Number(i.into()),
        ::toml::Value::Float(f) => Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| ParseError::Rejected(format!("float {f} has no JSON form")))?,
        ::toml::Value::Boolean(b) => Value::Bool(b),
        ::toml::Value::Datetime(d) => Value::String(d.to_string()),
        ::toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(convert)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        ::toml::Value::Table(table) => convert_table(table)?,
    })
}
