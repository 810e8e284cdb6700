//! JSON text transport.

use crate::error::{DocumentError, DocumentResult};
use crate::value::Value;
use std::io::{Read, Write};

/// Writes a document value as compact JSON text.
///
/// # Errors
///
/// Returns an error if the text cannot be produced.
pub fn to_json(value: &Value) -> DocumentResult<String> {
    serde_json::to_string(value).map_err(|e| DocumentError::json_encoding(&e))
}

/// Writes a document value as indented JSON text.
///
/// # Errors
///
/// Returns an error if the text cannot be produced.
pub fn to_json_pretty(value: &Value) -> DocumentResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| DocumentError::json_encoding(&e))
}

/// Streams a document value as JSON into a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn to_json_writer<W: Write>(writer: W, value: &Value, pretty: bool) -> DocumentResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(writer, value)
    } else {
        serde_json::to_writer(writer, value)
    };
    result.map_err(|e| DocumentError::json_encoding(&e))
}

/// Parses JSON text into a document value.
///
/// Object fields keep their textual order, including repeated keys.
///
/// # Errors
///
/// Returns an error with line and column if the text is not valid JSON.
pub fn from_json(text: &str) -> DocumentResult<Value> {
    serde_json::from_str(text).map_err(|e| DocumentError::json_decoding(&e))
}

/// Parses JSON bytes into a document value.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON.
pub fn from_json_slice(bytes: &[u8]) -> DocumentResult<Value> {
    serde_json::from_slice(bytes).map_err(|e| DocumentError::json_decoding(&e))
}

/// Parses JSON from a reader into a document value.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid JSON.
pub fn from_json_reader<R: Read>(reader: R) -> DocumentResult<Value> {
    serde_json::from_reader(reader).map_err(|e| DocumentError::json_decoding(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_fields_in_order() {
        let value = Value::object([
            ("$$database_id$$", Value::Integer(7)),
            ("name", Value::from("Ann")),
        ]);

        assert_eq!(
            to_json(&value).unwrap(),
            r#"{"$$database_id$$":7,"name":"Ann"}"#
        );
    }

    #[test]
    fn parse_keeps_repeated_keys() {
        let value = from_json(r#"{"id": 1, "name": "x", "id": 2}"#).unwrap();

        let keys: Vec<&str> = value.keys().collect();
        assert_eq!(keys, vec!["id", "name", "id"]);
        assert_eq!(value.get("id"), Some(&Value::Integer(2)));
    }

    #[test]
    fn parse_numbers() {
        let value = from_json("[1, -2, 2.5]").unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Integer(1),
                Value::Integer(-2),
                Value::Float(2.5)
            ])
        );
    }

    #[test]
    fn parse_error_has_position() {
        let err = from_json("{\n  \"a\": }").unwrap_err();
        match err {
            DocumentError::JsonDecoding { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn writer_and_reader() {
        let value = Value::object([("tags", Value::from(vec!["a", "b"]))]);
        let mut buf = Vec::new();
        to_json_writer(&mut buf, &value, true).unwrap();
        assert!(buf.contains(&b'\n'));

        let parsed = from_json_reader(buf.as_slice()).unwrap();
        assert_eq!(parsed, value);
        assert_eq!(from_json_slice(&buf).unwrap(), value);
    }
}
