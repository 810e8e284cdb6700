//! Binary CBOR transport.
//!
//! Documents travel as CBOR maps with text keys in their original field
//! order. This is not the canonical (key-sorted) form; field order carries
//! meaning for entity documents and must survive the round trip.

use crate::error::{DocumentError, DocumentResult};
use crate::value::Value;
use std::io::{Read, Write};

/// Encodes a document value to CBOR bytes.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn to_cbor(value: &Value) -> DocumentResult<Vec<u8>> {
    let mut buffer = Vec::new();
    to_cbor_writer(&mut buffer, value)?;
    Ok(buffer)
}

/// Encodes a document value as CBOR into a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn to_cbor_writer<W: Write>(writer: W, value: &Value) -> DocumentResult<()> {
    ciborium::ser::into_writer(value, writer)
        .map_err(|e| DocumentError::cbor_encoding(e.to_string()))
}

/// Decodes CBOR bytes into a document value.
///
/// # Errors
///
/// Returns an error if the bytes are not valid CBOR, or if a map key is not
/// a text string.
pub fn from_cbor(bytes: &[u8]) -> DocumentResult<Value> {
    from_cbor_reader(bytes)
}

/// Decodes CBOR from a reader into a document value.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid CBOR.
pub fn from_cbor_reader<R: Read>(reader: R) -> DocumentResult<Value> {
    ciborium::de::from_reader(reader).map_err(|e| DocumentError::cbor_decoding(e.to_string()))
}
