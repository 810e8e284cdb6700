//! # EntiDoc Document
//!
//! Generic hierarchical document model for EntiDoc.
//!
//! This crate is the document engine the entity codec delegates to. It
//! provides:
//! - [`Value`], a JSON-like tree whose objects keep field order
//! - [`to_value`] / [`from_value`] for converting any `serde` type
//! - JSON text and CBOR binary transports
//!
//! ## Usage
//!
//! ```
//! use entidoc_document::{from_json, to_json, to_value, Value};
//!
//! let value = to_value(&vec!["a", "b"]).unwrap();
//! assert_eq!(to_json(&value).unwrap(), r#"["a","b"]"#);
//!
//! let parsed = from_json(r#"{"name": "Ann"}"#).unwrap();
//! assert_eq!(parsed.get("name"), Some(&Value::from("Ann")));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cbor;
mod convert;
mod error;
mod json;
mod value;

pub use cbor::{from_cbor, from_cbor_reader, to_cbor, to_cbor_writer};
pub use convert::{from_value, to_value};
pub use error::{DocumentError, DocumentResult};
pub use json::{from_json, from_json_reader, from_json_slice, to_json, to_json_pretty, to_json_writer};
pub use value::Value;
