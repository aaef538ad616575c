//! Decoder for bencode, the length-prefixed encoding used by `.torrent` files.
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Byte string | `<length>:<bytes>` | `4:spam` |
//! | Integer | `i<number>e` | `i42e` |
//! | List | `l<values>e` | `l4:spami42ee` |
//! | Dictionary | `d<key><value>...e` | `d3:cow3:mooe` |
//!
//! ```
//! use bdecode::{decode_bytes, Value};
//!
//! let value = decode_bytes(b"d3:cow3:moo4:spaml1:a1:bee").unwrap();
//! assert_eq!(value.get(b"cow").and_then(Value::as_str), Some("moo"));
//! assert_eq!(value.get(b"spam").and_then(Value::as_list).map(|l| l.len()), Some(2));
//! ```
//!
//! Decoding is permissive by default: leading zeros, negative zero and
//! unsorted dictionary keys are accepted. [`DecoderConfig::strict`] rejects
//! them.

mod bdecode;
mod bytestring;
mod config;
mod cursor;
mod error;
mod value;

pub use bdecode::{decode, decode_bytes, decode_bytes_with, BDecoder};
pub use bytestring::{ByteString, ToByteString};
pub use config::{DecoderConfig, DEFAULT_MAX_DEPTH};
pub use error::{DecodingError, ErrorKind, SyntaxError};
pub use value::Value;
