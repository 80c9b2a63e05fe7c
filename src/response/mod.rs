//! Checker response parsing and validation.
//!
//! The checker prints a single JSON object:
//!
//! ```text
//! { "passed": bool,
//!   "errors": [ { "message": [ { "descr", "path", "line", "endline", "start", "end" } ] } ] }
//! ```
//!
//! # Example
//!
//! ```
//! use flowtc::response::{decode, DecodedResponse};
//!
//! let decoded = decode(r#"{"passed": true, "errors": []}"#).unwrap();
//! assert_eq!(decoded, DecodedResponse::Passed);
//! ```

pub mod decoder;
pub mod schema;

pub use decoder::{decode, parse_response, DecodedResponse};
pub use schema::{MessagePart, RawError, RawResponse};
