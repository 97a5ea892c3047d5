//! Cross-reference extraction for Q&A content.
//!
//! Users reference questions and answers inside free-form text with
//! several informal surface syntaxes: a bare hash-tag id
//! (`#10010000000000060`), a full URL path
//! (`https://host/questions/<id>[/<answer-id>]`), the same URL without a
//! scheme, or an SEO short id (`questions/D1I2`). This crate recognizes
//! all of them with no database access:
//!
//! - [`extract_references`] walks arbitrary text once and returns every
//!   occurrence that resolves to at least one valid identifier, in
//!   document order.
//! - [`decode_identifier`] validates and classifies a single candidate id
//!   for callers that already hold one in isolation.
//!
//! Extraction is pure and total: no I/O, no shared state, safe to call
//! concurrently, and malformed candidates silently produce no output
//! rather than errors.

pub mod codec;
pub mod config;
pub mod error;
pub mod scanner;
pub mod types;

pub use codec::decode_identifier;
pub use scanner::extract_references;
pub use types::{Identifier, ObjectType, Reference, ReferenceKind};
