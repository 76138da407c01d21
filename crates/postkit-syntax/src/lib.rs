//! postkit-syntax: text-level building blocks for the blog content pipeline.
//!
//! Everything here is pure: callers hand in Markdown (or an LLM reply) as a
//! string and get a string or a report back. File handling lives in the
//! `postkit` binary.
//!
//! - [`tagger`] inserts `<!-- sN -->` sentence markers before each segment
//! - [`validate`] reports whether existing markers are sequential
//! - [`segment`] holds the ordered line classification rules used by the tagger
//! - [`frontmatter`] splits and rejoins the `---` header block
//! - [`sentences`] extracts marked sentences and aligns two languages
//! - [`response`] does best-effort extraction of fenced blocks from an LLM reply
//! - [`keys`] checks UI translation keys against the sources that use them

pub mod frontmatter;
pub mod keys;
pub mod marker;
pub mod response;
pub mod segment;
pub mod sentences;
pub mod tagger;
pub mod validate;

pub use tagger::{tag, tag_document, Tagged};
pub use validate::{validate, TagReport};
