//! The markup rewriting engine.
//!
//! A line-oriented transducer from ikiwiki markup to markdown:
//!
//! - `pattern`: single-line matchers for the recognized wiki constructs
//! - `rewrite`: link and inline-format rewriting over one line
//! - `image`: image-directive parsing, support judgment, rendering
//! - `tags`: the tag remap table
//! - `document`: two-pass whole-document conversion
//!
//! Everything here is pure, synchronous text transformation; file discovery
//! and I/O live in `cli::import`.

mod document;
mod image;
mod pattern;
mod rewrite;
mod tags;

pub use document::{Converted, Converter, LineWarning};
pub use rewrite::Warning;
pub use tags::TagMap;
