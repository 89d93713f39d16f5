//! Selection arbitration: narrow the ranked candidates down to two.
//!
//! With two or more candidates the language model is asked for two list
//! numbers. Its reply is parsed permissively; a timeout, error, or unusable
//! reply falls back to the two best similarity scores in retrieval order, so
//! two identical requests against a failing model always get the same pair.

#[allow(clippy::module_inception)]
mod arbiter;
pub mod parse;
pub mod prompt;
pub mod types;


pub use arbiter::{SelectionArbiter, fallback_top_two};
pub use parse::parse_selection;
pub use types::{Selection, SelectionSource};
