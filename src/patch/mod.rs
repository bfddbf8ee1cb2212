//! Patch application: locating LLM-proposed "old" fragments in possibly
//! since-edited source and substituting the "new" fragment.
//!
//! - [`PatchMatcher`] - staged span resolution (exact, quote-normalized,
//!   whitespace-normalized)
//! - [`PatchEngine`] - ordered batch application with per-change skip

mod engine;
mod matcher;


pub use engine::PatchEngine;
pub use matcher::PatchMatcher;
