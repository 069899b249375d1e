//! Turning raw model output into names.
//!
//! - Title-casing (`text`)
//! - Rejection of existing names and nationality suffixes (`derivation`)
//! - Word lists loaded from disk (`lexicon`)
//! - Multi-word name composition (`namer`)

pub mod derivation;
pub mod lexicon;
pub mod namer;
pub mod text;
