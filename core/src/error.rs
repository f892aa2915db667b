//! Error types for loso-core.
//!
//! Mirrors the error kinds from the lexicon/segmenter design: `Store` errors
//! are surfaced immediately and never swallowed, `NotFound` is a
//! user-visible-but-non-fatal read result, and `InvariantViolation` rejects
//! malformed category names at creation time. Empty input is not an error
//! (`Service::split_terms("")` returns `Ok(vec![])`), so there is no
//! `EmptyInput` variant.

use thiserror::Error;

/// Errors produced by the lexicon store, builder, scorer and segmenter.
#[derive(Debug, Error)]
pub enum LosoError {
    /// The backing key-value store failed (connection, protocol, or decode
    /// error). Builders do not retry; callers may retry the whole `feed`.
    #[error("store error: {0}")]
    Store(String),

    /// A read-only operation (dump, info) referenced a category that does
    /// not exist in the registry.
    #[error("category not found: {0}")]
    NotFound(String),

    /// A category name contained the reserved `:` schema separator.
    #[error("invalid category name {0:?}: must not contain ':'")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, LosoError>;
