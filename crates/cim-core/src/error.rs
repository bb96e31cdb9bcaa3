//! Planner error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `CimError` via `From` impls, or keep them separate and wrap `CimError`
//! as one variant.  Both patterns are acceptable; prefer whichever keeps
//! error sites clean.

use thiserror::Error;

/// The top-level error type for `cim-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CimError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `cim-*` crates.
pub type CimResult<T> = Result<T, CimError>;
