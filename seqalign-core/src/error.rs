//! Errors raised while configuring an aligner

use thiserror::Error;

/// Configuration errors. The engine functions themselves never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    #[error("Aligner sequence is empty")]
    EmptySequence,

    #[error("Unknown aligner name: {0} (expected local, global or glocal)")]
    UnknownMode(String),

    #[error("Invalid wildcard policy: {0} (expected 0-3)")]
    InvalidWildcard(i32),

    #[error("Invalid error rate: {0}% (expected 0-100)")]
    InvalidErrorRate(i32),

    #[error("Too many scoring arguments: got {0}, at most 5 are accepted")]
    TooManyArguments(usize),
}

pub type ConfigResult<T> = Result<T, AlignError>;
