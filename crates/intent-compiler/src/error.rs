use thiserror::Error;

pub type Result<T, E = CompileError> = core::result::Result<T, E>;

/// Errors a compile call can surface to the caller. Nothing here is fatal to
/// the process; a malformed utterance never crashes the compiler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("no recognizable intent")]
    NoIntentFound,
}

/// Non-fatal findings recorded while a compile continues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("{slot} value {value} outside {min}..={max}, slot dropped")]
    OutOfRange {
        slot: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("led range {start},{end} violates 0 <= start < end <= 299, slot dropped")]
    InvalidRange { start: i64, end: i64 },
    #[error("clause {clause:?} names both a color and an effect; keeping both, color first")]
    AmbiguousClause { clause: String },
    #[error("{slot} name {name:?} is not in the supported vocabulary, slot dropped")]
    UnsupportedName { slot: &'static str, name: String },
}
