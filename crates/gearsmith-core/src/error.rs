use thiserror::Error;

/// Errors raised when constructing core types from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown equipment slot '{0}'")]
    UnknownSlot(String),

    #[error("{skill} level {level} is outside {min}..={max}")]
    LevelOutOfRange {
        skill: &'static str,
        level: u32,
        min: u32,
        max: u32,
    },
}
