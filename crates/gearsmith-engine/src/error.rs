use thiserror::Error;

/// Errors raised by the engine.
///
/// Scoring, DPS, selection and ranking are total and never fail; only named
/// configuration lookups can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown preset tier '{0}' (expected budget, mid, high or max)")]
    InvalidPresetTier(String),

    #[error("unknown preset style '{0}' (expected melee, melee-stab, melee-slash, melee-crush, ranged, magic or prayer)")]
    InvalidPresetStyle(String),
}
