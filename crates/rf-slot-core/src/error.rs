//! Error types for the slot core

use thiserror::Error;

use crate::features::BonusKind;
use crate::symbols::Position;

/// Configuration errors, raised at load time only
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid grid: {reels} reels × {rows} rows")]
    InvalidGrid { reels: u8, rows: u8 },

    #[error("RTP total {total:.2}% outside [88, 98]")]
    RtpOutOfRange { total: f64 },

    #[error("{feature} requires features RTP ≥ {required}%, got {actual}%")]
    FeatureFloor {
        feature: BonusKind,
        required: f64,
        actual: f64,
    },
}

/// Runtime logic errors surfaced to the caller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// A second bonus session was requested while one is running
    #[error("Bonus session already active: {active}")]
    SessionActive { active: BonusKind },

    #[error("No bonus session is active")]
    NoActiveSession,

    #[error("Operation expects a {expected} session, but {active} is active")]
    WrongSession {
        expected: BonusKind,
        active: BonusKind,
    },

    #[error("Pick position {0} is outside the pick grid")]
    InvalidPick(Position),

    #[error("Pick position {0} was already revealed")]
    AlreadyRevealed(Position),

    /// The claimed trigger is not what the grid actually starts
    #[error("Grid does not trigger {claimed} (detected: {detected:?})")]
    TriggerNotDetected {
        claimed: BonusKind,
        detected: Option<BonusKind>,
    },

    #[error("{0} is disabled in this game")]
    FeatureDisabled(BonusKind),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Grid of {reels} reels × {rows} rows exceeds the addressable size")]
    GridTooLarge { reels: usize, rows: usize },

    #[error("Grid is {actual:?} (reels, rows), configured for {expected:?}")]
    GridMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
