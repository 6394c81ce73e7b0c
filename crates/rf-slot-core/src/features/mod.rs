//! Bonus sessions, one variant per bonus kind
//!
//! At most one [`BonusSession`] exists at a time. It is created when a
//! trigger fires and destroyed exactly once, at settlement, after its payout
//! is credited.
//!
//! ## Architecture
//!
//! ```text
//! BonusSession
//!     │
//!     ├── FreeSpins     (spins_remaining, multiplier pool, retriggers)
//!     ├── HoldAndSpin   (locked cells, respins_remaining)
//!     ├── PickAndClick  (cells, picks_remaining, total_win, multiplier)
//!     └── Wheel         (segments, result)
//!           │
//!           v
//!     BonusSettlement → OutcomeAggregator
//! ```

mod free_spins;
mod hold_and_spin;
mod pick_and_click;
mod wheel;

pub use free_spins::*;
pub use hold_and_spin::*;
pub use pick_and_click::*;
pub use wheel::*;

use serde::{Deserialize, Serialize};

/// Bonus kind, also the trigger identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    FreeSpins,
    HoldAndSpin,
    PickAndClick,
    Wheel,
}

impl BonusKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FreeSpins => "Free Spins",
            Self::HoldAndSpin => "Hold & Spin",
            Self::PickAndClick => "Pick & Click",
            Self::Wheel => "Wheel",
        }
    }
}

impl std::fmt::Display for BonusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The single active bonus session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BonusSession {
    FreeSpins(FreeSpinsSession),
    HoldAndSpin(HoldAndSpinSession),
    PickAndClick(PickAndClickSession),
    Wheel(WheelSession),
}

impl BonusSession {
    pub fn kind(&self) -> BonusKind {
        match self {
            Self::FreeSpins(_) => BonusKind::FreeSpins,
            Self::HoldAndSpin(_) => BonusKind::HoldAndSpin,
            Self::PickAndClick(_) => BonusKind::PickAndClick,
            Self::Wheel(_) => BonusKind::Wheel,
        }
    }

    /// Nothing left to play: the session only awaits settlement
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::FreeSpins(s) => s.is_complete(),
            Self::HoldAndSpin(s) => s.respins_remaining == 0,
            Self::PickAndClick(s) => s.resolved,
            Self::Wheel(s) => s.is_resolved(),
        }
    }

    /// Payout from everything consumed so far
    pub fn payout(&self) -> f64 {
        match self {
            Self::FreeSpins(s) => s.payout(),
            Self::HoldAndSpin(s) => s.payout(),
            Self::PickAndClick(s) => s.payout(),
            Self::Wheel(s) => s.payout(),
        }
    }

    /// UI snapshot of the live state
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snapshot = SessionSnapshot {
            kind: self.kind(),
            spins_remaining: None,
            respins_remaining: None,
            picks_remaining: None,
            locked: Vec::new(),
            wheel_result: None,
            multiplier: 1.0,
            accumulated_win: self.payout(),
        };

        match self {
            Self::FreeSpins(s) => snapshot.spins_remaining = Some(s.spins_remaining),
            Self::HoldAndSpin(s) => {
                snapshot.respins_remaining = Some(s.respins_remaining);
                snapshot.locked = s.locked.clone();
            }
            Self::PickAndClick(s) => {
                snapshot.picks_remaining = Some(s.picks_remaining);
                snapshot.multiplier = s.multiplier;
            }
            Self::Wheel(s) => snapshot.wheel_result = s.result,
        }

        snapshot
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementReason {
    /// Ran out of spins / respins / picks, or the wheel resolved
    Completed,
    /// Hold & Spin filled every cell
    FullGrid,
    /// Abandoned through `force_settle`
    Forced,
}

/// One lump credit for a finished session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusSettlement {
    pub kind: BonusKind,
    pub payout: f64,
    pub reason: SettlementReason,
}

/// Snapshot of the active session for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub kind: BonusKind,
    pub spins_remaining: Option<u32>,
    pub respins_remaining: Option<u8>,
    pub picks_remaining: Option<u32>,
    #[serde(default)]
    pub locked: Vec<LockedCell>,
    pub wheel_result: Option<WheelResult>,
    pub multiplier: f64,
    pub accumulated_win: f64,
}
