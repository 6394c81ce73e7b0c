//! Per-call results returned by the game

use serde::{Deserialize, Serialize};

use crate::features::{BonusSettlement, Cell, LockedCell, SessionSnapshot, WheelResult};
use crate::paytable::LineWin;
use crate::symbols::Position;
use crate::trigger::BonusTrigger;

/// Base-game spin result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Wager booked for this spin
    pub bet: f64,
    /// Line wins, ascending by line index. Empty when a bonus triggered.
    pub line_wins: Vec<LineWin>,
    /// Bonus started by this spin
    pub trigger: Option<BonusTrigger>,
    /// Amount credited now
    pub payout: f64,
    /// Snapshot of the session the trigger opened
    pub snapshot: Option<SessionSnapshot>,
    /// Set when the opened session had nothing to play and settled on entry
    pub settlement: Option<BonusSettlement>,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.payout > 0.0
    }

    pub fn win_ratio(&self) -> f64 {
        if self.bet > 0.0 { self.payout / self.bet } else { 0.0 }
    }
}

/// One free spin inside a Free Spins session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSpinOutcome {
    pub line_wins: Vec<LineWin>,
    /// Multiplier drawn for this spin
    pub multiplier: f64,
    /// Line total × multiplier, accumulated in the session
    pub spin_win: f64,
    pub retriggered: bool,
    pub spins_remaining: u32,
    /// Present on the spin that ended the session
    pub settlement: Option<BonusSettlement>,
}

/// One Hold & Spin respin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespinOutcome {
    pub newly_locked: Vec<LockedCell>,
    pub respins_remaining: u8,
    pub locked_count: usize,
    pub settlement: Option<BonusSettlement>,
}

/// One Pick & Click reveal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickOutcome {
    pub position: Position,
    pub cell: Cell,
    pub picks_remaining: u32,
    pub total_win: f64,
    pub multiplier: f64,
    pub settlement: Option<BonusSettlement>,
}

/// Wheel spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelOutcome {
    pub result: WheelResult,
    pub settlement: BonusSettlement,
}
