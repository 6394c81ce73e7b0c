//! Outcome aggregation and crediting
//!
//! A non-trigger spin credits the sum of its line wins. A trigger spin credits
//! nothing up front; the session's settlement arrives later as one lump credit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::features::{BonusKind, BonusSettlement, SettlementReason};
use crate::paytable::LineWin;

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Base-game spins (wagered)
    pub total_spins: u64,
    /// Free spins played inside sessions
    pub free_spins: u64,
    pub total_bet: f64,
    /// Everything credited: base line wins plus settlements
    pub total_win: f64,
    pub base_win: f64,
    pub bonus_win: f64,
    /// Base spins that paid a line win or started a bonus
    pub wins: u64,
    pub losses: u64,
    pub triggers: HashMap<BonusKind, u64>,
    pub settlements: HashMap<BonusKind, u64>,
    pub forced_settlements: u64,
    /// Largest single credit relative to the bet
    pub max_win_ratio: f64,
}

impl SessionStats {
    /// Calculate RTP
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0.0 {
            (self.total_win / self.total_bet) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn triggers_of(&self, kind: BonusKind) -> u64 {
        self.triggers.get(&kind).copied().unwrap_or(0)
    }

    pub fn settlements_of(&self, kind: BonusKind) -> u64 {
        self.settlements.get(&kind).copied().unwrap_or(0)
    }
}

/// Combines line wins and settlements into credited payouts and keeps the ledger
#[derive(Debug, Clone, Default)]
pub struct OutcomeAggregator {
    stats: SessionStats,
}

impl OutcomeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total payout for one evaluation step.
    ///
    /// With a settlement the line wins are ignored: the spin that started the
    /// bonus pays only through the bonus.
    pub fn aggregate(line_wins: &[LineWin], settlement: Option<&BonusSettlement>) -> f64 {
        match settlement {
            Some(settlement) => settlement.payout,
            None => line_wins.iter().map(|w| w.amount).sum(),
        }
    }

    /// Book a base-game wager
    pub fn record_wager(&mut self, bet: f64) {
        self.stats.total_spins += 1;
        self.stats.total_bet += bet;
    }

    /// Credit the line wins of a non-trigger base spin. Returns the credited amount.
    pub fn credit_base(&mut self, line_wins: &[LineWin], bet: f64) -> f64 {
        let payout = Self::aggregate(line_wins, None);
        if payout > 0.0 {
            self.stats.wins += 1;
        } else {
            self.stats.losses += 1;
        }
        self.stats.base_win += payout;
        self.credit(payout, bet);
        payout
    }

    /// A base spin that started a bonus counts as a hit; its payout arrives at settlement
    pub fn credit_trigger_spin(&mut self) {
        self.stats.wins += 1;
    }

    /// Book a session entry or retrigger
    pub fn record_trigger(&mut self, kind: BonusKind) {
        *self.stats.triggers.entry(kind).or_insert(0) += 1;
    }

    pub fn record_free_spin(&mut self) {
        self.stats.free_spins += 1;
    }

    /// Credit a finished session. Returns the credited amount.
    pub fn credit_settlement(&mut self, settlement: &BonusSettlement, bet: f64) -> f64 {
        let payout = Self::aggregate(&[], Some(settlement));
        *self.stats.settlements.entry(settlement.kind).or_insert(0) += 1;
        if settlement.reason == SettlementReason::Forced {
            self.stats.forced_settlements += 1;
        }
        self.stats.bonus_win += payout;
        self.credit(payout, bet);
        payout
    }

    fn credit(&mut self, payout: f64, bet: f64) {
        self.stats.total_win += payout;
        if bet > 0.0 {
            let ratio = payout / bet;
            if ratio > self.stats.max_win_ratio {
                self.stats.max_win_ratio = ratio;
            }
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn reset(&mut self) {
        self.stats = SessionStats::default();
    }
}
