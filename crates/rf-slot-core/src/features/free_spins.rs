//! Free Spins session
//!
//! `Inactive → Active(spins_remaining) → Inactive`. Each free spin is played
//! without a wager; its line wins are scaled by a multiplier drawn uniformly
//! from the configured pool and accumulated until the session settles.

use serde::{Deserialize, Serialize};

use crate::picker::WeightedPicker;

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Free Spins configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeSpinsConfig {
    pub enabled: bool,
    /// Scatters needed to trigger (and retrigger)
    pub trigger_count: usize,
    /// Spins awarded on trigger and on each retrigger
    pub spin_count: u32,
    /// Per-spin multiplier pool, drawn uniformly. Empty means ×1.
    pub multiplier_pool: Vec<f64>,
    /// Can retrigger during the session
    pub retriggers_allowed: bool,
}

impl Default for FreeSpinsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger_count: 3,
            spin_count: 10,
            multiplier_pool: vec![1.0, 2.0, 3.0],
            retriggers_allowed: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════════════

/// Live Free Spins state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSpinsSession {
    pub spins_remaining: u32,
    pub multiplier_pool: Vec<f64>,
    pub retriggers_allowed: bool,
    /// Spins added per retrigger
    pub spins_per_award: u32,
    pub spins_played: u32,
    pub retrigger_count: u32,
    /// Multiplied line wins accumulated so far
    pub total_win: f64,
}

/// Result of one free spin inside the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeSpinStep {
    pub multiplier: f64,
    pub spin_win: f64,
}

impl FreeSpinsSession {
    /// Enter the session with the configured spin count
    pub fn start(config: &FreeSpinsConfig) -> Self {
        Self {
            spins_remaining: config.spin_count,
            multiplier_pool: config.multiplier_pool.clone(),
            retriggers_allowed: config.retriggers_allowed,
            spins_per_award: config.spin_count,
            spins_played: 0,
            retrigger_count: 0,
            total_win: 0.0,
        }
    }

    /// Play one spin whose unmultiplied line total is `line_total`
    pub fn play(&mut self, line_total: f64, picker: &mut WeightedPicker) -> FreeSpinStep {
        let multiplier = picker.choose(&self.multiplier_pool).unwrap_or(1.0);
        let spin_win = line_total * multiplier;

        self.spins_remaining = self.spins_remaining.saturating_sub(1);
        self.spins_played += 1;
        self.total_win += spin_win;

        FreeSpinStep { multiplier, spin_win }
    }

    /// Apply a qualifying scatter hit. Returns false (no change) when retriggers are disabled.
    pub fn retrigger(&mut self) -> bool {
        if !self.retriggers_allowed {
            return false;
        }
        self.spins_remaining += self.spins_per_award;
        self.retrigger_count += 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.spins_remaining == 0
    }

    pub fn payout(&self) -> f64 {
        self.total_win
    }
}
