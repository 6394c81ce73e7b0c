//! Bonus trigger detection
//!
//! Rules are evaluated in a fixed priority order and the first satisfied,
//! enabled rule wins; at most one bonus triggers per spin.
//!
//! ```text
//! 1. Hold & Spin   ≥ N hold symbols, no Hold & Spin running
//! 2. Pick & Click  ≥ N bonus symbols
//! 3. Wheel         ≥ N bonus symbols
//! 4. Free Spins    ≥ N scatters, suppressed while a Free Spins session
//!                  without retriggers is running
//! ```

use serde::{Deserialize, Serialize};

use crate::config::FeatureSettings;
use crate::features::{BonusKind, BonusSession};
use crate::symbols::{Position, SymbolCounts, SymbolGrid};

/// A fired trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTrigger {
    pub kind: BonusKind,
    /// Number of triggering symbols
    pub count: usize,
    /// Where the triggering symbols landed
    pub positions: Vec<Position>,
}

impl BonusTrigger {
    fn from_positions(kind: BonusKind, positions: &[Position]) -> Self {
        Self {
            kind,
            count: positions.len(),
            positions: positions.to_vec(),
        }
    }
}

/// One trigger strategy
pub trait TriggerRule: Send + Sync {
    /// Which bonus this rule starts
    fn kind(&self) -> BonusKind;

    /// Check the rule against the grid's special-symbol counts
    fn check(&self, counts: &SymbolCounts, active: Option<&BonusSession>) -> Option<BonusTrigger>;
}

/// Boxed rule for dynamic dispatch
pub type BoxedTriggerRule = Box<dyn TriggerRule + 'static>;

pub struct HoldAndSpinRule {
    pub min_count: usize,
}

impl TriggerRule for HoldAndSpinRule {
    fn kind(&self) -> BonusKind {
        BonusKind::HoldAndSpin
    }

    fn check(&self, counts: &SymbolCounts, active: Option<&BonusSession>) -> Option<BonusTrigger> {
        if matches!(active, Some(BonusSession::HoldAndSpin(_))) {
            return None;
        }
        (counts.hold_count() >= self.min_count)
            .then(|| BonusTrigger::from_positions(self.kind(), &counts.hold))
    }
}

pub struct PickAndClickRule {
    pub min_count: usize,
}

impl TriggerRule for PickAndClickRule {
    fn kind(&self) -> BonusKind {
        BonusKind::PickAndClick
    }

    fn check(&self, counts: &SymbolCounts, _active: Option<&BonusSession>) -> Option<BonusTrigger> {
        (counts.bonus_count() >= self.min_count)
            .then(|| BonusTrigger::from_positions(self.kind(), &counts.bonus))
    }
}

pub struct WheelRule {
    pub threshold: usize,
}

impl TriggerRule for WheelRule {
    fn kind(&self) -> BonusKind {
        BonusKind::Wheel
    }

    fn check(&self, counts: &SymbolCounts, _active: Option<&BonusSession>) -> Option<BonusTrigger> {
        (counts.bonus_count() >= self.threshold)
            .then(|| BonusTrigger::from_positions(self.kind(), &counts.bonus))
    }
}

pub struct FreeSpinsRule {
    pub threshold: usize,
}

impl TriggerRule for FreeSpinsRule {
    fn kind(&self) -> BonusKind {
        BonusKind::FreeSpins
    }

    fn check(&self, counts: &SymbolCounts, active: Option<&BonusSession>) -> Option<BonusTrigger> {
        if let Some(BonusSession::FreeSpins(session)) = active {
            if !session.retriggers_allowed {
                return None;
            }
        }
        (counts.scatter_count() >= self.threshold)
            .then(|| BonusTrigger::from_positions(self.kind(), &counts.scatter))
    }
}

/// Ordered list of trigger rules
pub struct BonusTriggerDetector {
    rules: Vec<BoxedTriggerRule>,
}

impl BonusTriggerDetector {
    /// Create an empty detector
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build the standard priority order from feature settings; disabled features are left out
    pub fn from_settings(features: &FeatureSettings) -> Self {
        let mut detector = Self::new();
        if features.hold_and_spin.enabled {
            detector.push(Box::new(HoldAndSpinRule {
                min_count: features.hold_and_spin.trigger_count,
            }));
        }
        if features.pick_and_click.enabled {
            detector.push(Box::new(PickAndClickRule {
                min_count: features.pick_and_click.trigger_count,
            }));
        }
        if features.wheel.enabled {
            detector.push(Box::new(WheelRule {
                threshold: features.wheel.trigger_count,
            }));
        }
        if features.free_spins.enabled {
            detector.push(Box::new(FreeSpinsRule {
                threshold: features.free_spins.trigger_count,
            }));
        }
        detector
    }

    /// Append a rule at the lowest priority
    pub fn push(&mut self, rule: BoxedTriggerRule) {
        self.rules.push(rule);
    }

    /// Rule kinds in evaluation order
    pub fn order(&self) -> Vec<BonusKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Decide which single bonus, if any, this grid starts.
    ///
    /// While a session is active only the rule for that same kind is
    /// consulted, since a second session can never be opened.
    pub fn scan(&self, grid: &SymbolGrid, active: Option<&BonusSession>) -> Option<BonusTrigger> {
        let counts = grid.special_counts();
        self.rules
            .iter()
            .filter(|rule| active.is_none_or(|s| s.kind() == rule.kind()))
            .find_map(|rule| rule.check(&counts, active))
    }
}

impl Default for BonusTriggerDetector {
    fn default() -> Self {
        Self::new()
    }
}
