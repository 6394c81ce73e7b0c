//! Hold & Spin session

use serde::{Deserialize, Serialize};

use crate::picker::WeightedPicker;
use crate::symbols::{Position, SymbolGrid, SymbolType};

use super::SettlementReason;

/// Hold & Spin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldAndSpinConfig {
    pub enabled: bool,
    /// Hold symbols needed to trigger
    pub trigger_count: usize,
    /// Respins granted on entry and restored on every new lock
    pub initial_respins: u8,
    /// Locked value range, in multiples of the bet
    pub min_value: u32,
    pub max_value: u32,
}

impl Default for HoldAndSpinConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger_count: 3,
            initial_respins: 3,
            min_value: 1,
            max_value: 5,
        }
    }
}

/// A locked hold symbol and its credit value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LockedCell {
    pub position: Position,
    pub value: f64,
}

/// Live Hold & Spin state. `locked` only ever grows within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldAndSpinSession {
    pub locked: Vec<LockedCell>,
    pub respins_remaining: u8,
    pub initial_respins: u8,
    pub respins_played: u32,
    /// Total cells on the grid; filling all of them settles immediately
    pub cell_count: usize,
    bet: f64,
    min_value: u32,
    max_value: u32,
}

/// Result of one respin
#[derive(Debug, Clone, PartialEq)]
pub struct RespinStep {
    pub newly_locked: Vec<LockedCell>,
    pub respins_remaining: u8,
    /// Set when this respin ended the session
    pub terminal: Option<SettlementReason>,
}

impl HoldAndSpinSession {
    /// Enter the session, locking every triggering hold position
    pub fn start(
        config: &HoldAndSpinConfig,
        positions: &[Position],
        bet: f64,
        cell_count: usize,
        picker: &mut WeightedPicker,
    ) -> Self {
        let mut session = Self {
            locked: Vec::with_capacity(cell_count),
            respins_remaining: config.initial_respins,
            initial_respins: config.initial_respins,
            respins_played: 0,
            cell_count,
            bet,
            min_value: config.min_value,
            max_value: config.max_value,
        };
        for &position in positions {
            session.lock(position, picker);
        }
        session
    }

    /// Lock a position with a fresh `uniform(min, max) × bet` value.
    /// Already-locked positions keep their value.
    fn lock(&mut self, position: Position, picker: &mut WeightedPicker) -> Option<LockedCell> {
        if self.is_locked(position) {
            return None;
        }
        let value = picker.uniform_int(self.min_value, self.max_value) as f64 * self.bet;
        let cell = LockedCell { position, value };
        self.locked.push(cell);
        Some(cell)
    }

    pub fn is_locked(&self, position: Position) -> bool {
        self.locked.iter().any(|c| c.position == position)
    }

    pub fn locked_count(&self) -> usize {
        self.locked.len()
    }

    pub fn is_full(&self) -> bool {
        self.locked.len() >= self.cell_count
    }

    /// Respin the unlocked cells using `grid` as the freshly landed symbols
    pub fn respin(&mut self, grid: &SymbolGrid, picker: &mut WeightedPicker) -> RespinStep {
        self.respins_played += 1;

        let landed: Vec<Position> = grid
            .positions_of(SymbolType::HoldSpin)
            .into_iter()
            .filter(|&p| !self.is_locked(p))
            .collect();
        let newly_locked: Vec<LockedCell> = landed
            .into_iter()
            .filter_map(|p| self.lock(p, picker))
            .collect();

        if newly_locked.is_empty() {
            self.respins_remaining = self.respins_remaining.saturating_sub(1);
        } else {
            self.respins_remaining = self.initial_respins;
        }

        let terminal = if self.is_full() {
            Some(SettlementReason::FullGrid)
        } else if self.respins_remaining == 0 {
            Some(SettlementReason::Completed)
        } else {
            None
        };

        RespinStep {
            newly_locked,
            respins_remaining: self.respins_remaining,
            terminal,
        }
    }

    /// Sum of all locked values
    pub fn payout(&self) -> f64 {
        self.locked.iter().map(|c| c.value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SymbolType::*;

    fn blank_grid() -> SymbolGrid {
        SymbolGrid::filled(5, 3, Low1).unwrap()
    }

    fn start(positions: &[Position], picker: &mut WeightedPicker) -> HoldAndSpinSession {
        HoldAndSpinSession::start(&HoldAndSpinConfig::default(), positions, 2.0, 15, picker)
    }

    #[test]
    fn test_entry_locks_trigger_positions() {
        let mut picker = WeightedPicker::seeded(1);
        let positions = [Position::new(0, 0), Position::new(2, 1), Position::new(4, 2)];
        let session = start(&positions, &mut picker);

        assert_eq!(session.locked_count(), 3);
        assert_eq!(session.respins_remaining, 3);
        for cell in &session.locked {
            assert!(cell.value >= 2.0 && cell.value <= 10.0);
            assert_eq!(cell.value % 2.0, 0.0);
        }
    }

    #[test]
    fn test_blank_respins_count_down() {
        let mut picker = WeightedPicker::seeded(2);
        let mut session = start(&[Position::new(0, 0)], &mut picker);

        let step = session.respin(&blank_grid(), &mut picker);
        assert_eq!(step.respins_remaining, 2);
        assert!(step.terminal.is_none());
        session.respin(&blank_grid(), &mut picker);
        let step = session.respin(&blank_grid(), &mut picker);
        assert_eq!(step.terminal, Some(SettlementReason::Completed));
        assert_eq!(session.respins_played, 3);
    }

    #[test]
    fn test_new_lock_resets_respins() {
        let mut picker = WeightedPicker::seeded(3);
        let mut session = start(&[Position::new(0, 0)], &mut picker);
        session.respin(&blank_grid(), &mut picker);
        session.respin(&blank_grid(), &mut picker);
        assert_eq!(session.respins_remaining, 1);

        let grid = SymbolGrid::from_rows(vec![
            vec![HoldSpin, Low1, Low1, Low1, Low1],
            vec![Low1, Low1, HoldSpin, Low1, Low1],
            vec![Low1, Low1, Low1, Low1, Low1],
        ])
        .unwrap();
        let step = session.respin(&grid, &mut picker);

        // (0,0) is already locked; only (2,1) is new
        assert_eq!(step.newly_locked.len(), 1);
        assert_eq!(step.newly_locked[0].position, Position::new(2, 1));
        assert_eq!(step.respins_remaining, 3);
        assert_eq!(session.locked_count(), 2);
    }

    #[test]
    fn test_full_grid_settles_regardless_of_respins() {
        let mut picker = WeightedPicker::seeded(4);
        let mut session = start(&[Position::new(0, 0)], &mut picker);
        let full = SymbolGrid::filled(5, 3, HoldSpin).unwrap();

        let step = session.respin(&full, &mut picker);
        assert_eq!(step.terminal, Some(SettlementReason::FullGrid));
        assert_eq!(step.respins_remaining, 3);
        assert!(session.is_full());
    }

    #[test]
    fn test_payout_is_sum_of_locked() {
        let mut picker = WeightedPicker::seeded(5);
        let mut session = start(&[], &mut picker);
        session.locked = vec![
            LockedCell { position: Position::new(0, 0), value: 5.0 },
            LockedCell { position: Position::new(1, 2), value: 15.0 },
        ];
        session.respins_remaining = 0;
        assert!((session.payout() - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_locked_never_shrinks_and_terminates() {
        let mut picker = WeightedPicker::seeded(6);
        let mut session = start(&[Position::new(1, 1)], &mut picker);
        let mut previous = session.locked_count();

        // Alternate between grids with and without fresh hold symbols
        for i in 0..100u32 {
            let grid = if i % 3 == 0 {
                let mut rows = vec![vec![Low2; 5]; 3];
                rows[(i as usize / 3) % 3][(i as usize / 9) % 5] = HoldSpin;
                SymbolGrid::from_rows(rows).unwrap()
            } else {
                blank_grid()
            };
            let step = session.respin(&grid, &mut picker);
            assert!(session.locked_count() >= previous);
            previous = session.locked_count();
            if step.terminal.is_some() {
                return;
            }
        }
        panic!("session did not terminate");
    }
}
