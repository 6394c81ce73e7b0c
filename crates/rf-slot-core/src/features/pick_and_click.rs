//! Pick & Click session
//!
//! Classic "pick an object to reveal a prize" bonus:
//! - Hidden cells hold a prize, an extra pick, or a multiplier
//! - Prize values follow the 50/30/20 band split of the maximum prize
//! - The session resolves when the picks run out, paying `total_win × multiplier`

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};
use crate::picker::WeightedPicker;
use crate::symbols::Position;

/// Pick & Click configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickAndClickConfig {
    pub enabled: bool,
    /// Bonus symbols needed to trigger
    pub trigger_count: usize,
    pub rows: u8,
    pub cols: u8,
    pub initial_picks: u32,
    /// Largest prize, in multiples of the bet
    pub max_prize_multiplier: f64,
    pub extra_pick_enabled: bool,
    /// Picks granted by the ExtraPick cell
    pub extra_pick_grant: u32,
    pub multiplier_enabled: bool,
    pub multiplier_values: Vec<f64>,
}

impl Default for PickAndClickConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger_count: 3,
            rows: 3,
            cols: 4,
            initial_picks: 3,
            max_prize_multiplier: 50.0,
            extra_pick_enabled: true,
            extra_pick_grant: 2,
            multiplier_enabled: true,
            multiplier_values: vec![2.0, 3.0, 5.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Prize,
    ExtraPick,
    Multiplier,
}

/// A single pickable cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub value: f64,
    pub revealed: bool,
}

impl Cell {
    fn new(kind: CellKind, value: f64) -> Self {
        Self {
            kind,
            value,
            revealed: false,
        }
    }
}

/// Live Pick & Click state.
///
/// Cells are stored row-major; a pick address uses `Position { reel: column, row }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickAndClickSession {
    pub rows: u8,
    pub cols: u8,
    pub cells: Vec<Cell>,
    pub picks_remaining: u32,
    pub picks_made: u32,
    pub total_win: f64,
    /// Running multiplier; the last revealed multiplier wins
    pub multiplier: f64,
    pub resolved: bool,
}

/// Result of one reveal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickStep {
    pub position: Position,
    pub cell: Cell,
    pub picks_remaining: u32,
    pub resolved: bool,
}

impl PickAndClickSession {
    /// Generate the board for a fresh session
    pub fn generate(config: &PickAndClickConfig, bet: f64, picker: &mut WeightedPicker) -> Self {
        let total = config.rows as usize * config.cols as usize;

        // Bands are drawn in bet multiples, then priced in credits
        let mut cells: Vec<Cell> = picker
            .banded_values(total, config.max_prize_multiplier)
            .into_iter()
            .map(|m| Cell::new(CellKind::Prize, m * bet))
            .collect();

        let mut extra_pick_slot = None;
        if config.extra_pick_enabled {
            if let Some(i) = picker.index(cells.len()) {
                cells[i] = Cell::new(CellKind::ExtraPick, config.extra_pick_grant as f64);
                extra_pick_slot = Some(i);
            }
        }

        if config.multiplier_enabled {
            let free: Vec<usize> = (0..cells.len())
                .filter(|&i| Some(i) != extra_pick_slot)
                .collect();
            let value = picker.choose(&config.multiplier_values);
            if let (Some(slot), Some(value)) = (picker.choose(&free), value) {
                cells[slot] = Cell::new(CellKind::Multiplier, value);
            }
        }

        picker.shuffle(&mut cells);

        Self {
            rows: config.rows,
            cols: config.cols,
            cells,
            picks_remaining: config.initial_picks,
            picks_made: 0,
            total_win: 0.0,
            multiplier: 1.0,
            resolved: config.initial_picks == 0,
        }
    }

    fn slot(&self, position: Position) -> Option<usize> {
        let (col, row) = (position.reel, position.row);
        (col < self.cols && row < self.rows).then(|| row as usize * self.cols as usize + col as usize)
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.slot(position).map(|i| &self.cells[i])
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.revealed).count()
    }

    /// Reveal one cell. Invalid or repeated picks fail without touching the session.
    pub fn reveal(&mut self, position: Position) -> SlotResult<PickStep> {
        let slot = self.slot(position).ok_or(SlotError::InvalidPick(position))?;
        if self.cells[slot].revealed {
            return Err(SlotError::AlreadyRevealed(position));
        }

        let cell = &mut self.cells[slot];
        cell.revealed = true;
        let cell = *cell;

        self.picks_made += 1;
        self.picks_remaining = self.picks_remaining.saturating_sub(1);
        match cell.kind {
            CellKind::Prize => self.total_win += cell.value,
            CellKind::ExtraPick => self.picks_remaining += cell.value as u32,
            CellKind::Multiplier => self.multiplier = cell.value,
        }

        // An exhausted board forfeits any picks left over
        if self.revealed_count() == self.cells.len() {
            self.picks_remaining = 0;
        }
        self.resolved = self.picks_remaining == 0;

        Ok(PickStep {
            position,
            cell,
            picks_remaining: self.picks_remaining,
            resolved: self.resolved,
        })
    }

    /// `total_win × multiplier`
    pub fn payout(&self) -> f64 {
        self.total_win * self.multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(cells: Vec<Cell>, rows: u8, cols: u8, picks: u32) -> PickAndClickSession {
        PickAndClickSession {
            rows,
            cols,
            cells,
            picks_remaining: picks,
            picks_made: 0,
            total_win: 0.0,
            multiplier: 1.0,
            resolved: false,
        }
    }

    #[test]
    fn test_generate_places_modifiers() {
        let config = PickAndClickConfig::default();
        let mut picker = WeightedPicker::seeded(21);
        let session = PickAndClickSession::generate(&config, 1.0, &mut picker);

        assert_eq!(session.cells.len(), 12);
        let extra = session.cells.iter().filter(|c| c.kind == CellKind::ExtraPick).count();
        let mult: Vec<_> = session
            .cells
            .iter()
            .filter(|c| c.kind == CellKind::Multiplier)
            .collect();
        assert_eq!(extra, 1);
        assert_eq!(mult.len(), 1);
        assert!([2.0, 3.0, 5.0].contains(&mult[0].value));
        assert_eq!(session.picks_remaining, 3);

        for cell in session.cells.iter().filter(|c| c.kind == CellKind::Prize) {
            assert!(cell.value >= 1.0 && cell.value <= 50.0);
        }
    }

    #[test]
    fn test_fractional_bet_prizes_stay_under_max_prize() {
        let config = PickAndClickConfig {
            rows: 4,
            cols: 5,
            extra_pick_enabled: false,
            multiplier_enabled: false,
            ..Default::default()
        };

        for (bet, seed) in [(0.05, 30), (0.01, 31), (0.25, 32)] {
            let max_prize = config.max_prize_multiplier * bet;
            let session = PickAndClickSession::generate(&config, bet, &mut WeightedPicker::seeded(seed));

            let mut values: Vec<f64> = session.cells.iter().map(|c| c.value).collect();
            values.sort_by(f64::total_cmp);
            assert_eq!(values.len(), 20);
            // 10 bottom, 6 middle, 4 top
            for &v in &values[..10] {
                assert!(v >= bet - 1e-12 && v <= 0.3 * max_prize + 1e-12, "bet {bet}: bottom {v}");
            }
            for &v in &values[10..16] {
                assert!(v >= 0.3 * max_prize - 1e-12 && v <= 0.7 * max_prize + 1e-12, "bet {bet}: middle {v}");
            }
            for &v in &values[16..] {
                assert!(v >= 0.7 * max_prize - 1e-12 && v <= max_prize + 1e-12, "bet {bet}: top {v}");
            }
        }
    }

    #[test]
    fn test_generate_without_modifiers() {
        let config = PickAndClickConfig {
            extra_pick_enabled: false,
            multiplier_enabled: false,
            ..Default::default()
        };
        let session = PickAndClickSession::generate(&config, 2.0, &mut WeightedPicker::seeded(8));
        assert!(session.cells.iter().all(|c| c.kind == CellKind::Prize));
    }

    #[test]
    fn test_reveal_prize_and_multiplier() {
        let cells = vec![
            Cell::new(CellKind::Prize, 10.0),
            Cell::new(CellKind::Multiplier, 3.0),
            Cell::new(CellKind::Multiplier, 2.0),
            Cell::new(CellKind::Prize, 5.0),
        ];
        let mut session = session_with(cells, 2, 2, 4);

        session.reveal(Position::new(0, 0)).unwrap();
        session.reveal(Position::new(1, 0)).unwrap();
        session.reveal(Position::new(0, 1)).unwrap();
        let step = session.reveal(Position::new(1, 1)).unwrap();

        // Multipliers overwrite, they do not stack
        assert!((session.multiplier - 2.0).abs() < 0.001);
        assert!((session.total_win - 15.0).abs() < 0.001);
        assert!((session.payout() - 30.0).abs() < 0.001);
        assert!(step.resolved);
        assert_eq!(step.picks_remaining, 0);
    }

    #[test]
    fn test_extra_pick_nets_value_minus_one() {
        let cells = vec![
            Cell::new(CellKind::ExtraPick, 2.0),
            Cell::new(CellKind::Prize, 1.0),
            Cell::new(CellKind::Prize, 1.0),
            Cell::new(CellKind::Prize, 1.0),
        ];
        let mut session = session_with(cells, 1, 4, 1);

        let step = session.reveal(Position::new(0, 0)).unwrap();
        assert_eq!(step.picks_remaining, 2);
        assert!(!step.resolved);
    }

    #[test]
    fn test_invalid_and_repeat_picks_leave_state() {
        let cells = vec![Cell::new(CellKind::Prize, 4.0), Cell::new(CellKind::Prize, 6.0)];
        let mut session = session_with(cells, 1, 2, 2);

        assert_eq!(
            session.reveal(Position::new(5, 0)),
            Err(SlotError::InvalidPick(Position::new(5, 0)))
        );
        session.reveal(Position::new(0, 0)).unwrap();
        let before = session.clone();
        assert_eq!(
            session.reveal(Position::new(0, 0)),
            Err(SlotError::AlreadyRevealed(Position::new(0, 0)))
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_exhausted_board_resolves() {
        let cells = vec![Cell::new(CellKind::ExtraPick, 5.0), Cell::new(CellKind::Prize, 6.0)];
        let mut session = session_with(cells, 1, 2, 1);

        session.reveal(Position::new(0, 0)).unwrap();
        let step = session.reveal(Position::new(1, 0)).unwrap();
        assert!(step.resolved);
        assert_eq!(session.picks_remaining, 0);
        assert!((session.payout() - 6.0).abs() < 0.001);
    }
}
