//! Symbol definitions and the per-spin symbol grid

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SymbolType {
    /// Wild - substitutes for any paying symbol on a line
    Wild = 0,
    /// Scatter - triggers Free Spins regardless of position
    Scatter = 1,
    /// Bonus - triggers Pick & Click or Wheel
    Bonus = 2,
    /// Hold symbol - triggers and feeds Hold & Spin
    HoldSpin = 3,
    High1 = 4,
    High2 = 5,
    High3 = 6,
    Medium1 = 7,
    Medium2 = 8,
    Medium3 = 9,
    Low1 = 10,
    Low2 = 11,
    Low3 = 12,
}

impl SymbolType {
    /// All regular paying symbols, highest tier first
    pub const PAYING: [SymbolType; 9] = [
        Self::High1,
        Self::High2,
        Self::High3,
        Self::Medium1,
        Self::Medium2,
        Self::Medium3,
        Self::Low1,
        Self::Low2,
        Self::Low3,
    ];

    pub fn is_wild(self) -> bool {
        self == Self::Wild
    }

    /// Scatter, bonus and hold symbols never take part in line wins
    pub fn blocks_line(self) -> bool {
        matches!(self, Self::Scatter | Self::Bonus | Self::HoldSpin)
    }

    /// Regular paying symbol (not wild, not special)
    pub fn is_paying(self) -> bool {
        !self.is_wild() && !self.blocks_line()
    }

    /// Short display name (e.g., "HP1", "WILD")
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Wild => "WILD",
            Self::Scatter => "SCATTER",
            Self::Bonus => "BONUS",
            Self::HoldSpin => "HOLD",
            Self::High1 => "HP1",
            Self::High2 => "HP2",
            Self::High3 => "HP3",
            Self::Medium1 => "MP1",
            Self::Medium2 => "MP2",
            Self::Medium3 => "MP3",
            Self::Low1 => "LP1",
            Self::Low2 => "LP2",
            Self::Low3 => "LP3",
        }
    }
}

impl std::fmt::Display for SymbolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A cell address on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub reel: u8,
    pub row: u8,
}

impl Position {
    pub const fn new(reel: u8, row: u8) -> Self {
        Self { reel, row }
    }
}

impl From<(u8, u8)> for Position {
    fn from((reel, row): (u8, u8)) -> Self {
        Self { reel, row }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.reel, self.row)
    }
}

/// Largest reel or row count a [`Position`] can address
pub const MAX_GRID_SIDE: usize = u8::MAX as usize;

/// Immutable reels × rows snapshot of one spin.
///
/// Stored column-major: `columns[reel][row]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolGrid {
    columns: Vec<Vec<SymbolType>>,
}

impl SymbolGrid {
    /// Build a grid from reel columns. Every reel must have the same, non-zero height,
    /// and neither side may exceed [`MAX_GRID_SIDE`].
    pub fn new(columns: Vec<Vec<SymbolType>>) -> SlotResult<Self> {
        let rows = columns.first().map(Vec::len).unwrap_or(0);
        if columns.len() > MAX_GRID_SIDE || rows > MAX_GRID_SIDE {
            return Err(SlotError::GridTooLarge {
                reels: columns.len(),
                rows,
            });
        }
        if rows == 0 || columns.iter().any(|c| c.len() != rows) {
            let actual_rows = columns.iter().map(Vec::len).max().unwrap_or(0);
            return Err(SlotError::GridMismatch {
                expected: (columns.len(), rows.max(1)),
                actual: (columns.len(), actual_rows),
            });
        }
        Ok(Self { columns })
    }

    /// Build a grid from visual rows (top to bottom), which reads naturally in tests
    pub fn from_rows(rows: Vec<Vec<SymbolType>>) -> SlotResult<Self> {
        let reels = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != reels) {
            return Err(SlotError::GridMismatch {
                expected: (reels, rows.len()),
                actual: (rows.iter().map(Vec::len).max().unwrap_or(0), rows.len()),
            });
        }
        let columns = (0..reels)
            .map(|reel| rows.iter().map(|r| r[reel]).collect())
            .collect();
        Self::new(columns)
    }

    /// Grid filled with a single symbol
    pub fn filled(reels: u8, rows: u8, symbol: SymbolType) -> SlotResult<Self> {
        Self::new(vec![vec![symbol; rows as usize]; reels as usize])
    }

    pub fn reels(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.reels() * self.rows()
    }

    /// Symbol at a position, `None` when out of range
    pub fn get(&self, position: Position) -> Option<SymbolType> {
        self.columns
            .get(position.reel as usize)
            .and_then(|c| c.get(position.row as usize))
            .copied()
    }

    /// Iterate every cell with its position, reel by reel
    pub fn cells(&self) -> impl Iterator<Item = (Position, SymbolType)> + '_ {
        self.columns.iter().enumerate().flat_map(|(reel, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(row, &symbol)| (Position::new(reel as u8, row as u8), symbol))
        })
    }

    /// Positions holding the given symbol
    pub fn positions_of(&self, symbol: SymbolType) -> Vec<Position> {
        self.cells()
            .filter(|&(_, s)| s == symbol)
            .map(|(p, _)| p)
            .collect()
    }

    /// Count trigger-relevant symbols in one pass
    pub fn special_counts(&self) -> SymbolCounts {
        let mut counts = SymbolCounts::default();
        for (position, symbol) in self.cells() {
            match symbol {
                SymbolType::HoldSpin => counts.hold.push(position),
                SymbolType::Bonus => counts.bonus.push(position),
                SymbolType::Scatter => counts.scatter.push(position),
                _ => {}
            }
        }
        counts
    }

    /// Check the grid shape against an expected (reels, rows)
    pub fn ensure_shape(&self, reels: usize, rows: usize) -> SlotResult<()> {
        if self.reels() != reels || self.rows() != rows {
            return Err(SlotError::GridMismatch {
                expected: (reels, rows),
                actual: (self.reels(), self.rows()),
            });
        }
        Ok(())
    }
}

/// Positions of the special symbols found on one grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolCounts {
    pub hold: Vec<Position>,
    pub bonus: Vec<Position>,
    pub scatter: Vec<Position>,
}

impl SymbolCounts {
    pub fn hold_count(&self) -> usize {
        self.hold.len()
    }

    pub fn bonus_count(&self) -> usize {
        self.bonus.len()
    }

    pub fn scatter_count(&self) -> usize {
        self.scatter.len()
    }
}
