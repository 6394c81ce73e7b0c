//! Paytable and payline evaluation

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::symbols::{Position, SymbolGrid, SymbolType};

/// Minimum run length that can pay
pub const MIN_MATCH: u8 = 3;

/// A payline definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Payline index (0-based)
    pub index: u8,
    /// Row positions for each reel (e.g., [1, 0, 0, 0, 1] for a "V" shape)
    pub positions: Vec<u8>,
}

impl Payline {
    pub fn new(index: u8, positions: Vec<u8>) -> Self {
        Self { index, positions }
    }

    /// Create a straight line (same row across all reels)
    pub fn straight(index: u8, row: u8, reel_count: u8) -> Self {
        Self {
            index,
            positions: vec![row; reel_count as usize],
        }
    }

    /// Grid cells this line walks, left to right. Stops past the last addressable reel.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map_while(|(reel, &row)| u8::try_from(reel).ok().map(|reel| Position::new(reel, row)))
    }
}

/// Standard payline patterns for a 5×3 grid
pub fn standard_20_paylines() -> Vec<Payline> {
    vec![
        // Straight lines
        Payline::straight(0, 1, 5), // Middle
        Payline::straight(1, 0, 5), // Top
        Payline::straight(2, 2, 5), // Bottom
        // V shapes
        Payline::new(3, vec![0, 1, 2, 1, 0]),
        Payline::new(4, vec![2, 1, 0, 1, 2]),
        // Zigzag
        Payline::new(5, vec![0, 0, 1, 2, 2]),
        Payline::new(6, vec![2, 2, 1, 0, 0]),
        Payline::new(7, vec![1, 0, 0, 0, 1]),
        Payline::new(8, vec![1, 2, 2, 2, 1]),
        // W shapes
        Payline::new(9, vec![0, 1, 0, 1, 0]),
        Payline::new(10, vec![2, 1, 2, 1, 2]),
        Payline::new(11, vec![0, 1, 1, 1, 0]),
        Payline::new(12, vec![2, 1, 1, 1, 2]),
        // Steps
        Payline::new(13, vec![1, 1, 0, 1, 1]),
        Payline::new(14, vec![1, 1, 2, 1, 1]),
        Payline::new(15, vec![0, 2, 0, 2, 0]),
        Payline::new(16, vec![2, 0, 2, 0, 2]),
        Payline::new(17, vec![1, 0, 1, 0, 1]),
        Payline::new(18, vec![1, 2, 1, 2, 1]),
        Payline::new(19, vec![0, 0, 2, 0, 0]),
    ]
}

/// Symbol → (match count → payout multiplier). Unlisted combinations pay 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paytable {
    pays: HashMap<SymbolType, BTreeMap<u8, f64>>,
}

impl Paytable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Industry-style default: HP/MP/LP tiers plus wild line pays
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.set_pays(SymbolType::Wild, &[50.0, 200.0, 1000.0]);
        table.set_pays(SymbolType::High1, &[20.0, 100.0, 500.0]);
        table.set_pays(SymbolType::High2, &[15.0, 75.0, 300.0]);
        table.set_pays(SymbolType::High3, &[10.0, 50.0, 200.0]);
        table.set_pays(SymbolType::Medium1, &[8.0, 40.0, 150.0]);
        table.set_pays(SymbolType::Medium2, &[5.0, 25.0, 100.0]);
        table.set_pays(SymbolType::Medium3, &[4.0, 20.0, 80.0]);
        table.set_pays(SymbolType::Low1, &[3.0, 15.0, 60.0]);
        table.set_pays(SymbolType::Low2, &[2.0, 10.0, 40.0]);
        table.set_pays(SymbolType::Low3, &[1.0, 5.0, 20.0]);
        table
    }

    /// Set one entry
    pub fn set(&mut self, symbol: SymbolType, match_count: u8, multiplier: f64) {
        self.pays
            .entry(symbol)
            .or_default()
            .insert(match_count, multiplier);
    }

    /// Set 3, 4, 5... of a kind pays (index 0 = 3oak)
    pub fn set_pays(&mut self, symbol: SymbolType, pays: &[f64]) {
        for (i, &pay) in pays.iter().enumerate() {
            self.set(symbol, MIN_MATCH + i as u8, pay);
        }
    }

    /// Builder form of [`Paytable::set_pays`]
    pub fn with_pays(mut self, symbol: SymbolType, pays: &[f64]) -> Self {
        self.set_pays(symbol, pays);
        self
    }

    /// Payout multiplier, 0 when the entry is absent
    pub fn multiplier(&self, symbol: SymbolType, match_count: u8) -> f64 {
        match self.pays.get(&symbol).and_then(|p| p.get(&match_count)) {
            Some(&multiplier) => multiplier,
            None => {
                log::debug!("No paytable entry for {symbol} × {match_count}, paying 0");
                0.0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pays.is_empty()
    }
}

/// The matched run on a payline, before pricing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub symbol: SymbolType,
    pub match_count: u8,
    pub positions: Vec<Position>,
}

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineWin {
    /// Payline index
    pub line_index: u8,
    /// Winning symbol
    pub symbol: SymbolType,
    /// Number of matching symbols
    pub match_count: u8,
    /// Positions of the matched run (reel, row)
    pub positions: Vec<Position>,
    /// Wild positions inside the run
    pub wild_positions: Vec<Position>,
    /// Symbols on the run, left to right
    pub symbols: Vec<SymbolType>,
    /// Win amount (bet per line × pay value)
    pub amount: f64,
}

/// Walk a payline left to right and find the paying run, if any.
///
/// Scatter, bonus and hold symbols end the scan; before three matches are
/// confirmed that means no win. Leading wilds count without fixing the symbol,
/// and an all-wild run of three or more resolves to [`SymbolType::Wild`].
pub fn scan_line(grid: &SymbolGrid, payline: &Payline) -> Option<LineMatch> {
    let mut winning: Option<SymbolType> = None;
    let mut positions = Vec::with_capacity(payline.positions.len());

    for position in payline.cells() {
        let Some(symbol) = grid.get(position) else {
            log::debug!("Payline {} leaves the grid at {position}", payline.index);
            break;
        };

        if symbol.blocks_line() {
            if positions.len() < MIN_MATCH as usize {
                return None;
            }
            break;
        }

        if symbol.is_wild() {
            positions.push(position);
            continue;
        }

        match winning {
            None => {
                winning = Some(symbol);
                positions.push(position);
            }
            Some(w) if w == symbol => positions.push(position),
            Some(_) => break,
        }
    }

    let match_count = positions.len() as u8;
    if match_count < MIN_MATCH {
        return None;
    }

    Some(LineMatch {
        symbol: winning.unwrap_or(SymbolType::Wild),
        match_count,
        positions,
    })
}

/// Evaluate one payline. Pure: identical inputs always give the identical result.
pub fn evaluate(
    grid: &SymbolGrid,
    payline: &Payline,
    paytable: &Paytable,
    bet_per_line: f64,
) -> Option<LineWin> {
    let line = scan_line(grid, payline)?;
    let amount = paytable.multiplier(line.symbol, line.match_count) * bet_per_line;
    if amount <= 0.0 {
        return None;
    }

    let symbols: Vec<SymbolType> = line
        .positions
        .iter()
        .filter_map(|&p| grid.get(p))
        .collect();
    let wild_positions = line
        .positions
        .iter()
        .copied()
        .filter(|&p| grid.get(p).is_some_and(SymbolType::is_wild))
        .collect();

    Some(LineWin {
        line_index: payline.index,
        symbol: line.symbol,
        match_count: line.match_count,
        positions: line.positions,
        wild_positions,
        symbols,
        amount,
    })
}

/// Evaluate the first `active_lines` paylines, ascending by line index
pub fn evaluate_lines(
    grid: &SymbolGrid,
    paylines: &[Payline],
    active_lines: usize,
    paytable: &Paytable,
    bet_per_line: f64,
) -> Vec<LineWin> {
    if active_lines > paylines.len() {
        log::debug!(
            "{} active lines requested, only {} patterns configured",
            active_lines,
            paylines.len()
        );
    }

    let mut active: Vec<&Payline> = paylines.iter().take(active_lines).collect();
    active.sort_by_key(|p| p.index);

    active
        .into_iter()
        .filter_map(|payline| evaluate(grid, payline, paytable, bet_per_line))
        .collect()
}
