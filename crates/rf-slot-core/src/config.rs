//! Game configuration
//!
//! Loaded once, validated up front. Malformed configuration fails here and
//! never during spin evaluation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::features::{BonusKind, FreeSpinsConfig, HoldAndSpinConfig, PickAndClickConfig, WheelConfig};
use crate::paytable::{standard_20_paylines, Payline, Paytable};

/// Grid specification (reels × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of reels (columns)
    pub reels: u8,
    /// Number of visible rows per reel
    pub rows: u8,
}

impl GridSpec {
    /// Standard 5×3
    pub fn standard_5x3() -> Self {
        Self { reels: 5, rows: 3 }
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.reels as usize * self.rows as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_5x3()
    }
}

/// RTP split across base game, features and jackpots, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RtpModel {
    pub base_game_pct: f64,
    pub features_pct: f64,
    pub jackpots_pct: f64,
}

impl RtpModel {
    pub const MIN_TOTAL: f64 = 88.0;
    pub const MAX_TOTAL: f64 = 98.0;
    /// Features share required when Free Spins is enabled
    pub const FREE_SPINS_FLOOR: f64 = 10.0;
    /// Features share required when Hold & Spin is enabled
    pub const HOLD_AND_SPIN_FLOOR: f64 = 15.0;

    pub fn total(&self) -> f64 {
        self.base_game_pct + self.features_pct + self.jackpots_pct
    }

    /// Check the total and the per-feature floors
    pub fn validate(&self, features: &FeatureSettings) -> Result<(), ConfigError> {
        let total = self.total();
        if !(Self::MIN_TOTAL..=Self::MAX_TOTAL).contains(&total) {
            return Err(ConfigError::RtpOutOfRange { total });
        }

        let floors = [
            (features.free_spins.enabled, BonusKind::FreeSpins, Self::FREE_SPINS_FLOOR),
            (features.hold_and_spin.enabled, BonusKind::HoldAndSpin, Self::HOLD_AND_SPIN_FLOOR),
        ];
        for (enabled, feature, required) in floors {
            if enabled && self.features_pct < required {
                return Err(ConfigError::FeatureFloor {
                    feature,
                    required,
                    actual: self.features_pct,
                });
            }
        }
        Ok(())
    }
}

impl Default for RtpModel {
    fn default() -> Self {
        Self {
            base_game_pct: 68.0,
            features_pct: 22.0,
            jackpots_pct: 6.0,
        }
    }
}

/// Per-feature settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    pub free_spins: FreeSpinsConfig,
    pub hold_and_spin: HoldAndSpinConfig,
    pub pick_and_click: PickAndClickConfig,
    pub wheel: WheelConfig,
}

impl FeatureSettings {
    /// Whether the bonus of this kind can ever start
    pub fn is_enabled(&self, kind: BonusKind) -> bool {
        match kind {
            BonusKind::FreeSpins => self.free_spins.enabled,
            BonusKind::HoldAndSpin => self.hold_and_spin.enabled,
            BonusKind::PickAndClick => self.pick_and_click.enabled,
            BonusKind::Wheel => self.wheel.enabled,
        }
    }
}

/// Parsing limits for security
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    pub max_name_length: usize,
    pub max_reels: u8,
    pub max_rows: u8,
    pub max_paylines: usize,
    pub max_pick_cells: usize,
    pub max_wheel_segments: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_name_length: 256,
            max_reels: 10,
            max_rows: 10,
            max_paylines: 100,
            max_pick_cells: 64,
            max_wheel_segments: 64,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Game name
    pub name: String,
    pub grid: GridSpec,
    /// Betline patterns
    pub paylines: Vec<Payline>,
    /// Number of patterns in play, taken from the front of `paylines`
    pub active_lines: usize,
    pub paytable: Paytable,
    /// Total bet per base spin
    pub bet: f64,
    pub rtp: RtpModel,
    pub features: FeatureSettings,
    /// Seed for the bonus random source; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameConfig {
    /// 5×3, 20 lines, standard paytable, every feature enabled
    pub fn standard() -> Self {
        let paylines = standard_20_paylines();
        Self {
            name: "Standard 5x3".into(),
            grid: GridSpec::standard_5x3(),
            active_lines: paylines.len(),
            paylines,
            paytable: Paytable::standard(),
            bet: 1.0,
            rtp: RtpModel::default(),
            features: FeatureSettings::default(),
            seed: None,
        }
    }

    /// Builder: set bet
    pub fn with_bet(mut self, bet: f64) -> Self {
        self.bet = bet;
        self
    }

    /// Builder: set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Paylines actually evaluated
    pub fn line_count(&self) -> usize {
        self.active_lines.min(self.paylines.len())
    }

    /// Bet split evenly across the lines in play
    pub fn bet_per_line(&self) -> f64 {
        self.bet / self.line_count().max(1) as f64
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Validate with default limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_with(&ConfigLimits::default())
    }

    /// Validate against explicit limits
    pub fn validate_with(&self, limits: &ConfigLimits) -> Result<(), ConfigError> {
        if self.name.len() > limits.max_name_length {
            return Err(ConfigError::Validation(format!(
                "Game name too long: {} > {}",
                self.name.len(),
                limits.max_name_length
            )));
        }

        let GridSpec { reels, rows } = self.grid;
        if reels == 0 || rows == 0 || reels > limits.max_reels || rows > limits.max_rows {
            return Err(ConfigError::InvalidGrid { reels, rows });
        }

        if self.paylines.len() > limits.max_paylines {
            return Err(ConfigError::Validation(format!(
                "Too many paylines: {} > {}",
                self.paylines.len(),
                limits.max_paylines
            )));
        }

        if !(self.bet.is_finite() && self.bet > 0.0) {
            return Err(ConfigError::Validation(format!("Bet must be positive, got {}", self.bet)));
        }

        self.rtp.validate(&self.features)?;
        self.validate_features(limits)
    }

    fn validate_features(&self, limits: &ConfigLimits) -> Result<(), ConfigError> {
        let FeatureSettings {
            free_spins,
            hold_and_spin,
            pick_and_click,
            wheel,
        } = &self.features;

        if free_spins.enabled && (free_spins.spin_count == 0 || free_spins.trigger_count == 0) {
            return Err(ConfigError::Validation(
                "Free Spins needs a positive spin count and trigger count".into(),
            ));
        }
        if free_spins.multiplier_pool.iter().any(|m| !m.is_finite() || *m <= 0.0) {
            return Err(ConfigError::Validation(
                "Free Spins multipliers must be positive".into(),
            ));
        }

        if hold_and_spin.enabled {
            if hold_and_spin.initial_respins == 0 || hold_and_spin.trigger_count == 0 {
                return Err(ConfigError::Validation(
                    "Hold & Spin needs positive respins and trigger count".into(),
                ));
            }
            if hold_and_spin.min_value == 0 || hold_and_spin.min_value > hold_and_spin.max_value {
                return Err(ConfigError::Validation(format!(
                    "Hold & Spin value range inverted: [{}, {}]",
                    hold_and_spin.min_value, hold_and_spin.max_value
                )));
            }
        }

        if pick_and_click.enabled {
            let cells = pick_and_click.rows as usize * pick_and_click.cols as usize;
            if cells == 0 || cells > limits.max_pick_cells {
                return Err(ConfigError::Validation(format!(
                    "Pick grid must have 1..={} cells, got {}",
                    limits.max_pick_cells, cells
                )));
            }
            if pick_and_click.initial_picks == 0 || pick_and_click.trigger_count == 0 {
                return Err(ConfigError::Validation(
                    "Pick & Click needs positive picks and trigger count".into(),
                ));
            }
            if pick_and_click.max_prize_multiplier < 1.0 {
                return Err(ConfigError::Validation(format!(
                    "Pick & Click max prize inverted: {}",
                    pick_and_click.max_prize_multiplier
                )));
            }
            if pick_and_click.multiplier_enabled && pick_and_click.multiplier_values.is_empty() {
                return Err(ConfigError::Validation(
                    "Pick & Click multiplier modifier has no values".into(),
                ));
            }
        }

        if wheel.enabled {
            if wheel.segment_count == 0 || wheel.segment_count > limits.max_wheel_segments {
                return Err(ConfigError::Validation(format!(
                    "Wheel must have 1..={} segments, got {}",
                    limits.max_wheel_segments, wheel.segment_count
                )));
            }
            if wheel.trigger_count == 0 || wheel.max_multiplier < 1.0 {
                return Err(ConfigError::Validation(
                    "Wheel needs a positive trigger count and max multiplier ≥ 1".into(),
                ));
            }
            let reserved = [
                (wheel.level_up_enabled, wheel.level_up_index),
                (wheel.respin_enabled, wheel.respin_index),
            ];
            for (enabled, index) in reserved {
                if enabled && index >= wheel.segment_count {
                    return Err(ConfigError::Validation(format!(
                        "Wheel special segment {} outside {} segments",
                        index, wheel.segment_count
                    )));
                }
            }
            if wheel.level_up_enabled && wheel.respin_enabled && wheel.level_up_index == wheel.respin_index {
                return Err(ConfigError::Validation(
                    "Wheel level-up and respin segments share an index".into(),
                ));
            }
        }

        Ok(())
    }
}
