//! Wheel session
//!
//! A fixed ring of segments. Optional `level_up` and `respin` segments sit at
//! configured indices; every other segment carries a prize multiplier from the
//! 50/30/20 band split. One uniform rotation decides the segment under the
//! pointer at the top of the wheel.

use serde::{Deserialize, Serialize};

use crate::picker::WeightedPicker;

/// Pointer position in wheel degrees (top of the wheel)
pub const POINTER_ANGLE: f64 = 270.0;

/// Wheel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub enabled: bool,
    /// Bonus symbols needed to trigger
    pub trigger_count: usize,
    pub segment_count: usize,
    /// Largest prize segment, in multiples of the bet
    pub max_multiplier: f64,
    pub level_up_enabled: bool,
    pub level_up_index: usize,
    pub respin_enabled: bool,
    pub respin_index: usize,
    /// Flat credit amount paid by `level_up` / `respin` segments.
    /// Their named actions are not performed.
    pub special_segment_payout: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger_count: 2,
            segment_count: 8,
            max_multiplier: 25.0,
            level_up_enabled: false,
            level_up_index: 2,
            respin_enabled: false,
            respin_index: 6,
            special_segment_payout: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Prize,
    LevelUp,
    Respin,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelSegment {
    pub index: usize,
    pub kind: SegmentKind,
    /// Bet multiplier for prize segments, 0 for special segments
    pub value: f64,
}

/// Outcome of the wheel spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelResult {
    /// Drawn rotation in degrees, `[0, 360)`
    pub rotation: f64,
    pub segment: WheelSegment,
    pub payout: f64,
}

/// Live Wheel state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSession {
    pub segments: Vec<WheelSegment>,
    pub result: Option<WheelResult>,
    bet: f64,
    special_segment_payout: f64,
}

/// Index of the segment under the pointer after rotating the wheel by `rotation` degrees.
///
/// Segment `i` spans `[i·w, (i+1)·w)` in wheel coordinates, `w = 360 / n`.
pub fn segment_under_pointer(rotation: f64, segment_count: usize) -> usize {
    if segment_count == 0 {
        return 0;
    }
    let width = 360.0 / segment_count as f64;
    let local = (POINTER_ANGLE - rotation).rem_euclid(360.0);
    ((local / width).floor() as usize).min(segment_count - 1)
}

impl WheelSession {
    /// Lay out the segments for a fresh session
    pub fn build(config: &WheelConfig, bet: f64, picker: &mut WeightedPicker) -> Self {
        let n = config.segment_count;
        let mut kinds = vec![SegmentKind::Prize; n];
        if config.level_up_enabled && config.level_up_index < n {
            kinds[config.level_up_index] = SegmentKind::LevelUp;
        }
        if config.respin_enabled && config.respin_index < n {
            kinds[config.respin_index] = SegmentKind::Respin;
        }

        let prize_slots = kinds.iter().filter(|k| **k == SegmentKind::Prize).count();
        let mut values = picker.banded_values(prize_slots, config.max_multiplier);
        picker.shuffle(&mut values);
        let mut values = values.into_iter();

        let segments = kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| WheelSegment {
                index,
                kind,
                value: match kind {
                    SegmentKind::Prize => values.next().unwrap_or(1.0),
                    SegmentKind::LevelUp | SegmentKind::Respin => 0.0,
                },
            })
            .collect();

        Self {
            segments,
            result: None,
            bet,
            special_segment_payout: config.special_segment_payout,
        }
    }

    /// Resolve the wheel for a given rotation. A resolved wheel keeps its first result.
    pub fn resolve(&mut self, rotation: f64) -> WheelResult {
        if let Some(result) = self.result {
            return result;
        }

        let rotation = rotation.rem_euclid(360.0);
        let index = segment_under_pointer(rotation, self.segments.len());
        let segment = self.segments.get(index).copied().unwrap_or(WheelSegment {
            index,
            kind: SegmentKind::Prize,
            value: 0.0,
        });
        let payout = match segment.kind {
            SegmentKind::Prize => segment.value * self.bet,
            SegmentKind::LevelUp | SegmentKind::Respin => {
                log::debug!("Wheel landed on {:?}, paying flat {}", segment.kind, self.special_segment_payout);
                self.special_segment_payout
            }
        };

        let result = WheelResult {
            rotation,
            segment,
            payout,
        };
        self.result = Some(result);
        result
    }

    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    pub fn payout(&self) -> f64 {
        self.result.map(|r| r.payout).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_at_rotation_270_hits_segment_zero() {
        assert_eq!(segment_under_pointer(270.0, 8), 0);
    }

    #[test]
    fn test_segment_under_pointer_sweep() {
        assert_eq!(segment_under_pointer(225.0, 8), 1);
        assert_eq!(segment_under_pointer(0.0, 8), 6);
        assert_eq!(segment_under_pointer(269.999, 8), 0);
        assert_eq!(segment_under_pointer(270.001, 8), 7);
        assert_eq!(segment_under_pointer(630.0, 8), 0);
    }

    #[test]
    fn test_build_reserves_special_indices() {
        let config = WheelConfig {
            level_up_enabled: true,
            respin_enabled: true,
            ..Default::default()
        };
        let session = WheelSession::build(&config, 1.0, &mut WeightedPicker::seeded(12));

        assert_eq!(session.segments.len(), 8);
        assert_eq!(session.segments[2].kind, SegmentKind::LevelUp);
        assert_eq!(session.segments[6].kind, SegmentKind::Respin);
        let prizes: Vec<_> = session
            .segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Prize)
            .collect();
        assert_eq!(prizes.len(), 6);
        assert!(prizes.iter().all(|s| s.value >= 1.0 && s.value <= 25.0));
    }

    #[test]
    fn test_prize_segment_pays_value_times_bet() {
        let mut session = WheelSession::build(&WheelConfig::default(), 2.0, &mut WeightedPicker::seeded(13));
        let expected = session.segments[0].value * 2.0;

        let result = session.resolve(270.0);
        assert_eq!(result.segment.index, 0);
        assert!((result.payout - expected).abs() < 0.001);
        assert!(session.is_resolved());

        // Second resolve is idempotent
        let again = session.resolve(10.0);
        assert_eq!(again, result);
    }

    #[test]
    fn test_special_segment_pays_flat_amount() {
        let config = WheelConfig {
            level_up_enabled: true,
            level_up_index: 0,
            special_segment_payout: 7.5,
            ..Default::default()
        };
        let mut session = WheelSession::build(&config, 4.0, &mut WeightedPicker::seeded(14));
        let result = session.resolve(270.0);
        assert_eq!(result.segment.kind, SegmentKind::LevelUp);
        assert!((result.payout - 7.5).abs() < 0.001);
    }
}
