//! Slot game state: owns the config, the random source and the single bonus session

use crate::config::GameConfig;
use crate::error::{ConfigError, SlotError, SlotResult};
use crate::features::{
    BonusKind, BonusSession, BonusSettlement, FreeSpinsSession, HoldAndSpinSession,
    PickAndClickSession, SessionSnapshot, SettlementReason, WheelSession,
};
use crate::outcome::{OutcomeAggregator, SessionStats};
use crate::paytable::{LineWin, evaluate_lines};
use crate::picker::WeightedPicker;
use crate::spin::{FreeSpinOutcome, PickOutcome, RespinOutcome, SpinOutcome, WheelOutcome};
use crate::symbols::{Position, SymbolGrid};
use crate::trigger::{BonusTrigger, BonusTriggerDetector};

/// Slot game
///
/// Evaluates externally spun grids and drives bonus sessions to settlement.
/// At most one [`BonusSession`] exists; while it runs the base game is
/// suspended and only the operation matching its kind is accepted.
pub struct SlotGame {
    /// Configuration (validated)
    config: GameConfig,
    /// Random source for every bonus draw
    picker: WeightedPicker,
    /// Trigger rules in priority order
    detector: BonusTriggerDetector,
    /// The active bonus, if any
    session: Option<BonusSession>,
    /// Crediting ledger
    aggregator: OutcomeAggregator,
}

impl SlotGame {
    /// Create a game, validating the config first
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let picker = WeightedPicker::new(config.seed);
        let detector = BonusTriggerDetector::from_settings(&config.features);
        log::info!(
            "Slot game '{}' ready: {}×{}, {} lines, bet {}",
            config.name,
            config.grid.reels,
            config.grid.rows,
            config.line_count(),
            config.bet
        );

        Ok(Self {
            config,
            picker,
            detector,
            session: None,
            aggregator: OutcomeAggregator::new(),
        })
    }

    /// Create with a fixed seed for reproducible sessions
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config.with_seed(seed))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STATE
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reseed the random source
    pub fn seed(&mut self, seed: u64) {
        self.picker.reseed(seed);
    }

    pub fn session(&self) -> Option<&BonusSession> {
        self.session.as_ref()
    }

    pub fn is_session_active(&self) -> bool {
        self.session.is_some()
    }

    /// Live snapshot for presentation
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(BonusSession::snapshot)
    }

    /// Reinstall a persisted session.
    ///
    /// Rejected while another session is running, when its feature is
    /// disabled, or when it does not fit this game (grid size, board shape,
    /// nothing left to play).
    pub fn restore_session(&mut self, session: BonusSession) -> SlotResult<()> {
        self.ensure_idle()?;
        self.ensure_enabled(session.kind())?;
        self.check_restored(&session)?;
        log::info!("Restored {} session", session.kind());
        self.session = Some(session);
        Ok(())
    }

    /// Get session stats
    pub fn stats(&self) -> &SessionStats {
        self.aggregator.stats()
    }

    /// Reset session stats
    pub fn reset_stats(&mut self) {
        self.aggregator.reset();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // BASE GAME
    // ═══════════════════════════════════════════════════════════════════════════

    /// Play one base-game spin on an externally produced grid.
    ///
    /// Trigger detection runs first; a trigger opens its session and the
    /// spin's line wins are not paid.
    pub fn spin(&mut self, grid: &SymbolGrid) -> SlotResult<SpinOutcome> {
        self.ensure_idle()?;
        self.check_grid(grid)?;

        let bet = self.config.bet;
        self.aggregator.record_wager(bet);

        if let Some(trigger) = self.detector.scan(grid, None) {
            self.aggregator.credit_trigger_spin();
            let settlement = self.open_session(&trigger, grid);
            return Ok(SpinOutcome {
                bet,
                line_wins: Vec::new(),
                trigger: Some(trigger),
                payout: OutcomeAggregator::aggregate(&[], settlement.as_ref()),
                snapshot: self.snapshot(),
                settlement,
            });
        }

        let line_wins = self.evaluate(grid);
        let payout = self.aggregator.credit_base(&line_wins, bet);
        log::debug!("Base spin: {} winning lines, payout {:.2}", line_wins.len(), payout);

        Ok(SpinOutcome {
            bet,
            line_wins,
            trigger: None,
            payout,
            snapshot: None,
            settlement: None,
        })
    }

    /// Open the session `trigger` claims for `grid`. Never nests or replaces a running session.
    ///
    /// The trigger is re-detected from the grid: the claimed kind must be
    /// enabled and must be exactly what the grid starts, and the session is
    /// built from the detected positions, never the claimed ones. Returns the
    /// settlement when the new session had nothing to play.
    pub fn enter_session(
        &mut self,
        trigger: &BonusTrigger,
        grid: &SymbolGrid,
    ) -> SlotResult<Option<BonusSettlement>> {
        self.ensure_idle()?;
        self.check_grid(grid)?;
        self.ensure_enabled(trigger.kind)?;

        let detected = self.detector.scan(grid, None);
        let detected_kind = detected.as_ref().map(|d| d.kind);
        let Some(detected) = detected.filter(|d| d.kind == trigger.kind) else {
            log::warn!("Rejected {} entry, grid triggers {:?}", trigger.kind, detected_kind);
            return Err(SlotError::TriggerNotDetected {
                claimed: trigger.kind,
                detected: detected_kind,
            });
        };
        Ok(self.open_session(&detected, grid))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // BONUS SESSIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Play one free spin. No wager is booked.
    pub fn free_spin(&mut self, grid: &SymbolGrid) -> SlotResult<FreeSpinOutcome> {
        self.expect_kind(BonusKind::FreeSpins)?;
        self.check_grid(grid)?;

        let line_wins = self.evaluate(grid);
        let line_total = OutcomeAggregator::aggregate(&line_wins, None);
        let scatter_hit = self
            .detector
            .scan(grid, self.session.as_ref())
            .is_some_and(|t| t.kind == BonusKind::FreeSpins);

        let Some(BonusSession::FreeSpins(session)) = self.session.as_mut() else {
            return Err(SlotError::NoActiveSession);
        };
        let step = session.play(line_total, &mut self.picker);
        let retriggered = scatter_hit && session.retrigger();
        let spins_remaining = session.spins_remaining;
        let complete = session.is_complete();

        self.aggregator.record_free_spin();
        if retriggered {
            self.aggregator.record_trigger(BonusKind::FreeSpins);
            log::info!("Free Spins retriggered, {} spins remaining", spins_remaining);
        }
        log::debug!(
            "Free spin: line total {:.2} × {} = {:.2}",
            line_total,
            step.multiplier,
            step.spin_win
        );

        let settlement = if complete {
            self.settle(SettlementReason::Completed)
        } else {
            None
        };

        Ok(FreeSpinOutcome {
            line_wins,
            multiplier: step.multiplier,
            spin_win: step.spin_win,
            retriggered,
            spins_remaining,
            settlement,
        })
    }

    /// Play one Hold & Spin respin; only unlocked cells of `grid` matter
    pub fn respin(&mut self, grid: &SymbolGrid) -> SlotResult<RespinOutcome> {
        self.expect_kind(BonusKind::HoldAndSpin)?;
        self.check_grid(grid)?;

        let Some(BonusSession::HoldAndSpin(session)) = self.session.as_mut() else {
            return Err(SlotError::NoActiveSession);
        };
        let step = session.respin(grid, &mut self.picker);
        let locked_count = session.locked_count();
        log::debug!(
            "Respin: {} new locks, {} respins left",
            step.newly_locked.len(),
            step.respins_remaining
        );

        let settlement = step.terminal.and_then(|reason| self.settle(reason));

        Ok(RespinOutcome {
            newly_locked: step.newly_locked,
            respins_remaining: step.respins_remaining,
            locked_count,
            settlement,
        })
    }

    /// Reveal one Pick & Click cell
    pub fn pick(&mut self, position: Position) -> SlotResult<PickOutcome> {
        self.expect_kind(BonusKind::PickAndClick)?;

        let Some(BonusSession::PickAndClick(session)) = self.session.as_mut() else {
            return Err(SlotError::NoActiveSession);
        };
        let step = session.reveal(position)?;
        let (total_win, multiplier) = (session.total_win, session.multiplier);
        log::debug!("Picked {} -> {:?} {}", position, step.cell.kind, step.cell.value);

        let settlement = if step.resolved {
            self.settle(SettlementReason::Completed)
        } else {
            None
        };

        Ok(PickOutcome {
            position,
            cell: step.cell,
            picks_remaining: step.picks_remaining,
            total_win,
            multiplier,
            settlement,
        })
    }

    /// Spin the wheel and settle
    pub fn spin_wheel(&mut self) -> SlotResult<WheelOutcome> {
        self.expect_kind(BonusKind::Wheel)?;

        let rotation = self.picker.angle();
        let Some(BonusSession::Wheel(session)) = self.session.as_mut() else {
            return Err(SlotError::NoActiveSession);
        };
        let result = session.resolve(rotation);
        log::debug!(
            "Wheel stopped at {:.1}°, segment {} ({:?})",
            result.rotation,
            result.segment.index,
            result.segment.kind
        );

        let settlement = self
            .settle(SettlementReason::Completed)
            .ok_or(SlotError::NoActiveSession)?;
        Ok(WheelOutcome { result, settlement })
    }

    /// Abandon the running session, paying whatever was consumed so far
    pub fn force_settle(&mut self) -> SlotResult<BonusSettlement> {
        let Some(active) = self.session.as_ref() else {
            return Err(SlotError::NoActiveSession);
        };
        log::warn!(
            "Force settling {} session at {:.2}",
            active.kind(),
            active.payout()
        );
        self.settle(SettlementReason::Forced)
            .ok_or(SlotError::NoActiveSession)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNALS
    // ═══════════════════════════════════════════════════════════════════════════

    fn evaluate(&self, grid: &SymbolGrid) -> Vec<LineWin> {
        evaluate_lines(
            grid,
            &self.config.paylines,
            self.config.active_lines,
            &self.config.paytable,
            self.config.bet_per_line(),
        )
    }

    fn check_grid(&self, grid: &SymbolGrid) -> SlotResult<()> {
        grid.ensure_shape(self.config.grid.reels as usize, self.config.grid.rows as usize)
    }

    fn ensure_idle(&self) -> SlotResult<()> {
        match &self.session {
            Some(active) => {
                log::warn!("Rejected second bonus session while {} is active", active.kind());
                Err(SlotError::SessionActive {
                    active: active.kind(),
                })
            }
            None => Ok(()),
        }
    }

    fn ensure_enabled(&self, kind: BonusKind) -> SlotResult<()> {
        if self.config.features.is_enabled(kind) {
            Ok(())
        } else {
            log::warn!("Rejected {} session: feature disabled", kind);
            Err(SlotError::FeatureDisabled(kind))
        }
    }

    /// A persisted session must match this game's grid and still have something to play
    fn check_restored(&self, session: &BonusSession) -> SlotResult<()> {
        let (reels, rows) = (self.config.grid.reels, self.config.grid.rows);
        let grid_cells = reels as usize * rows as usize;

        let problem = match session {
            _ if session.is_resolved() => Some("nothing left to play".to_string()),
            BonusSession::FreeSpins(_) => None,
            BonusSession::HoldAndSpin(s) if s.cell_count != grid_cells => Some(format!(
                "built for {} cells, grid has {}",
                s.cell_count, grid_cells
            )),
            BonusSession::HoldAndSpin(s) => s
                .locked
                .iter()
                .find(|c| c.position.reel >= reels || c.position.row >= rows)
                .map(|c| format!("locked cell {} outside the grid", c.position)),
            BonusSession::PickAndClick(s) => {
                let cells = s.rows as usize * s.cols as usize;
                (cells == 0 || s.cells.len() != cells).then(|| {
                    format!("{}×{} board holds {} cells", s.cols, s.rows, s.cells.len())
                })
            }
            BonusSession::Wheel(s) => s.segments.is_empty().then(|| "wheel has no segments".to_string()),
        };

        match problem {
            Some(reason) => {
                log::warn!("Rejected restored {} session: {}", session.kind(), reason);
                Err(SlotError::InvalidSession(format!("{}: {}", session.kind(), reason)))
            }
            None => Ok(()),
        }
    }

    fn expect_kind(&self, expected: BonusKind) -> SlotResult<()> {
        match &self.session {
            None => Err(SlotError::NoActiveSession),
            Some(s) if s.kind() != expected => Err(SlotError::WrongSession {
                expected,
                active: s.kind(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Install the session for a detected trigger, settling it at once when
    /// it has nothing to play
    fn open_session(&mut self, trigger: &BonusTrigger, grid: &SymbolGrid) -> Option<BonusSettlement> {
        let bet = self.config.bet;
        let features = &self.config.features;
        let session = match trigger.kind {
            BonusKind::FreeSpins => {
                BonusSession::FreeSpins(FreeSpinsSession::start(&features.free_spins))
            }
            BonusKind::HoldAndSpin => BonusSession::HoldAndSpin(HoldAndSpinSession::start(
                &features.hold_and_spin,
                &trigger.positions,
                bet,
                grid.cell_count(),
                &mut self.picker,
            )),
            BonusKind::PickAndClick => BonusSession::PickAndClick(PickAndClickSession::generate(
                &features.pick_and_click,
                bet,
                &mut self.picker,
            )),
            BonusKind::Wheel => BonusSession::Wheel(WheelSession::build(
                &features.wheel,
                bet,
                &mut self.picker,
            )),
        };

        log::info!(
            "{} triggered by {} symbols at {:?}",
            trigger.kind,
            trigger.count,
            trigger.positions
        );
        self.aggregator.record_trigger(trigger.kind);
        let resolved = session.is_resolved();
        self.session = Some(session);

        if resolved {
            log::warn!("{} opened with nothing to play", trigger.kind);
            return self.settle(SettlementReason::Completed);
        }
        None
    }

    /// Destroy the session and credit its payout exactly once
    fn settle(&mut self, reason: SettlementReason) -> Option<BonusSettlement> {
        let session = self.session.take()?;
        let settlement = BonusSettlement {
            kind: session.kind(),
            payout: session.payout(),
            reason,
        };
        self.aggregator.credit_settlement(&settlement, self.config.bet);
        log::info!(
            "{} settled ({:?}): {:.2}",
            settlement.kind,
            reason,
            settlement.payout
        );
        Some(settlement)
    }
}
