//! # rf-slot-core: outcome evaluation and bonus orchestration
//!
//! Takes a spun symbol grid, computes payline wins, decides which bonus (if
//! any) triggers, and drives the bonus session to a settled payout. Reel-strip
//! sampling, presentation and audio live outside this crate.
//!
//! ## Features
//!
//! - **Payline evaluation**: left-to-right runs with wild substitution
//! - **Trigger priority**: Hold & Spin → Pick & Click → Wheel → Free Spins, one per spin
//! - **Bonus sessions**: Free Spins, Hold & Spin, Pick & Click, Wheel
//! - **Seedable randomness**: one ChaCha source for every bonus draw
//! - **Config loading**: JSON / YAML with up-front validation
//!
//! ## Architecture
//!
//! ```text
//! SlotGame
//!     │
//!     ├── GameConfig (grid, paylines, paytable, bet, RTP, features)
//!     ├── WeightedPicker (seedable random source)
//!     ├── BonusTriggerDetector (ordered TriggerRule strategies)
//!     └── Option<BonusSession>
//!           │
//!           v
//!     SymbolGrid ─┬─ trigger  → BonusSession → BonusSettlement ─┐
//!                 └─ no trigger → evaluate_lines → LineWin[] ───┴→ OutcomeAggregator
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod outcome;
pub mod paytable;
pub mod picker;
pub mod spin;
pub mod symbols;
pub mod trigger;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use features::*;
pub use outcome::*;
pub use paytable::*;
pub use picker::*;
pub use spin::*;
pub use symbols::*;
pub use trigger::*;
