//! Game rules: draft, turn flow, battle resolution and legality.
//!
//! `GameState::act` dispatches into these modules; they operate on the state's
//! crate-visible fields. The `RulesEngine` trait is the seam external drivers
//! program against.

pub mod engine;
pub mod mask;
pub mod playout;

pub(crate) mod battle;
pub(crate) mod draft;
pub(crate) mod legal;
pub(crate) mod turn;

pub use engine::{GameResult, RulesEngine};
pub use mask::{MASK_LEN_ITEMS, MASK_LEN_NO_ITEMS};
pub use playout::random_playout;
