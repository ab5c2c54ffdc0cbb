//! External text protocols.

pub mod native;

pub use native::{encode, opponent_last_actions, visible_cards, VisibleCard};
