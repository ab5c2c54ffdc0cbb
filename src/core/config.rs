//! Game configuration and rule constants.
//!
//! `GameConfig` carries the knobs a driver may change between games (items
//! on/off, draft length, pool size, the deck-out safety cap). Everything that
//! the legality bitmask layout depends on is a fixed constant instead, since
//! the layout is an external compatibility contract.

use serde::{Deserialize, Serialize};

/// Health every player starts the battle with.
pub const STARTING_HEALTH: i32 = 30;

/// First rune threshold.
pub const FIRST_RUNE: i32 = 25;

/// Distance between consecutive rune thresholds.
pub const RUNE_STEP: i32 = 5;

/// Maximum cards in hand.
pub const MAX_HAND_SIZE: usize = 8;

/// Maximum creatures per lane.
pub const MAX_LANE_SIZE: usize = 3;

/// Base mana cap.
pub const MAX_BASE_MANA: i32 = 12;

/// Cards drawn by each player during battle setup.
pub const OPENING_HAND: usize = 4;

/// Cards revealed per draft turn.
pub const DRAFT_CHOICES: usize = 3;

/// Game configuration.
///
/// ## Example
///
/// ```
/// use locm_engine::core::GameConfig;
///
/// let config = GameConfig::default().with_items(false).with_turn_limit(40);
///
/// assert!(!config.items);
/// assert_eq!(config.draft_turns, 30);
/// assert_eq!(config.turn_limit, 40);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Whether item cards take part in the draft (and the item block of the
    /// legality mask exists).
    pub items: bool,

    /// Number of draft turn-pairs; also the final deck size.
    pub draft_turns: u32,

    /// Cards kept from the shuffled catalog to form the draft pool.
    pub draft_pool_size: usize,

    /// Past this battle turn a player's deck is treated as empty.
    pub turn_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            items: true,
            draft_turns: 30,
            draft_pool_size: 60,
            turn_limit: 50,
        }
    }
}

impl GameConfig {
    /// Enable or disable item cards.
    #[must_use]
    pub fn with_items(mut self, items: bool) -> Self {
        self.items = items;
        self
    }

    /// Set the number of draft turns.
    #[must_use]
    pub fn with_draft_turns(mut self, turns: u32) -> Self {
        assert!(turns > 0, "Draft must last at least one turn");
        self.draft_turns = turns;
        self
    }

    /// Set the draft pool size.
    #[must_use]
    pub fn with_draft_pool_size(mut self, size: usize) -> Self {
        self.draft_pool_size = size;
        self
    }

    /// Set the deck-out safety cap.
    #[must_use]
    pub fn with_turn_limit(mut self, turn: u32) -> Self {
        self.turn_limit = turn;
        self
    }

    /// Length of the battle-phase legality mask.
    #[must_use]
    pub const fn battle_mask_len(&self) -> usize {
        if self.items {
            crate::rules::mask::MASK_LEN_ITEMS
        } else {
            crate::rules::mask::MASK_LEN_NO_ITEMS
        }
    }
}
