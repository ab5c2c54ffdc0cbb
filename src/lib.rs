//! # locm-engine
//!
//! Rules engine for Legends of Code and Magic: a two-player card game with a
//! draft phase followed by a battle phase.
//!
//! ## Design Principles
//!
//! 1. **One owner of card data**: Card instances live in an arena keyed by
//!    instance id. Hands, decks, lanes and action logs hold ids.
//!
//! 2. **Deterministic**: All randomness flows from the seeded generator owned
//!    by the state. Same seed plus same actions gives the same game.
//!
//! 3. **Cheap forks**: `GameState` clones are independent deep copies backed
//!    by persistent maps, for search and lookahead callers.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use locm_engine::{random_playout, CardCatalog, CardId, CardTemplate, GameConfig, GameRng, GameState};
//!
//! let catalog = Arc::new(CardCatalog::from_templates(
//!     (1..=12).map(|i| CardTemplate::creature(CardId::new(i), "Imp", 1, 2, 1)).collect(),
//! ));
//!
//! let mut state = GameState::new(catalog, GameConfig::default(), 42);
//! let result = random_playout(&mut state, &mut GameRng::new(7), 100_000);
//!
//! assert!(result.is_some());
//! assert!(state.is_ended());
//! ```
//!
//! ## Modules
//!
//! - `core`: Instance ids, players, state, actions, RNG, configuration, errors
//! - `zones`: Board lanes and card locations
//! - `cards`: Card templates, the catalog, keywords and card instances
//! - `rules`: Draft, turn flow, battle resolution, legality mask, `RulesEngine`
//! - `protocol`: Native text protocol rendering

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod protocol;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    InstanceCounter, InstanceId,
    Player, PlayerOrder, PlayerPair,
    GameRng, GameRngState,
    GameConfig,
    Action, ActionRecord, ActionType, Target,
    GameError, CatalogError, SnapshotError,
    GameSnapshot, GameState, Phase,
};

pub use crate::zones::{Board, Lane, Location};

pub use crate::cards::{
    CardCatalog, CardId, CardInstance, CardKind, CardTemplate, Hit, Keyword, Keywords,
};

pub use crate::rules::{random_playout, GameResult, RulesEngine, MASK_LEN_ITEMS, MASK_LEN_NO_ITEMS};
