//! Core engine types: instance ids, players, state, actions, RNG,
//! configuration and errors.

pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{InstanceCounter, InstanceId};
pub use error::{CatalogError, GameError, SnapshotError};
pub use player::{Hand, Player, PlayerOrder, PlayerPair};
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
pub use action::{Action, ActionRecord, ActionType, Target};
pub use state::{DraftChoices, GameSnapshot, GameState, Phase};
