//! Error types.
//!
//! Every battle-rule failure is an expected, recoverable condition. The
//! dispatch boundary in `GameState::act` catches them, flags the action as
//! invalid and leaves the state untouched. Only `GameAlreadyEnded` escapes
//! `act`; it signals a driver bug, not game logic.

use thiserror::Error;

use super::entity::InstanceId;

/// Rules-engine errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Tried to draw from an empty deck. Turned into burn damage at turn start.
    #[error("deck is empty")]
    EmptyDeck,

    /// Tried to draw into a full hand. The draw is skipped.
    #[error("hand is full")]
    FullHand,

    #[error("not enough mana: card costs {cost}, player has {available}")]
    InsufficientMana { cost: i32, available: i32 },

    /// Wrong card kind, target or location for the requested action.
    #[error("malformed action: {0}")]
    MalformedAction(&'static str),

    #[error("lane is full")]
    FullLane,

    #[error("card {0} not found")]
    CardNotFound(InstanceId),

    #[error("game already ended")]
    GameAlreadyEnded,

    /// A legality-mask index that does not map onto a card in this state.
    #[error("invalid action id {0}")]
    InvalidActionId(usize),

    /// Too few eligible cards to fill a three-card reveal.
    #[error("draft pool needs at least {needed} cards, got {found}")]
    DraftPoolTooSmall { needed: usize, found: usize },
}

/// Snapshot encoding and decoding failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Bincode(#[from] bincode::Error),
}

impl GameError {
    /// Whether this error is a rejected battle action (as opposed to a
    /// driver-side programming error).
    #[must_use]
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            GameError::InsufficientMana { .. }
                | GameError::MalformedAction(_)
                | GameError::FullLane
                | GameError::CardNotFound(_)
        )
    }
}

/// Errors raised while parsing a card catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("line {line}: expected 11 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid integer in field `{field}`: {value:?}")]
    InvalidInteger {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: unknown card type {value:?}")]
    UnknownCardType { line: usize, value: String },

    #[error("line {line}: unknown keyword code {code:?}")]
    UnknownKeyword { line: usize, code: char },

    #[error("line {line}: duplicate card id {id}")]
    DuplicateId { line: usize, id: u32 },

    #[error("expected {expected} cards, found {found}")]
    RecordCount { expected: usize, found: usize },

    #[error("failed to read card catalog: {0}")]
    Io(#[from] std::io::Error),
}
