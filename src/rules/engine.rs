//! Rules engine trait.
//!
//! Drivers (agents, search, environment wrappers) talk to a game only through
//! this seam:
//! - What actions are legal
//! - Apply an action
//! - Whose turn it is / who won
//! - Fork an independent copy for lookahead

use crate::core::action::Action;
use crate::core::error::GameError;
use crate::core::player::PlayerOrder;
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerOrder,

    /// Battle turn on which the game ended.
    pub turn: u32,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerOrder) -> bool {
        self.winner == player
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Empty once the game has ended
/// - `act`: Must be deterministic; replaying the same actions from the same
///   seed reproduces the same state
/// - `result`: `None` while the game continues
/// - `fork`: The copy shares no mutable state with its source
pub trait RulesEngine {
    /// Legal actions for the player to act.
    fn legal_actions(&self) -> Vec<Action>;

    /// Legality mask over the fixed action-id space.
    fn action_mask(&self) -> Vec<bool>;

    /// Apply an action for the player to act.
    fn act(&mut self, action: &Action) -> Result<(), GameError>;

    /// The player to act.
    fn current_player(&self) -> PlayerOrder;

    /// `Some(result)` once the game has ended.
    fn result(&self) -> Option<GameResult>;

    /// Independent copy for lookahead.
    fn fork(&self) -> Self
    where
        Self: Sized;

    // === Convenience Methods ===

    fn is_terminal(&self) -> bool {
        self.result().is_some()
    }

    fn winner(&self) -> Option<PlayerOrder> {
        self.result().map(|r| r.winner)
    }
}

impl RulesEngine for GameState {
    fn legal_actions(&self) -> Vec<Action> {
        GameState::legal_actions(self)
    }

    fn action_mask(&self) -> Vec<bool> {
        GameState::action_mask(self)
    }

    fn act(&mut self, action: &Action) -> Result<(), GameError> {
        GameState::act(self, action)
    }

    fn current_player(&self) -> PlayerOrder {
        GameState::current_player(self)
    }

    fn result(&self) -> Option<GameResult> {
        GameState::winner(self).map(|winner| GameResult {
            winner,
            turn: self.turn(),
        })
    }

    fn fork(&self) -> Self {
        self.clone_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult { winner: PlayerOrder::Second, turn: 9 };
        assert!(!result.is_winner(PlayerOrder::First));
        assert!(result.is_winner(PlayerOrder::Second));
    }
}
