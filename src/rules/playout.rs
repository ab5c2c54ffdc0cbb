//! Random playouts over any `RulesEngine`.

use crate::core::rng::GameRng;

use super::engine::{GameResult, RulesEngine};

/// Play uniformly random legal actions until the game ends or `max_actions`
/// actions have been applied.
///
/// Returns the result if the game ended.
pub fn random_playout<E: RulesEngine>(
    game: &mut E,
    rng: &mut GameRng,
    max_actions: usize,
) -> Option<GameResult> {
    for _ in 0..max_actions {
        if game.is_terminal() {
            break;
        }

        let actions = game.legal_actions();
        let &action = rng.choose(&actions)?;
        game.act(&action).ok()?;
    }

    game.result()
}
