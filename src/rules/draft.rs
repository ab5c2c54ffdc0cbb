//! Draft phase: reveal generation and picks.

use crate::cards::{CardCatalog, CardId, CardKind};
use crate::core::action::Action;
use crate::core::config::{GameConfig, DRAFT_CHOICES};
use crate::core::error::GameError;
use crate::core::rng::GameRng;
use crate::core::state::{DraftChoices, GameState};

/// Generate the whole reveal schedule up front.
///
/// The catalog (creatures only when items are off) is shuffled and cut down
/// to the draft pool. Every reveal then reshuffles that same pool and shows its
/// first three cards, so a card may recur across reveals.
///
/// Fails if fewer than three cards are eligible.
pub(crate) fn new_draft(
    catalog: &CardCatalog,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Result<Vec<DraftChoices>, GameError> {
    let mut pool: Vec<CardId> = catalog
        .iter()
        .filter(|card| config.items || card.kind == CardKind::Creature)
        .map(|card| card.id)
        .collect();

    rng.shuffle(&mut pool);
    pool.truncate(config.draft_pool_size);

    if pool.len() < DRAFT_CHOICES {
        return Err(GameError::DraftPoolTooSmall {
            needed: DRAFT_CHOICES,
            found: pool.len(),
        });
    }

    Ok((0..config.draft_turns)
        .map(|_| {
            rng.shuffle(&mut pool);
            [pool[0], pool[1], pool[2]]
        })
        .collect())
}

/// Add the chosen card of this turn's reveal to the current player's picks.
pub(crate) fn pick(state: &mut GameState, action: &Action) -> Result<(), GameError> {
    let Action::Pick { slot } = *action else {
        return Err(GameError::MalformedAction("only picks are allowed during the draft"));
    };

    let slot = slot.unwrap_or(0);
    let card = state
        .current_draft_choices()
        .and_then(|choices| choices.get(slot).copied())
        .ok_or(GameError::MalformedAction("draft slot out of range"))?;

    log::trace!("{} picks {} (slot {})", state.current, card, slot);
    state.players[state.current].draft_picks.push(card);

    Ok(())
}
