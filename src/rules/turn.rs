//! Turn flow: turn rotation, battle setup, turn start, dead-creature sweep
//! and the game-end check.

use std::sync::Arc;

use crate::cards::{CardInstance, CardTemplate};
use crate::core::config::{MAX_BASE_MANA, OPENING_HAND};
use crate::core::entity::InstanceId;
use crate::core::error::GameError;
use crate::core::player::PlayerOrder;
use crate::core::state::{GameState, Phase};

/// Hand the turn to the other player. The shared turn counter advances once
/// both have acted; the draft ends after its last turn-pair.
pub(crate) fn next_turn(state: &mut GameState) {
    match state.current {
        PlayerOrder::First => state.current = PlayerOrder::Second,
        PlayerOrder::Second => {
            state.current = PlayerOrder::First;
            state.turn += 1;

            if state.phase == Phase::Draft && state.turn > state.config().draft_turns {
                log::debug!("draft complete after {} turns", state.turn - 1);
                state.phase = Phase::Battle;
                state.turn = 1;
            }
        }
    }
}

/// One-time battle setup after the draft.
///
/// Decks are shuffled, then instantiated pairwise (first player's card, second
/// player's card, ...) so instance ids interleave between the two decks. Each
/// player draws the opening hand; the second player draws one extra card and
/// gets one bonus mana.
pub(crate) fn prepare_for_battle(state: &mut GameState) {
    let catalog = Arc::clone(state.catalog());

    for (_, player) in state.players.iter_mut() {
        player.hand.clear();
        player.board.clear();
        state.rng.shuffle(&mut player.draft_picks);
    }

    let picks: [Vec<&CardTemplate>; 2] = PlayerOrder::ALL.map(|order| {
        state.players[order]
            .draft_picks
            .iter()
            .filter_map(|&id| catalog.get(id))
            .collect()
    });

    let mut decks: [Vec<InstanceId>; 2] = [Vec::new(), Vec::new()];
    for (first, second) in picks[0].iter().zip(&picks[1]) {
        for (deck, template) in decks.iter_mut().zip([first, second]) {
            let id = state.next_instance_id();
            state.cards.insert(id, CardInstance::from_template(template, id));
            deck.push(id);
        }
    }

    for ((_, player), mut deck) in state.players.iter_mut().zip(decks) {
        deck.reverse();
        player.deck = deck;

        if let Err(err) = player.draw(OPENING_HAND) {
            log::debug!("{} opening draw stopped early: {}", player.order, err);
        }
        player.base_mana = 0;
    }

    let second = &mut state.players[PlayerOrder::Second];
    if let Err(err) = second.draw(1) {
        log::debug!("{} extra draw failed: {}", second.order, err);
    }
    second.bonus_mana = 1;

    log::debug!(
        "battle begins: {} instances, decks {} / {}",
        state.instances.allocated(),
        state.players[PlayerOrder::First].deck.len(),
        state.players[PlayerOrder::Second].deck.len()
    );
}

/// Start the current player's battle turn: ready creatures, refill mana and
/// draw. Drawing from an empty deck burns the player down to their rune
/// threshold instead.
pub(crate) fn new_battle_turn(state: &mut GameState) {
    let who = state.current;
    let past_limit = state.turn > state.config().turn_limit;
    let player = &mut state.players[who];

    for (_, id) in player.board.iter() {
        if let Some(combat) = state.cards.get_mut(&id).and_then(CardInstance::combat_mut) {
            combat.can_attack = true;
            combat.has_attacked_this_turn = false;
        }
    }

    if player.base_mana > 0 && player.mana == 0 {
        player.bonus_mana = 0;
    }

    if player.base_mana < MAX_BASE_MANA {
        player.base_mana += 1;
    }

    player.refill_mana();

    let in_hand = player.hand.len();
    let to_draw = usize::try_from(1 + player.bonus_draw).unwrap_or(0);

    if past_limit && !player.deck.is_empty() {
        log::debug!("{} deck discarded at turn {}", who, state.turn);
        for id in player.deck.drain(..) {
            state.cards.remove(&id);
        }
    }

    match player.draw(to_draw) {
        Err(GameError::EmptyDeck) => {
            let burn = player.health - player.next_rune;
            player.damage(burn);
            log::trace!("{} burns for {}", who, burn);
        }
        Err(GameError::FullHand) => log::trace!("{} draws into a full hand", who),
        _ => {}
    }

    player.bonus_draw = 0;
    player.last_drawn = player.hand.len() - in_hand;
}

/// Remove dead creatures from both boards and from the arena.
pub(crate) fn sweep_dead(state: &mut GameState) {
    let dead: Vec<InstanceId> = state
        .players
        .iter()
        .flat_map(|(_, player)| player.board.iter())
        .map(|(_, id)| id)
        .filter(|id| state.cards.get(id).is_some_and(CardInstance::is_dead))
        .collect();

    if dead.is_empty() {
        return;
    }

    for (_, player) in state.players.iter_mut() {
        player.board.retain(|id| !dead.contains(&id));
    }
    for id in &dead {
        state.cards.remove(id);
    }
}

/// End the battle once a player is at zero health or below. The first player
/// is checked before the second.
pub(crate) fn check_health(state: &mut GameState) {
    if state.phase != Phase::Battle {
        return;
    }

    let loser = PlayerOrder::ALL
        .into_iter()
        .find(|&order| state.players[order].is_dead());

    if let Some(loser) = loser {
        let winner = loser.opposing();
        state.phase = Phase::Ended;
        state.winner = Some(winner);
        log::debug!("game over at turn {}: {} wins", state.turn, winner);
    }
}
