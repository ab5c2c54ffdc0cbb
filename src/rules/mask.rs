//! Fixed-width legality mask and the action-id codec.
//!
//! ## Layout (items enabled, 145 entries)
//!
//! | Index      | Action                                                   |
//! |------------|----------------------------------------------------------|
//! | `0`        | Pass (always set in battle)                              |
//! | `1..=16`   | Summon: `1 + hand_slot * 2 + lane`                       |
//! | `17..=120` | Use: `17 + hand_slot * 13 + sub`                         |
//! | `121..=144`| Attack: `121 + board_slot * 4 + sub`                     |
//!
//! Use sub-slots: `0` no target, `1..=3` own left lane, `4..=6` own right
//! lane, `7..=9` enemy left lane, `10..=12` enemy right lane.
//!
//! Board slots are `0..=2` for the left lane and `3..=5` for the right lane.
//! Attack sub-slot `0` is the opposing player, `1..=3` the creatures of the
//! enemy lane facing the attacker.
//!
//! Without items the Use block is dropped: the first 17 entries followed by
//! the last 24 (41 entries).

use crate::cards::{CardInstance, CardKind, Keyword};
use crate::core::action::{Action, Target};
use crate::core::config::{DRAFT_CHOICES, MAX_HAND_SIZE, MAX_LANE_SIZE};
use crate::core::error::GameError;
use crate::core::state::{GameState, Phase};
use crate::zones::{Board, Lane};

/// Mask length with items enabled.
pub const MASK_LEN_ITEMS: usize = 145;

/// Mask length with items disabled.
pub const MASK_LEN_NO_ITEMS: usize = 41;

const SUMMON_BASE: usize = 1;
const USE_BASE: usize = 17;
const USE_STRIDE: usize = 13;
const ATTACK_BASE: usize = 121;
const ATTACK_STRIDE: usize = 4;

/// Entries removed when items are disabled.
const USE_BLOCK_LEN: usize = ATTACK_BASE - USE_BASE;

/// Build the legality mask for the current player.
///
/// Draft: three entries, all set. Ended: empty.
pub(crate) fn action_mask(state: &GameState) -> Vec<bool> {
    match state.phase {
        Phase::Draft => vec![true; DRAFT_CHOICES],
        Phase::Ended => Vec::new(),
        Phase::Battle => {
            let mask = battle_mask(state);
            if state.config().items {
                mask
            } else {
                compress(&mask)
            }
        }
    }
}

fn compress(mask: &[bool]) -> Vec<bool> {
    let mut short = mask[..USE_BASE].to_vec();
    short.extend_from_slice(&mask[ATTACK_BASE..]);
    short
}

fn battle_mask(state: &GameState) -> Vec<bool> {
    let mut mask = vec![false; MASK_LEN_ITEMS];
    mask[0] = true;

    let me = &state.players[state.current];
    let them = &state.players[state.current.opposing()];

    let affordable = me
        .hand
        .iter()
        .enumerate()
        .filter_map(|(slot, id)| state.cards.get(id).map(|card| (slot, card)))
        .filter(|(_, card)| card.cost <= me.mana);

    for (slot, card) in affordable {
        let use_base = USE_BASE + slot * USE_STRIDE;

        match card.card_kind() {
            CardKind::Creature => {
                for lane in Lane::ALL {
                    if !me.board.is_full(lane) {
                        mask[SUMMON_BASE + slot * 2 + lane.index()] = true;
                    }
                }
            }
            CardKind::GreenItem => {
                for lane in Lane::ALL {
                    for i in 0..me.board.lane(lane).len() {
                        mask[use_base + 1 + lane.index() * MAX_LANE_SIZE + i] = true;
                    }
                }
            }
            CardKind::RedItem | CardKind::BlueItem => {
                for lane in Lane::ALL {
                    for i in 0..them.board.lane(lane).len() {
                        mask[use_base + 7 + lane.index() * MAX_LANE_SIZE + i] = true;
                    }
                }

                if card.card_kind() == CardKind::BlueItem {
                    mask[use_base] = true;
                }
            }
        }
    }

    for lane in Lane::ALL {
        let enemy_lane = them.board.lane(lane);
        let guards: Vec<usize> = enemy_lane
            .iter()
            .enumerate()
            .filter(|(_, id)| state.cards.get(*id).is_some_and(|c| c.has_keyword(Keyword::Guard)))
            .map(|(j, _)| j)
            .collect();

        for (i, id) in me.board.lane(lane).iter().enumerate() {
            if !state.cards.get(id).is_some_and(CardInstance::able_to_attack) {
                continue;
            }

            let base = ATTACK_BASE + (lane.index() * MAX_LANE_SIZE + i) * ATTACK_STRIDE;

            if guards.is_empty() {
                mask[base] = true;
                for j in 0..enemy_lane.len() {
                    mask[base + 1 + j] = true;
                }
            } else {
                for j in &guards {
                    mask[base + 1 + j] = true;
                }
            }
        }
    }

    mask
}

/// Map a mask index to the concrete action it denotes in this state.
pub(crate) fn decode_action(state: &GameState, index: usize) -> Result<Action, GameError> {
    let invalid = GameError::InvalidActionId(index);

    match state.phase {
        Phase::Draft if index < DRAFT_CHOICES => return Ok(Action::pick(index)),
        Phase::Battle if index < state.config().battle_mask_len() => {}
        _ => return Err(invalid),
    }

    let full = if !state.config().items && index >= USE_BASE {
        index + USE_BLOCK_LEN
    } else {
        index
    };

    let me = &state.players[state.current];
    let them = &state.players[state.current.opposing()];
    let hand_card = |slot: usize| me.hand.get(slot).copied();
    let creature_at = |board: &Board, lane: usize, pos: usize| {
        Lane::from_index(lane).and_then(|lane| board.lane(lane).get(pos).copied())
    };

    let action = match full {
        0 => Some(Action::Pass),
        i if i < USE_BASE => {
            let j = i - SUMMON_BASE;
            hand_card(j / 2)
                .zip(Lane::from_index(j % 2))
                .map(|(origin, lane)| Action::Summon { origin, lane })
        }
        i if i < ATTACK_BASE => {
            let j = i - USE_BASE;
            let sub = j % USE_STRIDE;
            let target = match sub {
                0 => Some(Target::Opponent),
                1..=6 => {
                    let k = sub - 1;
                    creature_at(&me.board, k / MAX_LANE_SIZE, k % MAX_LANE_SIZE).map(Target::Creature)
                }
                _ => {
                    let k = sub - 7;
                    creature_at(&them.board, k / MAX_LANE_SIZE, k % MAX_LANE_SIZE).map(Target::Creature)
                }
            };
            hand_card(j / USE_STRIDE)
                .zip(target)
                .map(|(origin, target)| Action::Use { origin, target })
        }
        i => {
            let j = i - ATTACK_BASE;
            let slot = j / ATTACK_STRIDE;
            let sub = j % ATTACK_STRIDE;
            let lane = slot / MAX_LANE_SIZE;
            let target = match sub {
                0 => Some(Target::Opponent),
                _ => creature_at(&them.board, lane, sub - 1).map(Target::Creature),
            };
            creature_at(&me.board, lane, slot % MAX_LANE_SIZE)
                .zip(target)
                .map(|(origin, target)| Action::Attack { origin, target })
        }
    };

    action.ok_or(invalid)
}

/// Map an action to its mask index in this state.
///
/// `None` when the action's cards are not where the layout expects them, or
/// the action has no slot in the active layout.
pub(crate) fn encode_action(state: &GameState, action: &Action) -> Option<usize> {
    match (state.phase, *action) {
        (Phase::Draft, Action::Pick { slot }) => {
            let slot = slot.unwrap_or(0);
            (slot < DRAFT_CHOICES).then_some(slot)
        }
        (Phase::Battle, action) => {
            let full = encode_battle(state, action)?;
            match full {
                i if i < USE_BASE => Some(i),
                i if i < ATTACK_BASE => state.config().items.then_some(i),
                i if state.config().items => Some(i),
                i => Some(i - USE_BLOCK_LEN),
            }
        }
        _ => None,
    }
}

fn encode_battle(state: &GameState, action: Action) -> Option<usize> {
    let me = &state.players[state.current];
    let them = &state.players[state.current.opposing()];

    match action {
        Action::Pass => Some(0),
        Action::Pick { .. } => None,
        Action::Summon { origin, lane } => {
            let slot = me.hand_position(origin)?;
            Some(SUMMON_BASE + slot * 2 + lane.index())
        }
        Action::Use { origin, target } => {
            let slot = me.hand_position(origin)?;
            let sub = match target {
                Target::Opponent => 0,
                Target::Creature(id) => {
                    if let Some((lane, pos)) = me.board.position(id) {
                        1 + lane.index() * MAX_LANE_SIZE + pos
                    } else {
                        let (lane, pos) = them.board.position(id)?;
                        7 + lane.index() * MAX_LANE_SIZE + pos
                    }
                }
            };
            (slot < MAX_HAND_SIZE).then_some(USE_BASE + slot * USE_STRIDE + sub)
        }
        Action::Attack { origin, target } => {
            let (lane, pos) = me.board.position(origin)?;
            let sub = match target {
                Target::Opponent => 0,
                Target::Creature(id) => {
                    let (target_lane, target_pos) = them.board.position(id)?;
                    if target_lane != lane {
                        return None;
                    }
                    1 + target_pos
                }
            };
            Some(ATTACK_BASE + (lane.index() * MAX_LANE_SIZE + pos) * ATTACK_STRIDE + sub)
        }
    }
}
