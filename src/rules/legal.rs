//! Legal action enumeration.

use crate::cards::{CardInstance, CardKind};
use crate::core::action::{Action, Target};
use crate::core::config::DRAFT_CHOICES;
use crate::core::state::{GameState, Phase};
use crate::zones::Lane;

use super::battle::attack_targets;

/// Enumerate the current player's legal actions.
///
/// Battle order is summons, then attacks, then item uses; each in hand or
/// board order. `Pass` is listed only when nothing else is possible.
pub(crate) fn legal_actions(state: &GameState) -> Vec<Action> {
    match state.phase {
        Phase::Draft => (0..DRAFT_CHOICES).map(Action::pick).collect(),
        Phase::Ended => Vec::new(),
        Phase::Battle => battle_actions(state),
    }
}

fn battle_actions(state: &GameState) -> Vec<Action> {
    let me = &state.players[state.current];
    let them = &state.players[state.current.opposing()];

    let mut summon = Vec::new();
    let mut attack = Vec::new();
    let mut use_item = Vec::new();

    let affordable = me
        .hand
        .iter()
        .filter_map(|id| state.cards.get(id))
        .filter(|card| card.cost <= me.mana);

    for card in affordable {
        let origin = card.instance_id;

        match card.card_kind() {
            CardKind::Creature => {
                summon.extend(
                    Lane::ALL
                        .into_iter()
                        .filter(|&lane| !me.board.is_full(lane))
                        .map(|lane| Action::Summon { origin, lane }),
                );
            }
            CardKind::GreenItem => {
                use_item.extend(me.board.iter().map(|(_, id)| Action::Use {
                    origin,
                    target: Target::Creature(id),
                }));
            }
            CardKind::RedItem | CardKind::BlueItem => {
                use_item.extend(them.board.iter().map(|(_, id)| Action::Use {
                    origin,
                    target: Target::Creature(id),
                }));

                if card.card_kind() == CardKind::BlueItem {
                    use_item.push(Action::Use { origin, target: Target::Opponent });
                }
            }
        }
    }

    for lane in Lane::ALL {
        let targets = attack_targets(state, lane);

        let ready = me
            .board
            .lane(lane)
            .iter()
            .filter(|id| state.cards.get(*id).is_some_and(CardInstance::able_to_attack));

        for &origin in ready {
            attack.extend(targets.iter().map(|&target| Action::Attack { origin, target }));
        }
    }

    let mut actions = summon;
    actions.append(&mut attack);
    actions.append(&mut use_item);

    if actions.is_empty() {
        actions.push(Action::Pass);
    }

    actions
}
