//! Battle action resolution: summon, attack, item use and pass.
//!
//! Every handler validates the whole action before touching the state, so a
//! rejected action leaves no trace. On success the action is appended to the
//! acting player's log.

use crate::cards::{CardId, CardInstance, CardKind, Hit, Keyword};
use crate::core::action::{Action, ActionRecord, Target};
use crate::core::entity::InstanceId;
use crate::core::error::GameError;
use crate::core::state::GameState;
use crate::zones::{Lane, Location};

/// Resolve one battle action for the current player.
pub(crate) fn resolve(state: &mut GameState, action: &Action) -> Result<(), GameError> {
    let card_id = match *action {
        Action::Summon { origin, lane } => Some(summon(state, origin, lane)?),
        Action::Attack { origin, target } => Some(attack(state, origin, target)?),
        Action::Use { origin, target } => Some(use_item(state, origin, target)?),
        Action::Pass => None,
        Action::Pick { .. } => return Err(GameError::MalformedAction("invalid action type")),
    };

    let record = ActionRecord::new(state.current, *action, card_id, state.turn);
    state.players[state.current].actions.push(record);

    Ok(())
}

/// Locate a card anywhere visible to the resolver: both hands and all lanes.
fn find_card(state: &GameState, id: InstanceId) -> Result<(Location, &CardInstance), GameError> {
    let location = state.locate(id).ok_or(GameError::CardNotFound(id))?;
    let card = state.cards.get(&id).ok_or(GameError::CardNotFound(id))?;
    Ok((location, card))
}

fn check_mana(state: &GameState, card: &CardInstance) -> Result<(), GameError> {
    let available = state.players[state.current].mana;
    if card.cost > available {
        return Err(GameError::InsufficientMana { cost: card.cost, available });
    }
    Ok(())
}

/// Apply the on-play effects shared by creatures and items, then pay.
fn apply_on_play(state: &mut GameState, card: &CardInstance) {
    let (me, them) = state.players.split_mut(state.current);

    me.bonus_draw += card.card_draw;
    me.apply_health_delta(card.player_hp);
    them.apply_health_delta(card.enemy_hp);
    me.mana -= card.cost;
}

fn summon(state: &mut GameState, origin: InstanceId, lane: Lane) -> Result<CardId, GameError> {
    let (location, card) = find_card(state, origin)?;
    let card = card.clone();

    check_mana(state, &card)?;

    if !card.is_creature() {
        return Err(GameError::MalformedAction("card being summoned is not a creature"));
    }

    if state.players[state.current].board.is_full(lane) {
        return Err(GameError::FullLane);
    }

    if location != Location::PlayerHand {
        return Err(GameError::MalformedAction("card is not in player's hand"));
    }

    let me = &mut state.players[state.current];
    me.hand.retain(|id| *id != origin);
    me.board.lane_mut(lane).push(origin);

    if let Some(combat) = state.cards.get_mut(&origin).and_then(CardInstance::combat_mut) {
        combat.can_attack = false;
    }

    apply_on_play(state, &card);

    Ok(card.card_id)
}

/// Legal attack targets in the lane opposite `lane`: the Guard creatures if
/// there are any, otherwise every creature plus the opposing player.
pub(crate) fn attack_targets(state: &GameState, lane: Lane) -> Vec<Target> {
    let enemy_lane = state.players[state.current.opposing()].board.lane(lane);

    let guards: Vec<Target> = enemy_lane
        .iter()
        .filter(|id| {
            state
                .cards
                .get(*id)
                .is_some_and(|c| c.has_keyword(Keyword::Guard))
        })
        .map(|&id| Target::Creature(id))
        .collect();

    if !guards.is_empty() {
        return guards;
    }

    enemy_lane
        .iter()
        .map(|&id| Target::Creature(id))
        .chain(std::iter::once(Target::Opponent))
        .collect()
}

fn attack(state: &mut GameState, origin: InstanceId, target: Target) -> Result<CardId, GameError> {
    let (location, attacker) = find_card(state, origin)?;
    let attacker = attacker.clone();

    let defender = match target {
        Target::Opponent => None,
        Target::Creature(id) => Some(find_card(state, id)?.1.clone()),
    };

    if !attacker.is_creature() {
        return Err(GameError::MalformedAction("attacking card is not a creature"));
    }

    let Location::PlayerLane(lane) = location else {
        return Err(GameError::MalformedAction("attacking creature is not owned by player"));
    };

    if !attack_targets(state, lane).contains(&target) {
        return Err(GameError::MalformedAction("invalid target"));
    }

    if !attacker.able_to_attack() {
        return Err(GameError::MalformedAction("attacking creature cannot attack"));
    }

    let (me, them) = state.players.split_mut(state.current);

    let dealt = match defender {
        None => them.damage(attacker.attack),
        Some(defender) => {
            let lethal = attacker.has_keyword(Keyword::Lethal);
            let mut dealt = state
                .cards
                .get_mut(&defender.instance_id)
                .map_or(0, |d| d.damage(attacker.attack, lethal).amount());

            // A counter-hit absorbed by the attacker's Ward cancels
            // Breakthrough and Drain for this attack.
            let counter_lethal = defender.has_keyword(Keyword::Lethal);
            let counter = state
                .cards
                .get_mut(&origin)
                .map(|a| a.damage(defender.attack, counter_lethal));
            if counter == Some(Hit::Absorbed) {
                dealt = 0;
            }

            let excess = dealt - defender.defense;
            if attacker.has_keyword(Keyword::Breakthrough) && excess > 0 {
                them.damage(excess);
            }

            dealt
        }
    };

    if attacker.has_keyword(Keyword::Drain) {
        me.heal(dealt);
    }

    if let Some(combat) = state.cards.get_mut(&origin).and_then(CardInstance::combat_mut) {
        combat.has_attacked_this_turn = true;
    }

    Ok(attacker.card_id)
}

fn use_item(state: &mut GameState, origin: InstanceId, target: Target) -> Result<CardId, GameError> {
    let (location, item) = find_card(state, origin)?;
    let item = item.clone();

    let target = match target {
        Target::Opponent => None,
        Target::Creature(id) => {
            let (target_location, target_card) = find_card(state, id)?;
            Some((id, target_location, target_card.is_creature()))
        }
    };

    check_mana(state, &item)?;

    if target.is_some_and(|(_, _, is_creature)| !is_creature) {
        return Err(GameError::MalformedAction("target is not a creature or a player"));
    }

    if location != Location::PlayerHand {
        return Err(GameError::MalformedAction("card is not in player's hand"));
    }

    let on_own_board = |t: Option<(InstanceId, Location, bool)>| {
        matches!(t, Some((_, Location::PlayerLane(_), _)))
    };
    let on_enemy_board = |t: Option<(InstanceId, Location, bool)>| {
        matches!(t, Some((_, Location::EnemyLane(_), _)))
    };

    match item.card_kind() {
        CardKind::Creature => {
            return Err(GameError::MalformedAction("card being used is not an item"));
        }
        CardKind::GreenItem if !on_own_board(target) => {
            return Err(GameError::MalformedAction("green items should be used on friendly creatures"));
        }
        CardKind::RedItem if !on_enemy_board(target) => {
            return Err(GameError::MalformedAction("red items should be used on enemy creatures"));
        }
        CardKind::BlueItem if target.is_some() && !on_enemy_board(target) => {
            return Err(GameError::MalformedAction(
                "blue items should be used on enemy creatures or enemy player",
            ));
        }
        _ => {}
    }

    match (item.card_kind(), target) {
        (CardKind::GreenItem, Some((id, ..))) => {
            if let Some(creature) = state.cards.get_mut(&id) {
                creature.attack += item.attack;
                creature.defense += item.defense;
                creature.keywords = creature.keywords.union(item.keywords);
                creature.check_death();
            }
        }
        (CardKind::RedItem | CardKind::BlueItem, Some((id, ..))) => {
            if let Some(creature) = state.cards.get_mut(&id) {
                creature.attack += item.attack;
                creature.keywords = creature.keywords.difference(item.keywords);
                creature.damage(-item.defense, false);
                creature.check_death();
            }
        }
        (CardKind::BlueItem, None) => {
            state.players[state.current.opposing()].damage(-item.defense);
        }
        _ => {}
    }

    state.players[state.current].hand.retain(|id| *id != origin);
    state.cards.remove(&origin);

    apply_on_play(state, &item);

    Ok(item.card_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, CardTemplate, Keywords};
    use crate::core::config::GameConfig;
    use crate::core::player::PlayerOrder;
    use crate::core::state::Phase;
    use std::sync::Arc;

    fn state() -> GameState {
        let catalog = Arc::new(CardCatalog::from_templates(
            (1..=5)
                .map(|i| CardTemplate::creature(CardId::new(i), "Filler", 1, 1, 1))
                .collect(),
        ));
        let mut state = GameState::new(catalog, GameConfig::default().with_draft_turns(1), 1);
        state.act(&Action::pick(0)).unwrap();
        state.act(&Action::pick(0)).unwrap();
        assert_eq!(state.phase, Phase::Battle);

        // Start from an empty board and hands
        for (_, player) in state.players.iter_mut() {
            player.hand.clear();
            player.board.clear();
            player.deck.clear();
            player.health = 30;
            player.next_rune = 25;
            player.bonus_draw = 0;
            player.mana = 10;
        }
        state.cards = im::OrdMap::new();
        state
    }

    fn put(state: &mut GameState, template: CardTemplate) -> InstanceId {
        let id = state.next_instance_id();
        state.cards.insert(id, CardInstance::from_template(&template, id));
        id
    }

    fn in_hand(state: &mut GameState, who: PlayerOrder, template: CardTemplate) -> InstanceId {
        let id = put(state, template);
        state.players[who].hand.push(id);
        id
    }

    fn on_board(state: &mut GameState, who: PlayerOrder, lane: Lane, template: CardTemplate) -> InstanceId {
        let id = put(state, template);
        state.players[who].board.lane_mut(lane).push(id);
        if let Some(combat) = state.cards.get_mut(&id).and_then(CardInstance::combat_mut) {
            combat.can_attack = true;
        }
        id
    }

    fn creature(attack: i32, defense: i32, keywords: &str) -> CardTemplate {
        CardTemplate::creature(CardId::new(100), "Test", 2, attack, defense)
            .with_keywords(keywords.parse::<Keywords>().unwrap())
    }

    #[test]
    fn test_summon_moves_card_and_pays() {
        let mut state = state();
        let id = in_hand(&mut state, PlayerOrder::First, creature(2, 2, "").with_effects(2, -3, 1));

        resolve(&mut state, &Action::Summon { origin: id, lane: Lane::Right }).unwrap();

        let me = &state.players[PlayerOrder::First];
        assert!(me.hand.is_empty());
        assert_eq!(me.board.lane(Lane::Right), &[id]);
        assert_eq!(me.mana, 8);
        assert_eq!(me.health, 32);
        assert_eq!(me.bonus_draw, 1);
        assert_eq!(state.players[PlayerOrder::Second].health, 27);
        assert!(!state.cards[&id].able_to_attack());
        assert_eq!(me.actions.len(), 1);
        assert_eq!(me.actions[0].card_id, Some(CardId::new(100)));
    }

    #[test]
    fn test_summon_with_charge_can_attack() {
        let mut state = state();
        let id = in_hand(&mut state, PlayerOrder::First, creature(2, 2, "C"));

        resolve(&mut state, &Action::Summon { origin: id, lane: Lane::Left }).unwrap();

        assert!(state.cards[&id].able_to_attack());
    }

    #[test]
    fn test_summon_failures_leave_state() {
        let mut state = state();
        let id = in_hand(&mut state, PlayerOrder::First, creature(1, 1, ""));
        let enemy = in_hand(&mut state, PlayerOrder::Second, creature(1, 1, ""));
        for _ in 0..3 {
            on_board(&mut state, PlayerOrder::First, Lane::Left, creature(1, 1, ""));
        }
        let before = state.snapshot();

        assert_eq!(
            resolve(&mut state, &Action::Summon { origin: id, lane: Lane::Left }),
            Err(GameError::FullLane)
        );
        assert!(matches!(
            resolve(&mut state, &Action::Summon { origin: enemy, lane: Lane::Right }),
            Err(GameError::MalformedAction(_))
        ));
        assert_eq!(
            resolve(&mut state, &Action::Summon { origin: InstanceId(999), lane: Lane::Right }),
            Err(GameError::CardNotFound(InstanceId(999)))
        );
        assert_eq!(state.snapshot(), before);

        state.players[PlayerOrder::First].mana = 1;
        let before = state.snapshot();
        assert_eq!(
            resolve(&mut state, &Action::Summon { origin: id, lane: Lane::Right }),
            Err(GameError::InsufficientMana { cost: 2, available: 1 })
        );
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_attack_opponent() {
        let mut state = state();
        let id = on_board(&mut state, PlayerOrder::First, Lane::Left, creature(4, 2, ""));

        resolve(&mut state, &Action::Attack { origin: id, target: Target::Opponent }).unwrap();

        let them = &state.players[PlayerOrder::Second];
        assert_eq!(them.health, 26);
        assert_eq!(them.next_rune, 25);
        assert!(!state.cards[&id].able_to_attack());

        let again = resolve(&mut state, &Action::Attack { origin: id, target: Target::Opponent });
        assert!(matches!(again, Err(GameError::MalformedAction(_))));
    }

    #[test]
    fn test_attack_exchange() {
        let mut state = state();
        let attacker = on_board(&mut state, PlayerOrder::First, Lane::Left, creature(3, 4, ""));
        let defender = on_board(&mut state, PlayerOrder::Second, Lane::Left, creature(2, 3, ""));

        resolve(&mut state, &Action::Attack { origin: attacker, target: Target::Creature(defender) })
            .unwrap();

        assert_eq!(state.cards[&attacker].defense, 2);
        assert!(state.cards[&defender].is_dead());
    }

    #[test]
    fn test_attack_wrong_lane_rejected() {
        let mut state = state();
        let attacker = on_board(&mut state, PlayerOrder::First, Lane::Left, creature(3, 4, ""));
        let defender = on_board(&mut state, PlayerOrder::Second, Lane::Right, creature(2, 3, ""));

        let result =
            resolve(&mut state, &Action::Attack { origin: attacker, target: Target::Creature(defender) });

        assert_eq!(result, Err(GameError::MalformedAction("invalid target")));
    }

    #[test]
    fn test_guard_forces_target() {
        let mut state = state();
        let attacker = on_board(&mut state, PlayerOrder::First, Lane::Left, creature(1, 5, ""));
        let plain = on_board(&mut state, PlayerOrder::Second, Lane::Left, creature(1, 1, ""));
        let guard = on_board(&mut state, PlayerOrder::Second, Lane::Left, creature(1, 1, "G"));

        assert_eq!(attack_targets(&state, Lane::Left), vec![Target::Creature(guard)]);
        assert_eq!(attack_targets(&state, Lane::Right), vec![Target::Opponent]);

        for target in [Target::Opponent, Target::Creature(plain)] {
            let result = resolve(&mut state, &Action::Attack { origin: attacker, target });
            assert_eq!(result, Err(GameError::MalformedAction("invalid target")));
        }

        resolve(&mut state, &Action::Attack { origin: attacker, target: Target::Creature(guard) })
            .unwrap();
    }

    #[test]
    fn test_breakthrough_and_drain() {
        let mut state = state();
        let attacker = on_board(&mut state, PlayerOrder::First, Lane::Right, creature(5, 5, "BD"));
        let defender = on_board(&mut state, PlayerOrder::Second, Lane::Right, creature(1, 2, ""));

        resolve(&mut state, &Action::Attack { origin: attacker, target: Target::Creature(defender) })
            .unwrap();

        assert_eq!(state.players[PlayerOrder::Second].health, 27);
        assert_eq!(state.players[PlayerOrder::First].health, 35);
    }

    #[test]
    fn test_ward_blocks_breakthrough() {
        let mut state = state();
        let attacker = on_board(&mut state, PlayerOrder::First, Lane::Right, creature(5, 5, "B"));
        let defender = on_board(&mut state, PlayerOrder::Second, Lane::Right, creature(1, 2, "W"));

        resolve(&mut state, &Action::Attack { origin: attacker, target: Target::Creature(defender) })
            .unwrap();

        let defender = &state.cards[&defender];
        assert_eq!(defender.defense, 2);
        assert!(!defender.has_keyword(Keyword::Ward));
        assert_eq!(state.players[PlayerOrder::Second].health, 30);
    }

    #[test]
    fn test_lethal_kills_outright() {
        let mut state = state();
        let attacker = on_board(&mut state, PlayerOrder::First, Lane::Left, creature(1, 5, "L"));
        let defender = on_board(&mut state, PlayerOrder::Second, Lane::Left, creature(1, 9, ""));

        resolve(&mut state, &Action::Attack { origin: attacker, target: Target::Creature(defender) })
            .unwrap();

        assert!(state.cards[&defender].is_dead());
        assert!(!state.cards[&attacker].is_dead());
    }

    #[test]
    fn test_green_item() {
        let mut state = state();
        let target = on_board(&mut state, PlayerOrder::First, Lane::Left, creature(1, 1, ""));
        let item = CardTemplate::new(CardId::new(7), "Buff", CardKind::GreenItem, 1, 2, 1)
            .with_keywords("G".parse().unwrap());
        let item = in_hand(&mut state, PlayerOrder::First, item);

        resolve(&mut state, &Action::Use { origin: item, target: Target::Creature(target) }).unwrap();

        let buffed = &state.cards[&target];
        assert_eq!((buffed.attack, buffed.defense), (3, 2));
        assert!(buffed.has_keyword(Keyword::Guard));
        assert!(state.card(item).is_none());
        assert_eq!(state.players[PlayerOrder::First].mana, 9);
    }

    #[test]
    fn test_red_item_strips_then_damages() {
        let mut state = state();
        let target = on_board(&mut state, PlayerOrder::Second, Lane::Right, creature(3, 3, "GW"));
        let item = CardTemplate::new(CardId::new(8), "Strip", CardKind::RedItem, 1, -1, -3)
            .with_keywords("GW".parse().unwrap());
        let item = in_hand(&mut state, PlayerOrder::First, item);

        resolve(&mut state, &Action::Use { origin: item, target: Target::Creature(target) }).unwrap();

        let hit = &state.cards[&target];
        assert_eq!(hit.attack, 2);
        assert!(hit.keywords.is_empty());
        assert!(hit.is_dead());
    }

    #[test]
    fn test_item_target_validation() {
        let mut state = state();
        let own = on_board(&mut state, PlayerOrder::First, Lane::Left, creature(1, 1, ""));
        let green = in_hand(
            &mut state,
            PlayerOrder::First,
            CardTemplate::new(CardId::new(7), "Buff", CardKind::GreenItem, 1, 1, 1),
        );
        let red = in_hand(
            &mut state,
            PlayerOrder::First,
            CardTemplate::new(CardId::new(8), "Zap", CardKind::RedItem, 1, 0, -1),
        );
        let before = state.snapshot();

        for action in [
            Action::Use { origin: green, target: Target::Opponent },
            Action::Use { origin: red, target: Target::Creature(own) },
            Action::Use { origin: red, target: Target::Creature(green) },
            Action::Use { origin: own, target: Target::Opponent },
        ] {
            assert!(matches!(resolve(&mut state, &action), Err(GameError::MalformedAction(_))));
        }

        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_blue_item_on_player() {
        let mut state = state();
        let item = CardTemplate::new(CardId::new(9), "Bolt", CardKind::BlueItem, 3, 0, -6)
            .with_effects(0, 0, 1);
        let item = in_hand(&mut state, PlayerOrder::First, item);

        resolve(&mut state, &Action::Use { origin: item, target: Target::Opponent }).unwrap();

        let them = &state.players[PlayerOrder::Second];
        assert_eq!(them.health, 24);
        assert_eq!(them.next_rune, 20);
        assert_eq!(them.bonus_draw, 1);
        assert_eq!(state.players[PlayerOrder::First].bonus_draw, 1);
        assert_eq!(state.players[PlayerOrder::First].mana, 7);
    }

    #[test]
    fn test_pick_rejected_in_battle() {
        let mut state = state();
        assert_eq!(
            resolve(&mut state, &Action::pick(0)),
            Err(GameError::MalformedAction("invalid action type"))
        );
    }

    #[test]
    fn test_pass_is_logged() {
        let mut state = state();
        resolve(&mut state, &Action::Pass).unwrap();

        let log = &state.players[PlayerOrder::First].actions;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, Action::Pass);
        assert_eq!(log[0].card_id, None);
    }
}
