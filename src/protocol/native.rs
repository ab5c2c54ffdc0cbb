//! Native text protocol: the state as seen by the player to act.
//!
//! ```text
//! <health> <mana> <deck> <rune> <draw>        current player
//! <health> <mana> <deck> <rune> <draw>        opposing player
//! <opponent hand> <n>
//! <card id> <ACTION> <origin> <target>        n lines, opponent's last turn
//! <card count>
//! <id> <instance> <location> <type> <cost> <attack> <defense> <keywords> <hp> <enemy hp> <draw> <lane>
//! ```
//!
//! During the draft the visible cards are the three choices, with instance id
//! `-1`. Every card line ends with a space before the newline.

use std::fmt::{self, Write as _};

use crate::cards::{CardInstance, CardKind, CardTemplate, Keywords};
use crate::core::action::{ActionRecord, ActionType};
use crate::core::player::Player;
use crate::core::state::{GameState, Phase};
use crate::zones::{Lane, Location};

/// One card line of the protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleCard {
    pub card_id: u32,
    /// `-1` for draft choices.
    pub instance_id: i64,
    pub location: i32,
    pub kind: CardKind,
    pub cost: i32,
    pub attack: i32,
    pub defense: i32,
    pub keywords: Keywords,
    pub player_hp: i32,
    pub enemy_hp: i32,
    pub card_draw: i32,
    /// `-1` for cards in hand.
    pub lane: i32,
}

impl VisibleCard {
    fn from_template(template: &CardTemplate) -> Self {
        Self {
            card_id: template.id.raw(),
            instance_id: -1,
            location: 0,
            kind: template.kind,
            cost: template.cost,
            attack: template.attack,
            defense: template.defense,
            keywords: template.keywords,
            player_hp: template.player_hp,
            enemy_hp: template.enemy_hp,
            card_draw: template.card_draw,
            lane: -1,
        }
    }

    fn from_instance(card: &CardInstance, location: Location) -> Self {
        Self {
            card_id: card.card_id.raw(),
            instance_id: i64::from(card.instance_id.raw()),
            location: location.protocol_code().unwrap_or(0),
            kind: card.card_kind(),
            cost: card.cost,
            attack: card.attack,
            defense: card.defense,
            keywords: card.keywords,
            player_hp: card.player_hp,
            enemy_hp: card.enemy_hp,
            card_draw: card.card_draw,
            lane: location.lane().map_or(-1, |lane| lane.index() as i32),
        }
    }
}

impl fmt::Display for VisibleCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {} {} {} {} ",
            self.card_id,
            self.instance_id,
            self.location,
            self.kind.code(),
            self.cost,
            self.attack,
            self.defense,
            self.keywords,
            self.player_hp,
            self.enemy_hp,
            self.card_draw,
            self.lane
        )
    }
}

/// Cards visible to the player to act: own hand, own lanes, enemy lanes.
#[must_use]
pub fn visible_cards(state: &GameState) -> Vec<VisibleCard> {
    if let Some(choices) = state.current_draft_choices() {
        return choices
            .iter()
            .filter_map(|&id| state.catalog().get(id))
            .map(VisibleCard::from_template)
            .collect();
    }

    let me = state.current_player_state();
    let them = state.opposing_player_state();

    let hand = me.hand.iter().map(|&id| (id, Location::PlayerHand));
    let own = Lane::ALL.into_iter().flat_map(move |lane| {
        me.board.lane(lane).iter().map(move |&id| (id, Location::PlayerLane(lane)))
    });
    let enemy = Lane::ALL.into_iter().flat_map(move |lane| {
        them.board.lane(lane).iter().map(move |&id| (id, Location::EnemyLane(lane)))
    });

    hand.chain(own)
        .chain(enemy)
        .filter_map(|(id, location)| {
            state
                .card(id)
                .map(|card| VisibleCard::from_instance(card, location))
        })
        .collect()
}

/// The opponent's actions from their last turn, oldest first.
///
/// The final entry of the log is the `Pass` that ended the turn; the walk
/// goes backwards from just before it and stops at the previous `Pass`.
#[must_use]
pub fn opponent_last_actions(opponent: &Player) -> Vec<&ActionRecord> {
    let Some((_, earlier)) = opponent.actions.split_last() else {
        return Vec::new();
    };

    let mut last: Vec<&ActionRecord> = earlier
        .iter()
        .rev()
        .take_while(|record| record.action.action_type() != ActionType::Pass)
        .collect();
    last.reverse();
    last
}

fn player_line(out: &mut String, player: &Player, phase: Phase, draw: i32) -> fmt::Result {
    let deck = if phase == Phase::Draft {
        player.draft_picks.len()
    } else {
        player.deck.len()
    };

    writeln!(
        out,
        "{} {} {} {} {}",
        player.health,
        player.base_mana + player.bonus_mana,
        deck,
        player.next_rune,
        draw
    )
}

/// Render the state in the native protocol.
pub fn encode(state: &GameState) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let me = state.current_player_state();
    let them = state.opposing_player_state();

    player_line(&mut out, me, state.phase(), me.last_drawn as i32)?;
    player_line(&mut out, them, state.phase(), 1 + them.bonus_draw)?;

    let opponent_hand = if state.is_draft() { 0 } else { them.hand.len() };
    let last = opponent_last_actions(them);

    writeln!(out, "{} {}", opponent_hand, last.len())?;

    for record in last {
        writeln!(
            out,
            "{} {} {} {}",
            record.card_id.map_or(-1, |id| i64::from(id.raw())),
            record.action.action_type().name(),
            record.action.origin().map_or(-1, |id| i64::from(id.raw())),
            record.action.protocol_target()
        )?;
    }

    let cards = visible_cards(state);
    writeln!(out, "{}", cards.len())?;

    for card in &cards {
        writeln!(out, "{card}")?;
    }

    Ok(out)
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self)?)
    }
}
