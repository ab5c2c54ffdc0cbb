//! Action representation.
//!
//! An action is a tagged record: the verb plus its origin (draft slot or
//! instance id) and target (lane, instance id, or the opposing player).
//!
//! Actions print and parse in the native protocol syntax:
//!
//! ```
//! use locm_engine::core::{Action, InstanceId, Target};
//! use locm_engine::zones::Lane;
//!
//! let attack = Action::Attack { origin: InstanceId(5), target: Target::Opponent };
//! assert_eq!(attack.to_string(), "ATTACK 5 -1");
//!
//! let parsed = Action::parse_list("SUMMON 3 1;ATTACK 5 -1;").unwrap();
//! assert_eq!(parsed[0], Action::Summon { origin: InstanceId(3), lane: Lane::Right });
//! assert_eq!(parsed[1], attack);
//! ```

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::error::GameError;
use super::player::PlayerOrder;
use crate::cards::CardId;
use crate::zones::Lane;

/// Action verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Pick,
    Summon,
    Attack,
    Use,
    Pass,
}

impl ActionType {
    /// Upper-case protocol name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionType::Pick => "PICK",
            ActionType::Summon => "SUMMON",
            ActionType::Attack => "ATTACK",
            ActionType::Use => "USE",
            ActionType::Pass => "PASS",
        }
    }
}

/// Target of an attack or item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// No creature: the hit lands on the opposing player.
    Opponent,
    Creature(InstanceId),
}

impl Target {
    /// Protocol form: the instance id, or `-1` for the opposing player.
    #[must_use]
    pub fn protocol_id(self) -> i64 {
        match self {
            Target::Opponent => -1,
            Target::Creature(id) => i64::from(id.raw()),
        }
    }

    fn from_protocol(value: i64) -> Result<Self, GameError> {
        if value == -1 {
            return Ok(Target::Opponent);
        }
        u32::try_from(value)
            .ok()
            .filter(|&v| v != 0)
            .map(|v| Target::Creature(InstanceId(v)))
            .ok_or(GameError::MalformedAction("target must be an instance id or -1"))
    }
}

/// A complete game action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draft pick by slot. `None` picks slot 0.
    Pick { slot: Option<usize> },
    Summon { origin: InstanceId, lane: Lane },
    Attack { origin: InstanceId, target: Target },
    Use { origin: InstanceId, target: Target },
    Pass,
}

impl Action {
    /// Pick the given draft slot.
    #[must_use]
    pub const fn pick(slot: usize) -> Self {
        Action::Pick { slot: Some(slot) }
    }

    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        match self {
            Action::Pick { .. } => ActionType::Pick,
            Action::Summon { .. } => ActionType::Summon,
            Action::Attack { .. } => ActionType::Attack,
            Action::Use { .. } => ActionType::Use,
            Action::Pass => ActionType::Pass,
        }
    }

    /// The acting card, for battle actions that have one.
    #[must_use]
    pub const fn origin(&self) -> Option<InstanceId> {
        match self {
            Action::Summon { origin, .. }
            | Action::Attack { origin, .. }
            | Action::Use { origin, .. } => Some(*origin),
            Action::Pick { .. } | Action::Pass => None,
        }
    }

    /// Protocol form of the target: lane index, instance id, or `-1`.
    #[must_use]
    pub fn protocol_target(&self) -> i64 {
        match self {
            Action::Summon { lane, .. } => lane.index() as i64,
            Action::Attack { target, .. } | Action::Use { target, .. } => target.protocol_id(),
            Action::Pick { .. } | Action::Pass => -1,
        }
    }

    /// Parse a `;`-separated command list. Blank entries are skipped.
    pub fn parse_list(s: &str) -> Result<Vec<Action>, GameError> {
        s.split(';')
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.parse::<Action>())
            .collect()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Pass => write!(f, "PASS"),
            Action::Pick { slot } => write!(f, "PICK {}", slot.unwrap_or(0)),
            Action::Summon { origin, lane } => write!(f, "SUMMON {origin} {lane}"),
            Action::Attack { origin, target } | Action::Use { origin, target } => write!(
                f,
                "{} {} {}",
                self.action_type().name(),
                origin,
                target.protocol_id()
            ),
        }
    }
}

fn parse_number<T: std::str::FromStr>(token: Option<&str>) -> Result<T, GameError> {
    token
        .ok_or(GameError::MalformedAction("missing action argument"))?
        .parse()
        .map_err(|_| GameError::MalformedAction("action argument is not a number"))
}

impl std::str::FromStr for Action {
    type Err = GameError;

    /// Parse one protocol command. Trailing tokens are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let verb = tokens
            .next()
            .ok_or(GameError::MalformedAction("empty action"))?;

        match verb {
            "PASS" => Ok(Action::Pass),
            "PICK" => Ok(Action::pick(parse_number(tokens.next())?)),
            "SUMMON" => {
                let origin = InstanceId(parse_number(tokens.next())?);
                let lane = Lane::from_index(parse_number(tokens.next())?)
                    .ok_or(GameError::MalformedAction("target is not a lane"))?;
                Ok(Action::Summon { origin, lane })
            }
            "ATTACK" | "USE" => {
                let origin = InstanceId(parse_number(tokens.next())?);
                let target = Target::from_protocol(parse_number(tokens.next())?)?;
                if verb == "ATTACK" {
                    Ok(Action::Attack { origin, target })
                } else {
                    Ok(Action::Use { origin, target })
                }
            }
            _ => Err(GameError::MalformedAction("invalid action type")),
        }
    }
}

/// A resolved battle action kept in the player's log.
///
/// Used for opponent-visible history in the native protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerOrder,

    /// The action taken.
    pub action: Action,

    /// Template of the acting card, if the action had one.
    pub card_id: Option<CardId>,

    /// Battle turn when the action was taken.
    pub turn: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerOrder, action: Action, card_id: Option<CardId>, turn: u32) -> Self {
        Self {
            player,
            action,
            card_id,
            turn,
        }
    }
}
