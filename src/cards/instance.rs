//! Card instances - runtime card state.
//!
//! `CardInstance` is a catalog template cloned into play with its own
//! `InstanceId`. Stats and keywords are mutable copies; creatures additionally
//! carry per-turn combat flags.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardKind, CardTemplate};
use super::keywords::{Keyword, Keywords};
use crate::core::entity::InstanceId;

/// Per-turn combat flags carried only by creatures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatState {
    /// Set at the start of the controller's turn; cleared when summoned.
    pub can_attack: bool,
    pub has_attacked_this_turn: bool,
    pub is_dead: bool,
}

/// Variant tag with per-variant payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceKind {
    Creature(CombatState),
    GreenItem,
    RedItem,
    BlueItem,
}

impl From<CardKind> for InstanceKind {
    fn from(kind: CardKind) -> Self {
        match kind {
            CardKind::Creature => InstanceKind::Creature(CombatState::default()),
            CardKind::GreenItem => InstanceKind::GreenItem,
            CardKind::RedItem => InstanceKind::RedItem,
            CardKind::BlueItem => InstanceKind::BlueItem,
        }
    }
}

/// Outcome of a single instance of damage against a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// A Ward shield soaked the hit and was stripped.
    Absorbed,
    /// Damage went through (zero for non-positive amounts).
    Dealt(i32),
}

impl Hit {
    /// Damage actually dealt.
    #[must_use]
    pub fn amount(self) -> i32 {
        match self {
            Hit::Absorbed => 0,
            Hit::Dealt(amount) => amount,
        }
    }
}

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique instance ID.
    pub instance_id: InstanceId,

    /// Reference to the catalog template.
    pub card_id: CardId,

    pub kind: InstanceKind,
    pub cost: i32,
    pub attack: i32,
    pub defense: i32,
    pub keywords: Keywords,
    pub player_hp: i32,
    pub enemy_hp: i32,
    pub card_draw: i32,
}

impl CardInstance {
    /// Clone a template into play.
    #[must_use]
    pub fn from_template(template: &CardTemplate, instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            card_id: template.id,
            kind: template.kind.into(),
            cost: template.cost,
            attack: template.attack,
            defense: template.defense,
            keywords: template.keywords,
            player_hp: template.player_hp,
            enemy_hp: template.enemy_hp,
            card_draw: template.card_draw,
        }
    }

    /// The variant tag without payload.
    #[must_use]
    pub fn card_kind(&self) -> CardKind {
        match self.kind {
            InstanceKind::Creature(_) => CardKind::Creature,
            InstanceKind::GreenItem => CardKind::GreenItem,
            InstanceKind::RedItem => CardKind::RedItem,
            InstanceKind::BlueItem => CardKind::BlueItem,
        }
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        matches!(self.kind, InstanceKind::Creature(_))
    }

    /// Combat flags, if this is a creature.
    #[must_use]
    pub fn combat(&self) -> Option<&CombatState> {
        match &self.kind {
            InstanceKind::Creature(combat) => Some(combat),
            _ => None,
        }
    }

    /// Mutable combat flags, if this is a creature.
    pub fn combat_mut(&mut self) -> Option<&mut CombatState> {
        match &mut self.kind {
            InstanceKind::Creature(combat) => Some(combat),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(keyword)
    }

    /// Not yet attacked this turn, and either ready or has Charge.
    #[must_use]
    pub fn able_to_attack(&self) -> bool {
        self.combat().is_some_and(|c| {
            !c.has_attacked_this_turn && (c.can_attack || self.has_keyword(Keyword::Charge))
        })
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.combat().is_some_and(|c| c.is_dead)
    }

    /// Flag a creature as dead. No-op for items.
    pub fn mark_dead(&mut self) {
        if let Some(combat) = self.combat_mut() {
            combat.is_dead = true;
        }
    }

    /// Mark dead if defense has dropped to zero or below.
    pub fn check_death(&mut self) {
        if self.defense <= 0 {
            self.mark_dead();
        }
    }

    /// Deal damage to this creature.
    ///
    /// Non-positive amounts do nothing and leave Ward intact. Otherwise a Ward
    /// shield absorbs the whole hit and is removed; if there is no Ward the
    /// defense drops, and the creature dies when `lethal` is set or defense
    /// reaches zero.
    pub fn damage(&mut self, amount: i32, lethal: bool) -> Hit {
        if amount <= 0 {
            return Hit::Dealt(0);
        }

        if self.has_keyword(Keyword::Ward) {
            self.keywords.remove(Keyword::Ward);
            return Hit::Absorbed;
        }

        self.defense -= amount;

        if lethal || self.defense <= 0 {
            self.mark_dead();
        }

        Hit::Dealt(amount)
    }
}
