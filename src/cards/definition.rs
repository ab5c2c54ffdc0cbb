//! Card templates - static catalog data.
//!
//! `CardTemplate` holds the immutable properties of a catalog entry.
//! Instance-specific data (current stats, combat flags) is stored
//! separately in `CardInstance`.

use serde::{Deserialize, Serialize};

use super::keywords::{Keyword, Keywords};

/// Catalog identifier for a card template.
///
/// Identifies the "type" of card, not a specific instance in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The closed set of card variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Creature,
    /// Buffs a friendly creature.
    GreenItem,
    /// Debuffs an enemy creature.
    RedItem,
    /// Debuffs an enemy creature or hits the opposing player.
    BlueItem,
}

impl CardKind {
    /// Numeric type code used by the native text protocol.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            CardKind::Creature => 0,
            CardKind::GreenItem => 1,
            CardKind::RedItem => 2,
            CardKind::BlueItem => 3,
        }
    }

    /// Name used by the catalog format.
    #[must_use]
    pub const fn catalog_name(self) -> &'static str {
        match self {
            CardKind::Creature => "creature",
            CardKind::GreenItem => "itemGreen",
            CardKind::RedItem => "itemRed",
            CardKind::BlueItem => "itemBlue",
        }
    }

    /// Parse a catalog type name.
    #[must_use]
    pub fn from_catalog_name(name: &str) -> Option<Self> {
        match name {
            "creature" => Some(CardKind::Creature),
            "itemGreen" => Some(CardKind::GreenItem),
            "itemRed" => Some(CardKind::RedItem),
            "itemBlue" => Some(CardKind::BlueItem),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_item(self) -> bool {
        !matches!(self, CardKind::Creature)
    }
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use locm_engine::cards::{CardId, CardKind, CardTemplate, Keyword};
///
/// let slime = CardTemplate::creature(CardId::new(1), "Slimer", 1, 2, 1)
///     .with_keywords("-C----".parse().unwrap())
///     .with_effects(1, 0, 0);
///
/// assert_eq!(slime.kind, CardKind::Creature);
/// assert!(slime.keywords.contains(Keyword::Charge));
/// assert_eq!(slime.player_hp, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    pub kind: CardKind,
    pub cost: i32,
    pub attack: i32,
    pub defense: i32,
    pub keywords: Keywords,

    /// Health delta for the player who plays the card.
    pub player_hp: i32,

    /// Health delta for the opposing player.
    pub enemy_hp: i32,

    /// Cards drawn by the player who plays the card, at their next turn.
    pub card_draw: i32,

    /// Free text (display only).
    pub text: String,
}

impl CardTemplate {
    /// Create a template with no keywords and no on-play effects.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        kind: CardKind,
        cost: i32,
        attack: i32,
        defense: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            cost,
            attack,
            defense,
            keywords: Keywords::empty(),
            player_hp: 0,
            enemy_hp: 0,
            card_draw: 0,
            text: String::new(),
        }
    }

    /// Shorthand for a creature template.
    #[must_use]
    pub fn creature(id: CardId, name: impl Into<String>, cost: i32, attack: i32, defense: i32) -> Self {
        Self::new(id, name, CardKind::Creature, cost, attack, defense)
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Add a single keyword (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.insert(keyword);
        self
    }

    /// Set the on-play effects: own health delta, enemy health delta, card draw.
    #[must_use]
    pub fn with_effects(mut self, player_hp: i32, enemy_hp: i32, card_draw: i32) -> Self {
        self.player_hp = player_hp;
        self.enemy_hp = enemy_hp;
        self.card_draw = card_draw;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.kind == CardKind::Creature
    }
}
