//! Card catalog: the ordered, immutable list of card templates.
//!
//! ## Format
//!
//! One record per line, `;`-separated, fields trimmed:
//!
//! ```text
//! id ; name ; type ; cost ; attack ; defense ; keywords ; player_hp ; enemy_hp ; card_draw ; text
//! ```
//!
//! `type` is one of `creature`, `itemGreen`, `itemRed`, `itemBlue`;
//! `keywords` is a string over `BCDGLW` with `-` placeholders.

use std::path::Path;

use rustc_hash::FxHashMap;

use super::definition::{CardId, CardKind, CardTemplate};
use super::keywords::Keywords;
use crate::core::error::CatalogError;

/// Number of records in the full game catalog.
pub const CATALOG_SIZE: usize = 160;

/// Catalog of card templates.
///
/// Preserves file order (draft pools are built from it) and provides
/// lookup by `CardId`.
///
/// ## Example
///
/// ```
/// use locm_engine::cards::{CardCatalog, CardId, CardKind};
///
/// let catalog = CardCatalog::parse(
///     "1 ; Slimer ; creature ; 1 ; 2 ; 1 ; ------ ; 1 ; 0 ; 0 ; Summon: You gain 1 health.\n\
///      2 ; Scuttler ; creature ; 1 ; 1 ; 2 ; ------ ; 0 ; -1 ; 0 ; Summon: Deal 1 damage to your opponent.",
/// )
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get(CardId::new(2)).unwrap().enemy_hp, -1);
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().kind, CardKind::Creature);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardTemplate>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Build a catalog from templates.
    ///
    /// Panics if two templates share an id.
    #[must_use]
    pub fn from_templates(cards: Vec<CardTemplate>) -> Self {
        let mut index = FxHashMap::default();
        for (i, card) in cards.iter().enumerate() {
            if index.insert(card.id, i).is_some() {
                panic!("Card with ID {:?} already registered", card.id);
            }
        }
        Self { cards, index }
    }

    /// Parse catalog text with any number of records.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut cards = Vec::new();
        let mut index = FxHashMap::default();

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let card = parse_record(raw, line)?;
            if index.insert(card.id, cards.len()).is_some() {
                return Err(CatalogError::DuplicateId { line, id: card.id.raw() });
            }
            cards.push(card);
        }

        log::debug!("parsed card catalog with {} templates", cards.len());

        Ok(Self { cards, index })
    }

    /// Parse the full game catalog, which must hold exactly 160 records.
    pub fn parse_full(text: &str) -> Result<Self, CatalogError> {
        let catalog = Self::parse(text)?;
        if catalog.len() != CATALOG_SIZE {
            return Err(CatalogError::RecordCount {
                expected: CATALOG_SIZE,
                found: catalog.len(),
            });
        }
        Ok(catalog)
    }

    /// Read and parse the full game catalog from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_full(&text)
    }

    /// Get a card template by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.iter()
    }

    /// Find templates of a given kind, in catalog order.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &CardTemplate> {
        self.cards.iter().filter(move |c| c.kind == kind)
    }
}

fn parse_int(value: &str, line: usize, field: &'static str) -> Result<i32, CatalogError> {
    value.parse().map_err(|_| CatalogError::InvalidInteger {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_record(raw: &str, line: usize) -> Result<CardTemplate, CatalogError> {
    let fields: Vec<&str> = raw.splitn(11, ';').map(str::trim).collect();
    if fields.len() != 11 {
        return Err(CatalogError::FieldCount {
            line,
            found: fields.len(),
        });
    }

    let id: u32 = fields[0].parse().map_err(|_| CatalogError::InvalidInteger {
        line,
        field: "id",
        value: fields[0].to_string(),
    })?;

    let kind = CardKind::from_catalog_name(fields[2]).ok_or_else(|| CatalogError::UnknownCardType {
        line,
        value: fields[2].to_string(),
    })?;

    let keywords: Keywords = fields[6]
        .parse()
        .map_err(|code| CatalogError::UnknownKeyword { line, code })?;

    Ok(CardTemplate {
        id: CardId::new(id),
        name: fields[1].to_string(),
        kind,
        cost: parse_int(fields[3], line, "cost")?,
        attack: parse_int(fields[4], line, "attack")?,
        defense: parse_int(fields[5], line, "defense")?,
        keywords,
        player_hp: parse_int(fields[7], line, "player_hp")?,
        enemy_hp: parse_int(fields[8], line, "enemy_hp")?,
        card_draw: parse_int(fields[9], line, "card_draw")?,
        text: fields[10].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Keyword;

    const SAMPLE: &str = "\
1 ; Slimer ; creature ; 1 ; 2 ; 1 ; ------ ; 1 ; 0 ; 0 ; Summon: You gain 1 health.
51 ; Mighty Mana Crystal ; creature ; 4 ; 1 ; 7 ; ---G-W ; 0 ; 0 ; 0 ;
118 ; Decimate ; itemRed ; 7 ; 0 ; -99 ; BCDGLW ; 0 ; 0 ; 0 ; Remove all abilities; deal 99 damage
";

    #[test]
    fn test_parse_sample() {
        let catalog = CardCatalog::parse(SAMPLE).unwrap();

        assert_eq!(catalog.len(), 3);

        let crystal = catalog.get(CardId::new(51)).unwrap();
        assert_eq!(crystal.name, "Mighty Mana Crystal");
        assert!(crystal.keywords.contains(Keyword::Guard));
        assert!(crystal.keywords.contains(Keyword::Ward));
        assert_eq!(crystal.text, "");

        let decimate = catalog.get(CardId::new(118)).unwrap();
        assert_eq!(decimate.kind, CardKind::RedItem);
        assert_eq!(decimate.defense, -99);
        // Text keeps embedded separators
        assert_eq!(decimate.text, "Remove all abilities; deal 99 damage");
    }

    #[test]
    fn test_catalog_order_preserved() {
        let catalog = CardCatalog::parse(SAMPLE).unwrap();
        let ids: Vec<_> = catalog.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![1, 51, 118]);
    }

    #[test]
    fn test_find_by_kind() {
        let catalog = CardCatalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.find_by_kind(CardKind::Creature).count(), 2);
        assert_eq!(catalog.find_by_kind(CardKind::RedItem).count(), 1);
        assert_eq!(catalog.find_by_kind(CardKind::BlueItem).count(), 0);
    }

    #[test]
    fn test_field_count_error() {
        let err = CardCatalog::parse("1 ; Slimer ; creature ; 1").unwrap_err();
        assert!(matches!(err, CatalogError::FieldCount { line: 1, found: 4 }));
    }

    #[test]
    fn test_bad_integer_error() {
        let err = CardCatalog::parse("1 ; X ; creature ; one ; 2 ; 1 ; ------ ; 0 ; 0 ; 0 ; t")
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInteger { field: "cost", .. }));
    }

    #[test]
    fn test_unknown_type_and_keyword() {
        let err = CardCatalog::parse("1 ; X ; spell ; 1 ; 2 ; 1 ; ------ ; 0 ; 0 ; 0 ; t")
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCardType { .. }));

        let err = CardCatalog::parse("1 ; X ; creature ; 1 ; 2 ; 1 ; --Z--- ; 0 ; 0 ; 0 ; t")
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownKeyword { code: 'Z', .. }));
    }

    #[test]
    fn test_duplicate_id() {
        let text = "1 ; A ; creature ; 1 ; 1 ; 1 ; ------ ; 0 ; 0 ; 0 ; a\n\
                    1 ; B ; creature ; 1 ; 1 ; 1 ; ------ ; 0 ; 0 ; 0 ; b";
        let err = CardCatalog::parse(text).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { line: 2, id: 1 }));
    }

    #[test]
    fn test_parse_full_requires_160() {
        let err = CardCatalog::parse_full(SAMPLE).unwrap_err();
        assert!(matches!(err, CatalogError::RecordCount { expected: 160, found: 3 }));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_from_templates_duplicate_panics() {
        let a = CardTemplate::creature(CardId::new(1), "A", 1, 1, 1);
        let b = CardTemplate::creature(CardId::new(1), "B", 1, 1, 1);
        let _ = CardCatalog::from_templates(vec![a, b]);
    }
}
