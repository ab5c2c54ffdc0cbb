//! Keyword abilities.
//!
//! The six keywords and a compact set type over them. The canonical order
//! (`B C D G L W`) is the order used by the catalog format and the native
//! text protocol.

use serde::{Deserialize, Serialize};

/// A keyword ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Excess combat damage carries over to the defending player.
    Breakthrough,
    /// May attack the turn it is summoned.
    Charge,
    /// Heals its controller by the combat damage it deals.
    Drain,
    /// Attacks into its lane must target Guard creatures first.
    Guard,
    /// Any nonzero damage it deals to a creature is fatal.
    Lethal,
    /// Absorbs the next instance of damage, then is removed.
    Ward,
}

impl Keyword {
    /// All keywords in canonical order.
    pub const ALL: [Keyword; 6] = [
        Keyword::Breakthrough,
        Keyword::Charge,
        Keyword::Drain,
        Keyword::Guard,
        Keyword::Lethal,
        Keyword::Ward,
    ];

    /// Single-letter code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Keyword::Breakthrough => 'B',
            Keyword::Charge => 'C',
            Keyword::Drain => 'D',
            Keyword::Guard => 'G',
            Keyword::Lethal => 'L',
            Keyword::Ward => 'W',
        }
    }

    /// Parse a single-letter code.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of keywords.
///
/// ```
/// use locm_engine::cards::{Keyword, Keywords};
///
/// let kw: Keywords = "B-D--W".parse().unwrap();
///
/// assert!(kw.contains(Keyword::Breakthrough));
/// assert!(kw.contains(Keyword::Ward));
/// assert!(!kw.contains(Keyword::Guard));
/// assert_eq!(kw.to_string(), "B-D--W");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keywords(u8);

impl Keywords {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn contains(self, keyword: Keyword) -> bool {
        self.0 & keyword.bit() != 0
    }

    pub fn insert(&mut self, keyword: Keyword) {
        self.0 |= keyword.bit();
    }

    pub fn remove(&mut self, keyword: Keyword) {
        self.0 &= !keyword.bit();
    }

    #[must_use]
    pub fn union(self, other: Keywords) -> Keywords {
        Keywords(self.0 | other.0)
    }

    #[must_use]
    pub fn difference(self, other: Keywords) -> Keywords {
        Keywords(self.0 & !other.0)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over contained keywords in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Keyword> {
        Keyword::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<Keyword> for Keywords {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        let mut set = Keywords::empty();
        for keyword in iter {
            set.insert(keyword);
        }
        set
    }
}

impl std::str::FromStr for Keywords {
    type Err = char;

    /// Parse a keyword string such as `"B-C---"`. `-` is a placeholder and
    /// letters may appear at any position. Returns the offending character
    /// on failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|&c| c != '-')
            .map(|c| Keyword::from_code(c).ok_or(c))
            .collect()
    }
}

impl std::fmt::Display for Keywords {
    /// Six-character form, one slot per keyword in canonical order.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for keyword in Keyword::ALL {
            let c = if self.contains(keyword) { keyword.code() } else { '-' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_code(keyword.code()), Some(keyword));
        }
        assert_eq!(Keyword::from_code('X'), None);
    }

    #[test]
    fn test_parse_catalog_form() {
        // Catalog strings use five or six slots and any letter order.
        let kw: Keywords = "B-C--".parse().unwrap();
        assert!(kw.contains(Keyword::Breakthrough));
        assert!(kw.contains(Keyword::Charge));
        assert_eq!(kw.iter().count(), 2);

        let none: Keywords = "------".parse().unwrap();
        assert!(none.is_empty());

        assert_eq!("--Q---".parse::<Keywords>(), Err('Q'));
    }

    #[test]
    fn test_set_operations() {
        let guard_ward: Keywords = [Keyword::Guard, Keyword::Ward].into_iter().collect();
        let ward_lethal: Keywords = [Keyword::Ward, Keyword::Lethal].into_iter().collect();

        assert_eq!(guard_ward.union(ward_lethal).to_string(), "---GLW");
        assert_eq!(guard_ward.difference(ward_lethal).to_string(), "---G--");
    }

    #[test]
    fn test_insert_remove() {
        let mut kw = Keywords::empty();
        kw.insert(Keyword::Ward);
        assert!(kw.contains(Keyword::Ward));

        kw.remove(Keyword::Ward);
        assert!(kw.is_empty());

        // Removing an absent keyword is a no-op
        kw.remove(Keyword::Drain);
        assert!(kw.is_empty());
    }
}
