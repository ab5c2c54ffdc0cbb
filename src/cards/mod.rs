//! Card system: templates, instances, keywords and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for catalog templates
//! - `CardKind`: Closed set of variants (creature, green/red/blue item)
//! - `CardTemplate`: Immutable catalog entry
//! - `CardInstance`: A template cloned into play with its own `InstanceId`
//! - `Keywords`: Set over the six keyword abilities
//! - `CardCatalog`: Ordered template list with id lookup

pub mod catalog;
pub mod definition;
pub mod instance;
pub mod keywords;

pub use catalog::{CardCatalog, CATALOG_SIZE};
pub use definition::{CardId, CardKind, CardTemplate};
pub use instance::{CardInstance, CombatState, Hit, InstanceKind};
pub use keywords::{Keyword, Keywords};
