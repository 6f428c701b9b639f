//! Card system: card data, sectors, OVR, reference table and factory.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a card in a match
//! - `Card`: Runtime card state (health, modifier, lock)
//! - `Sector`: Market category with a directed advantage table
//! - `Rarity`: Tier that selects the card's ability
//! - `CardFactory`: Deterministic card and deck generation

pub mod card;
pub mod factory;
pub mod ovr;
pub mod reference;
pub mod sector;

pub use card::{Card, CardId, CardStats, Rarity};
pub use factory::CardFactory;
pub use ovr::{calculate_ovr, MAX_OVR, MIN_OVR};
pub use reference::{generate_random_stats, StockRecord, ROSTER, STOCK_TABLE};
pub use sector::Sector;
