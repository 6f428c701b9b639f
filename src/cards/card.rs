//! Battle cards - runtime card state.
//!
//! A `Card` is built once by the factory from a symbol's static stats and
//! then mutated during play: health drops from combat, the power modifier
//! and lock flag are transient and cleansed at every turn start.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

use super::sector::Sector;

/// Unique identifier for a card in a match.
///
/// Combines the factory's incrementing serial (high 32 bits) with a random
/// suffix (low 32 bits). Rendered as `card-<serial>-<suffix hex>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl CardId {
    /// Create a card ID from its parts.
    #[must_use]
    pub const fn new(serial: u32, suffix: u32) -> Self {
        Self(((serial as u64) << 32) | suffix as u64)
    }

    #[must_use]
    pub const fn serial(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[must_use]
    pub const fn suffix(self) -> u32 {
        self.0 as u32
    }

    /// Sum of the character codes of the rendered id.
    ///
    /// Seeds the Limited composite ability selection.
    #[must_use]
    pub fn char_code_sum(self) -> u64 {
        self.to_string().bytes().map(u64::from).sum()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card-{}-{:05x}", self.serial(), self.suffix())
    }
}

/// Rarity tier. Determines the ability a card grants when played.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Limited,
}

/// Market statistics a card is derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardStats {
    pub price: f64,
    pub market_cap: f64,
    pub volume: f64,
}

/// A battle card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: String,
    pub name: String,
    pub stats: CardStats,

    /// Power rating in `[10, 100]`. Doubles as the cost to play.
    pub ovr: i64,

    pub rarity: Rarity,
    pub sector: Sector,

    /// Attacks against this sector deal 1.5x damage.
    pub strong_against: Sector,

    /// Attacks from this sector deal 0.5x damage to this card.
    pub resistant_to: Sector,

    /// Starts at `ovr`. The card leaves the field at zero or below.
    pub current_health: i64,

    /// Transient power adjustment; no floor. Reset at turn start.
    pub power_modifier: i64,

    /// Locked cards cannot attack until the next turn start.
    pub is_locked: bool,
}

impl Card {
    /// Attack power before any sector multiplier.
    #[must_use]
    pub fn effective_power(&self) -> i64 {
        self.ovr + self.power_modifier
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Cost in credits to play this card.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.ovr
    }

    /// Clear the per-turn status (power modifier and lock).
    pub fn cleanse(&mut self) {
        self.power_modifier = 0;
        self.is_locked = false;
    }
}
