//! Market sectors and the directed advantage table.
//!
//! Each sector beats exactly four others and is beaten by exactly four
//! others. The relation is directed: if A beats B, B never beats A.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// A card's market category.
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
    EnumString,
)]
pub enum Sector {
    Technology,
    #[strum(to_string = "Communication Services")]
    CommunicationServices,
    #[strum(to_string = "Consumer Cyclical")]
    ConsumerCyclical,
    #[strum(to_string = "Consumer Defensive")]
    ConsumerDefensive,
    Energy,
    Utilities,
    Industrials,
    #[strum(to_string = "Basic Materials")]
    BasicMaterials,
    #[strum(to_string = "Real Estate")]
    RealEstate,
    #[strum(to_string = "Financial Services")]
    FinancialServices,
    Healthcare,
    Semiconductors,
}

impl Sector {
    /// Sector used when a symbol or label is missing from the reference table.
    pub const FALLBACK: Sector = Sector::Technology;

    /// Parse a reference-table sector label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }

    /// The four sectors this sector beats.
    #[must_use]
    pub const fn beats(self) -> [Sector; 4] {
        use Sector::*;
        match self {
            Technology => [CommunicationServices, ConsumerCyclical, ConsumerDefensive, Energy],
            CommunicationServices => [ConsumerCyclical, ConsumerDefensive, Energy, Utilities],
            ConsumerCyclical => [ConsumerDefensive, Energy, Utilities, Industrials],
            ConsumerDefensive => [Energy, Utilities, Industrials, BasicMaterials],
            Energy => [Utilities, Industrials, BasicMaterials, RealEstate],
            Utilities => [Industrials, BasicMaterials, RealEstate, FinancialServices],
            Industrials => [BasicMaterials, RealEstate, FinancialServices, Healthcare],
            BasicMaterials => [RealEstate, FinancialServices, Healthcare, Semiconductors],
            RealEstate => [FinancialServices, Healthcare, Semiconductors, Technology],
            FinancialServices => [Healthcare, Semiconductors, Technology, CommunicationServices],
            Healthcare => [Semiconductors, Technology, CommunicationServices, ConsumerCyclical],
            Semiconductors => [Technology, CommunicationServices, ConsumerCyclical, ConsumerDefensive],
        }
    }

    /// The four sectors that beat this sector.
    #[must_use]
    pub fn loses_to(self) -> SmallVec<[Sector; 4]> {
        Sector::iter().filter(|s| s.beats().contains(&self)).collect()
    }
}
