//! Procedural card generation.
//!
//! The factory owns the serial counter for card ids; all randomness comes
//! from the injected `GameRng`, so the same seed and call sequence always
//! produces the same cards.

use strum::{EnumCount, IntoEnumIterator};

use super::card::{Card, CardId, Rarity};
use super::ovr::calculate_ovr;
use super::reference::{self, ROSTER};
use super::sector::Sector;
use crate::core::GameRng;

/// Largest random suffix mixed into a card id.
const ID_SUFFIX_MAX: i64 = 0xF_FFFF;

/// Builds cards and decks.
#[derive(Clone, Debug, Default)]
pub struct CardFactory {
    next_serial: u32,
}

impl CardFactory {
    pub const DEFAULT_DECK_SIZE: usize = 60;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards generated so far.
    #[must_use]
    pub fn generated(&self) -> u32 {
        self.next_serial
    }

    fn alloc_id(&mut self, rng: &mut GameRng) -> CardId {
        let serial = self.next_serial;
        self.next_serial += 1;
        let suffix = rng.random_int(0, ID_SUFFIX_MAX) as u32;
        CardId::new(serial, suffix)
    }

    /// Build the card for a specific symbol.
    ///
    /// Unknown symbols get zeroed stats, the fallback sector and the symbol
    /// as their name.
    pub fn card_for_symbol(&mut self, rng: &mut GameRng, symbol: &str) -> Card {
        let record = reference::lookup(symbol);
        let stats = record.map(|r| r.stats()).unwrap_or_default();
        let sector = record.map_or(Sector::FALLBACK, |r| r.sector());
        let name = record.map_or_else(|| symbol.to_string(), |r| r.name.to_string());
        let ovr = calculate_ovr(&stats);

        let beats = sector.beats();
        let strong_against = rng.choose(&beats).copied().unwrap_or(beats[0]);
        let predators = sector.loses_to();
        let resistant_to = rng.choose(&predators).copied().unwrap_or(sector);
        let rarity = random_rarity(rng);
        let id = self.alloc_id(rng);

        Card {
            id,
            symbol: symbol.to_string(),
            name,
            stats,
            ovr,
            rarity,
            sector,
            strong_against,
            resistant_to,
            current_health: ovr,
            power_modifier: 0,
            is_locked: false,
        }
    }

    /// Build a card from a random roster symbol.
    pub fn generate_random_card(&mut self, rng: &mut GameRng) -> Card {
        let symbol = rng.choose(ROSTER).copied().unwrap_or("AAPL");
        self.card_for_symbol(rng, symbol)
    }

    /// Build `count` random cards.
    pub fn generate_deck(&mut self, rng: &mut GameRng, count: usize) -> Vec<Card> {
        (0..count).map(|_| self.generate_random_card(rng)).collect()
    }
}

/// Uniform over all six tiers.
fn random_rarity(rng: &mut GameRng) -> Rarity {
    let idx = rng.index(Rarity::COUNT).unwrap_or(0);
    Rarity::iter().nth(idx).unwrap_or(Rarity::Common)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ovr::{MAX_OVR, MIN_OVR};

    #[test]
    fn test_generated_card_invariants() {
        let mut rng = GameRng::new(42);
        let mut factory = CardFactory::new();

        for card in factory.generate_deck(&mut rng, 200) {
            assert!((MIN_OVR..=MAX_OVR).contains(&card.ovr));
            assert_eq!(card.current_health, card.ovr);
            assert_eq!(card.power_modifier, 0);
            assert!(!card.is_locked);
            assert!(card.sector.beats().contains(&card.strong_against));
            assert!(card.sector.loses_to().contains(&card.resistant_to));
            assert!(ROSTER.contains(&card.symbol.as_str()));
        }
        assert_eq!(factory.generated(), 200);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = GameRng::new(1);
        let mut factory = CardFactory::new();
        let deck = factory.generate_deck(&mut rng, 120);

        let mut ids: Vec<_> = deck.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 120);
    }

    #[test]
    fn test_deterministic_decks() {
        let deck_a = CardFactory::new().generate_deck(&mut GameRng::new(7), 60);
        let deck_b = CardFactory::new().generate_deck(&mut GameRng::new(7), 60);
        assert_eq!(deck_a, deck_b);

        let deck_c = CardFactory::new().generate_deck(&mut GameRng::new(8), 60);
        assert_ne!(deck_a, deck_c);
    }

    #[test]
    fn test_unknown_symbol_card() {
        let mut rng = GameRng::new(3);
        let card = CardFactory::new().card_for_symbol(&mut rng, "NOPE");

        assert_eq!(card.ovr, MIN_OVR);
        assert_eq!(card.sector, Sector::FALLBACK);
        assert_eq!(card.name, "NOPE");
    }

    #[test]
    fn test_all_rarities_appear() {
        let mut rng = GameRng::new(11);
        let deck = CardFactory::new().generate_deck(&mut rng, 300);

        for rarity in Rarity::iter() {
            assert!(deck.iter().any(|c| c.rarity == rarity), "{rarity} never rolled");
        }
    }
}
