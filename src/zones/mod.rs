//! Zones: decks, hands and fields as ordered id sequences.
//!
//! Cards themselves live in the state's card arena; zones only hold ids.

pub mod deck;

pub use deck::{draw_cards, shuffle_array, Zone};
