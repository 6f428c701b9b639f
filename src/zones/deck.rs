//! Deck and hand operations.
//!
//! Decks are ordered with the top at the end of the sequence, so drawing
//! pops from the back.

use im::Vector;

use crate::cards::CardId;
use crate::core::GameRng;

/// An ordered sequence of card ids (deck, hand or field).
pub type Zone = Vector<CardId>;

/// Shuffle `items` with the shared RNG and return them.
///
/// Deterministic for a given RNG state; not suitable for anything that
/// needs unpredictability.
pub fn shuffle_array<T>(rng: &mut GameRng, mut items: Vec<T>) -> Vec<T> {
    rng.shuffle(&mut items);
    items
}

/// Pop up to `count` cards from the top of `deck`.
///
/// Draws fewer (possibly none) if the deck runs short. Cards are returned
/// in the order they were drawn.
pub fn draw_cards<T: Clone>(deck: &mut Vector<T>, count: usize) -> Vec<T> {
    let mut drawn = Vec::with_capacity(count.min(deck.len()));
    for _ in 0..count {
        match deck.pop_back() {
            Some(card) => drawn.push(card),
            None => break,
        }
    }
    drawn
}
