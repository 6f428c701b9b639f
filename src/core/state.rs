//! Match state.
//!
//! ## Ownership
//!
//! Cards live in a single id-keyed arena (`cards`). Hands, decks and fields
//! are ordered id sequences that point into it, so a card is only ever
//! mutated through the arena no matter which zone it sits in.
//!
//! Uses `im` persistent collections so `GameStateManager::game_state()` can
//! hand out snapshots in O(1).

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::Difficulty;
use super::side::{Side, SideMap};
use crate::cards::{Card, CardId};
use crate::effects::PendingAbility;
use crate::zones::Zone;

/// Flat card arena keyed by id.
pub type CardStore = im::HashMap<CardId, Card>;

/// Step within a turn. Cycles Draw → Main → Combat → End.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Draw,
    Main,
    Combat,
    End,
}

impl TurnPhase {
    /// The phase that nominally follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            TurnPhase::Draw => TurnPhase::Main,
            TurnPhase::Main => TurnPhase::Combat,
            TurnPhase::Combat => TurnPhase::End,
            TurnPhase::End => TurnPhase::Draw,
        }
    }
}

/// Whether the match is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    GameOver { winner: Side },
}

/// Complete match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub difficulty: Difficulty,

    /// Health per side. Reaching zero loses the match.
    pub health: SideMap<i64>,

    /// Spendable credits per side.
    pub credits: SideMap<i64>,

    /// Turn number (starts at 1).
    pub current_turn: u32,

    /// Side whose turn it is.
    pub active: Side,

    pub hands: SideMap<Zone>,

    /// Top of deck = end of sequence.
    pub decks: SideMap<Zone>,

    pub fields: SideMap<Zone>,

    pub cards: CardStore,

    pub game_phase: GamePhase,
    pub turn_phase: TurnPhase,

    pub can_attack_this_turn: bool,

    /// Cards that already attacked in the current combat phase.
    pub attacked_this_combat_phase: FxHashSet<CardId>,

    /// Played cards whose abilities have not resolved yet.
    pub unresolved_abilities: FxHashSet<CardId>,

    /// Human ability waiting for a manual target.
    pub pending_ability: Option<PendingAbility>,

    /// Last manually selected ability target.
    pub selected_target_id: Option<CardId>,
}

impl GameState {
    /// Empty state: no cards, zero health and credits, turn 1 main phase.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            health: SideMap::with_value(0),
            credits: SideMap::with_value(0),
            current_turn: 1,
            active: Side::Player,
            hands: SideMap::with_default(),
            decks: SideMap::with_default(),
            fields: SideMap::with_default(),
            cards: CardStore::new(),
            game_phase: GamePhase::Playing,
            turn_phase: TurnPhase::Main,
            can_attack_this_turn: false,
            attacked_this_combat_phase: FxHashSet::default(),
            unresolved_abilities: FxHashSet::default(),
            pending_ability: None,
            selected_target_id: None,
        }
    }

    #[must_use]
    pub fn player_health(&self) -> i64 {
        self.health[Side::Player]
    }

    #[must_use]
    pub fn opponent_health(&self) -> i64 {
        self.health[Side::Opponent]
    }

    #[must_use]
    pub fn player_credits(&self) -> i64 {
        self.credits[Side::Player]
    }

    #[must_use]
    pub fn opponent_credits(&self) -> i64 {
        self.credits[Side::Opponent]
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.game_phase == GamePhase::Playing
    }

    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self.game_phase {
            GamePhase::GameOver { winner } => Some(winner),
            GamePhase::Playing => None,
        }
    }

    // === Cards ===

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    /// Put a card in the arena without placing it in any zone.
    pub fn insert_card(&mut self, card: Card) {
        self.cards.insert(card.id, card);
    }

    /// Cards on a side's field, in play order.
    pub fn field_cards(&self, side: Side) -> impl Iterator<Item = &Card> + '_ {
        self.fields[side].iter().filter_map(move |id| self.cards.get(id))
    }

    /// Cards in a side's hand, in hand order.
    pub fn hand_cards(&self, side: Side) -> impl Iterator<Item = &Card> + '_ {
        self.hands[side].iter().filter_map(move |id| self.cards.get(id))
    }

    #[must_use]
    pub fn is_on_field(&self, side: Side, id: CardId) -> bool {
        self.fields[side].contains(&id)
    }

    #[must_use]
    pub fn is_in_hand(&self, side: Side, id: CardId) -> bool {
        self.hands[side].contains(&id)
    }

    /// Remove a card from a side's field. Returns true if it was there.
    pub fn remove_from_field(&mut self, side: Side, id: CardId) -> bool {
        match self.fields[side].index_of(&id) {
            Some(pos) => {
                self.fields[side].remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove a card from a side's hand. Returns true if it was there.
    pub fn remove_from_hand(&mut self, side: Side, id: CardId) -> bool {
        match self.hands[side].index_of(&id) {
            Some(pos) => {
                self.hands[side].remove(pos);
                true
            }
            None => false,
        }
    }
}
