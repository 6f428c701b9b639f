//! # stock-ccg
//!
//! A turn-based card battle engine. Cards are built from market-instrument
//! metadata (price, market cap, volume) and fight for a human against a
//! simulated opponent.
//!
//! ## Design Principles
//!
//! 1. **Synchronous Engine**: Commands return immediately and push
//!    `GameEvent`s. Hosts drain the events and apply `Pacing` pauses
//!    themselves.
//!
//! 2. **Reject, Don't Corrupt**: Every fallible command returns
//!    `Result<_, GameError>` and validates before it mutates.
//!
//! 3. **Deterministic**: A seed fixes deck contents, shuffles and random
//!    ability targets.
//!
//! ## Architecture
//!
//! - **Card Arena**: Cards live in one id-keyed map; hands, decks and
//!   fields hold ids.
//!
//! - **Persistent Data Structures**: O(1) state snapshots via `im-rs`.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, configuration, errors and match state
//! - `cards`: Card data, sectors, OVR, reference table and factory
//! - `zones`: Deck shuffling and drawing
//! - `effects`: Rarity abilities, targeting and resolution
//! - `combat`: Damage, previews and the direct-damage gate
//! - `game`: State manager, player commands, opponent and events

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod combat;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    CardStore, Difficulty, GameError, GamePhase, GameRng, GameState, MatchConfig,
    MatchConfigBuilder, Pacing, Side, SideMap, TurnPhase,
};

pub use crate::cards::{calculate_ovr, Card, CardFactory, CardId, CardStats, Rarity, Sector};

pub use crate::zones::{draw_cards, shuffle_array, Zone};

pub use crate::effects::{
    card_ability, AbilityEffect, AbilityKind, AbilityLogEntry, AbilityTarget, AnimationType,
    PendingAbility,
};

pub use crate::combat::{calculate_damage, combat_preview, Advantage, CombatPreview, CombatResult};

pub use crate::game::{
    run_opponent_turn, AvailableActions, GameEvent, GameStateManager, GreedyOpponent,
    OpponentPolicy,
};
