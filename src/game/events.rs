//! Events emitted by the state manager.
//!
//! The host drains these after each command, renders them in order and
//! consults `Pacing::pause_after` between them.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::combat::CombatResult;
use crate::core::{Difficulty, Side, TurnPhase};
use crate::effects::AbilityLogEntry;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted {
        seed: u64,
        difficulty: Difficulty,
    },
    TurnStarted {
        side: Side,
        turn: u32,
    },
    PhaseChanged {
        side: Side,
        phase: TurnPhase,
    },
    CardDrawn {
        side: Side,
        card: CardId,
    },
    CardsPlayed {
        side: Side,
        cards: Vec<CardId>,
        cost: i64,
    },
    AbilityResolved(AbilityLogEntry),
    Attack(CombatResult),
    CardDamaged {
        side: Side,
        card: CardId,
        damage: i64,
        remaining: i64,
    },
    CardDestroyed {
        side: Side,
        card: CardId,
    },
    PlayerDamaged {
        side: Side,
        damage: i64,
        remaining: i64,
    },
    TurnEnded {
        side: Side,
        /// Unspent credits turned into health.
        credits_converted: i64,
    },
    GameOver {
        winner: Side,
    },
}
