//! Match configuration.
//!
//! Hosts configure a match at startup by providing:
//! - `Difficulty`: Selects the starting health of both sides
//! - `Pacing`: Pause hints for the host between engine events
//! - `MatchConfig`: Combines all configuration
//!
//! Use `MatchConfig::builder()` for anything other than the defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::GameEvent;

/// Difficulty mode. Selects starting health for both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Starting health for each side.
    #[must_use]
    pub const fn starting_health(self) -> i64 {
        match self {
            Difficulty::Easy => 1000,
            Difficulty::Normal => 600,
            Difficulty::Hard => 200,
        }
    }
}

/// UI cadence hints.
///
/// The engine never sleeps. It records events; the host looks up the pause
/// for each event here and waits it out before issuing the next command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// Pause after each card drawn in the draw phase.
    pub draw_delay: Duration,
    /// Pause after a turn ends, before the next turn is shown.
    pub end_turn_delay: Duration,
}

impl Pacing {
    pub const DEFAULT_DRAW_DELAY: Duration = Duration::from_millis(300);
    pub const DEFAULT_END_TURN_DELAY: Duration = Duration::from_millis(1000);

    /// No pauses at all (tests, headless simulation).
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            draw_delay: Duration::ZERO,
            end_turn_delay: Duration::ZERO,
        }
    }

    /// Pause the host should apply after rendering `event`, if any.
    #[must_use]
    pub fn pause_after(&self, event: &GameEvent) -> Option<Duration> {
        let delay = match event {
            GameEvent::CardDrawn { .. } => self.draw_delay,
            GameEvent::TurnEnded { .. } => self.end_turn_delay,
            _ => return None,
        };
        (!delay.is_zero()).then_some(delay)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            draw_delay: Self::DEFAULT_DRAW_DELAY,
            end_turn_delay: Self::DEFAULT_END_TURN_DELAY,
        }
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seed for deck construction, shuffling and random targeting.
    pub seed: u64,

    pub difficulty: Difficulty,

    /// Credits the human receives at the start of each of their turns.
    pub credits_per_turn: i64,

    /// Credits the simulated opponent starts the match with.
    ///
    /// Granted once and never refreshed; independent of `credits_per_turn`.
    pub opponent_credits: i64,

    /// Maximum cards a side may play in one `play_cards` call.
    pub max_cards_per_turn: usize,

    /// Hand size dealt at match start and refilled to in the draw phase.
    pub hand_size: usize,

    /// Cards per deck.
    pub deck_size: usize,

    pub pacing: Pacing,
}

impl MatchConfig {
    pub const DEFAULT_CREDITS_PER_TURN: i64 = 200;
    pub const DEFAULT_OPPONENT_CREDITS: i64 = 200;
    pub const DEFAULT_MAX_CARDS_PER_TURN: usize = 3;
    pub const DEFAULT_HAND_SIZE: usize = 7;
    pub const DEFAULT_DECK_SIZE: usize = 60;

    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::default()
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            difficulty: Difficulty::default(),
            credits_per_turn: Self::DEFAULT_CREDITS_PER_TURN,
            opponent_credits: Self::DEFAULT_OPPONENT_CREDITS,
            max_cards_per_turn: Self::DEFAULT_MAX_CARDS_PER_TURN,
            hand_size: Self::DEFAULT_HAND_SIZE,
            deck_size: Self::DEFAULT_DECK_SIZE,
            pacing: Pacing::default(),
        }
    }
}

/// Builder for `MatchConfig`.
#[derive(Clone, Debug, Default)]
pub struct MatchConfigBuilder {
    config: MatchConfig,
}

impl MatchConfigBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.config.difficulty = difficulty;
        self
    }

    pub fn credits_per_turn(mut self, credits: i64) -> Self {
        assert!(credits >= 0, "Credits per turn cannot be negative");
        self.config.credits_per_turn = credits;
        self
    }

    pub fn opponent_credits(mut self, credits: i64) -> Self {
        assert!(credits >= 0, "Opponent credits cannot be negative");
        self.config.opponent_credits = credits;
        self
    }

    pub fn max_cards_per_turn(mut self, count: usize) -> Self {
        assert!(count > 0, "Must allow at least one card per turn");
        self.config.max_cards_per_turn = count;
        self
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        self.config.hand_size = size;
        self
    }

    pub fn deck_size(mut self, size: usize) -> Self {
        self.config.deck_size = size;
        self
    }

    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.config.pacing = pacing;
        self
    }

    #[must_use]
    pub fn build(self) -> MatchConfig {
        self.config
    }
}
