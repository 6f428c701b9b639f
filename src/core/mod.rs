//! Core match types: sides, RNG, configuration, errors and state.
//!
//! Everything here is independent of how a turn is played; the turn loop
//! lives in `game`.

pub mod config;
pub mod error;
pub mod rng;
pub mod side;
pub mod state;

pub use config::{Difficulty, MatchConfig, MatchConfigBuilder, Pacing};
pub use error::GameError;
pub use rng::GameRng;
pub use side::{Side, SideMap};
pub use state::{CardStore, GamePhase, GameState, TurnPhase};
