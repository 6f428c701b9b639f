//! Match flow on top of the pure card, effect and combat modules.
//!
//! - `manager`: `GameStateManager`, the turn/phase loop and economy
//! - `actions`: Player commands (play, abilities, targeting, attacks)
//! - `opponent`: The simulated opponent's turn
//! - `events`: The event stream hosts render and pace

pub mod actions;
pub mod events;
pub mod manager;
pub mod opponent;

pub use actions::AvailableActions;
pub use events::GameEvent;
pub use manager::GameStateManager;
pub use opponent::{run_opponent_turn, run_opponent_turn_with, AttackChoice, GreedyOpponent, OpponentPolicy};
