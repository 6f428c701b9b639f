//! Ability system for card rarities.
//!
//! - `ability`: Rarity → ability table and the Limited composite
//! - `targeting`: Legal target pools and manual targeting requests
//! - `resolver`: Applying effects and batch-processing played cards

pub mod ability;
pub mod resolver;
pub mod targeting;

pub use ability::{card_ability, limited_slots, AbilityEffect, AbilityKind, AbilityTarget};
pub use resolver::{
    apply_ability_effect, process_card_abilities, AbilityContext, AbilityError, AbilityLogEntry,
    AnimationType,
};
pub use targeting::{legal_targets, PendingAbility};
