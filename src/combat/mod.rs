//! Combat system: damage with sector multipliers, previews and the
//! direct-damage gate.
//!
//! Ability resolution lives in `effects`; both are pure with respect to
//! match flow and never remove cards from fields.

pub mod damage;

pub use damage::{
    apply_combat_damage, calculate_damage, can_apply_direct_damage, combat_preview, Advantage,
    CombatPreview, CombatResult,
};
