//! Card-versus-card damage.
//!
//! All functions here are pure except `apply_combat_damage`, which only
//! touches the defender's health. Removing dead cards from a field is the
//! state manager's job.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

pub const STRONG_MULTIPLIER: f64 = 1.5;
pub const RESISTED_MULTIPLIER: f64 = 0.5;
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// How the attacker's sector matches up against the defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advantage {
    /// Attacker is strong against the defender's sector.
    Strong,
    /// Defender resists the attacker's sector.
    Resisted,
    Neutral,
}

impl Advantage {
    /// Classify a matchup. The strong check wins over the resistant check.
    #[must_use]
    pub fn of(attacker: &Card, defender: &Card) -> Self {
        if attacker.strong_against == defender.sector {
            Advantage::Strong
        } else if defender.resistant_to == attacker.sector {
            Advantage::Resisted
        } else {
            Advantage::Neutral
        }
    }

    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Advantage::Strong => STRONG_MULTIPLIER,
            Advantage::Resisted => RESISTED_MULTIPLIER,
            Advantage::Neutral => NEUTRAL_MULTIPLIER,
        }
    }

    /// Apply the multiplier to a base, flooring toward negative infinity.
    #[must_use]
    pub const fn scale(self, base: i64) -> i64 {
        match self {
            Advantage::Strong => (base * 3).div_euclid(2),
            Advantage::Resisted => base.div_euclid(2),
            Advantage::Neutral => base,
        }
    }
}

/// Outcome of one attack calculation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub attacker: CardId,
    pub defender: CardId,
    pub damage: i64,
    pub category_multiplier: f64,
}

/// Damage `attacker` deals to `defender`.
///
/// Base is OVR plus power modifier. There is no floor: a card weakened
/// below zero power deals negative damage, which heals its target.
#[must_use]
pub fn calculate_damage(attacker: &Card, defender: &Card) -> CombatResult {
    let base = attacker.effective_power();
    let advantage = Advantage::of(attacker, defender);

    CombatResult {
        attacker: attacker.id,
        defender: defender.id,
        damage: advantage.scale(base),
        category_multiplier: advantage.multiplier(),
    }
}

/// Subtract the result's damage from the defender's health.
pub fn apply_combat_damage(result: &CombatResult, defender: &mut Card) {
    debug_assert_eq!(result.defender, defender.id);
    defender.current_health -= result.damage;
}

/// Whether an attack may go straight to the enemy side's health.
///
/// True when the enemy field is empty or every card on it is locked.
pub fn can_apply_direct_damage<'a>(enemy_field: impl IntoIterator<Item = &'a Card>) -> bool {
    enemy_field.into_iter().all(|card| card.is_locked)
}

/// Pre-commit view of an attack for display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatPreview {
    pub damage: i64,
    pub multiplier: f64,
    pub advantage: Advantage,
    /// Defender health after the hit.
    pub remaining_health: i64,
    pub is_lethal: bool,
}

/// Same numbers as `calculate_damage`, without touching anything.
#[must_use]
pub fn combat_preview(attacker: &Card, defender: &Card) -> CombatPreview {
    let result = calculate_damage(attacker, defender);
    let remaining_health = defender.current_health - result.damage;

    CombatPreview {
        damage: result.damage,
        multiplier: result.category_multiplier,
        advantage: Advantage::of(attacker, defender),
        remaining_health,
        is_lethal: remaining_health <= 0,
    }
}
