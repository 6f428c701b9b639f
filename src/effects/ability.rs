//! Rarity-driven abilities.
//!
//! Every rarity maps to one concrete ability, except Limited, which resolves
//! into two of the other five chosen from the card's id.
//!
//! | Rarity    | Ability          | Target       | Magnitude                        |
//! |-----------|------------------|--------------|----------------------------------|
//! | Common    | `Weaken`         | enemy card   | -25% of target OVR to modifier   |
//! | Uncommon  | `PowerToHealth`  | self         | +50% of source OVR to health     |
//! | Rare      | `DirectDamage`   | enemy player | 20% of source OVR                |
//! | Epic      | `IncreasePower`  | ally card    | +50% of target OVR to modifier   |
//! | Legendary | `Lock`           | enemy card   | lock; source modifier -= 100% of target OVR |
//! | Limited   | two of the above | per ability  |                                  |

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::cards::{Card, CardId, Rarity};

/// Golden-ratio conjugate, used to spread the second Limited slot.
const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

/// The concrete ability kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    Weaken,
    PowerToHealth,
    DirectDamage,
    IncreasePower,
    Lock,
}

/// Who an ability lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTarget {
    /// The card that owns the ability.
    SelfCard,
    /// Any card on the owner's field, the source included.
    Ally,
    /// Any card on the enemy field.
    Enemy,
    /// The enemy side's health pool.
    EnemyPlayer,
}

impl AbilityTarget {
    /// Whether resolution needs a card chosen from a pool.
    #[must_use]
    pub const fn needs_card_choice(self) -> bool {
        matches!(self, AbilityTarget::Ally | AbilityTarget::Enemy)
    }
}

impl AbilityKind {
    /// Kinds a Limited card can roll, indexed by slot.
    pub const COMPOSABLE: [AbilityKind; 5] = [
        AbilityKind::Weaken,
        AbilityKind::PowerToHealth,
        AbilityKind::DirectDamage,
        AbilityKind::IncreasePower,
        AbilityKind::Lock,
    ];

    /// The ability granted by a single-ability rarity. `None` for Limited.
    #[must_use]
    pub const fn for_rarity(rarity: Rarity) -> Option<Self> {
        match rarity {
            Rarity::Common => Some(AbilityKind::Weaken),
            Rarity::Uncommon => Some(AbilityKind::PowerToHealth),
            Rarity::Rare => Some(AbilityKind::DirectDamage),
            Rarity::Epic => Some(AbilityKind::IncreasePower),
            Rarity::Legendary => Some(AbilityKind::Lock),
            Rarity::Limited => None,
        }
    }

    #[must_use]
    pub const fn default_target(self) -> AbilityTarget {
        match self {
            AbilityKind::Weaken | AbilityKind::Lock => AbilityTarget::Enemy,
            AbilityKind::PowerToHealth => AbilityTarget::SelfCard,
            AbilityKind::DirectDamage => AbilityTarget::EnemyPlayer,
            AbilityKind::IncreasePower => AbilityTarget::Ally,
        }
    }

    /// Magnitude in percent of the relevant OVR.
    #[must_use]
    pub const fn percent(self) -> i64 {
        match self {
            AbilityKind::Weaken => 25,
            AbilityKind::PowerToHealth => 50,
            AbilityKind::DirectDamage => 20,
            AbilityKind::IncreasePower => 50,
            AbilityKind::Lock => 100,
        }
    }
}

impl std::fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AbilityKind::Weaken => "Weaken",
            AbilityKind::PowerToHealth => "Power to Health",
            AbilityKind::DirectDamage => "Direct Damage",
            AbilityKind::IncreasePower => "Increase Power",
            AbilityKind::Lock => "Lock",
        };
        f.write_str(name)
    }
}

/// One ability ready to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEffect {
    pub kind: AbilityKind,
    pub target: AbilityTarget,
    /// Percent of the relevant OVR.
    pub value: i64,
    /// Turns the effect lasts; transient state is cleansed at turn start.
    pub duration: u32,
}

impl AbilityEffect {
    /// Effect with the kind's standard target and magnitude.
    #[must_use]
    pub const fn new(kind: AbilityKind) -> Self {
        Self {
            kind,
            target: kind.default_target(),
            value: kind.percent(),
            duration: 1,
        }
    }

    /// Same effect aimed at a different target class.
    #[must_use]
    pub const fn with_target(mut self, target: AbilityTarget) -> Self {
        self.target = target;
        self
    }

    /// `value` percent of `ovr`, floored.
    #[must_use]
    pub fn magnitude(&self, ovr: i64) -> i64 {
        (ovr * self.value).div_euclid(100)
    }
}

/// Map a card id to the two distinct slots of a Limited composite.
///
/// Slot 1 is the id's character-code sum modulo 5. Slot 2 rescales the same
/// sum by the golden ratio; a collision with slot 1 moves to the next slot.
#[must_use]
pub fn limited_slots(id: CardId) -> (usize, usize) {
    let n = AbilityKind::COMPOSABLE.len();
    let hash = id.char_code_sum();

    let first = (hash % n as u64) as usize;
    let scaled = ((hash as f64 * GOLDEN_RATIO_CONJUGATE).fract() * n as f64) as usize;
    let second = scaled.min(n - 1);
    let second = if second == first { (first + 1) % n } else { second };

    (first, second)
}

/// The effects a card resolves when played.
#[must_use]
pub fn card_ability(card: &Card) -> SmallVec<[AbilityEffect; 2]> {
    match AbilityKind::for_rarity(card.rarity) {
        Some(kind) => smallvec![AbilityEffect::new(kind)],
        None => {
            let (first, second) = limited_slots(card.id);
            smallvec![
                AbilityEffect::new(AbilityKind::COMPOSABLE[first]),
                AbilityEffect::new(AbilityKind::COMPOSABLE[second]),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::tests::card;
    use crate::cards::Sector;

    #[test]
    fn test_rarity_table() {
        let cases = [
            (Rarity::Common, AbilityKind::Weaken, AbilityTarget::Enemy),
            (Rarity::Uncommon, AbilityKind::PowerToHealth, AbilityTarget::SelfCard),
            (Rarity::Rare, AbilityKind::DirectDamage, AbilityTarget::EnemyPlayer),
            (Rarity::Epic, AbilityKind::IncreasePower, AbilityTarget::Ally),
            (Rarity::Legendary, AbilityKind::Lock, AbilityTarget::Enemy),
        ];

        for (rarity, kind, target) in cases {
            let effects = card_ability(&card(1, 50, rarity, Sector::Energy));
            assert_eq!(effects.len(), 1);
            assert_eq!(effects[0].kind, kind);
            assert_eq!(effects[0].target, target);
        }
    }

    #[test]
    fn test_limited_resolves_two_distinct_effects() {
        for serial in 0..200 {
            let mut c = card(serial, 50, Rarity::Limited, Sector::Energy);
            c.id = CardId::new(serial, serial.wrapping_mul(7919) & 0xF_FFFF);

            let effects = card_ability(&c);
            assert_eq!(effects.len(), 2);
            assert_ne!(effects[0].kind, effects[1].kind);
        }
    }

    #[test]
    fn test_limited_is_deterministic_per_id() {
        let id = CardId::new(42, 0x1f2e3);
        assert_eq!(limited_slots(id), limited_slots(id));

        let (first, _) = limited_slots(id);
        assert_eq!(first as u64, id.char_code_sum() % 5);
    }

    #[test]
    fn test_magnitude_floors() {
        assert_eq!(AbilityEffect::new(AbilityKind::Weaken).magnitude(60), 15);
        assert_eq!(AbilityEffect::new(AbilityKind::Weaken).magnitude(61), 15);
        assert_eq!(AbilityEffect::new(AbilityKind::PowerToHealth).magnitude(41), 20);
        assert_eq!(AbilityEffect::new(AbilityKind::DirectDamage).magnitude(99), 19);
        assert_eq!(AbilityEffect::new(AbilityKind::Lock).magnitude(33), 33);
    }
}
