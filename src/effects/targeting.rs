//! Ability target pools and manual targeting requests.

use serde::{Deserialize, Serialize};

use super::ability::{AbilityKind, AbilityTarget};
use crate::cards::CardId;
use crate::core::CardStore;
use crate::zones::Zone;

/// A human ability waiting for the host to pick a target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAbility {
    /// Card whose ability is being aimed.
    pub source: CardId,
    pub kind: AbilityKind,
    pub target: AbilityTarget,
    /// Legal targets when the request was made.
    pub valid_targets: Vec<CardId>,
    /// Target picked by the host, if any.
    pub selected_target: Option<CardId>,
}

impl PendingAbility {
    #[must_use]
    pub fn is_valid_target(&self, id: CardId) -> bool {
        self.valid_targets.contains(&id)
    }

    /// The manual target for `source`'s `kind` ability, if this request
    /// covers it and a target was picked.
    #[must_use]
    pub fn manual_target_for(&self, source: CardId, kind: AbilityKind) -> Option<CardId> {
        if self.source == source && self.kind == kind {
            self.selected_target.filter(|id| self.is_valid_target(*id))
        } else {
            None
        }
    }
}

/// Live cards an ability may land on, in field order.
///
/// `SelfCard` yields the source when it is on its own field; `EnemyPlayer`
/// never yields a card.
#[must_use]
pub fn legal_targets(
    target: AbilityTarget,
    source: CardId,
    own_field: &Zone,
    enemy_field: &Zone,
    cards: &CardStore,
) -> Vec<CardId> {
    let live = |id: &&CardId| cards.get(*id).is_some_and(|c| c.is_alive());

    match target {
        AbilityTarget::SelfCard => own_field
            .iter()
            .filter(live)
            .filter(|id| **id == source)
            .copied()
            .collect(),
        AbilityTarget::Ally => own_field.iter().filter(live).copied().collect(),
        AbilityTarget::Enemy => enemy_field.iter().filter(live).copied().collect(),
        AbilityTarget::EnemyPlayer => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::tests::card;
    use crate::cards::{Rarity, Sector};

    fn setup() -> (CardStore, Zone, Zone) {
        let mut cards = CardStore::new();
        let mut own = Zone::new();
        let mut enemy = Zone::new();

        for serial in 1..=3 {
            let c = card(serial, 30, Rarity::Common, Sector::Energy);
            own.push_back(c.id);
            cards.insert(c.id, c);
        }
        for serial in 10..=11 {
            let c = card(serial, 30, Rarity::Common, Sector::Utilities);
            enemy.push_back(c.id);
            cards.insert(c.id, c);
        }

        (cards, own, enemy)
    }

    #[test]
    fn test_pools() {
        let (cards, own, enemy) = setup();
        let source = CardId::new(2, 0);

        assert_eq!(
            legal_targets(AbilityTarget::SelfCard, source, &own, &enemy, &cards),
            vec![source]
        );
        assert_eq!(legal_targets(AbilityTarget::Ally, source, &own, &enemy, &cards).len(), 3);
        assert_eq!(
            legal_targets(AbilityTarget::Enemy, source, &own, &enemy, &cards),
            vec![CardId::new(10, 0), CardId::new(11, 0)]
        );
        assert!(legal_targets(AbilityTarget::EnemyPlayer, source, &own, &enemy, &cards).is_empty());
    }

    #[test]
    fn test_dead_cards_excluded() {
        let (mut cards, own, enemy) = setup();
        cards.get_mut(&CardId::new(10, 0)).unwrap().current_health = 0;

        let pool = legal_targets(AbilityTarget::Enemy, CardId::new(1, 0), &own, &enemy, &cards);
        assert_eq!(pool, vec![CardId::new(11, 0)]);
    }

    #[test]
    fn test_manual_target_matching() {
        let pending = PendingAbility {
            source: CardId::new(1, 0),
            kind: AbilityKind::Weaken,
            target: AbilityTarget::Enemy,
            valid_targets: vec![CardId::new(10, 0)],
            selected_target: Some(CardId::new(10, 0)),
        };

        assert_eq!(
            pending.manual_target_for(CardId::new(1, 0), AbilityKind::Weaken),
            Some(CardId::new(10, 0))
        );
        assert_eq!(pending.manual_target_for(CardId::new(1, 0), AbilityKind::Lock), None);
        assert_eq!(pending.manual_target_for(CardId::new(2, 0), AbilityKind::Weaken), None);
    }
}
