//! Ability resolution - applying ability effects to match state.
//!
//! `apply_ability_effect` validates the source and target before touching
//! anything, so an `Err` leaves cards and health untouched.
//! `process_card_abilities` is the batch entry point for a set of freshly
//! played cards.

use serde::{Deserialize, Serialize};

use super::ability::{card_ability, AbilityEffect, AbilityKind, AbilityTarget};
use super::targeting::{legal_targets, PendingAbility};
use crate::cards::CardId;
use crate::core::{CardStore, GameRng};
use crate::zones::Zone;

/// Why an ability could not be applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("source card {0} not found")]
    MissingSource(CardId),

    #[error("ability needs a target card")]
    MissingTarget,

    #[error("card {0} is not a legal target")]
    IllegalTarget(CardId),
}

/// Animation hint for the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationType {
    Weaken,
    Heal,
    DirectDamage,
    PowerUp,
    Lock,
}

impl From<AbilityKind> for AnimationType {
    fn from(kind: AbilityKind) -> Self {
        match kind {
            AbilityKind::Weaken => AnimationType::Weaken,
            AbilityKind::PowerToHealth => AnimationType::Heal,
            AbilityKind::DirectDamage => AnimationType::DirectDamage,
            AbilityKind::IncreasePower => AnimationType::PowerUp,
            AbilityKind::Lock => AnimationType::Lock,
        }
    }
}

/// Record of one applied ability effect.
///
/// `old_value`/`new_value` track the number the effect changed: a power
/// modifier, a card's health, or the enemy side's health.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityLogEntry {
    pub source_card: CardId,
    pub ability: AbilityKind,
    pub target_card: Option<CardId>,
    pub description: String,
    pub old_value: i64,
    pub new_value: i64,
    pub animation: AnimationType,
}

/// Mutable view of the match an ability resolves against.
///
/// "Own" and "enemy" are from the source card's point of view.
pub struct AbilityContext<'a> {
    pub cards: &'a mut CardStore,
    pub own_field: &'a Zone,
    pub enemy_field: &'a Zone,
    pub enemy_health: &'a mut i64,
}

impl AbilityContext<'_> {
    fn pool(&self, target: AbilityTarget, source: CardId) -> Vec<CardId> {
        legal_targets(target, source, self.own_field, self.enemy_field, self.cards)
    }
}

/// Apply one effect from `source`.
///
/// `target` is required for `Ally` and `Enemy` effects and ignored
/// otherwise. The power modifier has no floor.
pub fn apply_ability_effect(
    ctx: &mut AbilityContext<'_>,
    source: CardId,
    effect: &AbilityEffect,
    target: Option<CardId>,
) -> Result<AbilityLogEntry, AbilityError> {
    let (source_ovr, source_symbol) = match ctx.cards.get(&source) {
        Some(card) => (card.ovr, card.symbol.clone()),
        None => return Err(AbilityError::MissingSource(source)),
    };

    let target_id = match effect.target {
        AbilityTarget::SelfCard => Some(source),
        AbilityTarget::EnemyPlayer => None,
        AbilityTarget::Ally | AbilityTarget::Enemy => {
            let id = target.ok_or(AbilityError::MissingTarget)?;
            if !ctx.pool(effect.target, source).contains(&id) {
                return Err(AbilityError::IllegalTarget(id));
            }
            Some(id)
        }
    };

    let entry = |old_value: i64, new_value: i64, description: String| AbilityLogEntry {
        source_card: source,
        ability: effect.kind,
        target_card: target_id,
        description,
        old_value,
        new_value,
        animation: effect.kind.into(),
    };

    if effect.target == AbilityTarget::EnemyPlayer {
        let damage = effect.magnitude(source_ovr);
        let old = *ctx.enemy_health;
        *ctx.enemy_health -= damage;
        return Ok(entry(
            old,
            *ctx.enemy_health,
            format!("{source_symbol} deals {damage} direct damage"),
        ));
    }

    let target_id = target_id.ok_or(AbilityError::MissingTarget)?;
    let target = ctx
        .cards
        .get_mut(&target_id)
        .ok_or(AbilityError::IllegalTarget(target_id))?;
    let target_ovr = target.ovr;
    let target_symbol = target.symbol.clone();

    let logged = match effect.kind {
        AbilityKind::Weaken => {
            let amount = effect.magnitude(target_ovr);
            let old = target.power_modifier;
            target.power_modifier -= amount;
            entry(
                old,
                target.power_modifier,
                format!("{source_symbol} weakens {target_symbol} by {amount}"),
            )
        }
        AbilityKind::IncreasePower => {
            let amount = effect.magnitude(target_ovr);
            let old = target.power_modifier;
            target.power_modifier += amount;
            entry(
                old,
                target.power_modifier,
                format!("{source_symbol} boosts {target_symbol} by {amount}"),
            )
        }
        AbilityKind::PowerToHealth => {
            let amount = effect.magnitude(source_ovr);
            let old = target.current_health;
            target.current_health += amount;
            entry(
                old,
                target.current_health,
                format!("{source_symbol} converts power into {amount} health for {target_symbol}"),
            )
        }
        AbilityKind::DirectDamage => {
            let damage = effect.magnitude(source_ovr);
            let old = target.current_health;
            target.current_health -= damage;
            entry(
                old,
                target.current_health,
                format!("{source_symbol} hits {target_symbol} for {damage}"),
            )
        }
        AbilityKind::Lock => {
            target.is_locked = true;
            let cost = effect.magnitude(target_ovr);
            let source_card = ctx
                .cards
                .get_mut(&source)
                .ok_or(AbilityError::MissingSource(source))?;
            let old = source_card.power_modifier;
            source_card.power_modifier -= cost;
            entry(
                old,
                source_card.power_modifier,
                format!("{source_symbol} locks {target_symbol}, paying {cost} power"),
            )
        }
    };

    Ok(logged)
}

/// Resolve the abilities of freshly played cards.
///
/// Each card's effects are resolved in order; a Limited card resolves both of
/// its effects even if the first fails. Card targets come from `pending`
/// when it covers the effect, otherwise uniformly at random from the legal
/// pool. Effects with an empty pool are skipped without a log entry.
pub fn process_card_abilities(
    ctx: &mut AbilityContext<'_>,
    rng: &mut GameRng,
    played: &[CardId],
    pending: Option<&PendingAbility>,
) -> Vec<AbilityLogEntry> {
    let mut log = Vec::new();

    for &source in played {
        let Some(card) = ctx.cards.get(&source) else {
            tracing::debug!(%source, "played card missing from arena, skipping ability");
            continue;
        };

        for effect in card_ability(card) {
            let target = if effect.target.needs_card_choice() {
                let manual = pending.and_then(|p| p.manual_target_for(source, effect.kind));
                match manual {
                    Some(id) => Some(id),
                    None => {
                        let pool = ctx.pool(effect.target, source);
                        match rng.choose(&pool) {
                            Some(id) => Some(*id),
                            None => {
                                tracing::debug!(%source, ability = %effect.kind, "no legal target");
                                continue;
                            }
                        }
                    }
                }
            } else {
                None
            };

            match apply_ability_effect(ctx, source, &effect, target) {
                Ok(entry) => log.push(entry),
                Err(err) => tracing::debug!(%source, ability = %effect.kind, %err, "ability skipped"),
            }
        }
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::tests::card;
    use crate::cards::{Card, Rarity, Sector};
    use crate::effects::ability::limited_slots;

    struct Board {
        cards: CardStore,
        own: Zone,
        enemy: Zone,
        enemy_health: i64,
    }

    impl Board {
        fn new(own: Vec<Card>, enemy: Vec<Card>) -> Self {
            let mut board = Board {
                cards: CardStore::new(),
                own: Zone::new(),
                enemy: Zone::new(),
                enemy_health: 600,
            };
            for c in own {
                board.own.push_back(c.id);
                board.cards.insert(c.id, c);
            }
            for c in enemy {
                board.enemy.push_back(c.id);
                board.cards.insert(c.id, c);
            }
            board
        }

        fn ctx(&mut self) -> AbilityContext<'_> {
            AbilityContext {
                cards: &mut self.cards,
                own_field: &self.own,
                enemy_field: &self.enemy,
                enemy_health: &mut self.enemy_health,
            }
        }

        fn get(&self, serial: u32) -> &Card {
            &self.cards[&CardId::new(serial, 0)]
        }
    }

    fn id(serial: u32) -> CardId {
        CardId::new(serial, 0)
    }

    #[test]
    fn test_weaken_chosen_enemy() {
        let mut board = Board::new(
            vec![card(1, 60, Rarity::Common, Sector::Energy)],
            vec![card(2, 60, Rarity::Common, Sector::Utilities)],
        );

        let effect = AbilityEffect::new(AbilityKind::Weaken);
        let entry = apply_ability_effect(&mut board.ctx(), id(1), &effect, Some(id(2))).unwrap();

        assert_eq!(board.get(2).power_modifier, -15);
        assert_eq!((entry.old_value, entry.new_value), (0, -15));
        assert_eq!(entry.target_card, Some(id(2)));
        assert_eq!(entry.animation, AnimationType::Weaken);
    }

    #[test]
    fn test_power_to_health() {
        let mut board = Board::new(vec![card(1, 40, Rarity::Uncommon, Sector::Energy)], vec![]);

        let effect = AbilityEffect::new(AbilityKind::PowerToHealth);
        apply_ability_effect(&mut board.ctx(), id(1), &effect, None).unwrap();

        assert_eq!(board.get(1).current_health, 60);
    }

    #[test]
    fn test_direct_damage_hits_enemy_health() {
        let mut board = Board::new(vec![card(1, 77, Rarity::Rare, Sector::Energy)], vec![]);

        let effect = AbilityEffect::new(AbilityKind::DirectDamage);
        let entry = apply_ability_effect(&mut board.ctx(), id(1), &effect, None).unwrap();

        assert_eq!(board.enemy_health, 600 - 15);
        assert_eq!(entry.target_card, None);
    }

    #[test]
    fn test_increase_power_on_ally() {
        let mut board = Board::new(
            vec![
                card(1, 50, Rarity::Epic, Sector::Energy),
                card(2, 30, Rarity::Common, Sector::Energy),
            ],
            vec![],
        );

        let effect = AbilityEffect::new(AbilityKind::IncreasePower);
        apply_ability_effect(&mut board.ctx(), id(1), &effect, Some(id(2))).unwrap();
        assert_eq!(board.get(2).power_modifier, 15);

        // The source itself is a legal ally
        apply_ability_effect(&mut board.ctx(), id(1), &effect, Some(id(1))).unwrap();
        assert_eq!(board.get(1).power_modifier, 25);
    }

    #[test]
    fn test_lock_costs_source_power() {
        let mut board = Board::new(
            vec![card(1, 40, Rarity::Legendary, Sector::Energy)],
            vec![card(2, 70, Rarity::Common, Sector::Utilities)],
        );

        let effect = AbilityEffect::new(AbilityKind::Lock);
        apply_ability_effect(&mut board.ctx(), id(1), &effect, Some(id(2))).unwrap();

        assert!(board.get(2).is_locked);
        // No floor: effective power goes negative
        assert_eq!(board.get(1).power_modifier, -70);
        assert_eq!(board.get(1).effective_power(), -30);
        assert_eq!(board.get(1).current_health, 40);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut board = Board::new(
            vec![card(1, 60, Rarity::Common, Sector::Energy)],
            vec![card(2, 60, Rarity::Common, Sector::Utilities)],
        );
        let before = board.cards.clone();
        let weaken = AbilityEffect::new(AbilityKind::Weaken);

        assert_eq!(
            apply_ability_effect(&mut board.ctx(), id(1), &weaken, None),
            Err(AbilityError::MissingTarget)
        );
        assert_eq!(
            apply_ability_effect(&mut board.ctx(), id(1), &weaken, Some(id(1))),
            Err(AbilityError::IllegalTarget(id(1)))
        );
        assert_eq!(
            apply_ability_effect(&mut board.ctx(), id(9), &weaken, Some(id(2))),
            Err(AbilityError::MissingSource(id(9)))
        );
        assert_eq!(board.cards, before);
        assert_eq!(board.enemy_health, 600);
    }

    #[test]
    fn test_process_skips_empty_pool() {
        let mut board = Board::new(vec![card(1, 60, Rarity::Common, Sector::Energy)], vec![]);
        let mut rng = GameRng::new(1);

        let log = process_card_abilities(&mut board.ctx(), &mut rng, &[id(1)], None);
        assert!(log.is_empty());
    }

    #[test]
    fn test_process_uses_manual_target() {
        let pending = PendingAbility {
            source: id(1),
            kind: AbilityKind::Weaken,
            target: AbilityTarget::Enemy,
            valid_targets: vec![id(2), id(3)],
            selected_target: Some(id(3)),
        };

        for seed in 0..10 {
            let mut board = Board::new(
                vec![card(1, 60, Rarity::Common, Sector::Energy)],
                vec![
                    card(2, 40, Rarity::Common, Sector::Utilities),
                    card(3, 80, Rarity::Common, Sector::Utilities),
                ],
            );
            let mut rng = GameRng::new(seed);

            let log = process_card_abilities(&mut board.ctx(), &mut rng, &[id(1)], Some(&pending));
            assert_eq!(log.len(), 1);
            assert_eq!(log[0].target_card, Some(id(3)));
            assert_eq!(board.get(3).power_modifier, -20);
            assert_eq!(board.get(2).power_modifier, 0);
        }
    }

    #[test]
    fn test_process_limited_logs_both_effects() {
        // Find a Limited id whose slots are PowerToHealth + DirectDamage: neither needs a card
        let limited_id = (0..10_000u32)
            .map(|s| CardId::new(s, 0))
            .find(|id| {
                let (a, b) = limited_slots(*id);
                let kinds = [AbilityKind::COMPOSABLE[a], AbilityKind::COMPOSABLE[b]];
                kinds.contains(&AbilityKind::PowerToHealth) && kinds.contains(&AbilityKind::DirectDamage)
            })
            .expect("some id maps to the self-contained pair");

        let mut c = card(0, 50, Rarity::Limited, Sector::Energy);
        c.id = limited_id;
        let mut board = Board::new(vec![c], vec![]);
        let mut rng = GameRng::new(5);

        let log = process_card_abilities(&mut board.ctx(), &mut rng, &[limited_id], None);
        assert_eq!(log.len(), 2);
        assert_eq!(board.enemy_health, 590);
        assert_eq!(board.cards[&limited_id].current_health, 75);
    }

    #[test]
    fn test_process_limited_second_runs_after_first_fails() {
        // Weaken (needs an enemy, none present) paired with anything self-contained
        let limited_id = (0..10_000u32)
            .map(|s| CardId::new(s, 0))
            .find(|id| {
                let (a, b) = limited_slots(*id);
                AbilityKind::COMPOSABLE[a] == AbilityKind::Weaken
                    && AbilityKind::COMPOSABLE[b] == AbilityKind::PowerToHealth
            })
            .expect("some id maps to Weaken then PowerToHealth");

        let mut c = card(0, 50, Rarity::Limited, Sector::Energy);
        c.id = limited_id;
        let mut board = Board::new(vec![c], vec![]);
        let mut rng = GameRng::new(5);

        let log = process_card_abilities(&mut board.ctx(), &mut rng, &[limited_id], None);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].ability, AbilityKind::PowerToHealth);
    }
}
