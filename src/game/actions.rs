//! Player commands: playing cards, abilities, manual targeting and attacks.
//!
//! Every command validates fully before it mutates, so an `Err` leaves the
//! match exactly as it was.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::CardId;
use crate::combat::{calculate_damage, can_apply_direct_damage, CombatResult};
use crate::core::{GameError, GameState, Side, TurnPhase};
use crate::effects::{
    card_ability, legal_targets, process_card_abilities, AbilityContext, AbilityKind,
    AbilityLogEntry, AbilityTarget, PendingAbility,
};

use super::events::GameEvent;
use super::manager::GameStateManager;

/// What the human may do right now.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableActions {
    pub can_advance_phase: bool,
    pub can_play_cards: bool,
    /// Hand cards affordable on their own.
    pub playable_cards: Vec<CardId>,
    /// At least one attacker and one enemy card to hit.
    pub can_attack: bool,
    /// Field cards that may still attack this combat phase.
    pub attackers: Vec<CardId>,
    pub can_attack_player: bool,
    pub awaiting_target: bool,
    pub valid_targets: Vec<CardId>,
}

/// Build an ability context from `side`'s point of view.
fn ability_context(state: &mut GameState, side: Side) -> AbilityContext<'_> {
    let enemy = side.other();
    AbilityContext {
        cards: &mut state.cards,
        own_field: &state.fields[side],
        enemy_field: &state.fields[enemy],
        enemy_health: &mut state.health[enemy],
    }
}

impl GameStateManager {
    // === Playing cards ===

    /// Play cards from `side`'s hand to its field, all or nothing.
    ///
    /// The count must be within `1..=max_cards_per_turn` and the summed OVR
    /// must fit in the side's credits. Abilities are not resolved here; see
    /// `resolve_abilities`.
    pub fn play_cards(&mut self, ids: &[CardId], side: Side) -> Result<(), GameError> {
        self.ensure_playing()?;
        if side != self.state.active {
            return Err(GameError::NotYourTurn(self.state.active));
        }
        if self.state.turn_phase != TurnPhase::Main {
            return Err(GameError::WrongPhase(self.state.turn_phase));
        }

        let max = self.config.max_cards_per_turn;
        if ids.is_empty() || ids.len() > max {
            return Err(GameError::InvalidCardCount {
                requested: ids.len(),
                max,
            });
        }

        let mut seen = FxHashSet::default();
        let mut cost = 0;
        for &id in ids {
            if !seen.insert(id) {
                return Err(GameError::DuplicateCard(id));
            }
            let card = self.state.card(id).ok_or(GameError::UnknownCard(id))?;
            if !self.state.is_in_hand(side, id) {
                return Err(GameError::NotInHand(id));
            }
            cost += card.cost();
        }

        let available = self.state.credits[side];
        if cost > available {
            debug!(%side, cost, available, "play rejected");
            return Err(GameError::InsufficientCredits { cost, available });
        }

        self.state.credits[side] -= cost;
        for &id in ids {
            self.state.remove_from_hand(side, id);
            self.state.fields[side].push_back(id);
            self.state.unresolved_abilities.insert(id);
        }

        debug!(%side, count = ids.len(), cost, "cards played");
        self.emit(GameEvent::CardsPlayed {
            side,
            cards: ids.to_vec(),
            cost,
        });
        Ok(())
    }

    // === Abilities ===

    /// Resolve the abilities of cards `side` just played.
    ///
    /// Each card resolves once: cards already resolved are skipped. A human
    /// card with a targeting request still waiting for its pick is left for
    /// `select_ability_target`. Cards killed by an ability leave the field.
    pub fn resolve_abilities(
        &mut self,
        ids: &[CardId],
        side: Side,
    ) -> Result<Vec<AbilityLogEntry>, GameError> {
        self.ensure_playing()?;
        for &id in ids {
            if self.state.card(id).is_none() {
                return Err(GameError::UnknownCard(id));
            }
            if !self.state.is_on_field(side, id) {
                return Err(GameError::NotOnField(id));
            }
        }

        let awaiting = match side {
            Side::Player => self.state.pending_ability.as_ref().map(|p| p.source),
            Side::Opponent => None,
        };
        let ready: Vec<CardId> = ids
            .iter()
            .copied()
            .filter(|id| self.state.unresolved_abilities.contains(id))
            .filter(|id| Some(*id) != awaiting)
            .collect();

        if ready.len() < ids.len() {
            debug!(%side, skipped = ids.len() - ready.len(), "abilities resolved or awaiting a target");
        }
        Ok(self.resolve_cards(&ready, side, None))
    }

    /// Process abilities for `ids` and settle the aftermath.
    fn resolve_cards(
        &mut self,
        ids: &[CardId],
        side: Side,
        pending: Option<&PendingAbility>,
    ) -> Vec<AbilityLogEntry> {
        for id in ids {
            self.state.unresolved_abilities.remove(id);
        }

        let log = {
            let mut ctx = ability_context(&mut self.state, side);
            process_card_abilities(&mut ctx, &mut self.rng, ids, pending)
        };

        debug!(%side, resolved = log.len(), "abilities resolved");
        for entry in &log {
            self.emit(GameEvent::AbilityResolved(entry.clone()));
        }

        self.remove_dead_cards();
        self.check_game_over();
        log
    }

    /// Ask the host to pick a target for the human's `kind` ability on
    /// `card_id`.
    ///
    /// The card must be on the human field with its abilities unresolved,
    /// and `kind` aimed at `target` must be one of its abilities. Only
    /// `Ally` and `Enemy` abilities take a manual target. Returns the legal
    /// targets, which are also stored on the pending request.
    pub fn start_ability_targeting(
        &mut self,
        card_id: CardId,
        kind: AbilityKind,
        target: AbilityTarget,
    ) -> Result<Vec<CardId>, GameError> {
        self.ensure_playing()?;
        if !target.needs_card_choice() {
            return Err(GameError::NotTargetable);
        }
        let card = self.state.card(card_id).ok_or(GameError::UnknownCard(card_id))?;
        if !self.state.is_on_field(Side::Player, card_id) {
            return Err(GameError::NotOnField(card_id));
        }
        if !self.state.unresolved_abilities.contains(&card_id) {
            return Err(GameError::AbilitiesResolved(card_id));
        }
        let has_ability = card_ability(card)
            .iter()
            .any(|effect| effect.kind == kind && effect.target == target);
        if !has_ability {
            return Err(GameError::NoSuchAbility {
                card: card_id,
                kind,
            });
        }

        let valid_targets = legal_targets(
            target,
            card_id,
            &self.state.fields[Side::Player],
            &self.state.fields[Side::Opponent],
            &self.state.cards,
        );
        if valid_targets.is_empty() {
            return Err(GameError::NoValidTargets);
        }

        debug!(%card_id, ability = %kind, targets = valid_targets.len(), "awaiting target");
        self.state.pending_ability = Some(PendingAbility {
            source: card_id,
            kind,
            target,
            valid_targets: valid_targets.clone(),
            selected_target: None,
        });
        Ok(valid_targets)
    }

    /// Pick `target_id` for the pending request and resolve the source
    /// card's abilities with it.
    ///
    /// The chosen target is used for the requested ability; any other
    /// ability on the card (Limited) resolves as usual. Returns every
    /// effect applied.
    pub fn select_ability_target(
        &mut self,
        target_id: CardId,
    ) -> Result<Vec<AbilityLogEntry>, GameError> {
        self.ensure_playing()?;
        let pending = self
            .state
            .pending_ability
            .as_ref()
            .ok_or(GameError::NoPendingAbility)?;
        if !self.state.is_on_field(Side::Player, pending.source) {
            return Err(GameError::NotOnField(pending.source));
        }
        if !pending.is_valid_target(target_id) {
            return Err(GameError::InvalidTarget(target_id));
        }
        let still_legal = legal_targets(
            pending.target,
            pending.source,
            &self.state.fields[Side::Player],
            &self.state.fields[Side::Opponent],
            &self.state.cards,
        )
        .contains(&target_id);
        if !still_legal {
            return Err(GameError::InvalidTarget(target_id));
        }

        let mut chosen = pending.clone();
        chosen.selected_target = Some(target_id);
        self.state.pending_ability = None;
        self.state.selected_target_id = Some(target_id);

        debug!(source = %chosen.source, target = %target_id, "manual target selected");
        Ok(self.resolve_cards(&[chosen.source], Side::Player, Some(&chosen)))
    }

    /// Drop the pending request, returning it. The card's abilities then
    /// resolve with random targets.
    pub fn cancel_ability_targeting(&mut self) -> Option<PendingAbility> {
        self.state.pending_ability.take()
    }

    // === Combat ===

    fn validate_attacker(&self, attacker: CardId) -> Result<Side, GameError> {
        self.ensure_playing()?;
        if self.state.turn_phase != TurnPhase::Combat {
            return Err(GameError::WrongPhase(self.state.turn_phase));
        }
        if !self.state.can_attack_this_turn {
            return Err(GameError::AttacksDisabled);
        }

        let side = self.state.active;
        let card = self.state.card(attacker).ok_or(GameError::UnknownCard(attacker))?;
        if !self.state.is_on_field(side, attacker) {
            return Err(GameError::NotOnField(attacker));
        }
        if card.is_locked {
            return Err(GameError::CardLocked(attacker));
        }
        if self.state.attacked_this_combat_phase.contains(&attacker) {
            return Err(GameError::AlreadyAttacked(attacker));
        }

        Ok(side)
    }

    /// Attack an enemy card with one of the active side's cards.
    pub fn attack_card(
        &mut self,
        attacker: CardId,
        defender: CardId,
    ) -> Result<CombatResult, GameError> {
        let side = self.validate_attacker(attacker)?;
        let enemy = side.other();

        let defending = self.state.card(defender).ok_or(GameError::UnknownCard(defender))?;
        if !self.state.is_on_field(enemy, defender) {
            return Err(GameError::NotOnField(defender));
        }
        let attacking = self.state.card(attacker).ok_or(GameError::UnknownCard(attacker))?;

        let result = calculate_damage(attacking, defending);
        debug!(%attacker, %defender, damage = result.damage, "attack");

        self.state.attacked_this_combat_phase.insert(attacker);
        self.emit(GameEvent::Attack(result));
        self.damage_card(defender, result.damage, enemy)?;
        Ok(result)
    }

    /// Attack the enemy side directly. Only allowed when every enemy field
    /// card is locked or the field is empty.
    ///
    /// Returns the damage dealt, negative when the attacker's power is
    /// below zero.
    pub fn attack_player(&mut self, attacker: CardId) -> Result<i64, GameError> {
        let side = self.validate_attacker(attacker)?;
        let enemy = side.other();

        if !can_apply_direct_damage(self.state.field_cards(enemy)) {
            return Err(GameError::DefendersPresent);
        }

        let damage = self
            .state
            .card(attacker)
            .ok_or(GameError::UnknownCard(attacker))?
            .effective_power();

        self.state.attacked_this_combat_phase.insert(attacker);
        self.damage_player(damage, enemy);
        self.check_game_over();
        Ok(damage)
    }

    /// Take cards at zero health or below off both fields.
    fn remove_dead_cards(&mut self) {
        for side in Side::BOTH {
            let dead: Vec<CardId> = self
                .state
                .field_cards(side)
                .filter(|card| !card.is_alive())
                .map(|card| card.id)
                .collect();

            for id in dead {
                self.state.remove_from_field(side, id);
                debug!(%id, %side, "card destroyed by ability");
                self.emit(GameEvent::CardDestroyed { side, card: id });
            }
        }
    }

    // === Queries ===

    /// Legal moves for the human right now.
    #[must_use]
    pub fn available_actions(&self) -> AvailableActions {
        let state = &self.state;
        if !state.is_playing() || state.active != Side::Player {
            return AvailableActions::default();
        }

        let credits = state.credits[Side::Player];
        let playable_cards: Vec<CardId> = if state.turn_phase == TurnPhase::Main {
            state
                .hand_cards(Side::Player)
                .filter(|card| card.cost() <= credits)
                .map(|card| card.id)
                .collect()
        } else {
            Vec::new()
        };

        let attackers: Vec<CardId> =
            if state.turn_phase == TurnPhase::Combat && state.can_attack_this_turn {
                state
                    .field_cards(Side::Player)
                    .filter(|card| !card.is_locked)
                    .filter(|card| !state.attacked_this_combat_phase.contains(&card.id))
                    .map(|card| card.id)
                    .collect()
            } else {
                Vec::new()
            };

        let has_attackers = !attackers.is_empty();
        let (awaiting_target, valid_targets) = match &state.pending_ability {
            Some(pending) => (true, pending.valid_targets.clone()),
            None => (false, Vec::new()),
        };

        AvailableActions {
            can_advance_phase: true,
            can_play_cards: !playable_cards.is_empty(),
            playable_cards,
            can_attack: has_attackers && !state.fields[Side::Opponent].is_empty(),
            can_attack_player: has_attackers
                && can_apply_direct_damage(state.field_cards(Side::Opponent)),
            attackers,
            awaiting_target,
            valid_targets,
        }
    }
}
