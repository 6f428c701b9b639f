//! Simulated opponent.
//!
//! - `OpponentPolicy`: How the opponent picks cards and attack targets
//! - `GreedyOpponent`: Most expensive affordable cards, direct hits when open
//! - `run_opponent_turn`: Drive one full opponent turn through the manager

use tracing::debug;

use crate::cards::{Card, CardId};
use crate::combat::can_apply_direct_damage;
use crate::core::{GameError, GameRng, GameState, MatchConfig, Side, TurnPhase};

use super::manager::GameStateManager;

/// Where an attacker should swing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackChoice {
    /// Hit the enemy side's health.
    Player,
    /// Hit an enemy field card.
    Card(CardId),
    /// Hold back.
    Pass,
}

/// Decision-making for the simulated side.
pub trait OpponentPolicy {
    /// Cards to play this main phase. An empty list plays nothing.
    ///
    /// The manager still validates the pick; a rejected pick ends the main
    /// phase without playing.
    fn choose_cards(&self, state: &GameState, side: Side, config: &MatchConfig) -> Vec<CardId>;

    /// Target for `attacker` during combat.
    fn choose_attack(
        &self,
        state: &GameState,
        side: Side,
        attacker: CardId,
        rng: &mut GameRng,
    ) -> AttackChoice;
}

/// Plays the most expensive affordable cards and attacks the player
/// whenever nothing blocks, otherwise the weakest enemy card.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyOpponent;

impl OpponentPolicy for GreedyOpponent {
    fn choose_cards(&self, state: &GameState, side: Side, config: &MatchConfig) -> Vec<CardId> {
        let mut hand: Vec<&Card> = state.hand_cards(side).collect();
        hand.sort_by(|a, b| b.cost().cmp(&a.cost()));

        let mut budget = state.credits[side];
        let mut picks = Vec::new();
        for card in hand {
            if picks.len() == config.max_cards_per_turn {
                break;
            }
            if card.cost() <= budget {
                budget -= card.cost();
                picks.push(card.id);
            }
        }
        picks
    }

    fn choose_attack(
        &self,
        state: &GameState,
        side: Side,
        _attacker: CardId,
        _rng: &mut GameRng,
    ) -> AttackChoice {
        let enemy = side.other();
        if can_apply_direct_damage(state.field_cards(enemy)) {
            return AttackChoice::Player;
        }

        state
            .field_cards(enemy)
            .filter(|card| card.is_alive())
            .min_by_key(|card| card.current_health)
            .map_or(AttackChoice::Pass, |card| AttackChoice::Card(card.id))
    }
}

/// Play the opponent's turn with the default greedy policy.
pub fn run_opponent_turn(manager: &mut GameStateManager) -> Result<(), GameError> {
    run_opponent_turn_with(manager, &GreedyOpponent)
}

/// Play the opponent's turn: main phase plays and abilities, combat, then
/// hand control back to the human.
///
/// Returns once the turn has passed or the match has ended.
pub fn run_opponent_turn_with<P: OpponentPolicy + ?Sized>(
    manager: &mut GameStateManager,
    policy: &P,
) -> Result<(), GameError> {
    manager.ensure_playing()?;
    let side = Side::Opponent;
    if manager.state.active != side {
        return Err(GameError::NotYourTurn(manager.state.active));
    }

    if manager.state.turn_phase == TurnPhase::Draw {
        manager.perform_draw_phase()?;
    }

    if manager.state.turn_phase == TurnPhase::Main {
        let picks = policy.choose_cards(&manager.state, side, &manager.config);
        if !picks.is_empty() {
            match manager.play_cards(&picks, side) {
                Ok(()) => {
                    manager.resolve_abilities(&picks, side)?;
                }
                Err(err) => debug!(%err, "opponent pick rejected"),
            }
        }
        if !manager.state.is_playing() {
            return Ok(());
        }
        manager.next_phase()?;
    }

    if manager.state.active == side && manager.state.turn_phase == TurnPhase::Combat {
        let attackers: Vec<CardId> = manager.state.fields[side].iter().copied().collect();

        for attacker in attackers {
            if !manager.state.is_playing() {
                return Ok(());
            }
            let ready = manager.state.is_on_field(side, attacker)
                && manager.state.card(attacker).is_some_and(|card| !card.is_locked);
            if !ready {
                continue;
            }

            let choice = policy.choose_attack(&manager.state, side, attacker, &mut manager.rng);
            let outcome = match choice {
                AttackChoice::Player => manager.attack_player(attacker).map(drop),
                AttackChoice::Card(defender) => manager.attack_card(attacker, defender).map(drop),
                AttackChoice::Pass => Ok(()),
            };
            if let Err(err) = outcome {
                debug!(%attacker, %err, "opponent attack rejected");
            }
        }

        if manager.state.is_playing() {
            manager.next_phase()?;
        }
    }

    Ok(())
}
