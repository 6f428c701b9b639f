//! Match state machine: setup, the turn/phase loop, economy and win
//! detection.
//!
//! ## Turn structure
//!
//! Each turn cycles Draw → Main → Combat → End. Turn 1 starts directly in
//! Main with full hands and never reaches Combat. Combat is skipped when
//! the active side has no field. Reaching End immediately converts the
//! active side's unspent credits to health and starts the next turn.

use tracing::{debug, info};

use crate::cards::{CardFactory, CardId};
use crate::core::{GameError, GamePhase, GameRng, GameState, MatchConfig, Side, TurnPhase};
use crate::zones::{draw_cards, shuffle_array};

use super::events::GameEvent;

/// Owns one match: its state, RNG and event stream.
///
/// Commands are synchronous. The host issues one at a time, drains the
/// resulting events, and waits out any pacing before the next command.
#[derive(Clone, Debug)]
pub struct GameStateManager {
    pub(crate) config: MatchConfig,
    pub(crate) state: GameState,
    pub(crate) rng: GameRng,
    pub(crate) factory: CardFactory,
    pub(crate) events: Vec<GameEvent>,
}

impl GameStateManager {
    /// Deal a new match.
    ///
    /// Both sides get a shuffled deck, a full hand and starting health for
    /// the difficulty. The human starts turn 1 in the main phase.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let mut rng = GameRng::new(config.seed);
        let mut factory = CardFactory::new();
        let mut state = GameState::new(config.difficulty);

        for side in Side::BOTH {
            let deck = factory.generate_deck(&mut rng, config.deck_size);
            for card in shuffle_array(&mut rng, deck) {
                state.decks[side].push_back(card.id);
                state.insert_card(card);
            }

            let hand = draw_cards(&mut state.decks[side], config.hand_size);
            state.hands[side].extend(hand);
            state.health[side] = config.difficulty.starting_health();
        }

        state.credits[Side::Player] = config.credits_per_turn;
        state.credits[Side::Opponent] = config.opponent_credits;
        state.current_turn = 1;
        state.active = Side::Player;
        state.turn_phase = TurnPhase::Main;
        state.can_attack_this_turn = false;

        info!(seed = rng.seed(), difficulty = ?config.difficulty, "match started");

        let events = vec![GameEvent::MatchStarted {
            seed: rng.seed(),
            difficulty: config.difficulty,
        }];

        Self {
            config,
            state,
            rng,
            factory,
            events,
        }
    }

    /// Throw the current match away and deal a fresh one with the same
    /// configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Borrowed view of the live state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Detached snapshot of the state. Cheap: the collections are persistent.
    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.state.clone()
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cards generated for this match so far.
    #[must_use]
    pub fn cards_generated(&self) -> u32 {
        self.factory.generated()
    }

    // === Internal helpers ===

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn ensure_playing(&self) -> Result<(), GameError> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(GameError::GameOver)
        }
    }

    fn set_phase(&mut self, phase: TurnPhase) {
        self.state.turn_phase = phase;
        debug!(side = %self.state.active, turn = self.state.current_turn, ?phase, "phase");
        self.emit(GameEvent::PhaseChanged {
            side: self.state.active,
            phase,
        });
    }

    // === Phase loop ===

    /// Advance to the next phase.
    ///
    /// Returns the phase the match is in afterwards. Leaving Main on turn 1
    /// or with an empty field ends the turn; ending a turn runs the next
    /// turn's draw phase, so the result is then the new turn's Main.
    pub fn next_phase(&mut self) -> Result<TurnPhase, GameError> {
        self.ensure_playing()?;

        match self.state.turn_phase {
            TurnPhase::Draw => self.set_phase(TurnPhase::Draw.next()),
            TurnPhase::Main => {
                let side = self.state.active;
                if self.state.current_turn == 1 {
                    debug!("turn 1 has no combat, ending turn");
                    self.end_turn()?;
                } else if self.state.fields[side].is_empty() {
                    debug!(%side, "empty field, skipping combat");
                    self.end_turn()?;
                } else {
                    self.state.attacked_this_combat_phase.clear();
                    self.set_phase(TurnPhase::Main.next());
                }
            }
            TurnPhase::Combat | TurnPhase::End => self.end_turn()?,
        }

        Ok(self.state.turn_phase)
    }

    /// End the active side's turn.
    ///
    /// Unspent credits become health one-for-one, with no cap.
    pub fn end_turn(&mut self) -> Result<(), GameError> {
        self.ensure_playing()?;

        let side = self.state.active;
        self.set_phase(TurnPhase::End);

        let converted = self.state.credits[side];
        self.state.health[side] += converted;
        self.state.credits[side] = 0;
        debug!(%side, converted, health = self.state.health[side], "turn ended");
        self.emit(GameEvent::TurnEnded {
            side,
            credits_converted: converted,
        });

        self.start_new_turn();
        Ok(())
    }

    /// Hand the turn to the other side.
    ///
    /// Cleanses every field card, enables attacking and runs the new side's
    /// draw phase. Only the human's credits refresh; the opponent keeps its
    /// one-time starting allotment.
    pub fn start_new_turn(&mut self) {
        let state = &mut self.state;

        for side in Side::BOTH {
            let ids: Vec<CardId> = state.fields[side].iter().copied().collect();
            for id in ids {
                if let Some(card) = state.card_mut(id) {
                    card.cleanse();
                }
            }
        }

        state.active = state.active.other();
        state.current_turn += 1;
        state.can_attack_this_turn = state.current_turn > 1;
        state.pending_ability = None;
        state.unresolved_abilities.clear();

        let side = state.active;
        let turn = state.current_turn;
        if !side.is_opponent() {
            state.credits[side] = self.config.credits_per_turn;
        }

        debug!(%side, turn, "turn started");
        self.emit(GameEvent::TurnStarted { side, turn });
        self.set_phase(TurnPhase::Draw);
        self.run_draw_phase();
        self.check_game_over();
    }

    /// Run the draw phase for the active side.
    pub fn perform_draw_phase(&mut self) -> Result<(), GameError> {
        self.ensure_playing()?;
        if self.state.turn_phase != TurnPhase::Draw {
            return Err(GameError::WrongPhase(self.state.turn_phase));
        }
        self.run_draw_phase();
        Ok(())
    }

    /// Draw one card at a time up to the hand size, then move to Main.
    ///
    /// Each draw is its own event so the host can pace them.
    fn run_draw_phase(&mut self) {
        let side = self.state.active;

        while self.state.hands[side].len() < self.config.hand_size {
            let Some(id) = draw_cards(&mut self.state.decks[side], 1).pop() else {
                debug!(%side, "deck empty, draw phase stops early");
                break;
            };
            self.state.hands[side].push_back(id);
            self.emit(GameEvent::CardDrawn { side, card: id });
        }

        self.set_phase(TurnPhase::Main);
    }

    // === Damage and win detection ===

    /// Damage a card on `side`'s field.
    ///
    /// Returns true if the card died and left the field.
    pub fn damage_card(&mut self, id: CardId, damage: i64, side: Side) -> Result<bool, GameError> {
        if !self.state.is_on_field(side, id) {
            return Err(GameError::NotOnField(id));
        }
        let card = self.state.card_mut(id).ok_or(GameError::UnknownCard(id))?;

        card.current_health -= damage;
        let remaining = card.current_health;
        self.emit(GameEvent::CardDamaged {
            side,
            card: id,
            damage,
            remaining,
        });

        if remaining <= 0 {
            self.state.remove_from_field(side, id);
            debug!(%id, %side, "card destroyed");
            self.emit(GameEvent::CardDestroyed { side, card: id });
            return Ok(true);
        }

        Ok(false)
    }

    /// Subtract from a side's health. No floor.
    pub fn damage_player(&mut self, damage: i64, side: Side) {
        self.state.health[side] -= damage;
        let remaining = self.state.health[side];
        debug!(%side, damage, remaining, "player damaged");
        self.emit(GameEvent::PlayerDamaged {
            side,
            damage,
            remaining,
        });
    }

    /// Settle the match if either side is out of health.
    ///
    /// The player's health is checked first, so a simultaneous double
    /// knockout goes to the opponent.
    pub fn check_game_over(&mut self) -> Option<Side> {
        if let GamePhase::GameOver { winner } = self.state.game_phase {
            return Some(winner);
        }

        let winner = if self.state.health[Side::Player] <= 0 {
            Side::Opponent
        } else if self.state.health[Side::Opponent] <= 0 {
            Side::Player
        } else {
            return None;
        };

        self.state.game_phase = GamePhase::GameOver { winner };
        self.state.pending_ability = None;
        info!(%winner, turn = self.state.current_turn, "game over");
        self.emit(GameEvent::GameOver { winner });
        Some(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Difficulty, Pacing};

    fn manager(seed: u64) -> GameStateManager {
        GameStateManager::new(
            MatchConfig::builder()
                .seed(seed)
                .pacing(Pacing::instant())
                .build(),
        )
    }

    #[test]
    fn test_new_normal_match() {
        let mgr = manager(42);
        let state = mgr.state();

        assert_eq!(state.player_health(), 600);
        assert_eq!(state.opponent_health(), 600);
        assert_eq!(state.player_credits(), 200);
        assert_eq!(state.opponent_credits(), 200);
        assert_eq!(state.hands[Side::Player].len(), 7);
        assert_eq!(state.hands[Side::Opponent].len(), 7);
        assert_eq!(state.decks[Side::Player].len(), 53);
        assert_eq!(state.current_turn, 1);
        assert_eq!(state.turn_phase, TurnPhase::Main);
        assert!(!state.can_attack_this_turn);
        assert_eq!(state.cards.len(), 120);
    }

    #[test]
    fn test_difficulty_health() {
        for (difficulty, health) in [(Difficulty::Easy, 1000), (Difficulty::Hard, 200)] {
            let mgr = GameStateManager::new(MatchConfig::builder().difficulty(difficulty).build());
            assert_eq!(mgr.state().player_health(), health);
            assert_eq!(mgr.state().opponent_health(), health);
        }
    }

    #[test]
    fn test_turn_one_skips_combat() {
        let mut mgr = manager(1);
        mgr.drain_events();

        let phase = mgr.next_phase().unwrap();

        assert_eq!(phase, TurnPhase::Main);
        assert_eq!(mgr.state().current_turn, 2);
        assert_eq!(mgr.state().active, Side::Opponent);

        let phases: Vec<_> = mgr
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::PhaseChanged { phase, .. } => Some(phase),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec![TurnPhase::End, TurnPhase::Draw, TurnPhase::Main]);
    }

    #[test]
    fn test_end_turn_converts_credits() {
        let mut mgr = manager(2);
        let health = mgr.state().player_health();
        let credits = mgr.state().player_credits();

        mgr.end_turn().unwrap();

        assert_eq!(mgr.state().player_credits(), 0);
        assert_eq!(mgr.state().player_health(), health + credits);
    }

    #[test]
    fn test_start_new_turn_cleanses_and_refreshes() {
        let mut mgr = manager(3);
        let id = mgr.state.hands[Side::Opponent][0];
        mgr.state.hands[Side::Opponent].remove(0);
        mgr.state.fields[Side::Opponent].push_back(id);
        {
            let card = mgr.state.card_mut(id).unwrap();
            card.power_modifier = -12;
            card.is_locked = true;
        }
        mgr.state.credits[Side::Opponent] = 5;

        mgr.start_new_turn();

        let card = mgr.state().card(id).unwrap();
        assert_eq!(card.power_modifier, 0);
        assert!(!card.is_locked);
        assert!(mgr.state().can_attack_this_turn);
        assert_eq!(mgr.state().active, Side::Opponent);
        // The opponent's allotment is one-time; leftovers carry, nothing is added
        assert_eq!(mgr.state().opponent_credits(), 5);
        assert_eq!(mgr.state().turn_phase, TurnPhase::Main);
        // Hand refilled: 6 left after moving one to the field, drew back to 7
        assert_eq!(mgr.state().hands[Side::Opponent].len(), 7);
    }

    #[test]
    fn test_only_human_credits_refresh() {
        let mut mgr = manager(41);
        mgr.end_turn().unwrap();
        assert_eq!(mgr.state().opponent_credits(), 200);

        // Opponent banks its credits, human passes
        mgr.end_turn().unwrap();
        assert_eq!(mgr.state().player_credits(), 200);
        mgr.end_turn().unwrap();

        assert_eq!(mgr.state().current_turn, 4);
        assert_eq!(mgr.state().active, Side::Opponent);
        assert_eq!(mgr.state().opponent_credits(), 0);
    }

    #[test]
    fn test_combat_entry_resets_attackers() {
        let mut mgr = manager(40);
        mgr.next_phase().unwrap();
        let id = mgr.state.hands[Side::Opponent][0];
        mgr.play_cards(&[id], Side::Opponent).unwrap();

        assert_eq!(mgr.next_phase(), Ok(TurnPhase::Combat));
        mgr.attack_player(id).unwrap();
        assert_eq!(mgr.attack_player(id), Err(GameError::AlreadyAttacked(id)));

        // Combat → human turn 3 → human has no field, straight back
        assert_eq!(mgr.next_phase(), Ok(TurnPhase::Main));
        assert_eq!(mgr.next_phase(), Ok(TurnPhase::Main));
        assert_eq!(mgr.state().current_turn, 4);
        assert!(mgr.state().attacked_this_combat_phase.contains(&id));

        assert_eq!(mgr.next_phase(), Ok(TurnPhase::Combat));
        assert!(mgr.state().attacked_this_combat_phase.is_empty());
        mgr.attack_player(id).unwrap();
    }

    #[test]
    fn test_empty_field_skips_combat() {
        let mut mgr = manager(42);
        mgr.end_turn().unwrap();
        mgr.end_turn().unwrap();
        assert_eq!(mgr.state().current_turn, 3);
        assert!(mgr.state().fields[Side::Player].is_empty());
        mgr.drain_events();

        let phase = mgr.next_phase().unwrap();

        assert_eq!(phase, TurnPhase::Main);
        assert_eq!(mgr.state().active, Side::Opponent);
        assert_eq!(mgr.state().current_turn, 4);
        assert!(!mgr.drain_events().iter().any(|e| matches!(
            e,
            GameEvent::PhaseChanged {
                phase: TurnPhase::Combat,
                ..
            }
        )));
    }

    #[test]
    fn test_draw_phase_stops_on_empty_deck() {
        let mut mgr = manager(4);
        mgr.state.decks[Side::Opponent] = mgr.state.decks[Side::Opponent].take(2);
        mgr.state.hands[Side::Opponent].clear();

        mgr.start_new_turn();

        assert_eq!(mgr.state().hands[Side::Opponent].len(), 2);
        assert!(mgr.state().decks[Side::Opponent].is_empty());
        assert_eq!(mgr.state().turn_phase, TurnPhase::Main);
    }

    #[test]
    fn test_perform_draw_phase_requires_draw() {
        let mut mgr = manager(4);
        assert_eq!(
            mgr.perform_draw_phase(),
            Err(GameError::WrongPhase(TurnPhase::Main))
        );
    }

    #[test]
    fn test_damage_card_removes_at_zero() {
        let mut mgr = manager(5);
        let id = mgr.state.hands[Side::Player][0];
        mgr.state.hands[Side::Player].remove(0);
        mgr.state.fields[Side::Player].push_back(id);
        let health = mgr.state().card(id).unwrap().current_health;

        assert_eq!(mgr.damage_card(id, health - 1, Side::Player), Ok(false));
        assert!(mgr.state().is_on_field(Side::Player, id));

        assert_eq!(mgr.damage_card(id, 1, Side::Player), Ok(true));
        assert!(!mgr.state().is_on_field(Side::Player, id));

        assert_eq!(
            mgr.damage_card(id, 1, Side::Player),
            Err(GameError::NotOnField(id))
        );
    }

    #[test]
    fn test_damage_player_has_no_floor() {
        let mut mgr = manager(6);
        mgr.damage_player(650, Side::Opponent);
        assert_eq!(mgr.state().opponent_health(), -50);
    }

    #[test]
    fn test_game_over_tie_break() {
        let mut mgr = manager(7);
        mgr.state.health[Side::Player] = 0;
        mgr.state.health[Side::Opponent] = 0;

        assert_eq!(mgr.check_game_over(), Some(Side::Opponent));
        assert_eq!(mgr.state().winner(), Some(Side::Opponent));
        assert_eq!(mgr.next_phase(), Err(GameError::GameOver));
        assert_eq!(mgr.end_turn(), Err(GameError::GameOver));
    }

    #[test]
    fn test_player_wins() {
        let mut mgr = manager(8);
        assert_eq!(mgr.check_game_over(), None);

        mgr.damage_player(600, Side::Opponent);
        assert_eq!(mgr.check_game_over(), Some(Side::Player));
        assert!(mgr
            .drain_events()
            .contains(&GameEvent::GameOver { winner: Side::Player }));
    }

    #[test]
    fn test_reset_deals_same_match() {
        let mut mgr = manager(9);
        let before = mgr.game_state();

        mgr.end_turn().unwrap();
        assert_ne!(mgr.game_state(), before);

        mgr.reset();
        assert_eq!(mgr.game_state(), before);
    }
}
