//! Rejection reasons for match commands.
//!
//! Every fallible `GameStateManager` mutator returns `Result<_, GameError>`.
//! Validation always precedes mutation, so an `Err` means the command was
//! rejected and the match state is exactly what it was before the call.

use crate::cards::CardId;
use crate::core::{Side, TurnPhase};
use crate::effects::AbilityKind;

/// Why a match command was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the match is over")]
    GameOver,

    #[error("it is the {0}'s turn")]
    NotYourTurn(Side),

    #[error("not allowed during the {0:?} phase")]
    WrongPhase(TurnPhase),

    #[error("must play between 1 and {max} cards, got {requested}")]
    InvalidCardCount { requested: usize, max: usize },

    #[error("card {0} is not in hand")]
    NotInHand(CardId),

    #[error("card {0} is listed more than once")]
    DuplicateCard(CardId),

    #[error("playing these cards costs {cost} but only {available} credits are available")]
    InsufficientCredits { cost: i64, available: i64 },

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("card {0} is not on the field")]
    NotOnField(CardId),

    #[error("attacking is not allowed this turn")]
    AttacksDisabled,

    #[error("card {0} is locked")]
    CardLocked(CardId),

    #[error("card {0} already attacked this combat phase")]
    AlreadyAttacked(CardId),

    #[error("the enemy field still has unlocked defenders")]
    DefendersPresent,

    #[error("no legal target for this ability")]
    NoValidTargets,

    #[error("this ability does not take a manual target")]
    NotTargetable,

    #[error("card {0} has already resolved its abilities")]
    AbilitiesResolved(CardId),

    #[error("card {card} has no {kind} ability aimed that way")]
    NoSuchAbility { card: CardId, kind: AbilityKind },

    #[error("no ability is waiting for a target")]
    NoPendingAbility,

    #[error("card {0} is not a valid target")]
    InvalidTarget(CardId),

    #[error("ability failed: {0}")]
    Ability(#[from] crate::effects::AbilityError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::InsufficientCredits { cost: 250, available: 200 };
        assert_eq!(
            err.to_string(),
            "playing these cards costs 250 but only 200 credits are available"
        );

        let err = GameError::InvalidCardCount { requested: 0, max: 3 };
        assert_eq!(err.to_string(), "must play between 1 and 3 cards, got 0");

        assert_eq!(GameError::NotYourTurn(Side::Opponent).to_string(), "it is the opponent's turn");
    }
}
