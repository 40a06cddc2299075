use serde::Serialize;

use crate::errors::GameError;
use crate::game::Street;
use crate::player::{ActionKind, PlayerAction};

/// The acting player's spot, as validation sees it. Amounts are chips; bets
/// and raises are expressed as street totals, matching [`PlayerAction`].
#[derive(Debug, Clone, Copy)]
pub struct BetContext {
    pub street: Street,
    pub highest_bet: u32,
    pub current_bet: u32,
    pub stack: u32,
    pub min_raise_to: u32,
    pub big_blind: u32,
}

impl BetContext {
    /// Chips owed to match the highest bet, before stack clamping.
    pub fn owed(&self) -> u32 {
        self.highest_bet.saturating_sub(self.current_bet)
    }

    /// Street total if the player committed their whole stack.
    pub fn all_in_total(&self) -> u32 {
        self.current_bet + self.stack
    }
}

/// A player action after validation. Call and all-in carry the chips to
/// commit now; bet and raise keep the street total the player named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise(u32),
    AllIn(u32),
}

/// Checks a proposed action against the betting rules.
///
/// Actions that would commit the player's whole stack collapse into
/// [`ValidatedAction::AllIn`], so the caller applies one code path for
/// every shove, stated or implied.
///
/// # Errors
///
/// - [`GameError::CheckNotAllowed`] when a bet is live
/// - [`GameError::NothingToCall`] when no bet is live
/// - [`GameError::BetNotAllowed`] preflop or once a bet is open
/// - [`GameError::InvalidBetAmount`] for bets under the big blind
/// - [`GameError::RaiseNotAllowed`] with no bet to raise
/// - [`GameError::RaiseTooSmall`] for raises short of the minimum
pub fn validate_action(
    action: PlayerAction,
    ctx: &BetContext,
) -> Result<ValidatedAction, GameError> {
    match action {
        PlayerAction::Fold => Ok(ValidatedAction::Fold),
        PlayerAction::Check => {
            if ctx.owed() > 0 {
                Err(GameError::CheckNotAllowed)
            } else {
                Ok(ValidatedAction::Check)
            }
        }
        PlayerAction::Call => {
            let owed = ctx.owed();
            if owed == 0 {
                Err(GameError::NothingToCall)
            } else if owed >= ctx.stack {
                Ok(ValidatedAction::AllIn(ctx.stack))
            } else {
                Ok(ValidatedAction::Call(owed))
            }
        }
        PlayerAction::Bet(amount) => {
            // Preflop the blinds already opened the betting, so the
            // aggressive option there is always a raise.
            if ctx.street == Street::Preflop || ctx.highest_bet > 0 {
                return Err(GameError::BetNotAllowed);
            }
            if amount >= ctx.stack {
                Ok(ValidatedAction::AllIn(ctx.stack))
            } else if amount < ctx.big_blind {
                Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: ctx.big_blind,
                })
            } else {
                Ok(ValidatedAction::Bet(amount))
            }
        }
        PlayerAction::Raise(to) => {
            if ctx.highest_bet == 0 {
                return Err(GameError::RaiseNotAllowed);
            }
            if to >= ctx.all_in_total() {
                Ok(ValidatedAction::AllIn(ctx.stack))
            } else if to < ctx.min_raise_to {
                Err(GameError::RaiseTooSmall {
                    amount: to,
                    minimum: ctx.min_raise_to,
                })
            } else {
                Ok(ValidatedAction::Raise(to))
            }
        }
        PlayerAction::AllIn => {
            if ctx.stack == 0 {
                Err(GameError::InsufficientChips)
            } else {
                Ok(ValidatedAction::AllIn(ctx.stack))
            }
        }
    }
}

/// One legal move with its chip bounds, for prompts and policy code.
/// `amount` is a fixed cost (call, all-in); `min`/`max` bound the
/// street total of a bet or raise.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActionOption {
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl ActionOption {
    fn plain(kind: ActionKind) -> Self {
        Self {
            kind,
            amount: None,
            min: None,
            max: None,
        }
    }

    fn costing(kind: ActionKind, amount: u32) -> Self {
        Self {
            kind,
            amount: Some(amount),
            min: None,
            max: None,
        }
    }

    fn ranged(kind: ActionKind, min: u32, max: u32) -> Self {
        Self {
            kind,
            amount: None,
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Enumerates the legal actions for the spot described by `ctx`.
pub fn available_actions(ctx: &BetContext) -> Vec<ActionOption> {
    let mut options = vec![ActionOption::plain(ActionKind::Fold)];
    let owed = ctx.owed();
    if owed == 0 {
        options.push(ActionOption::plain(ActionKind::Check));
    } else {
        options.push(ActionOption::costing(ActionKind::Call, owed.min(ctx.stack)));
    }
    if ctx.stack > 0 {
        if ctx.highest_bet == 0 && ctx.street != Street::Preflop {
            options.push(ActionOption::ranged(
                ActionKind::Bet,
                ctx.big_blind.min(ctx.stack),
                ctx.stack,
            ));
        }
        if ctx.highest_bet > 0 && ctx.stack > owed {
            options.push(ActionOption::ranged(
                ActionKind::Raise,
                ctx.min_raise_to.min(ctx.all_in_total()),
                ctx.all_in_total(),
            ));
        }
        options.push(ActionOption::costing(ActionKind::AllIn, ctx.stack));
    }
    options
}
