//! UI helper functions for terminal output formatting.
//!
//! This module provides utility functions for consistent user interface output
//! across CLI commands, including error messages, card lists, and action echoes.

use riverline_engine::cards::Card;
use riverline_engine::player::ActionKind;
use riverline_engine::rules::{ActionOption, ValidatedAction};
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Space-separated card list, "--" when there is nothing to show.
pub fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "--".to_string();
    }
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One legal move with its chip bounds, worded so the prompt's listing
/// can be typed straight back in.
pub fn format_option(option: &ActionOption) -> String {
    let name = match option.kind {
        ActionKind::Fold => "fold",
        ActionKind::Check => "check",
        ActionKind::Call => "call",
        ActionKind::Bet => "bet",
        ActionKind::Raise => "raise",
        ActionKind::AllIn => "allin",
    };
    match (option.amount, option.min, option.max) {
        (Some(amount), _, _) => format!("{} {}", name, amount),
        (None, Some(min), Some(max)) if min == max => format!("{} {}", name, min),
        (None, Some(min), Some(max)) => format!("{} {}-{}", name, min, max),
        _ => name.to_string(),
    }
}

/// Text for what the engine actually applied, amounts resolved.
///
/// Call and all-in report the chips that moved; bet and raise report the
/// street total the table must now match.
pub fn format_applied(action: &ValidatedAction) -> String {
    match action {
        ValidatedAction::Fold => "folds".to_string(),
        ValidatedAction::Check => "checks".to_string(),
        ValidatedAction::Call(cost) => format!("calls {}", cost),
        ValidatedAction::Bet(total) => format!("bets {}", total),
        ValidatedAction::Raise(total) => format!("raises to {}", total),
        ValidatedAction::AllIn(cost) => format!("goes all-in for {}", cost),
    }
}
