//! Deterministic recommendation provider for the hint surface.
//!
//! Where the scripted opponent rolls its mixed strategies, the advisor
//! reports the whole mix with frequencies and explains itself, consuming
//! no randomness: the same table state always yields the same advice.

use serde::Serialize;

use riverline_engine::cards::{hole_notation, Card};
use riverline_engine::engine::Engine;
use riverline_engine::errors::GameError;
use riverline_engine::game::{GameState, Street};
use riverline_engine::hand::evaluate_hand;
use riverline_engine::player::ActionKind;

use crate::ranges::{open_rate, rfi_entry, RangeAction};
use crate::strength::{
    board_texture, draw_equity, hand_strength, late_position, preflop_tier, BoardTexture,
};

/// One weighted line in a recommendation mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    /// Percent of the time this line is taken; a mix sums to 100.
    pub frequency: u8,
}

impl Advice {
    fn plain(kind: ActionKind, frequency: u8) -> Self {
        Self {
            kind,
            amount: None,
            frequency,
        }
    }

    fn sized(kind: ActionKind, amount: u32, frequency: u8) -> Self {
        Self {
            kind,
            amount: Some(amount),
            frequency,
        }
    }
}

/// Why the advisor recommends what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rationale {
    pub summary: String,
    pub details: Vec<String>,
}

/// A full recommendation: the majority line plus the mix it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub primary: Advice,
    pub mixed: Vec<Advice>,
    pub rationale: Rationale,
}

/// Produces advice for `seat` in the current betting spot.
///
/// Fails with [`GameError::NoHandInProgress`] when no hand is live or the
/// seat holds no cards.
pub fn recommend(engine: &Engine, seat: usize) -> Result<Recommendation, GameError> {
    let state = engine.state();
    if state.is_hand_complete() {
        return Err(GameError::NoHandInProgress);
    }
    let hole = match state.player(seat).hole_cards() {
        [Some(a), Some(b)] => [a, b],
        _ => return Err(GameError::NoHandInProgress),
    };
    if state.street() == Street::Preflop {
        Ok(preflop_advice(state, seat, hole))
    } else {
        postflop_advice(state, seat, hole)
    }
}

/// Orders a mix by descending frequency and picks the majority line.
/// Callers list the play before the fold so ties favor playing.
fn weighted(mut lines: Vec<Advice>) -> (Advice, Vec<Advice>) {
    lines.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    (lines[0].clone(), lines)
}

fn call_line(owed: u32, frequency: u8) -> Advice {
    if owed > 0 {
        Advice::sized(ActionKind::Call, owed, frequency)
    } else {
        Advice::plain(ActionKind::Call, frequency)
    }
}

fn preflop_advice(state: &GameState, seat: usize, hole: [Card; 2]) -> Recommendation {
    let notation = hole_notation(hole[0], hole[1]);
    let position = state.position_for(seat);
    let highest = state.highest_bet();
    let owed = state.to_call(seat);
    let mut details = Vec::new();

    let (primary, mixed, summary) = if highest <= state.big_blind() {
        let open_to = (state.big_blind() * 5 / 2).max(state.min_raise_to());
        let entry = rfi_entry(position, &notation).unwrap_or(RangeAction::Fold);
        details.push(format!(
            "{} opens {:.1}% of first-in hands",
            position.label(),
            open_rate(position)
        ));
        match entry {
            RangeAction::Raise(freq) => {
                let mut lines = vec![Advice::sized(ActionKind::Raise, open_to, freq)];
                if freq < 100 {
                    lines.push(Advice::plain(ActionKind::Fold, 100 - freq));
                }
                let (primary, mixed) = weighted(lines);
                let summary = format!("{notation} opens from {} at {freq}%", position.label());
                (primary, mixed, summary)
            }
            RangeAction::Call(freq) => {
                let mut lines = vec![call_line(owed, freq)];
                if freq < 100 {
                    lines.push(Advice::plain(ActionKind::Fold, 100 - freq));
                }
                let (primary, mixed) = weighted(lines);
                let summary = format!("{notation} limps from {} at {freq}%", position.label());
                (primary, mixed, summary)
            }
            RangeAction::Fold => (
                Advice::plain(ActionKind::Fold, 100),
                vec![Advice::plain(ActionKind::Fold, 100)],
                format!(
                    "{notation} is outside the {} first-in range",
                    position.label()
                ),
            ),
        }
    } else {
        let tier = preflop_tier(&notation);
        details.push(format!("hand tier {tier:.2} facing a raise to {highest}"));
        if tier >= 0.85 {
            let raise_to = highest * 3;
            (
                Advice::sized(ActionKind::Raise, raise_to, 100),
                vec![Advice::sized(ActionKind::Raise, raise_to, 100)],
                format!("{notation} is premium: re-raise to {raise_to}"),
            )
        } else if tier >= 0.5 {
            let lines = vec![
                call_line(owed, 70),
                Advice::sized(ActionKind::Raise, highest * 3, 30),
            ];
            let (primary, mixed) = weighted(lines);
            let summary = format!("{notation} continues, mostly flat-calling");
            (primary, mixed, summary)
        } else if tier >= 0.3 && late_position(position) {
            let lines = vec![Advice::plain(ActionKind::Fold, 60), call_line(owed, 40)];
            let (primary, mixed) = weighted(lines);
            let summary = format!("{notation} defends occasionally in position");
            (primary, mixed, summary)
        } else {
            (
                Advice::plain(ActionKind::Fold, 100),
                vec![Advice::plain(ActionKind::Fold, 100)],
                format!("{notation} folds to the raise"),
            )
        }
    };

    Recommendation {
        primary,
        mixed,
        rationale: Rationale { summary, details },
    }
}

fn postflop_advice(
    state: &GameState,
    seat: usize,
    hole: [Card; 2],
) -> Result<Recommendation, GameError> {
    let player = state.player(seat);
    let board = state.board();
    let made = hand_strength(hole, board);
    let draw = draw_equity(hole, board);
    let texture = board_texture(board);
    let highest = state.highest_bet();
    let pot = state.pot();
    let owed = state.to_call(seat);
    let stack = player.stack();
    let in_position = late_position(state.position_for(seat));

    let mut cards: Vec<Card> = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(board);
    let category = evaluate_hand(&cards)?.category;

    let mut details = vec![
        format!("made hand: {} (score {made:.2})", category.describe()),
        format!("draw equity {:.2}", draw.equity),
        texture_line(&texture),
    ];
    if owed > 0 {
        let pot_odds = f64::from(owed) / f64::from(pot + owed);
        details.push(format!("pot {pot}, {owed} to call (pot odds {pot_odds:.2})"));
    } else {
        details.push(format!("pot {pot}, free to act"));
    }
    let effective = state
        .players()
        .iter()
        .filter(|p| p.in_hand())
        .map(|p| p.stack())
        .min()
        .unwrap_or(0);
    if pot > 0 {
        details.push(format!(
            "effective stack {effective}, stack-to-pot {:.1}",
            f64::from(effective) / f64::from(pot)
        ));
    }

    let (lines, summary) = if owed > 0 {
        if made >= 0.7 {
            let raise_to = (highest + pot * 5 / 2).min(player.current_bet() + stack);
            (
                vec![
                    Advice::sized(ActionKind::Raise, raise_to, 60),
                    call_line(owed, 40),
                ],
                format!("strong {}: raise for value", category.describe()),
            )
        } else if made >= 0.4 {
            (
                vec![call_line(owed, 100)],
                format!("{} is worth a call", category.describe()),
            )
        } else if draw.equity >= f64::from(owed) / f64::from(pot + owed) {
            (
                vec![call_line(owed, 100)],
                "draw odds justify the call".to_string(),
            )
        } else if draw.equity >= 0.25 && in_position {
            let raise_to = (highest + pot * 3 / 4).min(player.current_bet() + stack);
            (
                vec![
                    Advice::plain(ActionKind::Fold, 70),
                    Advice::sized(ActionKind::Raise, raise_to, 30),
                ],
                "weak draw: mostly fold, occasionally semi-bluff".to_string(),
            )
        } else {
            (
                vec![Advice::plain(ActionKind::Fold, 100)],
                "too weak to continue".to_string(),
            )
        }
    } else if made >= 0.6 {
        let size = (pot * 2 / 3).max(state.big_blind()).min(stack);
        (
            vec![Advice::sized(ActionKind::Bet, size, 100)],
            format!("bet {} for value", category.describe()),
        )
    } else if made >= 0.35 && in_position {
        let size = (pot / 2).max(state.big_blind()).min(stack);
        (
            vec![
                Advice::plain(ActionKind::Check, 60),
                Advice::sized(ActionKind::Bet, size, 40),
            ],
            "medium strength in position: mix checks and small bets".to_string(),
        )
    } else if draw.equity >= 0.25 {
        let size = (pot * 3 / 5).max(state.big_blind()).min(stack);
        (
            vec![
                Advice::plain(ActionKind::Check, 65),
                Advice::sized(ActionKind::Bet, size, 35),
            ],
            "draw: mostly check, occasionally semi-bluff".to_string(),
        )
    } else {
        (
            vec![Advice::plain(ActionKind::Check, 100)],
            "nothing to bet: check".to_string(),
        )
    };

    let (primary, mixed) = weighted(lines);
    Ok(Recommendation {
        primary,
        mixed,
        rationale: Rationale { summary, details },
    })
}

fn texture_line(texture: &BoardTexture) -> String {
    let mut parts = vec![if texture.paired {
        "paired board"
    } else {
        "unpaired board"
    }
    .to_string()];
    if texture.flush_draw_possible {
        parts.push("flush draws possible".to_string());
    }
    if texture.straight_draw_possible {
        parts.push("connected".to_string());
    }
    format!("texture: {}", parts.join(", "))
}

/// Renders a recommendation for terminal output.
pub fn format_recommendation(rec: &Recommendation) -> String {
    let mut out = format!(
        "Advice: {} ({}%)\n",
        action_phrase(&rec.primary),
        rec.primary.frequency
    );
    out.push_str(&format!("Why: {}\n", rec.rationale.summary));
    for line in &rec.rationale.details {
        out.push_str(&format!("  {line}\n"));
    }
    if rec.mixed.len() > 1 {
        out.push_str("Mix:\n");
        for advice in &rec.mixed {
            out.push_str(&format!(
                "  - {}: {}%\n",
                action_phrase(advice),
                advice.frequency
            ));
        }
    }
    out
}

fn action_phrase(advice: &Advice) -> String {
    let verb = match advice.kind {
        ActionKind::Fold => "fold",
        ActionKind::Check => "check",
        ActionKind::Call => "call",
        ActionKind::Bet => "bet",
        ActionKind::Raise => "raise to",
        ActionKind::AllIn => "all-in",
    };
    match advice.amount {
        Some(amount) => format!("{verb} {amount}"),
        None => verb.to_string(),
    }
}
