//! Deal command handler for single hand dealing and display.
//!
//! This module provides the `deal` command which deals hole cards for a
//! table of seats plus the full five-card board, everything face up. The
//! command supports optional seeding for deterministic dealing.

use crate::error::CliError;
use crate::ui::format_cards;
use riverline_engine::deck::Deck;
use std::io::Write;

/// Handle the deal command.
///
/// Deals hole cards for `seats` players and a complete board, with the
/// usual burn card before each board street. The same seed always prints
/// the same hand.
pub fn handle_deal_command(
    seed: Option<u64>,
    seats: Option<usize>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seats = seats.unwrap_or(2);
    if !(2..=6).contains(&seats) {
        return Err(CliError::InvalidInput(format!(
            "seats must be between 2 and 6, got {}",
            seats
        )));
    }

    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();

    writeln!(out, "Seed: {}", seed)?;
    for seat in 0..seats {
        let hole = deck.deal(2)?;
        writeln!(out, "Seat {}: {}", seat, format_cards(&hole))?;
    }

    let mut board = deck.deal_with_burn(3)?;
    board.extend(deck.deal_with_burn(1)?);
    board.extend(deck.deal_with_burn(1)?);
    writeln!(out, "Board: {}", format_cards(&board))?;

    Ok(())
}
