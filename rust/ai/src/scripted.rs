//! Scripted opponents: a range-based player with seeded mixed
//! strategies, and a deterministic calling station.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use riverline_engine::cards::{hole_notation, Card};
use riverline_engine::engine::Engine;
use riverline_engine::game::{GameState, Street};
use riverline_engine::player::PlayerAction;

use crate::ranges::{rfi_entry, RangeAction};
use crate::strength::{draw_equity, hand_strength, late_position, preflop_tier};
use crate::Policy;

/// Range-based opponent.
///
/// Preflop it opens from positional tables and defends against raises by
/// hand tier; postflop it weighs made-hand strength, draws, and pot odds.
/// Mixed decisions draw from the policy's own seeded RNG, so a session
/// replays identically under the same engine and policy seeds.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    rng: ChaCha20Rng,
}

impl ScriptedPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.random::<f64>() < p
    }

    fn preflop(&mut self, state: &GameState, seat: usize, notation: &str) -> PlayerAction {
        let highest = state.highest_bet();
        if highest <= state.big_blind() {
            self.open_first_in(state, seat, notation)
        } else {
            self.defend_vs_raise(state, seat, notation, highest)
        }
    }

    /// Nobody has raised yet: consult the opening table for our seat.
    fn open_first_in(&mut self, state: &GameState, seat: usize, notation: &str) -> PlayerAction {
        let entry = match rfi_entry(state.position_for(seat), notation) {
            Some(entry) => entry,
            None => return PlayerAction::Fold,
        };
        let freq = match entry {
            RangeAction::Raise(f) | RangeAction::Call(f) => f,
            RangeAction::Fold => return PlayerAction::Fold,
        };
        if freq < 100 && self.rng.random::<f64>() * 100.0 >= f64::from(freq) {
            return PlayerAction::Fold;
        }
        match entry {
            RangeAction::Raise(_) => {
                // 2.5x open, bumped to the legal minimum for unusual blinds
                let open_to = (state.big_blind() * 5 / 2).max(state.min_raise_to());
                PlayerAction::Raise(open_to)
            }
            _ => PlayerAction::Call,
        }
    }

    /// Facing an open: continue by tier, three-betting the top of the range.
    fn defend_vs_raise(
        &mut self,
        state: &GameState,
        seat: usize,
        notation: &str,
        highest: u32,
    ) -> PlayerAction {
        let tier = preflop_tier(notation);
        if tier >= 0.85 {
            return PlayerAction::Raise(highest * 3);
        }
        if tier >= 0.5 {
            return if self.chance(0.3) {
                PlayerAction::Raise(highest * 3)
            } else {
                PlayerAction::Call
            };
        }
        if tier >= 0.3 && late_position(state.position_for(seat)) && self.chance(0.4) {
            return PlayerAction::Call;
        }
        PlayerAction::Fold
    }

    fn postflop(&mut self, state: &GameState, seat: usize, hole: [Card; 2]) -> PlayerAction {
        let player = state.player(seat);
        let board = state.board();
        let made = hand_strength(hole, board);
        let draw = draw_equity(hole, board);
        let highest = state.highest_bet();
        let pot = state.pot();
        let stack = player.stack();
        let in_position = late_position(state.position_for(seat));

        if highest > player.current_bet() {
            let owed = state.to_call(seat);
            let pot_odds = f64::from(owed) / f64::from(pot + owed);

            if made >= 0.7 {
                return if self.chance(0.6) {
                    PlayerAction::Raise(highest + (pot * 5 / 2).min(stack))
                } else {
                    PlayerAction::Call
                };
            }
            if made >= 0.4 || draw.equity >= pot_odds {
                return PlayerAction::Call;
            }
            if draw.equity >= 0.25 && self.chance(0.3) && in_position {
                return PlayerAction::Raise(highest + pot * 3 / 4);
            }
            return PlayerAction::Fold;
        }

        if made >= 0.6 {
            let size = (f64::from(pot) * (0.5 + self.rng.random::<f64>() * 0.33)) as u32;
            return PlayerAction::Bet(size.min(stack));
        }
        if made >= 0.35 && in_position {
            return if self.chance(0.4) {
                PlayerAction::Bet((pot / 2).min(stack))
            } else {
                PlayerAction::Check
            };
        }
        if draw.equity >= 0.25 && self.chance(0.35) {
            return PlayerAction::Bet((pot * 3 / 5).min(stack));
        }
        PlayerAction::Check
    }
}

impl Policy for ScriptedPolicy {
    fn decide(&mut self, engine: &Engine, seat: usize) -> PlayerAction {
        let state = engine.state();
        let hole = match state.player(seat).hole_cards() {
            [Some(a), Some(b)] => [a, b],
            _ => {
                return if state.to_call(seat) == 0 {
                    PlayerAction::Check
                } else {
                    PlayerAction::Fold
                };
            }
        };
        let notation = hole_notation(hole[0], hole[1]);
        match state.street() {
            Street::Preflop => self.preflop(state, seat, &notation),
            _ => self.postflop(state, seat, hole),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// The deterministic reference opponent: checks when free, calls any bet.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerPolicy;

impl CallerPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for CallerPolicy {
    fn decide(&mut self, engine: &Engine, seat: usize) -> PlayerAction {
        if engine.state().to_call(seat) == 0 {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        }
    }

    fn name(&self) -> &str {
        "caller"
    }
}
