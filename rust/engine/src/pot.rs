use serde::Serialize;

use crate::hand::{self, HandStrength};

/// Chips a player must add to match the table's highest bet, clamped to
/// their remaining stack.
pub fn call_amount(current_bet: u32, stack: u32, highest_bet: u32) -> u32 {
    highest_bet.saturating_sub(current_bet).min(stack)
}

/// Minimum legal raise-to total: the highest bet plus the last full raise
/// increment, never less than one big blind on top.
pub fn min_raise_to(highest_bet: u32, last_raise: u32, big_blind: u32) -> u32 {
    highest_bet + last_raise.max(big_blind)
}

/// One pot layer and the seats entitled to win it, ascending by seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: Vec<usize>,
}

/// Splits the chips committed to a hand into a main pot and side pots.
///
/// Pots are layered bottom-up over the distinct contribution totals of the
/// players still in the hand. Chips from folded players cannot be won back,
/// so they are added to the main pot. When every contribution is equal this
/// degenerates to a single pot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    /// Builds pots from per-seat contribution totals. `folded[seat]` marks
    /// chips that stay in the pot without a claim on it.
    pub fn build(contributions: &[u32], folded: &[bool]) -> PotManager {
        let dead: u32 = contributions
            .iter()
            .zip(folded)
            .filter(|(_, &f)| f)
            .map(|(&c, _)| c)
            .sum();
        let mut live: Vec<(usize, u32)> = contributions
            .iter()
            .zip(folded)
            .enumerate()
            .filter(|(_, (&c, &f))| !f && c > 0)
            .map(|(seat, (&c, _))| (seat, c))
            .collect();
        live.sort_by_key(|&(seat, c)| (c, seat));

        let mut levels: Vec<u32> = live.iter().map(|&(_, c)| c).collect();
        levels.dedup();

        let mut pots = Vec::new();
        let mut prev = 0u32;
        for level in levels {
            let eligible: Vec<usize> = {
                let mut seats: Vec<usize> = live
                    .iter()
                    .filter(|&&(_, c)| c >= level)
                    .map(|&(seat, _)| seat)
                    .collect();
                seats.sort_unstable();
                seats
            };
            let mut amount = (level - prev) * eligible.len() as u32;
            if pots.is_empty() {
                amount += dead;
            }
            pots.push(Pot { amount, eligible });
            prev = level;
        }
        if pots.is_empty() && dead > 0 {
            // Nobody with a claim has chips in, yet dead money exists; it
            // goes to the players still standing.
            let eligible: Vec<usize> = folded
                .iter()
                .enumerate()
                .filter(|(_, &f)| !f)
                .map(|(seat, _)| seat)
                .collect();
            if !eligible.is_empty() {
                pots.push(Pot {
                    amount: dead,
                    eligible,
                });
            }
        }
        PotManager { pots }
    }

    /// Builds pots with no folds, for all-in layering on its own.
    pub fn from_contributions(contributions: &[u32]) -> PotManager {
        PotManager::build(contributions, &vec![false; contributions.len()])
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    /// Amount of the main pot, which every contributor can win.
    pub fn main_pot(&self) -> u32 {
        self.pots.first().map(|p| p.amount).unwrap_or(0)
    }

    /// Side pot amounts beyond the main pot, in creation order.
    pub fn side_pots(&self) -> Vec<u32> {
        self.pots.iter().skip(1).map(|p| p.amount).collect()
    }

    /// Pays out every pot against the showdown strengths, indexed by seat.
    /// Ties split evenly; an odd remainder goes to the lowest winning seat.
    /// Returns the payout per seat.
    pub fn distribute(&self, strengths: &[Option<HandStrength>]) -> Vec<u32> {
        let mut payouts = vec![0u32; strengths.len()];
        for pot in &self.pots {
            let entries: Vec<(usize, HandStrength)> = pot
                .eligible
                .iter()
                .filter_map(|&seat| {
                    strengths
                        .get(seat)
                        .and_then(|s| s.clone())
                        .map(|s| (seat, s))
                })
                .collect();
            let winners: Vec<usize> = if entries.is_empty() {
                pot.eligible.clone()
            } else {
                let hands: Vec<HandStrength> =
                    entries.iter().map(|(_, s)| s.clone()).collect();
                hand::determine_winners(&hands)
                    .into_iter()
                    .map(|i| entries[i].0)
                    .collect()
            };
            if winners.is_empty() {
                continue;
            }
            let share = pot.amount / winners.len() as u32;
            let remainder = pot.amount % winners.len() as u32;
            for &seat in &winners {
                payouts[seat] += share;
            }
            payouts[winners[0]] += remainder;
        }
        payouts
    }
}
