use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Ordered 52-card deck consumed front to back within a hand.
///
/// The deck owns its RNG so a session seeded once deals a reproducible
/// sequence of hands; each `shuffle` draws the next permutation from the
/// same stream.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep canonical order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    /// Deals exactly `n` cards or fails without consuming any.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.remaining() {
            return Err(GameError::InsufficientCards);
        }
        let mut dealt = Vec::with_capacity(n);
        for _ in 0..n {
            match self.deal_card() {
                Some(c) => dealt.push(c),
                None => return Err(GameError::InsufficientCards),
            }
        }
        Ok(dealt)
    }

    /// Discards one card face down, then deals `n`. Used for every board
    /// reveal (flop, turn, river).
    pub fn deal_with_burn(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n + 1 > self.remaining() {
            return Err(GameError::InsufficientCards);
        }
        self.burn_card();
        self.deal(n)
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
