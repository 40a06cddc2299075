use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Table position relative to the dealer button, reassigned every hand.
/// Short tables use the leading labels in order (heads-up: BTN and SB).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "BTN")]
    Button,
    #[serde(rename = "SB")]
    SmallBlind,
    #[serde(rename = "BB")]
    BigBlind,
    #[serde(rename = "UTG")]
    UnderTheGun,
    #[serde(rename = "HJ")]
    Hijack,
    #[serde(rename = "CO")]
    Cutoff,
}

impl Position {
    /// Canonical labels walking away from the button.
    pub fn order_from_button() -> [Position; 6] {
        [
            Position::Button,
            Position::SmallBlind,
            Position::BigBlind,
            Position::UnderTheGun,
            Position::Hijack,
            Position::Cutoff,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Button => "BTN",
            Position::SmallBlind => "SB",
            Position::BigBlind => "BB",
            Position::UnderTheGun => "UTG",
            Position::Hijack => "HJ",
            Position::Cutoff => "CO",
        }
    }
}

/// Represents a player action during a betting round.
/// `Raise` carries the raise-to total (the player's new street commitment),
/// matching how raises are announced; `Bet` carries the bet size.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid when matching the highest bet)
    Check,
    /// Call the current bet
    Call,
    /// Open the betting for the specified amount
    Bet(u32),
    /// Raise to the specified street total
    Raise(u32),
    /// Commit the entire remaining stack
    AllIn,
}

/// Bare action label, the vocabulary shared with logs and any outer layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Bet(_) => ActionKind::Bet,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }
}

/// A seat at the table: chips, cards, and the per-street betting flags the
/// state machine runs on.
///
/// Chips only move through [`commit`](Player::commit) and
/// [`add_chips`](Player::add_chips), which keeps conservation checks in one
/// place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier across hands
    id: String,
    /// Fixed seat index (seating order never changes)
    seat: usize,
    /// Position label for the current hand
    position: Position,
    /// Current chip stack
    stack: u32,
    /// Hole cards (exactly two once dealt)
    hole: [Option<Card>; 2],
    /// Chips committed on the current street
    current_bet: u32,
    /// Chips committed across the whole hand
    total_bet: u32,
    folded: bool,
    all_in: bool,
    /// Dealt into the current hand (seats with no chips sit out)
    active: bool,
    /// Acted since the last bet or raise on this street
    has_acted: bool,
}

impl Player {
    pub fn new(id: impl Into<String>, seat: usize, stack: u32) -> Self {
        Self {
            id: id.into(),
            seat,
            position: Position::Button,
            stack,
            hole: [None, None],
            current_bet: 0,
            total_bet: 0,
            folded: false,
            all_in: false,
            active: stack > 0,
            has_acted: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn seat(&self) -> usize {
        self.seat
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn total_bet(&self) -> u32 {
        self.total_bet
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    pub fn hole_cards(&self) -> [Option<Card>; 2] {
        self.hole
    }

    /// Still contesting the hand (dealt in and not folded).
    pub fn in_hand(&self) -> bool {
        self.active && !self.folded
    }

    /// Able to take an action (in the hand and not all-in).
    pub fn can_act(&self) -> bool {
        self.in_hand() && !self.all_in
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn set_position(&mut self, pos: Position) {
        self.position = pos;
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), GameError> {
        if self.hole[0].is_none() {
            self.hole[0] = Some(c);
            Ok(())
        } else if self.hole[1].is_none() {
            self.hole[1] = Some(c);
            Ok(())
        } else {
            Err(GameError::InsufficientCards)
        }
    }

    pub fn clear_cards(&mut self) {
        self.hole = [None, None];
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Moves chips from the stack into the current street's bet. Committing
    /// the whole stack flips the all-in flag.
    pub fn commit(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientChips);
        }
        self.stack -= amount;
        self.current_bet += amount;
        self.total_bet += amount;
        if self.stack == 0 && self.active {
            self.all_in = true;
        }
        Ok(())
    }

    pub fn fold(&mut self) {
        self.folded = true;
        self.active = false;
        self.has_acted = true;
    }

    pub fn mark_acted(&mut self) {
        self.has_acted = true;
    }

    pub fn clear_acted(&mut self) {
        self.has_acted = false;
    }

    /// Resets per-hand fields. `active` reflects whether the seat has chips
    /// to play this hand.
    pub fn reset_for_hand(&mut self) {
        self.hole = [None, None];
        self.current_bet = 0;
        self.total_bet = 0;
        self.folded = false;
        self.all_in = false;
        self.has_acted = false;
        self.active = self.stack > 0;
    }

    /// Clears the street-scoped fields at a street transition.
    pub fn begin_street(&mut self) {
        self.current_bet = 0;
        self.has_acted = false;
    }
}
