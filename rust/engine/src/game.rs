use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{Player, Position};
use crate::pot;

/// Represents a betting street in Texas Hold'em.
/// Showdown is the terminal street, not a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// Before the flop (hole cards dealt)
    Preflop,
    /// After the flop (3 community cards)
    Flop,
    /// After the turn (4th community card)
    Turn,
    /// After the river (5th community card)
    River,
    /// Hands revealed, pot resolution
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        }
    }
}

/// Fixed per-session table parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub seats: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            starting_stack: 10_000,
            small_blind: 50,
            big_blind: 100,
            seats: 6,
        }
    }
}

/// Complete table state for one session, mutated in place across hands.
///
/// Seating order is fixed; the acting player is tracked by index. `pot`
/// holds the chips collected from completed streets and is recomputed at
/// each street transition; [`total_pot`](GameState::total_pot) additionally
/// counts the current street's bets.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) players: Vec<Player>,
    pub(crate) board: Vec<Card>,
    pub(crate) pot: u32,
    pub(crate) street: Street,
    pub(crate) current: usize,
    pub(crate) dealer: usize,
    pub(crate) small_blind: u32,
    pub(crate) big_blind: u32,
    pub(crate) last_raise: u32,
    pub(crate) aggressor: Option<usize>,
    pub(crate) hand_id: u64,
    pub(crate) hand_complete: bool,
}

impl GameState {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> &Player {
        &self.players[seat]
    }

    pub fn seat_count(&self) -> usize {
        self.players.len()
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Chips collected from completed streets.
    pub fn pot(&self) -> u32 {
        self.pot
    }

    /// Everything committed to the hand so far, current street included.
    pub fn total_pot(&self) -> u32 {
        self.players.iter().map(|p| p.total_bet()).sum()
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn current_seat(&self) -> usize {
        self.current
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }

    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }

    pub fn last_raise(&self) -> u32 {
        self.last_raise
    }

    pub fn aggressor(&self) -> Option<usize> {
        self.aggressor
    }

    pub fn hand_id(&self) -> u64 {
        self.hand_id
    }

    pub fn is_hand_complete(&self) -> bool {
        self.hand_complete
    }

    /// Highest street commitment at the table.
    pub fn highest_bet(&self) -> u32 {
        self.players
            .iter()
            .map(|p| p.current_bet())
            .max()
            .unwrap_or(0)
    }

    pub fn to_call(&self, seat: usize) -> u32 {
        let p = &self.players[seat];
        pot::call_amount(p.current_bet(), p.stack(), self.highest_bet())
    }

    /// Minimum legal raise-to total for the acting player.
    pub fn min_raise_to(&self) -> u32 {
        pot::min_raise_to(self.highest_bet(), self.last_raise, self.big_blind)
    }

    /// Seats dealt in and not folded. All-in players remain in the hand.
    pub fn seats_in_hand(&self) -> Vec<usize> {
        self.players
            .iter()
            .filter(|p| p.in_hand())
            .map(|p| p.seat())
            .collect()
    }

    pub fn can_act_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// Position label assigned to `seat` when the current hand was dealt.
    ///
    /// Labels walk the ring of dealt-in seats starting at the button, so a
    /// busted seat shifts the ring instead of holding an empty slot.
    pub fn position_for(&self, seat: usize) -> Position {
        self.players[seat].position()
    }
}

/// One seat as presented to a viewer. Hole cards of other seats are absent
/// until showdown.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub seat: usize,
    pub position: Position,
    pub stack: u32,
    pub current_bet: u32,
    pub total_bet: u32,
    pub folded: bool,
    pub all_in: bool,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<[Card; 2]>,
}

/// Redacted table snapshot for presentation. The engine itself always holds
/// full information; this is the boundary any outer layer serializes.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub hand_id: u64,
    pub street: Street,
    pub board: Vec<Card>,
    pub pot: u32,
    pub current: usize,
    pub dealer: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub hand_complete: bool,
    pub players: Vec<PlayerView>,
}

impl GameView {
    pub fn for_viewer(state: &GameState, viewer: Option<usize>) -> GameView {
        let reveal_all = state.street == Street::Showdown;
        let players = state
            .players
            .iter()
            .map(|p| {
                let own = viewer == Some(p.seat());
                let hole = if own || reveal_all {
                    match p.hole_cards() {
                        [Some(a), Some(b)] => Some([a, b]),
                        _ => None,
                    }
                } else {
                    None
                };
                PlayerView {
                    id: p.id().to_string(),
                    seat: p.seat(),
                    position: p.position(),
                    stack: p.stack(),
                    current_bet: p.current_bet(),
                    total_bet: p.total_bet(),
                    folded: p.is_folded(),
                    all_in: p.is_all_in(),
                    active: p.is_active(),
                    hole,
                }
            })
            .collect();
        GameView {
            hand_id: state.hand_id,
            street: state.street,
            board: state.board.clone(),
            pot: state.total_pot(),
            current: state.current,
            dealer: state.dealer,
            small_blind: state.small_blind,
            big_blind: state.big_blind,
            hand_complete: state.hand_complete,
            players,
        }
    }
}
