use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{GameSettings, GameState, GameView, Street};
use crate::hand::{self, HandStrength};
use crate::logger::{ActionRecord, HandRecord, SeatSummary, WinnerRecord};
use crate::player::{ActionKind, Player, PlayerAction, Position};
use crate::pot::PotManager;
use crate::rules::{self, ActionOption, BetContext, ValidatedAction};

/// Result of applying one action, as reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedAction {
    pub seat: usize,
    /// What actually happened, shove conversions included
    pub action: ValidatedAction,
    /// The betting round closed and the board moved on
    pub street_advanced: bool,
    pub hand_complete: bool,
}

/// Core game engine orchestrating complete hands: blinds, dealing, the
/// betting state machine, street advancement, and pot resolution.
///
/// One engine drives one session. Determinism comes from the session seed:
/// the deck reshuffles from the same RNG stream every hand, so a seed plus
/// the action sequence replays identically.
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    deck: Deck,
    seed: u64,
    /// Sum of all stacks at session start, for conservation checks
    total_chips: u32,
    /// Stacks as they were when the current hand was dealt
    stacks_at_deal: Vec<u32>,
    actions: Vec<ActionRecord>,
    winners: Vec<WinnerRecord>,
}

impl Engine {
    /// Creates an engine with a random session seed.
    pub fn new(settings: GameSettings) -> Result<Self, GameError> {
        Engine::with_seed(settings, rand::random())
    }

    /// Creates an engine with an explicit session seed.
    pub fn with_seed(settings: GameSettings, seed: u64) -> Result<Self, GameError> {
        if !(2..=6).contains(&settings.seats) {
            return Err(GameError::InvalidSeatCount(settings.seats));
        }
        if settings.small_blind == 0 || settings.small_blind > settings.big_blind {
            return Err(GameError::InvalidBlinds {
                small: settings.small_blind,
                big: settings.big_blind,
            });
        }
        let players: Vec<Player> = (0..settings.seats)
            .map(|seat| Player::new(format!("p{seat}"), seat, settings.starting_stack))
            .collect();
        let stacks_at_deal = players.iter().map(|p| p.stack()).collect();
        let state = GameState {
            players,
            board: Vec::with_capacity(5),
            pot: 0,
            street: Street::Preflop,
            current: 0,
            // first hand rotates the button to seat 0
            dealer: settings.seats - 1,
            small_blind: settings.small_blind,
            big_blind: settings.big_blind,
            last_raise: settings.big_blind,
            aggressor: None,
            hand_id: 0,
            hand_complete: true,
        };
        Ok(Self {
            state,
            deck: Deck::new_with_seed(seed),
            seed,
            total_chips: settings.starting_stack * settings.seats as u32,
            stacks_at_deal,
            actions: Vec::new(),
            winners: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Snapshot for presentation, hole cards redacted for `viewer`.
    pub fn view(&self, viewer: Option<usize>) -> GameView {
        GameView::for_viewer(&self.state, viewer)
    }

    /// Actions taken so far in the current hand.
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Pot awards from the most recent resolution.
    pub fn last_winners(&self) -> &[WinnerRecord] {
        &self.winners
    }

    /// Renames a seat's stable identifier, for labelled logs.
    pub fn set_player_id(&mut self, seat: usize, id: impl Into<String>) {
        if let Some(p) = self.state.players.get_mut(seat) {
            p.set_id(id);
        }
    }

    /// Deals the next hand: rotates the button, posts blinds, deals hole
    /// cards, and hands the action to the first player to act. If the
    /// blinds already put everyone all-in the board runs out immediately.
    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        if !self.state.hand_complete {
            return Err(GameError::HandInProgress);
        }
        let funded = self.state.players.iter().filter(|p| p.stack() > 0).count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        for p in &mut self.state.players {
            p.reset_for_hand();
        }
        self.state.hand_id += 1;
        self.state.board.clear();
        self.state.pot = 0;
        self.state.street = Street::Preflop;
        self.state.last_raise = self.state.big_blind;
        self.state.aggressor = None;
        self.state.hand_complete = false;
        self.actions.clear();
        self.winners.clear();
        self.stacks_at_deal = self.state.players.iter().map(|p| p.stack()).collect();

        let len = self.state.players.len();
        let next_dealer = (1..=len)
            .map(|k| (self.state.dealer + k) % len)
            .find(|&s| self.state.players[s].is_active())
            .ok_or(GameError::NotEnoughPlayers)?;
        self.state.dealer = next_dealer;

        // Position labels walk the ring of seats dealt in. Two-handed this
        // leaves the button posting the big blind.
        let ring = self.active_seats_from(self.state.dealer);
        let labels = Position::order_from_button();
        for (i, &seat) in ring.iter().enumerate() {
            self.state.players[seat].set_position(labels[i]);
        }

        let sb_seat = ring[1 % ring.len()];
        let bb_seat = ring[2 % ring.len()];
        let sb = self
            .state
            .small_blind
            .min(self.state.players[sb_seat].stack());
        self.state.players[sb_seat].commit(sb)?;
        let bb = self.state.big_blind.min(self.state.players[bb_seat].stack());
        self.state.players[bb_seat].commit(bb)?;

        self.deck.shuffle();
        for seat in 0..len {
            if self.state.players[seat].is_active() {
                let cards = self.deck.deal(2)?;
                self.state.players[seat].give_card(cards[0])?;
                self.state.players[seat].give_card(cards[1])?;
            }
        }

        self.state.current = ring[3 % ring.len()];
        self.settle()?;
        self.check_conservation();
        Ok(())
    }

    /// Applies one action for `seat`, then advances play: passes the turn
    /// on, closes the betting round, runs out the board, or resolves the
    /// hand, whatever the table state calls for.
    pub fn apply_action(
        &mut self,
        seat: usize,
        action: PlayerAction,
    ) -> Result<AppliedAction, GameError> {
        if self.state.hand_complete {
            return Err(GameError::HandAlreadyComplete);
        }
        if seat != self.state.current {
            return Err(GameError::NotPlayersTurn {
                expected: self.state.current,
                actual: seat,
            });
        }
        if self.state.players[seat].is_folded() {
            return Err(GameError::PlayerAlreadyFolded);
        }

        let ctx = self.bet_context(seat);
        let validated = rules::validate_action(action, &ctx)?;
        let prev_highest = ctx.highest_bet;

        match validated {
            ValidatedAction::Fold => {
                self.state.players[seat].fold();
            }
            ValidatedAction::Check => {
                self.state.players[seat].mark_acted();
            }
            ValidatedAction::Call(owed) => {
                self.state.players[seat].commit(owed)?;
                self.state.players[seat].mark_acted();
            }
            ValidatedAction::Bet(amount) => {
                self.state.players[seat].commit(amount)?;
                self.state.last_raise = amount;
                self.state.aggressor = Some(seat);
                self.clear_others_acted(seat);
                self.state.players[seat].mark_acted();
            }
            ValidatedAction::Raise(to) => {
                let delta = to - ctx.current_bet;
                self.state.players[seat].commit(delta)?;
                self.state.last_raise = to - prev_highest;
                self.state.aggressor = Some(seat);
                self.clear_others_acted(seat);
                self.state.players[seat].mark_acted();
            }
            ValidatedAction::AllIn(stack) => {
                self.state.players[seat].commit(stack)?;
                let total = self.state.players[seat].current_bet();
                if total > prev_highest {
                    self.state.aggressor = Some(seat);
                    // A short shove below the minimum raise does not reopen
                    // the betting for players who already acted.
                    if total >= ctx.min_raise_to {
                        self.state.last_raise = total - prev_highest;
                        self.clear_others_acted(seat);
                    }
                }
                self.state.players[seat].mark_acted();
            }
        }

        self.actions.push(ActionRecord {
            seat,
            street: self.state.street,
            kind: match validated {
                ValidatedAction::Fold => ActionKind::Fold,
                ValidatedAction::Check => ActionKind::Check,
                ValidatedAction::Call(_) => ActionKind::Call,
                ValidatedAction::Bet(_) => ActionKind::Bet,
                ValidatedAction::Raise(_) => ActionKind::Raise,
                ValidatedAction::AllIn(_) => ActionKind::AllIn,
            },
            amount: match validated {
                ValidatedAction::Fold | ValidatedAction::Check => None,
                ValidatedAction::Call(n) | ValidatedAction::AllIn(n) => Some(n),
                ValidatedAction::Bet(n) | ValidatedAction::Raise(n) => Some(n),
            },
        });

        let street_before = self.state.street;
        self.state.current = (seat + 1) % self.state.players.len();
        self.settle()?;
        self.check_conservation();
        Ok(AppliedAction {
            seat,
            action: validated,
            street_advanced: self.state.street != street_before,
            hand_complete: self.state.hand_complete,
        })
    }

    /// Applies the action if legal; an illegal action degrades to a check
    /// when checking is free, otherwise to a fold. Turn-order and hand
    /// lifecycle errors still propagate. Keeps scripted opponents from
    /// wedging a hand on a bad decision.
    pub fn apply_action_or_fallback(
        &mut self,
        seat: usize,
        action: PlayerAction,
    ) -> Result<AppliedAction, GameError> {
        match self.apply_action(seat, action) {
            Ok(applied) => Ok(applied),
            Err(
                e @ (GameError::HandAlreadyComplete
                | GameError::NotPlayersTurn { .. }
                | GameError::PlayerAlreadyFolded),
            ) => Err(e),
            Err(_) => match self.apply_action(seat, PlayerAction::Check) {
                Ok(applied) => Ok(applied),
                Err(_) => self.apply_action(seat, PlayerAction::Fold),
            },
        }
    }

    /// Legal actions for `seat` right now; empty when the seat cannot act.
    pub fn available_actions(&self, seat: usize) -> Vec<ActionOption> {
        if self.state.hand_complete
            || seat != self.state.current
            || !self.state.players[seat].can_act()
        {
            return Vec::new();
        }
        rules::available_actions(&self.bet_context(seat))
    }

    /// The betting context the validator sees for `seat`.
    pub fn bet_context(&self, seat: usize) -> BetContext {
        let p = &self.state.players[seat];
        BetContext {
            street: self.state.street,
            highest_bet: self.state.highest_bet(),
            current_bet: p.current_bet(),
            stack: p.stack(),
            min_raise_to: self.state.min_raise_to(),
            big_blind: self.state.big_blind,
        }
    }

    /// Full record of the most recently completed hand.
    pub fn hand_record(&self) -> HandRecord {
        HandRecord {
            hand_id: self.state.hand_id,
            ts: None,
            seed: self.seed,
            small_blind: self.state.small_blind,
            big_blind: self.state.big_blind,
            dealer: self.state.dealer,
            board: self.state.board.iter().map(|c| c.to_string()).collect(),
            seats: self
                .state
                .players
                .iter()
                .map(|p| SeatSummary {
                    seat: p.seat(),
                    player_id: p.id().to_string(),
                    hole: match p.hole_cards() {
                        [Some(a), Some(b)] => Some([a.to_string(), b.to_string()]),
                        _ => None,
                    },
                    net: p.stack() as i64 - self.stacks_at_deal[p.seat()] as i64,
                })
                .collect(),
            actions: self.actions.clone(),
            winners: self.winners.clone(),
        }
    }

    /// Seats dealt in, clockwise starting at `start` inclusive.
    fn active_seats_from(&self, start: usize) -> Vec<usize> {
        let len = self.state.players.len();
        (0..len)
            .map(|k| (start + k) % len)
            .filter(|&s| self.state.players[s].is_active())
            .collect()
    }

    fn clear_others_acted(&mut self, seat: usize) {
        for p in &mut self.state.players {
            if p.seat() != seat && p.can_act() {
                p.clear_acted();
            }
        }
    }

    fn players_in_hand(&self) -> usize {
        self.state.players.iter().filter(|p| p.in_hand()).count()
    }

    /// The betting round is over when at most one player is left, nobody
    /// can act, or every player who can act has acted since the last
    /// aggression and matched the highest bet.
    fn betting_round_complete(&self) -> bool {
        if self.players_in_hand() <= 1 {
            return true;
        }
        let can_act: Vec<&Player> = self.state.players.iter().filter(|p| p.can_act()).collect();
        if can_act.is_empty() {
            return true;
        }
        let highest = self.state.highest_bet();
        can_act
            .iter()
            .all(|p| p.has_acted() && p.current_bet() == highest)
    }

    /// Drives the table to its next decision point: the next seat to act,
    /// the next street, or resolution.
    fn settle(&mut self) -> Result<(), GameError> {
        loop {
            if self.players_in_hand() <= 1 {
                return self.resolve_by_fold();
            }
            if !self.betting_round_complete() {
                if let Some(seat) = self.seat_to_act_from(self.state.current) {
                    self.state.current = seat;
                }
                return Ok(());
            }
            if self.state.street == Street::River {
                return self.resolve_showdown();
            }
            self.advance_street()?;
        }
    }

    fn seat_to_act_from(&self, start: usize) -> Option<usize> {
        let len = self.state.players.len();
        (0..len)
            .map(|k| (start + k) % len)
            .find(|&s| self.state.players[s].can_act())
    }

    /// Folds the street's bets into the pot and deals the next board cards.
    fn advance_street(&mut self) -> Result<(), GameError> {
        self.state.pot = self.state.total_pot();
        for p in &mut self.state.players {
            p.begin_street();
        }
        self.state.last_raise = self.state.big_blind;
        self.state.aggressor = None;
        self.state.street = self.state.street.next();
        match self.state.street {
            Street::Flop => {
                let cards = self.deck.deal_with_burn(3)?;
                self.state.board.extend(cards);
            }
            Street::Turn | Street::River => {
                let cards = self.deck.deal_with_burn(1)?;
                self.state.board.extend(cards);
            }
            Street::Preflop | Street::Showdown => {}
        }
        // postflop action starts left of the button
        self.state.current = (self.state.dealer + 1) % self.state.players.len();
        Ok(())
    }

    /// Awards the whole pot to the last player standing.
    fn resolve_by_fold(&mut self) -> Result<(), GameError> {
        let winner = self
            .state
            .players
            .iter()
            .find(|p| p.in_hand())
            .map(|p| p.seat())
            .ok_or(GameError::NotEnoughPlayers)?;
        let total = self.state.total_pot();
        self.state.players[winner].add_chips(total);
        self.state.pot = 0;
        self.state.hand_complete = true;
        self.winners.push(WinnerRecord {
            seat: winner,
            amount: total,
            description: None,
        });
        Ok(())
    }

    /// Evaluates every live hand against the board and pays out the pots.
    fn resolve_showdown(&mut self) -> Result<(), GameError> {
        self.state.street = Street::Showdown;
        let seats = self.state.players.len();
        let mut strengths: Vec<Option<HandStrength>> = vec![None; seats];
        for p in &self.state.players {
            if !p.in_hand() {
                continue;
            }
            if let [Some(a), Some(b)] = p.hole_cards() {
                let mut cards = Vec::with_capacity(7);
                cards.push(a);
                cards.push(b);
                cards.extend_from_slice(&self.state.board);
                strengths[p.seat()] = Some(hand::evaluate_hand(&cards)?);
            }
        }

        let contributions: Vec<u32> = self.state.players.iter().map(|p| p.total_bet()).collect();
        let no_claim: Vec<bool> = self.state.players.iter().map(|p| !p.in_hand()).collect();
        let pots = PotManager::build(&contributions, &no_claim);
        let payouts = pots.distribute(&strengths);

        for (seat, &amount) in payouts.iter().enumerate() {
            if amount == 0 {
                continue;
            }
            self.state.players[seat].add_chips(amount);
            self.winners.push(WinnerRecord {
                seat,
                amount,
                description: strengths[seat]
                    .as_ref()
                    .map(|s| s.category.describe().to_string()),
            });
        }
        self.state.pot = 0;
        self.state.hand_complete = true;
        Ok(())
    }

    /// Chips never appear or vanish: stacks plus live bets always equal the
    /// session total.
    fn check_conservation(&self) {
        let stacks: u32 = self.state.players.iter().map(|p| p.stack()).sum();
        if self.state.hand_complete {
            debug_assert_eq!(stacks, self.total_chips, "chips must balance after resolution");
        } else {
            let committed: u32 = self.state.players.iter().map(|p| p.total_bet()).sum();
            debug_assert_eq!(
                stacks + committed,
                self.total_chips,
                "chips must balance mid-hand"
            );
        }
    }
}
