//! # riverline-engine: No-Limit Hold'em Engine Core
//!
//! A deterministic Texas Hold'em engine for heads-up through six-max play.
//! Covers dealing, the multi-street betting state machine, side-pot
//! accounting, seven-card showdown evaluation, and JSONL hand histories,
//! all reproducible from a session seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the text codec
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`engine`] - Hand orchestration: blinds, betting, streets, resolution
//! - [`game`] - Table state, streets, and redacted observer views
//! - [`hand`] - Poker hand evaluation and strength comparison
//! - [`player`] - Seat state, actions, and stack management
//! - [`pot`] - Pot layering and side pot distribution
//! - [`rules`] - Betting validation and legal action enumeration
//! - [`logger`] - Hand history records and JSONL serialization
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use riverline_engine::cards::{Card, Rank, Suit};
//! use riverline_engine::hand::{evaluate_hand, Category};
//!
//! let cards = [
//!     Card { suit: Suit::Hearts, rank: Rank::Ace },
//!     Card { suit: Suit::Hearts, rank: Rank::King },
//!     Card { suit: Suit::Hearts, rank: Rank::Queen },
//!     Card { suit: Suit::Hearts, rank: Rank::Jack },
//!     Card { suit: Suit::Hearts, rank: Rank::Ten },
//!     Card { suit: Suit::Clubs, rank: Rank::Two },
//!     Card { suit: Suit::Diamonds, rank: Rank::Three },
//! ];
//!
//! let strength = evaluate_hand(&cards).unwrap();
//! assert_eq!(strength.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! The same seed reproduces the same session, hand after hand:
//!
//! ```rust
//! use riverline_engine::deck::Deck;
//!
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! assert_eq!(deck1.deal_card(), deck2.deal_card());
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use riverline_engine::engine::Engine;
//! use riverline_engine::game::GameSettings;
//! use riverline_engine::player::PlayerAction;
//!
//! let mut engine = Engine::with_seed(GameSettings::default(), 42).unwrap();
//! engine.start_new_hand().unwrap();
//!
//! // fold around to the blinds
//! let seat = engine.state().current_seat();
//! let applied = engine.apply_action(seat, PlayerAction::Fold).unwrap();
//! assert!(!applied.hand_complete);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
