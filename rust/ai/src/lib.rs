//! Scripted opponents and strategy advice for riverline tables.
//!
//! Everything in this crate sits on the read-only side of the engine
//! boundary: policies and the advisor inspect an [`Engine`] and produce
//! [`PlayerAction`]s or recommendations, never mutating table state
//! themselves.
//!
//! ## Core Components
//!
//! - [`Policy`] - Trait the driving loop calls once per scripted turn
//! - [`ranges`] - Preflop open-raise tables keyed by hand notation
//! - [`strength`] - Made-hand and draw scoring shared by policies and advice
//! - [`scripted`] - Range-based opponents with seeded mixed strategies
//! - [`advisor`] - Deterministic recommendation provider for the hint surface
//! - [`policy_by_name`] - Registry for constructing opponents by name
//!
//! ## Quick Start
//!
//! ```rust
//! use riverline_ai::{policy_by_name, Policy};
//! use riverline_engine::engine::Engine;
//! use riverline_engine::game::GameSettings;
//!
//! let mut opponent = policy_by_name("scripted", 7).expect("registered policy");
//!
//! let mut engine = Engine::with_seed(GameSettings::default(), 42).expect("valid settings");
//! engine.start_new_hand().expect("two funded seats");
//!
//! let seat = engine.state().current_seat();
//! let action = opponent.decide(&engine, seat);
//! println!("{} chose {:?}", opponent.name(), action);
//! ```
//!
//! ## Policy names
//!
//! - `"caller"` - checks when free, calls any bet; the deterministic anchor
//! - `"scripted"` - positional ranges preflop, strength and draw logic after

use riverline_engine::engine::Engine;
use riverline_engine::player::PlayerAction;

pub mod advisor;
pub mod ranges;
pub mod scripted;
pub mod strength;

/// Decision interface for a scripted seat.
///
/// `decide` is called exactly when `seat` is due to act. The engine applies
/// the returned action through its normal validation path and degrades an
/// illegal one to check/fold, so implementations may be optimistic about
/// sizing. Policies that mix their strategies own an RNG, hence `&mut self`.
///
/// # Example Implementation
///
/// ```rust
/// use riverline_ai::Policy;
/// use riverline_engine::engine::Engine;
/// use riverline_engine::player::PlayerAction;
///
/// struct Station;
///
/// impl Policy for Station {
///     fn decide(&mut self, engine: &Engine, seat: usize) -> PlayerAction {
///         if engine.state().to_call(seat) == 0 {
///             PlayerAction::Check
///         } else {
///             PlayerAction::Call
///         }
///     }
///
///     fn name(&self) -> &str {
///         "station"
///     }
/// }
/// ```
pub trait Policy: Send {
    /// Choose an action for `seat`, which must be the seat currently due
    /// to act.
    fn decide(&mut self, engine: &Engine, seat: usize) -> PlayerAction;

    /// Short identifier used in logs and CLI output.
    fn name(&self) -> &str;
}

/// Constructs a policy from its registry name.
///
/// `seed` feeds the policy's own RNG; two policies built with the same
/// seed reproduce their mixed-strategy draws exactly, independent of the
/// deck seed. Returns `None` for unknown names so callers can report bad
/// input instead of panicking.
///
/// # Example
///
/// ```rust
/// use riverline_ai::policy_by_name;
///
/// let policy = policy_by_name("caller", 0).expect("registered");
/// assert_eq!(policy.name(), "caller");
/// assert!(policy_by_name("psychic", 0).is_none());
/// ```
pub fn policy_by_name(name: &str, seed: u64) -> Option<Box<dyn Policy>> {
    match name {
        "caller" => Some(Box::new(scripted::CallerPolicy::new())),
        "scripted" => Some(Box::new(scripted::ScriptedPolicy::new(seed))),
        _ => None,
    }
}
