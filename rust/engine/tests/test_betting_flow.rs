use riverline_engine::engine::Engine;
use riverline_engine::errors::GameError;
use riverline_engine::game::{GameSettings, Street};
use riverline_engine::player::PlayerAction;

fn three_handed(seed: u64) -> Engine {
    let settings = GameSettings {
        seats: 3,
        ..GameSettings::default()
    };
    let mut eng = Engine::with_seed(settings, seed).expect("valid settings");
    eng.start_new_hand().expect("funded seats");
    eng
}

fn total_stacks(eng: &Engine) -> u32 {
    eng.state().players().iter().map(|p| p.stack()).sum()
}

#[test]
fn folding_to_the_big_blind_awards_the_walk() {
    // Dealer 0, SB seat 1, BB seat 2; the blind never has to act.
    let mut eng = three_handed(5);
    eng.apply_action(0, PlayerAction::Fold).expect("fold");
    let applied = eng.apply_action(1, PlayerAction::Fold).expect("fold");

    assert!(applied.hand_complete);
    let winners = eng.last_winners();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].seat, 2);
    assert_eq!(winners[0].amount, 150);
    assert_eq!(winners[0].description, None, "no showdown, no hand shown");
    assert_eq!(eng.state().player(2).stack(), 10_050);
    assert_eq!(total_stacks(&eng), 30_000);
}

#[test]
fn open_call_and_check_down_reach_showdown_with_the_exact_pot() {
    // Blinds 50/100. The button opens to 3x, the small blind folds, the
    // big blind calls, and both check every street to showdown.
    let mut eng = three_handed(17);

    let applied = eng.apply_action(0, PlayerAction::Raise(300)).expect("open");
    assert!(!applied.street_advanced);
    eng.apply_action(1, PlayerAction::Fold).expect("fold");
    let applied = eng.apply_action(2, PlayerAction::Call).expect("call");
    assert!(applied.street_advanced, "matched bets close the preflop round");

    assert_eq!(eng.state().street(), Street::Flop);
    assert_eq!(eng.state().board().len(), 3);
    assert_eq!(eng.state().pot(), 650, "300 + 300 + the dead small blind");
    assert_eq!(eng.state().current_seat(), 2, "first live seat after the button");

    for expected in [Street::Turn, Street::River] {
        eng.apply_action(2, PlayerAction::Check).expect("check");
        let applied = eng.apply_action(0, PlayerAction::Check).expect("check");
        assert!(applied.street_advanced);
        assert_eq!(eng.state().street(), expected);
    }
    eng.apply_action(2, PlayerAction::Check).expect("check");
    let applied = eng.apply_action(0, PlayerAction::Check).expect("check");

    assert!(applied.hand_complete);
    assert_eq!(eng.state().street(), Street::Showdown);
    assert_eq!(eng.state().board().len(), 5);

    let paid: u32 = eng.last_winners().iter().map(|w| w.amount).sum();
    assert_eq!(paid, 650, "the whole pot is paid out");
    for winner in eng.last_winners() {
        assert!(winner.description.is_some(), "showdown wins name the hand");
        assert_ne!(winner.seat, 1, "a folded seat never wins");
    }
    assert_eq!(eng.state().player(1).stack(), 9_950);
    assert_eq!(total_stacks(&eng), 30_000);
}

#[test]
fn acting_out_of_turn_is_rejected_without_side_effects() {
    let mut eng = three_handed(23);
    assert_eq!(eng.state().current_seat(), 0);
    assert!(matches!(
        eng.apply_action(2, PlayerAction::Fold),
        Err(GameError::NotPlayersTurn {
            expected: 0,
            actual: 2
        })
    ));
    assert!(eng.state().player(2).in_hand());
    assert_eq!(eng.state().current_seat(), 0);
}

#[test]
fn rejected_actions_leave_the_state_untouched() {
    let mut eng = three_handed(29);
    let before_pot = eng.state().total_pot();

    // No bet to check behind preflop for the opener.
    assert!(matches!(
        eng.apply_action(0, PlayerAction::Check),
        Err(GameError::CheckNotAllowed)
    ));
    // Bets are never legal preflop; the blinds opened the action.
    assert!(matches!(
        eng.apply_action(0, PlayerAction::Bet(500)),
        Err(GameError::BetNotAllowed)
    ));
    assert!(matches!(
        eng.apply_action(0, PlayerAction::Raise(150)),
        Err(GameError::RaiseTooSmall {
            amount: 150,
            minimum: 200
        })
    ));

    assert_eq!(eng.state().total_pot(), before_pot);
    assert_eq!(eng.state().current_seat(), 0);
    assert!(!eng.state().player(0).has_acted());
}

#[test]
fn fallback_degrades_an_illegal_action_to_something_safe() {
    let mut eng = three_handed(31);
    // A bet is illegal preflop; checking is too while facing the blind,
    // so the fallback folds.
    let applied = eng
        .apply_action_or_fallback(0, PlayerAction::Bet(500))
        .expect("fallback");
    assert!(eng.state().player(0).is_folded());
    assert!(!applied.hand_complete);

    // Turn-order violations are not papered over.
    let current = eng.state().current_seat();
    let wrong = (current + 1) % 3;
    assert!(matches!(
        eng.apply_action_or_fallback(wrong, PlayerAction::Fold),
        Err(GameError::NotPlayersTurn { .. })
    ));
}

/// Builds a three-seat table where seat 2 is short: hand one is scripted
/// so seat 0 wins a big pot from seat 2 without a showdown.
fn table_with_short_seat_two(seed: u64) -> Engine {
    let mut eng = three_handed(seed);
    eng.apply_action(0, PlayerAction::Raise(7_100)).expect("open");
    eng.apply_action(1, PlayerAction::Fold).expect("fold");
    eng.apply_action(2, PlayerAction::Call).expect("call");
    assert_eq!(eng.state().street(), Street::Flop);
    eng.apply_action(2, PlayerAction::Check).expect("check");
    eng.apply_action(0, PlayerAction::Bet(2_000)).expect("bet");
    let applied = eng.apply_action(2, PlayerAction::Fold).expect("fold");
    assert!(applied.hand_complete);

    assert_eq!(eng.state().player(0).stack(), 17_150);
    assert_eq!(eng.state().player(1).stack(), 9_950);
    assert_eq!(eng.state().player(2).stack(), 2_900);
    eng
}

#[test]
fn under_minimum_all_in_does_not_reopen_the_betting() {
    let mut eng = table_with_short_seat_two(47);

    // Hand two: dealer 1, SB seat 2, BB seat 0, button seat 1 opens.
    eng.start_new_hand().expect("three funded seats");
    assert_eq!(eng.state().dealer(), 1);
    eng.apply_action(1, PlayerAction::Call).expect("limp");
    eng.apply_action(2, PlayerAction::Call).expect("complete");
    eng.apply_action(0, PlayerAction::Check).expect("option");
    assert_eq!(eng.state().street(), Street::Flop);
    assert_eq!(eng.state().pot(), 300);

    // Flop: seat 0 bets 2000, seat 1 calls, and the short seat 2 shoves
    // 2800 total. That tops the bet without reaching the minimum raise,
    // so the raise size on offer is still the original 2000.
    eng.apply_action(2, PlayerAction::Check).expect("check");
    eng.apply_action(0, PlayerAction::Bet(2_000)).expect("bet");
    eng.apply_action(1, PlayerAction::Call).expect("call");
    eng.apply_action(2, PlayerAction::AllIn).expect("shove");
    assert!(eng.state().player(2).is_all_in());
    assert_eq!(eng.state().highest_bet(), 2_800);

    assert!(matches!(
        eng.apply_action(0, PlayerAction::Raise(3_500)),
        Err(GameError::RaiseTooSmall {
            amount: 3_500,
            minimum: 4_800
        })
    ));

    // The callers just complete; the round closes without another orbit.
    eng.apply_action(0, PlayerAction::Call).expect("call");
    let applied = eng.apply_action(1, PlayerAction::Call).expect("call");
    assert!(applied.street_advanced);
    assert_eq!(eng.state().street(), Street::Turn);
    assert_eq!(eng.state().pot(), 8_700);
    assert_eq!(
        eng.state().current_seat(),
        0,
        "the all-in seat is skipped even though it sits first"
    );

    // Check it down; the runout must resolve every chip.
    for _ in 0..2 {
        eng.apply_action(0, PlayerAction::Check).expect("check");
        eng.apply_action(1, PlayerAction::Check).expect("check");
    }
    assert!(eng.state().is_hand_complete());
    assert_eq!(eng.state().street(), Street::Showdown);
    let paid: u32 = eng.last_winners().iter().map(|w| w.amount).sum();
    assert_eq!(paid, 8_700);
    assert_eq!(total_stacks(&eng), 30_000);
}

#[test]
fn preflop_shove_and_call_run_the_board_out() {
    let settings = GameSettings {
        seats: 2,
        ..GameSettings::default()
    };
    let mut eng = Engine::with_seed(settings, 61).expect("valid settings");
    eng.start_new_hand().expect("two funded seats");

    // Heads-up: seat 1 posts the small blind and acts first.
    eng.apply_action(1, PlayerAction::AllIn).expect("shove");
    let applied = eng.apply_action(0, PlayerAction::Call).expect("call");

    assert!(applied.hand_complete, "no actors left, the board runs out");
    assert_eq!(eng.state().street(), Street::Showdown);
    assert_eq!(eng.state().board().len(), 5);
    let paid: u32 = eng.last_winners().iter().map(|w| w.amount).sum();
    assert_eq!(paid, 20_000);
    assert_eq!(total_stacks(&eng), 20_000);
}

#[test]
fn big_blind_gets_the_option_after_limps() {
    let mut eng = three_handed(71);
    eng.apply_action(0, PlayerAction::Call).expect("limp");
    eng.apply_action(1, PlayerAction::Call).expect("complete");
    // Matched bets alone do not close preflop; the blind may still raise.
    assert_eq!(eng.state().street(), Street::Preflop);
    assert_eq!(eng.state().current_seat(), 2);

    eng.apply_action(2, PlayerAction::Raise(400)).expect("option raise");
    assert_eq!(eng.state().street(), Street::Preflop);
    assert_eq!(eng.state().current_seat(), 0, "the raise reopens the action");
    eng.apply_action(0, PlayerAction::Fold).expect("fold");
    eng.apply_action(1, PlayerAction::Fold).expect("fold");
    assert!(eng.state().is_hand_complete());
    assert_eq!(eng.last_winners()[0].seat, 2);
    assert_eq!(eng.last_winners()[0].amount, 600);
}

#[test]
fn chips_balance_after_every_single_action() {
    let mut eng = three_handed(83);
    let actions = [
        (0, PlayerAction::Raise(250)),
        (1, PlayerAction::Call),
        (2, PlayerAction::Call),
        (1, PlayerAction::Check),
        (2, PlayerAction::Bet(400)),
        (0, PlayerAction::Call),
        (1, PlayerAction::Fold),
        (2, PlayerAction::Check),
        (0, PlayerAction::Bet(900)),
        (2, PlayerAction::Call),
        (2, PlayerAction::Check),
        (0, PlayerAction::Check),
    ];
    for (seat, action) in actions {
        eng.apply_action(seat, action).expect("scripted line");
        let stacks = total_stacks(&eng);
        let committed: u32 = eng.state().players().iter().map(|p| p.total_bet()).sum();
        if eng.state().is_hand_complete() {
            assert_eq!(stacks, 30_000);
        } else {
            assert_eq!(stacks + committed, 30_000);
        }
    }
    assert!(eng.state().is_hand_complete());
}
