//! # Play Command
//!
//! Interactive poker gameplay against scripted opponents.
//!
//! The human sits at seat 0; every other seat runs the scripted policy.
//! Actions are read line by line from the injected input stream, so the
//! command behaves the same under a TTY and a piped script.
//!
//! ## Features
//!
//! - Interactive input validation with clear error messages
//! - The prompt lists the legal actions with their chip bounds
//! - Recommendations on demand (`hint`) or before every turn (`--hints`)
//! - Graceful quit handling (user can exit with 'q' or 'quit', or EOF)
//! - Game state display before every decision (board, pot, amount to call)

use crate::config;
use crate::error::CliError;
use crate::ui::{self, format_applied, format_cards};
use riverline_ai::advisor::{format_recommendation, recommend};
use riverline_ai::{policy_by_name, Policy};
use riverline_engine::engine::{AppliedAction, Engine};
use riverline_engine::errors::GameError;
use riverline_engine::player::PlayerAction;
use std::io::{BufRead, Write};

const HUMAN_SEAT: usize = 0;

/// Handle the play command: interactive poker gameplay.
///
/// # Arguments
///
/// * `opponents` - Scripted opponents seated with the human (1-5)
/// * `hands` - Number of hands to play (must be >= 1, default: 1)
/// * `seed` - Deck seed for reproducibility (default: random)
/// * `hints` - Print a recommendation before each human turn
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for player actions
///
/// # Returns
///
/// * `Ok(())` on successful completion, including an early quit
/// * `Err(CliError)` if the arguments are invalid or the table cannot open
pub fn handle_play_command(
    opponents: u8,
    hands: Option<u32>,
    seed: Option<u64>,
    hints: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = hands.unwrap_or(1);
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    if !(1..=5).contains(&opponents) {
        ui::write_error(err, "opponents must be between 1 and 5")?;
        return Err(CliError::InvalidInput(
            "opponents must be between 1 and 5".to_string(),
        ));
    }

    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let mut settings = cfg.settings();
    settings.seats = usize::from(opponents) + 1;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut engine = match Engine::with_seed(settings, seed) {
        Ok(engine) => engine,
        Err(e) => {
            ui::write_error(err, &format!("Failed to open table: {}", e))?;
            return Err(CliError::Engine(format!("Failed to open table: {}", e)));
        }
    };
    engine.set_player_id(HUMAN_SEAT, "you");

    let mut policies: Vec<Option<Box<dyn Policy>>> = vec![None];
    for seat in 1..engine.state().seat_count() {
        engine.set_player_id(seat, format!("cpu{}", seat));
        policies.push(policy_by_name("scripted", seed.wrapping_add(seat as u64)));
    }

    writeln!(out, "play: opponents={} hands={} seed={}", opponents, hands, seed)?;
    writeln!(
        out,
        "Blinds: SB={} BB={}",
        engine.state().small_blind(),
        engine.state().big_blind()
    )?;

    let mut played = 0u32;
    let mut quit_requested = false;

    for i in 1..=hands {
        if quit_requested {
            break;
        }

        match engine.start_new_hand() {
            Ok(()) => {}
            Err(GameError::NotEnoughPlayers) => {
                writeln!(out, "Not enough funded seats to continue.")?;
                break;
            }
            Err(e) => {
                ui::write_error(err, &format!("Failed to start hand: {}", e))?;
                return Err(CliError::Engine(format!("Failed to start hand: {}", e)));
            }
        }

        writeln!(out, "Hand {} (dealer: seat {})", i, engine.state().dealer())?;
        let hole: Vec<_> = engine
            .state()
            .player(HUMAN_SEAT)
            .hole_cards()
            .into_iter()
            .flatten()
            .collect();
        if !hole.is_empty() {
            writeln!(
                out,
                "Your cards: {} ({})",
                format_cards(&hole),
                engine.state().position_for(HUMAN_SEAT).label()
            )?;
        }

        quit_requested = run_betting(&mut engine, &mut policies, hints, stdin, out, err)?;

        if engine.state().is_hand_complete() {
            show_result(&engine, out)?;
            played += 1;
            if engine.state().player(HUMAN_SEAT).stack() == 0 {
                writeln!(out, "You are out of chips.")?;
                break;
            }
        }
    }

    writeln!(out, "Hands played: {}", played)?;
    Ok(())
}

/// Runs one hand to completion. Returns `true` when the human asked to
/// quit (explicitly or by closing stdin), leaving the hand unfinished.
fn run_betting(
    engine: &mut Engine,
    policies: &mut [Option<Box<dyn Policy>>],
    hints: bool,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<bool, CliError> {
    while !engine.state().is_hand_complete() {
        let seat = engine.state().current_seat();
        let applied = if seat == HUMAN_SEAT {
            match read_human_action(engine, hints, stdin, out, err)? {
                Some(applied) => applied,
                None => return Ok(true),
            }
        } else {
            let action = match policies[seat].as_mut() {
                Some(policy) => policy.decide(engine, seat),
                None => PlayerAction::Fold,
            };
            let applied = engine.apply_action_or_fallback(seat, action)?;
            writeln!(
                out,
                "{} {}",
                engine.state().player(seat).id(),
                format_applied(&applied.action)
            )?;
            applied
        };

        if applied.street_advanced && !applied.hand_complete {
            writeln!(
                out,
                "{}: {}  (pot {})",
                engine.state().street().label(),
                format_cards(engine.state().board()),
                engine.state().total_pot()
            )?;
        }
    }
    Ok(false)
}

/// Prompts until the human enters an action the table accepts. Returns
/// `None` on quit or end of input.
fn read_human_action(
    engine: &mut Engine,
    hints: bool,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Option<AppliedAction>, CliError> {
    let state = engine.state();
    writeln!(
        out,
        "Board: {} | Pot: {} | To call: {}",
        format_cards(state.board()),
        state.total_pot(),
        state.to_call(HUMAN_SEAT)
    )?;
    if hints && let Ok(rec) = recommend(engine, HUMAN_SEAT) {
        write!(out, "{}", format_recommendation(&rec))?;
    }

    loop {
        let options: Vec<String> = engine
            .available_actions(HUMAN_SEAT)
            .iter()
            .map(ui::format_option)
            .collect();
        write!(out, "Enter action ({}, hint, q): ", options.join(", "))?;
        out.flush()?;
        let Some(line) = read_line(stdin) else {
            return Ok(None);
        };
        match parse_action(&line) {
            ParsedInput::Quit => return Ok(None),
            ParsedInput::Hint => match recommend(engine, HUMAN_SEAT) {
                Ok(rec) => write!(out, "{}", format_recommendation(&rec))?,
                Err(e) => ui::write_error(err, &format!("No advice available: {}", e))?,
            },
            ParsedInput::Invalid(msg) => {
                ui::write_error(err, &msg)?;
            }
            ParsedInput::Action(action) => match engine.apply_action(HUMAN_SEAT, action) {
                Ok(applied) => {
                    writeln!(out, "you {}", format_applied(&applied.action))?;
                    return Ok(Some(applied));
                }
                Err(e) => {
                    ui::write_error(err, &format!("Invalid action: {}", e))?;
                }
            },
        }
    }
}

fn show_result(engine: &Engine, out: &mut dyn Write) -> Result<(), CliError> {
    let state = engine.state();
    if !state.board().is_empty() {
        writeln!(out, "Board: {}", format_cards(state.board()))?;
    }
    for winner in engine.last_winners() {
        let id = state.player(winner.seat).id();
        match &winner.description {
            Some(desc) => writeln!(out, "{} wins {} ({})", id, winner.amount, desc)?,
            None => writeln!(out, "{} wins {}", id, winner.amount)?,
        }
    }
    let stacks: Vec<String> = state
        .players()
        .iter()
        .map(|p| format!("{} {}", p.id(), p.stack()))
        .collect();
    writeln!(out, "Stacks: {}", stacks.join(", "))?;
    Ok(())
}

/// What one line of player input turned into.
enum ParsedInput {
    Action(PlayerAction),
    Hint,
    Quit,
    Invalid(String),
}

/// Parses one line of input into a player action.
///
/// Accepts the long forms and the usual table shorthand: `f` folds,
/// `k` checks, `c` calls, `b`/`r` bet and raise with an amount, `a`
/// shoves. `hint`/`h` asks for advice without spending the turn.
/// Amounts name the street total for bets and raises.
fn parse_action(input: &str) -> ParsedInput {
    let lowered = input.trim().to_lowercase();
    let mut parts = lowered.split_whitespace();
    let Some(word) = parts.next() else {
        return ParsedInput::Invalid("Empty input".to_string());
    };
    let amount = parts.next();

    match word {
        "q" | "quit" => ParsedInput::Quit,
        "hint" | "h" => ParsedInput::Hint,
        "fold" | "f" => ParsedInput::Action(PlayerAction::Fold),
        "check" | "k" => ParsedInput::Action(PlayerAction::Check),
        "call" | "c" => ParsedInput::Action(PlayerAction::Call),
        "allin" | "all-in" | "a" => ParsedInput::Action(PlayerAction::AllIn),
        "bet" | "b" => match parse_amount(amount) {
            Ok(n) => ParsedInput::Action(PlayerAction::Bet(n)),
            Err(msg) => ParsedInput::Invalid(format!("Bet {}", msg)),
        },
        "raise" | "r" => match parse_amount(amount) {
            Ok(n) => ParsedInput::Action(PlayerAction::Raise(n)),
            Err(msg) => ParsedInput::Invalid(format!("Raise {}", msg)),
        },
        other => ParsedInput::Invalid(format!(
            "Unrecognized action '{}'. Valid: fold, check, call, bet <amount>, raise <to>, allin, hint, q",
            other
        )),
    }
}

fn parse_amount(word: Option<&str>) -> Result<u32, String> {
    let Some(word) = word else {
        return Err("requires an amount (e.g. 'bet 100')".to_string());
    };
    match word.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err("amount must be positive".to_string()),
        Err(_) => Err("amount is not a number".to_string()),
    }
}

/// Reads one trimmed line; `None` on end of input or a read error.
fn read_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn clear_env() {
        for var in [
            "RIVERLINE_CONFIG",
            "RIVERLINE_STACK",
            "RIVERLINE_SEATS",
            "RIVERLINE_SEED",
        ] {
            unsafe { std::env::remove_var(var) };
        }
    }

    fn play(
        opponents: u8,
        hands: u32,
        seed: u64,
        hints: bool,
        input: &str,
    ) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let result = handle_play_command(
            opponents,
            Some(hands),
            Some(seed),
            hints,
            &mut out,
            &mut err,
            &mut stdin,
        );
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    #[serial]
    fn zero_hands_is_rejected() {
        clear_env();
        let (result, _, err) = play(1, 0, 1, false, "");
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("hands must be >= 1"));
    }

    #[test]
    #[serial]
    fn folding_through_a_hand_completes_it() {
        clear_env();
        let (result, out, _) = play(1, 1, 11, false, "f\nf\nf\nf\n");
        assert!(result.is_ok());
        assert!(out.contains("play: opponents=1 hands=1 seed=11"));
        assert!(out.contains("Hand 1"));
        assert!(out.contains("Your cards: "));
        assert!(out.contains("Hands played: 1"));
        assert!(out.contains("Stacks: "));
    }

    #[test]
    #[serial]
    fn quitting_before_acting_plays_no_hands() {
        clear_env();
        let (result, out, _) = play(1, 5, 11, false, "q\n");
        assert!(result.is_ok());
        assert!(out.contains("Hands played: 0"));
    }

    #[test]
    #[serial]
    fn end_of_input_quits_cleanly() {
        clear_env();
        let (result, out, _) = play(1, 3, 11, false, "");
        assert!(result.is_ok());
        assert!(out.contains("Hands played: 0"));
    }

    #[test]
    #[serial]
    fn garbage_input_reprompts_until_something_valid() {
        clear_env();
        let (result, out, err) = play(1, 1, 11, false, "jam\nbet\nf\nf\n");
        assert!(result.is_ok());
        assert!(err.contains("Unrecognized action 'jam'"));
        assert!(err.contains("Bet requires an amount"));
        assert!(out.contains("Hands played: 1"));
    }

    #[test]
    #[serial]
    fn the_prompt_lists_the_legal_actions() {
        clear_env();
        let (result, out, _) = play(1, 1, 11, false, "f\nf\nf\nf\n");
        assert!(result.is_ok());
        assert!(out.contains("Enter action (fold, "));
        assert!(out.contains(", hint, q): "));
    }

    #[test]
    #[serial]
    fn hint_prints_advice_without_spending_the_turn() {
        clear_env();
        let (result, out, _) = play(1, 1, 11, false, "hint\nf\nf\nf\nf\n");
        assert!(result.is_ok());
        assert!(out.contains("Advice: "));
        assert!(out.contains("Why: "));
        assert!(out.contains("Hands played: 1"));
    }

    #[test]
    #[serial]
    fn hints_show_advice_before_the_prompt() {
        clear_env();
        let (result, out, _) = play(1, 1, 11, true, "q\n");
        assert!(result.is_ok());
        assert!(out.contains("Advice: "));
        assert!(out.contains("Why: "));
    }

    #[test]
    #[serial]
    fn tables_seat_every_requested_opponent() {
        clear_env();
        let (result, out, _) = play(3, 2, 21, false, "f\nf\nf\nf\nf\nf\n");
        assert!(result.is_ok());
        assert!(out.contains("cpu3"));
        assert!(out.contains("Hands played: 2"));
    }

    #[test]
    fn action_grammar_accepts_the_usual_shorthand() {
        assert!(matches!(
            parse_action("fold"),
            ParsedInput::Action(PlayerAction::Fold)
        ));
        assert!(matches!(
            parse_action("f"),
            ParsedInput::Action(PlayerAction::Fold)
        ));
        assert!(matches!(
            parse_action("k"),
            ParsedInput::Action(PlayerAction::Check)
        ));
        assert!(matches!(
            parse_action("c"),
            ParsedInput::Action(PlayerAction::Call)
        ));
        assert!(matches!(
            parse_action("  BET 250 "),
            ParsedInput::Action(PlayerAction::Bet(250))
        ));
        assert!(matches!(
            parse_action("r 600"),
            ParsedInput::Action(PlayerAction::Raise(600))
        ));
        assert!(matches!(
            parse_action("a"),
            ParsedInput::Action(PlayerAction::AllIn)
        ));
        assert!(matches!(parse_action("quit"), ParsedInput::Quit));
        assert!(matches!(parse_action("hint"), ParsedInput::Hint));
        assert!(matches!(parse_action("h"), ParsedInput::Hint));
    }

    #[test]
    fn action_grammar_rejects_bad_amounts() {
        assert!(matches!(parse_action("bet"), ParsedInput::Invalid(_)));
        assert!(matches!(parse_action("bet 0"), ParsedInput::Invalid(_)));
        assert!(matches!(parse_action("bet much"), ParsedInput::Invalid(_)));
        assert!(matches!(parse_action("raise -5"), ParsedInput::Invalid(_)));
        assert!(matches!(parse_action(""), ParsedInput::Invalid(_)));
    }

    #[test]
    fn unknown_words_list_the_valid_actions() {
        match parse_action("shove") {
            ParsedInput::Invalid(msg) => {
                assert!(msg.contains("shove"));
                assert!(msg.contains("fold"));
                assert!(msg.contains("raise"));
            }
            _ => panic!("expected invalid input"),
        }
    }

    #[test]
    fn read_line_trims_and_detects_eof() {
        let mut input = Cursor::new(b"  call  \n".to_vec());
        assert_eq!(read_line(&mut input).as_deref(), Some("call"));
        assert_eq!(read_line(&mut input), None);
    }
}
