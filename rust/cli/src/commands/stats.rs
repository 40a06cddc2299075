//! Statistics aggregation command for hand history analysis.
//!
//! This module provides functionality to aggregate statistics from JSONL hand
//! history files. It computes summary metrics including total hands played,
//! hands won and net chips per player, and validates chip conservation.

use crate::error::CliError;
use crate::ui;
use riverline_engine::logger::HandRecord;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Aggregates statistics from JSONL hand history files.
///
/// Reads hand history files and computes summary statistics including total
/// hands played, hands won per player and net chip movement per player.
///
/// # Arguments
///
/// * `input` - Path to a JSONL file or a directory containing hand histories
/// * `out` - Output stream for the statistics report
/// * `err` - Output stream for error messages and warnings
///
/// # Validation
///
/// - Detects corrupted or incomplete records
/// - Verifies chip conservation (seat nets of a hand must sum to zero)
/// - Reports warnings for skipped records
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    run_stats(&input, out, err)
}

/// Internal statistics aggregation implementation
fn run_stats(input: &str, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    struct StatsState {
        hands: u64,
        skipped: u64,
        corrupted: u64,
        stats_ok: bool,
        hands_won: BTreeMap<String, u64>,
        net: BTreeMap<String, i64>,
    }

    fn consume_stats_content(
        content: String,
        state: &mut StatsState,
        err: &mut dyn Write,
    ) -> Result<(), CliError> {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            let rec: HandRecord = match serde_json::from_str(line) {
                Ok(v) => v,
                Err(_) => {
                    if i == lines.len() - 1 && !has_trailing_nl {
                        state.skipped += 1;
                    } else {
                        state.corrupted += 1;
                    }
                    continue;
                }
            };

            let sum: i64 = rec.seats.iter().map(|s| s.net).sum();
            if sum != 0 {
                state.stats_ok = false;
                ui::write_error(
                    err,
                    &format!("Chip conservation violated at hand {}", rec.hand_id),
                )?;
            }

            state.hands += 1;
            for seat in &rec.seats {
                *state.net.entry(seat.player_id.clone()).or_insert(0) += seat.net;
            }

            let mut winning_seats: Vec<usize> = rec.winners.iter().map(|w| w.seat).collect();
            winning_seats.sort_unstable();
            winning_seats.dedup();
            for seat_no in winning_seats {
                if let Some(seat) = rec.seats.iter().find(|s| s.seat == seat_no) {
                    *state.hands_won.entry(seat.player_id.clone()).or_insert(0) += 1;
                }
            }
        }
        Ok(())
    }

    let path = Path::new(input);
    let mut state = StatsState {
        hands: 0,
        skipped: 0,
        corrupted: 0,
        stats_ok: true,
        hands_won: BTreeMap::new(),
        net: BTreeMap::new(),
    };

    if path.is_dir() {
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let rd = match std::fs::read_dir(&d) {
                Ok(v) => v,
                Err(_) => continue,
            };
            for e in rd.filter_map(Result::ok) {
                let p = e.path();
                if p.is_dir() {
                    stack.push(p);
                } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                    && fname.ends_with(".jsonl")
                {
                    match std::fs::read_to_string(&p) {
                        Ok(content) => {
                            consume_stats_content(content, &mut state, err)?;
                        }
                        Err(_) => {
                            state.corrupted += 1;
                        }
                    }
                }
            }
        }
    } else {
        match std::fs::read_to_string(input) {
            Ok(s) => consume_stats_content(s, &mut state, err)?,
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::Config(format!("Failed to read {}: {}", input, e)));
            }
        }
    }

    if state.corrupted > 0 {
        ui::write_error(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::write_error(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir() && state.hands == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let summary = serde_json::json!({
        "hands": state.hands,
        "hands_won": state.hands_won,
        "net": state.net,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;

    if state.stats_ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riverline_engine::logger::{HandRecord, SeatSummary, WinnerRecord};
    use std::io::Write as _;

    fn record(hand_id: u64, nets: &[(&str, i64)], winner: usize, amount: u32) -> HandRecord {
        HandRecord {
            hand_id,
            ts: Some("2026-01-01T00:00:00Z".to_string()),
            seed: 9,
            small_blind: 50,
            big_blind: 100,
            dealer: 0,
            board: vec!["Ah".into(), "Kd".into(), "2c".into()],
            seats: nets
                .iter()
                .enumerate()
                .map(|(seat, (id, net))| SeatSummary {
                    seat,
                    player_id: (*id).to_string(),
                    hole: None,
                    net: *net,
                })
                .collect(),
            actions: Vec::new(),
            winners: vec![WinnerRecord {
                seat: winner,
                amount,
                description: Some("One Pair".to_string()),
            }],
        }
    }

    fn write_records(file: &mut tempfile::NamedTempFile, records: &[HandRecord]) {
        for rec in records {
            let line = serde_json::to_string(rec).unwrap();
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
    }

    #[test]
    fn stats_on_an_empty_file_report_zero_hands() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap().to_string();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(path, &mut out, &mut err);

        assert!(result.is_ok());
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("\"hands\": 0"));
    }

    #[test]
    fn stats_aggregate_wins_and_nets_per_player() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        write_records(
            &mut temp,
            &[
                record(1, &[("alice", 150), ("bob", -150)], 0, 300),
                record(2, &[("alice", -100), ("bob", 100)], 1, 200),
                record(3, &[("alice", 250), ("bob", -250)], 0, 500),
            ],
        );

        let path = temp.path().to_str().unwrap().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(path, &mut out, &mut err);

        assert!(result.is_ok());
        let json: serde_json::Value =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(json["hands"], 3);
        assert_eq!(json["hands_won"]["alice"], 2);
        assert_eq!(json["hands_won"]["bob"], 1);
        assert_eq!(json["net"]["alice"], 300);
        assert_eq!(json["net"]["bob"], -300);
    }

    #[test]
    fn chip_conservation_violations_fail_the_run() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        write_records(&mut temp, &[record(7, &[("alice", 100), ("bob", -50)], 0, 100)]);

        let path = temp.path().to_str().unwrap().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(path, &mut out, &mut err);

        assert!(result.is_err());
        let err_output = String::from_utf8(err).unwrap();
        assert!(err_output.contains("Chip conservation violated at hand 7"));
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("\"hands\": 1"));
    }

    #[test]
    fn corrupted_lines_are_counted_and_skipped() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        write_records(&mut temp, &[record(1, &[("alice", 50), ("bob", -50)], 0, 100)]);
        writeln!(temp, "{{invalid json}}").unwrap();
        write_records(&mut temp, &[record(2, &[("alice", -50), ("bob", 50)], 1, 100)]);

        let path = temp.path().to_str().unwrap().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(path, &mut out, &mut err);

        assert!(result.is_ok());
        let json: serde_json::Value =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(json["hands"], 2);
        assert!(String::from_utf8(err).unwrap().contains("corrupted"));
    }

    #[test]
    fn truncated_final_line_is_discarded_not_corrupted() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        write_records(&mut temp, &[record(1, &[("alice", 50), ("bob", -50)], 0, 100)]);
        write!(temp, "{{\"hand_id\":2,\"se").unwrap();
        temp.flush().unwrap();

        let path = temp.path().to_str().unwrap().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(path, &mut out, &mut err);

        assert!(result.is_ok());
        let json: serde_json::Value =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(json["hands"], 1);
        let err_output = String::from_utf8(err).unwrap();
        assert!(err_output.contains("incomplete final line"));
        assert!(!err_output.contains("corrupted"));
    }

    #[test]
    fn a_file_of_nothing_but_garbage_is_an_error() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        writeln!(temp, "not json at all").unwrap();
        temp.flush().unwrap();

        let path = temp.path().to_str().unwrap().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(path, &mut out, &mut err);

        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(String::from_utf8(err).unwrap().contains("Invalid record"));
    }

    #[test]
    fn directories_are_searched_recursively_for_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();

        let one = record(1, &[("alice", 50), ("bob", -50)], 0, 100);
        let two = record(2, &[("alice", -80), ("bob", 80)], 1, 160);
        std::fs::write(
            dir.path().join("a.jsonl"),
            format!("{}\n", serde_json::to_string(&one).unwrap()),
        )
        .unwrap();
        std::fs::write(
            sub.join("b.jsonl"),
            format!("{}\n", serde_json::to_string(&two).unwrap()),
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let path = dir.path().to_str().unwrap().to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(path, &mut out, &mut err);

        assert!(result.is_ok());
        let json: serde_json::Value =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(json["hands"], 2);
        assert_eq!(json["net"]["alice"], -30);
    }

    #[test]
    fn nonexistent_input_is_an_error() {
        let path = "/nonexistent/path/to/file.jsonl".to_string();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_stats_command(path, &mut out, &mut err);
        assert!(result.is_err());
    }
}
