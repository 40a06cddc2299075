use std::fs::{create_dir_all, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::game::Street;
use crate::player::ActionKind;

/// Records a single player action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    /// The betting street when this action occurred
    pub street: Street,
    pub kind: ActionKind,
    /// Chips involved: call and all-in cost, or bet/raise street total
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub amount: Option<u32>,
}

/// Per-seat outcome of a hand. `net` is the stack change over the whole
/// hand, blinds included.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub seat: usize,
    pub player_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hole: Option<[String; 2]>,
    pub net: i64,
}

/// One pot award at resolution. Fold wins carry no hand description.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub seat: usize,
    pub amount: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Complete record of a poker hand including all actions, board cards, and
/// outcome. Serialized to JSONL for hand history storage and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_id: u64,
    /// Timestamp when the hand was logged (RFC3339)
    #[serde(default)]
    pub ts: Option<String>,
    /// Session RNG seed (enables deterministic replay)
    pub seed: u64,
    pub small_blind: u32,
    pub big_blind: u32,
    pub dealer: usize,
    pub board: Vec<String>,
    pub seats: Vec<SeatSummary>,
    pub actions: Vec<ActionRecord>,
    pub winners: Vec<WinnerRecord>,
}

/// Appends hand records as JSON Lines. Lines are flushed as they are
/// written so an interrupted session keeps its completed hands.
pub struct HandLogger<W: Write> {
    out: W,
}

impl HandLogger<BufWriter<File>> {
    /// Creates a history file, making parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            out: BufWriter::new(f),
        })
    }
}

impl<W: Write> HandLogger<W> {
    pub fn from_writer(out: W) -> Self {
        Self { out }
    }

    pub fn append(&mut self, record: &HandRecord) -> io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(io::Error::other)?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Reads every record from a history stream, skipping blank lines.
pub fn read_records<R: BufRead>(input: R) -> io::Result<Vec<HandRecord>> {
    let mut records = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: HandRecord =
            serde_json::from_str(&line).map_err(io::Error::other)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hand_id: u64) -> HandRecord {
        HandRecord {
            hand_id,
            ts: None,
            seed: 7,
            small_blind: 50,
            big_blind: 100,
            dealer: 0,
            board: vec!["Ah".into(), "Kd".into(), "2c".into()],
            seats: vec![SeatSummary {
                seat: 0,
                player_id: "p0".into(),
                hole: Some(["As".into(), "Ad".into()]),
                net: 150,
            }],
            actions: vec![ActionRecord {
                seat: 0,
                street: Street::Preflop,
                kind: ActionKind::Raise,
                amount: Some(250),
            }],
            winners: vec![WinnerRecord {
                seat: 0,
                amount: 300,
                description: Some("pair".into()),
            }],
        }
    }

    #[test]
    fn append_stamps_missing_timestamp() {
        let mut logger = HandLogger::from_writer(Vec::new());
        logger.append(&sample(1)).unwrap();
        let written = logger.into_inner();
        let records = read_records(&written[..]).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].ts.is_some());
    }

    #[test]
    fn records_round_trip_line_by_line() {
        let mut logger = HandLogger::from_writer(Vec::new());
        let mut first = sample(1);
        first.ts = Some("2026-01-01T00:00:00Z".into());
        let mut second = sample(2);
        second.ts = Some("2026-01-01T00:01:00Z".into());
        logger.append(&first).unwrap();
        logger.append(&second).unwrap();
        let written = logger.into_inner();
        assert_eq!(written.iter().filter(|&&b| b == b'\n').count(), 2);
        let records = read_records(&written[..]).unwrap();
        assert_eq!(records, vec![first, second]);
    }

    #[test]
    fn read_skips_blank_lines() {
        let mut logger = HandLogger::from_writer(Vec::new());
        let mut rec = sample(3);
        rec.ts = Some("2026-01-01T00:00:00Z".into());
        logger.append(&rec).unwrap();
        let mut written = logger.into_inner();
        written.extend_from_slice(b"\n\n");
        let records = read_records(&written[..]).unwrap();
        assert_eq!(records, vec![rec]);
    }

    #[test]
    fn malformed_line_is_an_error() {
        let data = b"{not json}\n";
        assert!(read_records(&data[..]).is_err());
    }

    #[test]
    fn street_serializes_lowercase() {
        let json = serde_json::to_string(&Street::Preflop).unwrap();
        assert_eq!(json, "\"preflop\"");
        let kind = serde_json::to_string(&ActionKind::AllIn).unwrap();
        assert_eq!(kind, "\"all-in\"");
    }
}
