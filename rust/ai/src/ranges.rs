//! Preflop open-raise ranges keyed by position and hand notation.
//!
//! Each table maps a starting-hand notation (see
//! [`hole_notation`](riverline_engine::cards::hole_notation)) to a compact
//! range entry: `R<pct>` opens for a raise that percentage of the time,
//! `C<pct>` limps, anything else folds. A bare `R` or `C`, or one whose
//! percentage fails to parse, reads as 100. Hands absent from a table are
//! folds. The blinds are special-cased: any two cards open there at full
//! frequency, so no tables are stored for them.

use riverline_engine::player::Position;

/// A parsed range entry: what to do first-in with a hand, and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAction {
    /// Open for a raise this percent of the time, folding the rest.
    Raise(u8),
    /// Limp in this percent of the time, folding the rest.
    Call(u8),
    /// Never play the hand first-in.
    Fold,
}

impl RangeAction {
    /// Percent of the time the hand is played rather than folded.
    pub fn frequency(self) -> u8 {
        match self {
            RangeAction::Raise(f) | RangeAction::Call(f) => f,
            RangeAction::Fold => 0,
        }
    }
}

/// Parses a compact range entry such as `"R100"`, `"C50"`, or `"F"`.
///
/// Unrecognized prefixes fold. A missing, zero, or unparsable percentage
/// reads as 100, so `"R"` and `"R0"` both mean an always-raise.
pub fn parse_range_entry(entry: &str) -> RangeAction {
    fn pct(digits: &str) -> u8 {
        match digits.parse::<u8>() {
            Ok(0) | Err(_) => 100,
            Ok(f) => f,
        }
    }

    match entry.as_bytes().first() {
        Some(b'R') => RangeAction::Raise(pct(&entry[1..])),
        Some(b'C') => RangeAction::Call(pct(&entry[1..])),
        _ => RangeAction::Fold,
    }
}

/// Under-the-gun opening range, the tightest table.
const UTG_OPEN: &[(&str, &str)] = &[
    // Pairs
    ("AA", "R100"),
    ("KK", "R100"),
    ("QQ", "R100"),
    ("JJ", "R100"),
    ("TT", "R100"),
    ("99", "R100"),
    ("88", "R100"),
    ("77", "R80"),
    ("66", "R60"),
    ("55", "R40"),
    ("44", "R30"),
    ("33", "R20"),
    ("22", "R20"),
    // Suited
    ("AKs", "R100"),
    ("AQs", "R100"),
    ("AJs", "R100"),
    ("ATs", "R100"),
    ("A9s", "R60"),
    ("A8s", "R40"),
    ("A7s", "R30"),
    ("A6s", "R30"),
    ("A5s", "R50"),
    ("A4s", "R40"),
    ("A3s", "R30"),
    ("A2s", "R20"),
    ("KQs", "R100"),
    ("KJs", "R100"),
    ("KTs", "R90"),
    ("K9s", "R40"),
    ("QJs", "R100"),
    ("QTs", "R80"),
    ("Q9s", "R30"),
    ("JTs", "R100"),
    ("J9s", "R40"),
    ("T9s", "R70"),
    ("T8s", "R20"),
    ("98s", "R50"),
    ("87s", "R40"),
    ("76s", "R30"),
    ("65s", "R20"),
    ("54s", "R20"),
    // Offsuit
    ("AKo", "R100"),
    ("AQo", "R100"),
    ("AJo", "R90"),
    ("ATo", "R60"),
    ("KQo", "R90"),
    ("KJo", "R60"),
    ("KTo", "R30"),
    ("QJo", "R50"),
    ("QTo", "R20"),
    ("JTo", "R30"),
];

/// Hijack opening range.
const HJ_OPEN: &[(&str, &str)] = &[
    // Pairs
    ("AA", "R100"),
    ("KK", "R100"),
    ("QQ", "R100"),
    ("JJ", "R100"),
    ("TT", "R100"),
    ("99", "R100"),
    ("88", "R100"),
    ("77", "R100"),
    ("66", "R80"),
    ("55", "R60"),
    ("44", "R50"),
    ("33", "R40"),
    ("22", "R40"),
    // Suited
    ("AKs", "R100"),
    ("AQs", "R100"),
    ("AJs", "R100"),
    ("ATs", "R100"),
    ("A9s", "R80"),
    ("A8s", "R60"),
    ("A7s", "R50"),
    ("A6s", "R50"),
    ("A5s", "R80"),
    ("A4s", "R60"),
    ("A3s", "R50"),
    ("A2s", "R40"),
    ("KQs", "R100"),
    ("KJs", "R100"),
    ("KTs", "R100"),
    ("K9s", "R60"),
    ("K8s", "R30"),
    ("QJs", "R100"),
    ("QTs", "R100"),
    ("Q9s", "R50"),
    ("Q8s", "R20"),
    ("JTs", "R100"),
    ("J9s", "R60"),
    ("J8s", "R30"),
    ("T9s", "R100"),
    ("T8s", "R50"),
    ("98s", "R80"),
    ("97s", "R30"),
    ("87s", "R70"),
    ("86s", "R20"),
    ("76s", "R50"),
    ("75s", "R20"),
    ("65s", "R40"),
    ("54s", "R30"),
    ("43s", "R20"),
    // Offsuit
    ("AKo", "R100"),
    ("AQo", "R100"),
    ("AJo", "R100"),
    ("ATo", "R80"),
    ("A9o", "R40"),
    ("KQo", "R100"),
    ("KJo", "R80"),
    ("KTo", "R50"),
    ("K9o", "R20"),
    ("QJo", "R80"),
    ("QTo", "R50"),
    ("Q9o", "R20"),
    ("JTo", "R60"),
    ("J9o", "R20"),
    ("T9o", "R30"),
];

/// Cutoff opening range.
const CO_OPEN: &[(&str, &str)] = &[
    // Pairs
    ("AA", "R100"),
    ("KK", "R100"),
    ("QQ", "R100"),
    ("JJ", "R100"),
    ("TT", "R100"),
    ("99", "R100"),
    ("88", "R100"),
    ("77", "R100"),
    ("66", "R100"),
    ("55", "R100"),
    ("44", "R80"),
    ("33", "R70"),
    ("22", "R70"),
    // Suited
    ("AKs", "R100"),
    ("AQs", "R100"),
    ("AJs", "R100"),
    ("ATs", "R100"),
    ("A9s", "R100"),
    ("A8s", "R100"),
    ("A7s", "R100"),
    ("A6s", "R100"),
    ("A5s", "R100"),
    ("A4s", "R100"),
    ("A3s", "R100"),
    ("A2s", "R100"),
    ("KQs", "R100"),
    ("KJs", "R100"),
    ("KTs", "R100"),
    ("K9s", "R100"),
    ("K8s", "R70"),
    ("K7s", "R50"),
    ("K6s", "R40"),
    ("K5s", "R40"),
    ("K4s", "R30"),
    ("K3s", "R20"),
    ("K2s", "R20"),
    ("QJs", "R100"),
    ("QTs", "R100"),
    ("Q9s", "R100"),
    ("Q8s", "R60"),
    ("Q7s", "R30"),
    ("Q6s", "R30"),
    ("Q5s", "R30"),
    ("Q4s", "R20"),
    ("JTs", "R100"),
    ("J9s", "R100"),
    ("J8s", "R70"),
    ("J7s", "R40"),
    ("J6s", "R30"),
    ("T9s", "R100"),
    ("T8s", "R100"),
    ("T7s", "R50"),
    ("T6s", "R30"),
    ("98s", "R100"),
    ("97s", "R80"),
    ("96s", "R40"),
    ("95s", "R20"),
    ("87s", "R100"),
    ("86s", "R60"),
    ("85s", "R30"),
    ("76s", "R100"),
    ("75s", "R50"),
    ("74s", "R20"),
    ("65s", "R100"),
    ("64s", "R40"),
    ("63s", "R20"),
    ("54s", "R100"),
    ("53s", "R40"),
    ("52s", "R20"),
    ("43s", "R50"),
    ("42s", "R20"),
    ("32s", "R30"),
    // Offsuit
    ("AKo", "R100"),
    ("AQo", "R100"),
    ("AJo", "R100"),
    ("ATo", "R100"),
    ("A9o", "R100"),
    ("A8o", "R80"),
    ("A7o", "R60"),
    ("A6o", "R50"),
    ("A5o", "R70"),
    ("A4o", "R50"),
    ("A3o", "R40"),
    ("A2o", "R30"),
    ("KQo", "R100"),
    ("KJo", "R100"),
    ("KTo", "R100"),
    ("K9o", "R70"),
    ("K8o", "R30"),
    ("K7o", "R20"),
    ("K6o", "R20"),
    ("QJo", "R100"),
    ("QTo", "R100"),
    ("Q9o", "R60"),
    ("Q8o", "R20"),
    ("JTo", "R100"),
    ("J9o", "R60"),
    ("J8o", "R20"),
    ("T9o", "R80"),
    ("T8o", "R30"),
    ("98o", "R60"),
    ("97o", "R20"),
    ("87o", "R40"),
    ("76o", "R30"),
    ("65o", "R20"),
    ("54o", "R20"),
];

/// Button opening range, the widest table.
const BTN_OPEN: &[(&str, &str)] = &[
    // Pairs
    ("AA", "R100"),
    ("KK", "R100"),
    ("QQ", "R100"),
    ("JJ", "R100"),
    ("TT", "R100"),
    ("99", "R100"),
    ("88", "R100"),
    ("77", "R100"),
    ("66", "R100"),
    ("55", "R100"),
    ("44", "R100"),
    ("33", "R100"),
    ("22", "R100"),
    // Suited
    ("AKs", "R100"),
    ("AQs", "R100"),
    ("AJs", "R100"),
    ("ATs", "R100"),
    ("A9s", "R100"),
    ("A8s", "R100"),
    ("A7s", "R100"),
    ("A6s", "R100"),
    ("A5s", "R100"),
    ("A4s", "R100"),
    ("A3s", "R100"),
    ("A2s", "R100"),
    ("KQs", "R100"),
    ("KJs", "R100"),
    ("KTs", "R100"),
    ("K9s", "R100"),
    ("K8s", "R100"),
    ("K7s", "R100"),
    ("K6s", "R100"),
    ("K5s", "R100"),
    ("K4s", "R100"),
    ("K3s", "R100"),
    ("K2s", "R100"),
    ("QJs", "R100"),
    ("QTs", "R100"),
    ("Q9s", "R100"),
    ("Q8s", "R100"),
    ("Q7s", "R80"),
    ("Q6s", "R80"),
    ("Q5s", "R80"),
    ("Q4s", "R70"),
    ("Q3s", "R60"),
    ("Q2s", "R60"),
    ("JTs", "R100"),
    ("J9s", "R100"),
    ("J8s", "R100"),
    ("J7s", "R80"),
    ("J6s", "R70"),
    ("J5s", "R60"),
    ("J4s", "R50"),
    ("J3s", "R40"),
    ("J2s", "R40"),
    ("T9s", "R100"),
    ("T8s", "R100"),
    ("T7s", "R100"),
    ("T6s", "R70"),
    ("T5s", "R50"),
    ("T4s", "R40"),
    ("T3s", "R30"),
    ("T2s", "R30"),
    ("98s", "R100"),
    ("97s", "R100"),
    ("96s", "R80"),
    ("95s", "R60"),
    ("94s", "R40"),
    ("93s", "R30"),
    ("92s", "R30"),
    ("87s", "R100"),
    ("86s", "R100"),
    ("85s", "R70"),
    ("84s", "R50"),
    ("83s", "R30"),
    ("82s", "R30"),
    ("76s", "R100"),
    ("75s", "R100"),
    ("74s", "R60"),
    ("73s", "R40"),
    ("72s", "R30"),
    ("65s", "R100"),
    ("64s", "R100"),
    ("63s", "R50"),
    ("62s", "R40"),
    ("54s", "R100"),
    ("53s", "R80"),
    ("52s", "R50"),
    ("43s", "R100"),
    ("42s", "R50"),
    ("32s", "R80"),
    // Offsuit
    ("AKo", "R100"),
    ("AQo", "R100"),
    ("AJo", "R100"),
    ("ATo", "R100"),
    ("A9o", "R100"),
    ("A8o", "R100"),
    ("A7o", "R100"),
    ("A6o", "R100"),
    ("A5o", "R100"),
    ("A4o", "R100"),
    ("A3o", "R100"),
    ("A2o", "R100"),
    ("KQo", "R100"),
    ("KJo", "R100"),
    ("KTo", "R100"),
    ("K9o", "R100"),
    ("K8o", "R80"),
    ("K7o", "R70"),
    ("K6o", "R60"),
    ("K5o", "R50"),
    ("K4o", "R40"),
    ("K3o", "R40"),
    ("K2o", "R30"),
    ("QJo", "R100"),
    ("QTo", "R100"),
    ("Q9o", "R100"),
    ("Q8o", "R70"),
    ("Q7o", "R40"),
    ("Q6o", "R30"),
    ("Q5o", "R30"),
    ("Q4o", "R20"),
    ("Q3o", "R20"),
    ("Q2o", "R20"),
    ("JTo", "R100"),
    ("J9o", "R100"),
    ("J8o", "R70"),
    ("J7o", "R40"),
    ("J6o", "R20"),
    ("J5o", "R20"),
    ("T9o", "R100"),
    ("T8o", "R80"),
    ("T7o", "R40"),
    ("T6o", "R20"),
    ("98o", "R100"),
    ("97o", "R60"),
    ("96o", "R30"),
    ("87o", "R100"),
    ("86o", "R50"),
    ("85o", "R20"),
    ("76o", "R80"),
    ("75o", "R40"),
    ("65o", "R70"),
    ("64o", "R30"),
    ("54o", "R60"),
    ("53o", "R20"),
    ("43o", "R30"),
    ("32o", "R20"),
];

/// Looks up the first-in action for `notation` from `position`.
///
/// Returns `None` when the hand is outside the position's opening range.
/// The blinds open every hand at full frequency.
pub fn rfi_entry(position: Position, notation: &str) -> Option<RangeAction> {
    let table = match position {
        Position::SmallBlind | Position::BigBlind => {
            return Some(RangeAction::Raise(100));
        }
        Position::UnderTheGun => UTG_OPEN,
        Position::Hijack => HJ_OPEN,
        Position::Cutoff => CO_OPEN,
        Position::Button => BTN_OPEN,
    };
    table
        .iter()
        .find(|(hand, _)| *hand == notation)
        .map(|(_, entry)| parse_range_entry(entry))
}

/// Percentage of all 1326 starting combos a position opens first-in,
/// weighting each hand by its raise frequency.
pub fn open_rate(position: Position) -> f64 {
    let table = match position {
        Position::SmallBlind | Position::BigBlind => return 100.0,
        Position::UnderTheGun => UTG_OPEN,
        Position::Hijack => HJ_OPEN,
        Position::Cutoff => CO_OPEN,
        Position::Button => BTN_OPEN,
    };
    let weighted: f64 = table
        .iter()
        .filter_map(|(hand, entry)| match parse_range_entry(entry) {
            RangeAction::Raise(freq) => {
                Some(f64::from(combos(hand)) * f64::from(freq) / 100.0)
            }
            _ => None,
        })
        .sum();
    weighted / 1326.0 * 100.0
}

/// Number of distinct card combos a notation covers: 6 for pairs, 4 for
/// suited hands, 12 for offsuit.
fn combos(notation: &str) -> u32 {
    if notation.len() == 2 {
        6
    } else if notation.ends_with('s') {
        4
    } else {
        12
    }
}
