//! Hand-strength heuristics shared by the scripted opponents and the
//! advisor.
//!
//! Scores are coarse buckets on a 0..1 scale, tuned for thresholds rather
//! than equity accuracy: a made hand maps to a category base, one-pair
//! hands get adjusted by where the pair sits against the board, and draws
//! contribute a flat equity bump.

use riverline_engine::cards::Card;
use riverline_engine::hand::{evaluate_hand, Category};
use riverline_engine::player::Position;

/// Preflop tier for a starting-hand notation such as `"AKs"` or `"72o"`.
///
/// Used when deciding whether to continue against a raise. Tiers are
/// checked before the generic ace/king rules, so `"ATs"` reads from its
/// tier rather than the suited-ace bucket.
pub fn preflop_tier(notation: &str) -> f64 {
    const PREMIUM: &[&str] = &["AA", "KK", "QQ", "AKs", "AKo"];
    const VERY_STRONG: &[&str] = &["JJ", "TT", "AQs", "AQo", "AJs"];
    const STRONG: &[&str] = &["99", "88", "ATs", "AJo", "KQs", "KQo", "KJs"];
    const PLAYABLE: &[&str] = &["77", "66", "A9s", "A8s", "KTs", "QJs", "QTs", "JTs"];
    const SMALL_PAIRS: &[&str] = &["55", "44", "33", "22"];
    const SUITED_CONNECTORS: &[&str] = &["T9s", "98s", "87s", "76s", "65s", "54s"];

    if PREMIUM.contains(&notation) {
        return 0.95;
    }
    if VERY_STRONG.contains(&notation) {
        return 0.85;
    }
    if STRONG.contains(&notation) {
        return 0.75;
    }
    if PLAYABLE.contains(&notation) {
        return 0.65;
    }
    if SMALL_PAIRS.contains(&notation) {
        return 0.55;
    }
    if notation.contains('A') && notation.ends_with('s') {
        return 0.50;
    }
    if notation.contains('K') && notation.ends_with('s') {
        return 0.45;
    }
    if SUITED_CONNECTORS.contains(&notation) {
        return 0.45;
    }
    if notation.contains('A') && notation.ends_with('o') {
        return 0.40;
    }
    if notation.contains('K') && notation.ends_with('o') {
        return 0.35;
    }
    0.20
}

/// Scores the made hand for `hole` against `board` on a 0..1 scale.
///
/// With an empty board this falls back to a raw-card formula; otherwise
/// the seven-card evaluation drives a category base, one pair is refined
/// by its rank relative to the board, and the top kicker adds a small
/// tiebreak bonus.
pub fn hand_strength(hole: [Card; 2], board: &[Card]) -> f64 {
    if board.is_empty() {
        return preflop_score(hole);
    }

    let mut cards: Vec<Card> = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(board);
    let Ok(made) = evaluate_hand(&cards) else {
        return 0.15;
    };

    let mut score = match made.category {
        Category::RoyalFlush => 1.0,
        Category::StraightFlush => 0.98,
        Category::FourOfAKind => 0.95,
        Category::FullHouse => 0.90,
        Category::Flush => 0.80,
        Category::Straight => 0.75,
        Category::ThreeOfAKind => 0.65,
        Category::TwoPair => 0.50,
        Category::OnePair => pair_score(hole, board, made.kickers[0]),
        Category::HighCard => 0.15,
    };
    score += (f64::from(made.kickers[0]) - 2.0) / 12.0 * 0.05;
    score.min(1.0)
}

/// Raw two-card score used before any board exists.
fn preflop_score(hole: [Card; 2]) -> f64 {
    let mut ranks = [hole[0].rank as u8, hole[1].rank as u8];
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    let [hi, lo] = ranks;

    if hi == lo {
        return 0.5 + f64::from(hi - 2) / 12.0 * 0.5;
    }

    let mut score = f64::from(hi + lo - 4) / 24.0 * 0.6;
    if hole[0].suit == hole[1].suit {
        score += 0.05;
    }
    match hi - lo {
        1 => score += 0.03,
        2 => score += 0.01,
        _ => {}
    }
    if hi == 14 {
        score += 0.1;
    }
    score.clamp(0.0, 1.0)
}

/// Refines a one-pair score by where the pair sits against the board.
fn pair_score(hole: [Card; 2], board: &[Card], pair_rank: u8) -> f64 {
    let mut board_ranks: Vec<u8> = board.iter().map(|c| c.rank as u8).collect();
    board_ranks.sort_unstable_by(|a, b| b.cmp(a));

    let hole_ranks = [hole[0].rank as u8, hole[1].rank as u8];
    if hole_ranks[0] == hole_ranks[1] {
        if hole_ranks[0] > board_ranks[0] {
            return 0.55;
        }
        if board_ranks.len() > 1 && hole_ranks[0] > board_ranks[1] {
            return 0.45;
        }
        return 0.30;
    }

    if pair_rank == board_ranks[0] {
        let kicker = hole_ranks
            .into_iter()
            .filter(|&r| r != pair_rank)
            .max()
            .unwrap_or(0);
        return if kicker >= 12 {
            0.50
        } else if kicker >= 9 {
            0.45
        } else {
            0.40
        };
    }
    if board_ranks.len() > 1 && pair_rank == board_ranks[1] {
        return 0.35;
    }
    0.25
}

/// Drawing potential for a hand: flush and straight draws with a combined
/// equity estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawEquity {
    pub flush_draw: bool,
    pub straight_draw: bool,
    /// Rough chance of improving, capped at 0.45 for combo draws.
    pub equity: f64,
}

/// Detects flush and straight draws across hole cards and board.
///
/// Returns zero equity before the flop. A flush draw is exactly four of
/// one suit; a straight draw is four distinct ranks inside a five-rank
/// span, with the ace also counting toward wheel and broadway draws.
pub fn draw_equity(hole: [Card; 2], board: &[Card]) -> DrawEquity {
    if board.len() < 3 {
        return DrawEquity {
            flush_draw: false,
            straight_draw: false,
            equity: 0.0,
        };
    }

    let mut suit_counts = [0u8; 4];
    let mut present = [false; 15];
    for card in hole.iter().chain(board.iter()) {
        suit_counts[card.suit as usize] += 1;
        present[card.rank as usize] = true;
    }

    let flush_draw = suit_counts.iter().any(|&n| n == 4);

    let ranks: Vec<u8> = (2u8..=14).filter(|&r| present[usize::from(r)]).collect();
    let mut straight_draw = ranks.windows(4).any(|w| w[3] - w[0] <= 4);
    if present[14] {
        let wheel = [2usize, 3, 4, 5].into_iter().filter(|&r| present[r]).count();
        let broadway = [10usize, 11, 12, 13]
            .into_iter()
            .filter(|&r| present[r])
            .count();
        if wheel >= 3 || broadway >= 3 {
            straight_draw = true;
        }
    }

    let mut equity: f64 = 0.0;
    if flush_draw {
        equity += 0.35;
    }
    if straight_draw {
        equity += 0.17;
    }
    DrawEquity {
        flush_draw,
        straight_draw,
        equity: equity.min(0.45),
    }
}

/// Texture summary of the community cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardTexture {
    pub paired: bool,
    pub flush_draw_possible: bool,
    pub straight_draw_possible: bool,
    pub wet: bool,
    pub high_card: u8,
}

/// Classifies the board for sizing and rationale text.
///
/// Flush possible means two or more of one suit; straight possible means
/// two distinct board ranks within two of each other. A board is wet when
/// either draw is live.
pub fn board_texture(board: &[Card]) -> BoardTexture {
    if board.is_empty() {
        return BoardTexture {
            paired: false,
            flush_draw_possible: false,
            straight_draw_possible: false,
            wet: false,
            high_card: 2,
        };
    }

    let mut rank_counts = [0u8; 15];
    let mut suit_counts = [0u8; 4];
    for card in board {
        rank_counts[card.rank as usize] += 1;
        suit_counts[card.suit as usize] += 1;
    }
    let paired = rank_counts.iter().any(|&n| n >= 2);
    let flush_draw_possible = suit_counts.iter().any(|&n| n >= 2);

    let mut sorted: Vec<u8> = board.iter().map(|c| c.rank as u8).collect();
    sorted.sort_unstable();
    let high_card = sorted.last().copied().unwrap_or(2);
    sorted.dedup();
    let straight_draw_possible = sorted.windows(2).any(|w| w[1] - w[0] <= 2);

    BoardTexture {
        paired,
        flush_draw_possible,
        straight_draw_possible,
        wet: flush_draw_possible || straight_draw_possible,
        high_card,
    }
}

/// True for the seats that act last postflop: button, cutoff, hijack.
pub fn late_position(position: Position) -> bool {
    matches!(
        position,
        Position::Button | Position::Cutoff | Position::Hijack
    )
}
