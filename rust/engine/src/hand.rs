use std::cmp::Ordering;

use crate::cards::Card;
use crate::errors::GameError;

/// Hand categories in ascending strength. Numeric values mirror the
/// conventional 1..10 ranking scale.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn describe(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub category: Category,
    // kickers: tiebreak sequence, ranks sorted by (count desc, rank desc),
    // zero padded; straights carry only the high card
    pub kickers: [u8; 5],
    /// The five cards achieving this strength.
    pub best_five: [Card; 5],
}

/// Evaluates the best five-card hand from 5 to 7 cards.
///
/// Every 5-card subset (at most C(7,5) = 21) is scored independently and the
/// maximum kept. Brute force is deliberate here: the subset count is tiny and
/// the approach is straightforward to verify against known hands.
pub fn evaluate_hand(cards: &[Card]) -> Result<HandStrength, GameError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(GameError::InvalidCardCount(n));
    }
    let mut best: Option<HandStrength> = None;
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let strength = evaluate_five(&five);
                        let better = match &best {
                            None => true,
                            Some(cur) => compare_hands(&strength, cur) == Ordering::Greater,
                        };
                        if better {
                            best = Some(strength);
                        }
                    }
                }
            }
        }
    }
    best.ok_or(GameError::InvalidCardCount(n))
}

/// Scores exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank as u8).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = straight_high_five(&ranks);
    let groups = rank_groups(&ranks);

    let category = if is_flush && straight_high == Some(14) {
        Category::RoyalFlush
    } else if is_flush && straight_high.is_some() {
        Category::StraightFlush
    } else if group_count(&groups, 0) == 4 {
        Category::FourOfAKind
    } else if group_count(&groups, 0) == 3 && group_count(&groups, 1) == 2 {
        Category::FullHouse
    } else if is_flush {
        Category::Flush
    } else if straight_high.is_some() {
        Category::Straight
    } else if group_count(&groups, 0) == 3 {
        Category::ThreeOfAKind
    } else if group_count(&groups, 0) == 2 && group_count(&groups, 1) == 2 {
        Category::TwoPair
    } else if group_count(&groups, 0) == 2 {
        Category::OnePair
    } else {
        Category::HighCard
    };

    let kickers = match category {
        Category::Straight | Category::StraightFlush | Category::RoyalFlush => {
            let high = straight_high.unwrap_or(0);
            [high, 0, 0, 0, 0]
        }
        _ => tiebreak_from_groups(&groups),
    };

    HandStrength {
        category,
        kickers,
        best_five: *cards,
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Returns every index tied at the maximum strength, in input order.
pub fn determine_winners(strengths: &[HandStrength]) -> Vec<usize> {
    let mut winners: Vec<usize> = Vec::new();
    for (i, s) in strengths.iter().enumerate() {
        match winners.first().map(|&w| compare_hands(s, &strengths[w])) {
            None | Some(Ordering::Greater) => {
                winners.clear();
                winners.push(i);
            }
            Some(Ordering::Equal) => winners.push(i),
            Some(Ordering::Less) => {}
        }
    }
    winners
}

/// Straight high card for five descending ranks, or None.
/// The wheel A-2-3-4-5 scores as a 5-high straight.
fn straight_high_five(ranks_desc: &[u8]) -> Option<u8> {
    if ranks_desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    for w in ranks_desc.windows(2) {
        if w[0] != w[1] + 1 {
            return None;
        }
    }
    Some(ranks_desc[0])
}

// Distinct ranks as (count, rank), sorted by count desc then rank desc.
fn rank_groups(ranks_desc: &[u8]) -> Vec<(u8, u8)> {
    let mut counts = [0u8; 15];
    for &r in ranks_desc {
        counts[r as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&r| counts[r as usize] > 0)
        .map(|r| (counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    groups
}

fn group_count(groups: &[(u8, u8)], idx: usize) -> u8 {
    groups.get(idx).map_or(0, |g| g.0)
}

fn tiebreak_from_groups(groups: &[(u8, u8)]) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (slot, &(_, rank)) in k.iter_mut().zip(groups.iter()) {
        *slot = rank;
    }
    k
}
