use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::config::HAND_SIZE;

/// The twelve classifications a five-card hand can earn, ordered by payout.
/// Pairs split in two: a lone pair of Jacks or better is paid, anything
/// lower is not.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandRank {
    HighCard = 0,
    UnpaidPair = 1,
    PaidPair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    FiveOfAKind = 9,
    StraightFlush = 10,
    RoyalStraightFlush = 11,
}

impl HandRank {
    /// Every rank in payout order, worst to best.
    pub const ALL: [HandRank; 12] = [
        HandRank::HighCard,
        HandRank::UnpaidPair,
        HandRank::PaidPair,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::FiveOfAKind,
        HandRank::StraightFlush,
        HandRank::RoyalStraightFlush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::UnpaidPair => "Unpaid Pair",
            HandRank::PaidPair => "Paid Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::FiveOfAKind => "Five of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalStraightFlush => "Royal Straight Flush",
        }
    }
}

/// Classifies exactly five cards into one of the twelve [`HandRank`]s.
///
/// Any other slice length returns `None`, which the payout table treats as
/// worth nothing; the session never produces such a hand.
///
/// Aces read both low and high: they extend A-2-3-4-5 as well as 10-J-Q-K-A,
/// and count as rank 14 for pair purposes, so a pair of Aces is a paid pair.
/// With a multi-pack shoe duplicate cards are legal, which is where
/// [`HandRank::FiveOfAKind`] comes from.
///
/// # Examples
///
/// ```
/// use pokermachine_engine::cards::{Card, Rank, Suit};
/// use pokermachine_engine::hand::{evaluate_hand, HandRank};
///
/// let royal: Vec<Card> = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]
///     .into_iter()
///     .map(|rank| Card { suit: Suit::Hearts, rank, pack: 0 })
///     .collect();
/// assert_eq!(evaluate_hand(&royal), Some(HandRank::RoyalStraightFlush));
///
/// let mixed = vec![
///     Card { suit: Suit::Clubs, rank: Rank::Ten, pack: 0 },
///     Card { suit: Suit::Hearts, rank: Rank::Ten, pack: 0 },
///     Card { suit: Suit::Spades, rank: Rank::Two, pack: 0 },
///     Card { suit: Suit::Diamonds, rank: Rank::Seven, pack: 0 },
///     Card { suit: Suit::Clubs, rank: Rank::King, pack: 0 },
/// ];
/// // Tens are below the Jacks-or-better line
/// assert_eq!(evaluate_hand(&mixed), Some(HandRank::UnpaidPair));
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Option<HandRank> {
    if cards.len() != HAND_SIZE {
        return None;
    }

    // Count ranks on the high reading (Ace = 14)
    let mut rank_counts = [0u8; 15];
    for &c in cards.iter() {
        rank_counts[c.rank.high_value() as usize] += 1;
    }
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    // Straight detection works on a dual-reading value set: every Ace
    // contributes both 1 and 14, other ranks their natural value
    let mut straight_vals: Vec<u8> = Vec::with_capacity(HAND_SIZE + 1);
    for &c in cards.iter() {
        if c.rank.is_ace() {
            straight_vals.push(1);
            straight_vals.push(14);
        } else {
            straight_vals.push(c.rank.value());
        }
    }
    straight_vals.sort_unstable();
    straight_vals.dedup();
    let straight_high = detect_straight_high(&straight_vals);

    // Straight flush, royal when the run is exactly 10-J-Q-K-A
    if is_flush {
        if let Some(high) = straight_high {
            return Some(if high == 14 {
                HandRank::RoyalStraightFlush
            } else {
                HandRank::StraightFlush
            });
        }
    }

    let (top, second) = top_multiples(&rank_counts);

    // Five of a kind needs a multi-pack shoe
    if top >= 5 {
        return Some(HandRank::FiveOfAKind);
    }
    if top == 4 {
        return Some(HandRank::FourOfAKind);
    }
    if top == 3 && second == 2 {
        return Some(HandRank::FullHouse);
    }
    if is_flush {
        return Some(HandRank::Flush);
    }
    if straight_high.is_some() {
        return Some(HandRank::Straight);
    }
    if top == 3 {
        return Some(HandRank::ThreeOfAKind);
    }
    if top == 2 && second == 2 {
        return Some(HandRank::TwoPair);
    }
    if top == 2 {
        // Exactly one pair: paid when the paired rank reads Jack or better
        let paired = rank_counts.iter().position(|&n| n == 2).unwrap_or(0);
        return Some(if paired >= Rank::Jack.high_value() as usize {
            HandRank::PaidPair
        } else {
            HandRank::UnpaidPair
        });
    }
    Some(HandRank::HighCard)
}

/// Highest value ending a run of five consecutive entries, if any.
/// Input must be sorted ascending and deduplicated.
fn detect_straight_high(sorted_unique_vals: &[u8]) -> Option<u8> {
    let mut run = 1;
    let mut best = None;
    for i in 1..sorted_unique_vals.len() {
        if sorted_unique_vals[i] == sorted_unique_vals[i - 1] + 1 {
            run += 1;
            if run >= HAND_SIZE {
                best = Some(sorted_unique_vals[i]);
            }
        } else {
            run = 1;
        }
    }
    best
}

/// The two largest per-rank counts, descending.
fn top_multiples(rank_counts: &[u8; 15]) -> (u8, u8) {
    let mut counts: Vec<u8> = rank_counts.iter().copied().filter(|&n| n > 0).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let top = counts.first().copied().unwrap_or(0);
    let second = counts.get(1).copied().unwrap_or(0);
    (top, second)
}
