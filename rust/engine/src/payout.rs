use crate::hand::HandRank;

/// Payout multiplier for a classification. High Card and Unpaid Pair forfeit
/// the wager, Paid Pair returns it exactly, everything above pays.
pub fn multiplier(rank: HandRank) -> u64 {
    match rank {
        HandRank::HighCard => 0,
        HandRank::UnpaidPair => 0,
        HandRank::PaidPair => 1,
        HandRank::TwoPair => 2,
        HandRank::ThreeOfAKind => 3,
        HandRank::Straight => 4,
        HandRank::Flush => 6,
        HandRank::FullHouse => 9,
        HandRank::FourOfAKind => 25,
        HandRank::FiveOfAKind => 40,
        HandRank::StraightFlush => 55,
        HandRank::RoyalStraightFlush => 250,
    }
}

/// Total amount returned to the bankroll for a classified hand.
/// An unclassifiable hand returns nothing.
pub fn gross_return(rank: Option<HandRank>, wager: u64) -> u64 {
    rank.map_or(0, |r| wager * multiplier(r))
}

/// Gross return minus the wager: zero on a push, negative when the wager
/// is forfeited.
pub fn net_result(rank: Option<HandRank>, wager: u64) -> i64 {
    gross_return(rank, wager) as i64 - wager as i64
}
