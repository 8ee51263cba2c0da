use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Rank, Suit};

/// Сила пятикарточной комбинации.
///
/// Масти хранятся для отображения, но на сравнение не влияют: два флеша
/// одинаковых рангов в разных мастях делят банк.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum HandValue {
    HighCard { ranks: [Rank; 5] },
    OnePair { pair: Rank, kickers: [Rank; 3] },
    TwoPair { high_pair: Rank, low_pair: Rank, kicker: Rank },
    ThreeOfAKind { trips: Rank, kickers: [Rank; 2] },
    Straight { high: Rank },
    Flush { suit: Suit, ranks: [Rank; 5] },
    FullHouse { trips: Rank, pair: Rank },
    FourOfAKind { quads: Rank, kicker: Rank },
    StraightFlush { suit: Suit, high: Rank },
    RoyalFlush { suit: Suit },
}

impl HandValue {
    /// Ключ сравнения: (категория, ранги по убыванию значимости).
    fn key(&self) -> (u8, [u8; 5]) {
        fn r(rank: Rank) -> u8 {
            rank as u8
        }
        match *self {
            HandValue::HighCard { ranks } => {
                (0, [r(ranks[0]), r(ranks[1]), r(ranks[2]), r(ranks[3]), r(ranks[4])])
            }
            HandValue::OnePair { pair, kickers } => {
                (1, [r(pair), r(kickers[0]), r(kickers[1]), r(kickers[2]), 0])
            }
            HandValue::TwoPair { high_pair, low_pair, kicker } => {
                (2, [r(high_pair), r(low_pair), r(kicker), 0, 0])
            }
            HandValue::ThreeOfAKind { trips, kickers } => {
                (3, [r(trips), r(kickers[0]), r(kickers[1]), 0, 0])
            }
            HandValue::Straight { high } => (4, [r(high), 0, 0, 0, 0]),
            HandValue::Flush { ranks, .. } => {
                (5, [r(ranks[0]), r(ranks[1]), r(ranks[2]), r(ranks[3]), r(ranks[4])])
            }
            HandValue::FullHouse { trips, pair } => (6, [r(trips), r(pair), 0, 0, 0]),
            HandValue::FourOfAKind { quads, kicker } => (7, [r(quads), r(kicker), 0, 0, 0]),
            HandValue::StraightFlush { high, .. } => (8, [r(high), 0, 0, 0, 0]),
            HandValue::RoyalFlush { .. } => (9, [0, 0, 0, 0, 0]),
        }
    }

    /// Человекочитаемое имя комбинации для истории раздачи.
    pub fn describe(&self) -> String {
        match *self {
            HandValue::HighCard { ranks } => format!("High Card, {}", ranks[0]),
            HandValue::OnePair { pair, .. } => format!("Pair of {pair}s"),
            HandValue::TwoPair { high_pair, low_pair, .. } => {
                format!("Two Pair, {high_pair}s and {low_pair}s")
            }
            HandValue::ThreeOfAKind { trips, .. } => format!("Three of a Kind, {trips}s"),
            HandValue::Straight { high } => format!("Straight, {high} high"),
            HandValue::Flush { ranks, .. } => format!("Flush, {} high", ranks[0]),
            HandValue::FullHouse { trips, pair } => {
                format!("Full House, {trips}s over {pair}s")
            }
            HandValue::FourOfAKind { quads, .. } => format!("Four of a Kind, {quads}s"),
            HandValue::StraightFlush { high, .. } => format!("Straight Flush, {high} high"),
            HandValue::RoyalFlush { .. } => "Royal Flush".to_string(),
        }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
