//! Оценка покерных комбинаций.
//!
//! `evaluate_five` классифицирует ровно пять карт; `best_of_seven`
//! перебирает все пятёрки из доступных карт (21 штука для семи) и
//! возвращает сильнейшую вместе с самими картами.

use crate::domain::card::{Card, Rank};
use crate::eval::hand_value::HandValue;

/// Классифицировать ровно пять карт.
pub fn evaluate_five(cards: &[Card; 5]) -> HandValue {
    // Ранги по убыванию.
    let mut ranks: [Rank; 5] = [cards[0].rank; 5];
    for (slot, c) in ranks.iter_mut().zip(cards.iter()) {
        *slot = c.rank;
    }
    ranks.sort_by(|a, b| b.cmp(a));

    // Группировка по рангу: (ранг, сколько раз), отсортирована по
    // (количество, ранг) по убыванию.
    let mut groups: Vec<(Rank, u8)> = Vec::with_capacity(5);
    for &r in &ranks {
        match groups.iter_mut().find(|(g, _)| *g == r) {
            Some((_, n)) => *n += 1,
            None => groups.push((r, 1)),
        }
    }
    groups.sort_by(|a, b| (b.1, b.0).cmp(&(a.1, a.0)));

    let flush_suit = if cards.iter().all(|c| c.suit == cards[0].suit) {
        Some(cards[0].suit)
    } else {
        None
    };
    let straight_high = straight_high(&ranks);

    match (groups[0].1, groups.get(1).map(|g| g.1).unwrap_or(0)) {
        (4, _) => HandValue::FourOfAKind {
            quads: groups[0].0,
            kicker: groups[1].0,
        },
        (3, 2) => HandValue::FullHouse {
            trips: groups[0].0,
            pair: groups[1].0,
        },
        (3, _) => HandValue::ThreeOfAKind {
            trips: groups[0].0,
            kickers: [groups[1].0, groups[2].0],
        },
        (2, 2) => HandValue::TwoPair {
            high_pair: groups[0].0,
            low_pair: groups[1].0,
            kicker: groups[2].0,
        },
        (2, _) => HandValue::OnePair {
            pair: groups[0].0,
            kickers: [groups[1].0, groups[2].0, groups[3].0],
        },
        _ => match (flush_suit, straight_high) {
            (Some(suit), Some(high)) => {
                if high == Rank::Ace {
                    HandValue::RoyalFlush { suit }
                } else {
                    HandValue::StraightFlush { suit, high }
                }
            }
            (Some(suit), None) => HandValue::Flush { suit, ranks },
            (None, Some(high)) => HandValue::Straight { high },
            (None, None) => HandValue::HighCard { ranks },
        },
    }
}

/// Старшая карта стрита для пяти различных рангов (по убыванию),
/// либо `None`. Колесо A-5-4-3-2 считается стритом до пятёрки.
fn straight_high(ranks: &[Rank; 5]) -> Option<Rank> {
    let consecutive = ranks
        .windows(2)
        .all(|w| w[0] as u8 == w[1] as u8 + 1);
    if consecutive {
        return Some(ranks[0]);
    }
    let wheel = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
    if *ranks == wheel {
        return Some(Rank::Five);
    }
    None
}

/// Лучшая пятёрка из 5–7 карт.
///
/// На шоудауне сюда приходят 2 карманные + 5 общих карт.
pub fn best_of_seven(cards: &[Card]) -> (HandValue, [Card; 5]) {
    assert!(
        (5..=7).contains(&cards.len()),
        "оценка требует от 5 до 7 карт"
    );

    let n = cards.len();
    let mut best: Option<(HandValue, [Card; 5])> = None;

    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let value = evaluate_five(&five);
                        let better = match &best {
                            Some((v, _)) => value > *v,
                            None => true,
                        };
                        if better {
                            best = Some((value, five));
                        }
                    }
                }
            }
        }
    }

    best.unwrap_or_else(|| unreachable!("минимум одна пятёрка всегда есть"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace()
            .map(|c| c.parse().unwrap())
            .collect()
    }

    fn five(s: &str) -> [Card; 5] {
        let v = cards(s);
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn classifies_royal_flush_above_straight_flush() {
        let royal = evaluate_five(&five("Ah Kh Qh Jh Th"));
        let sf = evaluate_five(&five("Kh Qh Jh Th 9h"));
        assert!(matches!(royal, HandValue::RoyalFlush { .. }));
        assert!(matches!(sf, HandValue::StraightFlush { .. }));
        assert!(royal > sf);
    }

    #[test]
    fn wheel_straight_is_five_high() {
        let wheel = evaluate_five(&five("Ah 2c 3d 4s 5h"));
        assert_eq!(wheel, HandValue::Straight { high: Rank::Five });

        let six_high = evaluate_five(&five("2c 3d 4s 5h 6h"));
        assert!(six_high > wheel);
    }

    #[test]
    fn ace_does_not_wrap_around() {
        let not_straight = evaluate_five(&five("Qh Kc Ah 2d 3s"));
        assert!(matches!(not_straight, HandValue::HighCard { .. }));
    }

    #[test]
    fn full_house_beats_flush() {
        let fh = evaluate_five(&five("8h 8c 8d 3s 3h"));
        let flush = evaluate_five(&five("Ah Jh 9h 6h 2h"));
        assert!(fh > flush);
    }

    #[test]
    fn kickers_break_pair_ties() {
        let a = evaluate_five(&five("Th Tc Ah 7d 2s"));
        let b = evaluate_five(&five("Td Ts Kh 7c 2d"));
        assert!(a > b);
    }

    #[test]
    fn flushes_of_equal_ranks_tie_across_suits() {
        let hearts = evaluate_five(&five("Ah Jh 9h 6h 2h"));
        let spades = evaluate_five(&five("As Js 9s 6s 2s"));
        assert_eq!(hearts, spades);
    }

    #[test]
    fn best_of_seven_finds_backdoor_flush() {
        let all = cards("Ah Kh 2h 7h 9h Qc Jd");
        let (value, best_five) = best_of_seven(&all);
        assert!(matches!(value, HandValue::Flush { .. }));
        assert!(best_five.iter().all(|c| c.suit == best_five[0].suit));
    }

    #[test]
    fn best_of_seven_prefers_board_straight_over_pair() {
        let all = cards("2c 2d 5h 6s 7d 8c 9h");
        let (value, _) = best_of_seven(&all);
        assert_eq!(value, HandValue::Straight { high: Rank::Nine });
    }
}
