use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::infra::RandomSource;

/// Колода: владеющий, мутабельный пул ещё не разданных карт.
///
/// Колода принадлежит ровно одному столу и никогда не шарится между столами,
/// поэтому синхронизация не нужна. Случайность приходит снаружи через
/// `RandomSource` — сама колода ничего не знает про RNG-бэкенд.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Полная 52-карточная колода (все комбинации ранг × масть).
    pub fn full() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Пустая колода (для "стол между раздачами").
    pub fn empty() -> Self {
        Deck { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Снять одну равномерно выбранную карту из оставшихся.
    ///
    /// Исчерпание колоды — нарушение контракта вызывающего (за раздачу
    /// расходуется максимум 2*9 + 5 карт), поэтому паника, а не ошибка.
    pub fn deal<R: RandomSource>(&mut self, rng: &mut R) -> Card {
        assert!(!self.cards.is_empty(), "колода исчерпана");
        let idx = rng.pick(self.cards.len());
        self.cards.swap_remove(idx)
    }

    /// Есть ли карта ещё в колоде (удобно для тестов).
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.iter().any(|c| c == card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::DeterministicRng;

    #[test]
    fn full_deck_has_52_distinct_cards() {
        let deck = Deck::full();
        assert_eq!(deck.len(), 52);

        let mut seen = std::collections::HashSet::new();
        for c in &deck.cards {
            assert!(seen.insert(*c), "дубликат карты {c}");
        }
    }

    #[test]
    fn deal_removes_dealt_card_from_pool() {
        let mut deck = Deck::full();
        let mut rng = DeterministicRng::from_seed(7);

        let card = deck.deal(&mut rng);
        assert_eq!(deck.len(), 51);
        assert!(!deck.contains(&card));
    }

    #[test]
    fn deal_can_exhaust_exactly_52_cards() {
        let mut deck = Deck::full();
        let mut rng = DeterministicRng::from_seed(1);
        for _ in 0..52 {
            deck.deal(&mut rng);
        }
        assert!(deck.is_empty());
    }
}
