//! Расслоение банка на главный и побочные.
//!
//! Банк делится по уровням вкладов: каждый уровень образует слой, на который
//! претендуют только игроки, вложившие не меньше этого уровня. Фолднувшие
//! вклады оставляют, но из претендентов исключаются.

use serde::{Deserialize, Serialize};

use crate::domain::game::Game;
use crate::domain::{Chips, SeatIndex};

/// Один слой банка и места, претендующие на него.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    /// Претенденты в порядке возрастания индекса места.
    pub eligible: Vec<SeatIndex>,
}

/// Разложить вклады раздачи на слои. Вызывается после сбора всех ставок
/// (вклады лежат в `invested`). Сумма слоёв равна `game.pot`.
pub fn calculate_pots(game: &Game) -> Vec<Pot> {
    let contributions: Vec<(SeatIndex, Chips, bool)> = game
        .occupied_seats()
        .filter(|(_, p)| !p.invested.is_zero())
        .map(|(i, p)| (i, p.invested, contends(game, i)))
        .collect();

    let mut levels: Vec<Chips> = contributions.iter().map(|&(_, inv, _)| inv).collect();
    levels.sort();
    levels.dedup();

    let mut pots = Vec::new();
    let mut prev = Chips::ZERO;
    for level in levels {
        let mut amount = Chips::ZERO;
        let mut eligible = Vec::new();
        for &(idx, inv, live) in &contributions {
            amount += inv.min(level).saturating_sub(prev);
            if live && inv >= level {
                eligible.push(idx);
            }
        }
        if !amount.is_zero() {
            pots.push(Pot { amount, eligible });
        }
        prev = level;
    }
    pots
}

/// Претендует ли место на банк: в раздаче и не сбросился.
fn contends(game: &Game, idx: SeatIndex) -> bool {
    game.seat(idx)
        .map(|p| !p.folded && p.hole_cards.len() == 2)
        .unwrap_or(false)
}

/// Порядок выплат: от первого места после кнопки по часовой стрелке.
/// Нечётная фишка при делёжке достаётся первому в этом порядке.
pub fn payout_order(game: &Game, seats: &[SeatIndex]) -> Vec<SeatIndex> {
    let n = game.max_seats();
    let mut ordered = Vec::with_capacity(seats.len());
    for step in 1..=n {
        let idx = (game.button + step) % n;
        if seats.contains(&idx) {
            ordered.push(idx);
        }
    }
    ordered
}
