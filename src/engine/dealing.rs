//! Пошаговая раздача: блайнды и карты как последовательность шагов.
//!
//! Вместо одного большого "раздать всё" ядро строит список `DealStep` и
//! применяет его шаг за шагом. Внешний слой при желании может исполнять
//! шаги с паузами (анимация), ядру это безразлично.

use serde::{Deserialize, Serialize};

use crate::domain::game::Game;
use crate::domain::seat::ActionLabel;
use crate::domain::{Chips, SeatIndex};
use crate::engine::betting::{big_blind_seat, small_blind_seat};
use crate::engine::events::HandEventKind;
use crate::infra::RandomSource;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DealStep {
    PostAnte(SeatIndex),
    PostSmallBlind(SeatIndex),
    PostBigBlind(SeatIndex),
    DealHoleCard(SeatIndex),
    DealBoardCard,
}

/// Шаги открытия раздачи: анте, блайнды, по две карманные карты.
///
/// Карты раздаются по одной по кругу, начиная с места после кнопки,
/// как в живой игре.
pub fn opening_steps(game: &Game) -> Vec<DealStep> {
    let mut steps = Vec::new();

    let in_hand: Vec<SeatIndex> = seats_in_hand_order(game);

    if !game.blinds.ante.is_zero() {
        for &idx in &in_hand {
            steps.push(DealStep::PostAnte(idx));
        }
    }

    // Оба места считаются до постановки: постинг не должен их сдвигать.
    let sb = small_blind_seat(game);
    let bb = big_blind_seat(game);
    steps.push(DealStep::PostSmallBlind(sb));
    steps.push(DealStep::PostBigBlind(bb));

    for _ in 0..2 {
        for &idx in &in_hand {
            steps.push(DealStep::DealHoleCard(idx));
        }
    }

    steps
}

/// Шаги открытия улицы: 3 карты на флопе, по 1 на тёрне и ривере.
pub fn street_steps(count: usize) -> Vec<DealStep> {
    vec![DealStep::DealBoardCard; count]
}

/// Участники раздачи в порядке от места после кнопки.
fn seats_in_hand_order(game: &Game) -> Vec<SeatIndex> {
    let n = game.max_seats();
    let mut order = Vec::new();
    for step in 1..=n {
        let idx = (game.button + step) % n;
        if game.is_ready(idx) {
            order.push(idx);
        }
    }
    order
}

/// Применить один шаг раздачи.
pub fn apply_step<R: RandomSource>(game: &mut Game, rng: &mut R, step: DealStep) {
    match step {
        DealStep::PostAnte(idx) => {
            let ante = game.blinds.ante;
            let mut posted = None;
            if let Some(seat) = game.seat_mut(idx) {
                // Анте идёт сразу в банк, мимо раундовой ставки.
                let amount = ante.min(seat.stack);
                seat.stack -= amount;
                seat.invested += amount;
                if seat.stack.is_zero() {
                    seat.all_in = true;
                }
                posted = Some(amount);
            }
            if let Some(amount) = posted {
                game.pot += amount;
                game.journal
                    .push(HandEventKind::AntePosted { seat: idx, amount });
            }
        }
        DealStep::PostSmallBlind(idx) => {
            let nominal = game.blinds.small;
            post_blind(game, idx, nominal, ActionLabel::SmallBlind);
        }
        DealStep::PostBigBlind(idx) => {
            let nominal = game.blinds.big;
            post_blind(game, idx, nominal, ActionLabel::BigBlind);
        }
        DealStep::DealHoleCard(idx) => {
            let card = game.deck.deal(rng);
            if let Some(seat) = game.seat_mut(idx) {
                seat.hole_cards.push(card);
            }
            game.journal.push(HandEventKind::HoleCardDealt { seat: idx });
        }
        DealStep::DealBoardCard => {
            let card = game.deck.deal(rng);
            game.board.push(card);
            game.journal.push(HandEventKind::BoardCardDealt { card });
        }
    }
}

/// Поставить блайнд: короткий стек ставит сколько может и уходит в all-in,
/// но номинал блайнда целиком остаётся целевой ставкой раунда.
fn post_blind(game: &mut Game, idx: SeatIndex, nominal: Chips, label: ActionLabel) {
    let mut posted = None;
    if let Some(seat) = game.seat_mut(idx) {
        let amount = nominal.min(seat.stack);
        seat.stack -= amount;
        seat.bet += amount;
        seat.last_action = Some(label);
        if seat.stack.is_zero() {
            seat.all_in = true;
        }
        posted = Some(amount);
    }
    if let Some(amount) = posted {
        game.current_bet = game.current_bet.max(nominal);
        game.journal.push(HandEventKind::BlindPosted {
            seat: idx,
            label,
            amount,
        });
    }
}

pub fn run_steps<R: RandomSource>(game: &mut Game, rng: &mut R, steps: Vec<DealStep>) {
    for step in steps {
        apply_step(game, rng, step);
    }
}
