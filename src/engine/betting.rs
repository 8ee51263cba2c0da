//! Порядок хода и жизненный цикл раунда торговли.
//!
//! Здесь живут предикаты "кто в раздаче / кто может ходить", выбор
//! следующего действующего игрока и определение момента, когда круг
//! торговли закрыт.

use crate::domain::game::{Game, Phase};
use crate::domain::{Chips, SeatIndex};
use crate::engine::events::HandEventKind;

/// Игрок участвует в раздаче: ему сданы карты, он не сбросился и не в sit out.
pub fn is_active(game: &Game, idx: SeatIndex) -> bool {
    game.seat(idx)
        .map(|p| !p.hole_cards.is_empty() && !p.folded && !p.sitting_out)
        .unwrap_or(false)
}

/// Игрок может делать действия: активен, не all-in, стек не пуст.
pub fn can_act(game: &Game, idx: SeatIndex) -> bool {
    is_active(game, idx)
        && game
            .seat(idx)
            .map(|p| !p.all_in && !p.stack.is_zero())
            .unwrap_or(false)
}

pub fn active_count(game: &Game) -> usize {
    (0..game.max_seats()).filter(|&i| is_active(game, i)).count()
}

pub fn can_act_count(game: &Game) -> usize {
    (0..game.max_seats()).filter(|&i| can_act(game, i)).count()
}

/// Первое место строго после `from`, где игрок может ходить.
pub fn next_to_act(game: &Game, from: SeatIndex) -> Option<SeatIndex> {
    let n = game.max_seats();
    for step in 1..=n {
        let idx = (from + step) % n;
        if can_act(game, idx) {
            return Some(idx);
        }
    }
    None
}

/// Место малого блайнда для текущей кнопки.
/// Хедз-ап: кнопка сама ставит SB и ходит первой на префлопе.
pub fn small_blind_seat(game: &Game) -> SeatIndex {
    let in_hand: Vec<SeatIndex> = (0..game.max_seats())
        .filter(|&i| {
            game.seat(i)
                .map(|p| !p.hole_cards.is_empty() || game.is_ready(i))
                .unwrap_or(false)
        })
        .collect();
    if in_hand.len() == 2 {
        game.button
    } else {
        next_in_hand(game, game.button).unwrap_or(game.button)
    }
}

/// Место большого блайнда: следующий участник раздачи после SB.
pub fn big_blind_seat(game: &Game) -> SeatIndex {
    let sb = small_blind_seat(game);
    next_in_hand(game, sb).unwrap_or(sb)
}

/// Первое место после `from`, занятое участником раздачи (fold тоже считается:
/// порядок мест в раздаче фиксируется при старте и не меняется от фолдов).
fn next_in_hand(game: &Game, from: SeatIndex) -> Option<SeatIndex> {
    let n = game.max_seats();
    for step in 1..=n {
        let idx = (from + step) % n;
        let participates = game
            .seat(idx)
            .map(|p| !p.hole_cards.is_empty() || game.is_ready(idx))
            .unwrap_or(false);
        if participates {
            return Some(idx);
        }
    }
    None
}

/// Кто открывает торговлю на данной улице.
/// Префлоп: первый после BB. Постфлоп: первый после кнопки.
pub fn first_to_act(game: &Game, phase: Phase) -> Option<SeatIndex> {
    let from = match phase {
        Phase::Preflop => {
            let sb = small_blind_seat(game);
            next_in_hand(game, sb).unwrap_or(sb)
        }
        _ => game.button,
    };
    next_to_act(game, from)
}

/// Начать раунд торговли на улице `phase`.
///
/// Выставляет первого действующего, сбрасывает раундовые флаги и счётчики
/// агрессии. На префлопе ставки блайндов уже стоят и не обнуляются.
pub fn start_betting_round(game: &mut Game, phase: Phase) {
    game.phase = phase;

    if phase != Phase::Preflop {
        game.current_bet = Chips::ZERO;
        for seat in game.seats.iter_mut().flatten() {
            seat.bet = Chips::ZERO;
            seat.last_action = None;
        }
    }
    for seat in game.seats.iter_mut().flatten() {
        seat.acted_this_round = false;
    }

    game.last_raiser = None;
    game.last_raise_size = if phase == Phase::Preflop {
        game.blinds.big
    } else {
        Chips::ZERO
    };

    game.acting_seat = first_to_act(game, phase);

    // Один действующий против одних all-in'ов не торгует сам с собой;
    // торговля нужна, только если ему есть что доплачивать (префлоп-блайнды).
    if can_act_count(game) <= 1 {
        let owes = game
            .acting_seat
            .and_then(|i| game.seat(i))
            .map(|p| p.bet < game.current_bet)
            .unwrap_or(false);
        if !owes {
            game.acting_seat = None;
        }
    }

    game.journal.push(HandEventKind::StreetStarted {
        phase,
        board: game.board.clone(),
    });

    reset_acting_ticks(game);
}

/// Передать ход после действия места `just_acted`.
///
/// `acting_seat = None` означает, что круг торговли закрыт и надо
/// собирать ставки (см. `settle_round`).
pub fn advance_action(game: &mut Game, just_acted: SeatIndex) {
    if active_count(game) <= 1 || can_act_count(game) == 0 {
        game.acting_seat = None;
        return;
    }

    let next = match next_to_act(game, just_acted) {
        Some(n) => n,
        None => {
            game.acting_seat = None;
            return;
        }
    };

    // Круг закрыт, когда очередь доходит до игрока, который уже ходил и
    // чья ставка уравнена. Агрессор, столкнувшийся с коротким all-in,
    // сюда не попадает: его ставка меньше текущей, он ещё доплачивает.
    // У BB на префлопе блайнд не считается ходом, опция сохраняется.
    let closed = game
        .seat(next)
        .map(|p| p.acted_this_round && p.bet == game.current_bet)
        .unwrap_or(false);
    if closed {
        game.acting_seat = None;
    } else {
        game.acting_seat = Some(next);
        reset_acting_ticks(game);
    }
}

/// Полный рейз открывает торговлю заново: все, кроме агрессора, обязаны
/// сходить ещё раз и снова получают право ре-рейза. После неполного
/// all-in эта функция не вызывается, и флаги уже ходивших остаются.
pub fn reopen_action(game: &mut Game, raiser: SeatIndex) {
    for (i, slot) in game.seats.iter_mut().enumerate() {
        if let Some(seat) = slot {
            if i as SeatIndex != raiser {
                seat.acted_this_round = false;
            }
        }
    }
}

/// Смести ставки раунда в банк.
pub fn collect_bets(game: &mut Game) {
    let mut collected = Chips::ZERO;
    for seat in game.seats.iter_mut().flatten() {
        if !seat.bet.is_zero() {
            collected += seat.bet;
            seat.invested += seat.bet;
            seat.bet = Chips::ZERO;
        }
    }
    game.pot += collected;
    game.current_bet = Chips::ZERO;
}

/// Сбросить таймеры хода (вызывается при каждой передаче хода).
pub fn reset_acting_ticks(game: &mut Game) {
    game.acting_ticks = 0;
    game.disconnected_acting_ticks = 0;
    game.clock_ticks = 0;
}

/// Сколько нужно доставить до колла текущей ставки (с учётом стека).
pub fn call_amount(game: &Game, idx: SeatIndex) -> Chips {
    match game.seat(idx) {
        Some(p) => game.current_bet.saturating_sub(p.bet).min(p.stack),
        None => Chips::ZERO,
    }
}

/// Минимальная открывающая ставка — большой блайнд.
pub fn min_bet(game: &Game) -> Chips {
    game.blinds.big
}

/// Минимальная итоговая ставка для рейза:
/// текущая ставка + max(последний рейз, большой блайнд).
pub fn min_raise_total(game: &Game) -> Chips {
    game.current_bet + game.last_raise_size.max(game.blinds.big)
}
