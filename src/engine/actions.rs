//! Ставочные действия игроков.
//!
//! Единственная точка входа — `apply_action`: валидация команды целиком
//! до первой мутации, затем применение и передача хода. Невалидная команда
//! возвращает ошибку и не оставляет следов в состоянии.

use serde::{Deserialize, Serialize};

use crate::domain::game::{Game, Phase};
use crate::domain::seat::ActionLabel;
use crate::domain::{Chips, SeatIndex};
use crate::engine::betting::{
    active_count, advance_action, call_amount, can_act, collect_bets, min_bet,
    min_raise_total, reopen_action, start_betting_round,
};
use crate::engine::dealing::{run_steps, street_steps};
use crate::engine::errors::EngineError;
use crate::engine::events::HandEventKind;
use crate::engine::lifecycle::end_hand;
use crate::engine::showdown::{award_to_last_player, run_showdown};
use crate::infra::RandomSource;

/// Команда игрока. Суммы в `Bet`/`Raise` — итоговая ставка раунда
/// ("raise to"), не прибавка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionKind {
    Check,
    Bet(Chips),
    Call,
    Raise(Chips),
    Fold,
    AllIn,
}

/// Что произошло в результате действия.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    pub label: ActionLabel,
    /// Раздача завершилась (fold всех, кроме одного, или шоудаун).
    pub hand_finished: bool,
}

pub fn apply_action<R: RandomSource>(
    game: &mut Game,
    rng: &mut R,
    seat: SeatIndex,
    kind: ActionKind,
) -> Result<ActionOutcome, EngineError> {
    if !game.phase.is_betting() {
        return Err(EngineError::IllegalPhase);
    }
    if game.acting_seat != Some(seat) {
        return Err(EngineError::OutOfTurn(seat));
    }
    if !can_act(game, seat) {
        return Err(EngineError::IllegalAction);
    }

    let label = match kind {
        ActionKind::Check => validate_check(game, seat)?,
        ActionKind::Bet(amount) => validate_bet(game, seat, amount)?,
        ActionKind::Call => validate_call(game, seat)?,
        ActionKind::Raise(total) => validate_raise(game, seat, total)?,
        ActionKind::Fold => ActionLabel::Fold,
        ActionKind::AllIn => validate_all_in(game, seat)?,
    };

    // Валидация пройдена, дальше только мутации.
    match kind {
        ActionKind::Check => {}
        ActionKind::Bet(amount) => {
            let seat_ref = game.seat_mut(seat).ok_or(EngineError::SeatEmpty(seat))?;
            seat_ref.stack -= amount;
            seat_ref.bet += amount;
            if seat_ref.stack.is_zero() {
                seat_ref.all_in = true;
            }
            let new_bet = game.seat(seat).map(|p| p.bet).unwrap_or(Chips::ZERO);
            game.current_bet = new_bet;
            game.last_raiser = Some(seat);
            game.last_raise_size = new_bet;
            reopen_action(game, seat);
        }
        ActionKind::Call => {
            let pay = call_amount(game, seat);
            if let Some(seat_ref) = game.seat_mut(seat) {
                seat_ref.stack -= pay;
                seat_ref.bet += pay;
                if seat_ref.stack.is_zero() {
                    seat_ref.all_in = true;
                }
            }
        }
        ActionKind::Raise(total) => {
            apply_raise_to(game, seat, total);
        }
        ActionKind::Fold => {
            if let Some(seat_ref) = game.seat_mut(seat) {
                seat_ref.folded = true;
            }
        }
        ActionKind::AllIn => {
            let total = game
                .seat(seat)
                .map(|p| p.bet + p.stack)
                .unwrap_or(Chips::ZERO);
            apply_raise_to(game, seat, total);
        }
    }

    let final_bet = game.seat(seat).map(|p| p.bet).unwrap_or(Chips::ZERO);
    if let Some(seat_ref) = game.seat_mut(seat) {
        seat_ref.acted_this_round = true;
        seat_ref.last_action = Some(label);
    }
    game.journal.push(HandEventKind::PlayerActed {
        seat,
        label,
        bet: final_bet,
    });

    advance_action(game, seat);

    let mut hand_finished = false;
    if game.acting_seat.is_none() {
        settle_round(game, rng);
        hand_finished = game.phase == Phase::Waiting;
    }

    Ok(ActionOutcome {
        label,
        hand_finished,
    })
}

fn validate_check(game: &Game, seat: SeatIndex) -> Result<ActionLabel, EngineError> {
    let to_call = call_amount(game, seat);
    if !to_call.is_zero() {
        return Err(EngineError::CannotCheck(to_call));
    }
    Ok(ActionLabel::Check)
}

fn validate_bet(game: &Game, seat: SeatIndex, amount: Chips) -> Result<ActionLabel, EngineError> {
    if !game.current_bet.is_zero() {
        return Err(EngineError::BetAlreadyMade);
    }
    let stack = game.seat(seat).map(|p| p.stack).unwrap_or(Chips::ZERO);
    if amount > stack {
        return Err(EngineError::AboveStack { stack, got: amount });
    }
    let min = min_bet(game);
    if amount.is_zero() {
        return Err(EngineError::BelowMinimum { min, got: amount });
    }
    // Ставка меньше BB разрешена только как all-in.
    if amount < min && amount < stack {
        return Err(EngineError::BelowMinimum { min, got: amount });
    }
    Ok(if amount == stack {
        ActionLabel::AllIn
    } else {
        ActionLabel::Bet
    })
}

fn validate_call(game: &Game, seat: SeatIndex) -> Result<ActionLabel, EngineError> {
    let to_call = call_amount(game, seat);
    if to_call.is_zero() {
        return Err(EngineError::NothingToCall);
    }
    let stack = game.seat(seat).map(|p| p.stack).unwrap_or(Chips::ZERO);
    Ok(if to_call == stack {
        ActionLabel::AllIn
    } else {
        ActionLabel::Call
    })
}

fn validate_raise(game: &Game, seat: SeatIndex, total: Chips) -> Result<ActionLabel, EngineError> {
    if game.current_bet.is_zero() {
        return Err(EngineError::NothingToRaise);
    }
    // Право рейза есть только у того, кто ещё не ходил после последнего
    // полного рейза. Короткий all-in торговлю не переоткрывает: уже
    // уравнявшим прежнюю ставку остаётся колл или фолд.
    if has_acted(game, seat) {
        return Err(EngineError::IllegalAction);
    }
    let (stack, bet) = game
        .seat(seat)
        .map(|p| (p.stack, p.bet))
        .unwrap_or((Chips::ZERO, Chips::ZERO));
    let needed = total.saturating_sub(bet);
    if needed > stack {
        return Err(EngineError::AboveStack { stack, got: needed });
    }
    let min = min_raise_total(game);
    // Недостаточный рейз разрешён только как all-in.
    if total < min && needed < stack {
        return Err(EngineError::BelowMinimum { min, got: total });
    }
    if total <= game.current_bet {
        return Err(EngineError::BelowMinimum { min, got: total });
    }
    Ok(if needed == stack {
        ActionLabel::AllIn
    } else {
        ActionLabel::Raise
    })
}

fn validate_all_in(game: &Game, seat: SeatIndex) -> Result<ActionLabel, EngineError> {
    let total = game
        .seat(seat)
        .map(|p| p.bet + p.stack)
        .unwrap_or(Chips::ZERO);
    // All-in выше текущей ставки — тоже рейз: без переоткрытия торговли
    // он недоступен, остаётся all-in в размер колла или меньше.
    if total > game.current_bet && has_acted(game, seat) {
        return Err(EngineError::IllegalAction);
    }
    Ok(ActionLabel::AllIn)
}

fn has_acted(game: &Game, seat: SeatIndex) -> bool {
    game.seat(seat)
        .map(|p| p.acted_this_round)
        .unwrap_or(false)
}

/// Довести ставку места до `total`, обновив агрессию раунда.
///
/// Полный рейз (прибавка не меньше предыдущей) заново открывает торговлю;
/// короткий all-in повышает цену колла, но опцию ре-рейза не возвращает.
fn apply_raise_to(game: &mut Game, seat: SeatIndex, total: Chips) {
    let prev_bet = game.current_bet;
    if let Some(seat_ref) = game.seat_mut(seat) {
        let needed = total.saturating_sub(seat_ref.bet).min(seat_ref.stack);
        seat_ref.stack -= needed;
        seat_ref.bet += needed;
        if seat_ref.stack.is_zero() {
            seat_ref.all_in = true;
        }
    }
    let new_bet = game.seat(seat).map(|p| p.bet).unwrap_or(Chips::ZERO);
    if new_bet > prev_bet {
        let increment = new_bet - prev_bet;
        if prev_bet.is_zero() || increment >= game.last_raise_size {
            game.last_raiser = Some(seat);
            game.last_raise_size = increment;
            reopen_action(game, seat);
        }
        game.current_bet = new_bet;
    }
}

/// Закрыть раунд торговли: собрать ставки и продвинуть раздачу.
///
/// Если действующих игроков не осталось (all-in'ы), улицы докручиваются
/// подряд до шоудауна.
pub fn settle_round<R: RandomSource>(game: &mut Game, rng: &mut R) {
    loop {
        collect_bets(game);

        if active_count(game) <= 1 {
            award_to_last_player(game);
            end_hand(game);
            return;
        }

        let next_phase = match game.phase {
            Phase::Preflop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River => {
                game.phase = Phase::Showdown;
                run_showdown(game);
                end_hand(game);
                return;
            }
            Phase::Waiting | Phase::Showdown => return,
        };

        let cards = if next_phase == Phase::Flop { 3 } else { 1 };
        run_steps(game, rng, street_steps(cards));
        start_betting_round(game, next_phase);

        if game.acting_seat.is_some() {
            return;
        }
    }
}
