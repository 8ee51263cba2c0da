//! Жизненный цикл стола: старт и завершение раздачи, посадка, докупка,
//! sit out / sit in, выход и shot clock.

use crate::domain::game::{Game, Phase};
use crate::domain::seat::{ActionLabel, SeatedPlayer};
use crate::domain::{Chips, Deck, PlayerId, SeatIndex};
use crate::engine::actions::settle_round;
use crate::engine::betting::start_betting_round;
use crate::engine::dealing::{opening_steps, run_steps};
use crate::engine::errors::EngineError;
use crate::engine::events::HandEventKind;
use crate::infra::RandomSource;
use crate::time_ctrl::NEXT_HAND_COUNTDOWN_TICKS;

/// Начать новую раздачу.
pub fn start_hand<R: RandomSource>(game: &mut Game, rng: &mut R) -> Result<(), EngineError> {
    if game.phase != Phase::Waiting {
        return Err(EngineError::HandInProgress);
    }
    if game.ready_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    game.hand_number += 1;
    game.countdown = None;
    game.deck = Deck::full();
    game.board.clear();
    game.journal.restart();

    for seat in game.seats.iter_mut().flatten() {
        seat.reset_for_new_hand();
        if seat.sitting_out {
            // BB прошёл мимо — при возвращении будет мёртвый блайнд.
            seat.missed_big_blind = true;
        }
    }

    // Кнопка обязана стоять на готовом игроке.
    if !game.is_ready(game.button) {
        if let Some(next) = next_ready(game, game.button) {
            game.button = next;
        }
    }

    if let Some(t) = game.tournament.as_mut() {
        t.hands_started += 1;
    }

    game.journal.push(HandEventKind::HandStarted {
        hand_number: game.hand_number,
        button: game.button,
    });

    let steps = opening_steps(game);
    run_steps(game, rng, steps);

    start_betting_round(game, Phase::Preflop);
    if game.acting_seat.is_none() {
        // Все уже в all-in с блайндов: сразу докручиваем раздачу.
        settle_round(game, rng);
    }
    Ok(())
}

/// Завершить раздачу: статистика, вылеты, кнопка, планирование следующей.
/// Борд и результаты мест остаются на столе до старта новой раздачи.
pub fn end_hand(game: &mut Game) {
    let is_tournament = game.tournament.is_some();

    let survivors = game
        .occupied_seats()
        .filter(|(_, p)| !p.stack.is_zero())
        .count() as u32;

    let mut busted: Vec<PlayerId> = Vec::new();
    for seat in game.seats.iter_mut().flatten() {
        if !seat.hole_cards.is_empty() {
            seat.hands_played += 1;
        }
        if seat.stack.is_zero() && !seat.hole_cards.is_empty() && seat.bust_position.is_none() {
            seat.sitting_out = true;
            if is_tournament {
                seat.bust_position = Some(survivors + 1);
                busted.push(seat.player_id);
            }
        }
    }

    if let Some(next) = next_ready(game, game.button) {
        game.button = next;
    }

    game.phase = Phase::Waiting;
    game.acting_seat = None;
    game.last_raiser = None;
    game.current_bet = Chips::ZERO;
    game.journal.push(HandEventKind::HandFinished);

    crate::tournament::on_hand_finished(game, busted);

    let paused = game
        .tournament
        .as_ref()
        .map(|t| t.on_break || t.finished)
        .unwrap_or(false);
    if !paused && game.ready_count() >= 2 {
        game.countdown = Some(NEXT_HAND_COUNTDOWN_TICKS);
    }
}

/// Следующее готовое к игре место строго после `from`.
fn next_ready(game: &Game, from: SeatIndex) -> Option<SeatIndex> {
    let n = game.max_seats();
    (1..=n).map(|s| (from + s) % n).find(|&i| game.is_ready(i))
}

/// Посадить игрока на место (или пересадить, если он уже за столом).
pub fn sit(
    game: &mut Game,
    idx: SeatIndex,
    player_id: PlayerId,
    name: impl Into<String>,
) -> Result<(), EngineError> {
    if !game.seat_exists(idx) {
        return Err(EngineError::InvalidSeat(idx));
    }
    if game.seat(idx).is_some() {
        return Err(EngineError::SeatOccupied(idx));
    }

    if let Some(old) = game.seat_of_player(player_id) {
        // Пересадка: только между раздачами для участника раздачи.
        let in_hand = game
            .seat(old)
            .map(|p| !p.hole_cards.is_empty())
            .unwrap_or(false);
        if in_hand && game.phase != Phase::Waiting {
            return Err(EngineError::HandInProgress);
        }
        let player = game.seats[old as usize].take();
        game.seats[idx as usize] = player;
        return Ok(());
    }

    let mut player = SeatedPlayer::new(player_id, name);
    if game.phase != Phase::Waiting {
        // Севший посреди раздачи ждёт следующую.
        player.folded = true;
    }
    game.seats[idx as usize] = Some(player);
    Ok(())
}

/// Докупка фишек. В турнире запрещена.
pub fn buy_in(game: &mut Game, idx: SeatIndex, amount: Chips) -> Result<(), EngineError> {
    if game.tournament.is_some() {
        return Err(EngineError::TournamentRestriction("докупка фишек"));
    }
    let in_hand = !game
        .seat(idx)
        .ok_or(EngineError::SeatEmpty(idx))?
        .hole_cards
        .is_empty();
    if in_hand && game.phase != Phase::Waiting {
        return Err(EngineError::HandInProgress);
    }
    if let Some(seat) = game.seat_mut(idx) {
        seat.stack += amount;
    }
    Ok(())
}

/// Уйти в sit out (только между раздачами).
pub fn sit_out(game: &mut Game, idx: SeatIndex) -> Result<(), EngineError> {
    let seat = game.seat(idx).ok_or(EngineError::SeatEmpty(idx))?;
    if !seat.hole_cards.is_empty() && game.phase != Phase::Waiting {
        return Err(EngineError::HandInProgress);
    }
    if let Some(seat) = game.seat_mut(idx) {
        seat.sitting_out = true;
    }
    Ok(())
}

/// Вернуться в игру. Пропущенный BB компенсируется мёртвым блайндом в банк.
pub fn sit_in(game: &mut Game, idx: SeatIndex) -> Result<(), EngineError> {
    if game.phase != Phase::Waiting {
        return Err(EngineError::HandInProgress);
    }
    let seat = game.seat(idx).ok_or(EngineError::SeatEmpty(idx))?;
    if !seat.sitting_out {
        return Err(EngineError::IllegalAction);
    }

    let big = game.blinds.big;
    let mut dead = Chips::ZERO;
    if let Some(seat) = game.seat_mut(idx) {
        seat.sitting_out = false;
        if seat.missed_big_blind {
            dead = big.min(seat.stack);
            seat.stack -= dead;
            seat.missed_big_blind = false;
            seat.last_action = Some(ActionLabel::DeadBlind);
        }
    }
    if !dead.is_zero() {
        game.pot += dead;
        game.journal.push(HandEventKind::BlindPosted {
            seat: idx,
            label: ActionLabel::DeadBlind,
            amount: dead,
        });
    }
    Ok(())
}

/// Покинуть стол. Возвращает игрока с остатком стека (кеш-аут — снаружи).
pub fn leave(game: &mut Game, idx: SeatIndex) -> Result<SeatedPlayer, EngineError> {
    let seat = game.seat(idx).ok_or(EngineError::SeatEmpty(idx))?;
    if let Some(t) = &game.tournament {
        if t.hands_started > 0 && seat.bust_position.is_none() {
            return Err(EngineError::TournamentRestriction("выход до вылета"));
        }
    }
    if !seat.sitting_out {
        return Err(EngineError::MustSitOutFirst);
    }
    let player = game.seats[idx as usize]
        .take()
        .ok_or(EngineError::SeatEmpty(idx))?;
    Ok(player)
}

/// Запустить shot clock на думающего игрока.
pub fn call_clock(game: &mut Game, caller: SeatIndex) -> Result<(), EngineError> {
    if game.seat(caller).is_none() {
        return Err(EngineError::SeatEmpty(caller));
    }
    let acting = game
        .acting_seat
        .ok_or(EngineError::ClockUnavailable("сейчас никто не ходит"))?;
    if acting == caller {
        return Err(EngineError::ClockUnavailable("нельзя ставить часы на себя"));
    }
    if !crate::time_ctrl::is_clock_callable(game) {
        return Err(EngineError::ClockUnavailable(
            "игрок думает ещё недолго или часы уже идут",
        ));
    }
    game.clock_ticks = 1;
    Ok(())
}

/// Отметить (дис)коннект игрока.
pub fn set_disconnected(game: &mut Game, idx: SeatIndex, disconnected: bool) -> Result<(), EngineError> {
    let seat = game.seat_mut(idx).ok_or(EngineError::SeatEmpty(idx))?;
    seat.disconnected = disconnected;
    if !disconnected {
        game.disconnected_acting_ticks = 0;
    }
    Ok(())
}
