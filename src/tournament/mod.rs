//! Турнирный режим: уровни блайндов, перерывы, вылеты, победитель.
//!
//! Турнирное состояние живёт внутри `Game` и двигается двумя входами:
//! тиками (`tournament_tick` — время уровней и перерывов) и границами
//! раздач (`on_hand_finished` — вылеты, победитель, старт перерыва).

use serde::{Deserialize, Serialize};

use crate::domain::blinds::BlindStructure;
use crate::domain::game::{Game, Phase};
use crate::domain::{Chips, PlayerId};
use crate::engine::errors::EngineError;
use crate::time_ctrl::{TickOutcome, NEXT_HAND_COUNTDOWN_TICKS};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentConfig {
    pub structure: BlindStructure,
    /// Стартовый стек каждого участника.
    pub initial_stack: Chips,
    /// Перерыв после каждых N уровней (0 — без перерывов).
    pub break_every_levels: u32,
    pub break_duration_ticks: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentState {
    pub config: TournamentConfig,
    /// Индекс текущего уровня в структуре (0-based).
    pub level_index: usize,
    /// Сколько тиков идёт текущий уровень.
    pub level_ticks: u32,
    /// Перерыв объявлен, но ждёт конца текущей раздачи.
    pub break_pending: bool,
    pub on_break: bool,
    pub break_ticks_remaining: u32,
    pub hands_started: u64,
    /// Вылетевшие, в порядке вылета.
    pub eliminations: Vec<PlayerId>,
    pub winner: Option<PlayerId>,
    pub finished: bool,
}

impl TournamentState {
    pub fn current_level(&self) -> u32 {
        self.config.structure.levels[self.level_index].level
    }
}

/// Запустить турнир на столе: всем участникам стартовый стек,
/// блайнды первого уровня.
pub fn start_tournament(game: &mut Game, config: TournamentConfig) -> Result<(), EngineError> {
    if game.phase != Phase::Waiting {
        return Err(EngineError::HandInProgress);
    }
    config
        .structure
        .validate()
        .map_err(EngineError::InvalidBlindStructure)?;
    if game.occupied_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let stack = config.initial_stack;
    for seat in game.seats.iter_mut().flatten() {
        seat.stack = stack;
        seat.sitting_out = false;
        seat.bust_position = None;
    }
    game.blinds = config.structure.first_level().blinds();
    game.tournament = Some(TournamentState {
        config,
        level_index: 0,
        level_ticks: 0,
        break_pending: false,
        on_break: false,
        break_ticks_remaining: 0,
        hands_started: 0,
        eliminations: Vec::new(),
        winner: None,
        finished: false,
    });
    Ok(())
}

/// Тик турнирного времени: уровни и перерывы.
pub fn tournament_tick(game: &mut Game, out: &mut TickOutcome) {
    let at_hand_boundary = game.phase == Phase::Waiting;
    let mut new_blinds = None;

    if let Some(t) = game.tournament.as_mut() {
        if t.finished {
            out.tournament_finished = true;
            return;
        }

        if t.on_break {
            t.break_ticks_remaining = t.break_ticks_remaining.saturating_sub(1);
            if t.break_ticks_remaining == 0 {
                t.on_break = false;
                out.break_ended = true;
            }
        } else {
            t.level_ticks += 1;
            let duration = t.config.structure.levels[t.level_index].duration_ticks;
            if t.level_ticks >= duration && t.level_index + 1 < t.config.structure.levels.len() {
                t.level_index += 1;
                t.level_ticks = 0;
                out.level_advanced = true;
                new_blinds = Some(t.config.structure.levels[t.level_index].blinds());

                let completed = t.level_index as u32;
                if t.config.break_every_levels > 0 && completed % t.config.break_every_levels == 0 {
                    // Перерыв не режет раздачу: посреди раздачи только помечаем.
                    if at_hand_boundary {
                        t.on_break = true;
                        t.break_ticks_remaining = t.config.break_duration_ticks;
                        out.break_started = true;
                    } else {
                        t.break_pending = true;
                    }
                }
            }
        }
    }

    if let Some(blinds) = new_blinds {
        game.blinds = blinds;
    }
    if out.break_started {
        game.countdown = None;
    }
    // Перерыв кончился — стол снова планирует раздачу.
    if out.break_ended && game.ready_count() >= 2 {
        game.countdown = Some(NEXT_HAND_COUNTDOWN_TICKS);
    }
}

/// Обработка конца раздачи: вылеты, победитель, отложенный перерыв.
pub fn on_hand_finished(game: &mut Game, busted: Vec<PlayerId>) {
    if game.tournament.is_none() {
        return;
    }

    let alive: Vec<(crate::domain::SeatIndex, PlayerId)> = game
        .occupied_seats()
        .filter(|(_, p)| !p.stack.is_zero())
        .map(|(i, p)| (i, p.player_id))
        .collect();

    let mut champion_seat = None;
    if let Some(t) = game.tournament.as_mut() {
        t.eliminations.extend(busted);

        if alive.len() == 1 && t.hands_started > 0 {
            let (seat, player_id) = alive[0];
            t.winner = Some(player_id);
            t.finished = true;
            t.break_pending = false;
            t.on_break = false;
            champion_seat = Some(seat);
        } else if t.break_pending {
            t.break_pending = false;
            t.on_break = true;
            t.break_ticks_remaining = t.config.break_duration_ticks;
        }
    }

    if let Some(seat) = champion_seat {
        if let Some(p) = game.seat_mut(seat) {
            p.bust_position = Some(1);
        }
    }
}
