//! Каданс стола.
//!
//! Внешний слой зовёт `tick` с фиксированным периодом (примерно раз в
//! секунду); ядро только считает тики и сообщает, что пора сделать.
//! Само оно ни раздачу не стартует, ни действия не форсирует — это
//! решения вызывающего, принимаемые по `TickOutcome`.

use crate::domain::game::Game;
use crate::domain::SeatIndex;
use crate::engine::actions::{apply_action, ActionKind, ActionOutcome};
use crate::engine::betting::call_amount;
use crate::engine::errors::EngineError;
use crate::infra::RandomSource;

/// Через сколько тиков форсируется ход отключённого игрока.
pub const DISCONNECT_ACTION_TICKS: u32 = 5;
/// Сколько тиков даёт запущенный shot clock.
pub const CLOCK_EXPIRY_TICKS: u32 = 30;
/// Сколько тиков игрок должен думать, прежде чем на него можно поставить часы.
pub const CLOCK_CALLABLE_AFTER_TICKS: u32 = 60;
/// Пауза между раздачами.
pub const NEXT_HAND_COUNTDOWN_TICKS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForcedActionReason {
    Disconnected,
    ClockExpired,
}

/// Что вызывающий должен сделать по итогам тика.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Состояние изменилось, надо разослать его подписчикам.
    pub broadcast: bool,
    /// Пора стартовать следующую раздачу.
    pub start_hand: bool,
    /// За это место пора сходить принудительно.
    pub forced_action: Option<(SeatIndex, ForcedActionReason)>,
    /// Стол живой, тикать дальше; false — каданс можно останавливать.
    pub keep_running: bool,
    pub level_advanced: bool,
    pub break_started: bool,
    pub break_ended: bool,
    pub tournament_finished: bool,
}

/// Один тик стола.
pub fn tick(game: &mut Game) -> TickOutcome {
    let mut out = TickOutcome::default();

    crate::tournament::tournament_tick(game, &mut out);
    if game
        .tournament
        .as_ref()
        .map(|t| t.on_break)
        .unwrap_or(false)
    {
        // Перерыв: обратный отсчёт раздач и таймеры хода заморожены.
        out.broadcast = true;
        out.keep_running = true;
        return out;
    }

    if let Some(c) = game.countdown {
        if c <= 1 {
            game.countdown = None;
            out.start_hand = true;
        } else {
            game.countdown = Some(c - 1);
        }
        out.broadcast = true;
    }

    if let Some(acting) = game.acting_seat {
        game.acting_ticks += 1;

        let disconnected = game
            .seat(acting)
            .map(|p| p.disconnected)
            .unwrap_or(false);
        if disconnected {
            game.disconnected_acting_ticks += 1;
            if game.disconnected_acting_ticks >= DISCONNECT_ACTION_TICKS {
                out.forced_action = Some((acting, ForcedActionReason::Disconnected));
            }
        }

        if out.forced_action.is_none() && game.clock_ticks > 0 {
            game.clock_ticks += 1;
            if game.clock_ticks >= CLOCK_EXPIRY_TICKS {
                out.forced_action = Some((acting, ForcedActionReason::ClockExpired));
            }
        }
    }

    let tournament_running = game
        .tournament
        .as_ref()
        .map(|t| !t.finished)
        .unwrap_or(false);
    out.keep_running =
        game.countdown.is_some() || out.start_hand || game.acting_seat.is_some() || tournament_running;

    out
}

/// Можно ли сейчас поставить часы на действующего игрока.
pub fn is_clock_callable(game: &Game) -> bool {
    game.acting_seat.is_some()
        && game.acting_ticks >= CLOCK_CALLABLE_AFTER_TICKS
        && game.clock_ticks == 0
}

/// Принудительный ход за игрока: check, если он бесплатный, иначе fold.
pub fn apply_forced_action<R: RandomSource>(
    game: &mut Game,
    rng: &mut R,
    seat: SeatIndex,
) -> Result<ActionOutcome, EngineError> {
    let kind = if call_amount(game, seat).is_zero() {
        ActionKind::Check
    } else {
        ActionKind::Fold
    };
    apply_action(game, rng, seat, kind)
}
