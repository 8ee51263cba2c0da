use thiserror::Error;

use crate::domain::{Chips, SeatIndex};

/// Ошибки операций ядра. Возвращаются вызывающему слою без паник:
/// невалидная команда игрока не должна ронять стол.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("сейчас не ход места {0}")]
    OutOfTurn(SeatIndex),

    #[error("ставка меньше минимума: минимум {min}, получено {got}")]
    BelowMinimum { min: Chips, got: Chips },

    #[error("ставка больше стека: стек {stack}, запрошено {got}")]
    AboveStack { stack: Chips, got: Chips },

    #[error("нельзя чекнуть: нужно уравнять {0}")]
    CannotCheck(Chips),

    #[error("в этом раунде уже есть ставка, используйте raise")]
    BetAlreadyMade,

    #[error("нечего повышать: в этом раунде ещё нет ставки")]
    NothingToRaise,

    #[error("нечего уравнивать")]
    NothingToCall,

    #[error("действие невозможно в текущей фазе")]
    IllegalPhase,

    #[error("действие недоступно этому игроку")]
    IllegalAction,

    #[error("место {0} уже занято")]
    SeatOccupied(SeatIndex),

    #[error("место {0} пустое")]
    SeatEmpty(SeatIndex),

    #[error("места {0} за этим столом нет")]
    InvalidSeat(SeatIndex),

    #[error("недостаточно игроков для старта раздачи")]
    NotEnoughPlayers,

    #[error("раздача уже идёт")]
    HandInProgress,

    #[error("сначала нужно выйти в sit out")]
    MustSitOutFirst,

    #[error("запрещено в турнире: {0}")]
    TournamentRestriction(&'static str),

    #[error("часы недоступны: {0}")]
    ClockUnavailable(&'static str),

    #[error("некорректная структура блайндов: {0}")]
    InvalidBlindStructure(String),
}
