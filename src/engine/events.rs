//! Журнал событий раздачи.
//!
//! Ядро складывает сюда plain-data записи по ходу раздачи; форматирование
//! в текст истории и рассылка — забота внешнего слоя. Журнал очищается
//! в начале каждой раздачи.

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::game::Phase;
use crate::domain::seat::ActionLabel;
use crate::domain::{PlayerId, SeatIndex};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    HandStarted {
        hand_number: u64,
        button: SeatIndex,
    },
    AntePosted {
        seat: SeatIndex,
        amount: Chips,
    },
    BlindPosted {
        seat: SeatIndex,
        label: ActionLabel,
        amount: Chips,
    },
    HoleCardDealt {
        seat: SeatIndex,
    },
    StreetStarted {
        phase: Phase,
        board: Vec<Card>,
    },
    BoardCardDealt {
        card: Card,
    },
    PlayerActed {
        seat: SeatIndex,
        label: ActionLabel,
        /// Итоговая ставка игрока в раунде после действия.
        bet: Chips,
    },
    ShowdownReveal {
        seat: SeatIndex,
        hole_cards: Vec<Card>,
        description: String,
    },
    PotAwarded {
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
    },
    HandFinished,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    /// Сквозной номер события внутри раздачи.
    pub index: u32,
    pub kind: HandEventKind,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandJournal {
    pub events: Vec<HandEvent>,
}

impl HandJournal {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let index = self.events.len() as u32;
        self.events.push(HandEvent { index, kind });
    }

    /// Начать запись новой раздачи.
    pub fn restart(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
