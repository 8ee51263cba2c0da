use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Метка последнего видимого действия игрока (для вью-слоя и журнала).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionLabel {
    SmallBlind,
    BigBlind,
    Ante,
    DeadBlind,
    Check,
    Bet,
    Call,
    Raise,
    Fold,
    AllIn,
    Win,
    Split,
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionLabel::SmallBlind => "SB",
            ActionLabel::BigBlind => "BB",
            ActionLabel::Ante => "Ante",
            ActionLabel::DeadBlind => "Dead BB",
            ActionLabel::Check => "Check",
            ActionLabel::Bet => "Bet",
            ActionLabel::Call => "Call",
            ActionLabel::Raise => "Raise to",
            ActionLabel::Fold => "Fold",
            ActionLabel::AllIn => "All-in",
            ActionLabel::Win => "Win",
            ActionLabel::Split => "Split",
        };
        write!(f, "{s}")
    }
}

/// Игрок, сидящий на конкретном месте.
///
/// Само место — это `Option<SeatedPlayer>` в `Game::seats`: `None` = пустое
/// место, `Some` = занятое. Поля, имеющие смысл только для занятого места,
/// недоступны без проверки на уровне типов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatedPlayer {
    pub player_id: PlayerId,
    pub name: String,

    /// Стек за столом (без текущей ставки).
    pub stack: Chips,
    /// Ставка в текущем раунде торговли.
    pub bet: Chips,
    /// Сколько всего внесено в банк за эту раздачу (для side pots).
    pub invested: Chips,

    pub folded: bool,
    pub all_in: bool,
    pub sitting_out: bool,
    pub disconnected: bool,

    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Последнее видимое действие.
    pub last_action: Option<ActionLabel>,
    /// Сделал ли игрок добровольное действие в текущем раунде торговли.
    /// Постановка блайндов сюда НЕ входит — у BB остаётся опция.
    pub acted_this_round: bool,

    /// Пропустил большой блайнд, сидя в sit out; гасится при возвращении.
    pub missed_big_blind: bool,

    /// Сколько фишек выиграно в завершившейся раздаче.
    pub hand_result: Option<Chips>,
    /// Пять карт выигравшей комбинации (если рука показана).
    pub winning_cards: Option<Vec<Card>>,
    /// Открыты ли карманные карты на шоудауне.
    pub revealed: bool,

    /// Место, с которым игрок вылетел из турнира (1 = чемпион).
    pub bust_position: Option<u32>,
    /// Счётчик сыгранных раздач.
    pub hands_played: u64,
}

impl SeatedPlayer {
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            player_id,
            name: name.into(),
            stack: Chips::ZERO,
            bet: Chips::ZERO,
            invested: Chips::ZERO,
            folded: false,
            all_in: false,
            sitting_out: false,
            disconnected: false,
            hole_cards: Vec::new(),
            last_action: None,
            acted_this_round: false,
            missed_big_blind: false,
            hand_result: None,
            winning_cards: None,
            revealed: false,
            bust_position: None,
            hands_played: 0,
        }
    }

    /// Сброс перед новой раздачей. Стек, sit out, дисконнект,
    /// missed_big_blind и турнирные поля переживают границу раздачи.
    pub fn reset_for_new_hand(&mut self) {
        self.bet = Chips::ZERO;
        self.invested = Chips::ZERO;
        self.folded = false;
        self.all_in = false;
        self.hole_cards.clear();
        self.last_action = None;
        self.acted_this_round = false;
        self.hand_result = None;
        self.winning_cards = None;
        self.revealed = false;
    }
}
