use serde::{Deserialize, Serialize};

use crate::domain::blinds::Blinds;
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::seat::SeatedPlayer;
use crate::domain::SeatIndex;
use crate::engine::events::HandJournal;
use crate::tournament::TournamentState;

/// Фаза раздачи. `Waiting` — стол между раздачами.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    /// Идёт ли сейчас торговля (можно делать ставочные действия).
    pub fn is_betting(&self) -> bool {
        matches!(
            self,
            Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River
        )
    }
}

/// Полное состояние одного стола.
///
/// Создаётся один раз и живёт много раздач; поля раздачи сбрасываются в
/// `start_hand`/`end_hand`. Все мутации сериализуются внешним слоем
/// (один writer на стол), внутри ядра блокировок нет.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Game {
    /// Места за столом: индекс вектора = SeatIndex, None = пустое место.
    pub seats: Vec<Option<SeatedPlayer>>,
    /// Дилерская кнопка.
    pub button: SeatIndex,
    pub blinds: Blinds,

    pub deck: Deck,
    /// Общие карты борда (0–5).
    pub board: Vec<Card>,

    pub phase: Phase,
    /// Собранный банк (ставки текущего раунда сюда ещё не входят).
    pub pot: Chips,
    /// Текущая целевая ставка раунда. Не убывает до сбора ставок.
    pub current_bet: Chips,
    /// Чей сейчас ход.
    pub acting_seat: Option<SeatIndex>,
    /// Последний агрессор (bet / полноценный raise).
    pub last_raiser: Option<SeatIndex>,
    /// Размер повышающей части последнего рейза.
    pub last_raise_size: Chips,

    /// Обратный отсчёт до старта следующей раздачи (в тиках).
    pub countdown: Option<u32>,
    /// Сколько тиков текущий игрок уже думает над ходом.
    pub acting_ticks: u32,
    /// Сколько тиков думает отключённый игрок (форс действия на 5).
    pub disconnected_acting_ticks: u32,
    /// Тики включённого shot clock (0 = часы не запущены).
    pub clock_ticks: u32,

    /// Номер текущей/последней раздачи.
    pub hand_number: u64,
    /// Турнирное состояние (None для кеш-стола).
    pub tournament: Option<TournamentState>,

    /// Журнал событий текущей раздачи (plain data, экспорт — снаружи).
    pub journal: HandJournal,
}

impl Game {
    /// Пустой стол на `max_seats` мест с заданными блайндами.
    pub fn new(max_seats: u8, blinds: Blinds) -> Self {
        Self {
            seats: vec![None; max_seats as usize],
            button: 0,
            blinds,
            deck: Deck::empty(),
            board: Vec::new(),
            phase: Phase::Waiting,
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            acting_seat: None,
            last_raiser: None,
            last_raise_size: Chips::ZERO,
            countdown: None,
            acting_ticks: 0,
            disconnected_acting_ticks: 0,
            clock_ticks: 0,
            hand_number: 0,
            tournament: None,
            journal: HandJournal::new(),
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.seats.len() as u8
    }

    /// Игрок на месте (None, если место пустое или индекс вне стола).
    pub fn seat(&self, idx: SeatIndex) -> Option<&SeatedPlayer> {
        self.seats.get(idx as usize).and_then(|s| s.as_ref())
    }

    pub fn seat_mut(&mut self, idx: SeatIndex) -> Option<&mut SeatedPlayer> {
        self.seats.get_mut(idx as usize).and_then(|s| s.as_mut())
    }

    /// Существует ли такой индекс места за столом.
    pub fn seat_exists(&self, idx: SeatIndex) -> bool {
        (idx as usize) < self.seats.len()
    }

    /// Итератор по занятым местам.
    pub fn occupied_seats(&self) -> impl Iterator<Item = (SeatIndex, &SeatedPlayer)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i as SeatIndex, p)))
    }

    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    /// Место конкретного игрока, если он сидит за столом.
    pub fn seat_of_player(&self, player_id: crate::domain::PlayerId) -> Option<SeatIndex> {
        self.occupied_seats()
            .find(|(_, p)| p.player_id == player_id)
            .map(|(i, _)| i)
    }

    /// Готов ли игрок на месте к следующей раздаче.
    pub fn is_ready(&self, idx: SeatIndex) -> bool {
        self.seat(idx)
            .map(|p| !p.sitting_out && !p.stack.is_zero())
            .unwrap_or(false)
    }

    pub fn ready_count(&self) -> usize {
        (0..self.max_seats())
            .filter(|&i| self.is_ready(i))
            .count()
    }

    /// Суммарные фишки стола: стеки + ставки + банк.
    /// Внутри раздачи величина постоянна (инвариант сохранения фишек).
    pub fn total_chips(&self) -> Chips {
        let mut total = self.pot;
        for (_, p) in self.occupied_seats() {
            total += p.stack;
            total += p.bet;
        }
        total
    }
}
