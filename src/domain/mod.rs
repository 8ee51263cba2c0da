//! Доменная модель стола: карты, фишки, колода, места, блайнды, состояние игры.

pub mod blinds;
pub mod card;
pub mod chips;
pub mod deck;
pub mod game;
pub mod seat;

/// Идентификатор игрока. Выдаётся внешним слоем (сессии/аккаунты).
pub type PlayerId = u64;

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

// Реэкспорты, чтобы снаружи писать crate::domain::Card и т.п.
pub use blinds::*;
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use game::*;
pub use seat::*;
