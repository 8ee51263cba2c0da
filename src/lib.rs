//! Ядро no-limit hold'em движка для одного стола.
//!
//! Здесь живёт вся игровая логика: места и фишки, автомат ставок по улицам,
//! расчёт main/side потов при мультивей олл-инах, оценка 7-карточных рук и
//! тиковый контроллер времени (countdown, дисконнекты, shot clock, турнирные
//! уровни блайндов).
//!
//! Ядро не делает I/O, не выбирает источник случайности (RNG инжектится через
//! `infra::RandomSource`) и не знает про сеть/аутентификацию/рендеринг —
//! это внешние коллабораторы.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod time_ctrl;
pub mod tournament;
