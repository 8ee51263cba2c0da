//! Инфраструктура: источники случайности.

pub mod rng;

pub use rng::{DeterministicRng, RandomSource, SystemRng};
