use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Текущие размеры принудительных ставок стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blinds {
    /// Анте с каждого участника раздачи (0 — без анте).
    pub ante: Chips,
    pub small: Chips,
    pub big: Chips,
}

impl Blinds {
    pub fn new(small: Chips, big: Chips) -> Self {
        Self {
            ante: Chips::ZERO,
            small,
            big,
        }
    }

    pub fn with_ante(small: Chips, big: Chips, ante: Chips) -> Self {
        Self { ante, small, big }
    }
}

/// Один уровень турнирной структуры блайндов.
/// Длительность считается в тиках внешнего кадансa, не в wall-clock времени.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindLevel {
    /// Порядковый номер уровня (1, 2, 3, ...).
    pub level: u32,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub ante: Chips,
    /// Сколько тиков длится уровень.
    pub duration_ticks: u32,
}

impl BlindLevel {
    pub fn new(
        level: u32,
        small_blind: Chips,
        big_blind: Chips,
        ante: Chips,
        duration_ticks: u32,
    ) -> Self {
        Self {
            level,
            small_blind,
            big_blind,
            ante,
            duration_ticks,
        }
    }

    pub fn blinds(&self) -> Blinds {
        Blinds {
            ante: self.ante,
            small: self.small_blind,
            big: self.big_blind,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.small_blind.is_zero() {
            return Err(format!("BlindLevel {}: small_blind = 0", self.level));
        }
        if self.big_blind.is_zero() {
            return Err(format!("BlindLevel {}: big_blind = 0", self.level));
        }
        if self.big_blind < self.small_blind {
            return Err(format!(
                "BlindLevel {}: big_blind ({}) < small_blind ({})",
                self.level, self.big_blind, self.small_blind
            ));
        }
        if self.duration_ticks == 0 {
            return Err(format!("BlindLevel {}: duration_ticks = 0", self.level));
        }
        Ok(())
    }
}

/// Турнирная структура: последовательность уровней блайндов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindStructure {
    pub levels: Vec<BlindLevel>,
}

impl BlindStructure {
    pub fn new(levels: Vec<BlindLevel>) -> Self {
        Self { levels }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.levels.is_empty() {
            return Err("BlindStructure: empty levels".into());
        }

        let mut expected = 1u32;
        for lvl in &self.levels {
            lvl.validate()?;
            if lvl.level != expected {
                return Err(format!(
                    "BlindStructure: expected level {expected}, got {}",
                    lvl.level
                ));
            }
            expected += 1;
        }
        Ok(())
    }

    pub fn first_level(&self) -> &BlindLevel {
        &self.levels[0]
    }

    /// Небольшая структура для тестов и демо-столов.
    pub fn simple_demo_structure(level_ticks: u32) -> Self {
        BlindStructure {
            levels: vec![
                BlindLevel::new(1, Chips::new(25), Chips::new(50), Chips::ZERO, level_ticks),
                BlindLevel::new(2, Chips::new(50), Chips::new(100), Chips::ZERO, level_ticks),
                BlindLevel::new(
                    3,
                    Chips::new(75),
                    Chips::new(150),
                    Chips::new(25),
                    level_ticks,
                ),
            ],
        }
    }
}
