//! RNG-интерфейс ядра и его реализации поверх `rand`.
//!
//! Ядро само не выбирает источник случайности: колода получает
//! `RandomSource` извне, поэтому тесты и реплеи полностью детерминированы.

/// Источник случайности для раздачи карт.
pub trait RandomSource {
    /// Равномерно выбрать индекс в диапазоне `0..bound`. `bound` > 0.
    fn pick(&mut self, bound: usize) -> usize;
}

/// Боевой RNG поверх thread_rng.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn pick(&mut self, bound: usize) -> usize {
        use rand::Rng;
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed — одинаковые раздачи.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn pick(&mut self, bound: usize) -> usize {
        use rand::Rng;
        self.inner.gen_range(0..bound)
    }
}
