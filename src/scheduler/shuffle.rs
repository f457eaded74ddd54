use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Primitive de mélange utilisée par chaque choix aléatoire du moteur.
pub trait Shuffler {
    /// Permutation uniforme en place.
    fn shuffle<T>(&mut self, items: &mut [T]);

    /// Copie mélangée ; `items` reste intact.
    fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle(&mut out);
        out
    }
}

/// Fisher–Yates sur n'importe quel générateur `rand`.
#[derive(Debug, Clone)]
pub struct RngShuffler<R = ChaCha8Rng> {
    rng: R,
}

impl RngShuffler<ChaCha8Rng> {
    /// Graine tirée du générateur du thread courant.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Séquence reproductible.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl<R: Rng> RngShuffler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffler for RngShuffler<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
