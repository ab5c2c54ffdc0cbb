//! Seeded randomness for deck shuffles and the draft schedule.
//!
//! The generator lives inside `GameState` and travels with it: cloning a
//! game clones the stream at its current position, and a snapshot stores the
//! seed plus the ChaCha word position so a restored game shuffles exactly as
//! the original would have.
//!
//! ```
//! use locm_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = a.clone();
//! let (mut deck_a, mut deck_b) = ((1..=30).collect::<Vec<u32>>(), (1..=30).collect::<Vec<u32>>());
//!
//! a.shuffle(&mut deck_a);
//! b.shuffle(&mut deck_b);
//! assert_eq!(deck_a, deck_b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Game-owned ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, cards: &mut [T]) {
        cards.shuffle(&mut self.stream);
    }

    /// Uniform pick; `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        options.choose(&mut self.stream)
    }

    /// Position of the stream, for snapshots.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Resume a stream captured by [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(state.seed);
        stream.set_word_pos(state.word_pos);
        Self {
            stream,
            seed: state.seed,
        }
    }
}

/// Seed and word position of a `GameRng`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Vec<u32> {
        (1..=30).collect()
    }

    fn shuffled(rng: &mut GameRng) -> Vec<u32> {
        let mut cards = deck();
        rng.shuffle(&mut cards);
        cards
    }

    #[test]
    fn test_same_seed_same_shuffles() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);

        for _ in 0..5 {
            assert_eq!(shuffled(&mut a), shuffled(&mut b));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(3);
        let mut cards = shuffled(&mut rng);

        assert_ne!(cards, deck());
        cards.sort_unstable();
        assert_eq!(cards, deck());
    }

    #[test]
    fn test_seeds_diverge() {
        assert_ne!(shuffled(&mut GameRng::new(1)), shuffled(&mut GameRng::new(2)));
    }

    #[test]
    fn test_restore_mid_stream() {
        let mut rng = GameRng::new(9);
        for _ in 0..7 {
            shuffled(&mut rng);
        }

        let saved = rng.state();
        let mut restored = GameRng::from_state(&saved);

        assert_eq!(restored.seed(), 9);
        assert_eq!(shuffled(&mut rng), shuffled(&mut restored));
        assert_eq!(rng.choose(&deck()), restored.choose(&deck()));
    }

    #[test]
    fn test_choose_empty() {
        let mut rng = GameRng::new(0);
        let none: [u32; 0] = [];

        assert!(rng.choose(&none).is_none());
    }

    #[test]
    fn test_state_json() {
        let state = GameRng::new(5).state();
        let json = serde_json::to_string(&state).unwrap();

        assert_eq!(serde_json::from_str::<GameRngState>(&json).unwrap(), state);
    }
}
