use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("cannot draw {requested} cards, only {remaining} remain")]
    Exhausted { requested: usize, remaining: usize },
}

/// A standard 52-card deck. Created full, shrinks as cards are drawn;
/// the engine replaces it with a fresh shuffled deck every round.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use holdem_sim::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &suit in &Suit::ALL {
            for &rank in &Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw exactly `n` cards from the top, removing them from the deck.
    /// Overdrawing is a configuration error (too many players for 52
    /// cards) and fails without removing anything.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::Exhausted { requested: n, remaining: self.cards.len() });
        }
        let at = self.cards.len() - n;
        Ok(self.cards.split_off(at))
    }

    /// Draw a single card from the top.
    pub fn draw_one(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted { requested: 1, remaining: 0 })
    }
}
