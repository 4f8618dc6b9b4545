use crate::board::{Board, BoardError};
use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A standard 52-card deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use easy_range::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Rank::ALL
            .iter()
            .flat_map(|&r| Suit::ALL.iter().map(move |&s| Card::new(r, s)))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Reorders the deck with a ChaCha8 stream seeded from `seed`; the same seed always deals
    /// the same boards.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.cards.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    }

    /// Takes `n` cards off the top as a board. Only 3, 4 or 5 cards (or none) make a board; any
    /// other count, or a deck holding fewer than `n` cards, leaves the deck untouched.
    pub fn deal_board(&mut self, n: usize) -> Result<Board, BoardError> {
        if !matches!(n, 0 | 3 | 4 | 5) || self.cards.len() < n {
            return Err(BoardError::CardCount(n));
        }
        let top = self.cards.len() - n;
        Board::try_new(self.cards.split_off(top))
    }
}
