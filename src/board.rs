use crate::cards::{Card, CardParseError, CardSet, Suit};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BoardError {
    #[error("board must contain 0, 3, 4 or 5 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate cards on board")]
    DuplicateCards,
    #[error("board cards must have both rank and suit, got '{0}'")]
    OpenCard(Card),
    #[error(transparent)]
    CardParse(#[from] CardParseError),
}

/// Community cards: empty, flop, turn or river.
///
/// ```
/// use easy_range::board::Board;
///
/// let board: Board = "Ad Kc 7h".parse().unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board.unique_ranks(), vec![14, 13, 7]);
/// assert!("Ad Kc".parse::<Board>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn try_new(cards: Vec<Card>) -> Result<Self, BoardError> {
        if !matches!(cards.len(), 0 | 3 | 4 | 5) {
            return Err(BoardError::CardCount(cards.len()));
        }
        if let Some(open) = cards.iter().find(|c| !c.is_concrete()) {
            return Err(BoardError::OpenCard(*open));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(BoardError::DuplicateCards);
        }
        Ok(Self { cards })
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

    /// Ranks in dealing order.
    pub fn ranks(&self) -> Vec<u8> {
        self.cards.iter().map(|c| c.rank_value()).collect()
    }

    /// Distinct ranks, highest first.
    pub fn unique_ranks(&self) -> Vec<u8> {
        unique_desc(&self.ranks())
    }

    /// Ranks that do not appear on the board, lowest first.
    pub fn remaining_ranks(&self) -> Vec<u8> {
        remaining_ranks(&self.ranks())
    }

    /// Suits in dealing order.
    pub fn suits(&self) -> Vec<Suit> {
        self.cards.iter().filter_map(|c| c.suit()).collect()
    }

    pub fn ranks_for_suit(&self, suit: Suit) -> Vec<u8> {
        self.cards
            .iter()
            .filter(|c| c.suit() == Some(suit))
            .map(|c| c.rank_value())
            .collect()
    }

    pub fn to_card_set(&self) -> CardSet {
        CardSet::new(self.cards.clone())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_card_set())
    }
}

impl FromStr for Board {
    type Err = BoardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let set = CardSet::from_str(s)?;
        Board::try_new(set.as_slice().to_vec())
    }
}

/// Distinct values of `ranks`, highest first.
pub(crate) fn unique_desc(ranks: &[u8]) -> Vec<u8> {
    let mut unique = ranks.to_vec();
    unique.sort_unstable_by(|a, b| b.cmp(a));
    unique.dedup();
    unique
}

/// Ranks 2..=14 absent from `ranks`, lowest first.
pub(crate) fn remaining_ranks(ranks: &[u8]) -> Vec<u8> {
    (2..=14).filter(|r| !ranks.contains(r)).collect()
}
