use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Card ranks from Two (low) to Ace (high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];
const SUIT_CHARS: [char; 4] = ['s', 'h', 'd', 'c'];

impl Rank {
    /// Deuce to ace.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric rank used by the explorers, `2..=14`.
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn from_value(value: u8) -> Option<Rank> {
        if value >= 2 && value <= 14 {
            Some(Rank::ALL[(value - 2) as usize])
        } else {
            None
        }
    }

    pub const fn to_char(self) -> char {
        RANK_CHARS[(self as u8 - 2) as usize]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("unknown rank '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c),
            _ => Err(RankParseError::Invalid(s.to_string())),
        }
    }
}

/// Rank characters are case-insensitive: `t` and `T` are both a ten.
impl TryFrom<char> for Rank {
    type Error = RankParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let upper = c.to_ascii_uppercase();
        RANK_CHARS
            .iter()
            .position(|&r| r == upper)
            .map(|index| Rank::ALL[index])
            .ok_or_else(|| RankParseError::Invalid(c.to_string()))
    }
}

/// Four suits; order has no hand-strength meaning but is fixed for ordering: s < h < d < c.
///
/// The order decides which of two otherwise equal flush draws sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn to_char(self) -> char {
        SUIT_CHARS[self as usize]
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("unknown suit '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Suit::try_from(c),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let lower = c.to_ascii_lowercase();
        SUIT_CHARS
            .iter()
            .position(|&s| s == lower)
            .map(|index| Suit::ALL[index])
            .ok_or_else(|| SuitParseError::Invalid(c.to_string()))
    }
}

/// A card whose rank, suit, or both may be left open.
///
/// Open parts act as wildcards in range text: `A` is any ace, `d` is any diamond and `*` is any
/// card at all. Cards order by rank then suit, with an open part sorting lowest.
///
/// ```
/// use easy_range::cards::{Card, Rank, Suit};
///
/// assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "As");
/// assert_eq!(Card::rank_only(Rank::King).to_string(), "K");
/// assert_eq!(Card::suit_only(Suit::Diamonds).to_string(), "d");
/// assert_eq!(Card::ANY.to_string(), "*");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Option<Rank>,
    suit: Option<Suit>,
}

impl Card {
    pub const ANY: Card = Card { rank: None, suit: None };

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank: Some(rank), suit: Some(suit) }
    }

    pub const fn rank_only(rank: Rank) -> Self {
        Self { rank: Some(rank), suit: None }
    }

    pub const fn suit_only(suit: Suit) -> Self {
        Self { rank: None, suit: Some(suit) }
    }

    pub const fn rank(self) -> Option<Rank> {
        self.rank
    }

    pub const fn suit(self) -> Option<Suit> {
        self.suit
    }

    /// Numeric rank, `0` for an open rank.
    pub const fn rank_value(self) -> u8 {
        match self.rank {
            Some(rank) => rank.value(),
            None => 0,
        }
    }

    pub const fn is_concrete(self) -> bool {
        self.rank.is_some() && self.suit.is_some()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.rank, self.suit) {
            (None, None) => write!(f, "*"),
            (Some(rank), Some(suit)) => write!(f, "{}{}", rank, suit),
            (Some(rank), None) => write!(f, "{}", rank),
            (None, Some(suit)) => write!(f, "{}", suit),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error("unexpected symbol '{symbol}' at position {position}")]
    UnexpectedSymbol { symbol: char, position: usize },
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parses one token: `As`, `A`, `s` or `*`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let chars: Vec<char> = t.chars().collect();
        match chars.as_slice() {
            ['*'] => Ok(Card::ANY),
            [rank, suit] => Ok(Card::new(Rank::try_from(*rank)?, Suit::try_from(*suit)?)),
            [c] => {
                if let Ok(rank) = Rank::try_from(*c) {
                    Ok(Card::rank_only(rank))
                } else {
                    Ok(Card::suit_only(Suit::try_from(*c)?))
                }
            }
            _ => Err(CardParseError::Invalid(s.to_string())),
        }
    }
}

/// An ordered collection of (possibly open) cards.
///
/// Two sets are equal when they hold the same cards in any order; display keeps the stored order.
///
/// ```
/// use easy_range::cards::CardSet;
///
/// let a: CardSet = "AdKs".parse().unwrap();
/// let b: CardSet = "Ks Ad".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "AdKs");
/// assert_eq!(CardSet::from_ranks([13, 13]).to_string(), "KK");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CardSet {
    cards: Vec<Card>,
}

impl CardSet {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Rank-only cards for numeric ranks; `0` becomes a fully open card.
    pub fn from_ranks<I>(ranks: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let cards = ranks
            .into_iter()
            .map(|value| match Rank::from_value(value) {
                Some(rank) => Card::rank_only(rank),
                None => Card::ANY,
            })
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

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn first(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Replace the first occurrence of `from`; returns whether a card was replaced.
    pub fn replace(&mut self, from: Card, to: Card) -> bool {
        match self.cards.iter().position(|c| *c == from) {
            Some(index) => {
                self.cards[index] = to;
                true
            }
            None => false,
        }
    }

    /// Sort from the highest card to the lowest.
    pub fn sort_desc(&mut self) {
        self.cards.sort_by(|a, b| b.cmp(a));
    }

    /// Numeric ranks in stored order, `0` for open ranks.
    pub fn ranks(&self) -> Vec<u8> {
        self.cards.iter().map(|c| c.rank_value()).collect()
    }

    fn sorted(&self) -> Vec<Card> {
        let mut cards = self.cards.clone();
        cards.sort();
        cards
    }
}

impl PartialEq for CardSet {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for CardSet {}

impl PartialOrd for CardSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CardSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted().cmp(&other.sorted())
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self { cards: iter.into_iter().collect() }
    }
}

impl FromStr for CardSet {
    type Err = CardParseError;

    /// Parses concatenated card tokens, ignoring whitespace and commas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        tokenize_cards(s)?.into_iter().map(|token| Card::from_str(&token)).collect()
    }
}

fn tokenize_cards(input: &str) -> Result<Vec<String>, CardParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() || c == ',' {
            i += 1;
            continue;
        }
        if c == '*' {
            tokens.push(c.to_string());
            i += 1;
            continue;
        }
        let mut token = String::new();
        if Rank::try_from(c).is_ok() {
            token.push(c);
            i += 1;
        }
        if let Some(&next) = chars.get(i) {
            if Suit::try_from(next).is_ok() {
                token.push(next);
                i += 1;
            }
        }
        if token.is_empty() {
            return Err(CardParseError::UnexpectedSymbol { symbol: c, position: i });
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Parse multiple concrete cards separated by whitespace or commas, or written back to back.
///
/// ```
/// use easy_range::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd Tc").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// assert_eq!(parse_cards("AsKdTc").unwrap(), cards);
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    let set = CardSet::from_str(input)?;
    let result = match set.iter().find(|c| !c.is_concrete()) {
        Some(open) => Err(CardParseError::Invalid(open.to_string())),
        None => Ok(()),
    };
    result.map(|()| set.cards)
}
