use super::hands::{Blocker, BlockerType, FlushDraw, FlushDrawSubtype, FlushDrawType};
use crate::board::{remaining_ranks, Board};
use crate::cards::{Card, CardSet, Rank, Suit};

/// Suits with their counts, in order of first appearance.
fn suit_counts(suits: &[Suit]) -> Vec<(Suit, usize)> {
    let mut counts: Vec<(Suit, usize)> = Vec::with_capacity(4);
    for &suit in suits {
        match counts.iter_mut().find(|(s, _)| *s == suit) {
            Some((_, n)) => *n += 1,
            None => counts.push((suit, 1)),
        }
    }
    counts
}

pub(crate) fn max_suit_count(suits: &[Suit]) -> usize {
    suit_counts(suits).iter().map(|&(_, n)| n).max().unwrap_or(0)
}

/// Most frequent suit; ties go to the suit seen first.
pub(crate) fn most_common_suit(suits: &[Suit]) -> Option<Suit> {
    let counts = suit_counts(suits);
    let max = counts.iter().map(|&(_, n)| n).max()?;
    counts.into_iter().find(|&(_, n)| n == max).map(|(s, _)| s)
}

/// Undealt ranks of `suit`, highest first.
pub(crate) fn missing_suited_ranks(board: &Board, suit: Suit) -> Vec<u8> {
    let mut ranks = remaining_ranks(&board.ranks_for_suit(suit));
    ranks.reverse();
    ranks
}

pub(crate) fn suited(rank: u8, suit: Suit) -> Card {
    match Rank::from_value(rank) {
        Some(rank) => Card::new(rank, suit),
        None => Card::suit_only(suit),
    }
}

/// Suit texture of the board and the flush draws it offers.
#[derive(Debug, Clone, Default)]
pub(crate) struct FlushDrawExplorer {
    pub(crate) is_rainbow: bool,
    pub(crate) is_flushed: bool,
    pub(crate) has_flopped_flush_draw: bool,
    pub(crate) has_turned_flush_draw: bool,
    pub(crate) draws: Vec<FlushDraw>,
    pub(crate) backdoors: Vec<FlushDraw>,
    pub(crate) blockers: Vec<Blocker>,
}

impl FlushDrawExplorer {
    pub(crate) fn new(board: &Board) -> Self {
        let suits = board.suits();
        let max = max_suit_count(&suits);
        let flop = &suits[..suits.len().min(3)];
        let is_rainbow = max != 2;
        let is_flushed = max >= 3;
        let has_flopped_flush_draw = max_suit_count(flop) == 2;
        // A turned two-flush that completed the flopped one is a flush, not a draw.
        let has_turned_flush_draw =
            suits.len() >= 4 && max_suit_count(&suits[1..4]) == 2 && max_suit_count(&suits[..4]) == 2;

        let mut explorer = Self {
            is_rainbow,
            is_flushed,
            has_flopped_flush_draw,
            has_turned_flush_draw,
            ..Self::default()
        };

        if suits.len() < 5 && !is_rainbow {
            if has_flopped_flush_draw {
                if let Some(suit) = most_common_suit(flop) {
                    explorer.add_draws(board, suit, FlushDrawSubtype::Flopped);
                }
            }
            if has_turned_flush_draw {
                if let Some(suit) = most_common_suit(&suits[1..]) {
                    explorer.add_draws(board, suit, FlushDrawSubtype::Turned);
                }
            }
            explorer.draws.sort_by(|a, b| b.cmp(a));
            explorer.blockers.sort_by(|a, b| b.cmp(a));
        }

        if suits.len() == 3 && !is_flushed {
            for (suit, _) in suit_counts(&suits).into_iter().filter(|&(_, n)| n == 1) {
                let ranks = missing_suited_ranks(board, suit);
                let usable = ranks.len().saturating_sub(1);
                for (index, &rank) in ranks[..usable].iter().enumerate() {
                    explorer.backdoors.push(FlushDraw::new(
                        FlushDrawType::Backdoor,
                        FlushDrawSubtype::Flopped,
                        vec![rank],
                        vec![index as u8 + 1],
                        CardSet::new(vec![suited(rank, suit), Card::suit_only(suit)]),
                    ));
                }
            }
            explorer.backdoors.sort_by(|a, b| b.cmp(a));
        }

        log::debug!(
            "{:<24}{} draws, {} backdoors, {} blockers",
            "flush draws",
            explorer.draws.len(),
            explorer.backdoors.len(),
            explorer.blockers.len()
        );
        explorer
    }

    /// Every missing rank of the suit blocks; all but the lowest also draw.
    fn add_draws(&mut self, board: &Board, suit: Suit, subtype: FlushDrawSubtype) {
        let ranks = missing_suited_ranks(board, suit);
        for (index, &rank) in ranks.iter().enumerate() {
            let relative_rank = vec![index as u8 + 1];
            if index + 1 < ranks.len() {
                self.draws.push(FlushDraw::new(
                    FlushDrawType::Normal,
                    subtype,
                    vec![rank],
                    relative_rank.clone(),
                    CardSet::new(vec![suited(rank, suit), Card::suit_only(suit)]),
                ));
            }
            self.blockers.push(Blocker::new(
                BlockerType::FlushDrawBlocker,
                subtype.into(),
                vec![rank],
                relative_rank,
                CardSet::new(vec![suited(rank, suit)]),
            ));
        }
    }
}
