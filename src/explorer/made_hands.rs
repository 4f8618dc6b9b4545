use super::combinations::combinations;
use super::flush_draws::{max_suit_count, missing_suited_ranks, most_common_suit, suited};
use super::hands::{Blocker, BlockerSubtype, BlockerType, MadeHand, MadeHandSubtype, MadeHandType};
use crate::board::{remaining_ranks, Board};
use crate::cards::{Card, CardSet};

/// 1 for an ace, 13 for a deuce.
fn rank_index(rank: u8) -> u8 {
    15 - rank
}

fn position(ranks: &[u8], rank: u8) -> u8 {
    ranks.iter().position(|&r| r == rank).map_or(0, |i| i as u8 + 1)
}

fn made(
    kind: MadeHandType,
    subtype: MadeHandSubtype,
    absolute_rank: Vec<u8>,
    relative_rank: Vec<u8>,
    hole: &[u8],
    hand: &[u8],
) -> MadeHand {
    MadeHand::new(
        kind,
        subtype,
        absolute_rank,
        relative_rank,
        CardSet::from_ranks(hole.iter().copied()),
        CardSet::from_ranks(hand.iter().copied()),
    )
}

/// Every made hand two hole cards can form on the board, grouped by category.
#[derive(Debug, Clone, Default)]
pub(crate) struct MadeHandExplorer {
    pub(crate) max_rank_count: usize,
    pub(crate) is_flushed: bool,
    /// Ranks appearing exactly twice, highest first.
    pub(crate) paired_ranks: Vec<u8>,
    /// Ranks appearing once, highest first.
    pub(crate) unpaired_ranks: Vec<u8>,
    pub(crate) flushes: Vec<MadeHand>,
    pub(crate) flush_blockers: Vec<Blocker>,
    pub(crate) sets: Vec<MadeHand>,
    pub(crate) trips: Vec<MadeHand>,
    pub(crate) two_pairs: Vec<MadeHand>,
    pub(crate) board_pairs: Vec<MadeHand>,
    pub(crate) pocket_pairs: Vec<MadeHand>,
    pub(crate) full_houses: Vec<MadeHand>,
    pub(crate) quads: Vec<MadeHand>,
    /// All of the above plus straights, best first.
    pub(crate) made_hands: Vec<MadeHand>,
}

impl MadeHandExplorer {
    pub(crate) fn new(board: &Board, straights: &[MadeHand]) -> Self {
        let ranks = board.ranks();
        let count = |rank: u8| ranks.iter().filter(|&&r| r == rank).count();
        let unique = board.unique_ranks();
        let max_rank_count = unique.iter().map(|&r| count(r)).max().unwrap_or(0);

        let mut explorer = Self {
            max_rank_count,
            is_flushed: max_suit_count(&board.suits()) >= 3,
            paired_ranks: unique.iter().copied().filter(|&r| count(r) == 2).collect(),
            unpaired_ranks: unique.iter().copied().filter(|&r| count(r) == 1).collect(),
            ..Self::default()
        };

        explorer.find_flushes(board);
        if explorer.is_paired() {
            explorer.find_trips();
            if explorer.is_exactly_paired() {
                explorer.find_full_houses(&unique);
                explorer.find_quads();
            }
        } else {
            explorer.find_sets(&ranks);
        }
        explorer.find_two_pairs(&ranks);
        explorer.find_board_pairs(board);
        explorer.find_pocket_pairs(&ranks);

        let mut made_hands = explorer.flushes.clone();
        made_hands.extend_from_slice(straights);
        if explorer.is_paired() {
            made_hands.extend_from_slice(&explorer.trips);
            made_hands.extend_from_slice(&explorer.full_houses);
            made_hands.extend_from_slice(&explorer.quads);
        } else {
            made_hands.extend_from_slice(&explorer.sets);
        }
        made_hands.extend_from_slice(&explorer.two_pairs);
        made_hands.extend_from_slice(&explorer.board_pairs);
        made_hands.extend_from_slice(&explorer.pocket_pairs);
        made_hands.sort_by(|a, b| b.cmp(a));
        explorer.made_hands = made_hands;

        log::debug!(
            "{:<24}{} hands, {} flush blockers",
            "made hands",
            explorer.made_hands.len(),
            explorer.flush_blockers.len()
        );
        explorer
    }

    pub(crate) fn is_paired(&self) -> bool {
        self.max_rank_count >= 2
    }

    pub(crate) fn is_exactly_paired(&self) -> bool {
        self.max_rank_count == 2
    }

    fn find_flushes(&mut self, board: &Board) {
        if !self.is_flushed {
            return;
        }
        let Some(suit) = most_common_suit(&board.suits()) else {
            return;
        };
        let mut board_flush = board.ranks_for_suit(suit);
        board_flush.sort_unstable_by(|a, b| b.cmp(a));
        let missing = missing_suited_ranks(board, suit);
        for (index, &rank) in missing.iter().enumerate() {
            let relative_rank = vec![index as u8 + 1];
            if index + 1 < missing.len() {
                let hole = CardSet::new(vec![suited(rank, suit), Card::suit_only(suit)]);
                let mut hand: CardSet = std::iter::once(suited(rank, suit))
                    .chain(board_flush.iter().take(3).map(|&r| suited(r, suit)))
                    .chain(std::iter::once(Card::suit_only(suit)))
                    .collect();
                hand.sort_desc();
                self.flushes.push(MadeHand::new(
                    MadeHandType::Flush,
                    MadeHandSubtype::None,
                    vec![rank],
                    relative_rank.clone(),
                    hole,
                    hand,
                ));
            }
            self.flush_blockers.push(Blocker::new(
                BlockerType::FlushBlocker,
                BlockerSubtype::None,
                vec![rank],
                relative_rank,
                CardSet::new(vec![suited(rank, suit)]),
            ));
        }
        self.flush_blockers.sort_by(|a, b| b.cmp(a));
    }

    fn find_sets(&mut self, ranks: &[u8]) {
        let mut board_ranks = ranks.to_vec();
        board_ranks.sort_unstable_by(|a, b| b.cmp(a));
        for &rank in &board_ranks {
            self.sets.push(made(
                MadeHandType::Set,
                MadeHandSubtype::None,
                vec![rank],
                vec![position(&board_ranks, rank)],
                &[rank, rank],
                &[rank, rank, rank],
            ));
        }
    }

    /// On a paired board only unpaired ranks above the top pair count; lower ones make a
    /// full house or trips instead.
    fn find_two_pairs(&mut self, ranks: &[u8]) {
        let candidates: Vec<u8> = if !self.is_paired() {
            let mut board_ranks = ranks.to_vec();
            board_ranks.sort_unstable_by(|a, b| b.cmp(a));
            board_ranks
        } else {
            match self.paired_ranks.iter().max() {
                Some(&top_pair) => self.unpaired_ranks.iter().copied().filter(|&r| r > top_pair).collect(),
                None => Vec::new(),
            }
        };
        for pair in combinations(&candidates, 2) {
            let (high, low) = (pair[0], pair[1]);
            self.two_pairs.push(made(
                MadeHandType::TwoPair,
                MadeHandSubtype::None,
                vec![high, low],
                vec![position(&candidates, high), position(&candidates, low)],
                &[high, low],
                &[high, high, low, low],
            ));
        }
    }

    /// Relative rank is (position among all pairs, position among board pairs, kicker position).
    fn find_board_pairs(&mut self, board: &Board) {
        let pairable: Vec<u8> = if !self.is_paired() {
            let mut board_ranks = board.ranks();
            board_ranks.sort_unstable_by(|a, b| b.cmp(a));
            board_ranks
        } else {
            self.unpaired_ranks.clone()
        };
        let mut kickers = board.remaining_ranks();
        kickers.reverse();
        for (pair_index, &pair) in pairable.iter().enumerate() {
            for (kicker_index, &kicker) in kickers.iter().enumerate() {
                self.board_pairs.push(made(
                    MadeHandType::Pair,
                    MadeHandSubtype::BoardPair,
                    vec![pair, kicker],
                    vec![rank_index(pair), pair_index as u8 + 1, kicker_index as u8 + 1],
                    &[pair, kicker],
                    &[pair, pair, kicker],
                ));
            }
        }
    }

    /// Relative rank is (position among all pairs, gap group, position inside the group).
    ///
    /// The gap group grows each time the walk from aces down meets a board rank right after
    /// a pocket pair, so overpairs form group 1 and each run between board ranks its own group.
    fn find_pocket_pairs(&mut self, ranks: &[u8]) {
        let mut group = 1;
        let mut position = 1;
        for rank in (2..=14).rev() {
            if !ranks.contains(&rank) {
                self.pocket_pairs.push(made(
                    MadeHandType::Pair,
                    MadeHandSubtype::PocketPair,
                    vec![rank],
                    vec![rank_index(rank), group, position],
                    &[rank, rank],
                    &[rank, rank],
                ));
                position += 1;
            } else {
                if position > 1 || group == 1 {
                    group += 1;
                }
                position = 1;
            }
        }
    }

    fn find_trips(&mut self) {
        let mut kickers: Vec<u8> = remaining_ranks(&self.unpaired_ranks)
            .into_iter()
            .filter(|r| !self.paired_ranks.contains(r))
            .collect();
        kickers.reverse();
        for (trips_index, &trips) in self.paired_ranks.iter().enumerate() {
            for (kicker_index, &kicker) in kickers.iter().enumerate() {
                self.trips.push(made(
                    MadeHandType::Trips,
                    MadeHandSubtype::None,
                    vec![trips, kicker],
                    vec![trips_index as u8 + 1, kicker_index as u8 + 1],
                    &[trips, kicker],
                    &[trips, trips, trips, kicker],
                ));
            }
        }
    }

    /// Full houses on an exactly paired board: a set of an unpaired rank, or trips of the
    /// paired rank with a second board rank.
    fn find_full_houses(&mut self, unique: &[u8]) {
        let mut relative_rank = 1;
        for &rank in unique {
            if self.unpaired_ranks.contains(&rank) {
                for &paired in &self.paired_ranks {
                    self.full_houses.push(made(
                        MadeHandType::FullHouse,
                        MadeHandSubtype::None,
                        vec![rank, paired],
                        vec![relative_rank],
                        &[rank, rank],
                        &[rank, rank, rank, paired, paired],
                    ));
                    relative_rank += 1;
                }
            }
            if self.paired_ranks.contains(&rank) {
                for &other in self.unpaired_ranks.iter().filter(|&&r| r != rank) {
                    self.full_houses.push(made(
                        MadeHandType::FullHouse,
                        MadeHandSubtype::None,
                        vec![rank, other],
                        vec![relative_rank],
                        &[rank, other],
                        &[rank, rank, rank, other, other],
                    ));
                    relative_rank += 1;
                }
            }
        }
        self.full_houses.sort_by(|a, b| b.cmp(a));
    }

    fn find_quads(&mut self) {
        for (index, &paired) in self.paired_ranks.iter().enumerate() {
            self.quads.push(made(
                MadeHandType::Quads,
                MadeHandSubtype::None,
                vec![paired],
                vec![index as u8 + 1],
                &[paired, paired],
                &[paired, paired, paired, paired],
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::straights::StraightExplorer;
    use std::str::FromStr;

    fn explore(board: &str) -> MadeHandExplorer {
        let board = Board::from_str(board).unwrap();
        let straights = StraightExplorer::new(&board.unique_ranks(), &board.remaining_ranks());
        MadeHandExplorer::new(&board, &straights.straights)
    }

    fn holes(hands: &[MadeHand]) -> Vec<String> {
        hands.iter().map(|h| h.hole.to_string()).collect()
    }

    #[test]
    fn test_pairness() {
        let explorer = explore("AsJcJh2s");
        assert!(explorer.is_paired());
        assert!(explorer.is_exactly_paired());
        assert_eq!(explorer.paired_ranks, vec![11]);
        assert_eq!(explorer.unpaired_ranks, vec![14, 2]);
        assert!(!explore("AdKc7h").is_paired());
    }

    #[test]
    fn test_sets_on_unpaired_board() {
        let explorer = explore("AdKc7h8s3s");
        assert_eq!(holes(&explorer.sets), vec!["AA", "KK", "88", "77", "33"]);
        assert_eq!(explorer.sets[2].relative_rank, vec![3]);
        assert!(explorer.trips.is_empty());
    }

    #[test]
    fn test_two_pairs() {
        let explorer = explore("AdKc7h8s3s");
        assert_eq!(explorer.two_pairs.len(), 10);
        assert_eq!(explorer.two_pairs[0].hole.to_string(), "AK");
        let eight_seven = explorer.two_pairs.iter().find(|h| h.absolute_rank == vec![8, 7]).unwrap();
        assert_eq!(eight_seven.relative_rank, vec![3, 4]);
        assert_eq!(eight_seven.hand.to_string(), "8877");
    }

    #[test]
    fn test_two_pairs_on_paired_board_only_above_pair() {
        let explorer = explore("AsJcJh2s");
        assert_eq!(holes(&explorer.two_pairs), Vec::<String>::new());
        let explorer = explore("Ad2s7d7h");
        assert!(explorer.two_pairs.is_empty());
        let explorer = explore("AdKsKh2s");
        assert!(explorer.two_pairs.is_empty());
        let explorer = explore("AdKs7d7h");
        assert_eq!(holes(&explorer.two_pairs), vec!["AK"]);
    }

    #[test]
    fn test_tripped_board_has_no_two_pairs() {
        let explorer = explore("AdAsAh");
        assert!(explorer.two_pairs.is_empty());
        assert!(explorer.trips.is_empty());
    }

    #[test]
    fn test_board_and_pocket_pairs() {
        let explorer = explore("Ad2s7d7h");
        assert_eq!(explorer.board_pairs.len(), 20);
        assert_eq!(explorer.pocket_pairs.len(), 10);
    }

    #[test]
    fn test_board_pair_relative_rank() {
        let explorer = explore("Qd5s7d3h");
        let pair = explorer.board_pairs.iter().find(|h| h.absolute_rank == vec![7, 11]).unwrap();
        assert_eq!(pair.relative_rank, vec![8, 2, 3]);
        assert_eq!(pair.hole.to_string(), "7J");
        assert_eq!(pair.hand.to_string(), "77J");
    }

    #[test]
    fn test_pocket_pair_groups() {
        let explorer = explore("Qd5s7d3h");
        let ranks: Vec<_> = explorer.pocket_pairs.iter().map(|h| h.relative_rank.clone()).collect();
        assert_eq!(
            ranks,
            vec![
                vec![1, 1, 1],
                vec![2, 1, 2],
                vec![4, 2, 1],
                vec![5, 2, 2],
                vec![6, 2, 3],
                vec![7, 2, 4],
                vec![9, 3, 1],
                vec![11, 4, 1],
                vec![13, 5, 1],
            ]
        );
        assert_eq!(holes(&explorer.pocket_pairs)[..2], ["AA".to_string(), "KK".to_string()]);
    }

    #[test]
    fn test_trips_counts() {
        assert_eq!(explore("AdAs2d4s8d").trips.len(), 9);
        assert_eq!(explore("AdAs2d2s8d").trips.len(), 20);
        let trips = explore("AdKsKh2s").trips;
        assert_eq!(trips.len(), 10);
        assert_eq!(trips[0].absolute_rank, vec![13, 12]);
        assert_eq!(trips[0].hand.to_string(), "KKKQ");
    }

    #[test]
    fn test_full_houses_and_quads() {
        let explorer = explore("AdKsKh3c4d");
        assert_eq!(explorer.full_houses.len(), 6);
        assert_eq!(explorer.quads.len(), 1);
        assert_eq!(explorer.quads[0].hole.to_string(), "KK");
        let explorer = explore("AsJcJh2s");
        assert_eq!(holes(&explorer.full_houses), vec!["AA", "JA", "J2", "22"]);
    }

    #[test]
    fn test_flushes() {
        let explorer = explore("AdKs2d7d8d");
        assert_eq!(holes(&explorer.flushes)[..2], ["Kdd".to_string(), "Qdd".to_string()]);
        assert_eq!(explorer.flushes.len(), 8);
        assert_eq!(explorer.flushes[0].hand.to_string(), "AdKd8d7dd");
        assert_eq!(explorer.flush_blockers.len(), 9);
        assert_eq!(explorer.flush_blockers[0].hole.to_string(), "Kd");
        assert!(explore("AdKs2d").flushes.is_empty());
    }

    #[test]
    fn test_made_hands_sorted_best_first() {
        let explorer = explore("AdKs2d4hTs");
        let made = &explorer.made_hands;
        assert!(made.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(made[0].kind, MadeHandType::Straight);
        assert_eq!(made[0].hole.to_string(), "QJ");
        assert_eq!(made.last().unwrap().kind, MadeHandType::Pair);
    }
}
