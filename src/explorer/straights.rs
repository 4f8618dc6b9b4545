use super::combinations::combinations;
use super::hands::{Blocker, BlockerSubtype, BlockerType, MadeHand, MadeHandSubtype, MadeHandType};
use crate::cards::CardSet;
use std::collections::BTreeMap;

/// Top rank of the straight formed by five ranks, if they form one. The wheel tops at five.
pub(crate) fn straight_top(ranks: &[u8]) -> Option<u8> {
    if ranks.len() != 5 {
        return None;
    }
    let mut sorted = ranks.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != 5 {
        return None;
    }
    if sorted == [2, 3, 4, 5, 14] {
        return Some(5);
    }
    (sorted[4] - sorted[0] == 4).then_some(sorted[4])
}

/// A straight a hole pair makes with three board ranks, before ranking.
#[derive(Debug, Clone)]
pub(crate) struct UnrankedStraight {
    pub(crate) top: u8,
    /// Hole ranks, highest first.
    pub(crate) hole: [u8; 2],
    /// All five ranks, highest first.
    pub(crate) hand: Vec<u8>,
}

/// Every hole pair drawn from `remaining` that completes a straight with three of
/// `unique_ranks`. A pair able to make several straights keeps its highest one.
pub(crate) fn unranked_straights(unique_ranks: &[u8], remaining: &[u8]) -> Vec<UnrankedStraight> {
    let holes: Vec<[u8; 2]> = combinations(remaining, 2).map(|c| [c[0].max(c[1]), c[0].min(c[1])]).collect();
    let mut best: BTreeMap<[u8; 2], UnrankedStraight> = BTreeMap::new();
    for three in combinations(unique_ranks, 3) {
        for hole in &holes {
            let mut hand = three.clone();
            hand.extend_from_slice(hole);
            hand.sort_unstable_by(|a, b| b.cmp(a));
            if let Some(top) = straight_top(&hand) {
                let entry = best.entry(*hole).or_insert_with(|| UnrankedStraight { top, hole: *hole, hand: hand.clone() });
                if top > entry.top {
                    *entry = UnrankedStraight { top, hole: *hole, hand };
                }
            }
        }
    }
    best.into_values().collect()
}

/// Highest straight top reachable on a board with the given ranks.
pub(crate) fn best_straight_top(board_ranks: &[u8]) -> Option<u8> {
    let unique = crate::board::unique_desc(board_ranks);
    let remaining = crate::board::remaining_ranks(board_ranks);
    unranked_straights(&unique, &remaining).iter().map(|s| s.top).max()
}

/// Straights the board already allows, with their blockers.
#[derive(Debug, Clone, Default)]
pub(crate) struct StraightExplorer {
    pub(crate) straights: Vec<MadeHand>,
    pub(crate) blockers: Vec<Blocker>,
}

impl StraightExplorer {
    pub(crate) fn new(unique_ranks: &[u8], remaining: &[u8]) -> Self {
        let mut unranked = unranked_straights(unique_ranks, remaining);
        unranked.sort_by(|a, b| b.top.cmp(&a.top));

        let mut straights = Vec::with_capacity(unranked.len());
        let mut blockers = Vec::new();
        let mut handled: Vec<u8> = Vec::new();
        for (index, straight) in unranked.into_iter().enumerate() {
            let relative_rank = vec![index as u8 + 1];
            for rank in straight.hole {
                if handled.contains(&rank) {
                    continue;
                }
                handled.push(rank);
                blockers.push(Blocker::new(
                    BlockerType::StraightBlocker,
                    BlockerSubtype::TwoCard,
                    vec![rank],
                    relative_rank.clone(),
                    CardSet::from_ranks([rank, rank]),
                ));
                blockers.push(Blocker::new(
                    BlockerType::StraightBlocker,
                    BlockerSubtype::OneCard,
                    vec![rank],
                    relative_rank.clone(),
                    CardSet::from_ranks([rank]),
                ));
            }
            straights.push(MadeHand::new(
                MadeHandType::Straight,
                MadeHandSubtype::None,
                vec![straight.top],
                relative_rank,
                CardSet::from_ranks(straight.hole),
                CardSet::from_ranks(straight.hand),
            ));
        }
        blockers.sort_by(|a, b| b.cmp(a));
        Self { straights, blockers }
    }

    /// Hole rank pairs, highest first, that already make a straight.
    pub(crate) fn holes(&self) -> Vec<[u8; 2]> {
        self.straights
            .iter()
            .filter_map(|s| match s.hole.ranks().as_slice() {
                [a, b] => Some([*a, *b]),
                _ => None,
            })
            .collect()
    }
}
