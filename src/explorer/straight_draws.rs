use super::combinations::combinations;
use super::hands::{Blocker, BlockerSubtype, BlockerType, StraightDraw, StraightDrawType};
use super::straights::{best_straight_top, straight_top};
use crate::cards::CardSet;
use std::collections::{BTreeMap, BTreeSet};

type Signature = (Vec<u8>, Vec<u8>);

/// Straight draws for a flop or turn.
///
/// Two-card draws come from trying every next card; three- and four-card draws are unions of
/// the two-card draws their ranks contain.
#[derive(Debug, Clone, Default)]
pub(crate) struct StraightDrawExplorer {
    pub(crate) draws: Vec<StraightDraw>,
    pub(crate) backdoors: Vec<StraightDraw>,
    pub(crate) blockers: Vec<Blocker>,
}

impl StraightDrawExplorer {
    /// `board_ranks` in dealing order; `straight_holes` are the pairs that already make a straight.
    pub(crate) fn new(board_ranks: &[u8], remaining: &[u8], straight_holes: &[[u8; 2]]) -> Self {
        if board_ranks.len() >= 5 {
            return Self::default();
        }

        let two_card = two_card_draws(board_ranks, remaining, straight_holes);
        let draw_ranks: BTreeSet<u8> = two_card.keys().flat_map(|k| k.iter().copied()).collect();
        let mut ranks_desc: Vec<u8> = draw_ranks.into_iter().collect();
        ranks_desc.reverse();

        let mut draws: Vec<StraightDraw> = two_card.values().cloned().collect();
        let mut previous: Vec<Signature> = draws.iter().map(signature).collect();
        for size in 3..=4 {
            let sized = sized_draws(&two_card, &ranks_desc, size, &previous);
            previous = sized.iter().map(signature).collect();
            draws.extend(sized);
        }
        draws.sort_by(|a, b| b.cmp(a));

        let mut blockers = Vec::with_capacity(ranks_desc.len() * 2);
        for (index, &rank) in ranks_desc.iter().enumerate() {
            let relative_rank = vec![index as u8 + 1];
            blockers.push(Blocker::new(
                BlockerType::StraightDrawBlocker,
                BlockerSubtype::TwoCard,
                vec![rank],
                relative_rank.clone(),
                CardSet::from_ranks([rank, rank]),
            ));
            blockers.push(Blocker::new(
                BlockerType::StraightDrawBlocker,
                BlockerSubtype::OneCard,
                vec![rank],
                relative_rank,
                CardSet::from_ranks([rank]),
            ));
        }
        blockers.sort_by(|a, b| b.cmp(a));

        let backdoors = if board_ranks.len() == 3 {
            let known: Vec<[u8; 2]> = two_card.keys().copied().collect();
            backdoor_draws(board_ranks, remaining, &known)
        } else {
            Vec::new()
        };

        log::debug!(
            "{:<24}{} draws, {} backdoors, {} blockers",
            "straight draws",
            draws.len(),
            backdoors.len(),
            blockers.len()
        );
        Self { draws, backdoors, blockers }
    }
}

fn signature(draw: &StraightDraw) -> Signature {
    (draw.outs().to_vec(), draw.nut_outs().to_vec())
}

fn desc_pair(a: u8, b: u8) -> [u8; 2] {
    [a.max(b), a.min(b)]
}

/// Draws needing one more card, keyed by hole ranks (highest first).
fn two_card_draws(
    board_ranks: &[u8],
    remaining: &[u8],
    straight_holes: &[[u8; 2]],
) -> BTreeMap<[u8; 2], StraightDraw> {
    let mut draws: BTreeMap<[u8; 2], StraightDraw> = BTreeMap::new();
    for &out in remaining {
        let mut next_board = board_ranks.to_vec();
        next_board.push(out);
        let next_remaining: Vec<u8> = remaining.iter().copied().filter(|&r| r != out).collect();
        let best = best_straight_top(&next_board);

        for hole in combinations(&next_remaining, 2) {
            let key = desc_pair(hole[0], hole[1]);
            if straight_holes.contains(&key) {
                continue;
            }
            for three in combinations(&next_board, 3) {
                let mut hand = three;
                hand.extend_from_slice(&hole);
                let Some(top) = straight_top(&hand) else {
                    continue;
                };
                let is_nut = Some(top) == best;
                match draws.get_mut(&key) {
                    Some(draw) if is_nut => draw.add_nut_outs(&[out]),
                    Some(draw) => draw.add_outs(&[out]),
                    None => {
                        let nut_outs = if is_nut { vec![out] } else { Vec::new() };
                        draws.insert(key, StraightDraw::new(StraightDrawType::Normal, key.to_vec(), vec![out], nut_outs));
                    }
                }
            }
        }
    }
    draws
}

/// Draws combining the two-card draws inside each `size`-rank combination.
///
/// A combination adds nothing when its outs match a draw one size smaller.
fn sized_draws(
    two_card: &BTreeMap<[u8; 2], StraightDraw>,
    ranks_desc: &[u8],
    size: usize,
    previous: &[Signature],
) -> Vec<StraightDraw> {
    let mut sized: Vec<StraightDraw> = Vec::new();
    for combo in combinations(ranks_desc, size) {
        let parts: Vec<&StraightDraw> =
            combinations(&combo, 2).filter_map(|pair| two_card.get(&[pair[0], pair[1]])).collect();
        if parts.len() < 2 {
            continue;
        }
        let combined = combine(&parts);
        if sized.iter().any(|d| d.hole_ranks() == combined.hole_ranks()) {
            continue;
        }
        if !previous.contains(&signature(&combined)) {
            sized.push(combined);
        }
    }
    sized
}

fn combine(parts: &[&StraightDraw]) -> StraightDraw {
    let mut ranks = BTreeSet::new();
    let mut outs = BTreeSet::new();
    let mut nut_outs = BTreeSet::new();
    for part in parts {
        ranks.extend(part.hole_ranks().iter().copied());
        outs.extend(part.outs().iter().copied());
        nut_outs.extend(part.nut_outs().iter().copied());
    }
    StraightDraw::new(
        StraightDrawType::Normal,
        ranks.into_iter().collect(),
        outs.into_iter().collect(),
        nut_outs.into_iter().collect(),
    )
}

/// Runner-runner draws on a flop: one board rank plus four undealt ranks in a row.
fn backdoor_draws(board_ranks: &[u8], remaining: &[u8], known: &[[u8; 2]]) -> Vec<StraightDraw> {
    let mut remaining_desc = remaining.to_vec();
    remaining_desc.sort_unstable_by(|a, b| b.cmp(a));

    let mut draws: BTreeMap<[u8; 2], StraightDraw> = BTreeMap::new();
    for &card in board_ranks {
        for four in combinations(&remaining_desc, 4) {
            let mut possible = vec![card];
            possible.extend_from_slice(&four);
            if straight_top(&possible).is_none() {
                continue;
            }
            for hole in combinations(&four, 2) {
                let key = [hole[0], hole[1]];
                if known.contains(&key) {
                    continue;
                }
                let outs: Vec<u8> = four.iter().copied().filter(|r| !hole.contains(r)).collect();
                match draws.get_mut(&key) {
                    Some(draw) => draw.add_outs(&outs),
                    None => {
                        draws.insert(key, StraightDraw::new(StraightDrawType::Backdoor, key.to_vec(), outs, Vec::new()));
                    }
                }
            }
        }
    }
    let mut backdoors: Vec<StraightDraw> = draws.into_values().collect();
    backdoors.sort_by(|a, b| b.cmp(a));
    backdoors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::explorer::straights::StraightExplorer;
    use std::str::FromStr;

    fn explore(board: &str) -> StraightDrawExplorer {
        let board = Board::from_str(board).unwrap();
        let straights = StraightExplorer::new(&board.unique_ranks(), &board.remaining_ranks());
        StraightDrawExplorer::new(&board.ranks(), &board.remaining_ranks(), &straights.holes())
    }

    fn find<'a>(draws: &'a [StraightDraw], hole: &[u8]) -> Option<&'a StraightDraw> {
        draws.iter().find(|d| d.hole_ranks() == hole)
    }

    #[test]
    fn test_river_has_no_draws() {
        let explorer = explore("AdKs2d4hTs");
        assert!(explorer.draws.is_empty());
        assert!(explorer.backdoors.is_empty());
        assert!(explorer.blockers.is_empty());
    }

    #[test]
    fn test_draw_counts() {
        assert_eq!(explore("AdKs2d").draws.len(), 17);
        assert_eq!(explore("AdKs7d").draws.len(), 4);
        assert_eq!(explore("5s8d9c").draws.len(), 22);
    }

    #[test]
    fn test_wrap_outs_and_nut_outs() {
        let explorer = explore("5s8d9c");
        let draw = find(&explorer.draws, &[12, 11, 7]).unwrap();
        assert_eq!(draw.outs(), &[10]);
        assert_eq!(draw.nut_outs(), &[10]);
        let draw = find(&explorer.draws, &[10, 7]).unwrap();
        assert_eq!(draw.outs(), &[11, 6]);
        assert_eq!(draw.nut_outs(), &[6]);
        // 76 already makes a straight
        assert!(find(&explorer.draws, &[7, 6]).is_none());
        assert_eq!(explorer.draws[0].hole_ranks(), &[11, 10, 7]);
    }

    #[test]
    fn test_gutshot_has_four_outs() {
        let explorer = explore("AdKs2d");
        let draw = find(&explorer.draws, &[5, 3]).unwrap();
        assert_eq!(draw.outs(), &[4]);
        assert_eq!(draw.count_outs(), 4);
    }

    #[test]
    fn test_draws_sorted_best_first() {
        let explorer = explore("9s8d2h");
        assert!(explorer.draws.windows(2).all(|w| w[0] >= w[1]));
        assert!(explorer.draws[0].count_outs() >= explorer.draws.last().unwrap().count_outs());
    }

    #[test]
    fn test_draw_blockers() {
        let explorer = explore("KdQd6c");
        let first = &explorer.blockers[0];
        assert_eq!(first.hole.to_string(), "AA");
        assert_eq!(first.subtype, BlockerSubtype::TwoCard);
        assert_eq!(first.relative_rank, vec![1]);
        let last = explorer.blockers.last().unwrap();
        assert_eq!(last.hole.to_string(), "9");
        assert_eq!(last.subtype, BlockerSubtype::OneCard);
        assert_eq!(last.relative_rank, vec![4]);
    }

    #[test]
    fn test_backdoors() {
        let explorer = explore("KdQd6c");
        let first = &explorer.backdoors[0];
        assert_eq!(first.hole_ranks(), &[9, 8]);
        assert_eq!(first.outs(), &[11, 10, 7, 5]);
        let last = explorer.backdoors.last().unwrap();
        assert_eq!(last.hole_ranks(), &[3, 2]);
        assert_eq!(last.outs(), &[5, 4]);
        assert!(explorer.backdoors.iter().all(|d| d.kind == StraightDrawType::Backdoor));
    }

    #[test]
    fn test_backdoors_only_on_flop() {
        assert!(explore("Js9h4h2c").backdoors.is_empty());
        assert_eq!(explore("Ad7s3s").backdoors.len(), 18);
    }
}
