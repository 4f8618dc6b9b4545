use easy_range::cards::{Card, CardSet, Rank, Suit};
use easy_range::deck::Deck;
use easy_range::easy_range::{check_range, EasyRangeError};
use easy_range::explorer::{
    Blocker, BlockerSubtype, BlockerType, BoardExplorer, FlushDraw, FlushDrawSubtype, FlushDrawType, MadeHand,
    MadeHandSubtype, MadeHandType, StraightDraw, StraightDrawType,
};
use easy_range::range_text::close_parenthesis;
use proptest::prelude::*;
use std::cmp::Ordering;

const KINDS: [MadeHandType; 10] = [
    MadeHandType::NoPair,
    MadeHandType::Pair,
    MadeHandType::TwoPair,
    MadeHandType::Trips,
    MadeHandType::Set,
    MadeHandType::Straight,
    MadeHandType::Flush,
    MadeHandType::FullHouse,
    MadeHandType::Quads,
    MadeHandType::StraightFlush,
];

fn any_made_hand() -> impl Strategy<Value = MadeHand> {
    (
        0usize..KINDS.len(),
        prop::collection::vec(2u8..=14, 1..=3),
        prop::collection::vec(1u8..=10, 1..=2),
        2u8..=14,
        2u8..=14,
    )
        .prop_map(|(kind, abs, rr, a, b)| {
            MadeHand::new(
                KINDS[kind],
                MadeHandSubtype::None,
                abs,
                rr,
                CardSet::from_ranks([a, b]),
                CardSet::from_ranks([a, b]),
            )
        })
}

fn any_straight_draw() -> impl Strategy<Value = StraightDraw> {
    (
        prop::collection::vec(2u8..=14, 2..=4),
        prop::collection::vec(2u8..=14, 0..=6),
        prop::collection::vec(2u8..=14, 0..=3),
    )
        .prop_map(|(hole, outs, nuts)| StraightDraw::new(StraightDrawType::Normal, hole, outs, nuts))
}

fn any_flush_draw() -> impl Strategy<Value = FlushDraw> {
    (
        prop_oneof![Just(FlushDrawType::Normal), Just(FlushDrawType::Backdoor)],
        prop_oneof![Just(FlushDrawSubtype::Flopped), Just(FlushDrawSubtype::Turned)],
        0usize..13,
        1u8..=10,
        0usize..4,
    )
        .prop_map(|(kind, subtype, rank, relative, suit)| {
            let (rank, suit) = (Rank::ALL[rank], Suit::ALL[suit]);
            FlushDraw::new(
                kind,
                subtype,
                vec![rank.value()],
                vec![relative],
                CardSet::new(vec![Card::new(rank, suit), Card::suit_only(suit)]),
            )
        })
}

const BLOCKER_KINDS: [BlockerType; 4] = [
    BlockerType::FlushBlocker,
    BlockerType::StraightBlocker,
    BlockerType::FlushDrawBlocker,
    BlockerType::StraightDrawBlocker,
];

const BLOCKER_SUBTYPES: [BlockerSubtype; 5] = [
    BlockerSubtype::None,
    BlockerSubtype::TwoCard,
    BlockerSubtype::OneCard,
    BlockerSubtype::Flopped,
    BlockerSubtype::Turned,
];

fn any_blocker() -> impl Strategy<Value = Blocker> {
    (
        0usize..BLOCKER_KINDS.len(),
        0usize..BLOCKER_SUBTYPES.len(),
        2u8..=14,
        prop::collection::vec(1u8..=10, 1..=2),
        1usize..=2,
    )
        .prop_map(|(kind, subtype, rank, relative, cards)| {
            Blocker::new(
                BLOCKER_KINDS[kind],
                BLOCKER_SUBTYPES[subtype],
                vec![rank],
                relative,
                CardSet::from_ranks(std::iter::repeat(rank).take(cards)),
            )
        })
}

/// Reflexive, antisymmetric, transitive, and `Equal` exactly when the records are equal.
fn total_order_laws<T: Ord + std::fmt::Debug>(a: &T, b: &T, c: &T) -> Result<(), TestCaseError> {
    prop_assert_eq!(a.cmp(a), Ordering::Equal);
    prop_assert_eq!(a.cmp(b), b.cmp(a).reverse());
    prop_assert_eq!(a.cmp(b) == Ordering::Equal, a == b);
    if a <= b && b <= c {
        prop_assert!(a <= c, "{:?} <= {:?} <= {:?}", a, b, c);
    }
    Ok(())
}

/// Top of the straight five ranks form, the wheel topping at five.
fn straight_top(ranks: &[u8]) -> Option<u8> {
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

/// Straight tops two hole ranks reach with any three of `board`.
fn straight_tops(board: &[u8], hole: &[u8]) -> Vec<u8> {
    let n = board.len();
    let mut tops = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                tops.extend(straight_top(&[board[i], board[j], board[k], hole[0], hole[1]]));
            }
        }
    }
    tops
}

/// Whether two hole ranks complete a straight with any three of `board`.
fn makes_straight(board: &[u8], hole: &[u8]) -> bool {
    !straight_tops(board, hole).is_empty()
}

/// Best straight any two ranks missing from `board` can make with it.
fn best_top(board: &[u8]) -> Option<u8> {
    let open: Vec<u8> = (2u8..=14).filter(|r| !board.contains(r)).collect();
    let mut best = None;
    for (i, &a) in open.iter().enumerate() {
        for &b in &open[i + 1..] {
            best = best.max(straight_tops(board, &[a, b]).into_iter().max());
        }
    }
    best
}

/// Outs after which `hole` makes the best straight on the new board.
fn brute_force_nut_outs(board: &[u8], hole: &[u8]) -> Vec<u8> {
    brute_force_outs(board, hole)
        .into_iter()
        .filter(|&out| {
            let mut next = board.to_vec();
            next.push(out);
            let best = best_top(&next);
            straight_tops(&next, hole).into_iter().any(|top| Some(top) == best)
        })
        .collect()
}

fn brute_force_outs(board: &[u8], hole: &[u8]) -> Vec<u8> {
    (2u8..=14)
        .rev()
        .filter(|r| !board.contains(r) && !hole.contains(r))
        .filter(|&r| {
            let mut next = board.to_vec();
            next.push(r);
            makes_straight(&next, hole)
        })
        .collect()
}

fn random_explorer(seed: u64, cards: usize) -> BoardExplorer {
    let mut deck = Deck::standard();
    deck.shuffle_seeded(seed);
    BoardExplorer::new(deck.deal_board(cards).unwrap()).unwrap()
}

proptest! {
    #[test]
    fn made_hand_order_is_total(a in any_made_hand(), b in any_made_hand(), c in any_made_hand()) {
        total_order_laws(&a, &b, &c)?;
        if a.kind != b.kind {
            prop_assert_eq!(a.cmp(&b), a.kind.cmp(&b.kind));
        }
    }

    #[test]
    fn straight_draws_order_by_outs(a in any_straight_draw(), b in any_straight_draw(), c in any_straight_draw()) {
        total_order_laws(&a, &b, &c)?;
        if a.count_outs() > b.count_outs() {
            prop_assert_eq!(a.cmp(&b), Ordering::Greater);
        }
    }

    #[test]
    fn flush_draw_order_is_total(a in any_flush_draw(), b in any_flush_draw(), c in any_flush_draw()) {
        total_order_laws(&a, &b, &c)?;
        if a.kind == FlushDrawType::Normal && b.kind == FlushDrawType::Backdoor {
            prop_assert_eq!(a.cmp(&b), Ordering::Greater);
        }
    }

    #[test]
    fn blocker_order_is_total(a in any_blocker(), b in any_blocker(), c in any_blocker()) {
        total_order_laws(&a, &b, &c)?;
        if a.kind < b.kind {
            prop_assert_eq!(a.cmp(&b), Ordering::Greater);
        }
    }

    #[test]
    fn two_card_draws_match_brute_force_outs_and_nut_outs(seed in any::<u64>(), cards in 3usize..=4) {
        let explorer = random_explorer(seed, cards);
        let board = explorer.board().ranks();
        for draw in explorer.straight_draws().iter().filter(|d| d.hole_ranks().len() == 2) {
            let hole = draw.hole_ranks();
            prop_assert!(!makes_straight(&board, hole), "{} already a straight", explorer);
            prop_assert_eq!(draw.outs().to_vec(), brute_force_outs(&board, hole), "{} {:?}", explorer, hole);
            prop_assert_eq!(draw.nut_outs().to_vec(), brute_force_nut_outs(&board, hole), "{} {:?}", explorer, hole);
            // Outs never share a rank with the hole, so every out rank counts four cards.
            prop_assert_eq!(draw.count_outs(), draw.outs().len() * 4);
            prop_assert_eq!(draw.count_nut_outs(), draw.nut_outs().len() * 4);
        }
    }

    #[test]
    fn every_open_pair_with_outs_is_a_draw(seed in any::<u64>(), cards in 3usize..=4) {
        let explorer = random_explorer(seed, cards);
        let board = explorer.board().ranks();
        let open: Vec<u8> = (2u8..=14).rev().filter(|r| !board.contains(r)).collect();
        for (i, &high) in open.iter().enumerate() {
            for &low in &open[i + 1..] {
                let hole = [high, low];
                if makes_straight(&board, &hole) || brute_force_outs(&board, &hole).is_empty() {
                    continue;
                }
                prop_assert!(
                    explorer.straight_draws().iter().any(|d| d.hole_ranks() == hole),
                    "{} missing {:?}", explorer, hole
                );
            }
        }
    }

    #[test]
    fn rivers_have_no_draws(seed in any::<u64>()) {
        let explorer = random_explorer(seed, 5);
        prop_assert!(explorer.straight_draws().is_empty());
        prop_assert!(explorer.flush_draws().is_empty());
        prop_assert!(explorer.backdoor_straight_draws().is_empty());
    }

    #[test]
    fn made_hands_are_sorted_best_first(seed in any::<u64>(), cards in 3usize..=5) {
        let explorer = random_explorer(seed, cards);
        let made = explorer.made_hands();
        prop_assert!(made.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn close_parenthesis_is_idempotent(range in "[()A-Z0-9,!:*]{0,12}") {
        let once = close_parenthesis(&range);
        prop_assert_eq!(close_parenthesis(&once), once);
    }

    #[test]
    fn check_range_never_panics(input in "\\PC{0,16}") {
        match check_range(&input) {
            Ok(()) | Err(EasyRangeError::Empty) => {}
            Err(err) => {
                let column = err.column().unwrap();
                prop_assert!(column >= 1 && column <= input.chars().count() + 1);
            }
        }
    }
}
