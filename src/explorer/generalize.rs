use super::hands::{MadeHand, MadeHandSubtype, MadeHandType};
use crate::cards::Card;

/// Drops the rank dimension a query for `kind` left unspecified, then removes duplicates.
///
/// Board pairs lose their kicker, trips lose their kicker and flushes lose their rank. Hands of
/// other kinds pass through unchanged. The result is sorted best first.
pub(crate) fn generalize(hands: &[MadeHand], kind: MadeHandType) -> Vec<MadeHand> {
    let mut generalized: Vec<MadeHand> = hands
        .iter()
        .cloned()
        .map(|mut hand| {
            match (kind, hand.kind) {
                (MadeHandType::Pair, MadeHandType::Pair) if hand.subtype == MadeHandSubtype::BoardPair => {
                    drop_kicker(&mut hand, 2);
                }
                (MadeHandType::Trips, MadeHandType::Trips) => drop_kicker(&mut hand, 1),
                (MadeHandType::Flush, MadeHandType::Flush) => drop_flush_rank(&mut hand),
                _ => {}
            }
            hand
        })
        .collect();
    generalized.sort_by(|a, b| b.cmp(a));
    generalized.dedup();
    generalized
}

fn drop_kicker(hand: &mut MadeHand, relative_len: usize) {
    hand.absolute_rank.truncate(1);
    hand.relative_rank.truncate(relative_len);
    hand.hole.pop();
    hand.hand.pop();
}

fn drop_flush_rank(hand: &mut MadeHand) {
    hand.absolute_rank = vec![0];
    hand.relative_rank = vec![0];
    let Some(card) = hand.hole.first() else {
        return;
    };
    if let Some(suit) = card.suit() {
        let generic = Card::suit_only(suit);
        hand.hole.replace(card, generic);
        hand.hand.replace(card, generic);
        hand.hand.sort_desc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardSet, Rank, Suit};

    fn trips(kicker: u8) -> MadeHand {
        MadeHand::new(
            MadeHandType::Trips,
            MadeHandSubtype::None,
            vec![13, kicker],
            vec![1, 15 - kicker],
            CardSet::from_ranks([13, kicker]),
            CardSet::from_ranks([13, 13, 13, kicker]),
        )
    }

    #[test]
    fn test_trips_collapse_to_one_hand() {
        let hands = vec![trips(12), trips(11), trips(10)];
        let generalized = generalize(&hands, MadeHandType::Trips);
        assert_eq!(generalized.len(), 1);
        assert_eq!(generalized[0].hole.to_string(), "K");
        assert_eq!(generalized[0].absolute_rank, vec![13]);
        assert_eq!(generalized[0].relative_rank, vec![1]);
    }

    #[test]
    fn test_other_kinds_untouched() {
        let hands = vec![trips(12), trips(11)];
        let generalized = generalize(&hands, MadeHandType::Pair);
        assert_eq!(generalized, hands);
    }

    #[test]
    fn test_flush_becomes_suit_only() {
        let flush = |rank: Rank| {
            let mut hand = CardSet::new(vec![
                Card::new(Rank::Ace, Suit::Diamonds),
                Card::new(rank, Suit::Diamonds),
                Card::new(Rank::Two, Suit::Diamonds),
                Card::suit_only(Suit::Diamonds),
            ]);
            hand.sort_desc();
            MadeHand::new(
                MadeHandType::Flush,
                MadeHandSubtype::None,
                vec![rank.value()],
                vec![1],
                CardSet::new(vec![Card::new(rank, Suit::Diamonds), Card::suit_only(Suit::Diamonds)]),
                hand,
            )
        };
        let generalized = generalize(&[flush(Rank::King), flush(Rank::Queen)], MadeHandType::Flush);
        assert_eq!(generalized.len(), 1);
        assert_eq!(generalized[0].hole.to_string(), "dd");
        assert_eq!(generalized[0].absolute_rank, vec![0]);
    }
}
