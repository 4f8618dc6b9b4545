//! Hand records produced by the board explorers.
//!
//! Ranks are numeric (`2..=14`, Ace high); `0` marks a generic rank. A relative rank is the
//! 1-based position of a hand among hands of the same kind on one board, `1` being the best.

use crate::cards::{CardSet, Suit};
use core::cmp::Ordering;
use std::fmt;

/// Made hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MadeHandType {
    NoPair = 0,
    Pair = 1,
    TwoPair = 2,
    Trips = 3,
    Set = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    Quads = 8,
    StraightFlush = 9,
}

impl MadeHandType {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Only pairs distinguish subtypes; every other made hand uses `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MadeHandSubtype {
    None,
    PocketPair,
    BoardPair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StraightDrawType {
    Backdoor,
    Normal,
}

/// Normal draws sort before backdoors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlushDrawType {
    Normal,
    Backdoor,
}

/// Street on which the two-flush appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlushDrawSubtype {
    Flopped,
    Turned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockerType {
    FlushBlocker,
    StraightBlocker,
    FlushDrawBlocker,
    StraightDrawBlocker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockerSubtype {
    None,
    TwoCard,
    OneCard,
    Flopped,
    Turned,
}

impl From<FlushDrawSubtype> for BlockerSubtype {
    fn from(subtype: FlushDrawSubtype) -> Self {
        match subtype {
            FlushDrawSubtype::Flopped => BlockerSubtype::Flopped,
            FlushDrawSubtype::Turned => BlockerSubtype::Turned,
        }
    }
}

/// A hand completed by two hole cards and the board.
///
/// Ordering is by kind and then absolute rank: a stronger category and higher card ranks are
/// greater. The remaining fields only break ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MadeHand {
    pub kind: MadeHandType,
    pub subtype: MadeHandSubtype,
    pub absolute_rank: Vec<u8>,
    pub relative_rank: Vec<u8>,
    /// Hole cards needed for the hand.
    pub hole: CardSet,
    /// Cards forming the hand, generic cards included.
    pub hand: CardSet,
}

impl MadeHand {
    pub fn new(
        kind: MadeHandType,
        subtype: MadeHandSubtype,
        absolute_rank: Vec<u8>,
        relative_rank: Vec<u8>,
        hole: CardSet,
        hand: CardSet,
    ) -> Self {
        Self { kind, subtype, absolute_rank, relative_rank, hole, hand }
    }
}

impl Ord for MadeHand {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.kind, &self.absolute_rank)
            .cmp(&(other.kind, &other.absolute_rank))
            .then_with(|| self.relative_rank.cmp(&other.relative_rank))
            .then_with(|| self.subtype.cmp(&other.subtype))
            .then_with(|| self.hole.cmp(&other.hole))
            .then_with(|| self.hand.cmp(&other.hand))
    }
}

impl PartialOrd for MadeHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A straight draw keyed by the ranks a player must hold.
///
/// `outs` are the ranks that complete a straight and `nut_outs` the subset that completes the
/// best straight possible on the resulting board. All rank lists are kept highest first with
/// no repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StraightDraw {
    pub kind: StraightDrawType,
    hole_ranks: Vec<u8>,
    outs: Vec<u8>,
    nut_outs: Vec<u8>,
}

fn desc_set(mut ranks: Vec<u8>) -> Vec<u8> {
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    ranks.dedup();
    ranks
}

impl StraightDraw {
    pub fn new(kind: StraightDrawType, hole_ranks: Vec<u8>, outs: Vec<u8>, nut_outs: Vec<u8>) -> Self {
        let mut hole_ranks = hole_ranks;
        hole_ranks.sort_unstable_by(|a, b| b.cmp(a));
        Self { kind, hole_ranks, outs: desc_set(outs), nut_outs: desc_set(nut_outs) }
    }

    pub fn hole_ranks(&self) -> &[u8] {
        &self.hole_ranks
    }

    pub fn outs(&self) -> &[u8] {
        &self.outs
    }

    pub fn nut_outs(&self) -> &[u8] {
        &self.nut_outs
    }

    pub fn hole(&self) -> CardSet {
        CardSet::from_ranks(self.hole_ranks.iter().copied())
    }

    pub fn add_outs(&mut self, outs: &[u8]) {
        let mut all = std::mem::take(&mut self.outs);
        all.extend_from_slice(outs);
        self.outs = desc_set(all);
    }

    /// Nut outs are outs too.
    pub fn add_nut_outs(&mut self, nut_outs: &[u8]) {
        self.add_outs(nut_outs);
        let mut all = std::mem::take(&mut self.nut_outs);
        all.extend_from_slice(nut_outs);
        self.nut_outs = desc_set(all);
    }

    /// Cards that complete the draw: four per rank, minus the ones already in the hand.
    pub fn count_outs(&self) -> usize {
        self.weighted(&self.outs)
    }

    pub fn count_nut_outs(&self) -> usize {
        self.weighted(&self.nut_outs)
    }

    fn weighted(&self, ranks: &[u8]) -> usize {
        let held = ranks.iter().filter(|r| self.hole_ranks.contains(r)).count();
        ranks.len() * 4 - held
    }
}

impl Ord for StraightDraw {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.kind, self.count_outs(), self.count_nut_outs(), &self.hole_ranks)
            .cmp(&(other.kind, other.count_outs(), other.count_nut_outs(), &other.hole_ranks))
            .then_with(|| self.outs.cmp(&other.outs))
            .then_with(|| self.nut_outs.cmp(&other.nut_outs))
    }
}

impl PartialOrd for StraightDraw {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A flush draw: the suited card to hold plus a generic card of the same suit.
///
/// A draw is greater when it is closer to the nuts: normal before backdoor, lower relative rank,
/// flopped before turned, then suit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushDraw {
    pub kind: FlushDrawType,
    pub subtype: FlushDrawSubtype,
    pub absolute_rank: Vec<u8>,
    pub relative_rank: Vec<u8>,
    pub hole: CardSet,
}

impl FlushDraw {
    pub fn new(
        kind: FlushDrawType,
        subtype: FlushDrawSubtype,
        absolute_rank: Vec<u8>,
        relative_rank: Vec<u8>,
        hole: CardSet,
    ) -> Self {
        Self { kind, subtype, absolute_rank, relative_rank, hole }
    }

    fn key(&self) -> (FlushDrawType, &[u8], FlushDrawSubtype, Option<Suit>) {
        let suit = self.hole.first().and_then(|c| c.suit());
        (self.kind, &self.relative_rank, self.subtype, suit)
    }
}

impl Ord for FlushDraw {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key()
            .cmp(&self.key())
            .then_with(|| self.absolute_rank.cmp(&other.absolute_rank))
            .then_with(|| self.hole.cmp(&other.hole))
    }
}

impl PartialOrd for FlushDraw {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Holding cards that take a made hand or a draw away from opponents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blocker {
    pub kind: BlockerType,
    pub subtype: BlockerSubtype,
    pub absolute_rank: Vec<u8>,
    pub relative_rank: Vec<u8>,
    pub hole: CardSet,
}

impl Blocker {
    pub fn new(
        kind: BlockerType,
        subtype: BlockerSubtype,
        absolute_rank: Vec<u8>,
        relative_rank: Vec<u8>,
        hole: CardSet,
    ) -> Self {
        Self { kind, subtype, absolute_rank, relative_rank, hole }
    }

    /// 1 for an ace, 13 for a deuce.
    fn rank_index(&self) -> u8 {
        15 - self.absolute_rank.first().copied().unwrap_or(0)
    }
}

impl Ord for Blocker {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flush draw blockers rank by draw before subtype; the rest by subtype first.
        let by_key = if self.kind == BlockerType::FlushDrawBlocker {
            (&other.relative_rank, other.subtype, other.rank_index()).cmp(&(
                &self.relative_rank,
                self.subtype,
                self.rank_index(),
            ))
        } else {
            (other.subtype, &other.relative_rank, other.rank_index()).cmp(&(
                self.subtype,
                &self.relative_rank,
                self.rank_index(),
            ))
        };
        other
            .kind
            .cmp(&self.kind)
            .then(by_key)
            .then_with(|| self.hole.cmp(&other.hole))
            .then_with(|| self.absolute_rank.cmp(&other.absolute_rank))
    }
}

impl PartialOrd for Blocker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Any record a board query can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hand {
    Made(MadeHand),
    StraightDraw(StraightDraw),
    FlushDraw(FlushDraw),
    Blocker(Blocker),
}

impl Hand {
    /// Hole cards in range-language form.
    pub fn hole(&self) -> CardSet {
        match self {
            Hand::Made(h) => h.hole.clone(),
            Hand::StraightDraw(d) => d.hole(),
            Hand::FlushDraw(d) => d.hole.clone(),
            Hand::Blocker(b) => b.hole.clone(),
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hole())
    }
}

impl fmt::Display for StraightDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "straight draw {} outs {} nut outs {} ({}/{})",
            self.hole(),
            CardSet::from_ranks(self.outs.iter().copied()),
            CardSet::from_ranks(self.nut_outs.iter().copied()),
            self.count_outs(),
            self.count_nut_outs()
        )
    }
}
