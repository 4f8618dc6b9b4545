//! Board exploration: every made hand, draw and blocker two hole cards can have on a board.
//!
//! [`BoardExplorer`] computes all lists once when it is built and answers ranked queries
//! against them. Queries never fail; a hand that does not exist on the board gives an empty
//! list.
//!
//! ```
//! use easy_range::explorer::{BoardExplorer, MadeHandSubtype, MadeHandType, Strictness};
//!
//! let explorer: BoardExplorer = "AdKc7h8s3s".parse().unwrap();
//! let sets = explorer.find_made_hands(
//!     MadeHandType::Set,
//!     MadeHandSubtype::None,
//!     Some(&[3]),
//!     Strictness::ThatAndBetter,
//! );
//! let holes: Vec<String> = sets.iter().map(|h| h.hole.to_string()).collect();
//! assert_eq!(holes, ["AA", "KK", "88"]);
//! ```

pub(crate) mod combinations;
pub(crate) mod flush_draws;
pub(crate) mod generalize;
pub mod hands;
pub(crate) mod made_hands;
pub(crate) mod straight_draws;
pub(crate) mod straights;

pub use hands::{
    Blocker, BlockerSubtype, BlockerType, FlushDraw, FlushDrawSubtype, FlushDrawType, Hand, MadeHand,
    MadeHandSubtype, MadeHandType, StraightDraw, StraightDrawType,
};

use crate::board::{Board, BoardError};
use crate::cards::{Card, CardSet};
use crate::easy_range::{self, EasyRangeError};
use combinations::combinations;
use flush_draws::FlushDrawExplorer;
use generalize::generalize;
use made_hands::MadeHandExplorer;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use straight_draws::StraightDrawExplorer;
use straights::StraightExplorer;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExploreError {
    #[error("board must have at least 3 cards to explore, got {0}")]
    TooFewCards(usize),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// How much of the ranking a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strictness {
    /// The requested hand, or the next worse one when it does not exist.
    #[default]
    OnlyThat,
    /// The requested hand and everything ranked above it.
    ThatAndBetter,
    /// Everything of the family except what `OnlyThat` selects.
    AllButThat,
}

/// Hand families a query can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    MadeHand,
    StraightDraw,
    FlushDraw,
    Blocker,
}

/// Family plus the type and subtype filters of a query.
///
/// A `None` subtype on draws and blockers means any subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    MadeHand { kind: MadeHandType, subtype: MadeHandSubtype },
    StraightDraw(StraightDrawType),
    FlushDraw { kind: FlushDrawType, subtype: Option<FlushDrawSubtype> },
    Blocker { kind: BlockerType, subtype: Option<BlockerSubtype> },
}

impl Target {
    pub const fn family(self) -> Family {
        match self {
            Target::MadeHand { .. } => Family::MadeHand,
            Target::StraightDraw(_) => Family::StraightDraw,
            Target::FlushDraw { .. } => Family::FlushDraw,
            Target::Blocker { .. } => Family::Blocker,
        }
    }
}

/// Texture and hand lists for one board, computed eagerly.
#[derive(Debug, Clone)]
pub struct BoardExplorer {
    board: Board,
    straights: StraightExplorer,
    straight_draws: StraightDrawExplorer,
    flush_draws: FlushDrawExplorer,
    made_hands: MadeHandExplorer,
}

impl BoardExplorer {
    pub fn new(board: Board) -> Result<Self, ExploreError> {
        if board.len() < 3 {
            return Err(ExploreError::TooFewCards(board.len()));
        }
        let unique = board.unique_ranks();
        let remaining = board.remaining_ranks();
        let straights = StraightExplorer::new(&unique, &remaining);
        let straight_draws = StraightDrawExplorer::new(&board.ranks(), &remaining, &straights.holes());
        let flush_draws = FlushDrawExplorer::new(&board);
        let made_hands = MadeHandExplorer::new(&board, &straights.straights);
        log::debug!("{:<24}{} ({} straights)", "explored board", board, straights.straights.len());
        Ok(Self { board, straights, straight_draws, flush_draws, made_hands })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_paired(&self) -> bool {
        self.made_hands.is_paired()
    }

    pub fn is_straighted(&self) -> bool {
        !self.straights.straights.is_empty()
    }

    pub fn is_flushed(&self) -> bool {
        self.flush_draws.is_flushed
    }

    /// No suit appears exactly twice, so no flush draw exists.
    pub fn is_rainbow(&self) -> bool {
        self.flush_draws.is_rainbow
    }

    pub fn has_flopped_flush_draw(&self) -> bool {
        self.flush_draws.has_flopped_flush_draw
    }

    pub fn has_turned_flush_draw(&self) -> bool {
        self.flush_draws.has_turned_flush_draw
    }

    /// Every made hand, best first.
    pub fn made_hands(&self) -> &[MadeHand] {
        &self.made_hands.made_hands
    }

    pub fn straights(&self) -> &[MadeHand] {
        &self.straights.straights
    }

    pub fn flushes(&self) -> &[MadeHand] {
        &self.made_hands.flushes
    }

    pub fn straight_draws(&self) -> &[StraightDraw] {
        &self.straight_draws.draws
    }

    pub fn backdoor_straight_draws(&self) -> &[StraightDraw] {
        &self.straight_draws.backdoors
    }

    pub fn flush_draws(&self) -> &[FlushDraw] {
        &self.flush_draws.draws
    }

    pub fn backdoor_flush_draws(&self) -> &[FlushDraw] {
        &self.flush_draws.backdoors
    }

    pub fn flush_blockers(&self) -> &[Blocker] {
        &self.made_hands.flush_blockers
    }

    pub fn straight_blockers(&self) -> &[Blocker] {
        &self.straights.blockers
    }

    pub fn flush_draw_blockers(&self) -> &[Blocker] {
        &self.flush_draws.blockers
    }

    pub fn straight_draw_blockers(&self) -> &[Blocker] {
        &self.straight_draws.blockers
    }

    /// Made hands of `kind` and `subtype` at `relative_rank`.
    ///
    /// A relative rank of `[0]`, a missing kicker position for trips, two pairs and pairs, or a
    /// plain pair query returns generalized hands: kickers and flush ranks are dropped and
    /// duplicates removed. `None` matches any rank.
    pub fn find_made_hands(
        &self,
        kind: MadeHandType,
        subtype: MadeHandSubtype,
        relative_rank: Option<&[u8]>,
        strictness: Strictness,
    ) -> Vec<MadeHand> {
        let query = MadeHandQuery::new(kind, subtype, relative_rank);
        let made_hands = self.made_hands();
        match strictness {
            Strictness::AllButThat => {
                let only_that = query.select(made_hands, false);
                without(made_hands, &only_that)
            }
            _ => {
                let selected = query.select(made_hands, strictness == Strictness::ThatAndBetter);
                if query.generalize && !selected.is_empty() {
                    generalize(&selected, kind)
                } else {
                    selected
                }
            }
        }
    }

    /// Straight draws with at least the requested `(outs, nut outs)` card counts.
    ///
    /// `OnlyThat` returns every draw tied with the weakest qualifying one. A draw whose hole
    /// ranks contain a smaller draw from the result is dropped.
    pub fn find_straight_draws(
        &self,
        kind: StraightDrawType,
        relative_rank: Option<&[u8]>,
        strictness: Strictness,
    ) -> Vec<StraightDraw> {
        let all = match kind {
            StraightDrawType::Normal => self.straight_draws(),
            StraightDrawType::Backdoor => self.backdoor_straight_draws(),
        };
        let rank = relative_rank.unwrap_or(&[]);
        let outs = usize::from(rank.first().copied().unwrap_or(0));
        let nut_outs = usize::from(rank.get(1).copied().unwrap_or(0));

        let mut searchable = all.to_vec();
        if nut_outs > 0 {
            searchable.sort_by(|a, b| {
                (b.count_nut_outs(), b.count_outs()).cmp(&(a.count_nut_outs(), a.count_outs()))
            });
        }
        let qualifies = |d: &StraightDraw| d.count_outs() >= outs && (nut_outs == 0 || d.count_nut_outs() >= nut_outs);
        let Some(index) = searchable.iter().rposition(qualifies) else {
            return if strictness == Strictness::AllButThat { all.to_vec() } else { Vec::new() };
        };

        let selected: Vec<&StraightDraw> = if strictness == Strictness::ThatAndBetter {
            searchable[..=index].iter().collect()
        } else {
            let (first_outs, first_nut_outs) = (searchable[index].count_outs(), searchable[index].count_nut_outs());
            searchable[..=index]
                .iter()
                .rev()
                .take_while(|d| d.count_outs() == first_outs && (nut_outs == 0 || d.count_nut_outs() == first_nut_outs))
                .collect()
        };
        let mut by_ranks: BTreeMap<Vec<u8>, StraightDraw> =
            selected.into_iter().map(|d| (d.hole_ranks().to_vec(), d.clone())).collect();
        remove_excess_draws(&mut by_ranks);

        if strictness == Strictness::AllButThat {
            return all.iter().filter(|d| !by_ranks.contains_key(d.hole_ranks())).cloned().collect();
        }
        let mut draws: Vec<StraightDraw> = by_ranks.into_values().collect();
        draws.sort_by(|a, b| b.cmp(a));
        draws
    }

    /// Flush draws of `kind`; `None` for `relative_rank` gives one suit-only draw per street.
    pub fn find_flush_draws(
        &self,
        kind: FlushDrawType,
        subtype: Option<FlushDrawSubtype>,
        relative_rank: Option<&[u8]>,
        strictness: Strictness,
    ) -> Vec<FlushDraw> {
        let searchable = match kind {
            FlushDrawType::Normal => self.flush_draws(),
            FlushDrawType::Backdoor => self.backdoor_flush_draws(),
        };
        let subtype_matches = |d: &FlushDraw| subtype.map_or(true, |s| d.subtype == s);

        let Some(rank) = relative_rank else {
            if strictness == Strictness::AllButThat {
                return searchable.iter().filter(|d| !subtype_matches(d)).cloned().collect();
            }
            return [FlushDrawSubtype::Flopped, FlushDrawSubtype::Turned]
                .into_iter()
                .filter(|&street| subtype.map_or(true, |s| s == street))
                .filter_map(|street| searchable.iter().find(|d| d.subtype == street))
                .filter_map(generic_flush_draw)
                .collect();
        };
        searchable
            .iter()
            .filter(|d| {
                let rank_matches = match strictness {
                    Strictness::ThatAndBetter => d.relative_rank.as_slice() <= rank,
                    _ => d.relative_rank == rank,
                };
                let selected = subtype_matches(d) && rank_matches;
                if strictness == Strictness::AllButThat {
                    !selected
                } else {
                    selected
                }
            })
            .cloned()
            .collect()
    }

    /// Blockers of `kind`, optionally limited to `subtype` and `relative_rank`.
    pub fn find_blockers(
        &self,
        kind: BlockerType,
        subtype: Option<BlockerSubtype>,
        relative_rank: Option<&[u8]>,
        strictness: Strictness,
    ) -> Vec<Blocker> {
        let searchable = match kind {
            BlockerType::FlushBlocker => self.flush_blockers(),
            BlockerType::StraightBlocker => self.straight_blockers(),
            BlockerType::FlushDrawBlocker => self.flush_draw_blockers(),
            BlockerType::StraightDrawBlocker => self.straight_draw_blockers(),
        };
        searchable
            .iter()
            .filter(|b| {
                let rank_matches = match (relative_rank, strictness) {
                    (None, _) => true,
                    (Some(rank), Strictness::ThatAndBetter) => b.relative_rank.as_slice() <= rank,
                    (Some(rank), _) => b.relative_rank == rank,
                };
                let selected = b.kind == kind && subtype.map_or(true, |s| b.subtype == s) && rank_matches;
                if strictness == Strictness::AllButThat {
                    !selected
                } else {
                    selected
                }
            })
            .cloned()
            .collect()
    }

    /// Dispatches a query to the finder of the target's family.
    pub fn find(&self, target: Target, relative_rank: Option<&[u8]>, strictness: Strictness) -> Vec<Hand> {
        match target {
            Target::MadeHand { kind, subtype } => self
                .find_made_hands(kind, subtype, relative_rank, strictness)
                .into_iter()
                .map(Hand::Made)
                .collect(),
            Target::StraightDraw(kind) => self
                .find_straight_draws(kind, relative_rank, strictness)
                .into_iter()
                .map(Hand::StraightDraw)
                .collect(),
            Target::FlushDraw { kind, subtype } => self
                .find_flush_draws(kind, subtype, relative_rank, strictness)
                .into_iter()
                .map(Hand::FlushDraw)
                .collect(),
            Target::Blocker { kind, subtype } => self
                .find_blockers(kind, subtype, relative_rank, strictness)
                .into_iter()
                .map(Hand::Blocker)
                .collect(),
        }
    }

    /// Compiles an easy range for this board into range-language text.
    ///
    /// ```
    /// use easy_range::explorer::BoardExplorer;
    ///
    /// let explorer: BoardExplorer = "Js4d2s".parse().unwrap();
    /// assert_eq!(explorer.ppt("OP").unwrap(), "(AA,KK,QQ)");
    /// assert_eq!(explorer.ppt("NFD").unwrap(), "Ass");
    /// assert!(explorer.ppt("YB").is_err());
    /// ```
    pub fn ppt(&self, easy_range: &str) -> Result<String, EasyRangeError> {
        easy_range::compile(self, easy_range)
    }
}

impl FromStr for BoardExplorer {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardExplorer::new(s.parse()?)
    }
}

impl fmt::Display for BoardExplorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardExplorer({})", self.board)
    }
}

/// Resolved made-hand query.
struct MadeHandQuery {
    kind: MadeHandType,
    subtype: MadeHandSubtype,
    relative_rank: Option<Vec<u8>>,
    generalize: bool,
}

impl MadeHandQuery {
    fn new(kind: MadeHandType, subtype: MadeHandSubtype, relative_rank: Option<&[u8]>) -> Self {
        let two_rank = matches!(kind, MadeHandType::Trips | MadeHandType::TwoPair)
            || matches!(subtype, MadeHandSubtype::BoardPair | MadeHandSubtype::PocketPair);
        let mut generalize = match relative_rank {
            Some(rank) if two_rank && rank.len() < 2 => true,
            _ => kind == MadeHandType::Pair && subtype == MadeHandSubtype::None,
        };
        let mut relative_rank = relative_rank.map(<[u8]>::to_vec);
        if relative_rank.as_deref() == Some(&[0]) {
            generalize = true;
            relative_rank = None;
        }
        Self { kind, subtype, relative_rank, generalize }
    }

    /// Part of a hand's relative rank that the requested rank is compared with.
    fn window<'a>(&self, hand: &'a MadeHand) -> &'a [u8] {
        let rank = hand.relative_rank.as_slice();
        match (self.kind, self.subtype) {
            (MadeHandType::Pair, MadeHandSubtype::None) => &rank[..rank.len().min(1)],
            (MadeHandType::Pair, _) => {
                let start = rank.len().min(1);
                let end = if self.generalize { rank.len().min(2) } else { rank.len() };
                &rank[start..end.max(start)]
            }
            _ => rank,
        }
    }

    fn is_that_or_better(&self, hand: &MadeHand) -> bool {
        hand.kind > self.kind
            || (hand.kind == self.kind && self.relative_rank.as_deref().map_or(true, |rank| self.window(hand) <= rank))
    }

    fn is_only_that(&self, hand: &MadeHand) -> bool {
        hand.kind == self.kind
            && hand.subtype == self.subtype
            && self.relative_rank.as_deref().map_or(true, |rank| self.window(hand) == rank)
    }

    /// Hands down to the last one at least as good as the request, then narrowed to exact
    /// matches unless `and_better`. Without an exact match the weakest of those hands is kept.
    fn select(&self, made_hands: &[MadeHand], and_better: bool) -> Vec<MadeHand> {
        let skipped = match self.subtype {
            MadeHandSubtype::BoardPair => Some(MadeHandSubtype::PocketPair),
            MadeHandSubtype::PocketPair => Some(MadeHandSubtype::BoardPair),
            MadeHandSubtype::None => None,
        };
        let last = made_hands
            .iter()
            .filter(|h| Some(h.subtype) != skipped)
            .take_while(|h| self.is_that_or_better(h))
            .last();
        let Some(end) = last.and_then(|last| made_hands.iter().position(|h| h == last)) else {
            return Vec::new();
        };
        let founded = &made_hands[..=end];
        if and_better {
            return founded.to_vec();
        }

        let mut ascending = founded.to_vec();
        ascending.sort();
        let mut exact: Vec<MadeHand> = ascending.into_iter().take_while(|h| self.is_only_that(h)).collect();
        if exact.is_empty() {
            founded.last().cloned().into_iter().collect()
        } else {
            exact.sort_by(|a, b| b.cmp(a));
            exact
        }
    }
}

/// `all` with one occurrence of every hand in `removed` taken out.
fn without(all: &[MadeHand], removed: &[MadeHand]) -> Vec<MadeHand> {
    let mut remaining = all.to_vec();
    for hand in removed {
        if let Some(index) = remaining.iter().position(|h| h == hand) {
            remaining.remove(index);
        }
    }
    remaining
}

/// Drops multi-rank draws that contain a smaller draw of the same result.
fn remove_excess_draws(draws: &mut BTreeMap<Vec<u8>, StraightDraw>) {
    let excess: Vec<Vec<u8>> = draws
        .keys()
        .filter(|ranks| {
            let smaller = match ranks.len() {
                4 => 2..=3,
                3 => 2..=2,
                _ => return false,
            };
            smaller.into_iter().any(|size| combinations(ranks.as_slice(), size).any(|sub| draws.contains_key(&sub)))
        })
        .cloned()
        .collect();
    for ranks in excess {
        draws.remove(&ranks);
    }
}

fn generic_flush_draw(draw: &FlushDraw) -> Option<FlushDraw> {
    let suit = draw.hole.first()?.suit()?;
    Some(FlushDraw::new(
        draw.kind,
        draw.subtype,
        vec![0],
        vec![0],
        CardSet::new(vec![Card::suit_only(suit); 2]),
    ))
}
