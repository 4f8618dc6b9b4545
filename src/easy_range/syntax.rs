use crate::explorer::{
    BlockerSubtype, BlockerType, FlushDrawSubtype, FlushDrawType, Family, MadeHandSubtype, MadeHandType,
    StraightDrawType, Target,
};

/// One mnemonic of the easy-range language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxEntry {
    pub mnemonic: &'static str,
    pub target: Target,
    /// Relative rank used when the user gives none; `[0]` asks for generic hands.
    pub fixed_rank: Option<&'static [u8]>,
    /// Leading relative-rank components the user's numbers are appended to.
    pub prefix: Option<&'static [u8]>,
    /// Always query the hand and everything better.
    pub and_better: bool,
    /// Accepted counts of numeric components. Empty when the mnemonic cannot be typed.
    pub arities: &'static [u8],
}

impl SyntaxEntry {
    /// Relative rank to query with, given the numbers typed after the mnemonic.
    ///
    /// ```
    /// use easy_range::easy_range::syntax::lookup;
    ///
    /// let mp = lookup("MP").unwrap();
    /// assert_eq!(mp.resolve_rank(None), Some(vec![2]));
    /// assert_eq!(mp.resolve_rank(Some(&[1])), Some(vec![2, 1]));
    /// assert_eq!(lookup("FH").unwrap().resolve_rank(Some(&[2])), Some(vec![2]));
    /// assert_eq!(lookup("SD").unwrap().resolve_rank(None), None);
    /// ```
    pub fn resolve_rank(&self, typed: Option<&[u8]>) -> Option<Vec<u8>> {
        match (typed, self.prefix) {
            (None, _) => self.fixed_rank.or(self.prefix).map(<[u8]>::to_vec),
            (Some(typed), Some(prefix)) => Some([prefix, typed].concat()),
            (Some(typed), None) => Some(typed.to_vec()),
        }
    }

    pub fn family(&self) -> Family {
        self.target.family()
    }
}

const fn made(kind: MadeHandType, subtype: MadeHandSubtype) -> Target {
    Target::MadeHand { kind, subtype }
}

const fn flush_draw(kind: FlushDrawType, subtype: Option<FlushDrawSubtype>) -> Target {
    Target::FlushDraw { kind, subtype }
}

const fn blocker(kind: BlockerType, subtype: Option<BlockerSubtype>) -> Target {
    Target::Blocker { kind, subtype }
}

const fn entry(
    mnemonic: &'static str,
    target: Target,
    fixed_rank: Option<&'static [u8]>,
    prefix: Option<&'static [u8]>,
    arities: &'static [u8],
) -> SyntaxEntry {
    SyntaxEntry { mnemonic, target, fixed_rank, prefix, and_better: false, arities }
}

const GENERIC: Option<&'static [u8]> = Some(&[0]);
const NUT: Option<&'static [u8]> = Some(&[1]);

/// Every mnemonic with its query. Order decides which entry wins a tie in the parser.
pub static SYNTAX: &[SyntaxEntry] = &[
    SyntaxEntry {
        mnemonic: "WRAP",
        target: Target::StraightDraw(StraightDrawType::Normal),
        fixed_rank: Some(&[13, 0]),
        prefix: None,
        and_better: true,
        arities: &[0],
    },
    entry("OESD", Target::StraightDraw(StraightDrawType::Normal), Some(&[8, 0]), None, &[0]),
    entry("SD", Target::StraightDraw(StraightDrawType::Normal), None, None, &[1, 2]),
    entry("GS", Target::StraightDraw(StraightDrawType::Normal), Some(&[4, 0]), None, &[0]),
    entry("BSD", Target::StraightDraw(StraightDrawType::Backdoor), None, None, &[]),
    entry("StrF", made(MadeHandType::StraightFlush, MadeHandSubtype::None), GENERIC, None, &[]),
    entry("Q", made(MadeHandType::Quads, MadeHandSubtype::None), GENERIC, None, &[1]),
    entry("FH", made(MadeHandType::FullHouse, MadeHandSubtype::None), GENERIC, None, &[0, 1]),
    entry("F", made(MadeHandType::Flush, MadeHandSubtype::None), GENERIC, None, &[0, 1]),
    entry("Str", made(MadeHandType::Straight, MadeHandSubtype::None), None, None, &[1]),
    entry("TS", made(MadeHandType::Set, MadeHandSubtype::None), None, Some(&[1]), &[0]),
    entry("S", made(MadeHandType::Set, MadeHandSubtype::None), None, None, &[1]),
    entry("BS", made(MadeHandType::Set, MadeHandSubtype::None), None, Some(&[5]), &[0]),
    entry("MS", made(MadeHandType::Set, MadeHandSubtype::None), None, Some(&[2]), &[0]),
    entry("Tr", made(MadeHandType::Trips, MadeHandSubtype::None), GENERIC, None, &[0, 2]),
    entry("2P", made(MadeHandType::TwoPair, MadeHandSubtype::None), None, None, &[0, 2]),
    entry("T2P", made(MadeHandType::TwoPair, MadeHandSubtype::None), Some(&[1, 2]), None, &[0]),
    entry("TB2P", made(MadeHandType::TwoPair, MadeHandSubtype::None), Some(&[1, 3]), None, &[0]),
    entry("MP", made(MadeHandType::Pair, MadeHandSubtype::BoardPair), None, Some(&[2]), &[0, 1]),
    entry("PB", made(MadeHandType::Pair, MadeHandSubtype::BoardPair), None, None, &[1, 2]),
    entry("P", made(MadeHandType::Pair, MadeHandSubtype::None), None, None, &[1]),
    entry("PP", made(MadeHandType::Pair, MadeHandSubtype::PocketPair), None, None, &[1, 2]),
    entry("BP", made(MadeHandType::Pair, MadeHandSubtype::BoardPair), None, Some(&[3]), &[0, 1]),
    entry("TP", made(MadeHandType::Pair, MadeHandSubtype::BoardPair), None, Some(&[1]), &[0, 1]),
    entry("OP", made(MadeHandType::Pair, MadeHandSubtype::PocketPair), None, Some(&[1]), &[0, 1]),
    entry("NBFD", flush_draw(FlushDrawType::Backdoor, None), NUT, None, &[0]),
    entry("BFD", flush_draw(FlushDrawType::Backdoor, None), None, None, &[1]),
    entry("FDF", flush_draw(FlushDrawType::Normal, Some(FlushDrawSubtype::Flopped)), None, None, &[0, 1]),
    entry("NFD", flush_draw(FlushDrawType::Normal, None), NUT, None, &[0]),
    entry("FD", flush_draw(FlushDrawType::Normal, None), None, None, &[0, 1]),
    entry("FDT", flush_draw(FlushDrawType::Normal, Some(FlushDrawSubtype::Turned)), None, None, &[0, 1]),
    entry("SDB", blocker(BlockerType::StraightDrawBlocker, Some(BlockerSubtype::TwoCard)), None, None, &[1]),
    entry("SDBO", blocker(BlockerType::StraightDrawBlocker, Some(BlockerSubtype::OneCard)), None, None, &[1]),
    entry("NFDB", blocker(BlockerType::FlushDrawBlocker, None), NUT, None, &[0]),
    entry("FDB", blocker(BlockerType::FlushDrawBlocker, None), None, None, &[1]),
    entry("SB", blocker(BlockerType::StraightBlocker, Some(BlockerSubtype::TwoCard)), None, None, &[1]),
    entry("NSB", blocker(BlockerType::StraightBlocker, Some(BlockerSubtype::TwoCard)), NUT, None, &[1]),
    entry("NFB", blocker(BlockerType::FlushBlocker, None), NUT, None, &[0]),
    entry("FB", blocker(BlockerType::FlushBlocker, None), None, None, &[1]),
];

/// Entry for a mnemonic, ignoring case.
pub fn lookup(mnemonic: &str) -> Option<&'static SyntaxEntry> {
    SYNTAX.iter().find(|e| e.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// Entries of `family` typed with `arity` numbers.
pub(crate) fn group(arity: u8, family: Family) -> Vec<&'static SyntaxEntry> {
    SYNTAX.iter().filter(|e| e.family() == family && e.arities.contains(&arity)).collect()
}
