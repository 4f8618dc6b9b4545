//! PQL query text for an external equity oracle.
//!
//! Only the query text is built here; sending it and reading the answer is up to the caller.

/// Query builder for one game and range syntax.
///
/// ```
/// use easy_range::pql::Pql;
///
/// let pql = Pql::default();
/// let query = pql.hero_equity("AsKsQh2c", &["AA"], "Ad7s3h", "");
/// assert_eq!(
///     query,
///     "select avg(riverEquity(hero)) as EQ \n\
///      from game='omahahi', syntax='Generic',\n\
///      \tboard='Ad7s3h',\n\
///      \thero='AsKsQh2c',\n\
///      \tplayer_1='AA'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pql {
    game: String,
    syntax: String,
}

impl Default for Pql {
    fn default() -> Self {
        Self::new("omahahi", "Generic")
    }
}

impl Pql {
    pub fn new(game: impl Into<String>, syntax: impl Into<String>) -> Self {
        Self { game: game.into(), syntax: syntax.into() }
    }

    pub fn game(&self) -> &str {
        &self.game
    }

    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    /// Hero's average river equity against `villains`.
    pub fn hero_equity<S: AsRef<str>>(&self, hero: &str, villains: &[S], board: &str, dead: &str) -> String {
        self.query("avg(riverEquity(hero)) as EQ", board, dead, Some(hero), villains)
    }

    /// How often each of `sub_ranges` is hit by `main_range`, which plays as player 1 ahead of
    /// `others`.
    pub fn count_in_range<S: AsRef<str>>(
        &self,
        main_range: &str,
        sub_ranges: &[S],
        board: &str,
        dead: &str,
        others: &[S],
    ) -> String {
        let selectors = sub_ranges
            .iter()
            .map(|sub| format!("count(inRange(player_1,'{}'))", sub.as_ref()))
            .collect::<Vec<_>>()
            .join(",\n\t");
        let mut players: Vec<&str> = vec![main_range];
        players.extend(others.iter().map(AsRef::as_ref));
        self.query(&selectors, board, dead, None, &players)
    }

    /// Average river equity of every player.
    pub fn equity<S: AsRef<str>>(&self, players: &[S], board: &str, dead: &str) -> String {
        let selectors = (1..=players.len())
            .map(|n| format!("avg(riverEquity(player_{n}))"))
            .collect::<Vec<_>>()
            .join(",\n\t");
        self.query(&selectors, board, dead, None, players)
    }

    fn query<S: AsRef<str>>(&self, selectors: &str, board: &str, dead: &str, hero: Option<&str>, players: &[S]) -> String {
        let mut from = vec![format!("from game='{}', syntax='{}'", self.game, self.syntax)];
        if !board.is_empty() {
            from.push(format!("\tboard='{board}'"));
        }
        if !dead.is_empty() {
            from.push(format!("\tdead='{dead}'"));
        }
        if let Some(hero) = hero.filter(|h| !h.is_empty()) {
            from.push(format!("\thero='{hero}'"));
        }
        for (number, player) in players.iter().enumerate() {
            from.push(format!("\tplayer_{}='{}'", number + 1, player.as_ref()));
        }
        let query = format!("select {selectors} \n{}", from.join(",\n"));
        log::trace!("{:<24}{}", "pql query", query.replace('\n', " "));
        query
    }
}
