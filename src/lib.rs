//! easy-range: board texture explorer and easy-range compiler for Omaha ranges
//!
//! Goals:
//! - Classify every made hand, draw and blocker two hole cards can have on a board
//! - Compile short mnemonics (`TS+`, `NFD`, `SD12+`) into range-language text
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: compile an easy range
//! ```
//! use easy_range::board::Board;
//! use easy_range::explorer::BoardExplorer;
//!
//! let board: Board = "Js4d2s".parse().unwrap();
//! let explorer = BoardExplorer::new(board).unwrap();
//!
//! assert!(explorer.has_flopped_flush_draw());
//! assert_eq!(explorer.ppt("OP+").unwrap(), "(JJ,44,22,J4,J2,42,AA,KK,QQ)");
//! assert_eq!(explorer.ppt("(TP,NFD)!GS").unwrap(), "(J,Ass)!(65,63,A5,A3)");
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --bin easy-range -- --board Js4d2s "OP+" "NFD"
//! ```

pub mod board;
pub mod cards;
pub mod deck;
pub mod easy_range;
pub mod explorer;
pub mod pql;
pub mod range_text;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
