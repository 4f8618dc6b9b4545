use std::process::ExitCode;

use clap::Parser;
use easy_range::board::Board;
use easy_range::deck::Deck;
use easy_range::easy_range::check_range;
use easy_range::explorer::BoardExplorer;
use easy_range::pql::Pql;
use easy_range::range_text::sub_ranges;

/// Compile easy ranges against an Omaha board.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Easy ranges to compile, e.g. "TS+" "(TP,NFD)!GS"
    #[arg(required = true)]
    ranges: Vec<String>,

    /// Board cards, e.g. Js4d2s
    #[arg(short, long, conflicts_with = "random")]
    board: Option<String>,

    /// Deal a random board of this many cards
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(3..=5))]
    random: Option<u8>,

    /// Seed for the random board
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Only check the syntax of the ranges
    #[arg(long)]
    check: bool,

    /// Exclude every earlier range from each compiled range
    #[arg(long)]
    cumulative: bool,

    /// Print a PQL query counting the compiled ranges inside this main range
    #[arg(long, value_name = "RANGE")]
    pql: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    if cli.check {
        for range in &cli.ranges {
            check_range(range).map_err(|e| e.to_string())?;
            println!("ok\t{range}");
        }
        return Ok(());
    }

    let board = board(cli)?;
    log::info!("{:<24}{}", "board", board);
    let explorer = BoardExplorer::new(board).map_err(|e| e.to_string())?;

    let compiled = cli
        .ranges
        .iter()
        .map(|range| explorer.ppt(range).map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    match &cli.pql {
        Some(main_range) => {
            let sub = sub_ranges(&compiled, cli.cumulative);
            let board = explorer.board().to_string();
            println!("{}", Pql::default().count_in_range(main_range, &sub, &board, "", &[]));
        }
        None if cli.cumulative => {
            for range in sub_ranges(&compiled, true) {
                println!("{range}");
            }
        }
        None => {
            for range in compiled {
                println!("{range}");
            }
        }
    }
    Ok(())
}

fn board(cli: &Cli) -> Result<Board, String> {
    match (&cli.board, cli.random) {
        (Some(cards), _) => cards.parse::<Board>().map_err(|e| e.to_string()),
        (None, Some(n)) => {
            let mut deck = Deck::standard();
            deck.shuffle_seeded(cli.seed);
            deck.deal_board(usize::from(n)).map_err(|e| e.to_string())
        }
        (None, None) => Err("either --board or --random is required".to_string()),
    }
}
