use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
#[cfg(feature = "perft")]
use chesslink::game::perft::PerftConfig;
use chesslink::{
    game::{action::PcnMove, playout::random_playout, position::Position, square::Square},
    session::Game,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// Starting position as a FEN string
    #[arg(short, long, global = true, conflicts_with = "url")]
    fen: Option<String>,
    /// Shared link to load the starting position from
    #[arg(short, long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shows the board, its FEN and the game status (DEFAULT)
    Show,
    /// Lists the legal moves
    Moves {
        /// Only lists moves of the piece on this square
        #[arg(long)]
        from: Option<Square>,
    },
    /// Plays moves in coordinate notation (e.g. e2e4), then prints the link to share
    Play {
        #[arg(required = true)]
        moves: Vec<PcnMove>,
        /// Address the shared link points to
        #[arg(long, default_value = "https://chesslink.invalid/")]
        base_url: String,
    },
    /// Runs perft (generating all moves up to a certain depth)
    Perft {
        /// Maximum depth to reach
        depth: u8,
        /// Shows move count for each move from the starting position
        #[arg(short)]
        divide: bool,
        /// Generates moves for each depth up to the maximum
        #[arg(short)]
        iterative: bool,
        /// Show timing information
        #[arg(long)]
        bench: bool,
        /// Counts legal moves at horizon nodes instead of playing each of them
        #[arg(short)]
        bulk: bool,

        /// Does not show the board and other decorations
        #[arg(long)]
        no_board: bool,
    },
    /// Plays random legal moves until the game ends
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
}

fn load_game(fen: Option<String>, url: Option<String>) -> Result<Game> {
    match (fen, url) {
        (Some(fen), _) => {
            let position: Position = fen
                .parse()
                .with_context(|| format!("Invalid FEN {fen:?}"))?;
            Ok(Game::from_position(position))
        }
        (None, Some(url)) => Ok(Game::from_url(&url)),
        (None, None) => Ok(Game::new()),
    }
}

fn run(args: Arguments) -> Result<()> {
    let mut game = load_game(args.fen, args.url)?;

    match args.command.unwrap_or(Command::Show) {
        Command::Show => {
            println!("{}\n", game.position());
            println!("{}", game.position().to_fen_string());
            println!("{}", game.status());
        }
        Command::Moves { from } => {
            let actions = match from {
                Some(origin) => game.position().actions_from(origin),
                None => game.position().actions(),
            };
            for action in &actions {
                println!("{action}")
            }
        }
        Command::Play { moves, base_url } => {
            for mv in moves {
                let played = match mv.promoting_to {
                    Some(kind) => game.play_promoting(mv.from, mv.to, kind),
                    None => game.play(mv.from, mv.to),
                };
                played.with_context(|| format!("Cannot play {mv}"))?;
            }
            println!("{}\n", game.position());
            println!("{}", game.status());
            println!("{}", game.share_link(&base_url));
        }
        #[cfg(feature = "perft")]
        Command::Perft {
            depth,
            divide,
            iterative,
            bench,
            bulk,
            no_board,
        } => {
            PerftConfig {
                depth,
                divide,
                iterative,
                bench,
                bulk_counting: bulk,
                show_board: !no_board,
            }
            .go(game.position());
        }
        #[cfg(not(feature = "perft"))]
        Command::Perft { .. } => {
            anyhow::bail!("chesslink has not been compiled with feature `perft`")
        }
        Command::Random { seed, max_plies } => {
            let playout = random_playout(game.position(), seed, max_plies);
            let moves: Vec<_> = playout.moves.iter().map(ToString::to_string).collect();
            println!("{}\n", moves.join(" "));
            println!("{}\n", playout.position);
            println!("{}", playout.position.to_fen_string());
            println!("{}", playout.status);
        }
    }
    Ok(())
}

pub fn main() {
    let args = Arguments::parse();
    env_logger::init();

    if let Err(e) = run(args) {
        eprintln!("{e:#}");
        std::process::exit(1)
    }
}
