use std::process::exit;
use rand::rngs::StdRng;
use rand::SeedableRng;
use chess_logic_lib::board::{to_string, Board};
use chess_logic_lib::config::Config;
use chess_logic_lib::error::ChessError;
use chess_logic_lib::session::{GameMode, GameSession};

fn draw_board(board: &Board) {
    let s = to_string(board);
    for c in s.chars() {
        match c {
            '\n' => println!("|"),
            x => print!("|{}", x)
        }
    }
    println!("|");
}

// Exit code: 1 white won, 2 black won, 0 otherwise.
fn main() -> Result<(), ChessError> {
    let logger_env = env_logger::Env::default().filter_or("LOG_LEVEL", "INFO");
    env_logger::Builder::from_env(logger_env).format_timestamp_millis().init();

    let config = Config::from_env()?;
    let seed = config.seed_or_random();
    log::info!("Playing a zero-player game, seed {}", seed);

    let mut session = GameSession::new(GameMode::ZeroPlayer);
    let outcome = session.play_out(&mut StdRng::seed_from_u64(seed), config.max_plies);
    draw_board(session.board());

    match outcome.winner() {
        Some(color) => println!("{} wins after {} plies", color, session.plies()),
        None => println!("No winner ({:?}) after {} plies", outcome, session.plies()),
    }
    exit(outcome.exit_code())
}
