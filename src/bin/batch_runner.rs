use chess_logic_lib::batch::run_batch;
use chess_logic_lib::config::Config;
use chess_logic_lib::error::ChessError;

fn main() -> Result<(), ChessError> {
    let logger_env = env_logger::Env::default().filter_or("LOG_LEVEL", "INFO");
    env_logger::Builder::from_env(logger_env).format_timestamp_millis().init();

    let batch = Config::from_env()?.batch();
    log::info!("Running {} games on {} workers, base seed {}", batch.games, batch.workers, batch.seed);

    let tally = run_batch(batch);
    println!("{}", serde_json::to_string_pretty(&tally)?);
    Ok(())
}
