use std::net::TcpListener;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::spawn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use chess_logic_lib::config::Config;
use chess_logic_lib::error::ChessError;
use chess_logic_lib::game_server::{handle_game, serve, thread_timer, ChannelMsg};

fn main() -> Result<(), ChessError> {
    let logger_env = env_logger::Env::default().filter_or("LOG_LEVEL", "DEBUG");
    env_logger::Builder::from_env(logger_env).format_timestamp_millis().init();

    let config = Config::from_env()?;
    log::info!("Starting with {:?}", config);

    let (sender_origin, receiver): (Sender<ChannelMsg>, Receiver<ChannelMsg>) = channel();

    let monitor_sender = sender_origin.clone();
    let monitor_period = config.monitor_period;
    spawn(move || thread_timer(monitor_sender, monitor_period, || ChannelMsg::ValueMonitor));
    let ai_sender = sender_origin.clone();
    let ai_delay = config.ai_delay;
    spawn(move || thread_timer(ai_sender, ai_delay, || ChannelMsg::AiTick));

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    spawn(move || handle_game(receiver, rng));

    let server = TcpListener::bind(&config.address)?;
    log::info!("Listening on {}", config.address);
    serve(server, sender_origin)
}
