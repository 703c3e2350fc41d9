use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::thread::spawn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::board::Color::{Black, White};
use crate::session::{play_headless, Outcome};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub games: usize,
    pub workers: usize,
    // Game `i` is played with seed `seed + i`.
    pub seed: u64,
    pub max_plies: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Tally {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub no_winner: usize,
    pub unfinished: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Win(White) => self.white_wins += 1,
            Outcome::Win(Black) => self.black_wins += 1,
            Outcome::NoLegalMove => self.no_winner += 1,
            Outcome::InProgress | Outcome::Unfinished => self.unfinished += 1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub game: usize,
    pub seed: u64,
    pub outcome: Outcome,
}

fn thread_worker(next_game: Arc<AtomicUsize>, config: BatchConfig, sender: Sender<GameReport>) {
    loop {
        let game = next_game.fetch_add(1, Ordering::Relaxed);
        if game >= config.games {
            return;
        }
        let seed = config.seed.wrapping_add(game as u64);
        let outcome = play_headless(&mut StdRng::seed_from_u64(seed), config.max_plies);
        if sender.send(GameReport { game, seed, outcome }).is_err() {
            log::error!("Collector is gone, stopping worker");
            return;
        }
    }
}

pub fn run_batch(config: BatchConfig) -> Tally {
    let (sender, receiver) = channel();
    let next_game = Arc::new(AtomicUsize::new(0));
    let workers: Vec<_> = (0..config.workers.max(1))
        .map(|_| {
            let sender = sender.clone();
            let next_game = Arc::clone(&next_game);
            spawn(move || thread_worker(next_game, config, sender))
        })
        .collect();
    drop(sender);

    let mut tally = Tally::default();
    for report in receiver {
        log::info!("Game {} (seed {}) finished: {:?}", report.game, report.seed, report.outcome);
        tally.record(report.outcome);
    }
    for worker in workers {
        if worker.join().is_err() {
            log::error!("Worker thread panicked");
        }
    }
    log::info!("White wins: {}, Black wins: {}", tally.white_wins, tally.black_wins);
    tally
}
