//! The ghost hunt: learn how the ghost moves, then forecast where it will be.
//!
//! - build the mansion and a long seeded history of ghost moves
//! - learn the transition matrix from that history
//! - follow a live ghost for five turns, printing the 2-step forecast and its entropy
//! - persist the history as a move log and train on it again
//!
//! Set `HUNT_SEED` to replay a different ghost; `RUST_LOG` controls logging.

use chainwalk::{
    generate_walk, ForecastRanker, MoveLog, Topology, TransitionLearner, WalkConfig, Walker,
};
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chainwalk=debug"));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let seed: u64 = std::env::var("HUNT_SEED").ok().and_then(|s| s.parse().ok()).unwrap_or(42);
    let mansion = Topology::mansion();
    let mut model = TransitionLearner::new(mansion.len());

    let history_cfg = WalkConfig { steps: 5_000, seed, ..WalkConfig::default() };
    println!("generating {} historical movements (seed={seed})", history_cfg.steps);
    let history = generate_walk(&mansion, &history_cfg)?;
    model.train(&history)?;
    println!("model trained on {} transitions", model.total_observations());

    let ranker = ForecastRanker::new(&mansion, &model)?;
    let mut ghost = Walker::seeded(&mansion, "Foyer", seed.wrapping_add(1))?;
    let k = 2;

    println!();
    println!("the live hunt");
    for turn in 1..=5 {
        let spotted = ghost.current();
        println!();
        println!("[turn {turn}] ghost last spotted in: {spotted}");

        let forecast = ranker.recommend_default(spotted, k)?;
        println!("  entropy (uncertainty) = {:.2} bits", forecast.entropy);
        println!("  forecast {k} steps ahead:");
        for (i, rec) in forecast.ranked.iter().enumerate() {
            println!("    {}. {}: {:.2}%", i + 1, rec.location, rec.probability);
        }
        ghost.step();
    }

    let path = std::env::temp_dir().join("historical_movements.json");
    MoveLog::from_walk(history).to_writer(std::fs::File::create(&path)?)?;
    let log = MoveLog::from_reader(std::fs::File::open(&path)?)?;
    model.train_log(&log)?;
    println!();
    println!(
        "retrained from {} ({} transitions total)",
        path.display(),
        model.total_observations()
    );
    Ok(())
}
