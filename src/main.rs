//! Lane Runner entry point
//!
//! Natively this is a headless runner: it plays one run with the autopilot,
//! persists the best score and prints a JSON summary. On the web the host
//! page drives `WebGame` from the library instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Context;
    use clap::Parser;

    use lane_runner::persistence::{FileStore, save_best_score};
    use lane_runner::runner::run_session;
    use lane_runner::{Game, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "lane-runner", about = "Headless three-lane runner simulation")]
    pub struct Args {
        /// Settings file (JSON)
        #[arg(long, default_value = "lane-runner.json")]
        settings: PathBuf,
        /// Override the RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Override the simulated run length in seconds
        #[arg(long)]
        seconds: Option<f32>,
        /// Reset the stored best score before running
        #[arg(long)]
        reset_best: bool,
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        let mut settings = Settings::load(&args.settings);
        if let Some(seconds) = args.seconds {
            settings.run_seconds = seconds.max(0.0);
        }
        let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);

        let mut store = FileStore::open(&settings.storage_path);
        if args.reset_best {
            save_best_score(&mut store, 0.0)
                .with_context(|| format!("resetting best score in {}", store.path().display()))?;
            log::info!("Best score reset");
        }

        let mut game = Game::new(store, seed);
        let summary = run_session(&mut game, &settings);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Lane Runner (native) starting...");
    native::run(native::Args::parse())
}

// The browser build is driven through `lane_runner::web::WebGame`
#[cfg(target_arch = "wasm32")]
fn main() {}
