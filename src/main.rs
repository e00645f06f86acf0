//! Lane Runner entry point
//!
//! Headless native session: the autopilot plays a seeded run at a fixed frame
//! rate, entity and HUD traffic is logged, and a JSON summary is printed at
//! the end.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use clap::Parser;
    use lane_runner::platform::FixedClock;
    use lane_runner::sim::{GameEvent, GamePhase, GameState};
    use lane_runner::{HudSnapshot, Notification, Runner, Tuning, UiSink, WorldSink};
    use serde::Serialize;
    use std::path::PathBuf;

    /// Headless autopilot session for the lane runner
    #[derive(Parser, Debug)]
    #[command(name = "lane-runner")]
    #[command(about = "Run a seeded lane-runner session on autopilot and print a JSON summary")]
    pub struct Args {
        /// Run seed
        #[arg(long, default_value_t = 42)]
        pub seed: u64,

        /// Simulated seconds to run before stopping
        #[arg(long, default_value_t = 60.0)]
        pub seconds: f32,

        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0, value_parser = parse_positive)]
        pub fps: f32,

        /// Balance overrides as JSON
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    /// Accept only finite values above zero
    pub fn parse_positive(s: &str) -> Result<f32, String> {
        let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(format!("{value} is not a positive number"))
        }
    }

    /// Counts what the scene would mirror
    #[derive(Default)]
    struct LogWorld {
        live_entities: usize,
        spawned: usize,
        collected: usize,
        smashed: usize,
    }

    impl WorldSink for LogWorld {
        fn apply_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::ObstacleSpawned { .. } | GameEvent::CollectibleSpawned { .. } => {
                    self.spawned += 1;
                    self.live_entities += 1;
                }
                GameEvent::Collected { kind, points, .. } => {
                    self.collected += 1;
                    self.live_entities = self.live_entities.saturating_sub(1);
                    log::debug!("Collected {:?} for {:.0} points", kind, points);
                }
                GameEvent::ObstacleSmashed { .. } => {
                    self.smashed += 1;
                    self.live_entities = self.live_entities.saturating_sub(1);
                }
                GameEvent::Despawned { .. } => {
                    self.live_entities = self.live_entities.saturating_sub(1);
                }
                GameEvent::Restarted => self.live_entities = 0,
                _ => {}
            }
        }
    }

    /// Logs notifications and remembers the last HUD
    #[derive(Default)]
    struct LogUi {
        last_hud: Option<HudSnapshot>,
        final_score: Option<u64>,
    }

    impl UiSink for LogUi {
        fn update_hud(&mut self, hud: &HudSnapshot) {
            self.last_hud = Some(hud.clone());
        }

        fn notify(&mut self, notification: &Notification) {
            log::info!("{}", notification.message());
        }

        fn game_over(&mut self, final_score: u64) {
            self.final_score = Some(final_score);
        }
    }

    #[derive(Serialize)]
    struct Summary {
        seed: u64,
        phase: GamePhase,
        score: u64,
        elapsed: f32,
        ticks: u64,
        distance: f32,
        spawned: usize,
        collected: usize,
        smashed: usize,
        live_entities: usize,
        hud: Option<HudSnapshot>,
    }

    pub fn run(options: Args) -> Result<(), String> {
        let tuning = match &options.tuning {
            Some(path) => Tuning::load(path)
                .map_err(|e| format!("failed to load tuning from {}: {e}", path.display()))?,
            None => Tuning::default(),
        };

        let state = GameState::with_tuning(options.seed, tuning);
        let clock = FixedClock::new(1.0 / options.fps);
        let mut runner = Runner::new(state, clock, LogWorld::default(), LogUi::default());
        runner.set_idle_mode(true);

        let frames = (options.seconds * options.fps).ceil() as u64;
        log::info!(
            "Running {} frames at {} fps (seed {})",
            frames,
            options.fps,
            options.seed
        );
        for _ in 0..frames {
            if runner.frame() == GamePhase::GameOver {
                break;
            }
        }

        let state = runner.state();
        let summary = Summary {
            seed: state.seed,
            phase: state.phase,
            score: runner.ui().final_score.unwrap_or_else(|| state.display_score()),
            elapsed: state.elapsed,
            ticks: state.time_ticks,
            distance: state.scroll_distance,
            spawned: runner.world().spawned,
            collected: runner.world().collected,
            smashed: runner.world().smashed,
            live_entities: runner.world().live_entities,
            hud: runner.ui().last_hud.clone(),
        };
        let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{json}");
        Ok(())
    }
}


#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Lane Runner (native) starting...");

    let args = headless::Args::parse();
    if let Err(e) = headless::run(args) {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive `Runner` from the host page
}
