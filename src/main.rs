//! Harvest Dash entry point
//!
//! Headless demo: loads the level table, lets the autopilot play and logs
//! what the HUD would show.

use std::path::PathBuf;

use clap::Parser;

use harvest_dash::sim::{AdvancePolicy, Command, GamePhase, GameState, TickInput};
use harvest_dash::{Driver, GameConfig, HudSink, HudSnapshot, InputSource, RenderFrame, RenderSink};

#[derive(Parser, Debug)]
#[command(name = "harvest-dash", about = "Headless Harvest Dash demo driven by the autopilot")]
struct Args {
    /// Level table (JSON); the built-in table is used when omitted or unreadable
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Maximum frames to run
    #[arg(long, default_value_t = 20_000)]
    frames: u32,

    /// Synthetic frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Stop on a level-complete screen between levels (with time bonus)
    #[arg(long)]
    staged: bool,
}

/// Demo AI input: the simulation steers the farmer
struct Autopilot;

impl InputSource for Autopilot {
    fn poll(&mut self) -> TickInput {
        TickInput {
            idle_mode: true,
            ..Default::default()
        }
    }
}

/// Logs a scene summary once per simulated second
#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl RenderSink for LogRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::debug!(
                "Frame {}: {:?} level {} score {}/{} time {:.1} player {:?} entities {}",
                self.frames,
                frame.phase,
                frame.level,
                frame.score,
                frame.goal,
                frame.time_left,
                frame.player.body.pos,
                frame.entities.len()
            );
        }
    }
}

struct LogHud;

impl HudSink for LogHud {
    fn sync(&mut self, hud: &HudSnapshot) {
        log::trace!("HUD {:?}", hud);
    }

    fn status(&mut self, text: &str) {
        log::info!("Status: {}", text);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Harvest Dash (headless) starting...");

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load_or_default(path),
        None => GameConfig::default(),
    };
    let policy = if args.staged {
        AdvancePolicy::Staged
    } else {
        AdvancePolicy::Immediate
    };
    let state = GameState::new(args.seed, config).with_policy(policy);

    let mut driver = Driver::new(state, Box::new(Autopilot))
        .with_render(Box::new(LogRenderer::default()))
        .with_hud(Box::new(LogHud));
    driver.command(Command::Start);

    let frame_ms = 1000.0 / args.fps.max(1.0);
    for frame in 0..args.frames {
        if !driver.frame(f64::from(frame) * frame_ms) {
            break;
        }
        match driver.state().phase {
            GamePhase::LevelComplete => driver.command(Command::AdvanceToNextLevel),
            GamePhase::GameOver | GamePhase::Win => driver.stop(),
            _ => {}
        }
    }

    let state = driver.state();
    log::info!(
        "Finished in {:?}: level {}, {} levels completed, score {}",
        state.phase,
        state.current_level,
        state.levels_completed,
        state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless demo in the browser build
}
