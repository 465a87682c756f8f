//! Frame driver
//!
//! Owns the game state and the collaborator seams. Each frame it measures a
//! clamped time step, polls input, runs one simulation tick, then hands the
//! result to the render and HUD sinks.

use crate::consts::MAX_FRAME_DT;
use crate::hud::{HudSnapshot, status_text};
use crate::sim::{Command, Entity, GamePhase, GameState, Player, TickInput, tick};

/// Polled once per frame for held directions and one-shot requests
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Receives the full scene once per frame
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame<'_>);
}

/// Receives HUD values and status line changes
pub trait HudSink {
    fn sync(&mut self, hud: &HudSnapshot);
    fn status(&mut self, text: &str);
}

/// Everything a renderer needs for one frame
#[derive(Debug)]
pub struct RenderFrame<'a> {
    pub phase: GamePhase,
    pub score: u32,
    pub time_left: f32,
    pub level: u32,
    pub goal: u32,
    pub player: &'a Player,
    /// Live entities in draw order
    pub entities: Vec<Entity<'a>>,
}

impl<'a> RenderFrame<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            time_left: state.time_left,
            level: state.current_level,
            goal: state.goal,
            player: &state.player,
            entities: state.entities().collect(),
        }
    }
}

/// Converts frame timestamps into clamped simulation steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    /// Step in seconds since the previous frame, clamped to [0, MAX_FRAME_DT].
    /// The first frame has no predecessor and yields 0.
    pub fn begin_frame(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}

/// Game instance wired to its collaborators
pub struct Driver {
    state: GameState,
    clock: FrameClock,
    input: Box<dyn InputSource>,
    render: Option<Box<dyn RenderSink>>,
    hud: Option<Box<dyn HudSink>>,
    last_hud: Option<HudSnapshot>,
    running: bool,
}

impl Driver {
    pub fn new(state: GameState, input: Box<dyn InputSource>) -> Self {
        Self {
            state,
            clock: FrameClock::default(),
            input,
            render: None,
            hud: None,
            last_hud: None,
            running: true,
        }
    }

    pub fn with_render(mut self, render: Box<dyn RenderSink>) -> Self {
        self.render = Some(render);
        self
    }

    pub fn with_hud(mut self, hud: Box<dyn HudSink>) -> Self {
        self.hud = Some(hud);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply a lifecycle command and publish the resulting HUD changes
    pub fn command(&mut self, command: Command) {
        log::debug!("Command {:?} in {:?}", command, self.state.phase);
        self.state.apply(command);
        self.publish_hud();
    }

    /// Run one frame at timestamp `now_ms`; returns false once stopped
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.running {
            return false;
        }

        let dt = self.clock.begin_frame(now_ms);
        let input = self.input.poll();
        tick(&mut self.state, &input, dt);

        self.publish_hud();
        if let Some(render) = self.render.as_mut() {
            render.render(&RenderFrame::from_state(&self.state));
        }
        true
    }

    /// Stop scheduling frames; later `frame` calls do nothing
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Driver stopped after {} ticks", self.state.time_ticks);
            self.running = false;
        }
    }

    fn publish_hud(&mut self) {
        let events = self.state.drain_events();
        let Some(hud) = self.hud.as_mut() else {
            return;
        };

        for text in events.iter().filter_map(status_text) {
            hud.status(&text);
        }

        let snapshot = HudSnapshot::from_state(&self.state);
        if self.last_hud.as_ref() != Some(&snapshot) {
            hud.sync(&snapshot);
            self.last_hud = Some(snapshot);
        }
    }
}
