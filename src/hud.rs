//! HUD values and status text
//!
//! Everything the UI collaborator shows is derived from `GameState` here, so
//! sinks only ever copy strings and numbers into place.

use serde::{Deserialize, Serialize};

use crate::sim::{AdvanceTrigger, GameEvent, GamePhase, GameState, Roll};

/// Next-level button on the level-complete screen
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NextLevelButton {
    pub visible: bool,
    pub enabled: bool,
    pub label: String,
}

impl NextLevelButton {
    /// Visible only on the level-complete screen. Stays enabled on the last
    /// level so the staged run can still reach Win.
    fn for_state<R: Roll>(state: &GameState<R>) -> Self {
        if state.phase != GamePhase::LevelComplete {
            return Self::default();
        }
        let label = if state.current_level >= state.total_levels {
            "Final Level!".to_string()
        } else {
            format!("Next Level ({})", state.current_level + 1)
        };
        Self {
            visible: true,
            enabled: true,
            label,
        }
    }
}

/// Values shown on the HUD after a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u32,
    /// Whole seconds left, rounded up
    pub time: u32,
    pub goal: u32,
    pub level: u32,
    pub phase: GamePhase,
    /// Seconds of speed boost left, if active
    pub speed_boost_secs: Option<u32>,
    /// Seconds of scythe left, if active
    pub scythe_secs: Option<u32>,
    pub next_level: NextLevelButton,
}

fn remaining_secs(timer: f32) -> Option<u32> {
    (timer > 0.0).then(|| timer.ceil() as u32)
}

impl HudSnapshot {
    pub fn from_state<R: Roll>(state: &GameState<R>) -> Self {
        Self {
            score: state.score,
            time: state.time_left.max(0.0).ceil() as u32,
            goal: state.goal,
            level: state.current_level,
            phase: state.phase,
            speed_boost_secs: remaining_secs(state.player.speed_boost),
            scythe_secs: remaining_secs(state.player.scythe),
            next_level: NextLevelButton::for_state(state),
        }
    }
}

/// Status line for an event; events without one leave the status unchanged
pub fn status_text(event: &GameEvent) -> Option<String> {
    let text = match event {
        GameEvent::EnteredMenu => "Menu".to_string(),
        GameEvent::Started | GameEvent::Resumed => "Playing…".to_string(),
        GameEvent::Paused => "Paused".to_string(),
        GameEvent::TimeUp => "Game Over".to_string(),
        GameEvent::LevelCompleted { level, time_bonus } => {
            format!("Level {level} Complete! Time bonus: +{time_bonus}")
        }
        GameEvent::LevelStarted {
            level,
            trigger: AdvanceTrigger::Goal,
        } => format!("Level {level}!"),
        GameEvent::LevelStarted {
            level,
            trigger: AdvanceTrigger::Command,
        } => format!("Level {level} - Go!"),
        GameEvent::Won {
            trigger: AdvanceTrigger::Goal,
            ..
        } => "You Win All Levels!".to_string(),
        GameEvent::Won {
            trigger: AdvanceTrigger::Command,
            ..
        } => "Congratulations! You completed all levels!".to_string(),
        GameEvent::CropsCollected { .. } | GameEvent::PowerUpCollected(_) | GameEvent::CrowHit { .. } => {
            return None;
        }
    };
    Some(text)
}
