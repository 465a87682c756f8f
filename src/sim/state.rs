//! Game state and the level/phase state machine
//!
//! The state owns every entity collection, the player and the RNG. Lifecycle
//! commands and goal-triggered level changes all go through the transitions
//! defined here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Crop, Crow, Entity, PowerUp, PowerUpKind, Scarecrow};
use super::player::Player;
use super::roll::Roll;
use super::spawn::Spawner;
use crate::config::GameConfig;
use crate::consts::TIME_BONUS_PER_SECOND;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for Start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Timer ran out
    GameOver,
    /// Goal reached, waiting for the next-level command (staged policy only)
    LevelComplete,
    /// Every level cleared
    Win,
}

/// How reaching a level's goal moves the game forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdvancePolicy {
    /// Set up the next level in the same tick
    #[default]
    Immediate,
    /// Stop on the level-complete screen and wait for the next-level command
    Staged,
}

/// What caused a level advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceTrigger {
    /// Score reached the goal during play
    Goal,
    /// The next-level command from the level-complete screen
    Command,
}

/// Lifecycle commands accepted from outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Reset,
    TogglePause,
    AdvanceToNextLevel,
}

/// Notable things that happened, drained by the driver for the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnteredMenu,
    Started,
    Paused,
    Resumed,
    TimeUp,
    CropsCollected { count: usize, points: u32 },
    PowerUpCollected(PowerUpKind),
    CrowHit { crows: u32, penalty: u32 },
    LevelCompleted { level: u32, time_bonus: u32 },
    LevelStarted { level: u32, trigger: AdvanceTrigger },
    Won { levels: u32, trigger: AdvanceTrigger },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub config: GameConfig,
    pub advance_policy: AdvancePolicy,
    /// Current phase
    pub phase: GamePhase,
    /// 1-based level being played
    pub current_level: u32,
    pub levels_completed: u32,
    pub total_levels: u32,
    pub score: u32,
    /// Seconds left on the level clock
    pub time_left: f32,
    /// Score needed to clear the current level
    pub goal: u32,
    /// Seconds between spawn opportunities
    pub spawn_every: f32,
    pub spawner: Spawner,
    pub player: Player,
    pub crops: Vec<Crop>,
    pub scarecrows: Vec<Scarecrow>,
    pub crows: Vec<Crow>,
    pub power_ups: Vec<PowerUp>,
    /// Gameplay ticks simulated
    pub time_ticks: u64,
    /// Pending events (oldest first)
    pub events: Vec<GameEvent>,
    /// Random source for spawns and crow headings
    pub rng: R,
}

impl GameState<Pcg32> {
    /// Create a new game in the menu, seeded for reproducibility
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Roll> GameState<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let total_levels = config.total_levels();
        let mut state = Self {
            config,
            advance_policy: AdvancePolicy::default(),
            phase: GamePhase::Menu,
            current_level: 1,
            levels_completed: 0,
            total_levels,
            score: 0,
            time_left: 0.0,
            goal: 0,
            spawn_every: 0.0,
            spawner: Spawner::default(),
            player: Player::default(),
            crops: Vec::new(),
            scarecrows: Vec::new(),
            crows: Vec::new(),
            power_ups: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            rng,
        };
        state.reset();
        state
    }

    pub fn with_policy(mut self, policy: AdvancePolicy) -> Self {
        self.advance_policy = policy;
        self
    }

    /// Route a lifecycle command to its transition
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Reset => self.reset(),
            Command::TogglePause => self.toggle_pause(),
            Command::AdvanceToNextLevel => self.advance_to_next_level(),
        }
    }

    /// Begin a fresh run from Menu/GameOver/Win, or resume from Paused
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Menu | GamePhase::GameOver | GamePhase::Win => {
                self.reset();
                self.set_phase(GamePhase::Playing);
                self.events.push(GameEvent::Started);
            }
            GamePhase::Paused => {
                self.set_phase(GamePhase::Playing);
                self.events.push(GameEvent::Resumed);
            }
            GamePhase::Playing | GamePhase::LevelComplete => {}
        }
    }

    /// Back to the menu with all progression cleared and level 1 laid out
    pub fn reset(&mut self) {
        self.set_phase(GamePhase::Menu);
        self.current_level = 1;
        self.levels_completed = 0;
        self.total_levels = self.config.total_levels();
        self.player = Player::default();
        self.crops.clear();
        self.power_ups.clear();
        self.score = 0;
        self.setup_level(self.current_level);
        self.events.push(GameEvent::EnteredMenu);
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.set_phase(GamePhase::Paused);
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.set_phase(GamePhase::Playing);
                self.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    /// Leave the level-complete screen for the next level (or the win screen)
    pub fn advance_to_next_level(&mut self) {
        if self.phase != GamePhase::LevelComplete {
            log::debug!("Next-level command ignored in {:?}", self.phase);
            return;
        }
        self.advance_level(AdvanceTrigger::Command);
    }

    /// Called by the tick when the score reaches the goal
    pub(crate) fn goal_reached(&mut self) {
        match self.advance_policy {
            AdvancePolicy::Immediate => self.advance_level(AdvanceTrigger::Goal),
            AdvancePolicy::Staged => self.complete_level(),
        }
    }

    /// Staged path: freeze on the level-complete screen and bank the time bonus
    fn complete_level(&mut self) {
        let time_bonus = time_bonus(self.time_left);
        self.score += time_bonus;
        self.set_phase(GamePhase::LevelComplete);
        log::info!(
            "Level {} complete, time bonus +{} (score {})",
            self.current_level,
            time_bonus,
            self.score
        );
        self.events.push(GameEvent::LevelCompleted {
            level: self.current_level,
            time_bonus,
        });
    }

    /// Shared by both advance paths: count the level, then win or set up the next one
    fn advance_level(&mut self, trigger: AdvanceTrigger) {
        self.levels_completed += 1;
        self.current_level += 1;

        if self.current_level > self.total_levels {
            self.set_phase(GamePhase::Win);
            self.events.push(GameEvent::Won {
                levels: self.levels_completed,
                trigger,
            });
            return;
        }

        self.setup_level(self.current_level);
        self.crops.clear();
        self.power_ups.clear();
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::LevelStarted {
            level: self.current_level,
            trigger,
        });
    }

    /// Load a level's clock, goal, spawn rate and obstacles
    pub fn setup_level(&mut self, number: u32) {
        let level = self.config.level(number);

        self.time_left = level.time_limit;
        self.goal = level.goal;
        self.spawn_every = level.spawn_rate;
        self.spawner.reset();

        self.scarecrows = (0..level.obstacles).map(Scarecrow::for_slot).collect();
        let rng = &mut self.rng;
        self.crows = (0..level.crows).map(|i| Crow::for_slot(i, &mut *rng)).collect();

        log::info!(
            "Level {}: {}s, goal {}, spawn every {}s, {} scarecrows, {} crows",
            number,
            level.time_limit,
            level.goal,
            level.spawn_rate,
            level.obstacles,
            level.crows
        );
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Take pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every live entity in draw order: crops, scarecrows, crows, power-ups, player
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.crops
            .iter()
            .map(Entity::Crop)
            .chain(self.scarecrows.iter().map(Entity::Scarecrow))
            .chain(self.crows.iter().map(Entity::Crow))
            .chain(self.power_ups.iter().map(Entity::PowerUp))
            .chain(std::iter::once(Entity::Player(&self.player)))
            .filter(|e| e.is_alive())
    }
}

/// Bonus for clearing a level with time to spare
pub fn time_bonus(time_left: f32) -> u32 {
    (time_left.max(0.0) * TIME_BONUS_PER_SECOND).floor() as u32
}
