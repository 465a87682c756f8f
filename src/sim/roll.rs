//! Random rolls for spawning and crow headings
//!
//! Every random decision in the simulation goes through [`Roll`], so a run is
//! reproducible from its seed and tests can script exact outcomes.

/// Source of uniform rolls in `[0, 1)`
pub trait Roll {
    fn roll(&mut self) -> f32;

    /// Uniform cell index in `0..cells`
    fn cell(&mut self, cells: u32) -> u32 {
        let idx = (self.roll() * cells as f32).floor() as u32;
        idx.min(cells.saturating_sub(1))
    }
}

impl<R: rand::Rng + ?Sized> Roll for R {
    #[inline]
    fn roll(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Replays a fixed list of rolls, then repeats the last one
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f32>,
    next: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: impl Into<Vec<f32>>) -> Self {
        Self {
            rolls: rolls.into(),
            next: 0,
        }
    }

    /// Number of rolls handed out so far
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl Roll for ScriptedRolls {
    fn roll(&mut self) -> f32 {
        let value = self
            .rolls
            .get(self.next)
            .or(self.rolls.last())
            .copied()
            .unwrap_or(0.0);
        self.next += 1;
        value
    }
}
