//! Level table and crop types
//!
//! Loaded once at startup from a JSON document. Any read, parse or validation
//! failure falls back to the built-in three-level table.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::sim::CropKind;

/// One level's difficulty parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    /// 1-based level number
    pub number: u32,
    /// Seconds on the clock
    pub time_limit: f32,
    /// Score needed to clear the level
    pub goal: u32,
    /// Seconds between spawn opportunities
    pub spawn_rate: f32,
    /// Scarecrow count
    pub obstacles: u32,
    /// Crow count
    pub crows: u32,
}

/// Crop table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropTypeConfig {
    pub points: u32,
    #[serde(default)]
    pub spawn_weight: f32,
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub levels: Vec<LevelConfig>,
    #[serde(default = "default_crop_types")]
    pub crop_types: BTreeMap<String, CropTypeConfig>,
}

fn level(number: u32, time_limit: f32, goal: u32, spawn_rate: f32, obstacles: u32, crows: u32) -> LevelConfig {
    LevelConfig {
        number,
        time_limit,
        goal,
        spawn_rate,
        obstacles,
        crows,
    }
}

fn default_levels() -> Vec<LevelConfig> {
    vec![
        level(1, 60.0, 15, 0.8, 2, 1),
        level(2, 45.0, 20, 0.6, 3, 2),
        level(3, 30.0, 25, 0.4, 4, 3),
    ]
}

fn default_crop_types() -> BTreeMap<String, CropTypeConfig> {
    [(CropKind::Wheat, 0.6), (CropKind::Pumpkin, 0.3), (CropKind::GoldenApple, 0.1)]
        .into_iter()
        .map(|(kind, spawn_weight)| {
            (
                kind.name().to_string(),
                CropTypeConfig {
                    points: kind.default_points(),
                    spawn_weight,
                },
            )
        })
        .collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            crop_types: default_crop_types(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: GameConfig = serde_json::from_str(json).context("parse game config")?;
        config.levels.sort_by_key(|l| l.number);
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read game config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("load game config {}", path.display()))
    }

    /// Load from `path`, falling back to the built-in table on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(path.as_ref()) {
            Ok(config) => {
                log::info!(
                    "Loaded game config from {} ({} levels)",
                    path.as_ref().display(),
                    config.levels.len()
                );
                config
            }
            Err(e) => {
                log::warn!("Failed to load config, using defaults: {e:#}");
                Self::default()
            }
        }
    }

    /// Reject tables the simulation cannot run
    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            bail!("config has no levels");
        }
        for (idx, lvl) in self.levels.iter().enumerate() {
            let expected = idx as u32 + 1;
            if lvl.number != expected {
                bail!(
                    "level numbers must run 1..={} without gaps (found {} at position {})",
                    self.levels.len(),
                    lvl.number,
                    expected
                );
            }
            // Negated comparisons so NaN is rejected too
            if !(lvl.spawn_rate > 0.0) {
                bail!("level {}: spawnRate must be positive (got {})", lvl.number, lvl.spawn_rate);
            }
            if !(lvl.time_limit > 0.0) {
                bail!("level {}: timeLimit must be positive (got {})", lvl.number, lvl.time_limit);
            }
        }
        for (name, crop) in &self.crop_types {
            if crop.spawn_weight < 0.0 {
                bail!("crop type {name}: spawnWeight must not be negative");
            }
            if CropKind::from_name(name).is_none() {
                log::warn!("Unknown crop type '{name}' in config is ignored");
            }
        }
        Ok(())
    }

    pub fn total_levels(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Level record by number; unknown numbers use the first level
    pub fn level(&self, number: u32) -> LevelConfig {
        self.levels
            .iter()
            .find(|l| l.number == number)
            .or_else(|| self.levels.first())
            .cloned()
            .unwrap_or_else(|| default_levels().remove(0))
    }

    /// Points for a crop tier; tiers missing from the table keep their built-in value
    pub fn crop_points(&self, kind: CropKind) -> u32 {
        self.crop_types
            .get(kind.name())
            .map(|c| c.points)
            .unwrap_or_else(|| kind.default_points())
    }
}
