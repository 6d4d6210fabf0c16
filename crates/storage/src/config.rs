//! Shard configuration
//!
//! A shard is described by its key space, its row width and how its rows are
//! seeded. Configurations are plain serde values and load from JSON:
//!
//! ```json
//! {
//!   "keys": {"hash": {"min_key": 1, "stride": 4, "count": 1024}},
//!   "row_width": 64,
//!   "seed": "random"
//! }
//! ```
//!
//! `seed` accepts the string forms of [`SeedMode::from_str`] (`"zero"`,
//! `"rand"`, `"random"`, `"0.5"`), a bare number, or the tagged forms
//! `{"constant": 0.5}` and `{"seeded_random": 7}`.

use crate::error::{Result, ShardError};
use distmat_core::KeyCollection;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// How freshly allocated rows are filled
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "SeedModeRepr")]
pub enum SeedMode {
    /// Every entry 0.0
    #[default]
    Zero,
    /// Every entry set to the given value
    Constant(f32),
    /// Uniform in `[-0.5, 0.5) / row_width`, thread-local RNG
    Random,
    /// Same distribution, reproducible from a seed
    SeededRandom(u64),
}

impl SeedMode {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SeedMode::Zero => "zero",
            SeedMode::Constant(_) => "constant",
            SeedMode::Random => "random",
            SeedMode::SeededRandom(_) => "seeded_random",
        }
    }
}

impl FromStr for SeedMode {
    type Err = ShardError;

    /// Parse `"zero"`, `"rand"`/`"random"`, or a float literal
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "zero" => Ok(SeedMode::Zero),
            "rand" | "random" => Ok(SeedMode::Random),
            other => other
                .parse::<f32>()
                .map(SeedMode::Constant)
                .map_err(|_| ShardError::Config(format!("unknown seed mode: {}", s))),
        }
    }
}

/// Accepted JSON shapes for a seed mode
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedModeRepr {
    Text(String),
    Number(f32),
    Tagged(TaggedSeed),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TaggedSeed {
    Constant(f32),
    SeededRandom(u64),
}

impl TryFrom<SeedModeRepr> for SeedMode {
    type Error = ShardError;

    fn try_from(repr: SeedModeRepr) -> Result<Self> {
        match repr {
            SeedModeRepr::Text(s) => s.parse(),
            SeedModeRepr::Number(v) => Ok(SeedMode::Constant(v)),
            SeedModeRepr::Tagged(TaggedSeed::Constant(v)) => Ok(SeedMode::Constant(v)),
            SeedModeRepr::Tagged(TaggedSeed::SeededRandom(seed)) => Ok(SeedMode::SeededRandom(seed)),
        }
    }
}

/// Everything needed to build a [`ShardStore`](crate::ShardStore)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardConfig {
    /// Keys owned by the shard (`range` or `hash`)
    pub keys: KeyCollection,
    /// Columns per row
    pub row_width: usize,
    /// Initial row contents
    #[serde(default)]
    pub seed: SeedMode,
}

impl ShardConfig {
    /// Config with zero-seeded rows
    pub fn new(keys: KeyCollection, row_width: usize) -> Self {
        Self {
            keys,
            row_width,
            seed: SeedMode::Zero,
        }
    }

    /// Same config with a different seed mode
    pub fn with_seed(mut self, seed: SeedMode) -> Self {
        self.seed = seed;
        self
    }

    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
