//! Configuration persistence for agrigis settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which interactions the map accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Clicks select points, drawing is unavailable
    PointOnly,
    #[default]
    PointAndPolygon,
}

/// How the mock analysis decides whether a selection is inside the region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValidityRule {
    /// Random outcome, valid with the given probability
    CoinFlip { valid_probability: f64 },
    /// Real containment test against the boundary region
    Containment,
}

impl Default for ValidityRule {
    fn default() -> Self {
        ValidityRule::CoinFlip {
            valid_probability: 0.8,
        }
    }
}

/// Base map tile source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileProvider {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileProvider {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgriGisConfig {
    #[serde(default)]
    pub interaction_mode: InteractionMode,
    /// Simulated latency for map selections
    #[serde(default = "default_point_delay_ms")]
    pub point_delay_ms: u64,
    /// Simulated latency for place search
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,
    #[serde(default)]
    pub validity: ValidityRule,
    /// Chance the mock service fails outright (0.0-1.0)
    #[serde(default)]
    pub failure_probability: f64,
    /// Margin added around a highlighted geometry, as a fraction of its span
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,
    /// Smallest viewport span in degrees, used when fitting a single point
    #[serde(default = "default_min_fit_span_deg")]
    pub min_fit_span_deg: f64,
    #[serde(default)]
    pub tiles: TileProvider,
    /// Fixed seed for reproducible mock data
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_point_delay_ms() -> u64 {
    2000
}

fn default_search_delay_ms() -> u64 {
    1500
}

fn default_fit_padding() -> f64 {
    0.1
}

fn default_min_fit_span_deg() -> f64 {
    0.05
}

impl Default for AgriGisConfig {
    fn default() -> Self {
        Self {
            interaction_mode: InteractionMode::default(),
            point_delay_ms: default_point_delay_ms(),
            search_delay_ms: default_search_delay_ms(),
            validity: ValidityRule::default(),
            failure_probability: 0.0,
            fit_padding: default_fit_padding(),
            min_fit_span_deg: default_min_fit_span_deg(),
            tiles: TileProvider::default(),
            rng_seed: None,
        }
    }
}

impl AgriGisConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "agrigis";

    pub fn point_delay(&self) -> Duration {
        Duration::from_millis(self.point_delay_ms)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    /// Default location of the config file
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("No user config directory")?;
        Ok(dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) => Self::load_or_default(&path),
            Err(err) => {
                log::warn!("Could not locate config file, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Never writes; a missing or broken file only logs a warning
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::warn!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }
}
