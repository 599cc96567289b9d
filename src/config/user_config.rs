//! User-level configuration for two-point-science
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/two-point-science/config.toml

use crate::graph::{Engine, ImageFormat};
use crate::models::AggregationStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ENV_SEPARATE_ROOMS: &str = "TPS_SEPARATE_ROOMS";
pub const ENV_GRAPH_DIR: &str = "TPS_GRAPH_DIR";
pub const ENV_DATA: &str = "TPS_DATA";

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub graph: GraphConfig,

    #[serde(default)]
    pub danger: DangerConfig,

    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphConfig {
    /// Split dual-purpose rooms into (diag) and (treat) nodes
    pub separate_rooms: Option<bool>,

    /// Where .gv sources and images are written (default: current directory)
    pub graph_dir: Option<PathBuf>,

    /// Graphviz layout engine (default: dot)
    pub engine: Option<String>,

    /// Rendered image format (default: png)
    pub image_format: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct DangerConfig {
    /// Aggregation strategy: product, average, blended (default: average)
    pub strategy: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct DataConfig {
    /// Replacement reference dataset
    pub file: Option<PathBuf>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/two-point-science/config.toml)
    pub fn load() -> Result<Self> {
        let files: Vec<PathBuf> = Self::user_config_path().into_iter().collect();
        Self::load_layered(&files, |key| std::env::var(key).ok())
    }

    /// Merge the existing `files` over the defaults in order, then apply
    /// environment overrides looked up through `lookup`
    pub fn load_layered<F>(files: &[PathBuf], lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = UserConfig::default();
        for path in files.iter().filter(|p| p.exists()) {
            config.merge(Self::load_from(path)?);
        }
        config.apply_env_with(lookup);
        Ok(config)
    }

    /// Read a config file without applying the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str::<UserConfig>(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded user config");
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("two-point-science").join("config.toml"))
    }

    /// Override fields from environment variables looked up through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SEPARATE_ROOMS) {
            match parse_flag(&value) {
                Some(flag) => self.graph.separate_rooms = Some(flag),
                None => warn!(
                    "Ignoring {}={:?}: expected true/false, yes/no, on/off or 1/0",
                    ENV_SEPARATE_ROOMS, value
                ),
            }
        }
        if let Some(dir) = lookup(ENV_GRAPH_DIR).filter(|v| !v.is_empty()) {
            self.graph.graph_dir = Some(PathBuf::from(dir));
        }
        if let Some(file) = lookup(ENV_DATA).filter(|v| !v.is_empty()) {
            self.data.file = Some(PathBuf::from(file));
        }
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.graph.separate_rooms.is_some() {
            self.graph.separate_rooms = other.graph.separate_rooms;
        }
        if other.graph.graph_dir.is_some() {
            self.graph.graph_dir = other.graph.graph_dir;
        }
        if other.graph.engine.is_some() {
            self.graph.engine = other.graph.engine;
        }
        if other.graph.image_format.is_some() {
            self.graph.image_format = other.graph.image_format;
        }
        if other.danger.strategy.is_some() {
            self.danger.strategy = other.danger.strategy;
        }
        if other.data.file.is_some() {
            self.data.file = other.data.file;
        }
    }

    pub fn separate_rooms(&self) -> bool {
        self.graph.separate_rooms.unwrap_or(false)
    }

    pub fn graph_dir(&self) -> PathBuf {
        self.graph
            .graph_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn engine(&self) -> Result<Engine> {
        match self.graph.engine.as_deref() {
            Some(engine) => engine
                .parse::<Engine>()
                .context("Invalid [graph] engine in config"),
            None => Ok(Engine::default()),
        }
    }

    pub fn image_format(&self) -> Result<ImageFormat> {
        match self.graph.image_format.as_deref() {
            Some(format) => format
                .parse::<ImageFormat>()
                .context("Invalid [graph] image_format in config"),
            None => Ok(ImageFormat::default()),
        }
    }

    pub fn strategy(&self) -> Result<AggregationStrategy> {
        match self.danger.strategy.as_deref() {
            Some(strategy) => strategy
                .parse::<AggregationStrategy>()
                .context("Invalid [danger] strategy in config"),
            None => Ok(AggregationStrategy::default()),
        }
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.data.file.as_deref()
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::init_at(&config_path)?;
        Ok(config_path)
    }

    /// Write the example config to `path` unless a file is already there.
    /// Returns whether a file was written.
    pub fn init_at(path: &Path) -> Result<bool> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }
}

const EXAMPLE_CONFIG: &str = r#"# Two Point Science User Configuration

[graph]
# Split dual-purpose rooms (e.g. Ward) into "(diag)" and "(treat)" nodes
# separate_rooms = false

# Where graph sources and images are written
# graph_dir = "."

# Layout engine: dot, neato, sfdp, fdp, circo, twopi
# engine = "dot"

# Image format: png, pdf, svg
# image_format = "png"

[danger]
# How difficulty, death chance and health decline combine: product, average, blended
# strategy = "average"

[data]
# Replacement reference dataset (same layout as the built-in one)
# file = "/path/to/two_point_hospital.toml"
"#;

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
