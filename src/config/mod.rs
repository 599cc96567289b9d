//! Configuration module for two-point-science
//!
//! This module handles:
//! - User-level configuration (config.toml under the platform config dir)
//! - Environment overrides (TPS_SEPARATE_ROOMS, TPS_GRAPH_DIR, TPS_DATA)
//! - Defaults for graph output and danger aggregation

mod user_config;

pub use user_config::{
    DangerConfig, DataConfig, GraphConfig, UserConfig, ENV_DATA, ENV_GRAPH_DIR,
    ENV_SEPARATE_ROOMS,
};
