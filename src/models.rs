//! Core data models for Two Point Science
//!
//! Records loaded from the reference dataset (rooms, illnesses, hospitals)
//! and the values derived from them (edges, aggregation strategies).

use crate::error::TpsError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a room can be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomPurpose {
    Diagnostic,
    Treatment,
    Both,
}

impl std::fmt::Display for RoomPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomPurpose::Diagnostic => write!(f, "Diagnostic"),
            RoomPurpose::Treatment => write!(f, "Treatment"),
            RoomPurpose::Both => write!(f, "Both"),
        }
    }
}

/// A hospital room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Absent when the dataset hasn't recorded it
    #[serde(default)]
    pub purpose: Option<RoomPurpose>,
}

impl Room {
    pub fn new(name: impl Into<String>, purpose: RoomPurpose) -> Self {
        Self {
            name: name.into(),
            purpose: Some(purpose),
        }
    }

    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self.purpose,
            Some(RoomPurpose::Diagnostic) | Some(RoomPurpose::Both)
        )
    }

    pub fn is_treatment(&self) -> bool {
        matches!(
            self.purpose,
            Some(RoomPurpose::Treatment) | Some(RoomPurpose::Both)
        )
    }

    pub fn is_dual_purpose(&self) -> bool {
        self.purpose == Some(RoomPurpose::Both)
    }
}

/// One researched illness factor (difficulty, death chance, decline rate)
///
/// `Unknown` marks data that hasn't been extracted from the game yet. It acts
/// as the neutral value 1.0 in aggregate math and when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Factor {
    Known(f64),
    #[default]
    Unknown,
}

impl Factor {
    /// Text used for factors with no data
    pub const MISSING: &'static str = "MISSING DATA";

    pub fn value(&self) -> Option<f64> {
        match self {
            Factor::Known(v) => Some(*v),
            Factor::Unknown => None,
        }
    }

    /// Value used in aggregate math: unknown counts as 1.0
    pub fn or_neutral(&self) -> f64 {
        self.value().unwrap_or(1.0)
    }

    /// Integer percentage (`floor(value * 100)`) or `MISSING DATA`
    pub fn percent(&self) -> String {
        match self {
            Factor::Known(v) => format_percent(*v),
            Factor::Unknown => Self::MISSING.to_string(),
        }
    }
}

impl From<Option<f64>> for Factor {
    fn from(value: Option<f64>) -> Self {
        value.map(Factor::Known).unwrap_or(Factor::Unknown)
    }
}

impl From<Factor> for Option<f64> {
    fn from(factor: Factor) -> Self {
        factor.value()
    }
}

/// Format a fraction as a truncated integer percentage, e.g. 0.2833 -> "28%"
pub fn format_percent(value: f64) -> String {
    format!("{}%", (value * 100.0).floor() as i64)
}

/// An illness record as stored in the reference dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Illness {
    pub name: String,
    /// Diagnostic rooms in visiting order (intake room optional)
    #[serde(default)]
    pub diagnostic: Vec<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub difficulty: Factor,
    #[serde(default)]
    pub death: Factor,
    #[serde(default)]
    pub decline: Factor,
}

/// A hospital (level) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    /// Illnesses seen at this hospital; empty when undocumented
    #[serde(default)]
    pub illnesses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A directed patient move between two rooms, by display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn touches(&self, display_name: &str) -> bool {
        self.from == display_name || self.to == display_name
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// How the three danger factors combine into one score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStrategy {
    /// difficulty x death x decline
    Product,
    /// mean of the three factors
    #[default]
    Average,
    /// mean of `Product` and `Average`
    Blended,
}

impl AggregationStrategy {
    pub fn all() -> &'static [AggregationStrategy] {
        &[
            AggregationStrategy::Product,
            AggregationStrategy::Average,
            AggregationStrategy::Blended,
        ]
    }

    pub fn combine(&self, difficulty: Factor, death: Factor, decline: Factor) -> f64 {
        let values = [
            difficulty.or_neutral(),
            death.or_neutral(),
            decline.or_neutral(),
        ];
        let product = values.iter().product::<f64>();
        let average = values.iter().sum::<f64>() / values.len() as f64;
        match self {
            AggregationStrategy::Product => product,
            AggregationStrategy::Average => average,
            AggregationStrategy::Blended => (product + average) / 2.0,
        }
    }
}

impl FromStr for AggregationStrategy {
    type Err = TpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "product" => Ok(AggregationStrategy::Product),
            "2" | "average" | "mean" => Ok(AggregationStrategy::Average),
            "3" | "blended" | "product_and_average_mean" => Ok(AggregationStrategy::Blended),
            other => Err(TpsError::InvalidArgument(format!(
                "unknown aggregation strategy '{}' (expected product, average or blended)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AggregationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationStrategy::Product => write!(f, "product"),
            AggregationStrategy::Average => write!(f, "average"),
            AggregationStrategy::Blended => write!(f, "blended"),
        }
    }
}
