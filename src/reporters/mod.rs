//! Table reporters for room connections and illness danger
//!
//! Supports two output formats:
//! - `text` - Fixed-width console table
//! - `json` - Pretty-printed rows for machine consumption

pub mod danger;
pub mod rooms;
mod table;

pub use danger::{danger_rows, format_danger_table, DangerColumn, DangerRow, DangerSort};
pub use rooms::{format_room_table, purpose_label, room_rows, RoomRow, RoomSort, RoomSortKey};
pub use table::render_table;

use crate::error::{TpsError, TpsResult};
use serde::Serialize;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = TpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(TpsError::InvalidArgument(format!(
                "Unknown format '{}'. Valid formats: text, json",
                s
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render rows as pretty-printed JSON
pub fn render_json<T: Serialize>(rows: &[T]) -> TpsResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
