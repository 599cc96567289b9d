//! Room connection table: how often each room appears on a hospital's edges

use super::table::render_table;
use crate::error::{TpsError, TpsResult};
use crate::graph::RoomCounts;
use crate::reference::ReferenceData;
use serde::Serialize;
use std::str::FromStr;

const HEADERS: [&str; 3] = ["ROOM", "PURPOSE", "COUNT"];

/// Purpose label for a room that matches no known name
pub const NOT_FOUND: &str = "Not Found";
/// Purpose label for a known room with no recorded purpose
pub const UNSPECIFIED: &str = "Unspecified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomSortKey {
    #[default]
    Count,
    Name,
}

impl FromStr for RoomSortKey {
    type Err = TpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count" => Ok(RoomSortKey::Count),
            "name" | "room" => Ok(RoomSortKey::Name),
            _ => Err(TpsError::InvalidArgument(format!(
                "Unknown room sort '{}'. Valid sorts: count, name",
                s
            ))),
        }
    }
}

/// Sort key and direction are independent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSort {
    pub key: RoomSortKey,
    pub descending: bool,
}

impl Default for RoomSort {
    fn default() -> Self {
        Self {
            key: RoomSortKey::Count,
            descending: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomRow {
    pub room: String,
    pub purpose: String,
    pub count: usize,
}

/// Purpose of the known room whose name is the longest case-insensitive
/// prefix of `display_name`
pub fn purpose_label(data: &ReferenceData, display_name: &str) -> String {
    match data.lookup_room_prefix(display_name) {
        Some(room) => room
            .purpose
            .map(|purpose| purpose.to_string())
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
        None => NOT_FOUND.to_string(),
    }
}

/// Sorted rows for `counts`.
///
/// By count, the order is count descending then name ascending; an
/// ascending sort reverses that whole order. By name, rooms sort ascending
/// and reverse when descending.
pub fn room_rows(counts: &RoomCounts, data: &ReferenceData, sort: RoomSort) -> Vec<RoomRow> {
    let mut rows: Vec<RoomRow> = counts
        .iter()
        .map(|(room, count)| RoomRow {
            room: room.to_string(),
            purpose: purpose_label(data, room),
            count,
        })
        .collect();

    rows.sort_by(|a, b| {
        let ordering = match sort.key {
            RoomSortKey::Count => b.count.cmp(&a.count).then_with(|| a.room.cmp(&b.room)),
            RoomSortKey::Name => a.room.cmp(&b.room),
        };
        let reversed = match sort.key {
            RoomSortKey::Count => !sort.descending,
            RoomSortKey::Name => sort.descending,
        };
        if reversed {
            ordering.reverse()
        } else {
            ordering
        }
    });
    rows
}

pub fn format_room_table(
    counts: &RoomCounts,
    data: &ReferenceData,
    sort: RoomSort,
) -> TpsResult<String> {
    let cells: Vec<Vec<String>> = room_rows(counts, data, sort)
        .into_iter()
        .map(|row| vec![row.room, row.purpose, row.count.to_string()])
        .collect();
    render_table(&HEADERS, &cells)
}
