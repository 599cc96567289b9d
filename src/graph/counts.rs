//! Per-room traffic counts derived from an edge list

use super::edges::base_room_name;
use crate::models::Edge;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Occurrence count per room display name, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomCounts {
    entries: Vec<(String, usize)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl RoomCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, room: &str) {
        match self.index.get(room) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(room.to_string(), self.entries.len());
                self.entries.push((room.to_string(), 1));
            }
        }
    }

    pub fn get(&self, room: &str) -> Option<usize> {
        self.index.get(room).map(|&position| self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(room, count)| (room.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl<'a> FromIterator<&'a str> for RoomCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = RoomCounts::new();
        for room in iter {
            counts.increment(room);
        }
        counts
    }
}

/// Count both endpoints of every edge.
///
/// Every edge adds exactly two increments, even when both endpoints are the
/// same room. Without `separate_dual_purpose`, role suffixes are folded back
/// into the plain room name.
pub fn count_rooms(edges: &[Edge], separate_dual_purpose: bool) -> RoomCounts {
    let counts: RoomCounts = edges
        .iter()
        .flat_map(|edge| [edge.from.as_str(), edge.to.as_str()])
        .map(|room| {
            if separate_dual_purpose {
                room
            } else {
                base_room_name(room)
            }
        })
        .collect();
    debug!(
        edges = edges.len(),
        rooms = counts.len(),
        total = counts.total(),
        "Counted room traffic"
    );
    counts
}
