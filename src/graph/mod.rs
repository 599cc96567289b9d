//! Room graphs for hospitals
//!
//! Edges are derived from the reference data, counted per room, and written
//! out as Graphviz DOT for rendering.

pub mod counts;
pub mod edges;
pub mod render;
mod room_graph;

pub use counts::{count_rooms, RoomCounts};
pub use edges::{
    base_room_name, build_edges, build_illness_edges, display_name, filter_focus, RoomRole,
    DIAG_SUFFIX, TREAT_SUFFIX,
};
pub use render::{write_graph, Engine, GraphOutput, ImageFormat};
pub use room_graph::RoomGraph;

#[cfg(test)]
mod tests;
