//! Directed room graph for one hospital
//!
//! Nodes are room display names, one per distinct name. Parallel edges are
//! kept so repeated moves show up as thicker traffic in the rendered image.

use crate::models::Edge;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt::Write as _;

pub struct RoomGraph {
    name: String,
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl RoomGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Build a graph from edges in order
    pub fn from_edges(name: impl Into<String>, edges: &[Edge]) -> Self {
        let mut graph = Self::new(name);
        for edge in edges {
            graph.add_edge(&edge.from, &edge.to);
        }
        graph
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn node(&mut self, room: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(room) {
            return idx;
        }
        let idx = self.graph.add_node(room.to_string());
        self.node_map.insert(room.to_string(), idx);
        idx
    }

    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from_idx = self.node(from);
        let to_idx = self.node(to);
        self.graph.add_edge(from_idx, to_idx, ());
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Graphviz DOT source, edges in insertion order
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        let _ = writeln!(dot, "digraph {} {{", quote(&self.name));
        for edge in self.graph.raw_edges() {
            let _ = writeln!(
                dot,
                "\t{} -> {}",
                quote(&self.graph[edge.source()]),
                quote(&self.graph[edge.target()])
            );
        }
        dot.push_str("}\n");
        dot
    }
}

/// Quote a DOT identifier, escaping backslashes and double quotes
fn quote(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for ch in id.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
