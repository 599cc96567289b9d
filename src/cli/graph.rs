//! Graph command - write (and render) a room graph

use super::Settings;
use anyhow::{Context, Result};
use console::style;
use tps::graph::{
    build_edges, build_illness_edges, write_graph, Engine, GraphOutput, ImageFormat, RoomGraph,
};
use tps::models::Edge;
use tps::reference::HospitalView;

/// What part of a hospital to graph
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Hospital,
    Illness(String),
    Room(String),
}

/// Build edges for `target` and the file base name they are written under
pub fn target_edges(
    hospital: &HospitalView<'_>,
    target: &Target,
    separate_rooms: bool,
) -> Result<(String, Vec<Edge>)> {
    match target {
        Target::Hospital => Ok((
            hospital.name().to_string(),
            build_edges(hospital, separate_rooms, None)?,
        )),
        Target::Illness(name) => {
            if !hospital.illness_names().iter().any(|n| n == name) {
                anyhow::bail!("{} does not treat {}", hospital.name(), name);
            }
            let illness = hospital.data().illness(name)?;
            let edges = build_illness_edges(&illness, separate_rooms)
                .map_err(|e| e.within(hospital.name()))?;
            Ok((format!("{} - {}", hospital.name(), illness.name()), edges))
        }
        Target::Room(room) => Ok((
            format!("{} - {}", hospital.name(), room),
            build_edges(hospital, separate_rooms, Some(room.as_str()))?,
        )),
    }
}

/// Write the graph for `target` into the configured directory
pub fn write_target(
    settings: &Settings,
    hospital: &HospitalView<'_>,
    target: &Target,
    engine: Engine,
    format: Option<ImageFormat>,
) -> Result<GraphOutput> {
    let (base, edges) = target_edges(hospital, target, settings.separate_rooms)?;
    if edges.is_empty() {
        tracing::warn!("No edges for {}; writing an empty graph", base);
    }
    let graph = RoomGraph::from_edges(&base, &edges);
    write_graph(&graph, &settings.graph_dir, &base, engine, format)
        .with_context(|| format!("Failed to write graph for {}", base))
}

pub fn run(
    settings: &Settings,
    hospital: &str,
    target: Target,
    engine: Engine,
    format: Option<ImageFormat>,
) -> Result<()> {
    let hospital = settings.data.hospital(hospital)?;
    println!(
        "{} Creating a directed graph of {}...",
        style("📊").bold(),
        style(hospital.name()).cyan()
    );
    let output = write_target(settings, &hospital, &target, engine, format)?;
    print_output(&output);
    Ok(())
}

pub fn print_output(output: &GraphOutput) {
    println!(
        "{} Wrote {}",
        style("✓").green(),
        style(output.source.display()).cyan()
    );
    if let Some(image) = &output.image {
        println!(
            "{} Rendered {}",
            style("✓").green(),
            style(image.display()).cyan()
        );
    }
}
