//! Graphviz output
//!
//! The DOT source is always written to disk. Rendering an image shells out
//! to the Graphviz `dot` binary with the requested layout engine.

use super::RoomGraph;
use crate::error::{TpsError, TpsResult};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;
use tracing::{debug, info};

/// Graphviz executable used for every layout engine
pub const GRAPHVIZ_BINARY: &str = "dot";

/// Graphviz layout engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    Dot,
    Neato,
    Sfdp,
    Fdp,
    Circo,
    Twopi,
}

impl Engine {
    pub fn all() -> &'static [Engine] {
        &[
            Engine::Dot,
            Engine::Neato,
            Engine::Sfdp,
            Engine::Fdp,
            Engine::Circo,
            Engine::Twopi,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Dot => "dot",
            Engine::Neato => "neato",
            Engine::Sfdp => "sfdp",
            Engine::Fdp => "fdp",
            Engine::Circo => "circo",
            Engine::Twopi => "twopi",
        }
    }
}

impl FromStr for Engine {
    type Err = TpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Engine::all()
            .iter()
            .copied()
            .find(|engine| engine.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                TpsError::InvalidArgument(format!(
                    "Unknown engine '{}'. Valid engines: dot, neato, sfdp, fdp, circo, twopi",
                    s
                ))
            })
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendered image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Pdf,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Pdf => "pdf",
            ImageFormat::Svg => "svg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = TpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "pdf" => Ok(ImageFormat::Pdf),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(TpsError::InvalidArgument(format!(
                "Unknown image format '{}'. Valid formats: png, pdf, svg",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Files produced by [`write_graph`]
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOutput {
    pub source: PathBuf,
    pub image: Option<PathBuf>,
}

/// File stem for a graph: `<base> (<engine>)`, with path separators replaced
pub fn file_stem(base: &str, engine: Engine) -> String {
    let safe: String = base
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{safe} ({engine})")
}

/// Write the DOT source to `dir`, then render it when `format` is given.
///
/// The source file is left in place even when rendering fails.
pub fn write_graph(
    graph: &RoomGraph,
    dir: &Path,
    base: &str,
    engine: Engine,
    format: Option<ImageFormat>,
) -> TpsResult<GraphOutput> {
    std::fs::create_dir_all(dir)?;
    let stem = file_stem(base, engine);
    let source = dir.join(format!("{stem}.gv"));
    std::fs::write(&source, graph.to_dot())?;
    info!(
        path = %source.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Wrote graph source"
    );

    let image = match format {
        Some(format) => {
            let image = dir.join(format!("{stem}.{}", format.extension()));
            render_image(&source, &image, engine, format)?;
            Some(image)
        }
        None => None,
    };

    Ok(GraphOutput { source, image })
}

fn render_image(source: &Path, image: &Path, engine: Engine, format: ImageFormat) -> TpsResult<()> {
    debug!(engine = %engine, format = %format, "Running {}", GRAPHVIZ_BINARY);
    let output = Command::new(GRAPHVIZ_BINARY)
        .arg(format!("-K{engine}"))
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(image)
        .arg(source)
        .output()
        .map_err(|e| {
            TpsError::Render(format!(
                "could not run '{}' (is Graphviz installed?): {}",
                GRAPHVIZ_BINARY, e
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TpsError::Render(format!(
            "'{}' exited with {}: {}",
            GRAPHVIZ_BINARY,
            output.status,
            stderr.trim()
        )));
    }
    info!(path = %image.display(), "Rendered graph image");
    Ok(())
}

/// Graphviz version string, or None when the binary isn't on PATH
pub fn graphviz_version() -> Option<String> {
    let output = Command::new(GRAPHVIZ_BINARY).arg("-V").output().ok()?;
    if !output.status.success() {
        return None;
    }
    // `dot -V` reports on stderr
    let text = if output.stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        String::from_utf8_lossy(&output.stderr).into_owned()
    };
    Some(text.trim().to_string())
}
