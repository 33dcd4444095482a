//! Artifact writers. Each serializer renders a fully built value to text so
//! nothing reaches disk until the whole artifact exists.
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{CascadeError, CascadeResult},
    graph::builder::CompositingGraph,
    layout::track::Timeline,
};

pub mod fusion;
pub mod otio;

/// Renders a timeline into an interchange format.
pub trait TimelineWriter {
    fn write_timeline(&self, timeline: &Timeline) -> CascadeResult<String>;
}

/// Renders a compositing graph into a project format.
pub trait GraphSerializer {
    fn serialize_graph(&self, graph: &CompositingGraph) -> CascadeResult<String>;
}

/// Plain JSON dump of the structured graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonGraph;

impl GraphSerializer for JsonGraph {
    fn serialize_graph(&self, graph: &CompositingGraph) -> CascadeResult<String> {
        serde_json::to_string_pretty(graph).map_err(|e| CascadeError::serde(e.to_string()))
    }
}

pub fn ensure_parent_dir(path: &Path) -> CascadeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Writes an already rendered artifact.
pub fn write_artifact(path: &Path, contents: &str) -> CascadeResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}
