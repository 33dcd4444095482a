use crate::{
    config::BuildConfig,
    foundation::core::FrameRange,
    foundation::error::{CascadeError, CascadeResult},
    graph::{
        envelope::{BlendEnvelope, crossfade_envelopes},
        group::{DomainGroup, group_timeline},
    },
    layout::track::Timeline,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SourceNode {
    pub id: String,
    /// 1-based position among source nodes.
    pub ordinal: u32,
    pub name: String,
    pub locator: String,
    pub visible_range: FrameRange,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BlendNode {
    pub id: String,
    /// 1-based position among blend nodes.
    pub ordinal: u32,
    pub foreground: String,
    pub background: String,
    pub envelope: BlendEnvelope,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphNode {
    Source(SourceNode),
    Blend(BlendNode),
}

impl GraphNode {
    pub fn id(&self) -> &str {
        match self {
            Self::Source(n) => &n.id,
            Self::Blend(n) => &n.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OutputNode {
    pub input: String,
}

/// First and last blend node of one crossfade group.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GroupChain {
    pub window: FrameRange,
    pub first_blend: String,
    pub last_blend: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompositingGraph {
    /// Node the first group blends over; not part of `nodes`.
    pub background: String,
    pub nodes: Vec<GraphNode>,
    pub groups: Vec<GroupChain>,
    pub output: OutputNode,
}

impl CompositingGraph {
    pub fn sources(&self) -> impl Iterator<Item = &SourceNode> {
        self.nodes.iter().filter_map(|n| match n {
            GraphNode::Source(s) => Some(s),
            GraphNode::Blend(_) => None,
        })
    }

    pub fn blends(&self) -> impl Iterator<Item = &BlendNode> {
        self.nodes.iter().filter_map(|n| match n {
            GraphNode::Blend(b) => Some(b),
            GraphNode::Source(_) => None,
        })
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }
}

#[derive(Debug)]
struct IdAllocator {
    sources: u32,
    blends: u32,
}

impl IdAllocator {
    fn next_source(&mut self) -> (u32, String) {
        self.sources += 1;
        (self.sources, format!("source_{}", self.sources))
    }

    fn next_blend(&mut self) -> (u32, String) {
        self.blends += 1;
        (self.blends, format!("blend_{}", self.blends))
    }
}

/// Chains every group's segments through blend nodes into one output.
///
/// Within a group each blend sits over the previous one; a group's first
/// blend sits over the previous group's last blend, or `background` for the
/// first group.
#[tracing::instrument(skip(groups), fields(groups = groups.len()))]
pub fn build_graph(groups: &[DomainGroup], background: &str) -> CascadeResult<CompositingGraph> {
    if groups.iter().all(|g| g.segments.is_empty()) {
        return Err(CascadeError::EmptyGraph);
    }

    let mut ids = IdAllocator {
        sources: 0,
        blends: 0,
    };
    let mut nodes = Vec::new();
    let mut chains = Vec::with_capacity(groups.len());
    let mut terminal = background.to_string();

    for group in groups {
        let envelopes =
            crossfade_envelopes(group.window, group.segments.len()).map_err(|err| match err {
                CascadeError::DegenerateCrossfade {
                    start,
                    end,
                    segments,
                    ..
                } => CascadeError::DegenerateCrossfade {
                    start,
                    end,
                    segments,
                    names: group.segments.iter().map(|s| s.name.clone()).collect(),
                },
                other => other,
            })?;
        let mut first_blend = None;
        for (segment, envelope) in group.segments.iter().zip(envelopes) {
            let (source_ordinal, source_id) = ids.next_source();
            nodes.push(GraphNode::Source(SourceNode {
                id: source_id.clone(),
                ordinal: source_ordinal,
                name: segment.name.clone(),
                locator: segment.locator.clone(),
                visible_range: group.window,
            }));

            let (blend_ordinal, blend_id) = ids.next_blend();
            nodes.push(GraphNode::Blend(BlendNode {
                id: blend_id.clone(),
                ordinal: blend_ordinal,
                foreground: source_id,
                background: std::mem::replace(&mut terminal, blend_id.clone()),
                envelope,
            }));
            first_blend.get_or_insert(blend_id);
        }
        if let Some(first_blend) = first_blend {
            chains.push(GroupChain {
                window: group.window,
                first_blend,
                last_blend: terminal.clone(),
            });
        }
    }

    tracing::debug!(nodes = nodes.len(), output = terminal.as_str(), "graph built");
    Ok(CompositingGraph {
        background: background.to_string(),
        nodes,
        groups: chains,
        output: OutputNode { input: terminal },
    })
}

/// Groups `timeline` per the configured scope and rate, then builds the graph.
pub fn build_graph_for_timeline(
    timeline: &Timeline,
    config: &BuildConfig,
) -> CascadeResult<CompositingGraph> {
    config.validate()?;
    let groups = group_timeline(timeline, config.comp_fps, config.group_scope);
    build_graph(&groups, &config.initial_background)
}

#[cfg(test)]
#[path = "../../tests/unit/graph/builder.rs"]
mod tests;
