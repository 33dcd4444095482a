use crate::{
    config::BuildConfig,
    export::{GraphSerializer, TimelineWriter},
    foundation::error::CascadeResult,
    graph::builder::{CompositingGraph, build_graph_for_timeline},
    layout::{planner::build_timeline, track::Timeline},
    source::record::GenerationRecord,
};

/// Both artifacts of one batch, built but not yet rendered.
#[derive(Clone, Debug)]
pub struct Composed {
    pub timeline: Timeline,
    pub graph: CompositingGraph,
}

pub fn compose(records: &[GenerationRecord], config: &BuildConfig) -> CascadeResult<Composed> {
    let timeline = build_timeline(records, config)?;
    let graph = build_graph_for_timeline(&timeline, config)?;
    Ok(Composed { timeline, graph })
}

/// Text of both artifacts; fails before returning anything if either fails.
pub fn render_composed(
    composed: &Composed,
    timeline_writer: &dyn TimelineWriter,
    graph_serializer: &dyn GraphSerializer,
) -> CascadeResult<(String, String)> {
    let timeline = timeline_writer.write_timeline(&composed.timeline)?;
    let graph = graph_serializer.serialize_graph(&composed.graph)?;
    Ok((timeline, graph))
}
