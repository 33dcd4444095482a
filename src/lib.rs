//! cascade lays generated video segments out on a multi-track timeline and
//! synthesizes a crossfading compositing graph from that layout.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `*.json` generation records -> [`GenerationRecord`]s
//! 2. **Place**: records -> [`Timeline`] (first free track per piece; overflow
//!    past a domain window is split into `_head`/`_tail` and rippled forward)
//! 3. **Group**: timeline -> [`DomainGroup`]s keyed by identical frame window
//! 4. **Blend**: groups -> [`CompositingGraph`] (one time-sliced crossfade per
//!    stacked segment, chained into a single output)
//! 5. **Export**: [`OtioJson`] for the timeline, [`FusionComp`] for the graph
//!
//! Builds are pure and deterministic for a given input order; artifacts are
//! rendered to strings in full before anything is written.
#![forbid(unsafe_code)]

pub mod config;
pub mod export;
pub mod foundation;
pub mod graph;
pub mod layout;
pub mod pipeline;
pub mod source;

pub use config::BuildConfig;
pub use export::fusion::{FusionComp, blend_expression};
pub use export::otio::OtioJson;
pub use export::{GraphSerializer, JsonGraph, TimelineWriter, write_artifact};
pub use foundation::core::{Fps, FrameIndex, FrameRange};
pub use foundation::error::{CascadeError, CascadeResult};
pub use graph::builder::{
    BlendNode, CompositingGraph, GraphNode, GroupChain, OutputNode, SourceNode, build_graph,
    build_graph_for_timeline,
};
pub use graph::envelope::{BlendEnvelope, crossfade_envelopes};
pub use graph::group::{DomainGroup, DomainGrouper, GroupScope, group_timeline, group_track};
pub use layout::ledger::{OccupancyLedger, PlacedInterval};
pub use layout::planner::{
    BuildContext, WindowPlacement, build_storyboard_timeline, build_timeline,
};
pub use layout::track::{Segment, Timeline, Track, TrackItem};
pub use pipeline::{Composed, compose, render_composed};
pub use source::load::{load_generation_records, load_storyboard};
pub use source::record::{DomainWindow, GenerationRecord, StoryboardClip, StoryboardRecord};
