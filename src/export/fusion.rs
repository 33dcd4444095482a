use std::collections::HashMap;

use crate::{
    export::GraphSerializer,
    foundation::error::{CascadeError, CascadeResult},
    graph::builder::{BlendNode, CompositingGraph, GraphNode, SourceNode},
    graph::envelope::BlendEnvelope,
};

const HEADER: &str = "Composition {\n\tTools = ordered() {\n";
const FOOTER: &str = "\t}\n}\n";

/// Fusion composition text: one `Loader` per source, one `Merge` per blend,
/// a single `MediaOut`.
#[derive(Clone, Debug)]
pub struct FusionComp {
    /// Tool the graph's background id is bound to.
    pub background_tool: String,
}

impl Default for FusionComp {
    fn default() -> Self {
        Self {
            background_tool: "MediaIn1".to_string(),
        }
    }
}

/// Blend weight as a Fusion expression over `time`.
pub fn blend_expression(envelope: BlendEnvelope) -> String {
    let fade_in = envelope.fade_in;
    let fade_out = envelope.fade_out;
    let ramp = envelope.ramp_frames();
    format!(
        "if(time >= {fade_in} and time <= {fade_out}, (time - {fade_in}) / ({ramp}), time < {fade_in} and 0 or 1)"
    )
}

/// Escapes a value for a double-quoted Fusion string.
pub fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn loader_name(node: &SourceNode) -> String {
    format!("Loader{}", node.ordinal)
}

fn merge_name(node: &BlendNode) -> String {
    format!("Merge{}", node.ordinal)
}

fn pos(x_slot: u32, y: u32) -> String {
    format!(
        "ViewInfo = OperatorInfo {{ Pos = {{ {}, {y} }} }}",
        100 + 100 * x_slot
    )
}

fn loader_block(node: &SourceNode) -> String {
    format!(
        "\t\t{name} = Loader {{\n\
         \t\t\tClips = {{\n\
         \t\t\t\tClip {{ ID = \"Clip1\", Filename = \"{file}\", GlobalStart = {start}, GlobalEnd = {end} }}\n\
         \t\t\t}},\n\
         \t\t\t{pos}\n\
         \t\t}}",
        name = loader_name(node),
        file = escape_string(&node.locator),
        start = node.visible_range.start.0,
        end = node.visible_range.end.0,
        pos = pos(node.ordinal, 50),
    )
}

fn merge_block(node: &BlendNode, foreground: &str, background: &str) -> String {
    format!(
        "\t\t{name} = Merge {{\n\
         \t\t\tCtrlWZoom = false,\n\
         \t\t\tInputs = {{\n\
         \t\t\t\tBlend = Input {{ Expression = \"{expr}\" }},\n\
         \t\t\t\tForeground = Input {{ SourceOp = \"{foreground}\", Source = \"Output\" }},\n\
         \t\t\t\tBackground = Input {{ SourceOp = \"{background}\", Source = \"Output\" }}\n\
         \t\t\t}},\n\
         \t\t\t{pos}\n\
         \t\t}}",
        name = merge_name(node),
        expr = blend_expression(node.envelope),
        pos = pos(node.ordinal, 150),
    )
}

fn media_out_block(input: &str, x_slot: u32) -> String {
    format!(
        "\t\tMediaOut1 = MediaOut {{\n\
         \t\t\tInputs = {{\n\
         \t\t\t\tIndex = Input {{ Value = \"0\" }},\n\
         \t\t\t\tInput = Input {{ SourceOp = \"{input}\", Source = \"Output\" }}\n\
         \t\t\t}},\n\
         \t\t\t{pos}\n\
         \t\t}}",
        pos = pos(x_slot, 200),
    )
}

impl FusionComp {
    fn tool_names<'g>(&self, graph: &'g CompositingGraph) -> HashMap<&'g str, String> {
        let mut names = HashMap::with_capacity(graph.nodes.len() + 1);
        names.insert(graph.background.as_str(), self.background_tool.clone());
        for node in &graph.nodes {
            let name = match node {
                GraphNode::Source(s) => loader_name(s),
                GraphNode::Blend(b) => merge_name(b),
            };
            names.insert(node.id(), name);
        }
        names
    }
}

impl GraphSerializer for FusionComp {
    fn serialize_graph(&self, graph: &CompositingGraph) -> CascadeResult<String> {
        let names = self.tool_names(graph);
        let resolve = |id: &str| {
            names.get(id).cloned().ok_or_else(|| {
                CascadeError::validation(format!("graph references unknown node '{id}'"))
            })
        };

        let mut blocks = Vec::with_capacity(graph.nodes.len() + 1);
        let mut merges = 0u32;
        for node in &graph.nodes {
            match node {
                GraphNode::Source(s) => blocks.push(loader_block(s)),
                GraphNode::Blend(b) => {
                    let foreground = resolve(&b.foreground)?;
                    let background = resolve(&b.background)?;
                    blocks.push(merge_block(b, &foreground, &background));
                    merges += 1;
                }
            }
        }
        if merges == 0 {
            return Err(CascadeError::EmptyGraph);
        }
        let output = resolve(&graph.output.input)?;
        blocks.push(media_out_block(&output, merges + 1));

        let mut out = String::with_capacity(HEADER.len() + FOOTER.len() + blocks.len() * 256);
        out.push_str(HEADER);
        out.push_str(&blocks.join(",\n"));
        out.push('\n');
        out.push_str(FOOTER);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/fusion.rs"]
mod tests;
