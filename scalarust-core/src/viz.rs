//! Graphviz rendering of a computation graph.
//!
//! Produces DOT text: one `record` node per value showing its label, data and
//! gradient, plus a small node per operation sitting between the operands and the
//! value they produce. Rendering reads finished node state only.

use crate::autograd::{Graph, NodeId};
use crate::error::ScalarustError;
use log::debug;
use std::collections::BTreeSet;
use std::path::Path;

/// Collects every node reachable from `root` and the `(operand, consumer)` edges
/// between them.
pub fn trace(
    graph: &Graph,
    root: NodeId,
) -> Result<(BTreeSet<NodeId>, BTreeSet<(NodeId, NodeId)>), ScalarustError> {
    let mut nodes = BTreeSet::new();
    let mut edges = BTreeSet::new();
    let mut pending = vec![root];

    while let Some(id) = pending.pop() {
        if !nodes.insert(id) {
            continue;
        }
        for operand in graph.operands(id)? {
            edges.insert((operand, id));
            pending.push(operand);
        }
    }

    Ok((nodes, edges))
}

/// Renders the graph rooted at `root` as DOT text, left to right.
pub fn render_dot(graph: &Graph, root: NodeId) -> Result<String, ScalarustError> {
    let (nodes, edges) = trace(graph, root)?;
    let mut dot = String::from("digraph {\n    rankdir=LR;\n");

    for &id in &nodes {
        let node = graph.node(id)?;
        let uid = node_name(id);
        dot.push_str(&format!(
            "    {} [label=\"{{ {} | data: {:.4} | grad: {:.4} }}\", shape=record];\n",
            uid,
            escape_record(node.label().unwrap_or("")),
            node.value(),
            node.grad()
        ));
        if !node.op().is_leaf() {
            dot.push_str(&format!("    {}_op [label=\"{}\"];\n", uid, node.op()));
            dot.push_str(&format!("    {}_op -> {};\n", uid, uid));
        }
    }

    for &(operand, consumer) in &edges {
        dot.push_str(&format!(
            "    {} -> {}_op;\n",
            node_name(operand),
            node_name(consumer)
        ));
    }

    dot.push_str("}\n");
    debug!("render_dot: {} nodes, {} edges", nodes.len(), edges.len());
    Ok(dot)
}

/// Renders the graph rooted at `root` and writes it to `path`.
pub fn write_dot(graph: &Graph, root: NodeId, path: impl AsRef<Path>) -> Result<(), ScalarustError> {
    let dot = render_dot(graph, root)?;
    std::fs::write(path.as_ref(), dot)?;
    debug!("write_dot: wrote {}", path.as_ref().display());
    Ok(())
}

fn node_name(id: NodeId) -> String {
    format!("n{}", id.index())
}

/// Escapes characters that carry meaning inside a Graphviz record label.
fn escape_record(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
#[path = "viz_test.rs"]
mod tests;
