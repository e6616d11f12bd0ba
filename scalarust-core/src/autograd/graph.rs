use super::node::{Node, NodeId, Op};
use super::ops::Scalar;
use crate::error::ScalarustError;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashSet;

/// Arena owning every node of a computation graph.
///
/// Nodes are appended as expressions are built through [`Scalar`] handles and are
/// never mutated by the operations themselves. Only a backward pass (gradients) and
/// trusted callers such as optimizers (`set_value`, `set_grad`) write to existing nodes.
///
/// A `Graph` is meant to be driven from one thread: interior mutability is a
/// `RefCell`, so the type is `Send` but not `Sync`.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: RefCell<Vec<Node>>,
}

/// Marker for the size of a graph at some point in time, see [`Graph::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Number of nodes that survive a rewind to this checkpoint.
    pub fn len(self) -> usize {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Graph {
            nodes: RefCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Number of nodes currently held by the arena.
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Creates an unlabelled leaf node.
    pub fn leaf(&self, value: f64) -> Scalar<'_> {
        let id = self.push(value, Op::Leaf);
        Scalar::new(self, id)
    }

    /// Creates a labelled leaf node. The label is cosmetic (diagnostics, rendering).
    pub fn leaf_labeled(&self, value: f64, label: impl Into<String>) -> Scalar<'_> {
        let id = self.push(value, Op::Leaf);
        self.nodes.borrow_mut()[id.0].label = Some(label.into());
        Scalar::new(self, id)
    }

    /// Wraps a plain number as a leaf. Its gradient is computed like any other node's
    /// but nobody is expected to read it.
    pub fn constant(&self, value: f64) -> Scalar<'_> {
        self.leaf(value)
    }

    /// Sums the given scalars. An empty input yields a constant `0.0`.
    pub fn sum<'g, I>(&'g self, terms: I) -> Scalar<'g>
    where
        I: IntoIterator<Item = Scalar<'g>>,
    {
        let mut terms = terms.into_iter();
        match terms.next() {
            Some(first) => terms.fold(first, |acc, term| acc + term),
            None => self.constant(0.0),
        }
    }

    /// Rebuilds a handle for a node created earlier on this graph.
    pub fn scalar(&self, id: NodeId) -> Result<Scalar<'_>, ScalarustError> {
        self.check(id)?;
        Ok(Scalar::new(self, id))
    }

    pub fn value(&self, id: NodeId) -> Result<f64, ScalarustError> {
        self.with_node(id, |node| node.value)
    }

    pub fn grad(&self, id: NodeId) -> Result<f64, ScalarustError> {
        self.with_node(id, |node| node.grad)
    }

    pub fn op(&self, id: NodeId) -> Result<Op, ScalarustError> {
        self.with_node(id, |node| node.op)
    }

    pub fn label(&self, id: NodeId) -> Result<Option<String>, ScalarustError> {
        self.with_node(id, |node| node.label.clone())
    }

    pub fn operands(&self, id: NodeId) -> Result<Vec<NodeId>, ScalarustError> {
        self.with_node(id, |node| node.op.operands().collect())
    }

    /// Returns a copy of the node.
    pub fn node(&self, id: NodeId) -> Result<Node, ScalarustError> {
        self.with_node(id, Node::clone)
    }

    pub fn set_label(&self, id: NodeId, label: impl Into<String>) -> Result<(), ScalarustError> {
        self.with_node_mut(id, |node| node.label = Some(label.into()))
    }

    /// Overwrites the value of an existing node.
    ///
    /// Reserved for parameter updates after a backward pass: values of non-leaf nodes
    /// already computed from this one are *not* recomputed.
    pub fn set_value(&self, id: NodeId, value: f64) -> Result<(), ScalarustError> {
        self.with_node_mut(id, |node| node.value = value)
    }

    pub fn set_grad(&self, id: NodeId, grad: f64) -> Result<(), ScalarustError> {
        self.with_node_mut(id, |node| node.grad = grad)
    }

    pub fn zero_grad(&self, id: NodeId) -> Result<(), ScalarustError> {
        self.set_grad(id, 0.0)
    }

    /// Resets the gradient of every node in the arena.
    pub fn zero_grad_all(&self) {
        for node in self.nodes.borrow_mut().iter_mut() {
            node.grad = 0.0;
        }
    }

    /// Remembers the current size of the graph.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.len())
    }

    /// Drops every node created after `checkpoint`.
    ///
    /// Requires `&mut self`, so no [`Scalar`] handle can survive the nodes it names.
    /// Bare [`NodeId`]s pointing past the checkpoint become unknown to the graph.
    pub fn rewind(&mut self, checkpoint: Checkpoint) -> Result<(), ScalarustError> {
        let nodes = self.nodes.get_mut();
        if checkpoint.0 > nodes.len() {
            return Err(ScalarustError::InvalidCheckpoint {
                checkpoint: checkpoint.0,
                len: nodes.len(),
            });
        }
        if checkpoint.0 == nodes.len() {
            warn!("rewind: checkpoint {} matches the current graph size, nothing to drop", checkpoint.0);
        }
        debug!("rewind: dropping {} nodes", nodes.len() - checkpoint.0);
        nodes.truncate(checkpoint.0);
        Ok(())
    }

    /// Topological order of every node reachable from `root` (operands first, `root` last).
    pub fn topological_order(&self, root: NodeId) -> Result<Vec<NodeId>, ScalarustError> {
        self.check(root)?;
        Ok(topological_sort(&self.nodes.borrow(), root))
    }

    /// Computes `d(root)/d(node)` for every ancestor of `root`.
    ///
    /// Seeds `root`'s gradient with `1.0` and runs each node's backward rule in reverse
    /// topological order. Gradients are *accumulated*: callers running several passes
    /// over overlapping graphs must zero the gradients they care about in between.
    pub fn backward(&self, root: NodeId) -> Result<(), ScalarustError> {
        self.check(root)?;
        self.backward_unchecked(root);
        Ok(())
    }

    pub(crate) fn backward_unchecked(&self, root: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let order = topological_sort(&nodes, root);
        debug!("backward: {} nodes reachable from {}", order.len(), root);

        if !nodes[root.0].value.is_finite() {
            warn!(
                "backward: root {} has non-finite value {}, gradients will not be meaningful",
                root, nodes[root.0].value
            );
        }

        nodes[root.0].grad = 1.0;
        for &id in order.iter().rev() {
            let op = nodes[id.0].op;
            op.backward(id, &mut nodes);
        }
    }

    pub(crate) fn push(&self, value: f64, op: Op) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node::new(value, op));
        id
    }

    pub(crate) fn value_unchecked(&self, id: NodeId) -> f64 {
        self.nodes.borrow()[id.0].value
    }

    pub(crate) fn grad_unchecked(&self, id: NodeId) -> f64 {
        self.nodes.borrow()[id.0].grad
    }

    pub(crate) fn op_unchecked(&self, id: NodeId) -> Op {
        self.nodes.borrow()[id.0].op
    }

    pub(crate) fn label_unchecked(&self, id: NodeId) -> Option<String> {
        self.nodes.borrow()[id.0].label.clone()
    }

    pub(crate) fn set_label_unchecked(&self, id: NodeId, label: String) {
        self.nodes.borrow_mut()[id.0].label = Some(label);
    }

    fn check(&self, id: NodeId) -> Result<(), ScalarustError> {
        let len = self.len();
        if id.0 < len {
            Ok(())
        } else {
            Err(ScalarustError::UnknownNode { id: id.0, len })
        }
    }

    fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&Node) -> R) -> Result<R, ScalarustError> {
        let nodes = self.nodes.borrow();
        nodes
            .get(id.0)
            .map(f)
            .ok_or(ScalarustError::UnknownNode { id: id.0, len: nodes.len() })
    }

    fn with_node_mut<R>(
        &self,
        id: NodeId,
        f: impl FnOnce(&mut Node) -> R,
    ) -> Result<R, ScalarustError> {
        let mut nodes = self.nodes.borrow_mut();
        let len = nodes.len();
        nodes
            .get_mut(id.0)
            .map(f)
            .ok_or(ScalarustError::UnknownNode { id: id.0, len })
    }
}

/// Depth-first post-order over the operand edges reachable from `root`.
///
/// Every node appears after all of its operands. The visited set is keyed by node
/// identity, never by value. An explicit stack replaces recursion so long expression
/// chains cannot exhaust the call stack; the order produced is the one the recursive
/// formulation (visit operands left to right, then emit the node) yields.
pub(crate) fn topological_sort(nodes: &[Node], root: NodeId) -> Vec<NodeId> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted_list = Vec::new();
    // (node, operands already scheduled)
    let mut stack = vec![(root, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            sorted_list.push(id);
            continue;
        }
        if !visited.insert(id) {
            continue;
        }
        stack.push((id, true));
        for operand in nodes[id.0].op.operands().rev() {
            if !visited.contains(&operand) {
                stack.push((operand, false));
            }
        }
    }

    sorted_list
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
