use std::fmt;

/// Identity of a node inside its owning [`Graph`](super::Graph).
///
/// Ids are arena indices. A node can only reference ids smaller than its own, so the
/// operand relation is acyclic by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The primitive that produced a node, together with the ids of its operands.
///
/// The variant *is* the backward rule: [`Op::backward`] dispatches on it to apply the
/// matching local derivative. Subtraction, negation and division are not primitives,
/// they are composed from `Add`, `Mul` and `Pow`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// Input, parameter or wrapped constant.
    Leaf,
    Add(NodeId, NodeId),
    Mul(NodeId, NodeId),
    Tanh(NodeId),
    Relu(NodeId),
    Exp(NodeId),
    /// Power with a constant (non-differentiable) exponent.
    Pow(NodeId, f64),
}

impl Op {
    /// Iterates over the operands in a fixed order (left before right).
    pub fn operands(&self) -> impl DoubleEndedIterator<Item = NodeId> {
        let slots = match *self {
            Op::Leaf => [None, None],
            Op::Add(a, b) | Op::Mul(a, b) => [Some(a), Some(b)],
            Op::Tanh(a) | Op::Relu(a) | Op::Exp(a) | Op::Pow(a, _) => [Some(a), None],
        };
        slots.into_iter().flatten()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Op::Leaf)
    }
}

/// Renders the diagnostic tag of the operation (`+`, `*`, `tanh`, `relu`, `exp`,
/// `pow:k`). Leaves render as an empty string.
impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Leaf => Ok(()),
            Op::Add(..) => f.write_str("+"),
            Op::Mul(..) => f.write_str("*"),
            Op::Tanh(_) => f.write_str("tanh"),
            Op::Relu(_) => f.write_str("relu"),
            Op::Exp(_) => f.write_str("exp"),
            Op::Pow(_, k) => write!(f, "pow:{}", k),
        }
    }
}

/// A single vertex of the computation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) value: f64,
    pub(crate) grad: f64,
    pub(crate) op: Op,
    pub(crate) label: Option<String>,
}

impl Node {
    pub(crate) fn new(value: f64, op: Op) -> Self {
        Node {
            value,
            grad: 0.0,
            op,
            label: None,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Accumulated `d(root)/d(self)`; `0.0` until a backward pass reaches this node.
    pub fn grad(&self) -> f64 {
        self.grad
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
