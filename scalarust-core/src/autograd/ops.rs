use super::graph::Graph;
use super::node::{NodeId, Op};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Handle to a node of a [`Graph`].
///
/// `Scalar` is `Copy`: it is just the graph reference plus the node id, so expressions
/// can reuse sub-expressions freely (`let y = x * x + x;`). Each arithmetic operation
/// appends a new node to the graph and returns a handle to it.
///
/// Plain `f64` values are accepted on either side of `+ - * /` and are wrapped as
/// constant leaves.
///
/// Combining handles that belong to two different graphs panics.
#[derive(Clone, Copy)]
pub struct Scalar<'g> {
    graph: &'g Graph,
    id: NodeId,
}

impl<'g> Scalar<'g> {
    pub(crate) fn new(graph: &'g Graph, id: NodeId) -> Self {
        Scalar { graph, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn graph(self) -> &'g Graph {
        self.graph
    }

    pub fn value(self) -> f64 {
        self.graph.value_unchecked(self.id)
    }

    pub fn grad(self) -> f64 {
        self.graph.grad_unchecked(self.id)
    }

    pub fn op(self) -> Op {
        self.graph.op_unchecked(self.id)
    }

    pub fn label(self) -> Option<String> {
        self.graph.label_unchecked(self.id)
    }

    pub fn operands(self) -> Vec<Scalar<'g>> {
        self.op()
            .operands()
            .map(|id| Scalar::new(self.graph, id))
            .collect()
    }

    /// Attaches a cosmetic label and returns the same handle.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.graph.set_label_unchecked(self.id, label.into());
        self
    }

    /// Hyperbolic tangent through the exponential identity, evaluated as
    /// `sign(x) * (1 - e^-2|x|) / (1 + e^-2|x|)` so large inputs saturate to `±1`
    /// instead of overflowing.
    pub fn tanh(self) -> Scalar<'g> {
        let x = self.value();
        let e = (-2.0 * x.abs()).exp();
        let t = ((1.0 - e) / (1.0 + e)).copysign(x);
        self.derive(t, Op::Tanh(self.id))
    }

    /// `max(0, x)`. A NaN input stays NaN.
    pub fn relu(self) -> Scalar<'g> {
        let x = self.value();
        let out = if x < 0.0 { 0.0 } else { x };
        self.derive(out, Op::Relu(self.id))
    }

    pub fn exp(self) -> Scalar<'g> {
        let out = self.value().exp();
        self.derive(out, Op::Exp(self.id))
    }

    /// Raises to a constant power. Negative and fractional exponents are allowed; a
    /// fractional power of a negative number yields NaN.
    pub fn pow(self, exponent: f64) -> Scalar<'g> {
        let out = self.value().powf(exponent);
        self.derive(out, Op::Pow(self.id, exponent))
    }

    /// Runs the backward pass with this node as root, see [`Graph::backward`].
    pub fn backward(self) {
        self.graph.backward_unchecked(self.id);
    }

    fn derive(self, value: f64, op: Op) -> Scalar<'g> {
        Scalar::new(self.graph, self.graph.push(value, op))
    }

    fn assert_same_graph(self, other: Scalar<'g>, operation: &str) {
        assert!(
            std::ptr::eq(self.graph, other.graph),
            "Cannot apply '{}' to scalars {} and {} from different graphs.",
            operation,
            self.id,
            other.id
        );
    }
}

impl<'g> PartialEq for Scalar<'g> {
    /// Identity comparison: same graph, same node. Two nodes holding equal values are
    /// different vertices.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

impl<'g> Eq for Scalar<'g> {}

impl<'g> Hash for Scalar<'g> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<'g> fmt::Debug for Scalar<'g> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scalar")
            .field("id", &self.id)
            .field("value", &self.value())
            .field("grad", &self.grad())
            .field("op", &self.op())
            .finish()
    }
}

impl<'g> fmt::Display for Scalar<'g> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(data={:?})", self.value())
    }
}

// --- Primitive binary operations ---

impl<'g> Add for Scalar<'g> {
    type Output = Scalar<'g>;

    fn add(self, rhs: Scalar<'g>) -> Scalar<'g> {
        self.assert_same_graph(rhs, "+");
        self.derive(self.value() + rhs.value(), Op::Add(self.id, rhs.id))
    }
}

impl<'g> Mul for Scalar<'g> {
    type Output = Scalar<'g>;

    fn mul(self, rhs: Scalar<'g>) -> Scalar<'g> {
        self.assert_same_graph(rhs, "*");
        self.derive(self.value() * rhs.value(), Op::Mul(self.id, rhs.id))
    }
}

// --- Derived operations ---

impl<'g> Neg for Scalar<'g> {
    type Output = Scalar<'g>;

    fn neg(self) -> Scalar<'g> {
        self * -1.0
    }
}

impl<'g> Sub for Scalar<'g> {
    type Output = Scalar<'g>;

    fn sub(self, rhs: Scalar<'g>) -> Scalar<'g> {
        self + (-rhs)
    }
}

impl<'g> Div for Scalar<'g> {
    type Output = Scalar<'g>;

    fn div(self, rhs: Scalar<'g>) -> Scalar<'g> {
        self * rhs.pow(-1.0)
    }
}

// --- Constant wrapping on either side ---

macro_rules! impl_scalar_f64_op {
    ($trait:ident, $method:ident) => {
        impl<'g> $trait<f64> for Scalar<'g> {
            type Output = Scalar<'g>;

            fn $method(self, rhs: f64) -> Scalar<'g> {
                let rhs = self.graph.constant(rhs);
                $trait::$method(self, rhs)
            }
        }

        impl<'g> $trait<Scalar<'g>> for f64 {
            type Output = Scalar<'g>;

            fn $method(self, rhs: Scalar<'g>) -> Scalar<'g> {
                let lhs = rhs.graph.constant(self);
                $trait::$method(lhs, rhs)
            }
        }
    };
}

impl_scalar_f64_op!(Add, add);
impl_scalar_f64_op!(Sub, sub);
impl_scalar_f64_op!(Mul, mul);
impl_scalar_f64_op!(Div, div);

#[cfg(test)]
#[path = "ops_test.rs"]
mod tests;
