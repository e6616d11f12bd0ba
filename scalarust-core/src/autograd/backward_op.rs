use super::node::{Node, NodeId, Op};

impl Op {
    /// Applies the local derivative of this operation.
    ///
    /// Reads the gradient already accumulated on `output` (the node this op produced)
    /// and *adds* the weighted contribution into each operand's gradient. Accumulation
    /// instead of assignment is what makes fan-out (one node consumed several times,
    /// including `x * x`) come out right.
    ///
    /// `nodes` is the whole arena; `output` must index into it and every operand id is
    /// smaller than `output`.
    pub(crate) fn backward(self, output: NodeId, nodes: &mut [Node]) {
        let out_value = nodes[output.0].value;
        let out_grad = nodes[output.0].grad;

        match self {
            Op::Leaf => {}
            Op::Add(a, b) => {
                nodes[a.0].grad += out_grad;
                nodes[b.0].grad += out_grad;
            }
            Op::Mul(a, b) => {
                let a_value = nodes[a.0].value;
                let b_value = nodes[b.0].value;
                nodes[a.0].grad += b_value * out_grad;
                nodes[b.0].grad += a_value * out_grad;
            }
            Op::Tanh(a) => {
                nodes[a.0].grad += (1.0 - out_value * out_value) * out_grad;
            }
            Op::Relu(a) => {
                // Strict test on the pre-activation input: the subgradient at 0 is 0.
                if nodes[a.0].value > 0.0 {
                    nodes[a.0].grad += out_grad;
                }
            }
            Op::Exp(a) => {
                // d/dx e^x = e^x, reuse the forward result.
                nodes[a.0].grad += out_value * out_grad;
            }
            Op::Pow(a, k) => {
                let a_value = nodes[a.0].value;
                nodes[a.0].grad += k * a_value.powf(k - 1.0) * out_grad;
            }
        }
    }
}
