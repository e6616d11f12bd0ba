use super::init::{uniform_, uniform_scalar, INIT_HIGH, INIT_LOW};
use super::module::Module;
use crate::autograd::{Graph, NodeId, Scalar};
use crate::error::ScalarustError;
use rand::Rng;
use std::fmt;

/// A single tanh unit: `tanh(b + Σ wᵢxᵢ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Vec<NodeId>,
    bias: NodeId,
}

impl Neuron {
    pub const NAME: &'static str = "Tanh-Neuron";

    /// Creates a neuron with `n_inputs` weights and a bias, all drawn uniformly from
    /// `[-1, 1]` using `rng`.
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        n_inputs: usize,
        rng: &mut R,
    ) -> Result<Self, ScalarustError> {
        if n_inputs == 0 {
            return Err(ScalarustError::InvalidArchitecture(
                "a neuron needs at least one input".to_string(),
            ));
        }
        let weights = uniform_(graph, rng, n_inputs, INIT_LOW, INIT_HIGH)?;
        let bias = uniform_scalar(graph, rng, INIT_LOW, INIT_HIGH)?;
        Ok(Neuron { weights, bias })
    }

    pub fn n_inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[NodeId] {
        &self.weights
    }

    pub fn bias(&self) -> NodeId {
        self.bias
    }

    /// Forward pass over raw numbers, each wrapped as a constant leaf.
    ///
    /// # Errors
    /// `ShapeMismatch` if `x.len()` differs from the number of weights.
    pub fn forward<'g>(&self, graph: &'g Graph, x: &[f64]) -> Result<Scalar<'g>, ScalarustError> {
        self.check_inputs(x.len())?;
        let inputs: Vec<Scalar<'g>> = x.iter().map(|&v| graph.constant(v)).collect();
        self.forward_scalars(graph, &inputs)
    }

    /// Forward pass over nodes of `graph` (e.g. the outputs of a previous layer).
    pub fn forward_scalars<'g>(
        &self,
        graph: &'g Graph,
        x: &[Scalar<'g>],
    ) -> Result<Scalar<'g>, ScalarustError> {
        self.check_inputs(x.len())?;
        let mut activation = graph.scalar(self.bias)?;
        for (&w, &xi) in self.weights.iter().zip(x) {
            activation = activation + graph.scalar(w)? * xi;
        }
        Ok(activation.tanh())
    }

    fn check_inputs(&self, actual: usize) -> Result<(), ScalarustError> {
        if actual != self.weights.len() {
            return Err(ScalarustError::ShapeMismatch {
                expected: self.weights.len(),
                actual,
                operation: "Neuron::forward".to_string(),
            });
        }
        Ok(())
    }
}

impl Module for Neuron {
    /// Weights in input order, then the bias.
    fn parameters(&self) -> Vec<NodeId> {
        let mut params = self.weights.clone();
        params.push(self.bias);
        params
    }
}

impl fmt::Display for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", Self::NAME, self.weights.len())
    }
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests;
