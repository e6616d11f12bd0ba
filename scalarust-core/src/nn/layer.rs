use super::module::Module;
use super::neuron::Neuron;
use crate::autograd::{Graph, NodeId, Scalar};
use crate::error::ScalarustError;
use rand::Rng;
use std::fmt;

/// A fully connected layer of independent [`Neuron`]s sharing the same inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    neurons: Vec<Neuron>,
    name: String,
}

impl Layer {
    pub const DEFAULT_NAME: &'static str = "Dense";

    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        n_inputs: usize,
        n_outputs: usize,
        rng: &mut R,
    ) -> Result<Self, ScalarustError> {
        if n_outputs == 0 {
            return Err(ScalarustError::InvalidArchitecture(
                "a layer needs at least one neuron".to_string(),
            ));
        }
        let neurons = (0..n_outputs)
            .map(|_| Neuron::new(graph, n_inputs, &mut *rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Layer {
            neurons,
            name: Self::DEFAULT_NAME.to_string(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn n_inputs(&self) -> usize {
        self.neurons[0].n_inputs()
    }

    pub fn n_outputs(&self) -> usize {
        self.neurons.len()
    }

    pub fn forward<'g>(
        &self,
        graph: &'g Graph,
        x: &[f64],
    ) -> Result<Vec<Scalar<'g>>, ScalarustError> {
        self.check_inputs(x.len())?;
        let inputs: Vec<Scalar<'g>> = x.iter().map(|&v| graph.constant(v)).collect();
        self.forward_scalars(graph, &inputs)
    }

    pub fn forward_scalars<'g>(
        &self,
        graph: &'g Graph,
        x: &[Scalar<'g>],
    ) -> Result<Vec<Scalar<'g>>, ScalarustError> {
        self.check_inputs(x.len())?;
        self.neurons
            .iter()
            .map(|neuron| neuron.forward_scalars(graph, x))
            .collect()
    }

    fn check_inputs(&self, actual: usize) -> Result<(), ScalarustError> {
        let expected = self.n_inputs();
        if actual != expected {
            return Err(ScalarustError::ShapeMismatch {
                expected,
                actual,
                operation: format!("Layer::forward ({})", self.name),
            });
        }
        Ok(())
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<NodeId> {
        self.neurons
            .iter()
            .flat_map(|neuron| neuron.parameters())
            .collect()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer of {} {}s", self.neurons.len(), Neuron::NAME)
    }
}

#[cfg(test)]
#[path = "layer_test.rs"]
mod tests;
