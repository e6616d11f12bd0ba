use super::layer::Layer;
use super::losses::sum_squared_error;
use super::module::Module;
use crate::autograd::{Graph, NodeId, Scalar};
use crate::error::ScalarustError;
use crate::optim::Optimizer;
use log::{debug, info};
use rand::Rng;

/// Per-epoch record of a training run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub loss: Vec<f64>,
}

impl History {
    pub fn final_loss(&self) -> Option<f64> {
        self.loss.last().copied()
    }
}

/// Multi-layer perceptron: a stack of tanh [`Layer`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Builds a network taking `n_inputs` values, with one layer per entry of
    /// `layer_sizes` (e.g. `[4, 4, 1]`: two hidden layers of 4 and a single output).
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        n_inputs: usize,
        layer_sizes: &[usize],
        rng: &mut R,
    ) -> Result<Self, ScalarustError> {
        if layer_sizes.is_empty() {
            return Err(ScalarustError::InvalidArchitecture(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut fan_in = n_inputs;
        for &size in layer_sizes {
            layers.push(Layer::new(graph, fan_in, size, rng)?);
            fan_in = size;
        }
        Ok(Mlp { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn n_inputs(&self) -> usize {
        self.layers[0].n_inputs()
    }

    pub fn n_outputs(&self) -> usize {
        self.layers[self.layers.len() - 1].n_outputs()
    }

    /// Runs one sample through every layer.
    ///
    /// # Errors
    /// `ShapeMismatch` if `x.len()` differs from the network's input width.
    pub fn forward<'g>(
        &self,
        graph: &'g Graph,
        x: &[f64],
    ) -> Result<Vec<Scalar<'g>>, ScalarustError> {
        if x.len() != self.n_inputs() {
            return Err(ScalarustError::ShapeMismatch {
                expected: self.n_inputs(),
                actual: x.len(),
                operation: "Mlp::forward".to_string(),
            });
        }
        let mut activations: Vec<Scalar<'g>> = x.iter().map(|&v| graph.constant(v)).collect();
        for layer in &self.layers {
            activations = layer.forward_scalars(graph, &activations)?;
        }
        Ok(activations)
    }

    pub fn forward_batch<'g, X: AsRef<[f64]>>(
        &self,
        graph: &'g Graph,
        xs: &[X],
    ) -> Result<Vec<Vec<Scalar<'g>>>, ScalarustError> {
        xs.iter().map(|x| self.forward(graph, x.as_ref())).collect()
    }

    /// Human-readable overview of the architecture.
    pub fn summary(&self) -> String {
        let mut out = String::from("===== Model Summary =====\n");
        for (index, layer) in self.layers.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} {}: {} params\n",
                index + 1,
                layer.name(),
                layer,
                layer.num_parameters()
            ));
        }
        out.push_str("=========================\n");
        out.push_str(&format!("Total trainable parameters: {}", self.num_parameters()));
        info!("\n{}", out);
        out
    }

    /// Gradient-descent training loop on the sum of squared errors of the first output.
    ///
    /// Every epoch runs a forward pass over all samples, zeroes the parameter
    /// gradients, differentiates the loss, lets `optimizer` update the parameters and
    /// finally rewinds `graph` so that per-epoch nodes do not pile up. Only nodes
    /// created before the call survive.
    ///
    /// # Errors
    /// * `LengthMismatch` if `xs` and `ys` differ in length.
    /// * `EmptyDataset` if there are no samples.
    /// * `ShapeMismatch` if a sample has the wrong width.
    /// * `UnknownNode` if the parameters are no longer part of `graph`.
    pub fn fit<X: AsRef<[f64]>>(
        &self,
        graph: &mut Graph,
        xs: &[X],
        ys: &[f64],
        optimizer: &mut dyn Optimizer,
        epochs: usize,
    ) -> Result<History, ScalarustError> {
        if xs.len() != ys.len() {
            return Err(ScalarustError::LengthMismatch {
                inputs: xs.len(),
                targets: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(ScalarustError::EmptyDataset);
        }

        let params = self.parameters();
        let checkpoint = graph.checkpoint();
        let mut history = History::default();
        debug!(
            "fit: {} samples, {} params, {} epochs, lr = {}",
            xs.len(),
            params.len(),
            epochs,
            optimizer.learning_rate()
        );

        for epoch in 0..epochs {
            let loss_value = {
                let graph: &Graph = graph;
                let predictions = self.forward_batch(graph, xs)?;
                optimizer.zero_grad(graph, &params)?;

                let firsts: Vec<Scalar<'_>> = predictions
                    .iter()
                    .filter_map(|outputs| outputs.first().copied())
                    .collect();
                let loss = sum_squared_error(graph, &firsts, ys)?;
                loss.backward();
                optimizer.step(graph, &params)?;
                loss.value()
            };
            info!("epoch {} loss: {}", epoch, loss_value);
            history.loss.push(loss_value);
            graph.rewind(checkpoint)?;
        }

        Ok(history)
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<NodeId> {
        self.layers
            .iter()
            .flat_map(|layer| layer.parameters())
            .collect()
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
