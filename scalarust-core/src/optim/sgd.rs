use crate::autograd::{Graph, NodeId};
use crate::error::ScalarustError;
use crate::optim::optimizer_trait::Optimizer;
use log::debug;

/// Plain gradient descent: `p = p - lr * grad(p)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SgdOptimizer {
    lr: f64,
    steps: usize,
}

impl SgdOptimizer {
    /// Creates a new `SgdOptimizer`.
    ///
    /// # Errors
    /// `InvalidHyperparameter` unless `lr` is finite and strictly positive.
    pub fn new(lr: f64) -> Result<Self, ScalarustError> {
        if !lr.is_finite() || lr <= 0.0 {
            return Err(ScalarustError::InvalidHyperparameter {
                name: "lr".to_string(),
                value: lr,
            });
        }
        Ok(SgdOptimizer { lr, steps: 0 })
    }

    /// Number of `step` calls performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn set_learning_rate(&mut self, lr: f64) -> Result<(), ScalarustError> {
        self.lr = SgdOptimizer::new(lr)?.lr;
        Ok(())
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self, graph: &Graph, params: &[NodeId]) -> Result<(), ScalarustError> {
        for &param in params {
            let value = graph.value(param)?;
            let grad = graph.grad(param)?;
            graph.set_value(param, value - self.lr * grad)?;
        }
        self.steps += 1;
        debug!(
            "SgdOptimizer: step {} updated {} params with lr = {}",
            self.steps,
            params.len(),
            self.lr
        );
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
