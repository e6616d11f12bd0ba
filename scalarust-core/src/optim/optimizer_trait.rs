use crate::autograd::{Graph, NodeId};
use crate::error::ScalarustError;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers update parameter nodes in place from the gradients left by a backward
/// pass. They are the one place outside the engine that writes node values.
pub trait Optimizer {
    /// Performs a single optimization step over `params`.
    ///
    /// # Errors
    /// `UnknownNode` if a parameter id does not belong to `graph`.
    fn step(&mut self, graph: &Graph, params: &[NodeId]) -> Result<(), ScalarustError>;

    /// Clears the gradients of `params`.
    ///
    /// Gradients accumulate across backward passes, so this must run before every new
    /// pass in an iterative training loop.
    fn zero_grad(&mut self, graph: &Graph, params: &[NodeId]) -> Result<(), ScalarustError> {
        for &param in params {
            graph.zero_grad(param)?;
        }
        Ok(())
    }

    /// Current step size.
    fn learning_rate(&self) -> f64;
}
