use crate::autograd::{Graph, NodeId};
use crate::error::ScalarustError;
use std::fmt::Debug;

/// The base trait for all network building blocks (neurons, layers, networks).
///
/// Parameters are leaf nodes owned by a [`Graph`]; modules only remember their ids, so
/// a module does not borrow the graph and forward passes can be rebuilt every epoch.
pub trait Module: Debug {
    /// Returns the ids of all learnable parameters, including those of sub-modules,
    /// in a stable order.
    fn parameters(&self) -> Vec<NodeId>;

    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Resets the gradient of every parameter to zero.
    fn zero_grad(&self, graph: &Graph) -> Result<(), ScalarustError> {
        for param in self.parameters() {
            graph.zero_grad(param)?;
        }
        Ok(())
    }
}
