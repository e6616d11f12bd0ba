//! Scalar reverse-mode automatic differentiation.
//!
//! Nodes live in a [`Graph`] arena and are addressed by [`NodeId`]. [`Scalar`] handles
//! build expressions with ordinary operators; [`Graph::backward`] (or
//! [`Scalar::backward`]) runs the chain rule over the reverse topological order.

mod backward_op;
pub mod grad_check;
pub mod graph;
pub mod node;
pub mod ops;

pub use grad_check::{check_grad, GradCheckError};
pub use graph::{Checkpoint, Graph};
pub use node::{Node, NodeId, Op};
pub use ops::Scalar;
