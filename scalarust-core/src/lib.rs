//! Scalar reverse-mode automatic differentiation with a small neural-network layer on
//! top.
//!
//! ```
//! use scalarust_core::Graph;
//!
//! let graph = Graph::new();
//! let x = graph.leaf_labeled(2.0, "x");
//! let y = (x * x + 3.0 * x).tanh();
//! y.backward();
//! assert_eq!(y.grad(), 1.0);
//! assert!(x.grad() > 0.0);
//! ```

pub mod autograd;
pub mod error;
pub mod nn;
pub mod optim;
pub mod viz;

// Re-export the core types so they are reachable as `scalarust_core::Graph` etc.
pub use autograd::{Checkpoint, Graph, NodeId, Op, Scalar};
pub use error::ScalarustError;
