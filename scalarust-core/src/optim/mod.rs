//! Optimizers for training networks built on the scalar engine.
//!
//! This module provides the `Optimizer` trait and plain gradient descent.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::SgdOptimizer;
