use crate::autograd::{Graph, NodeId};
use crate::error::ScalarustError;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Lower bound of the default parameter initialisation range.
pub const INIT_LOW: f64 = -1.0;
/// Upper bound of the default parameter initialisation range.
pub const INIT_HIGH: f64 = 1.0;

/// Creates `count` leaf nodes with values drawn uniformly from `[low, high]`.
///
/// The random source is supplied by the caller so that initialisation is reproducible
/// with a seeded generator.
///
/// # Errors
/// `InvalidHyperparameter` if a bound is not finite or `low > high`.
pub fn uniform_<R: Rng + ?Sized>(
    graph: &Graph,
    rng: &mut R,
    count: usize,
    low: f64,
    high: f64,
) -> Result<Vec<NodeId>, ScalarustError> {
    let distribution = uniform_distribution(low, high)?;
    Ok((0..count)
        .map(|_| graph.leaf(distribution.sample(rng)).id())
        .collect())
}

/// Creates a single leaf node drawn uniformly from `[low, high]`.
pub fn uniform_scalar<R: Rng + ?Sized>(
    graph: &Graph,
    rng: &mut R,
    low: f64,
    high: f64,
) -> Result<NodeId, ScalarustError> {
    let distribution = uniform_distribution(low, high)?;
    Ok(graph.leaf(distribution.sample(rng)).id())
}

fn uniform_distribution(low: f64, high: f64) -> Result<Uniform<f64>, ScalarustError> {
    if !low.is_finite() {
        return Err(ScalarustError::InvalidHyperparameter {
            name: "low".to_string(),
            value: low,
        });
    }
    if !high.is_finite() || low > high {
        return Err(ScalarustError::InvalidHyperparameter {
            name: "high".to_string(),
            value: high,
        });
    }
    Ok(Uniform::new_inclusive(low, high))
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
