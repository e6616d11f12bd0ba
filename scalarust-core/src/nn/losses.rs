use crate::autograd::{Graph, Scalar};
use crate::error::ScalarustError;

/// Specifies the reduction to apply to the per-sample squared errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    Mean,
    #[default]
    Sum,
}

/// Squared-error loss between predictions and targets.
///
/// # Errors
/// * `LengthMismatch` if the slices differ in length.
/// * `EmptyDataset` if there is nothing to compare.
pub fn mse_loss<'g>(
    graph: &'g Graph,
    predictions: &[Scalar<'g>],
    targets: &[f64],
    reduction: Reduction,
) -> Result<Scalar<'g>, ScalarustError> {
    if predictions.len() != targets.len() {
        return Err(ScalarustError::LengthMismatch {
            inputs: predictions.len(),
            targets: targets.len(),
        });
    }
    if predictions.is_empty() {
        return Err(ScalarustError::EmptyDataset);
    }

    let total = graph.sum(
        predictions
            .iter()
            .zip(targets)
            .map(|(&prediction, &target)| (prediction - target).pow(2.0)),
    );
    Ok(match reduction {
        Reduction::Sum => total,
        Reduction::Mean => total / predictions.len() as f64,
    })
}

/// Sum of squared errors, the loss minimised by [`Mlp::fit`](super::Mlp::fit).
pub fn sum_squared_error<'g>(
    graph: &'g Graph,
    predictions: &[Scalar<'g>],
    targets: &[f64],
) -> Result<Scalar<'g>, ScalarustError> {
    mse_loss(graph, predictions, targets, Reduction::Sum)
}

#[cfg(test)]
#[path = "losses_test.rs"]
mod tests;
