use super::graph::Graph;
use super::ops::Scalar;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical} != numerical grad {numerical}. Difference: {difference}")]
    GradientMismatch {
        input_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for input {input_index}. Loss+: {loss_plus}, Loss-: {loss_minus}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}: {value}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
}

/// Checks analytical gradients against central finite differences.
///
/// `func` builds an expression from one leaf per entry of `inputs`. It is evaluated
/// once on a fresh graph and differentiated, then twice more per input with that
/// input shifted by `±epsilon`. The check passes when, for every input,
/// `|analytical - numerical| <= tolerance * max(1, |analytical|, |numerical|)`.
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: for<'g> Fn(&'g Graph, &[Scalar<'g>]) -> Scalar<'g>,
{
    let analytical_grads = {
        let graph = Graph::new();
        let leaves: Vec<Scalar<'_>> = inputs.iter().map(|&v| graph.leaf(v)).collect();
        let output = func(&graph, &leaves);
        output.backward();
        let grads: Vec<f64> = leaves.iter().map(|leaf| leaf.grad()).collect();
        grads
    };

    let evaluate = |values: &[f64]| -> f64 {
        let graph = Graph::new();
        let leaves: Vec<Scalar<'_>> = values.iter().map(|&v| graph.leaf(v)).collect();
        let output = func(&graph, &leaves);
        output.value()
    };

    for (i, &analytical) in analytical_grads.iter().enumerate() {
        if !analytical.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index: i,
                value: analytical,
            });
        }

        let mut shifted = inputs.to_vec();
        shifted[i] = inputs[i] + epsilon;
        let loss_plus = evaluate(&shifted);
        shifted[i] = inputs[i] - epsilon;
        let loss_minus = evaluate(&shifted);

        let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !numerical.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index: i,
                loss_plus,
                loss_minus,
            });
        }

        let difference = (analytical - numerical).abs();
        let scale = 1.0f64.max(analytical.abs()).max(numerical.abs());
        if difference > tolerance * scale {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical,
                numerical,
                difference,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
