use thiserror::Error;

/// Custom error type for the scalarust crate.
///
/// Numeric domain problems (NaN, infinities, fractional powers of negative numbers)
/// are deliberately *not* represented here: they propagate through values and
/// gradients following IEEE-754 semantics.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ScalarustError {
    #[error("Shape mismatch: expected {expected} inputs, got {actual} during operation {operation}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Unknown node {id}: the graph only holds {len} nodes")]
    UnknownNode { id: usize, len: usize },

    #[error("Invalid checkpoint {checkpoint}: the graph only holds {len} nodes")]
    InvalidCheckpoint { checkpoint: usize, len: usize },

    #[error("Length mismatch: {inputs} input samples but {targets} targets")]
    LengthMismatch { inputs: usize, targets: usize },

    #[error("Cannot train on an empty dataset")]
    EmptyDataset,

    #[error("Invalid architecture: {0}")]
    InvalidArchitecture(String),

    #[error("Invalid hyperparameter {name}: {value}")]
    InvalidHyperparameter { name: String, value: f64 },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ScalarustError {
    fn from(err: std::io::Error) -> Self {
        ScalarustError::Io(err.to_string())
    }
}
