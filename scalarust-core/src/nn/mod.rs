//! Feed-forward networks composed from scalar nodes.

pub mod init;
pub mod layer;
pub mod losses;
pub mod mlp;
pub mod module;
pub mod neuron;

// Re-export common items
pub use layer::Layer;
pub use losses::{mse_loss, sum_squared_error, Reduction};
pub use mlp::{History, Mlp};
pub use module::Module;
pub use neuron::Neuron;
