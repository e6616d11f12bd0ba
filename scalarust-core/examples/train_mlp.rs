//! # Training a small MLP on four samples
//!
//! Builds a 3-4-4-1 tanh network, fits it to a toy binary target with plain gradient
//! descent and prints the resulting predictions. The computation graph of the first
//! prediction is written to `mlp_prediction.dot` (render with `dot -Tsvg`).
//!
//! Run with `RUST_LOG=info cargo run --example train_mlp` to see the per-epoch loss.

use rand::rngs::StdRng;
use rand::SeedableRng;
use scalarust_core::nn::Mlp;
use scalarust_core::optim::SgdOptimizer;
use scalarust_core::viz::write_dot;
use scalarust_core::{Graph, ScalarustError};

const SEED: u64 = 42;
const LEARNING_RATE: f64 = 0.05;
const EPOCHS: usize = 100;

fn main() -> Result<(), ScalarustError> {
    env_logger::init();

    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(SEED);
    let model = Mlp::new(&graph, 3, &[4, 4, 1], &mut rng)?;
    println!("{}", model.summary());

    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = [1.0, -1.0, -1.0, 1.0];

    let mut optimizer = SgdOptimizer::new(LEARNING_RATE)?;
    let history = model.fit(&mut graph, &xs, &ys, &mut optimizer, EPOCHS)?;
    if let Some(loss) = history.final_loss() {
        println!("Final loss after {} epochs: {:.6}", EPOCHS, loss);
    }

    let predictions = model.forward_batch(&graph, &xs)?;
    for ((x, target), outputs) in xs.iter().zip(&ys).zip(&predictions) {
        println!("{:?} -> {:+.4} (target {:+})", x, outputs[0].value(), target);
    }

    let first = predictions[0][0];
    first.backward();
    write_dot(&graph, first.id(), "mlp_prediction.dot")?;
    println!("Graph of the first prediction written to mlp_prediction.dot");

    Ok(())
}
