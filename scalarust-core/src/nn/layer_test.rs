use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_layer_forward_and_parameters() -> Result<(), ScalarustError> {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(10);
    let layer = Layer::new(&graph, 2, 2, &mut rng)?;

    let outs = layer.forward(&graph, &[2.0, 3.0])?;
    assert_eq!(outs.len(), 2);
    assert_eq!(layer.parameters().len(), 4 + 2);
    assert_eq!(layer.n_inputs(), 2);
    assert_eq!(layer.n_outputs(), 2);
    assert_eq!(layer.name(), "Dense");
    assert_eq!(layer.to_string(), "Layer of 2 Tanh-Neurons");
    Ok(())
}

#[test]
fn test_layer_neurons_are_independent() -> Result<(), ScalarustError> {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(11);
    let layer = Layer::new(&graph, 3, 4, &mut rng)?.with_name("hidden");
    assert_eq!(layer.name(), "hidden");

    let outs = layer.forward(&graph, &[0.1, 0.2, 0.3])?;
    outs[1].backward();
    // Only the second neuron's parameters receive gradient.
    for (i, neuron) in layer.neurons().iter().enumerate() {
        let touched = neuron
            .parameters()
            .iter()
            .any(|&p| graph.grad(p).map(|g| g != 0.0).unwrap_or(false));
        assert_eq!(touched, i == 1, "neuron {}", i);
    }
    Ok(())
}

#[test]
fn test_layer_shape_mismatch() {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(12);
    let layer = Layer::new(&graph, 3, 2, &mut rng).unwrap();
    match layer.forward(&graph, &[1.0]) {
        Err(ScalarustError::ShapeMismatch { expected, actual, .. }) => {
            assert_eq!(expected, 3);
            assert_eq!(actual, 1);
        }
        other => panic!("Expected ShapeMismatch, got {:?}", other),
    }
}

#[test]
fn test_layer_needs_neurons() {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(13);
    assert!(Layer::new(&graph, 3, 0, &mut rng).is_err());
}
