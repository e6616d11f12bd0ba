use approx::assert_relative_eq;
use scalarust_core::autograd::check_grad;
use scalarust_core::{Graph, Op, ScalarustError};

mod common;
use common::init_logger;

#[test]
fn test_neuron_by_hand() -> Result<(), ScalarustError> {
    init_logger();
    let graph = Graph::new();
    let x1 = graph.leaf_labeled(2.0, "x1");
    let x2 = graph.leaf_labeled(0.0, "x2");
    let w1 = graph.leaf_labeled(-3.0, "w1");
    let w2 = graph.leaf_labeled(1.0, "w2");
    let b = graph.leaf_labeled(6.8813735870195432, "b");
    let x1w1 = (x1 * w1).with_label("x1*w1");
    let x2w2 = (x2 * w2).with_label("x2*w2");
    let n = (x1w1 + x2w2 + b).with_label("n");
    let o = n.tanh().with_label("o");

    graph.backward(o.id())?;

    assert_eq!(o.grad(), 1.0);
    assert_relative_eq!(n.grad(), 0.5, epsilon = 1e-6);
    assert_relative_eq!(x1w1.grad(), 0.5, epsilon = 1e-6);
    assert_relative_eq!(x2w2.grad(), 0.5, epsilon = 1e-6);
    assert_relative_eq!(x1.grad(), w1.value() * 0.5, epsilon = 1e-6);
    assert_relative_eq!(w1.grad(), x1.value() * 0.5, epsilon = 1e-6);
    assert_relative_eq!(x2.grad(), w2.value() * 0.5, epsilon = 1e-6);
    assert_eq!(w2.grad(), 0.0);
    Ok(())
}

#[test]
fn test_tanh_via_exp_composition() {
    // tanh(n) written out as (e^2n - 1) / (e^2n + 1) must give the same gradients as
    // the primitive.
    let primitive = {
        let graph = Graph::new();
        let x1 = graph.leaf(2.0);
        let w1 = graph.leaf(-3.0);
        let b = graph.leaf(6.8813735870195432);
        let o = (x1 * w1 + b).tanh();
        o.backward();
        (o.value(), x1.grad(), w1.grad(), b.grad())
    };
    let composed = {
        let graph = Graph::new();
        let x1 = graph.leaf(2.0);
        let w1 = graph.leaf(-3.0);
        let b = graph.leaf(6.8813735870195432);
        let n = x1 * w1 + b;
        let e = (2.0 * n).exp();
        let o = (e - 1.0) / (e + 1.0);
        o.backward();
        (o.value(), x1.grad(), w1.grad(), b.grad())
    };
    assert_relative_eq!(primitive.0, composed.0, epsilon = 1e-12);
    assert_relative_eq!(primitive.1, composed.1, epsilon = 1e-9);
    assert_relative_eq!(primitive.2, composed.2, epsilon = 1e-9);
    assert_relative_eq!(primitive.3, composed.3, epsilon = 1e-9);
}

#[test]
fn test_mixed_expression_matches_finite_differences() {
    check_grad(
        |g, x| {
            let a = x[0];
            let b = x[1];
            let mut c = a + b;
            let mut d = a * b + b.pow(3.0);
            c = c + (c + 1.0);
            c = c + (1.0 + c + (-a));
            d = d + (d * 2.0 + (b + a).relu());
            d = d + (3.0 * d + (b - a).relu());
            let e = c - d;
            let f = e.pow(2.0);
            let h = f / 2.0;
            h + 10.0 / f + g.constant(0.0)
        },
        &[-4.0, 2.0],
        1e-6,
        1e-4,
    )
    .unwrap();
}

#[test]
fn test_mixed_expression_known_values() {
    let graph = Graph::new();
    let a = graph.leaf(-4.0);
    let b = graph.leaf(2.0);
    let mut c = a + b;
    let mut d = a * b + b.pow(3.0);
    c = c + (c + 1.0);
    c = c + (1.0 + c + (-a));
    d = d + (d * 2.0 + (b + a).relu());
    d = d + (3.0 * d + (b - a).relu());
    let e = c - d;
    let f = e.pow(2.0);
    let mut g = f / 2.0;
    g = g + 10.0 / f;
    g.backward();

    assert_relative_eq!(g.value(), 24.70408163265306, epsilon = 1e-9);
    assert_relative_eq!(a.grad(), 138.83381924198252, epsilon = 1e-9);
    assert_relative_eq!(b.grad(), 645.5772594752186, epsilon = 1e-9);
}

#[test]
fn test_graph_structure_is_exposed() {
    let graph = Graph::new();
    let a = graph.leaf(1.0);
    let b = graph.leaf(2.0);
    let c = a * b;
    let d = c.exp();
    assert_eq!(graph.op(d.id()).unwrap(), Op::Exp(c.id()));
    assert_eq!(graph.operands(c.id()).unwrap(), vec![a.id(), b.id()]);
    assert_eq!(d.operands(), vec![c]);
    assert!(graph.operands(a.id()).unwrap().is_empty());
}
