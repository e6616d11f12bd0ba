use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_uniform_range_and_leaves() {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(7);
    let ids = uniform_(&graph, &mut rng, 100, INIT_LOW, INIT_HIGH).unwrap();
    assert_eq!(ids.len(), 100);
    assert_eq!(graph.len(), 100);
    for id in ids {
        let v = graph.value(id).unwrap();
        assert!((INIT_LOW..=INIT_HIGH).contains(&v));
        assert!(graph.op(id).unwrap().is_leaf());
    }
}

#[test]
fn test_uniform_is_reproducible() {
    let draw = |seed| {
        let graph = Graph::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let ids = uniform_(&graph, &mut rng, 5, -1.0, 1.0).unwrap();
        ids.iter().map(|&id| graph.value(id).unwrap()).collect::<Vec<f64>>()
    };
    assert_eq!(draw(42), draw(42));
    assert_ne!(draw(42), draw(43));
}

#[test]
fn test_uniform_degenerate_range() {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(0);
    let id = uniform_scalar(&graph, &mut rng, 0.5, 0.5).unwrap();
    assert_eq!(graph.value(id).unwrap(), 0.5);
}

#[test]
fn test_uniform_invalid_bounds() {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(uniform_(&graph, &mut rng, 3, 1.0, -1.0).is_err());
    assert!(uniform_(&graph, &mut rng, 3, f64::NAN, 1.0).is_err());
    assert!(uniform_scalar(&graph, &mut rng, 0.0, f64::INFINITY).is_err());
    assert!(graph.is_empty());
}
