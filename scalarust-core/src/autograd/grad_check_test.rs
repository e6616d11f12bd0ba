use super::*;

const EPS: f64 = 1e-6;
const TOL: f64 = 1e-5;

#[test]
fn test_check_grad_primitives() {
    check_grad(|_, x| x[0] + x[1], &[1.5, -2.0], EPS, TOL).unwrap();
    check_grad(|_, x| x[0] * x[1], &[1.5, -2.0], EPS, TOL).unwrap();
    check_grad(|_, x| x[0].tanh(), &[0.3], EPS, TOL).unwrap();
    check_grad(|_, x| x[0].exp(), &[0.7], EPS, TOL).unwrap();
    check_grad(|_, x| x[0].pow(3.0), &[1.2], EPS, TOL).unwrap();
    check_grad(|_, x| x[0].pow(-1.5), &[2.5], EPS, TOL).unwrap();
    check_grad(|_, x| x[0].relu(), &[0.4], EPS, TOL).unwrap();
    check_grad(|_, x| x[0].relu(), &[-0.4], EPS, TOL).unwrap();
}

#[test]
fn test_check_grad_composite() {
    check_grad(
        |g, x| {
            let shared = x[0] * x[1] + g.constant(0.5);
            (shared.tanh() * shared - x[2] / x[0]).exp() + x[1].pow(2.0)
        },
        &[0.9, -0.3, 1.7],
        EPS,
        TOL,
    )
    .unwrap();
}

#[test]
fn test_check_grad_reports_mismatch() {
    // The constant term hides a dependency on x from the backward pass:
    // analytical grad is 1, numerical grad is 4.
    let result = check_grad(|g, x| g.constant(x[0].value() * 3.0) + x[0], &[2.0], EPS, TOL);
    match result {
        Err(GradCheckError::GradientMismatch { input_index, .. }) => assert_eq!(input_index, 0),
        other => panic!("Expected GradientMismatch, got {:?}", other),
    }
}

#[test]
fn test_check_grad_infinite_analytical() {
    // d/dx sqrt(x) is unbounded at 0.
    let result = check_grad(|_, x| x[0].pow(0.5), &[0.0], EPS, TOL);
    assert!(matches!(
        result,
        Err(GradCheckError::AnalyticalGradNaNOrInfinite { input_index: 0, .. })
    ));
}
