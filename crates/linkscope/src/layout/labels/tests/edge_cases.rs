use super::*;

#[test]
fn empty_label_set_converges_immediately() {
    let cfg = config(100.0);
    let mut labels: Vec<LabelBox> = Vec::new();
    let outcome = resolve(&mut labels, &cfg);
    assert!(outcome.converged);
}

#[test]
fn single_clear_label_is_left_alone() {
    let cfg = config(50.0);
    let mut labels = vec![label(0, 120.0, 80.0, 30.0, 12.0)];
    let before = positions(&labels);

    let outcome = resolve(&mut labels, &cfg);

    assert!(outcome.converged);
    assert_eq!(positions(&labels), before);
}

#[test]
fn equal_distance_pair_is_left_overlapping() {
    // Neither label of a pair at the same |x| counts as the outer one, so
    // the pairwise pass cannot separate them. The resolver still terminates
    // and reports convergence; this mirrors the placement behavior the
    // rendering is tuned around rather than an ideal separator.
    let cfg = config(10.0);
    let mut labels = vec![
        label(0, 100.0, 40.0, 40.0, 12.0),
        label(1, 100.0, 44.0, 40.0, 12.0),
    ];

    let outcome = resolve(&mut labels, &cfg);

    assert!(outcome.converged);
    assert!(rect_intersect(
        labels[0].position,
        labels[0].size,
        labels[1].position,
        labels[1].size,
        cfg.margin
    ));
}

#[test]
fn iteration_cap_yields_best_effort() {
    let mut cfg = config(100.0);
    cfg.max_iterations = 3;
    // Needs far more than three nudges to clear the circle.
    let mut labels = vec![label(0, 100.0, 2.0, 60.0, 12.0)];

    let outcome = resolve(&mut labels, &cfg);

    assert!(!outcome.converged);
    assert_eq!(outcome.sweeps, 3);
    // Best effort: the label did move, it just is not clear yet.
    assert!(labels[0].position.y > labels[0].anchor.y);
}
