use super::*;

#[test]
fn non_members_are_untouched() {
    let cfg = config(100.0);
    let mut labels = vec![
        label(0, 98.0, 20.0, 50.0, 12.0),
        label(1, 100.0, 24.0, 50.0, 12.0),
        label(2, 102.0, 28.0, 50.0, 12.0),
    ];
    resolve(&mut labels, &cfg);
    let after_full = positions(&labels);

    resolve_subset(&mut labels, &[0, 2], &cfg);

    assert_eq!(
        labels[1].position, after_full[1],
        "label outside the subset moved"
    );
}

#[test]
fn members_are_reset_to_their_anchors_before_relaxing() {
    let cfg = config(10.0);
    let mut labels = vec![label(0, 100.0, 40.0, 30.0, 12.0)];
    // Simulate a stale position left over from a previous focus.
    labels[0].position.y += 40.0;

    resolve_subset(&mut labels, &[0], &cfg);

    // Nothing forces it off the anchor, so the reset position sticks.
    assert_eq!(labels[0].position, labels[0].anchor);
}

#[test]
fn subset_members_end_disjoint_among_themselves() {
    let cfg = config(100.0);
    let mut labels = vec![
        label(0, 98.0, 20.0, 50.0, 12.0),
        label(1, 100.0, 24.0, 50.0, 12.0),
        label(2, 102.0, 28.0, 50.0, 12.0),
        label(3, 104.0, 32.0, 50.0, 12.0),
    ];

    resolve_subset(&mut labels, &[0, 2, 3], &cfg);

    let members = [
        labels[0].clone(),
        labels[2].clone(),
        labels[3].clone(),
    ];
    assert_pairwise_disjoint(&members, cfg.margin);
    assert_circle_clear(&members, cfg.label_radius);
}

#[test]
fn empty_subset_is_a_no_op() {
    let cfg = config(100.0);
    let mut labels = vec![label(0, 98.0, 20.0, 50.0, 12.0)];
    resolve(&mut labels, &cfg);
    let before = positions(&labels);

    let outcome = resolve_subset(&mut labels, &[], &cfg);

    assert!(outcome.converged);
    assert_eq!(positions(&labels), before);
}
