use super::*;
use crate::layout::labels::types::{LABEL_PADDING, sign};

#[test]
fn size_signs_follow_the_anchor_quadrant() {
    // Right/lower quadrant: the box extends back toward the circle (left)
    // and up, so both signed components are negative.
    let b = label(0, 100.0, 40.0, 40.0, 12.0);
    assert_eq!(b.size, Point::new(-(40.0 + LABEL_PADDING), -12.0));

    // Left/upper quadrant mirrors both.
    let b = label(1, -100.0, -40.0, 40.0, 12.0);
    assert_eq!(b.size, Point::new(40.0 + LABEL_PADDING, 12.0));

    // Mixed quadrants mirror independently.
    let b = label(2, -100.0, 40.0, 40.0, 12.0);
    assert_eq!(b.size, Point::new(40.0 + LABEL_PADDING, -12.0));
}

#[test]
fn anchor_on_an_axis_counts_as_left_and_top() {
    assert_eq!(sign(0.0), -1.0);
    let b = label(0, 0.0, 0.0, 40.0, 12.0);
    assert_eq!(b.size, Point::new(40.0 + LABEL_PADDING, 12.0));
}

#[test]
fn attach_point_resolves_negative_sizes() {
    let b = label(0, 100.0, 40.0, 40.0, 12.0);
    // Both components negative: the visual upper-left corner sits at
    // position + size.
    assert_eq!(b.attach_point(), Point::new(55.0, 28.0));

    let b = label(1, -100.0, -40.0, 40.0, 12.0);
    // Both positive: position already is the upper-left corner.
    assert_eq!(b.attach_point(), b.position);
}

#[test]
fn connector_runs_node_anchor_then_box_center() {
    let b = label(0, 100.0, 40.0, 40.0, 12.0);
    let [node, anchor, attach] = b.connector();
    assert_eq!(node, b.node_point);
    assert_eq!(anchor, b.anchor);
    // Attachment is at the box's vertical center on the anchor side.
    assert_eq!(attach, Point::new(100.0, 34.0));
}

#[test]
fn reset_returns_to_the_anchor() {
    let mut b = label(0, 100.0, 40.0, 40.0, 12.0);
    b.position.y += 30.0;
    b.reset();
    assert_eq!(b.position, b.anchor);
}
