mod boxes;
mod edge_cases;
mod subset;

use super::geometry::{circle_intersect, rect_intersect};
use super::types::{LabelBox, RelaxConfig};
use super::{resolve, resolve_subset};
use crate::layout::Point;

/// Helper to build a label box anchored at (x, y) with a measured text size.
fn label(index: usize, x: f64, y: f64, w: f64, h: f64) -> LabelBox {
    let anchor = Point::new(x, y);
    let node_point = Point::new(x * 0.9, y * 0.9);
    LabelBox::new(index, node_point, anchor, (w, h))
}

/// Helper for a config with a given circle radius and no practical cap.
fn config(label_radius: f64) -> RelaxConfig {
    RelaxConfig::new(label_radius)
}

/// Assert that no label box intersects the central circle.
fn assert_circle_clear(labels: &[LabelBox], radius: f64) {
    for l in labels {
        assert!(
            !circle_intersect(l.position, l.size, radius),
            "label {} still intersects the circle at {:?}",
            l.index,
            l.position
        );
    }
}

/// Assert that no pair of label boxes overlaps, using the resolver's own
/// margin-inflated predicate.
fn assert_pairwise_disjoint(labels: &[LabelBox], margin: f64) {
    for a in labels {
        for b in labels {
            if a.index == b.index {
                continue;
            }
            assert!(
                !rect_intersect(a.position, a.size, b.position, b.size, margin),
                "labels {} and {} overlap",
                a.index,
                b.index
            );
        }
    }
}

fn positions(labels: &[LabelBox]) -> Vec<Point> {
    labels.iter().map(|l| l.position).collect()
}
