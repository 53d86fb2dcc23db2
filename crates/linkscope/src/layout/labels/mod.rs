//! Constraint-relaxing label placement for chord diagrams.
//!
//! Labels are anchored on a ring just outside the node arcs. Two sequential
//! relaxation passes nudge them until none intersects the central circle and
//! no pair of boxes overlaps: a circle-clearance pass, then a pairwise
//! separation pass. Each pass sweeps to a fixed point; movement is always
//! outward along y (away from the horizontal axis), so the sweeps terminate
//! for any finite label set that fits on the canvas. The iteration cap
//! exists for the case where it doesn't fit: the resolver then reports
//! non-convergence and returns the best effort instead of hanging.

pub mod geometry;
pub mod types;

#[cfg(test)]
mod tests;

pub use types::{LabelBox, RelaxConfig, RelaxOutcome};

use geometry::{circle_intersect, rect_intersect};
use types::sign;

/// Relax every label. Positions are expected to start on their anchors
/// (freshly built boxes do); running again on an already-relaxed set is a
/// no-op.
pub fn resolve(labels: &mut [LabelBox], config: &RelaxConfig) -> RelaxOutcome {
    let members: Vec<usize> = (0..labels.len()).collect();
    relax(labels, &members, config)
}

/// Re-place only `members` (indices into `labels`), leaving every other
/// label untouched. Members are snapped back to their anchors first, then
/// relaxed against each other only. Used when focus moves to one department
/// and its neighbors.
pub fn resolve_subset(
    labels: &mut [LabelBox],
    members: &[usize],
    config: &RelaxConfig,
) -> RelaxOutcome {
    for &i in members {
        labels[i].reset();
    }
    relax(labels, members, config)
}

fn relax(labels: &mut [LabelBox], members: &[usize], config: &RelaxConfig) -> RelaxOutcome {
    let mut sweeps = 0;

    // Pass 1: push labels off the central circle.
    let mut relaxing = true;
    while relaxing {
        if sweeps >= config.max_iterations {
            return RelaxOutcome {
                sweeps,
                converged: false,
            };
        }
        sweeps += 1;
        relaxing = false;

        for &i in members {
            let label = &mut labels[i];
            if circle_intersect(label.position, label.size, config.label_radius) {
                label.position.y += sign(label.position.y) * config.spacing;
                relaxing = true;
            }
        }
    }

    // Pass 2: separate overlapping pairs. Only the outer label of a pair
    // (the one whose anchor sits farther from the vertical seam) moves, so
    // inner labels keep their place near the circle.
    let mut relaxing = true;
    while relaxing {
        if sweeps >= config.max_iterations {
            return RelaxOutcome {
                sweeps,
                converged: false,
            };
        }
        sweeps += 1;
        relaxing = false;

        for &a in members {
            for &b in members {
                if a == b {
                    continue;
                }
                let (p0, s0) = (labels[a].position, labels[a].size);
                let (p1, s1) = (labels[b].position, labels[b].size);
                if !rect_intersect(p0, s0, p1, s1, config.margin) {
                    continue;
                }
                if p0.x.abs() >= p1.x.abs() {
                    continue;
                }
                labels[b].position.y += sign(p1.y) * config.spacing;
                relaxing = true;
            }
        }
    }

    RelaxOutcome {
        sweeps,
        converged: true,
    }
}
