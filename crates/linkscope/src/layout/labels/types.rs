use crate::layout::Point;

/// Padding added after the label text, in the same units as the sizes.
pub const LABEL_PADDING: f64 = 5.0;

/// One label box anchored to a department node on the circle.
///
/// `size` is signed: positive components put the box's origin at its upper
/// left; a negative component mirrors the origin to the opposite side, so
/// text in the left/top quadrants grows away from the circle instead of
/// across it. `position` starts at the anchor and is nudged in place by the
/// resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBox {
    /// Department index this label belongs to.
    pub index: usize,
    /// Point on the node's outer edge, where the connector starts.
    pub node_point: Point,
    /// Label-ring anchor the box is reset to on re-layout.
    pub anchor: Point,
    /// Signed box size (measured text plus padding).
    pub size: Point,
    /// Current origin position, mutated during relaxation.
    pub position: Point,
}

impl LabelBox {
    /// Build a label box from a measured text size, applying the
    /// quadrant-dependent sign convention.
    pub fn new(index: usize, node_point: Point, anchor: Point, measured: (f64, f64)) -> Self {
        let size = Point::new(
            (measured.0 + LABEL_PADDING) * -sign(anchor.x),
            measured.1 * -sign(anchor.y),
        );
        Self {
            index,
            node_point,
            anchor,
            size,
            position: anchor,
        }
    }

    /// Upper-left corner of the box, resolving the sign convention.
    pub fn attach_point(&self) -> Point {
        Point::new(
            self.position.x + self.size.x.min(0.0),
            self.position.y + self.size.y.min(0.0),
        )
    }

    /// Connector polyline: node edge, label-ring anchor, then the label
    /// attachment point at the box's vertical center.
    pub fn connector(&self) -> [Point; 3] {
        let attach = Point::new(self.position.x, self.position.y + self.size.y / 2.0);
        [self.node_point, self.anchor, attach]
    }

    /// Reset the box back onto its anchor, discarding relaxation.
    pub fn reset(&mut self) {
        self.position = self.anchor;
    }
}

/// Sign with the convention that zero maps to -1 (matches the quadrant
/// adjustment: a label exactly on an axis is treated as left/top).
pub fn sign(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { -1.0 }
}

/// Tunables for the relaxation passes.
#[derive(Debug, Clone, Copy)]
pub struct RelaxConfig {
    /// Radius of the central circle labels must clear.
    pub label_radius: f64,
    /// Margin by which boxes are inflated in the overlap test.
    pub margin: f64,
    /// Fixed nudge distance per relaxation step.
    pub spacing: f64,
    /// Defensive cap on sweep iterations per pass.
    pub max_iterations: usize,
}

impl RelaxConfig {
    pub fn new(label_radius: f64) -> Self {
        Self {
            label_radius,
            margin: 1.5,
            spacing: 2.0,
            max_iterations: 10_000,
        }
    }
}

/// What the resolver did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaxOutcome {
    /// Full sweeps executed across both passes.
    pub sweeps: usize,
    /// False when an iteration cap was hit and the result is best-effort.
    pub converged: bool,
}
