pub mod labels;
pub mod order;
pub mod pie;

/// 2D point in diagram-local coordinates (origin at the circle center for
/// chord layouts). Layout math runs in f64; the painter converts at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Radii for one chord diagram, derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordRadii {
    pub inner: f64,
    pub outer: f64,
    pub chord: f64,
    pub label: f64,
}

impl ChordRadii {
    /// Size the diagram so two of them fit side by side with label room.
    pub fn from_viewport(width: f64, height: f64) -> Self {
        let inner = ((width - 100.0) / 2.0).min(height) * 0.41;
        Self {
            inner,
            outer: inner * 1.05,
            chord: inner * 0.99,
            label: inner * 1.15,
        }
    }
}
