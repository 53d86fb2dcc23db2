use std::f64::consts::TAU;

use super::Point;

/// Rotation offset for the angular seam: starting in the lower-left corner
/// keeps the seam out of the visually prominent top of the circle and lets
/// sorted labels run downwards.
pub const PIE_ROTATE: f64 = TAU * 5.0 / 8.0;

/// Fixed padding angle between adjacent slices, in radians.
pub const PAD_ANGLE: f64 = 0.01;

/// One department's contiguous angular span.
///
/// Angles follow the clock convention: 0 at twelve o'clock, increasing
/// clockwise, so the unit vector for angle `a` is `(sin a, -cos a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub start_angle: f64,
    pub end_angle: f64,
    pub value: f64,
}

impl ArcSpan {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Point on the circle of `radius` at this span's midpoint.
    pub fn centroid(&self, radius: f64) -> Point {
        let a = self.mid_angle();
        Point::new(radius * a.sin(), -radius * a.cos())
    }

    /// A narrow sub-span of at most `width` radians centered on the midpoint,
    /// clamped to the span itself. Chord bands attach here rather than
    /// sweeping the whole slice.
    pub fn center(&self, width: f64) -> ArcSpan {
        let c = self.mid_angle();
        let start = self.start_angle.max(c - width);
        let end = self.end_angle.min(c + width);
        ArcSpan {
            start_angle: start,
            end_angle: end,
            value: self.value,
        }
    }
}

/// How slices are arranged around the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceSort {
    /// Insertion order retained.
    None,
    /// Ascending by value.
    Ascending,
    /// Descending by value.
    Descending,
}

/// Partition the full circle into value-proportional slices.
///
/// Returns one span per input value, indexed by input position (slot `i`
/// holds value `i`'s span regardless of where sorting placed it on the
/// circle). Sorting is stable; ties keep input order. Values may be negative
/// (the emphasis ordering feeds raw signed sums through); a negative value
/// walks the accumulated angle backwards, exactly as proportional allocation
/// implies.
pub fn layout(values: &[f64], sort: SliceSort) -> Vec<ArcSpan> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    match sort {
        SliceSort::None => {}
        SliceSort::Ascending => {
            order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(std::cmp::Ordering::Equal))
        }
        SliceSort::Descending => {
            order.sort_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap_or(std::cmp::Ordering::Equal))
        }
    }

    let total: f64 = values.iter().sum();
    let usable = TAU - n as f64 * PAD_ANGLE;

    let mut spans = vec![
        ArcSpan {
            start_angle: 0.0,
            end_angle: 0.0,
            value: 0.0,
        };
        n
    ];
    let mut angle = PIE_ROTATE;
    for &idx in &order {
        let fraction = if total == 0.0 {
            1.0 / n as f64
        } else {
            values[idx] / total
        };
        let sweep = usable * fraction;
        spans[idx] = ArcSpan {
            start_angle: angle + PAD_ANGLE / 2.0,
            end_angle: angle + PAD_ANGLE / 2.0 + sweep,
            value: values[idx],
        };
        angle += sweep + PAD_ANGLE;
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn full_circle_is_covered() {
        let spans = layout(&[1.0, 1.0, 1.0, 1.0], SliceSort::None);
        let swept: f64 = spans.iter().map(|s| s.end_angle - s.start_angle).sum();
        assert!((swept - (TAU - 4.0 * PAD_ANGLE)).abs() < EPS);
    }

    #[test]
    fn slices_are_proportional_to_values() {
        let spans = layout(&[1.0, 3.0], SliceSort::None);
        let w0 = spans[0].end_angle - spans[0].start_angle;
        let w1 = spans[1].end_angle - spans[1].start_angle;
        assert!((w1 - 3.0 * w0).abs() < EPS);
    }

    #[test]
    fn first_slice_starts_at_the_rotation_offset() {
        let spans = layout(&[2.0, 1.0], SliceSort::None);
        assert!((spans[0].start_angle - (PIE_ROTATE + PAD_ANGLE / 2.0)).abs() < EPS);
    }

    #[test]
    fn insertion_order_retained_without_sort() {
        let spans = layout(&[1.0, 5.0, 2.0], SliceSort::None);
        assert!(spans[0].start_angle < spans[1].start_angle);
        assert!(spans[1].start_angle < spans[2].start_angle);
    }

    #[test]
    fn ascending_sort_places_smallest_first() {
        let spans = layout(&[10.0, 3.0, 7.0], SliceSort::Ascending);
        // Value 3 (index 1) gets the first slot on the circle.
        assert!(spans[1].start_angle < spans[2].start_angle);
        assert!(spans[2].start_angle < spans[0].start_angle);
    }

    #[test]
    fn descending_sort_places_largest_first() {
        let spans = layout(&[10.0, 3.0, 7.0], SliceSort::Descending);
        assert!(spans[0].start_angle < spans[2].start_angle);
        assert!(spans[2].start_angle < spans[1].start_angle);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let spans = layout(&[4.0, 4.0, 4.0], SliceSort::Descending);
        assert!(spans[0].start_angle < spans[1].start_angle);
        assert!(spans[1].start_angle < spans[2].start_angle);
    }

    #[test]
    fn zero_total_falls_back_to_uniform() {
        let spans = layout(&[0.0, 0.0], SliceSort::None);
        let w0 = spans[0].end_angle - spans[0].start_angle;
        let w1 = spans[1].end_angle - spans[1].start_angle;
        assert!((w0 - w1).abs() < EPS);
        assert!(w0 > 0.0);
    }

    #[test]
    fn center_clamps_to_the_span() {
        let spans = layout(&[1.0, 100.0], SliceSort::None);
        let narrow = spans[0].center(10.0);
        assert!(narrow.start_angle >= spans[0].start_angle - EPS);
        assert!(narrow.end_angle <= spans[0].end_angle + EPS);

        let wide = spans[1].center(0.04);
        assert!(((wide.end_angle - wide.start_angle) - 0.08).abs() < EPS);
    }

    #[test]
    fn centroid_follows_the_clock_convention() {
        let span = ArcSpan {
            start_angle: 0.0,
            end_angle: 0.0,
            value: 0.0,
        };
        // Angle 0 points straight up.
        let p = span.centroid(10.0);
        assert!(p.x.abs() < EPS);
        assert!((p.y + 10.0).abs() < EPS);
    }
}
