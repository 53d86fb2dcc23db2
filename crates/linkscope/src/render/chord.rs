use std::collections::BTreeSet;

use eframe::egui::{self, Color32, FontId, Pos2, Stroke};
use eframe::epaint::{Mesh, Vertex, WHITE_UV};

use crate::data::Matrix;
use crate::layout::labels::LabelBox;
use crate::layout::pie::{ArcSpan, PIE_ROTATE};
use crate::layout::{ChordRadii, Point};
use crate::theme::Theme;

use super::transition::BAND_OPACITY;
use super::{to_screen, trim_label};

/// Half-width of a chord band's attachment sub-arc, in radians.
pub const CHORD_WIDTH: f64 = 0.04;

/// Angular step used when flattening arcs and beziers into triangles.
const ARC_STEP: f64 = 0.05;

/// Focus overlay state for one frame. Alphas are precomputed by the caller
/// from its transition clocks.
pub struct FocusOverlay<'a> {
    pub department: usize,
    pub linked: &'a BTreeSet<usize>,
    /// Fade-in alpha of the linked labels and their connectors.
    pub label_alpha: f32,
    /// Alpha of chord bands not touching the focused department.
    pub outside_alpha: f32,
}

/// Everything needed to paint one chord panel (Research or Teaching).
pub struct PanelParams<'a> {
    pub title: &'a str,
    pub center: Pos2,
    pub radii: &'a ChordRadii,
    pub spans: &'a [ArcSpan],
    pub matrix: &'a Matrix,
    pub labels: &'a [LabelBox],
    pub names: &'a [String],
    /// Cross-fade alpha of the whole panel.
    pub opacity: f32,
    pub focus: Option<&'a FocusOverlay<'a>>,
    pub pointer: Option<Pos2>,
}

/// Paint one chord panel and return the department under the pointer, if
/// any.
pub fn draw(painter: &egui::Painter, theme: &Theme, params: &PanelParams) -> Option<usize> {
    let hovered = params.pointer.and_then(|p| hit_test(p, params));

    draw_title(painter, theme, params);
    draw_arcs(painter, theme, params);
    draw_bands(painter, theme, params);
    draw_labels(painter, theme, params);

    hovered
}

/// Measure every department label with the real font and build the boxes
/// the relaxation pass operates on. Runs only when the order or viewport
/// changes; painting reuses the relaxed result.
pub fn measure_labels(
    painter: &egui::Painter,
    theme: &Theme,
    names: &[String],
    spans: &[ArcSpan],
    radii: &ChordRadii,
) -> Vec<LabelBox> {
    names
        .iter()
        .zip(spans)
        .enumerate()
        .map(|(i, (name, span))| {
            let galley = painter.layout_no_wrap(
                trim_label(name),
                FontId::proportional(theme.label_size),
                Color32::WHITE,
            );
            LabelBox::new(
                i,
                span.centroid(radii.outer),
                span.centroid(radii.label),
                (galley.rect.width() as f64, galley.rect.height() as f64),
            )
        })
        .collect()
}

/// Angle of a screen point around the panel center, mapped into the span
/// range `[PIE_ROTATE, PIE_ROTATE + TAU)`.
fn pointer_angle(center: Pos2, p: Pos2) -> f64 {
    let dx = (p.x - center.x) as f64;
    let dy = (p.y - center.y) as f64;
    // Clock convention: atan2 of (x, -y) gives 0 at twelve o'clock.
    let mut a = dx.atan2(-dy);
    if a < 0.0 {
        a += std::f64::consts::TAU;
    }
    if a < PIE_ROTATE {
        a += std::f64::consts::TAU;
    }
    a
}

fn hit_test(pointer: Pos2, params: &PanelParams) -> Option<usize> {
    let dx = (pointer.x - params.center.x) as f64;
    let dy = (pointer.y - params.center.y) as f64;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < params.radii.inner || dist > params.radii.outer {
        return None;
    }
    let a = pointer_angle(params.center, pointer);
    params
        .spans
        .iter()
        .position(|s| a >= s.start_angle && a < s.end_angle)
}

fn draw_title(painter: &egui::Painter, theme: &Theme, params: &PanelParams) {
    let galley = painter.layout_no_wrap(
        params.title.to_string(),
        FontId::proportional(theme.title_size),
        theme.heading_color,
    );
    let pos = Pos2::new(
        params.center.x - galley.rect.width() / 2.0,
        params.center.y - params.radii.label as f32 - galley.rect.height() - 16.0,
    );
    let color = Theme::with_opacity(theme.heading_color, params.opacity);
    painter.galley(pos, galley, color);
}

fn draw_arcs(painter: &egui::Painter, theme: &Theme, params: &PanelParams) {
    for (i, span) in params.spans.iter().enumerate() {
        let mut alpha = params.opacity;
        if let Some(focus) = params.focus {
            if !focus.linked.contains(&i) {
                alpha *= focus.outside_alpha.max(0.3);
            }
        }
        let color = Theme::with_opacity(theme.department_color(i), alpha);
        let mesh = sector_mesh(
            params.center,
            span,
            params.radii.inner,
            params.radii.outer,
            color,
        );
        painter.add(egui::Shape::mesh(mesh));
    }
}

fn draw_bands(painter: &egui::Painter, theme: &Theme, params: &PanelParams) {
    let n = params.matrix.n();
    for i in 0..n {
        for j in (i + 1)..n {
            if params.matrix.get(i, j) == 0.0 {
                continue;
            }
            let mut alpha = BAND_OPACITY * params.opacity;
            if let Some(focus) = params.focus {
                if focus.department != i && focus.department != j {
                    alpha = focus.outside_alpha * params.opacity;
                }
            }
            // Bands take the color of the lower-indexed department.
            let color = Theme::with_opacity(theme.department_color(i), alpha);
            let mesh = band_mesh(
                params.center,
                &params.spans[i].center(CHORD_WIDTH),
                &params.spans[j].center(CHORD_WIDTH),
                params.radii.chord,
                color,
            );
            painter.add(egui::Shape::mesh(mesh));
        }
    }
}

fn draw_labels(painter: &egui::Painter, theme: &Theme, params: &PanelParams) {
    let Some(focus) = params.focus else {
        return;
    };
    if focus.label_alpha <= 0.0 {
        return;
    }

    let color = Theme::with_opacity(theme.foreground, focus.label_alpha * params.opacity);
    let stroke = Stroke::new(1.0, color);

    for &i in focus.linked {
        let label = &params.labels[i];
        let [node, anchor, attach] = label.connector();
        let points = vec![
            to_screen(params.center, node),
            to_screen(params.center, anchor),
            to_screen(params.center, attach),
        ];
        painter.circle_filled(points[0], 2.0, color);
        painter.add(egui::Shape::line(points, stroke));

        let galley = painter.layout_no_wrap(
            trim_label(&params.names[i]),
            FontId::proportional(theme.label_size),
            color,
        );
        let corner = to_screen(params.center, label.attach_point());
        painter.galley(corner, galley, color);
    }
}

/// Ring sector between two radii, triangulated as a strip.
fn sector_mesh(center: Pos2, span: &ArcSpan, r0: f64, r1: f64, color: Color32) -> Mesh {
    let sweep = span.end_angle - span.start_angle;
    let steps = ((sweep.abs() / ARC_STEP).ceil() as usize).max(2);

    let mut mesh = Mesh::default();
    for k in 0..=steps {
        let a = span.start_angle + sweep * k as f64 / steps as f64;
        let dir = Point::new(a.sin(), -a.cos());
        mesh.vertices.push(vertex(
            to_screen(center, Point::new(dir.x * r0, dir.y * r0)),
            color,
        ));
        mesh.vertices.push(vertex(
            to_screen(center, Point::new(dir.x * r1, dir.y * r1)),
            color,
        ));
    }
    strip_indices(&mut mesh, steps);
    mesh
}

/// Chord band between the attachment sub-arcs of two departments: a strip
/// between two quadratic beziers that both pass through the circle center.
fn band_mesh(center: Pos2, source: &ArcSpan, target: &ArcSpan, radius: f64, color: Color32) -> Mesh {
    let s0 = point_at(source.start_angle, radius);
    let s1 = point_at(source.end_angle, radius);
    let t0 = point_at(target.start_angle, radius);
    let t1 = point_at(target.end_angle, radius);
    let ctrl = Point::new(0.0, 0.0);

    let steps = 24;
    let mut mesh = Mesh::default();
    for k in 0..=steps {
        let t = k as f64 / steps as f64;
        // One edge runs from the source span's end to the target's start,
        // the other from the source's start to the target's end; together
        // they enclose the band.
        mesh.vertices
            .push(vertex(to_screen(center, quadratic(s1, ctrl, t0, t)), color));
        mesh.vertices
            .push(vertex(to_screen(center, quadratic(s0, ctrl, t1, t)), color));
    }
    strip_indices(&mut mesh, steps);
    mesh
}

fn point_at(angle: f64, radius: f64) -> Point {
    Point::new(radius * angle.sin(), -radius * angle.cos())
}

fn quadratic(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let u = 1.0 - t;
    Point::new(
        p0.x * u * u + p1.x * 2.0 * u * t + p2.x * t * t,
        p0.y * u * u + p1.y * 2.0 * u * t + p2.y * t * t,
    )
}

fn vertex(pos: Pos2, color: Color32) -> Vertex {
    Vertex {
        pos,
        uv: WHITE_UV,
        color,
    }
}

/// Index a vertex strip laid out as interleaved pairs.
fn strip_indices(mesh: &mut Mesh, quads: usize) {
    for k in 0..quads as u32 {
        let base = k * 2;
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn pointer_angle_wraps_into_the_span_range() {
        let center = Pos2::new(0.0, 0.0);
        // Straight up is angle 0, which lies below PIE_ROTATE and wraps.
        let a = pointer_angle(center, Pos2::new(0.0, -10.0));
        assert!((a - TAU).abs() < 1e-5);
        // Straight down is half a turn, below the seam, so it wraps too.
        let down = pointer_angle(center, Pos2::new(0.0, 10.0));
        assert!((down - 1.5 * TAU).abs() < 1e-5);
        // Just past the seam in the lower-left stays unwrapped.
        let past = pointer_angle(center, Pos2::new(-10.0, 9.0));
        assert!(past >= PIE_ROTATE && past < PIE_ROTATE + 0.1);
    }

    #[test]
    fn quadratic_hits_its_endpoints() {
        let p0 = Point::new(1.0, 2.0);
        let p2 = Point::new(-3.0, 4.0);
        let ctrl = Point::new(0.0, 0.0);
        assert_eq!(quadratic(p0, ctrl, p2, 0.0), p0);
        assert_eq!(quadratic(p0, ctrl, p2, 1.0), p2);
    }

    #[test]
    fn sector_mesh_is_well_formed() {
        let span = ArcSpan {
            start_angle: 0.0,
            end_angle: 1.0,
            value: 1.0,
        };
        let mesh = sector_mesh(Pos2::new(0.0, 0.0), &span, 10.0, 12.0, Color32::RED);
        assert!(mesh.vertices.len() >= 6);
        assert_eq!(mesh.indices.len() % 3, 0);
        let max = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max < mesh.vertices.len());
    }
}
