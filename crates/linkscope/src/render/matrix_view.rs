use eframe::egui::{self, Color32, FontId, Pos2, Rect, vec2};

use crate::data::Dataset;
use crate::theme::{EMPTY_CELL, Theme};

use super::transition::ease_in_out;
use super::trim_label;

/// Space reserved on the left and top edges for department labels.
pub const LABEL_MARGIN: f32 = 100.0;

/// Fraction of each band left as padding between cells.
pub const BAND_PADDING: f32 = 0.1;

/// Link totals at and above this map to a full-band inner square.
const SIZE_DOMAIN_MAX: f64 = 11.0;
/// Smallest inner square, so even one link stays visible.
const SIZE_MIN: f32 = 3.0;

/// Per-cell stagger of the entrance animation, in seconds per display slot.
const STAGGER: f32 = 0.02;
/// Duration of one cell's entrance scale-in, in seconds.
const CELL_REVEAL: f32 = 0.3;

/// Ticks under the balance ramp, teaching end to research end.
const BALANCE_CAPTIONS: [&str; 3] = ["more teaching links", "balanced", "more research links"];
/// Suffix on the first size-legend tick.
const SIZE_CAPTION: &str = " total links";

/// Evenly spaced bands over an extent, with inner and outer padding.
#[derive(Debug, Clone, Copy)]
pub struct BandScale {
    step: f32,
    band: f32,
    offset: f32,
}

impl BandScale {
    pub fn new(extent: f32, n: usize, padding: f32) -> Self {
        if n == 0 {
            return Self {
                step: 0.0,
                band: 0.0,
                offset: 0.0,
            };
        }
        let step = extent / (n as f32 + padding);
        Self {
            step,
            band: step * (1.0 - padding),
            offset: step * padding,
        }
    }

    /// Start of the band at a (possibly fractional, mid-transition) slot.
    pub fn position(&self, slot: f64) -> f32 {
        self.offset + self.step * slot as f32
    }

    pub fn band(&self) -> f32 {
        self.band
    }
}

pub struct MatrixParams<'a> {
    /// Full area available to the matrix view, label margins included.
    pub rect: Rect,
    pub dataset: &'a Dataset,
    /// Display slot per department. Fractional during order transitions.
    pub positions: &'a [f64],
    /// Cross-fade alpha of the whole view.
    pub opacity: f32,
    /// Seconds since the entrance animation started.
    pub reveal: f32,
    pub pointer: Option<Pos2>,
}

/// Paint the adjacency matrix and return the hovered cell as a pair of
/// department indices, if any.
pub fn draw(
    painter: &egui::Painter,
    theme: &Theme,
    params: &MatrixParams,
) -> Option<(usize, usize)> {
    let n = params.dataset.len();
    let origin = params.rect.left_top() + vec2(LABEL_MARGIN, LABEL_MARGIN);
    let extent = (params.rect.width() - LABEL_MARGIN)
        .min(params.rect.height() - LABEL_MARGIN)
        .max(0.0);
    let scale = BandScale::new(extent, n, BAND_PADDING);

    let hovered = params.pointer.and_then(|p| hit_test(p, origin, &scale, params));

    if let Some((hi, hj)) = hovered {
        draw_crosshair(painter, theme, origin, &scale, extent, params, hi, hj);
    }

    for i in 0..n {
        for j in 0..n {
            draw_cell(painter, origin, &scale, params, i, j);
        }
    }

    draw_axis_labels(painter, theme, origin, &scale, params, hovered);
    draw_legends(painter, theme, origin, extent, &scale, params);

    if let Some((i, j)) = hovered {
        draw_tooltip(painter, theme, params, i, j);
    }

    hovered
}

fn cell_rect(origin: Pos2, scale: &BandScale, params: &MatrixParams, i: usize, j: usize) -> Rect {
    let x = origin.x + scale.position(params.positions[j]);
    let y = origin.y + scale.position(params.positions[i]);
    Rect::from_min_size(Pos2::new(x, y), vec2(scale.band(), scale.band()))
}

fn draw_cell(painter: &egui::Painter, origin: Pos2, scale: &BandScale, params: &MatrixParams, i: usize, j: usize) {
    let rect = cell_rect(origin, scale, params, i, j);
    let total = params.dataset.links.get(i, j);
    let balance = params.dataset.balance.get(i, j);

    let color = if i == j || total == 0.0 {
        EMPTY_CELL
    } else {
        Theme::balance_color(balance)
    };

    let side = if total == 0.0 {
        SIZE_MIN
    } else {
        let t = (total / SIZE_DOMAIN_MAX).min(1.0) as f32;
        SIZE_MIN + (scale.band() - SIZE_MIN) * t
    };

    // Cells appear one after another along the diagonal direction.
    let delay = (params.positions[i] + params.positions[j]) as f32 * STAGGER;
    let reveal = ease_in_out(((params.reveal - delay) / CELL_REVEAL).clamp(0.0, 1.0));
    if reveal <= 0.0 {
        return;
    }

    let inner = Rect::from_center_size(rect.center(), vec2(side * reveal, side * reveal));
    painter.rect_filled(inner, 0.0, Theme::with_opacity(color, params.opacity));
}

fn hit_test(
    pointer: Pos2,
    origin: Pos2,
    scale: &BandScale,
    params: &MatrixParams,
) -> Option<(usize, usize)> {
    let n = params.dataset.len();
    for i in 0..n {
        for j in 0..n {
            if cell_rect(origin, scale, params, i, j).contains(pointer) {
                return Some((i, j));
            }
        }
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn draw_crosshair(
    painter: &egui::Painter,
    theme: &Theme,
    origin: Pos2,
    scale: &BandScale,
    extent: f32,
    params: &MatrixParams,
    i: usize,
    j: usize,
) {
    let highlight = Theme::with_opacity(theme.accent, 0.12 * params.opacity);
    let row_y = origin.y + scale.position(params.positions[i]);
    let col_x = origin.x + scale.position(params.positions[j]);
    painter.rect_filled(
        Rect::from_min_size(Pos2::new(origin.x, row_y), vec2(extent, scale.band())),
        0.0,
        highlight,
    );
    painter.rect_filled(
        Rect::from_min_size(Pos2::new(col_x, origin.y), vec2(scale.band(), extent)),
        0.0,
        highlight,
    );
}

fn draw_axis_labels(
    painter: &egui::Painter,
    theme: &Theme,
    origin: Pos2,
    scale: &BandScale,
    params: &MatrixParams,
    hovered: Option<(usize, usize)>,
) {
    let font = FontId::proportional(theme.legend_size);
    for (dept, name) in params.dataset.names.iter().enumerate() {
        let emphasized = matches!(hovered, Some((i, j)) if i == dept || j == dept);
        let color = if emphasized {
            theme.accent
        } else {
            Theme::with_opacity(theme.foreground, params.opacity)
        };
        let galley = painter.layout_no_wrap(trim_label(name), font.clone(), color);

        // Row label, right-aligned against the grid's left edge.
        let y = origin.y + scale.position(params.positions[dept]);
        let row_pos = Pos2::new(
            origin.x - galley.rect.width() - 6.0,
            y + (scale.band() - galley.rect.height()) / 2.0,
        );
        painter.galley(row_pos, galley.clone(), color);

        // Column label, rotated up and away from the grid.
        let x = origin.x + scale.position(params.positions[dept]);
        let col_pos = Pos2::new(x + scale.band() / 2.0, origin.y - 6.0);
        let mut text = egui::epaint::TextShape::new(col_pos, galley, color);
        text.angle = -std::f32::consts::FRAC_PI_4;
        painter.add(text);
    }
}

fn draw_legends(
    painter: &egui::Painter,
    theme: &Theme,
    origin: Pos2,
    extent: f32,
    scale: &BandScale,
    params: &MatrixParams,
) {
    let font = FontId::proportional(theme.legend_size);
    let text_color = Theme::with_opacity(theme.foreground, params.opacity);
    let left = origin.x;
    let top = origin.y + extent + 18.0;

    // Balance color ramp, teaching on the left, research on the right.
    let ramp_w = 160.0;
    let ramp_h = 10.0;
    let samples = 32;
    for k in 0..samples {
        let t = k as f32 / (samples - 1) as f32;
        let balance = -9.0 + 18.0 * t as f64;
        let color = Theme::with_opacity(Theme::balance_color(balance), params.opacity);
        let x = left + ramp_w * k as f32 / samples as f32;
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(x, top), vec2(ramp_w / samples as f32 + 1.0, ramp_h)),
            0.0,
            color,
        );
    }
    let [teaching_tick, balanced_tick, research_tick] = BALANCE_CAPTIONS;
    let teaching = painter.layout_no_wrap(teaching_tick.to_string(), font.clone(), text_color);
    painter.galley(Pos2::new(left, top + ramp_h + 4.0), teaching, text_color);
    let balanced = painter.layout_no_wrap(balanced_tick.to_string(), font.clone(), text_color);
    let balanced_x = left + (ramp_w - balanced.rect.width()) / 2.0;
    painter.galley(Pos2::new(balanced_x, top + ramp_h + 4.0), balanced, text_color);
    let research = painter.layout_no_wrap(research_tick.to_string(), font.clone(), text_color);
    let research_x = left + ramp_w - research.rect.width();
    painter.galley(Pos2::new(research_x, top + ramp_h + 4.0), research, text_color);

    // Size legend: sample squares for one, half-scale and full-scale totals.
    let mut x = left + ramp_w + 60.0;
    for (tick, total) in [1.0, 6.0, SIZE_DOMAIN_MAX].into_iter().enumerate() {
        let t = (total / SIZE_DOMAIN_MAX).min(1.0) as f32;
        let side = SIZE_MIN + (scale.band() - SIZE_MIN) * t;
        let square = Rect::from_center_size(
            Pos2::new(x + side / 2.0, top + ramp_h / 2.0),
            vec2(side, side),
        );
        painter.rect_filled(square, 0.0, Theme::with_opacity(Color32::GRAY, params.opacity));
        let caption =
            painter.layout_no_wrap(size_caption(total, tick == 0), font.clone(), text_color);
        painter.galley(
            Pos2::new(x + (side - caption.rect.width()) / 2.0, top + ramp_h + 4.0),
            caption,
            text_color,
        );
        x += side + 24.0;
    }
}

/// Caption under a size-legend square; the first tick names the unit.
fn size_caption(total: f64, first: bool) -> String {
    if first {
        format!("{total:.0}{SIZE_CAPTION}")
    } else {
        format!("{total:.0}")
    }
}

fn draw_tooltip(painter: &egui::Painter, theme: &Theme, params: &MatrixParams, i: usize, j: usize) {
    let Some(pointer) = params.pointer else {
        return;
    };
    let research = params.dataset.research.get(i, j);
    let teaching = params.dataset.teaching.get(i, j);
    let text = format!(
        "{} & {}\nResearch: {research:.0}\nTeaching: {teaching:.0}",
        params.dataset.names[i], params.dataset.names[j]
    );
    let galley = painter.layout_no_wrap(
        text,
        FontId::proportional(theme.legend_size),
        theme.background,
    );
    let padding = vec2(6.0, 4.0);
    let rect = Rect::from_min_size(
        pointer + vec2(14.0, 14.0),
        galley.rect.size() + padding * 2.0,
    );
    painter.rect_filled(rect, 4.0, Theme::with_opacity(theme.foreground, 0.92));
    painter.galley(rect.min + padding, galley, theme.background);
}
