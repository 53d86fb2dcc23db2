//! Immediate-mode rendering of the two diagram views.
//!
//! The renderers are pure consumers: they take precomputed layout data
//! (angular spans, permutations, relaxed label boxes) and paint one frame,
//! reporting hover hits back to the caller. All animation state lives in
//! `app.rs` as `Instant`-keyed tweens; the renderers only receive the
//! resulting interpolated values and opacities.

pub mod chord;
pub mod matrix_view;
pub mod transition;

use eframe::egui::Pos2;

use crate::layout::Point;

/// Longest department name drawn, ellipsis included.
pub const LABEL_TRIM: usize = 27;

/// Trim a department name for display. Cut names keep the total budget:
/// the ellipsis replaces the last three characters.
pub fn trim_label(name: &str) -> String {
    if name.chars().count() > LABEL_TRIM {
        let cut: String = name.chars().take(LABEL_TRIM - 3).collect();
        format!("{cut}...")
    } else {
        name.to_string()
    }
}

/// Translate a diagram-space point into screen space.
pub fn to_screen(center: Pos2, p: Point) -> Pos2 {
    Pos2::new(center.x + p.x as f32, center.y + p.y as f32)
}
