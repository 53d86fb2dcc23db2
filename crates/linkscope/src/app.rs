use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use colored::Colorize;
use eframe::egui::{self, Key, Pos2, Rect};

use crate::config::Config;
use crate::data::Dataset;
use crate::layout::labels::{self, LabelBox, RelaxConfig, RelaxOutcome};
use crate::layout::order::{OrderSpec, positions_of};
use crate::layout::pie::ArcSpan;
use crate::layout::ChordRadii;
use crate::render::chord::{self, FocusOverlay, PanelParams};
use crate::render::matrix_view::{self, MatrixParams};
use crate::render::transition::{
    BAND_OPACITY, DEFOCUS_RESTORE_DELAY, DIM_OPACITY, FOCUS_LABEL_DELAY, FOCUS_LABEL_FADE,
    ORDER_TRANSITION, Tween, VIZ_FADE, lerp,
};
use crate::state::{AdvanceScheduler, Effect, Event, ViewState, Viz};
use crate::theme::Theme;

/// Duration of the link-opacity restore after its post-defocus delay.
const DEFOCUS_RESTORE_FADE: Duration = Duration::from_millis(250);

/// Vertical space above each chord circle for the panel title.
const CHORD_MARGIN_TOP: f32 = 80.0;

/// Launch options resolved from the CLI.
pub struct Launch {
    pub data_dir: PathBuf,
    pub windowed: bool,
    pub viz: Option<String>,
    pub order: Option<String>,
    pub no_autoplay: bool,
    pub verbose: u8,
    pub quiet: bool,
}

pub fn run(launch: Launch) -> Result<()> {
    let config = Config::load_or_default();
    let defaults = config.defaults.unwrap_or_default();

    let dataset = Dataset::load_dir(&launch.data_dir)?;
    if launch.verbose > 0 && !launch.quiet {
        eprintln!(
            "{} {} departments, {} research pairs, {} teaching pairs",
            "loaded:".dimmed(),
            dataset.len(),
            count_pairs(&dataset.research),
            count_pairs(&dataset.teaching)
        );
    }
    if !launch.quiet {
        for dup in &dataset.duplicates {
            eprintln!(
                "{} duplicate {} link for {} / {}: {} replaced by {}",
                "warning:".yellow().bold(),
                dup.kind.label(),
                dup.department1,
                dup.department2,
                dup.previous,
                dup.replacement
            );
        }
    }

    let theme = Theme::from_name(defaults.theme.as_deref().unwrap_or("light"));

    let viz = match &launch.viz {
        Some(key) => Viz::from_key(key)
            .ok_or_else(|| anyhow::anyhow!("Invalid viz: {key}. Must be 'chord' or 'matrix'."))?,
        None => defaults
            .viz
            .as_deref()
            .and_then(Viz::from_key)
            .unwrap_or(Viz::Chord),
    };
    let order = match &launch.order {
        Some(key) => OrderSpec::from_key(key).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid order: {key}. Must be 'department', 'links', 'emphasis', or 'faculty'."
            )
        })?,
        None => defaults
            .order
            .as_deref()
            .and_then(OrderSpec::from_key)
            .unwrap_or(OrderSpec::Department),
    };
    let autoplay = !launch.no_autoplay && defaults.autoplay.unwrap_or(true);

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([1440.0, 860.0])
        .with_title("Linkscope");
    if !launch.windowed {
        viewport = viewport.with_fullscreen(true);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Linkscope",
        options,
        Box::new(move |_cc| Ok(Box::new(ExplorerApp::new(dataset, theme, viz, order, autoplay)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to launch UI: {e}"))
}

/// Distinct linked pairs in a symmetric matrix.
fn count_pairs(matrix: &crate::data::Matrix) -> usize {
    let n = matrix.n();
    (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .filter(|&(i, j)| matrix.get(i, j) != 0.0)
        .count()
}

/// Warning line for a relaxation run that hit its iteration cap and
/// returned best-effort positions.
fn relax_warning(outcome: &RelaxOutcome) -> Option<String> {
    if outcome.converged {
        return None;
    }
    Some(format!(
        "{} label relaxation stopped after {} sweeps without settling",
        "warning:".yellow().bold(),
        outcome.sweeps
    ))
}

/// Focus highlight lifecycle. The linked set outlives the hover so the
/// opacity restore can still reference it.
enum FocusPhase {
    Idle,
    Active { since: Instant },
    Releasing { since: Instant },
}

pub struct ExplorerApp {
    dataset: Dataset,
    theme: Theme,
    state: ViewState,
    scheduler: AdvanceScheduler,

    // One angular layout and one axis permutation per order, computed once.
    chord_layouts: HashMap<OrderSpec, Vec<ArcSpan>>,
    positions: HashMap<OrderSpec, Vec<usize>>,

    from_order: OrderSpec,
    order_tween: Tween,
    from_viz: Viz,
    viz_tween: Tween,

    // Relaxed label boxes for the current order and viewport.
    labels: Vec<LabelBox>,
    labels_key: Option<(OrderSpec, u32)>,
    subset_pending: bool,

    focus_phase: FocusPhase,
    focus_linked: Option<(usize, BTreeSet<usize>)>,

    matrix_reveal: Instant,
    hovered: Option<usize>,
}

impl ExplorerApp {
    pub fn new(dataset: Dataset, theme: Theme, viz: Viz, order: OrderSpec, autoplay: bool) -> Self {
        let now = Instant::now();

        let mut chord_layouts = HashMap::new();
        let mut positions = HashMap::new();
        for o in OrderSpec::CYCLE {
            chord_layouts.insert(o, o.chord_layout(&dataset));
            positions.insert(o, positions_of(&o.permutation(&dataset)));
        }

        let mut scheduler = AdvanceScheduler::default();
        if autoplay {
            scheduler.start(now);
        }

        Self {
            dataset,
            theme,
            state: ViewState {
                viz,
                order,
                focus: None,
                hover_suspended: false,
            },
            scheduler,
            chord_layouts,
            positions,
            from_order: order,
            order_tween: Tween::done(now, ORDER_TRANSITION),
            from_viz: viz,
            viz_tween: Tween::done(now, VIZ_FADE),
            labels: Vec::new(),
            labels_key: None,
            subset_pending: false,
            focus_phase: FocusPhase::Idle,
            focus_linked: None,
            matrix_reveal: now,
            hovered: None,
        }
    }

    fn dispatch(&mut self, event: Event, now: Instant) {
        let before_order = self.state.order;
        let before_viz = self.state.viz;
        let effects = self.state.apply(event, &self.dataset.links);

        for effect in effects {
            match effect {
                Effect::Render => {
                    if self.state.order != before_order {
                        self.from_order = before_order;
                        self.order_tween = Tween::new(now, ORDER_TRANSITION);
                        self.matrix_reveal = now;
                    }
                    if self.state.viz != before_viz {
                        self.from_viz = before_viz;
                        self.viz_tween = Tween::new(now, VIZ_FADE);
                        self.matrix_reveal = now;
                        self.focus_phase = FocusPhase::Idle;
                        self.focus_linked = None;
                    }
                }
                Effect::CancelAdvance => self.scheduler.cancel(),
                Effect::RescheduleAdvance => self.scheduler.reschedule(now),
                Effect::Focus { department, linked } => {
                    self.focus_linked = Some((department, linked));
                    self.focus_phase = FocusPhase::Active { since: now };
                    self.subset_pending = true;
                }
                Effect::Defocus => {
                    self.focus_phase = FocusPhase::Releasing { since: now };
                }
            }
        }
    }

    /// Angular spans for the current frame, interpolated while an order
    /// transition is in flight.
    fn current_spans(&self, now: Instant) -> Vec<ArcSpan> {
        let to = &self.chord_layouts[&self.state.order];
        let t = self.order_tween.progress(now);
        if t >= 1.0 || self.from_order == self.state.order {
            return to.clone();
        }
        let from = &self.chord_layouts[&self.from_order];
        from.iter()
            .zip(to)
            .map(|(a, b)| ArcSpan {
                start_angle: lerp(a.start_angle, b.start_angle, t),
                end_angle: lerp(a.end_angle, b.end_angle, t),
                value: b.value,
            })
            .collect()
    }

    /// Display slot per department, fractional mid-transition.
    fn current_positions(&self, now: Instant) -> Vec<f64> {
        let to = &self.positions[&self.state.order];
        let t = self.order_tween.progress(now);
        if t >= 1.0 || self.from_order == self.state.order {
            return to.iter().map(|&p| p as f64).collect();
        }
        let from = &self.positions[&self.from_order];
        from.iter()
            .zip(to)
            .map(|(&a, &b)| lerp(a as f64, b as f64, t))
            .collect()
    }

    /// The layout the current order settles into. Label anchors always come
    /// from here, never from the in-flight interpolation: boxes are cached
    /// per order and must match where the arcs end up.
    fn settled_spans(&self) -> &[ArcSpan] {
        &self.chord_layouts[&self.state.order]
    }

    /// Rebuild and relax the label boxes when the order or viewport changed,
    /// then apply any pending focus subset relaxation.
    fn ensure_labels(&mut self, painter: &egui::Painter, radii: &ChordRadii) {
        let key = (self.state.order, radii.inner.round() as u32);
        if self.labels_key != Some(key) {
            let spans = self.settled_spans().to_vec();
            self.labels =
                chord::measure_labels(painter, &self.theme, &self.dataset.names, &spans, radii);
            let outcome = labels::resolve(&mut self.labels, &RelaxConfig::new(radii.label));
            if let Some(warning) = relax_warning(&outcome) {
                eprintln!("{warning}");
            }
            self.labels_key = Some(key);
        }

        if self.subset_pending {
            if let Some((_, linked)) = &self.focus_linked {
                let members: Vec<usize> = linked.iter().copied().collect();
                let outcome =
                    labels::resolve_subset(&mut self.labels, &members, &RelaxConfig::new(radii.label));
                if let Some(warning) = relax_warning(&outcome) {
                    eprintln!("{warning}");
                }
            }
            self.subset_pending = false;
        }
    }

    /// Advance the focus lifecycle and derive this frame's overlay alphas.
    fn focus_alphas(&mut self, now: Instant) -> Option<(f32, f32)> {
        match self.focus_phase {
            FocusPhase::Idle => None,
            FocusPhase::Active { since } => {
                let elapsed = now.saturating_duration_since(since);
                let label_alpha = if elapsed < FOCUS_LABEL_DELAY {
                    0.0
                } else {
                    ((elapsed - FOCUS_LABEL_DELAY).as_secs_f32()
                        / FOCUS_LABEL_FADE.as_secs_f32())
                    .clamp(0.0, 1.0)
                };
                Some((label_alpha, DIM_OPACITY))
            }
            FocusPhase::Releasing { since } => {
                let elapsed = now.saturating_duration_since(since);
                if elapsed < DEFOCUS_RESTORE_DELAY {
                    Some((0.0, DIM_OPACITY))
                } else {
                    let t = (elapsed - DEFOCUS_RESTORE_DELAY).as_secs_f32()
                        / DEFOCUS_RESTORE_FADE.as_secs_f32();
                    if t >= 1.0 {
                        self.focus_phase = FocusPhase::Idle;
                        self.focus_linked = None;
                        None
                    } else {
                        Some((0.0, DIM_OPACITY + (BAND_OPACITY - DIM_OPACITY) * t))
                    }
                }
            }
        }
    }

    fn header(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            ui.heading("Linkscope");
            ui.add_space(24.0);

            for viz in Viz::ALL {
                if ui
                    .selectable_label(self.state.viz == viz, viz.label())
                    .clicked()
                {
                    self.dispatch(Event::SelectViz(viz), now);
                }
            }

            ui.add_space(24.0);
            ui.label("Order:");
            for order in OrderSpec::CYCLE {
                if ui
                    .selectable_label(self.state.order == order, order.label())
                    .clicked()
                {
                    self.dispatch(Event::SelectOrder(order), now);
                }
            }
        });
        ui.separator();
    }

    fn draw_chord_view(
        &mut self,
        painter: &egui::Painter,
        rect: Rect,
        opacity: f32,
        pointer: Option<Pos2>,
        now: Instant,
    ) -> Option<usize> {
        let spans = self.current_spans(now);
        let panel_w = rect.width() / 2.0;
        let panel_h = rect.height() - CHORD_MARGIN_TOP;
        let radii = ChordRadii::from_viewport(rect.width() as f64, panel_h as f64);

        self.ensure_labels(painter, &radii);
        let alphas = self.focus_alphas(now);
        let overlay = match (&self.focus_linked, alphas) {
            (Some((department, linked)), Some((label_alpha, outside_alpha))) => {
                Some(FocusOverlay {
                    department: *department,
                    linked,
                    label_alpha,
                    outside_alpha,
                })
            }
            _ => None,
        };

        let mut hovered = None;
        for (slot, (title, matrix)) in [
            ("Research", &self.dataset.research),
            ("Teaching", &self.dataset.teaching),
        ]
        .into_iter()
        .enumerate()
        {
            let center = Pos2::new(
                rect.left() + panel_w * (slot as f32 + 0.5),
                rect.top() + CHORD_MARGIN_TOP + panel_h / 2.0,
            );
            let params = PanelParams {
                title,
                center,
                radii: &radii,
                spans: &spans,
                matrix,
                labels: &self.labels,
                names: &self.dataset.names,
                opacity,
                focus: overlay.as_ref(),
                pointer,
            };
            if let Some(hit) = chord::draw(painter, &self.theme, &params) {
                hovered = Some(hit);
            }
        }
        hovered
    }

    fn draw_matrix_view(
        &mut self,
        painter: &egui::Painter,
        rect: Rect,
        opacity: f32,
        pointer: Option<Pos2>,
        now: Instant,
    ) -> Option<usize> {
        let positions = self.current_positions(now);
        let params = MatrixParams {
            rect,
            dataset: &self.dataset,
            positions: &positions,
            opacity,
            reveal: now.saturating_duration_since(self.matrix_reveal).as_secs_f32(),
            pointer,
        };
        matrix_view::draw(painter, &self.theme, &params).map(|(row, _col)| row)
    }

    fn draw_view(
        &mut self,
        painter: &egui::Painter,
        viz: Viz,
        rect: Rect,
        opacity: f32,
        pointer: Option<Pos2>,
        now: Instant,
    ) -> Option<usize> {
        if opacity <= 0.0 {
            return None;
        }
        match viz {
            Viz::Chord => self.draw_chord_view(painter, rect, opacity, pointer, now),
            Viz::Matrix => self.draw_matrix_view(painter, rect, opacity, pointer, now),
        }
    }

    fn animating(&self, now: Instant) -> bool {
        !self.order_tween.is_finished(now)
            || !self.viz_tween.is_finished(now)
            || !matches!(self.focus_phase, FocusPhase::Idle)
            || now.saturating_duration_since(self.matrix_reveal) < Duration::from_secs(3)
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if self.scheduler.fire(now) {
            self.dispatch(Event::AutoAdvance, now);
        }

        if ctx.input(|i| i.key_pressed(Key::T)) {
            self.theme = self.theme.toggled();
        }

        let background = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(background).inner_margin(8.0))
            .show(ctx, |ui| {
                self.header(ui, now);

                let rect = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(rect, egui::Sense::hover());
                let pointer = response.hover_pos();
                let painter = ui.painter_at(rect);

                // Cross-fade: paint the outgoing viz under the incoming one.
                let fade = self.viz_tween.progress(now);
                if fade < 1.0 && self.from_viz != self.state.viz {
                    let from_viz = self.from_viz;
                    self.draw_view(&painter, from_viz, rect, 1.0 - fade, None, now);
                }
                let viz = self.state.viz;
                let hovered = self.draw_view(&painter, viz, rect, fade, pointer, now);

                match (self.hovered, hovered) {
                    (None, Some(i)) => self.dispatch(Event::HoverEnter(i), now),
                    (Some(_), None) => self.dispatch(Event::HoverExit, now),
                    (Some(prev), Some(i)) if prev != i => {
                        self.dispatch(Event::HoverExit, now);
                        self.dispatch(Event::HoverEnter(i), now);
                    }
                    _ => {}
                }
                self.hovered = hovered;
            });

        if self.animating(now) || self.hovered.is_some() {
            ctx.request_repaint();
        } else if let Some(wait) = self.scheduler.time_until(now) {
            ctx.request_repaint_after(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LinkRecord;

    fn link(a: &str, b: &str, n: f64) -> LinkRecord {
        LinkRecord {
            department1: a.to_string(),
            department2: b.to_string(),
            links: n,
        }
    }

    fn app() -> ExplorerApp {
        let dataset = Dataset::build(
            vec![("A".into(), 5), ("B".into(), 3), ("C".into(), 8)],
            vec![link("A", "B", 3.0), link("B", "C", 2.0)],
            vec![link("A", "C", 1.0)],
        );
        ExplorerApp::new(
            dataset,
            Theme::light(),
            Viz::Chord,
            OrderSpec::Department,
            false,
        )
    }

    #[test]
    fn label_anchors_come_from_the_settled_layout_during_a_transition() {
        let mut app = app();
        let now = Instant::now();
        app.dispatch(Event::SelectOrder(OrderSpec::Links), now);

        // Right after the order change the painted spans still sit at the
        // outgoing order's angles, but label anchors must already point at
        // where the arcs end up.
        let painted = app.current_spans(now);
        let outgoing = &app.chord_layouts[&OrderSpec::Department];
        assert_eq!(painted[0].start_angle, outgoing[0].start_angle);

        let settled = app.settled_spans();
        let target = &app.chord_layouts[&OrderSpec::Links];
        for (s, t) in settled.iter().zip(target) {
            assert_eq!(s.start_angle, t.start_angle);
            assert_eq!(s.end_angle, t.end_angle);
        }
        assert_ne!(settled[0].start_angle, painted[0].start_angle);
    }

    #[test]
    fn hitting_the_iteration_cap_produces_a_warning() {
        let capped = RelaxOutcome {
            sweeps: 3,
            converged: false,
        };
        let warning = relax_warning(&capped).unwrap();
        assert!(warning.contains("3 sweeps"));

        let settled = RelaxOutcome {
            sweeps: 1,
            converged: true,
        };
        assert_eq!(relax_warning(&settled), None);
    }
}
