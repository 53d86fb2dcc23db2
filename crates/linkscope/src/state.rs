//! Diagram state machine and auto-advance scheduling.
//!
//! All view state lives in [`ViewState`] and is mutated only through
//! [`ViewState::apply`], which maps one input event to the state change plus
//! a list of [`Effect`]s for the rendering layer to act on. The slideshow
//! timer is a single replaceable deadline held by [`AdvanceScheduler`]; hover
//! pauses it via an explicit flag set by enter/exit events.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::data::Matrix;
use crate::layout::order::OrderSpec;

/// Which diagram is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viz {
    Chord,
    Matrix,
}

impl Viz {
    pub const ALL: [Viz; 2] = [Viz::Chord, Viz::Matrix];

    pub fn key(self) -> &'static str {
        match self {
            Viz::Chord => "chord",
            Viz::Matrix => "matrix",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.key() == key)
    }

    /// Selector caption, as shown in the viz picker.
    pub fn label(self) -> &'static str {
        match self {
            Viz::Chord => "By Department",
            Viz::Matrix => "All the Data",
        }
    }
}

/// An input event, either from the pointer or from the advance timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SelectViz(Viz),
    SelectOrder(OrderSpec),
    HoverEnter(usize),
    HoverExit,
    AutoAdvance,
}

/// What the rendering layer must do after an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Layouts changed; animate toward the new order/viz.
    Render,
    /// Manual interaction: stop the slideshow timer.
    CancelAdvance,
    /// Timer fired: arm the next cycle at the steady interval.
    RescheduleAdvance,
    /// Chord focus gained: dim everything outside `linked`, relax and fade
    /// in the labels of the linked departments.
    Focus { department: usize, linked: BTreeSet<usize> },
    /// Chord focus lost: fade labels out, restore link opacity shortly.
    Defocus,
}

/// The single mutable view state of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub viz: Viz,
    pub order: OrderSpec,
    pub focus: Option<usize>,
    /// Set while the pointer rests on a department; pauses auto-advance.
    pub hover_suspended: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            viz: Viz::Chord,
            order: OrderSpec::Department,
            focus: None,
            hover_suspended: false,
        }
    }
}

impl ViewState {
    /// Apply one event, mutating the state and returning the effects the
    /// caller must carry out. `links` is the currently displayed link
    /// matrix, used to compute the focus linkage.
    pub fn apply(&mut self, event: Event, links: &Matrix) -> Vec<Effect> {
        match event {
            Event::SelectViz(v) => {
                self.viz = v;
                self.focus = None;
                vec![Effect::CancelAdvance, Effect::Render]
            }
            Event::SelectOrder(o) => {
                self.order = o;
                vec![Effect::CancelAdvance, Effect::Render]
            }
            Event::HoverEnter(i) => {
                self.hover_suspended = true;
                // Focus highlighting only exists on the chord view; matrix
                // hover is a per-frame highlight in the renderer.
                if self.viz != Viz::Chord {
                    return Vec::new();
                }
                self.focus = Some(i);
                vec![Effect::Focus {
                    department: i,
                    linked: linked_set(links, i),
                }]
            }
            Event::HoverExit => {
                self.hover_suspended = false;
                if self.focus.take().is_some() {
                    vec![Effect::Defocus]
                } else {
                    Vec::new()
                }
            }
            Event::AutoAdvance => {
                if self.hover_suspended {
                    // Paused, not cancelled: keep the cycle alive.
                    return vec![Effect::RescheduleAdvance];
                }
                self.order = self.order.next();
                vec![Effect::Render, Effect::RescheduleAdvance]
            }
        }
    }
}

/// All departments sharing a non-zero link with `i`, plus `i` itself.
pub fn linked_set(links: &Matrix, i: usize) -> BTreeSet<usize> {
    let mut set = BTreeSet::new();
    set.insert(i);
    for j in 0..links.n() {
        if links.get(i, j) != 0.0 {
            set.insert(j);
        }
    }
    set
}

/// Delay before the very first auto-advance after startup.
pub const FIRST_SLIDE: Duration = Duration::from_millis(2500);
/// Steady-state interval between auto-advances.
pub const SLIDE_SPEED: Duration = Duration::from_millis(7500);

/// One replaceable deadline driving the slideshow. Arming a new deadline
/// always invalidates the previous one, so two cycles never overlap.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvanceScheduler {
    deadline: Option<Instant>,
}

impl AdvanceScheduler {
    /// Arm the initial post-startup deadline.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + FIRST_SLIDE);
    }

    /// Arm the next steady-state deadline.
    pub fn reschedule(&mut self, now: Instant) {
        self.deadline = Some(now + SLIDE_SPEED);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed. Returns true at most once per
    /// armed deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the deadline, for repaint scheduling.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}
