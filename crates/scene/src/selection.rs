use content::WorldId;
use foundation::time::Time;
use runtime::{TimerHandle, TimerQueue};
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Focused(WorldId),
}

impl SelectionState {
    pub fn active(&self) -> Option<WorldId> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Focused(id) => Some(*id),
        }
    }
}

/// Delays between a click, the section scroll, and the automatic reset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SelectionTimings {
    pub pre_scroll_ms: f64,
    pub post_scroll_ms: f64,
}

impl Default for SelectionTimings {
    fn default() -> Self {
        Self {
            pre_scroll_ms: 600.0,
            post_scroll_ms: 1200.0,
        }
    }
}

/// Scheduled follow-ups of a click.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Pending {
    Scroll(WorldId),
    AutoReset,
}

/// Observable effects of a transition, in the order they happened.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Changed(Option<WorldId>),
    ScrollToSection {
        world: WorldId,
        anchor: &'static str,
    },
    ScrollToTop,
}

/// Which world is active, plus the one follow-up timer that may still fire.
///
/// Every transition cancels the pending timer before doing anything else, and
/// a fired timer is acted on only if its handle is still the pending one, so
/// a superseded click can never scroll or reset a newer selection.
#[derive(Debug, Clone)]
pub struct SelectionMachine {
    timings: SelectionTimings,
    state: SelectionState,
    timers: TimerQueue<Pending>,
    pending: Option<TimerHandle>,
}

impl SelectionMachine {
    pub fn new(timings: SelectionTimings) -> Self {
        Self {
            timings,
            state: SelectionState::Idle,
            timers: TimerQueue::new(),
            pending: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn active(&self) -> Option<WorldId> {
        self.state.active()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some_and(|h| self.timers.is_pending(h))
    }

    /// Focus `world` and schedule the scroll to its section.
    pub fn click(&mut self, world: WorldId, now: Time) -> Vec<SelectionEvent> {
        self.cancel_pending();
        let mut out = Vec::new();
        self.set_state(SelectionState::Focused(world), &mut out);
        let due = now.add_seconds(self.timings.pre_scroll_ms / 1000.0);
        self.pending = Some(self.timers.schedule(due, Pending::Scroll(world)));
        out
    }

    /// A pointer click that hit no world.
    pub fn click_empty(&mut self) -> Vec<SelectionEvent> {
        self.cancel_pending();
        let mut out = Vec::new();
        self.set_state(SelectionState::Idle, &mut out);
        out
    }

    /// Escape: back to the overview and the top of the page.
    pub fn cancel_key(&mut self) -> Vec<SelectionEvent> {
        let mut out = self.click_empty();
        out.push(SelectionEvent::ScrollToTop);
        out
    }

    /// Fires every timer due at or before `now`.
    pub fn advance(&mut self, now: Time) -> Vec<SelectionEvent> {
        let mut out = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            if self.pending != Some(fired.handle) {
                debug!(handle = fired.handle.raw(), "dropping superseded selection timer");
                continue;
            }
            self.pending = None;

            match fired.action {
                Pending::Scroll(world) => {
                    debug!(%world, "scrolling to section");
                    out.push(SelectionEvent::ScrollToSection {
                        world,
                        anchor: world.section_anchor(),
                    });
                    let due = fired
                        .due
                        .add_seconds(self.timings.post_scroll_ms / 1000.0);
                    self.pending = Some(self.timers.schedule(due, Pending::AutoReset));
                }
                Pending::AutoReset => {
                    self.set_state(SelectionState::Idle, &mut out);
                }
            }
        }
        out
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
    }

    fn set_state(&mut self, next: SelectionState, out: &mut Vec<SelectionEvent>) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "selection changed");
            self.state = next;
            out.push(SelectionEvent::Changed(next.active()));
        }
    }
}
