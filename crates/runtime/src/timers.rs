use foundation::time::Time;

/// Identifies one scheduled action. Never reused within a queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<A> {
    pub handle: TimerHandle,
    /// The deadline it was scheduled for, not the time it was observed.
    pub due: Time,
    pub action: A,
}

#[derive(Debug, Clone)]
struct Pending<A> {
    due: Time,
    handle: TimerHandle,
    action: A,
}

/// Cancelable one-shot timers driven by scene time.
///
/// Due actions fire in `(due, handle)` order: equal deadlines fire in the
/// order they were scheduled. A canceled handle never fires.
#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    next_id: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to fire once scene time reaches `due`.
    pub fn schedule(&mut self, due: Time, action: A) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Pending {
            due,
            handle,
            action,
        });
        handle
    }

    /// Returns the canceled action, or `None` if it already fired or was canceled.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<A> {
        let pos = self.pending.iter().position(|p| p.handle == handle)?;
        Some(self.pending.remove(pos).action)
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Removes and returns the earliest action due at or before `now`.
    pub fn pop_due(&mut self, now: Time) -> Option<Fired<A>> {
        let pos = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due.0 <= now.0)
            .min_by(|(_, a), (_, b)| {
                a.due
                    .0
                    .total_cmp(&b.due.0)
                    .then_with(|| a.handle.cmp(&b.handle))
            })
            .map(|(i, _)| i)?;
        let p = self.pending.remove(pos);
        Some(Fired {
            handle: p.handle,
            due: p.due,
            action: p.action,
        })
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<Time> {
        self.pending
            .iter()
            .map(|p| p.due)
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}
