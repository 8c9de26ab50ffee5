use crate::frame::Frame;

/// An event tagged with the frame that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<E> {
    pub frame_index: u64,
    pub payload: E,
}

/// Ordered outbox of typed events.
///
/// Producers push during a frame; the host drains once per frame and acts on
/// the events in emission order.
#[derive(Debug)]
pub struct EventBus<E> {
    events: Vec<Event<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, frame: Frame, payload: E) {
        self.events.push(Event {
            frame_index: frame.index,
            payload,
        });
    }

    pub fn events(&self) -> &[Event<E>] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Event<E>> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        let f = Frame::new(2, 0.1);
        bus.emit(f, "hello");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
    }

    #[test]
    fn drain_clears_events_in_order() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(0, 1.0), 1u32);
        bus.emit(Frame::new(0, 1.0), 2u32);
        let drained: Vec<u32> = bus.drain().into_iter().map(|e| e.payload).collect();
        assert_eq!(drained, vec![1, 2]);
        assert!(bus.is_empty());
    }
}
