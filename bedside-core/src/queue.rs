//! Bounded button event queue
//!
//! Button tasks and interrupt handlers only enqueue; the main loop drains
//! everything once per cycle. When full, the oldest unconsumed event is
//! dropped so the most recent presses win.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Deque;

use crate::alarm::ButtonEvent;

/// Default queue capacity
pub const EVENT_QUEUE_CAPACITY: usize = 8;

/// Fixed-capacity FIFO of button events
#[derive(Debug, Clone)]
pub struct EventQueue<const N: usize = EVENT_QUEUE_CAPACITY> {
    events: Deque<ButtonEvent, N>,
    /// Events dropped since the last `take_dropped`
    dropped: u32,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Append an event, evicting the oldest when full
    ///
    /// Returns the evicted event, if any. Never blocks or allocates.
    pub fn enqueue(&mut self, event: ButtonEvent) -> Option<ButtonEvent> {
        let evicted = if self.events.is_full() {
            self.dropped = self.dropped.saturating_add(1);
            self.events.pop_front()
        } else {
            None
        };
        // Cannot fail: a slot was freed above when full
        let _ = self.events.push_back(event);
        evicted
    }

    /// Take every queued event in arrival order, leaving the queue empty
    pub fn drain_all(&mut self) -> Drain<N> {
        Drain {
            events: core::mem::replace(&mut self.events, Deque::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of dropped events since the last call, resetting the count
    pub fn take_dropped(&mut self) -> u32 {
        core::mem::take(&mut self.dropped)
    }
}

/// Events taken by [`EventQueue::drain_all`]
///
/// Owns its events; iterating consumes them.
#[derive(Debug)]
pub struct Drain<const N: usize> {
    events: Deque<ButtonEvent, N>,
}

impl<const N: usize> Iterator for Drain<N> {
    type Item = ButtonEvent;

    fn next(&mut self) -> Option<ButtonEvent> {
        self.events.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.events.len();
        (len, Some(len))
    }
}

impl<const N: usize> ExactSizeIterator for Drain<N> {}

/// Event queue shared between button contexts and the main loop
///
/// Each operation runs inside a short critical section, so it can be
/// called from interrupt handlers as well as tasks.
pub struct SharedEventQueue<const N: usize = EVENT_QUEUE_CAPACITY> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<EventQueue<N>>>,
}

impl<const N: usize> Default for SharedEventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SharedEventQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(EventQueue::new())),
        }
    }

    /// Append an event; returns the evicted event when the queue was full
    pub fn enqueue(&self, event: ButtonEvent) -> Option<ButtonEvent> {
        self.inner.lock(|queue| queue.borrow_mut().enqueue(event))
    }

    pub fn drain_all(&self) -> Drain<N> {
        self.inner.lock(|queue| queue.borrow_mut().drain_all())
    }

    pub fn take_dropped(&self) -> u32 {
        self.inner.lock(|queue| queue.borrow_mut().take_dropped())
    }

    pub fn len(&self) -> usize {
        self.inner.lock(|queue| queue.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::Button;
    use proptest::prelude::*;

    fn event(i: u64) -> ButtonEvent {
        ButtonEvent::new(Button::ALL[(i % 7) as usize], i)
    }

    #[test]
    fn test_nine_into_eight_drops_oldest() {
        let mut queue: EventQueue = EventQueue::new();
        for i in 0..8 {
            assert_eq!(queue.enqueue(event(i)), None);
        }
        assert_eq!(queue.enqueue(event(8)), Some(event(0)));

        let drained: heapless::Vec<ButtonEvent, 8> = queue.drain_all().collect();
        assert_eq!(drained.len(), 8);
        for (i, ev) in drained.iter().enumerate() {
            assert_eq!(*ev, event(i as u64 + 1));
        }
        assert_eq!(queue.take_dropped(), 1);
        assert_eq!(queue.take_dropped(), 0);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut queue: EventQueue = EventQueue::new();
        queue.enqueue(event(1));
        queue.enqueue(event(2));

        let mut drain = queue.drain_all();
        assert!(queue.is_empty());
        assert_eq!(drain.len(), 2);

        // Events arriving after the drain wait for the next one
        queue.enqueue(event(3));
        assert_eq!(drain.next(), Some(event(1)));
        assert_eq!(drain.next(), Some(event(2)));
        assert_eq!(drain.next(), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_drain_of_empty_queue() {
        let mut queue: EventQueue = EventQueue::new();
        assert_eq!(queue.drain_all().count(), 0);
    }

    #[test]
    fn test_shared_queue() {
        static QUEUE: SharedEventQueue = SharedEventQueue::new();

        for i in 0..10 {
            QUEUE.enqueue(event(i));
        }
        assert_eq!(QUEUE.len(), EVENT_QUEUE_CAPACITY);
        assert_eq!(QUEUE.take_dropped(), 2);

        let first = QUEUE.drain_all().next();
        assert_eq!(first, Some(event(2)));
        assert!(QUEUE.is_empty());
    }

    proptest! {
        /// Drain yields the newest `min(n, 8)` events in arrival order
        #[test]
        fn prop_drain_keeps_newest_in_order(n in 0u64..40) {
            let mut queue: EventQueue = EventQueue::new();
            for i in 0..n {
                queue.enqueue(event(i));
            }
            let kept = n.min(EVENT_QUEUE_CAPACITY as u64);
            let expected_first = n - kept;

            let mut count = 0u64;
            for (offset, ev) in queue.drain_all().enumerate() {
                prop_assert_eq!(ev, event(expected_first + offset as u64));
                count += 1;
            }
            prop_assert_eq!(count, kept);
            prop_assert_eq!(u64::from(queue.take_dropped()), n - kept);
        }
    }
}
