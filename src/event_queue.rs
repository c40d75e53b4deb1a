//! Bounded event queue between the producers and the control loop.
//!
//! Producers (button edge handler, BLE callbacks, state handlers) push from
//! any context; the control loop is the single consumer and polls without
//! waiting.
//!
//! # Architecture
//!
//! ```text
//! button ──┐
//! BLE    ──┼──▶ EventQueue ──▶ control loop ──▶ state machine
//! states ──┘    (lock-free)
//! ```
//!
//! Delivery is best-effort: a push into a full queue drops the new event and
//! reports [`QueueFull`]. Nothing already queued is touched.
//!
//! # Memory Ordering
//!
//! A reservation counter bounds the queue at [`EVENT_QUEUE_CAPACITY`]. A
//! producer claims a slot with a compare-and-swap before enqueueing into the
//! lock-free ring; the consumer releases the slot only after it has dequeued.
//! The ring therefore never holds more events than the counter admits and the
//! enqueue after a successful reservation always finds room.

use core::sync::atomic::{AtomicUsize, Ordering};

use heapless::mpmc::MpMcQueue;

use crate::config::EVENT_QUEUE_CAPACITY;
use crate::error::Error;
use crate::event::Event;

/// Ring size backing the queue. Must be a power of two no smaller than
/// [`EVENT_QUEUE_CAPACITY`].
const RING_SIZE: usize = 16;

const _: () = assert!(RING_SIZE >= EVENT_QUEUE_CAPACITY);

/// Returned by [`EventQueue::push`] when the event was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

impl From<QueueFull> for Error {
    fn from(_: QueueFull) -> Self {
        Error::QueueFull
    }
}

/// Fixed-capacity FIFO of [`Event`]s, safe for concurrent non-blocking
/// producers and one non-blocking consumer.
pub struct EventQueue {
    ring: MpMcQueue<Event, RING_SIZE>,
    reserved: AtomicUsize,
}

impl EventQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            ring: MpMcQueue::new(),
            reserved: AtomicUsize::new(0),
        }
    }

    /// Enqueue an event without blocking.
    ///
    /// Callable from interrupt and callback context. On a full queue the
    /// event is dropped and `Err(QueueFull)` is returned.
    pub fn push(&self, event: Event) -> Result<(), QueueFull> {
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < EVENT_QUEUE_CAPACITY).then_some(n + 1)
            })
            .map_err(|_| QueueFull)?;

        if self.ring.enqueue(event).is_err() {
            // A producer preempted mid-enqueue can make the ring look full.
            self.reserved.fetch_sub(1, Ordering::AcqRel);
            return Err(QueueFull);
        }
        Ok(())
    }

    /// Push and swallow overflow, logging the drop.
    ///
    /// This is what producers use: delivery is best-effort and a dropped
    /// event is never escalated.
    pub fn emit(&self, event: Event) {
        if self.push(event).is_err() {
            warn!("Event queue full, dropped {}", event);
        }
    }

    /// Dequeue the oldest event, returning immediately if there is none.
    ///
    /// Only the control loop may call this.
    pub fn pop_nonblocking(&self) -> Option<Event> {
        let event = self.ring.dequeue()?;
        self.reserved.fetch_sub(1, Ordering::AcqRel);
        Some(event)
    }

    /// Number of events currently admitted to the queue.
    pub fn len(&self) -> usize {
        self.reserved.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        EVENT_QUEUE_CAPACITY
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQUENCE: [Event; 4] = [
        Event::ShortPress,
        Event::WirelessError,
        Event::LongPress,
        Event::DisplayError,
    ];

    #[test]
    fn empty_queue_pops_none() {
        let queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pop_nonblocking(), None);
    }

    #[test]
    fn pops_in_push_order() {
        let queue = EventQueue::new();
        for event in SEQUENCE {
            queue.push(event).unwrap();
        }
        assert_eq!(queue.len(), SEQUENCE.len());
        for event in SEQUENCE {
            assert_eq!(queue.pop_nonblocking(), Some(event));
        }
        assert_eq!(queue.pop_nonblocking(), None);
    }

    #[test]
    fn order_survives_ring_wraparound() {
        let queue = EventQueue::new();
        // Cycle well past the ring size so indices wrap several times.
        for round in 0..50 {
            let a = SEQUENCE[round % SEQUENCE.len()];
            let b = SEQUENCE[(round + 1) % SEQUENCE.len()];
            queue.push(a).unwrap();
            queue.push(b).unwrap();
            assert_eq!(queue.pop_nonblocking(), Some(a));
            assert_eq!(queue.pop_nonblocking(), Some(b));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn full_queue_rejects_without_touching_contents() {
        let queue = EventQueue::new();
        for i in 0..EVENT_QUEUE_CAPACITY {
            queue.push(SEQUENCE[i % SEQUENCE.len()]).unwrap();
        }
        assert_eq!(queue.len(), queue.capacity());

        assert_eq!(queue.push(Event::LongPress), Err(QueueFull));
        queue.emit(Event::LongPress);
        assert_eq!(queue.len(), EVENT_QUEUE_CAPACITY);

        for i in 0..EVENT_QUEUE_CAPACITY {
            assert_eq!(queue.pop_nonblocking(), Some(SEQUENCE[i % SEQUENCE.len()]));
        }
        assert_eq!(queue.pop_nonblocking(), None);
    }

    #[test]
    fn slot_is_reusable_after_pop() {
        let queue = EventQueue::new();
        for _ in 0..EVENT_QUEUE_CAPACITY {
            queue.push(Event::ShortPress).unwrap();
        }
        assert!(queue.push(Event::LongPress).is_err());
        assert_eq!(queue.pop_nonblocking(), Some(Event::ShortPress));
        assert!(queue.push(Event::LongPress).is_ok());
    }

    #[test]
    fn queue_full_converts_to_crate_error() {
        assert_eq!(Error::from(QueueFull), Error::QueueFull);
    }
}
