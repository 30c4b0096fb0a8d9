//! Sweep events and the min-priority queue that orders them.
//!
//! Events are never removed from the queue once pushed. A circle event whose
//! arc has since been split or has lost a neighbor is marked inactive instead
//! and turns into a no-op when popped.
//!
//! Ordering uses the unrounded sweep position `key`; the integer `x` is what
//! the directrix advances to.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::beachline::NodeId;
use crate::geometry::{round_coord, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub usize);

/// Kind of sweep event. At equal `x`, sites are processed before circles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    Site,
    Circle,
}

/// A sweep event.
///
/// - `x`: sweep position at which the event fires.
/// - `key`: `x` before rounding (equal to `x` for sites).
/// - `point`: the site (SITE) or the vanishing circle's center (CIRCLE).
/// - `arc`: for CIRCLE events, the beachline leaf that vanishes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event {
    pub x: i64,
    pub key: f64,
    pub kind: EventType,
    pub point: Point,
    pub active: bool,
    pub arc: Option<NodeId>,
}

impl Event {
    #[inline]
    pub fn site(point: Point) -> Self {
        Self {
            x: point.x,
            key: point.x as f64,
            kind: EventType::Site,
            point,
            active: true,
            arc: None,
        }
    }

    /// Circle event firing when the sweep reaches `key` (the rightmost
    /// point of the circle).
    #[inline]
    pub fn circle(key: f64, center: Point, arc: NodeId) -> Self {
        Self {
            x: round_coord(key),
            key,
            kind: EventType::Circle,
            point: center,
            active: true,
            arc: Some(arc),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct QueueKey {
    key: f64,
    kind: EventType,
    y: i64,
    seq: usize,
}

impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then(self.kind.cmp(&other.kind))
            .then(self.y.cmp(&other.y))
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueKey {}

/// Min-priority queue over events with lazy invalidation.
///
/// Ordering: `key` ascending, then SITE before CIRCLE, then `point.y`
/// ascending, then insertion order.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<Event>,
    heap: BinaryHeap<Reverse<QueueKey>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) -> EventId {
        let id = EventId(self.events.len());
        self.heap.push(Reverse(QueueKey {
            key: event.key,
            kind: event.kind,
            y: event.point.y,
            seq: id.0,
        }));
        self.events.push(event);
        id
    }

    /// Remove the minimum event (active or not).
    pub fn pop(&mut self) -> Option<(EventId, Event)> {
        let Reverse(QueueKey { seq, .. }) = self.heap.pop()?;
        let event = *self.events.get(seq)?;
        Some((EventId(seq), event))
    }

    /// Sweep position of the next event, if any.
    pub fn peek_x(&self) -> Option<i64> {
        let Reverse(QueueKey { seq, .. }) = self.heap.peek()?;
        self.events.get(*seq).map(|e| e.x)
    }

    /// Mark an event inactive. Returns whether it was active before.
    pub fn invalidate(&mut self, id: EventId) -> bool {
        match self.events.get_mut(id.0) {
            Some(event) => std::mem::replace(&mut event.active, false),
            None => false,
        }
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.0)
    }

    /// No events left to pop.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Events still queued, including inactive ones.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
