use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn origin(&self) -> Point {
        Point { x: self.left, y: self.top }
    }
}

/// Landing point of a flight: horizontally centred on the cart icon, a quarter
/// of the way down.
pub fn jump_target(cart: Rect) -> Point {
    Point { x: cart.left + cart.width / 2.0, y: cart.top + cart.height / 4.0 }
}

/// Geometry the tracker needs to place flights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub cart: Rect,
    pub first_row_top: f64,
    pub row_height: f64,
    pub add_button_left: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cart: Rect { left: 16.0, top: 600.0, width: 48.0, height: 48.0 },
            first_row_top: 24.0,
            row_height: 120.0,
            add_button_left: 320.0,
        }
    }
}

impl Layout {
    pub fn add_button_origin(&self, index: usize) -> Point {
        Point { x: self.add_button_left, y: self.first_row_top + self.row_height * index as f64 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FlightId(pub u64);

/// One fly-to-cart flight. Acquired when the flight starts and released by
/// handing it back to [`AnimationTracker::complete`], which consumes it.
#[must_use = "a flight must be completed to release it"]
#[derive(Debug, PartialEq)]
pub struct FlightHandle {
    id: FlightId,
    item_index: usize,
    start: Point,
    end: Point,
}

impl FlightHandle {
    pub fn id(&self) -> FlightId {
        self.id
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The flight landed and the cart started bouncing.
    Landed,
    /// The flight was not in flight any more; nothing changed.
    Ignored,
}

/// Tracks in-flight animations and the cart bounce. Holds no cart data.
#[derive(Clone, Debug)]
pub struct AnimationTracker {
    layout: Layout,
    target: Point,
    next_id: u64,
    in_flight: BTreeSet<FlightId>,
    bouncing: bool,
}

impl AnimationTracker {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            target: jump_target(layout.cart),
            next_id: 0,
            in_flight: BTreeSet::new(),
            bouncing: false,
        }
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn start_flight(&mut self, item_index: usize) -> FlightHandle {
        let id = FlightId(self.next_id);
        self.next_id += 1;
        self.in_flight.insert(id);

        let handle = FlightHandle {
            id,
            item_index,
            start: self.layout.add_button_origin(item_index),
            end: self.target,
        };
        debug!(
            event_name = "cart.animation.flight_started",
            flight_id = id.0,
            item_index,
            in_flight = self.in_flight.len(),
        );
        handle
    }

    pub fn complete(&mut self, handle: FlightHandle) -> Completion {
        self.complete_id(handle.id)
    }

    /// Completion delivered by id, e.g. from an external transition-end source.
    /// Unknown or repeated ids are ignored.
    pub fn complete_id(&mut self, id: FlightId) -> Completion {
        if !self.in_flight.remove(&id) {
            debug!(event_name = "cart.animation.completion_ignored", flight_id = id.0);
            return Completion::Ignored;
        }

        self.bouncing = true;
        debug!(
            event_name = "cart.animation.flight_landed",
            flight_id = id.0,
            in_flight = self.in_flight.len(),
        );
        Completion::Landed
    }

    pub fn bounce_finished(&mut self) {
        self.bouncing = false;
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_bouncing(&self) -> bool {
        self.bouncing
    }
}
