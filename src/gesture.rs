//! Pan gesture recognition from raw pointer input.
//!
//! winit reports absolute cursor positions and button/touch transitions.
//! `PanRecognizer` folds those into pan events carrying an incremental
//! translation: each `take_event` hands out the translation accumulated
//! since the previous one and resets the accumulator to zero.

use vello::kurbo::{Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    /// Movement since the previous event.
    pub translation: Vec2,
    /// Pointer location in the coordinate space positions were reported in.
    pub location: Point,
}

/// Which input owns the active pan, so a second finger cannot hijack it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Default)]
pub struct PanRecognizer {
    active: Option<PointerId>,
    last_location: Option<Point>,
    translation: Vec2,
    hover: Option<Point>,
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The pointer that owns the current pan, if any.
    pub fn active(&self) -> Option<PointerId> {
        self.active
    }

    /// Drop the current pan without emitting an event. Used when the
    /// controller has already been reset underneath it.
    pub fn reset(&mut self) {
        self.active = None;
        self.last_location = None;
        self.translation = Vec2::ZERO;
    }

    /// Last mouse position seen by `motion`, so a press knows where it
    /// started.
    pub fn hover_location(&self) -> Option<Point> {
        self.hover
    }

    /// Start a pan. Returns `None` if another pointer already owns one.
    pub fn press(&mut self, id: PointerId, location: Point) -> Option<PanEvent> {
        if self.active.is_some() {
            return None;
        }
        self.active = Some(id);
        self.last_location = Some(location);
        self.translation = Vec2::ZERO;
        Some(PanEvent {
            phase: PanPhase::Began,
            translation: Vec2::ZERO,
            location,
        })
    }

    /// Feed a new location for `id`. Returns a `Changed` event carrying the
    /// accumulated translation, which is then reset.
    pub fn motion(&mut self, id: PointerId, location: Point) -> Option<PanEvent> {
        if id == PointerId::Mouse {
            self.hover = Some(location);
        }
        if self.active != Some(id) {
            return None;
        }
        if let Some(last) = self.last_location {
            self.translation += location - last;
        }
        self.last_location = Some(location);
        Some(self.take_event(PanPhase::Changed, location))
    }

    /// Finish the pan owned by `id`.
    pub fn release(&mut self, id: PointerId, location: Point) -> Option<PanEvent> {
        if self.active != Some(id) {
            return None;
        }
        if let Some(last) = self.last_location {
            self.translation += location - last;
        }
        let event = self.take_event(PanPhase::Ended, location);
        self.active = None;
        self.last_location = None;
        Some(event)
    }

    /// A cancelled touch ends the pan where it last was.
    pub fn cancel(&mut self, id: PointerId) -> Option<PanEvent> {
        let location = self.last_location?;
        self.release(id, location)
    }

    fn take_event(&mut self, phase: PanPhase, location: Point) -> PanEvent {
        let translation = std::mem::replace(&mut self.translation, Vec2::ZERO);
        PanEvent {
            phase,
            translation,
            location,
        }
    }
}
