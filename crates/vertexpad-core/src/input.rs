//! Pointer input: device-space normalisation, events and subscriptions.

use crate::geometry::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };

    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

/// Kinds of input event a tool can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Click,
    PointerDown,
    PointerMove,
    PointerUp,
    /// Secondary-button click.
    ContextMenu,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Click,
        EventKind::PointerDown,
        EventKind::PointerMove,
        EventKind::PointerUp,
        EventKind::ContextMenu,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of event kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EventSet(u8);

impl EventSet {
    pub const EMPTY: EventSet = EventSet(0);

    pub const fn of(kinds: &[EventKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        EventSet(bits)
    }

    pub fn contains(self, kind: EventKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Kinds in `self` that are not in `other`.
    pub fn difference(self, other: EventSet) -> EventSet {
        EventSet(self.0 & !other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = EventKind> {
        EventKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

/// Listener changes the host applies when the active tool switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionChange {
    pub bind: EventSet,
    pub unbind: EventSet,
}

impl SubscriptionChange {
    /// Diff between the outgoing and incoming subscription sets.
    pub fn between(from: EventSet, to: EventSet) -> Self {
        Self {
            bind: to.difference(from),
            unbind: from.difference(to),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bind.is_empty() && self.unbind.is_empty()
    }
}

/// A pointer event in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub position: Point,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(kind: EventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::new(EventKind::Click, Point::new(x, y))
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(EventKind::PointerDown, Point::new(x, y))
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(EventKind::PointerMove, Point::new(x, y))
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(EventKind::PointerUp, Point::new(x, y))
    }

    pub fn context_menu(x: f64, y: f64) -> Self {
        Self::new(EventKind::ContextMenu, Point::new(x, y))
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// What the host should do after an event was dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The scene was repainted.
    pub repainted: bool,
    /// Suppress the host's default action (e.g. the context menu).
    pub prevent_default: bool,
}

impl EventResponse {
    pub const IGNORED: EventResponse = EventResponse {
        repainted: false,
        prevent_default: false,
    };

    pub const REPAINT: EventResponse = EventResponse {
        repainted: true,
        prevent_default: false,
    };

    pub fn prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 800.0)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map a pixel offset (origin top-left) to device space, Y flipped.
    pub fn normalize(&self, offset_x: f64, offset_y: f64) -> Point {
        Point::new(
            (offset_x / self.width) * 2.0 - 1.0,
            (1.0 - offset_y / self.height) * 2.0 - 1.0,
        )
    }

    /// Height over width.
    pub fn aspect(&self) -> f64 {
        self.height / self.width
    }

    /// A pixel distance expressed in horizontal device units.
    pub fn pixels_to_device(&self, pixels: f64) -> f64 {
        pixels * 2.0 / self.width
    }

    /// Per-axis factors that keep drags proportional on non-square surfaces.
    pub fn drag_scale(&self) -> Vec2 {
        let min = self.width.min(self.height);
        Vec2::new(min / self.width, min / self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.normalize(0.0, 0.0), Point::new(-1.0, 1.0));
        assert_eq!(vp.normalize(800.0, 600.0), Point::new(1.0, -1.0));
        assert_eq!(vp.normalize(400.0, 300.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_aspect_and_tolerance() {
        let vp = Viewport::new(800.0, 600.0);
        assert!((vp.aspect() - 0.75).abs() < f64::EPSILON);
        assert!((vp.pixels_to_device(20.0) - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drag_scale() {
        let wide = Viewport::new(800.0, 600.0).drag_scale();
        assert!((wide.x - 0.75).abs() < f64::EPSILON);
        assert!((wide.y - 1.0).abs() < f64::EPSILON);

        let square = Viewport::default().drag_scale();
        assert_eq!(square, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_event_set() {
        let set = EventSet::of(&[EventKind::Click, EventKind::PointerMove]);
        assert!(set.contains(EventKind::Click));
        assert!(set.contains(EventKind::PointerMove));
        assert!(!set.contains(EventKind::ContextMenu));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![EventKind::Click, EventKind::PointerMove]);
        assert!(EventSet::EMPTY.is_empty());
    }

    #[test]
    fn test_subscription_change() {
        let from = EventSet::of(&[EventKind::Click, EventKind::PointerDown, EventKind::PointerUp]);
        let to = EventSet::of(&[EventKind::Click, EventKind::PointerMove]);
        let change = SubscriptionChange::between(from, to);
        assert_eq!(change.bind, EventSet::of(&[EventKind::PointerMove]));
        assert_eq!(change.unbind, EventSet::of(&[EventKind::PointerDown, EventKind::PointerUp]));
        assert!(SubscriptionChange::between(to, to).is_empty());
    }

    #[test]
    fn test_event_builders() {
        let e = PointerEvent::down(0.1, 0.2).with_modifiers(Modifiers::SHIFT);
        assert_eq!(e.kind, EventKind::PointerDown);
        assert!(e.modifiers.shift);
        assert_eq!(e.position, Point::new(0.1, 0.2));
    }
}
