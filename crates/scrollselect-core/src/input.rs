use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Up,
    Move,
    /// The host took the pointer away (system gesture, focus loss, ...).
    Cancel,
}

/// Raw pointer sample. `position` is in the coordinate space shared by the
/// list and the touch surface.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub event: PointerEventKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn touch(event: PointerEventKind, position: Vec2) -> Self {
        Self {
            id: PointerId(0),
            event,
            position,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = PointerId(id);
        self
    }
}
