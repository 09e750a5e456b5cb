use scrollselect_core::{Direction, Rect, Vec2};

/// Whether `position` sits in the auto-scroll band for the way the drag is
/// heading. `container` is the common ancestor of the list and the touch
/// strip, in the same space as `position`.
///
/// Moving backward triggers above `container.top + top`; moving forward
/// triggers below `container.bottom + bottom`. With no direction yet there
/// is no edge.
pub fn is_at_edge(
    position: Vec2,
    container: Rect,
    direction: Direction,
    top: f32,
    bottom: f32,
) -> bool {
    match direction {
        Direction::None => false,
        Direction::Backward => position.y < container.min_y() + top,
        Direction::Forward => position.y > container.max_y() + bottom,
    }
}
