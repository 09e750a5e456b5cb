//! The list collaborator.
//!
//! The controller never renders or lays out rows. Any concrete list widget
//! plugs in through a thin shim implementing [`ListAdapter`], kept outside
//! this crate.

use crate::{Rect, RowAddress, Size, Vec2};

pub trait ListAdapter {
    fn section_count(&self) -> usize;

    fn row_count(&self, section: usize) -> usize;

    /// Hit-test a point given in the coordinate space shared by the list and
    /// the touch surface.
    fn row_at(&self, point: Vec2) -> Option<RowAddress>;

    fn is_row_selected(&self, address: RowAddress) -> bool;

    /// Must fire the widget's own selection-changed notification once per
    /// actual state change, never for a no-op call.
    fn select_row(&mut self, address: RowAddress);

    fn deselect_row(&mut self, address: RowAddress);

    fn scroll_offset(&self) -> f32;

    /// Direct write; implementations must not animate.
    fn set_scroll_offset(&mut self, offset: f32);

    fn content_extent(&self) -> Size;

    fn viewport_extent(&self) -> Size;

    /// Live measured rect of a row in content coordinates. Only consulted
    /// when estimated row heights are not trusted.
    fn rect_for_row(&self, _address: RowAddress) -> Option<Rect> {
        None
    }

    fn content_start_offset(&self) -> f32 {
        0.0
    }

    fn content_end_offset(&self) -> f32 {
        (self.content_extent().height - self.viewport_extent().height).max(0.0)
    }

    fn is_empty(&self) -> bool {
        (0..self.section_count()).all(|s| self.row_count(s) == 0)
    }
}
