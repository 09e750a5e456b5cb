use std::collections::BTreeSet;

use crate::{ListAdapter, Rect, RowAddress, Size, Vec2};

pub type SelectionObserver = Box<dyn Fn(RowAddress, bool)>;

/// In-memory sectioned list with a uniform row height.
///
/// `frame` is the list's viewport in the shared container space; rows are
/// stacked from the top of the content with no section headers.
pub struct MemoryList {
    sections: Vec<usize>,
    row_height: f32,
    frame: Rect,
    offset: f32,
    selected: BTreeSet<RowAddress>,
    observer: Option<SelectionObserver>,
}

impl MemoryList {
    pub fn new(sections: Vec<usize>, row_height: f32) -> Self {
        Self {
            sections,
            row_height: row_height.max(0.0),
            frame: Rect::new(0.0, 0.0, 320.0, 480.0),
            offset: 0.0,
            selected: BTreeSet::new(),
            observer: None,
        }
    }

    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Register the selection-changed notification.
    pub fn set_observer(&mut self, f: impl Fn(RowAddress, bool) + 'static) {
        self.observer = Some(Box::new(f));
    }

    pub fn selected(&self) -> impl Iterator<Item = RowAddress> + '_ {
        self.selected.iter().copied()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Flat index of a row counting from the top of the content. Sections
    /// past the end count as empty, so foreign addresses land below the
    /// last row.
    fn flat_index(&self, address: RowAddress) -> usize {
        self.sections.iter().take(address.section).sum::<usize>() + address.row
    }

    fn address_for_flat(&self, mut index: usize) -> Option<RowAddress> {
        for (section, &count) in self.sections.iter().enumerate() {
            if index < count {
                return Some(RowAddress::new(section, index));
            }
            index -= count;
        }
        None
    }

    /// Container-space point at the vertical center of a row. For an address
    /// outside the list the point is past the content and hits no row.
    pub fn point_for_row(&self, address: RowAddress) -> Vec2 {
        let top = self.flat_index(address) as f32 * self.row_height;
        Vec2::new(
            self.frame.x + self.frame.w - 1.0,
            self.frame.y + top - self.offset + self.row_height / 2.0,
        )
    }

    fn notify(&self, address: RowAddress, selected: bool) {
        if let Some(cb) = &self.observer {
            cb(address, selected);
        }
    }
}

impl ListAdapter for MemoryList {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.sections.get(section).copied().unwrap_or(0)
    }

    fn row_at(&self, point: Vec2) -> Option<RowAddress> {
        if !self.frame.contains(point) || self.row_height <= 0.0 {
            return None;
        }
        let y = point.y - self.frame.y + self.offset;
        if y < 0.0 {
            return None;
        }
        self.address_for_flat((y / self.row_height) as usize)
    }

    fn is_row_selected(&self, address: RowAddress) -> bool {
        self.selected.contains(&address)
    }

    fn select_row(&mut self, address: RowAddress) {
        if self.selected.insert(address) {
            self.notify(address, true);
        }
    }

    fn deselect_row(&mut self, address: RowAddress) {
        if self.selected.remove(&address) {
            self.notify(address, false);
        }
    }

    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    fn content_extent(&self) -> Size {
        let rows: usize = self.sections.iter().sum();
        Size::new(self.frame.w, rows as f32 * self.row_height)
    }

    fn viewport_extent(&self) -> Size {
        Size::new(self.frame.w, self.frame.h)
    }

    fn rect_for_row(&self, address: RowAddress) -> Option<Rect> {
        if address.section >= self.sections.len() || address.row >= self.sections[address.section] {
            return None;
        }
        Some(Rect::new(
            0.0,
            self.flat_index(address) as f32 * self.row_height,
            self.frame.w,
            self.row_height,
        ))
    }
}
