use smallvec::SmallVec;

use scrollselect_core::rows::{is_valid, next_row, previous_row};
use scrollselect_core::{Direction, ListAdapter, RowAddress, SelectionMode};

use crate::ScrollSelectDelegate;

/// Rows whose state actually changed during one application.
pub type Changed = SmallVec<[RowAddress; 4]>;

/// Write access to the list's selection for the duration of one callback.
pub struct Selector<'a> {
    pub list: &'a mut dyn ListAdapter,
    delegate: Option<&'a dyn ScrollSelectDelegate>,
}

impl<'a> Selector<'a> {
    pub fn new(
        list: &'a mut dyn ListAdapter,
        delegate: Option<&'a dyn ScrollSelectDelegate>,
    ) -> Self {
        Self { list, delegate }
    }

    /// Idempotent: returns `false` and notifies nobody when the row already
    /// has the requested state.
    pub fn set_row_selected(&mut self, address: RowAddress, selected: bool) -> bool {
        if self.list.is_row_selected(address) == selected {
            return false;
        }
        if selected {
            self.list.select_row(address);
        } else {
            self.list.deselect_row(address);
        }
        if let Some(d) = self.delegate {
            d.on_row_selection_changed(address, selected);
        }
        true
    }

    pub fn apply(&mut self, address: RowAddress, mode: SelectionMode) -> bool {
        self.set_row_selected(address, mode.selects())
    }

    /// Applies `mode` to `count` consecutive rows starting at `from`, stepping
    /// in `direction`. Stops quietly at either end of the list.
    pub fn apply_selection_range(
        &mut self,
        from: RowAddress,
        count: usize,
        mode: SelectionMode,
        direction: Direction,
    ) -> Changed {
        let mut changed = Changed::new();
        if count == 0 || !is_valid(&*self.list, from) {
            return changed;
        }
        let mut at = Some(from);
        for i in 0..count {
            let Some(address) = at else { break };
            if self.apply(address, mode) {
                changed.push(address);
            }
            if i + 1 == count {
                break;
            }
            at = match direction {
                Direction::Forward => next_row(&*self.list, address),
                Direction::Backward => previous_row(&*self.list, address),
                Direction::None => None,
            };
        }
        log::trace!(
            "applied {:?} to {} row(s) from {} ({} changed)",
            mode,
            count,
            from,
            changed.len()
        );
        changed
    }
}
