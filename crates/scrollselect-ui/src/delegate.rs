use scrollselect_core::RowAddress;

/// Callbacks the embedder can hook into. All methods default to no-ops.
///
/// `on_panning_began` / `on_panning_ended` bracket every pan, including one
/// torn down by disabling the controller; use them for things like locking
/// rotation while the finger is down.
pub trait ScrollSelectDelegate {
    fn on_panning_began(&self) {}

    fn on_panning_ended(&self) {}

    /// Fired once per row whose selection state the controller actually changed.
    fn on_row_selection_changed(&self, _address: RowAddress, _selected: bool) {}
}
