//! # Drag interpretation
//!
//! A tap toggles one row. A drag selects or deselects a *run* of rows:
//!
//! - The run's polarity comes from the first row touched. Starting on an
//!   unselected row selects, starting on a selected row deselects.
//! - Reversing vertical direction flips the polarity and rewinds the run: the
//!   rows from the reversal point back to the finger take the new polarity.
//! - A fast drag that skips rows fills the gap, so every row between the
//!   previous and current finger position is touched.
//! - Reaching the top or bottom band of the container hands the run to the
//!   [`AutoScrollEngine`], which owns selection until the finger reverses
//!   or lifts.
//!
//! Everything runs on the caller's thread; the list is borrowed per call.

use std::rc::Rc;

use scrollselect_core::rows::row_count_between;
use scrollselect_core::{Clock, Direction, ListAdapter, Rect, RowAddress, SelectionMode, Vec2};
use web_time::Instant;

use crate::auto_scroll::{AutoScrollEngine, TickOutcome, TimerRequest, TimerToken};
use crate::edge::is_at_edge;
use crate::selection::Selector;
use crate::{ScrollSelectConfig, ScrollSelectDelegate};

/// Transient state of one drag gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub last_position: Vec2,
    pub direction: Direction,
    pub mode: SelectionMode,
    /// Row the current run last reached. `None` until a row resolves.
    pub anchor: Option<RowAddress>,
    pub auto_scroll_active: bool,
}

impl DragState {
    fn new(position: Vec2) -> Self {
        Self {
            last_position: position,
            direction: Direction::None,
            mode: SelectionMode::Selecting,
            anchor: None,
            auto_scroll_active: false,
        }
    }
}

pub struct GestureInterpreter {
    config: ScrollSelectConfig,
    container: Option<Rect>,
    clock: Rc<dyn Clock>,
    delegate: Option<Rc<dyn ScrollSelectDelegate>>,
    drag: Option<DragState>,
    engine: AutoScrollEngine,
}

/// Applies `mode` from `from` through `to` along `direction` when `to` lies
/// that way; otherwise only `to`.
fn fill_run(
    sel: &mut Selector<'_>,
    from: RowAddress,
    to: RowAddress,
    mode: SelectionMode,
    direction: Direction,
) {
    let span = if direction.reaches(from, to) {
        row_count_between(&*sel.list, from, to)
    } else {
        None
    };
    match span {
        Some(steps) => {
            sel.apply_selection_range(from, steps + 1, mode, direction);
        }
        None => {
            sel.apply(to, mode);
        }
    }
}

impl GestureInterpreter {
    pub fn new(config: ScrollSelectConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            config,
            container: None,
            clock,
            delegate: None,
            drag: None,
            engine: AutoScrollEngine::new(),
        }
    }

    pub fn config(&self) -> &ScrollSelectConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ScrollSelectConfig) {
        self.config = config;
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    /// Bounds of the common ancestor of the list and the touch strip, in the
    /// space pointer positions arrive in.
    pub fn set_container(&mut self, rect: Rect) {
        self.container = Some(rect);
    }

    pub fn set_delegate(&mut self, delegate: Option<Rc<dyn ScrollSelectDelegate>>) {
        self.delegate = delegate;
    }

    pub fn delegate(&self) -> Option<&Rc<dyn ScrollSelectDelegate>> {
        self.delegate.as_ref()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.engine.is_running()
    }

    pub fn timer_request(&self) -> Option<TimerRequest> {
        self.engine.timer_request()
    }

    /// Toggles the row under `point`. Ignored while auto-scroll runs.
    pub fn tap(&mut self, list: &mut dyn ListAdapter, point: Vec2) {
        if self.engine.is_running() {
            log::debug!("tap ignored during auto-scroll");
            return;
        }
        let Some(address) = list.row_at(point) else {
            return;
        };
        let selected = list.is_row_selected(address);
        Selector::new(list, self.delegate.as_deref()).set_row_selected(address, !selected);
    }

    pub fn pan_began(&mut self, list: &mut dyn ListAdapter, position: Vec2) {
        self.engine.reset();
        self.drag = None;
        if list.is_empty() {
            return;
        }
        let mut drag = DragState::new(position);
        if let Some(address) = list.row_at(position) {
            drag.mode = SelectionMode::for_row(list.is_row_selected(address));
            drag.anchor = Some(address);
            Selector::new(list, self.delegate.as_deref()).apply(address, drag.mode);
        }
        log::debug!("drag began at {:?}: anchor {:?}, {:?}", position, drag.anchor, drag.mode);
        self.drag = Some(drag);
    }

    pub fn pan_moved(&mut self, list: &mut dyn ListAdapter, position: Vec2) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if (position.y - drag.last_position.y).abs() < self.config.noise_threshold {
            return;
        }

        let moving_forward = position.y > drag.last_position.y;
        let reversed = (moving_forward && drag.direction == Direction::Backward)
            || (!moving_forward && drag.direction == Direction::Forward);
        if self.engine.is_running() && !reversed {
            return;
        }

        drag.direction = if moving_forward {
            Direction::Forward
        } else {
            Direction::Backward
        };
        drag.last_position = position;

        let Some(address) = list.row_at(position) else {
            return;
        };
        log::trace!("drag at {:?} over {}", position, address);

        let Some(mut anchor) = drag.anchor else {
            // First row this drag has touched: it starts the run.
            drag.mode = SelectionMode::for_row(list.is_row_selected(address));
            drag.anchor = Some(address);
            Selector::new(list, self.delegate.as_deref()).apply(address, drag.mode);
            return;
        };

        if reversed {
            if let Some(last) = self.engine.cancel(&*list) {
                anchor = last;
            }
            drag.auto_scroll_active = false;
            drag.mode = drag.mode.flipped();
            log::debug!("drag reversed at {}: now {:?}", anchor, drag.mode);
            let mut sel = Selector::new(list, self.delegate.as_deref());
            fill_run(&mut sel, anchor, address, drag.mode, drag.direction);
            drag.anchor = Some(address);
            return;
        }

        let at_edge = self.container.is_some_and(|container| {
            is_at_edge(
                position,
                container,
                drag.direction,
                self.config.top_edge_threshold,
                self.config.bottom_edge_threshold,
            )
        });

        let mut sel = Selector::new(list, self.delegate.as_deref());
        let skipped = if drag.direction.reaches(anchor, address) {
            row_count_between(&*sel.list, anchor, address).unwrap_or(0)
        } else {
            0
        };
        if skipped > 1 {
            // Fast drag: walk back from the finger to the anchor.
            sel.apply_selection_range(address, skipped + 1, drag.mode, drag.direction.reversed());
        } else {
            sel.apply(address, drag.mode);
        }
        drag.anchor = Some(address);

        if at_edge {
            let now = self.clock.now();
            let started = self
                .engine
                .start(&*sel.list, address, drag.direction, drag.mode, &self.config, now);
            drag.auto_scroll_active = started.is_some();
        }
    }

    /// Finger lifted or the host cancelled the gesture.
    pub fn pan_ended(&mut self, list: &dyn ListAdapter) {
        self.engine.cancel(list);
        if self.drag.take().is_some() {
            log::debug!("drag ended");
        }
    }

    /// Drops all drag and animation state without touching the list.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.drag = None;
    }

    /// Advances the auto-scroll animation. Returns `true` while the host
    /// should keep ticking `token`.
    pub fn on_timer(&mut self, list: &mut dyn ListAdapter, token: TimerToken) -> bool {
        let now = self.clock.now();
        let mut sel = Selector::new(list, self.delegate.as_deref());
        match self.engine.tick(&mut sel, token, now) {
            TickOutcome::Running => true,
            TickOutcome::Finished(destination) => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.anchor = Some(destination);
                    drag.auto_scroll_active = false;
                }
                false
            }
            TickOutcome::Stale => false,
        }
    }
}
