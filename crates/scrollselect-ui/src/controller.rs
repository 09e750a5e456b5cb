use std::rc::Rc;

use scrollselect_core::{
    Clock, Direction, ListAdapter, PointerEvent, Rect, SelectionMode, SystemClock, Vec2,
};

use crate::auto_scroll::{TimerRequest, TimerToken};
use crate::gestures::{Gesture, GestureDetector};
use crate::interpreter::GestureInterpreter;
use crate::{ConfigError, ScrollSelectConfig, ScrollSelectDelegate};

/// Drag-to-select controller attached to one list.
///
/// Starts disabled. While disabled every input is dropped; disabling
/// mid-gesture tears down the drag and any auto-scroll synchronously.
pub struct ScrollSelect {
    enabled: bool,
    detector: GestureDetector,
    interpreter: GestureInterpreter,
}

impl ScrollSelect {
    pub fn new(config: ScrollSelectConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Rc::new(SystemClock))
    }

    pub fn with_clock(
        config: ScrollSelectConfig,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            enabled: false,
            detector: GestureDetector::new(config.tap_slop, config.tap_timeout),
            interpreter: GestureInterpreter::new(config, clock),
        })
    }

    pub fn with_delegate(mut self, delegate: Rc<dyn ScrollSelectDelegate>) -> Self {
        self.interpreter.set_delegate(Some(delegate));
        self
    }

    pub fn set_delegate(&mut self, delegate: Option<Rc<dyn ScrollSelectDelegate>>) {
        self.interpreter.set_delegate(delegate);
    }

    pub fn config(&self) -> &ScrollSelectConfig {
        self.interpreter.config()
    }

    /// Replaces the configuration. A running auto-scroll keeps the speed and
    /// destination it started with.
    pub fn set_config(&mut self, config: ScrollSelectConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.detector.set_tap_tolerance(config.tap_slop, config.tap_timeout);
        self.interpreter.set_config(config);
        Ok(())
    }

    pub fn set_container_rect(&mut self, rect: Rect) {
        self.interpreter.set_container(rect);
    }

    /// The strip pointer-downs must land in, if the container is known.
    pub fn touch_strip(&self) -> Option<Rect> {
        self.interpreter
            .container()
            .map(|c| c.trailing_strip(self.config().touch_strip_width))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        log::debug!("scroll select {}", if enabled { "enabled" } else { "disabled" });
        if !enabled {
            self.teardown();
        }
    }

    fn teardown(&mut self) {
        let was_panning = self.interpreter.is_dragging();
        self.detector.reset();
        self.interpreter.reset();
        if was_panning {
            self.notify_panning_ended();
        }
    }

    fn notify_panning_began(&self) {
        if let Some(d) = self.interpreter.delegate() {
            d.on_panning_began();
        }
    }

    fn notify_panning_ended(&self) {
        if let Some(d) = self.interpreter.delegate() {
            d.on_panning_ended();
        }
    }

    /// Feeds one raw pointer event.
    pub fn handle_pointer(&mut self, list: &mut dyn ListAdapter, event: &PointerEvent) {
        if !self.enabled {
            return;
        }
        let Some(strip) = self.touch_strip() else {
            return;
        };
        let now = self.interpreter.now();
        for gesture in self.detector.handle_pointer(event, strip, now) {
            match gesture {
                Gesture::Tap(p) => self.tap(list, p),
                Gesture::PanBegan(p) => self.pan_began(list, p),
                Gesture::PanMoved(p) => self.pan_moved(list, p),
                Gesture::PanEnded(_) => self.pan_ended(list),
                Gesture::PanCancelled => self.pan_cancelled(list),
            }
        }
    }

    pub fn tap(&mut self, list: &mut dyn ListAdapter, point: Vec2) {
        if self.enabled {
            self.interpreter.tap(list, point);
        }
    }

    /// Starts a drag. Nothing is reported for a list with no rows, where no
    /// drag is created.
    pub fn pan_began(&mut self, list: &mut dyn ListAdapter, position: Vec2) {
        if !self.enabled {
            return;
        }
        let was_panning = self.interpreter.is_dragging();
        self.interpreter.pan_began(list, position);
        if was_panning {
            self.notify_panning_ended();
        }
        if self.interpreter.is_dragging() {
            self.notify_panning_began();
        }
    }

    pub fn pan_moved(&mut self, list: &mut dyn ListAdapter, position: Vec2) {
        if self.enabled {
            self.interpreter.pan_moved(list, position);
        }
    }

    pub fn pan_ended(&mut self, list: &dyn ListAdapter) {
        if !self.enabled {
            return;
        }
        let was_panning = self.interpreter.is_dragging();
        self.interpreter.pan_ended(list);
        if was_panning {
            self.notify_panning_ended();
        }
    }

    pub fn pan_cancelled(&mut self, list: &dyn ListAdapter) {
        self.pan_ended(list);
    }

    /// Timer the host should be running, if any. The token changes whenever
    /// a new auto-scroll starts; reschedule when it does.
    pub fn timer_request(&self) -> Option<TimerRequest> {
        self.interpreter.timer_request()
    }

    /// One auto-scroll tick. Returns whether the host should keep the timer.
    pub fn on_timer(&mut self, list: &mut dyn ListAdapter, token: TimerToken) -> bool {
        self.enabled && self.interpreter.on_timer(list, token)
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.interpreter.is_auto_scrolling()
    }

    pub fn is_panning(&self) -> bool {
        self.interpreter.is_dragging()
    }

    pub fn selection_mode(&self) -> Option<SelectionMode> {
        self.interpreter.drag().map(|d| d.mode)
    }

    pub fn direction(&self) -> Direction {
        self.interpreter.drag().map(|d| d.direction).unwrap_or_default()
    }

    pub fn interpreter(&self) -> &GestureInterpreter {
        &self.interpreter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollselect_core::{ManualClock, MemoryList, PointerEventKind, RowAddress};
    use std::cell::RefCell;
    use web_time::Duration;

    #[derive(Default)]
    struct Events(RefCell<Vec<&'static str>>);

    impl ScrollSelectDelegate for Events {
        fn on_panning_began(&self) {
            self.0.borrow_mut().push("began");
        }
        fn on_panning_ended(&self) {
            self.0.borrow_mut().push("ended");
        }
    }

    fn setup() -> (ScrollSelect, MemoryList, Rc<ManualClock>, Rc<Events>) {
        let clock = Rc::new(ManualClock::default());
        let events = Rc::new(Events::default());
        let list = MemoryList::new(vec![40], 50.0).with_frame(Rect::new(0.0, 0.0, 320.0, 500.0));
        let mut ctl = ScrollSelect::with_clock(ScrollSelectConfig::default(), clock.clone())
            .unwrap()
            .with_delegate(events.clone());
        ctl.set_container_rect(list.frame());
        ctl.set_enabled(true);
        (ctl, list, clock, events)
    }

    fn touch(kind: PointerEventKind, y: f32) -> PointerEvent {
        PointerEvent::touch(kind, Vec2::new(300.0, y))
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = ScrollSelectConfig::default().touch_strip_width(f32::INFINITY);
        assert!(ScrollSelect::new(cfg).is_err());
    }

    #[test]
    fn starts_disabled_and_ignores_input() {
        let mut ctl = ScrollSelect::new(ScrollSelectConfig::default()).unwrap();
        let mut list = MemoryList::new(vec![3], 50.0);
        ctl.set_container_rect(list.frame());
        assert!(!ctl.is_enabled());
        let p = list.point_for_row(RowAddress::new(0, 1));
        ctl.tap(&mut list, p);
        assert_eq!(list.selected_count(), 0);
    }

    #[test]
    fn pointer_stream_drives_a_pan() {
        let (mut ctl, mut list, _, events) = setup();
        ctl.handle_pointer(&mut list, &touch(PointerEventKind::Down, 75.0));
        ctl.handle_pointer(&mut list, &touch(PointerEventKind::Move, 125.0));
        ctl.handle_pointer(&mut list, &touch(PointerEventKind::Move, 225.0));
        assert_eq!(ctl.selection_mode(), Some(SelectionMode::Selecting));
        assert_eq!(ctl.direction(), Direction::Forward);
        ctl.handle_pointer(&mut list, &touch(PointerEventKind::Up, 225.0));

        let rows: Vec<_> = list.selected().map(|a| a.row).collect();
        assert_eq!(rows, vec![1, 2, 3, 4]);
        assert!(!ctl.is_panning());
        assert_eq!(*events.0.borrow(), vec!["began", "ended"]);
    }

    #[test]
    fn pointer_tap_toggles_row() {
        let (mut ctl, mut list, _, events) = setup();
        ctl.handle_pointer(&mut list, &touch(PointerEventKind::Down, 125.0));
        ctl.handle_pointer(&mut list, &touch(PointerEventKind::Up, 126.0));
        assert!(list.is_row_selected(RowAddress::new(0, 2)));
        assert!(events.0.borrow().is_empty());
    }

    #[test]
    fn down_outside_touch_strip_is_ignored() {
        let (mut ctl, mut list, _, _) = setup();
        let down = PointerEvent::touch(PointerEventKind::Down, Vec2::new(20.0, 125.0));
        let up = PointerEvent::touch(PointerEventKind::Up, Vec2::new(20.0, 125.0));
        ctl.handle_pointer(&mut list, &down);
        ctl.handle_pointer(&mut list, &up);
        assert_eq!(list.selected_count(), 0);
    }

    #[test]
    fn disabling_mid_scroll_tears_down_synchronously() {
        let (mut ctl, mut list, clock, events) = setup();
        ctl.handle_pointer(&mut list, &touch(PointerEventKind::Down, 275.0));
        ctl.handle_pointer(&mut list, &touch(PointerEventKind::Move, 475.0));
        assert!(ctl.is_auto_scrolling());
        let req = ctl.timer_request().unwrap();

        ctl.set_enabled(false);
        assert!(!ctl.is_auto_scrolling());
        assert!(!ctl.is_panning());
        assert_eq!(*events.0.borrow(), vec!["began", "ended"]);

        let before = list.selected_count();
        clock.advance(Duration::from_secs(1));
        assert!(!ctl.on_timer(&mut list, req.token));
        assert_eq!(list.selected_count(), before);

        // re-enabling starts fresh
        ctl.set_enabled(true);
        assert_eq!(ctl.timer_request(), None);
        assert_eq!(ctl.selection_mode(), None);
    }

    #[test]
    fn pan_on_empty_list_reports_nothing() {
        let events = Rc::new(Events::default());
        let mut list = MemoryList::new(vec![], 50.0);
        let mut ctl = ScrollSelect::new(ScrollSelectConfig::default())
            .unwrap()
            .with_delegate(events.clone());
        ctl.set_container_rect(list.frame());
        ctl.set_enabled(true);

        ctl.pan_began(&mut list, Vec2::new(300.0, 100.0));
        ctl.pan_ended(&list);
        ctl.set_enabled(false);
        assert!(events.0.borrow().is_empty());
    }

    #[test]
    fn restarted_pan_closes_the_previous_one() {
        let (mut ctl, mut list, _, events) = setup();
        let p = list.point_for_row(RowAddress::new(0, 1));
        ctl.pan_began(&mut list, p);
        let p = list.point_for_row(RowAddress::new(0, 3));
        ctl.pan_began(&mut list, p);
        ctl.pan_ended(&list);
        ctl.pan_cancelled(&list);
        assert_eq!(*events.0.borrow(), vec!["began", "ended", "began", "ended"]);
    }
}
