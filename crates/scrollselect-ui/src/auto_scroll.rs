//! # Edge auto-scroll
//!
//! Once a drag reaches the top or bottom band of the container, the engine
//! takes over: it scrolls the list toward its first or last row at a fixed
//! number of rows per second and applies the run's selection mode to every
//! row it passes.
//!
//! The scroll offset is interpolated linearly and written directly on each
//! tick rather than handed to a widget-native "animate to row" call. The
//! widget would hide the intermediate offsets, and every passed row has to be
//! visited.
//!
//! Ticks are driven by the host. `start` hands out a [`TimerRequest`]; the
//! host calls [`AutoScrollEngine::tick`] with its token at (roughly) the
//! requested interval until `tick` stops returning `Running`. A new start,
//! a cancel or a completion retires the token, so late ticks are ignored.

use scrollselect_core::rows::{first_row_address, last_row_address, offset_row, row_count_between};
use scrollselect_core::{Direction, Interpolate, ListAdapter, RowAddress, SelectionMode, progress};
use web_time::{Duration, Instant};

use crate::ScrollSelectConfig;
use crate::selection::Selector;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerRequest {
    pub token: TimerToken,
    pub interval: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Running,
    /// Reached the destination; the last row applied is the destination row.
    Finished(RowAddress),
    /// No animation owns this token.
    Stale,
}

/// Where the animation is heading in offset space.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Destination {
    /// Computed once at start from the content size.
    Estimated(f32),
    /// Re-measured on every tick.
    Measured,
}

/// State of one auto-scroll run. Replaced wholesale on every start and
/// dropped on stop.
#[derive(Clone, Debug)]
pub struct ScrollAnimation {
    token: TimerToken,
    start: Instant,
    start_offset: f32,
    destination_offset: Destination,
    duration: Duration,
    seconds_per_row: Duration,
    anchor: RowAddress,
    destination: RowAddress,
    direction: Direction,
    mode: SelectionMode,
    rows_to_travel: usize,
    rows_processed: usize,
    interval: Duration,
}

impl ScrollAnimation {
    pub fn destination(&self) -> RowAddress {
        self.destination
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Last row the run has applied its mode to, if any.
    fn last_applied(&self, list: &dyn ListAdapter) -> Option<RowAddress> {
        match self.rows_processed {
            0 => None,
            n => offset_row(list, self.anchor, n - 1, self.direction),
        }
    }

    fn target_offset(&self, list: &dyn ListAdapter) -> f32 {
        match self.destination_offset {
            Destination::Estimated(off) => off,
            Destination::Measured => measured_offset(list, self.destination, self.direction),
        }
    }
}

fn estimated_offset(list: &dyn ListAdapter, direction: Direction) -> f32 {
    match direction {
        Direction::Backward => list.content_start_offset(),
        _ => list.content_end_offset(),
    }
}

fn measured_offset(list: &dyn ListAdapter, destination: RowAddress, direction: Direction) -> f32 {
    let Some(rect) = list.rect_for_row(destination) else {
        return estimated_offset(list, direction);
    };
    match direction {
        Direction::Backward => rect.min_y().max(list.content_start_offset()),
        _ => (rect.max_y() - list.viewport_extent().height).max(list.content_start_offset()),
    }
}

#[derive(Default)]
pub struct AutoScrollEngine {
    animation: Option<ScrollAnimation>,
    next_token: u64,
}

impl AutoScrollEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.animation.as_ref()
    }

    pub fn timer_request(&self) -> Option<TimerRequest> {
        self.animation.as_ref().map(|a| TimerRequest {
            token: a.token,
            interval: a.interval,
        })
    }

    /// Starts scrolling from `anchor` toward the first or last row.
    ///
    /// Any running animation is dropped first. Returns `None` without
    /// starting when the list is empty, `direction` is `None`, or `anchor`
    /// is not a row of the list.
    pub fn start(
        &mut self,
        list: &dyn ListAdapter,
        anchor: RowAddress,
        direction: Direction,
        mode: SelectionMode,
        config: &ScrollSelectConfig,
        now: Instant,
    ) -> Option<TimerRequest> {
        self.animation = None;

        let destination = match direction {
            Direction::Forward => last_row_address(list)?,
            Direction::Backward => first_row_address(list)?,
            Direction::None => return None,
        };
        let rows_to_travel = row_count_between(list, anchor, destination)?;
        let seconds_per_row = config.scrolling_speed.seconds_per_row();
        let duration = u32::try_from(rows_to_travel)
            .ok()
            .and_then(|rows| seconds_per_row.checked_mul(rows))
            .unwrap_or(Duration::MAX);
        let destination_offset = if config.trust_estimated_row_height {
            Destination::Estimated(estimated_offset(list, direction))
        } else {
            Destination::Measured
        };

        self.next_token += 1;
        let animation = ScrollAnimation {
            token: TimerToken(self.next_token),
            start: now,
            start_offset: list.scroll_offset(),
            destination_offset,
            duration,
            seconds_per_row,
            anchor,
            destination,
            direction,
            mode,
            rows_to_travel,
            rows_processed: 0,
            interval: config.effective_tick_interval(),
        };
        log::debug!(
            "auto-scroll {:?} from {} to {}: {} row(s) over {:?}",
            direction,
            anchor,
            destination,
            rows_to_travel,
            duration
        );
        let request = TimerRequest {
            token: animation.token,
            interval: animation.interval,
        };
        self.animation = Some(animation);
        Some(request)
    }

    pub fn tick(&mut self, sel: &mut Selector<'_>, token: TimerToken, now: Instant) -> TickOutcome {
        let Some(anim) = self.animation.as_mut() else {
            return TickOutcome::Stale;
        };
        if anim.token != token {
            return TickOutcome::Stale;
        }

        let elapsed = now.saturating_duration_since(anim.start);
        let per_row = anim.seconds_per_row.as_nanos().max(1);
        let rows_passed = usize::try_from(elapsed.as_nanos() / per_row)
            .unwrap_or(usize::MAX)
            .saturating_add(1)
            .min(anim.rows_to_travel + 1);

        if rows_passed > anim.rows_processed {
            let next = offset_row(&*sel.list, anim.anchor, anim.rows_processed, anim.direction);
            if let Some(from) = next {
                sel.apply_selection_range(
                    from,
                    rows_passed - anim.rows_processed,
                    anim.mode,
                    anim.direction,
                );
            }
            anim.rows_processed = rows_passed;
        }

        let destination_offset = anim.target_offset(&*sel.list);
        if elapsed >= anim.duration {
            let destination = anim.destination;
            sel.apply(destination, anim.mode);
            sel.list.set_scroll_offset(destination_offset);
            self.animation = None;
            log::debug!("auto-scroll reached {destination}");
            return TickOutcome::Finished(destination);
        }

        let t = progress(elapsed, anim.duration);
        let offset = anim.start_offset.interpolate(&destination_offset, t);
        sel.list.set_scroll_offset(offset);
        log::trace!("auto-scroll tick: {} row(s), offset {offset}", anim.rows_processed);
        TickOutcome::Running
    }

    /// Stops immediately, leaving selection and offset as they are.
    ///
    /// Returns the last row the run applied its mode to.
    pub fn cancel(&mut self, list: &dyn ListAdapter) -> Option<RowAddress> {
        let anim = self.animation.take()?;
        log::debug!("auto-scroll cancelled after {} row(s)", anim.rows_processed);
        anim.last_applied(list)
    }

    /// Drops any animation without inspecting the list.
    pub fn reset(&mut self) {
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScrollingSpeed;
    use scrollselect_core::{Clock, ManualClock, MemoryList};

    fn config() -> ScrollSelectConfig {
        ScrollSelectConfig::default().scrolling_speed(ScrollingSpeed::Slow)
    }

    #[test]
    fn start_refuses_empty_list() {
        let list = MemoryList::new(vec![0, 0], 44.0);
        let mut engine = AutoScrollEngine::new();
        let req = engine.start(
            &list,
            RowAddress::new(0, 0),
            Direction::Forward,
            SelectionMode::Selecting,
            &config(),
            Instant::now(),
        );
        assert_eq!(req, None);
        assert!(!engine.is_running());
    }

    #[test]
    fn duration_follows_rows_and_speed() {
        let list = MemoryList::new(vec![10, 10], 44.0);
        let mut engine = AutoScrollEngine::new();
        engine
            .start(
                &list,
                RowAddress::new(0, 5),
                Direction::Forward,
                SelectionMode::Selecting,
                &config(),
                Instant::now(),
            )
            .unwrap();
        let anim = engine.animation().unwrap();
        assert_eq!(anim.destination(), RowAddress::new(1, 9));
        // 14 steps at 100ms each
        assert_eq!(anim.duration(), Duration::from_millis(1400));
    }

    #[test]
    fn glacial_speed_saturates_instead_of_overflowing() {
        let clock = ManualClock::default();
        let mut list = MemoryList::new(vec![40], 50.0);
        let cfg = config().scrolling_speed(ScrollingSpeed::Custom(1e-18));
        let mut engine = AutoScrollEngine::new();
        let req = engine
            .start(
                &list,
                RowAddress::new(0, 5),
                Direction::Forward,
                SelectionMode::Selecting,
                &cfg,
                clock.now(),
            )
            .unwrap();
        assert_eq!(engine.animation().unwrap().duration(), Duration::MAX);

        clock.advance(Duration::from_secs(60));
        let mut sel = Selector::new(&mut list, None);
        assert_eq!(engine.tick(&mut sel, req.token, clock.now()), TickOutcome::Running);
        assert_eq!(list.selected().collect::<Vec<_>>(), vec![RowAddress::new(0, 5)]);
    }

    #[test]
    fn ticks_select_rows_as_time_passes() {
        let clock = ManualClock::default();
        let mut list = MemoryList::new(vec![20], 50.0);
        let mut engine = AutoScrollEngine::new();
        let req = engine
            .start(
                &list,
                RowAddress::new(0, 8),
                Direction::Forward,
                SelectionMode::Selecting,
                &config(),
                clock.now(),
            )
            .unwrap();

        let mut sel = Selector::new(&mut list, None);
        assert_eq!(engine.tick(&mut sel, req.token, clock.now()), TickOutcome::Running);
        clock.advance(Duration::from_millis(250));
        assert_eq!(engine.tick(&mut sel, req.token, clock.now()), TickOutcome::Running);

        // rows 8, 9, 10 passed after 250ms at 10 rows/sec
        let selected: Vec<_> = list.selected().map(|a| a.row).collect();
        assert_eq!(selected, vec![8, 9, 10]);
        // 20 rows * 50 = 1000 content, 480 viewport -> 520 end; 250ms of 1100ms
        let expected = 520.0 * (250.0 / 1100.0);
        assert!((list.scroll_offset() - expected).abs() < 0.5);
    }

    #[test]
    fn finishes_on_destination_offset_exactly() {
        let clock = ManualClock::default();
        let mut list = MemoryList::new(vec![20], 50.0);
        let mut engine = AutoScrollEngine::new();
        let req = engine
            .start(
                &list,
                RowAddress::new(0, 15),
                Direction::Forward,
                SelectionMode::Selecting,
                &config(),
                clock.now(),
            )
            .unwrap();
        clock.advance(Duration::from_secs(3));
        let mut sel = Selector::new(&mut list, None);
        assert_eq!(
            engine.tick(&mut sel, req.token, clock.now()),
            TickOutcome::Finished(RowAddress::new(0, 19))
        );
        assert_eq!(engine.tick(&mut sel, req.token, clock.now()), TickOutcome::Stale);
        assert_eq!(list.scroll_offset(), 520.0);
        assert_eq!(list.selected_count(), 5);
    }

    #[test]
    fn backward_run_deselects_toward_first_row() {
        let clock = ManualClock::default();
        let mut list = MemoryList::new(vec![3, 3], 50.0);
        for s in 0..2 {
            for r in 0..3 {
                list.select_row(RowAddress::new(s, r));
            }
        }
        list.set_scroll_offset(100.0);
        let mut engine = AutoScrollEngine::new();
        let req = engine
            .start(
                &list,
                RowAddress::new(1, 1),
                Direction::Backward,
                SelectionMode::Deselecting,
                &config(),
                clock.now(),
            )
            .unwrap();
        clock.advance(Duration::from_secs(1));
        let mut sel = Selector::new(&mut list, None);
        assert_eq!(
            engine.tick(&mut sel, req.token, clock.now()),
            TickOutcome::Finished(RowAddress::new(0, 0))
        );
        assert_eq!(list.selected().collect::<Vec<_>>(), vec![RowAddress::new(1, 2)]);
        assert_eq!(list.scroll_offset(), 0.0);
    }

    #[test]
    fn cancel_freezes_state_and_retires_token() {
        let clock = ManualClock::default();
        let mut list = MemoryList::new(vec![30], 50.0);
        let mut engine = AutoScrollEngine::new();
        let req = engine
            .start(
                &list,
                RowAddress::new(0, 10),
                Direction::Forward,
                SelectionMode::Selecting,
                &config(),
                clock.now(),
            )
            .unwrap();
        clock.advance(Duration::from_millis(120));
        {
            let mut sel = Selector::new(&mut list, None);
            assert_eq!(engine.tick(&mut sel, req.token, clock.now()), TickOutcome::Running);
        }
        let offset = list.scroll_offset();
        assert_eq!(engine.cancel(&list), Some(RowAddress::new(0, 11)));

        clock.advance(Duration::from_secs(5));
        let mut sel = Selector::new(&mut list, None);
        assert_eq!(engine.tick(&mut sel, req.token, clock.now()), TickOutcome::Stale);
        assert_eq!(list.scroll_offset(), offset);
        assert_eq!(list.selected_count(), 2);
    }

    #[test]
    fn restart_invalidates_previous_token() {
        let clock = ManualClock::default();
        let mut list = MemoryList::new(vec![30], 50.0);
        let mut engine = AutoScrollEngine::new();
        let args = (RowAddress::new(0, 10), Direction::Forward, SelectionMode::Selecting);
        let first = engine.start(&list, args.0, args.1, args.2, &config(), clock.now()).unwrap();
        let second = engine.start(&list, args.0, args.1, args.2, &config(), clock.now()).unwrap();
        assert_ne!(first.token, second.token);

        let mut sel = Selector::new(&mut list, None);
        assert_eq!(engine.tick(&mut sel, first.token, clock.now()), TickOutcome::Stale);
        assert_eq!(engine.tick(&mut sel, second.token, clock.now()), TickOutcome::Running);
    }

    #[test]
    fn measured_destination_follows_live_rects() {
        let clock = ManualClock::default();
        let mut list = MemoryList::new(vec![20], 50.0);
        let mut engine = AutoScrollEngine::new();
        let req = engine
            .start(
                &list,
                RowAddress::new(0, 18),
                Direction::Forward,
                SelectionMode::Selecting,
                &config().trust_estimated_row_height(false),
                clock.now(),
            )
            .unwrap();
        clock.advance(Duration::from_millis(500));
        let mut sel = Selector::new(&mut list, None);
        assert!(matches!(
            engine.tick(&mut sel, req.token, clock.now()),
            TickOutcome::Finished(_)
        ));
        // last row bottom (1000) minus viewport (480)
        assert_eq!(list.scroll_offset(), 520.0);
    }
}
