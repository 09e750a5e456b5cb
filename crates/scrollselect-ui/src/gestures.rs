use scrollselect_core::input::*;
use scrollselect_core::{Rect, Vec2};
use smallvec::SmallVec;
use web_time::{Duration, Instant};

/// What a pointer stream on the touch strip amounts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Tap(Vec2),
    PanBegan(Vec2),
    PanMoved(Vec2),
    PanEnded(Vec2),
    PanCancelled,
}

pub type Gestures = SmallVec<[Gesture; 2]>;

/// Splits one pointer's Down/Move/Up stream into taps and pans.
///
/// Only a Down inside the strip starts tracking, and only that pointer is
/// followed until it lifts or is cancelled; once a pan has begun the finger
/// may leave the strip.
pub struct GestureDetector {
    tap_slop: f32,
    tap_timeout: Duration,

    // Internal state
    pointer: Option<PointerId>,
    press_start: Option<(Instant, Vec2)>,
    panning: bool,
}

impl GestureDetector {
    pub fn new(tap_slop: f32, tap_timeout: Duration) -> Self {
        Self {
            tap_slop,
            tap_timeout,
            pointer: None,
            press_start: None,
            panning: false,
        }
    }

    pub fn set_tap_tolerance(&mut self, slop: f32, timeout: Duration) {
        self.tap_slop = slop;
        self.tap_timeout = timeout;
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Forget the tracked pointer without reporting anything.
    pub fn reset(&mut self) {
        self.pointer = None;
        self.press_start = None;
        self.panning = false;
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent, strip: Rect, now: Instant) -> Gestures {
        let mut out = Gestures::new();
        match event.event {
            PointerEventKind::Down => {
                if self.pointer.is_some() || !strip.contains(event.position) {
                    return out;
                }
                self.pointer = Some(event.id);
                self.press_start = Some((now, event.position));
                self.panning = false;
            }
            _ if self.pointer != Some(event.id) => {}
            PointerEventKind::Move => {
                if self.panning {
                    out.push(Gesture::PanMoved(event.position));
                } else if let Some((_, start)) = self.press_start {
                    if start.distance(event.position) >= self.tap_slop {
                        self.panning = true;
                        out.push(Gesture::PanBegan(start));
                        out.push(Gesture::PanMoved(event.position));
                    }
                }
            }
            PointerEventKind::Up => {
                if self.panning {
                    out.push(Gesture::PanEnded(event.position));
                } else if let Some((start_time, start)) = self.press_start {
                    let quick = now.saturating_duration_since(start_time) <= self.tap_timeout;
                    if quick && start.distance(event.position) < self.tap_slop {
                        out.push(Gesture::Tap(start));
                    }
                }
                self.reset();
            }
            PointerEventKind::Cancel => {
                if self.panning {
                    out.push(Gesture::PanCancelled);
                }
                self.reset();
            }
        }
        out
    }
}
