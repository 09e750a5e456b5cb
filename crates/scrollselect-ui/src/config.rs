use thiserror::Error;
use web_time::Duration;

/// How fast auto-scroll walks rows once the drag reaches an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ScrollingSpeed {
    Fast,
    #[default]
    Moderate,
    Slow,
    /// Rows per second.
    Custom(f32),
}

impl ScrollingSpeed {
    pub fn rows_per_second(&self) -> f32 {
        match self {
            ScrollingSpeed::Fast => 40.0,
            ScrollingSpeed::Moderate => 20.0,
            ScrollingSpeed::Slow => 10.0,
            ScrollingSpeed::Custom(rate) => *rate,
        }
    }

    /// Time to pass one row. An unusable custom rate falls back to `Moderate`.
    pub fn seconds_per_row(&self) -> Duration {
        row_duration(self.rows_per_second()).unwrap_or(MODERATE_ROW)
    }
}

const MODERATE_ROW: Duration = Duration::from_millis(50);

/// `None` unless `rate` is positive, finite and slow enough that one row
/// still fits in a `Duration`.
fn row_duration(rate: f32) -> Option<Duration> {
    if !rate.is_finite() || rate <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / rate as f64).ok()
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("scrolling speed must be a positive, finite row rate (got {0})")]
    InvalidScrollingSpeed(f32),
    #[error("touch strip width must be finite and non-negative (got {0})")]
    InvalidTouchStripWidth(f32),
    #[error("{name} must be finite (got {value})")]
    InvalidThreshold { name: &'static str, value: f32 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ScrollSelectConfig {
    /// Width of the touch strip along the trailing edge of the container.
    pub touch_strip_width: f32,
    pub scrolling_speed: ScrollingSpeed,
    /// Distance below the container top that counts as the top edge. `>= 0`.
    pub top_edge_threshold: f32,
    /// Offset from the container bottom that counts as the bottom edge.
    /// Must be `<= 0`, otherwise auto-scroll never triggers downward.
    pub bottom_edge_threshold: f32,
    /// Compute the auto-scroll destination once from the content size
    /// instead of re-measuring it on every tick.
    pub trust_estimated_row_height: bool,
    /// Vertical moves shorter than this are jitter and ignored.
    pub noise_threshold: f32,
    /// Upper bound on the auto-scroll tick interval.
    pub tick_interval: Duration,
    pub tap_slop: f32,
    pub tap_timeout: Duration,
}

impl Default for ScrollSelectConfig {
    fn default() -> Self {
        Self {
            touch_strip_width: 60.0,
            scrolling_speed: ScrollingSpeed::Moderate,
            top_edge_threshold: 40.0,
            bottom_edge_threshold: -40.0,
            trust_estimated_row_height: true,
            noise_threshold: 5.0,
            tick_interval: Duration::from_millis(1),
            tap_slop: 10.0,
            tap_timeout: Duration::from_millis(200),
        }
    }
}

impl ScrollSelectConfig {
    pub fn scrolling_speed(mut self, speed: ScrollingSpeed) -> Self {
        self.scrolling_speed = speed;
        self
    }

    pub fn touch_strip_width(mut self, width: f32) -> Self {
        self.touch_strip_width = width;
        self
    }

    pub fn edge_thresholds(mut self, top: f32, bottom: f32) -> Self {
        self.top_edge_threshold = top;
        self.bottom_edge_threshold = bottom;
        self
    }

    pub fn trust_estimated_row_height(mut self, trust: bool) -> Self {
        self.trust_estimated_row_height = trust;
        self
    }

    /// Tick interval actually used: never coarser than a twentieth of a row.
    pub fn effective_tick_interval(&self) -> Duration {
        let row_fraction = self.scrolling_speed.seconds_per_row() / 20;
        self.tick_interval.min(row_fraction).max(Duration::from_micros(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ScrollingSpeed::Custom(rate) = self.scrolling_speed
            && row_duration(rate).is_none()
        {
            return Err(ConfigError::InvalidScrollingSpeed(rate));
        }
        if !self.touch_strip_width.is_finite() || self.touch_strip_width < 0.0 {
            return Err(ConfigError::InvalidTouchStripWidth(self.touch_strip_width));
        }
        for (name, value) in [
            ("top_edge_threshold", self.top_edge_threshold),
            ("bottom_edge_threshold", self.bottom_edge_threshold),
            ("noise_threshold", self.noise_threshold),
            ("tap_slop", self.tap_slop),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if self.top_edge_threshold < 0.0 {
            log::warn!(
                "top_edge_threshold {} is negative; upward auto-scroll will never trigger",
                self.top_edge_threshold
            );
        }
        if self.bottom_edge_threshold > 0.0 {
            log::warn!(
                "bottom_edge_threshold {} is positive; downward auto-scroll will never trigger",
                self.bottom_edge_threshold
            );
        }
        Ok(())
    }
}
