//! Video carousel state machine.
//!
//! [`CarouselController`] owns the index/mute/timer state and decides what
//! should happen; a [`CarouselSurface`] performs it. The browser surface
//! lives in `wasm::carousel`, tests use an in-memory one.

use std::{fmt, str::FromStr, time::Duration};

use thiserror::Error;

use crate::config::CarouselConfig;

/// Aspect classification of a video, used for slider layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    /// Classifies intrinsic dimensions; `None` while they are unknown.
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(match width.cmp(&height) {
            std::cmp::Ordering::Equal => Orientation::Square,
            std::cmp::Ordering::Greater => Orientation::Landscape,
            std::cmp::Ordering::Less => Orientation::Portrait,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Square => "square",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown orientation {0:?}")]
pub struct UnknownOrientation(pub String);

impl FromStr for Orientation {
    type Err = UnknownOrientation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landscape" => Ok(Orientation::Landscape),
            "portrait" => Ok(Orientation::Portrait),
            "square" => Ok(Orientation::Square),
            other => Err(UnknownOrientation(other.to_owned())),
        }
    }
}

/// Start offset in seconds from a `data-start` value.
///
/// Accepts decimal and `0x`/`0o`/`0b` integer literals, as the browser's
/// `Number()` does. Anything that is not a finite positive number means
/// "from the start".
pub fn start_offset(raw: Option<&str>) -> f64 {
    let value = match raw.map(str::trim) {
        None | Some("") => 0.0,
        Some(s) => parse_number(s).unwrap_or(0.0),
    };
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return s.parse::<f64>().ok(),
    };
    u64::from_str_radix(&s[2..], radix).ok().map(|n| n as f64)
}

/// Position to seek to, or `None` when already within `tolerance` of it.
pub fn seek_target(current_time: f64, start: f64, tolerance: f64) -> Option<f64> {
    ((current_time - start).abs() > tolerance).then_some(start)
}

/// Effects the controller needs from its host.
///
/// Implementations swallow environmental failures (rejected autoplay, seek
/// errors) themselves.
pub trait CarouselSurface {
    /// Handle of a live recurring timer.
    type Timer;

    fn video_count(&self) -> usize;

    /// Marks video `index` and its dot active and every other one inactive.
    fn mark_active(&mut self, index: usize);

    /// Rewinds video `index` to its start offset once metadata is known,
    /// then plays or pauses it. A video that starts playing takes the mute
    /// state last passed to [`apply_mute`](Self::apply_mute) at that moment.
    fn sync_video(&mut self, index: usize, play: bool);

    /// Orientation detected for video `index`, if known yet.
    fn orientation(&self, index: usize) -> Option<Orientation>;

    fn apply_orientation(&mut self, orientation: Orientation);

    /// Applies the mute flag to every video and to the toggle button.
    fn apply_mute(&mut self, muted: bool);

    fn resume_if_paused(&mut self, index: usize);

    fn blur_controls(&mut self);

    fn start_timer(&mut self, interval: Duration) -> Option<Self::Timer>;

    fn clear_timer(&mut self, timer: Self::Timer);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    pub current_index: usize,
    pub is_muted: bool,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            current_index: 0,
            is_muted: true,
        }
    }
}

pub struct CarouselController<S: CarouselSurface> {
    surface: S,
    config: CarouselConfig,
    state: CarouselState,
    timer: Option<S::Timer>,
}

impl<S: CarouselSurface> fmt::Debug for CarouselController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselController")
            .field("videos", &self.surface.video_count())
            .field("state", &self.state)
            .field("timer_live", &self.timer.is_some())
            .finish()
    }
}

impl<S: CarouselSurface> CarouselController<S> {
    /// Returns `None` when the surface has no videos to cycle.
    pub fn new(surface: S, config: CarouselConfig) -> Option<Self> {
        if surface.video_count() == 0 {
            return None;
        }
        Some(Self {
            surface,
            config,
            state: CarouselState::default(),
            timer: None,
        })
    }

    /// Applies the initial mute state and shows the first video, paused.
    pub fn initialize(&mut self) {
        self.surface.apply_mute(self.state.is_muted);
        self.set_active(0, false);
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_muted(&self) -> bool {
        self.state.is_muted
    }

    pub fn is_cycling(&self) -> bool {
        self.timer.is_some()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn set_active(&mut self, index: usize, should_play: bool) {
        let count = self.surface.video_count();
        if index >= count {
            log::warn!("ignoring carousel index {index} (have {count} videos)");
            return;
        }
        self.state.current_index = index;
        self.surface.mark_active(index);
        for i in 0..count {
            self.surface.sync_video(i, i == index && should_play);
        }
        self.refresh_orientation();
    }

    /// Re-applies slider layout for the active video.
    pub fn refresh_orientation(&mut self) {
        let orientation = self
            .surface
            .orientation(self.state.current_index)
            .unwrap_or_default();
        self.surface.apply_orientation(orientation);
    }

    /// Timer tick: moves to the next video, wrapping around.
    pub fn advance(&mut self) {
        let count = self.surface.video_count();
        let next = (self.state.current_index + 1) % count;
        log::debug!("carousel advancing to video {next}");
        self.set_active(next, true);
    }

    pub fn start(&mut self) {
        if self.timer.is_some() || self.surface.video_count() <= 1 {
            return;
        }
        self.timer = self.surface.start_timer(self.config.advance_interval);
    }

    pub fn restart(&mut self) {
        self.clear_timer();
        self.start();
    }

    /// Stops cycling and parks on the first video, paused.
    pub fn stop(&mut self) {
        self.clear_timer();
        self.set_active(0, false);
    }

    fn clear_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.surface.clear_timer(timer);
        }
    }

    pub fn select(&mut self, index: usize) {
        self.set_active(index, true);
        self.restart();
    }

    pub fn toggle_mute(&mut self) {
        self.state.is_muted = !self.state.is_muted;
        self.surface.apply_mute(self.state.is_muted);
        if !self.state.is_muted {
            self.surface.resume_if_paused(self.state.current_index);
        }
    }

    pub fn pointer_enter(&mut self) {
        self.set_active(self.state.current_index, true);
        self.start();
    }

    pub fn pointer_leave(&mut self) {
        self.stop();
        self.surface.blur_controls();
    }

    /// Narrow viewports cannot hover, so they behave as permanently entered.
    pub fn sync_viewport(&mut self, narrow: bool) {
        if narrow {
            self.pointer_enter();
        } else {
            self.pointer_leave();
        }
    }
}
