//! Tunables for both units, with the defaults the page ships with.

use std::time::Duration;

use crate::markup;

/// Minimum scroll delta (px) that counts as a deliberate scroll.
pub const SCROLL_THRESHOLD_PX: f64 = 12.0;
/// The bar never hides above this offset (px).
pub const MIN_SCROLL_DEPTH_PX: f64 = 80.0;
pub const ADVANCE_INTERVAL_MS: u64 = 21_600;
/// Seeks closer than this (seconds) to the current position are skipped.
pub const SEEK_TOLERANCE_SECS: f64 = 0.25;
pub const NARROW_VIEWPORT_QUERY: &str = "(max-width: 860px)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopbarConfig {
    pub scroll_threshold: f64,
    pub min_scroll_depth: f64,
}

impl Default for TopbarConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: SCROLL_THRESHOLD_PX,
            min_scroll_depth: MIN_SCROLL_DEPTH_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub advance_interval: Duration,
    pub seek_tolerance: f64,
    /// Viewports matching this query cannot hover and cycle unconditionally.
    pub narrow_viewport_query: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            advance_interval: Duration::from_millis(ADVANCE_INTERVAL_MS),
            seek_tolerance: SEEK_TOLERANCE_SECS,
            narrow_viewport_query: NARROW_VIEWPORT_QUERY.to_owned(),
        }
    }
}

impl CarouselConfig {
    /// Applies per-page overrides looked up by `dataset` key.
    ///
    /// Unparseable values are logged and the default is kept.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(markup::DATA_ADVANCE_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.advance_interval = Duration::from_millis(ms),
                _ => log::warn!("ignoring invalid data-advance-ms {raw:?}"),
            }
        }
        if let Some(raw) = lookup(markup::DATA_SEEK_TOLERANCE) {
            match raw.trim().parse::<f64>() {
                Ok(secs) if secs.is_finite() && secs >= 0.0 => self.seek_tolerance = secs,
                _ => log::warn!("ignoring invalid data-seek-tolerance {raw:?}"),
            }
        }
        if let Some(raw) = lookup(markup::DATA_NARROW_QUERY) {
            let query = raw.trim();
            if query.is_empty() {
                log::warn!("ignoring empty data-narrow-query");
            } else {
                self.narrow_viewport_query = query.to_owned();
            }
        }
        self
    }
}

/// Reads `log=<level>` from a `location.search` string.
pub fn log_level_from_query(search: &str) -> log::Level {
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == "log").then(|| value.parse::<log::Level>().ok())?
        })
        .unwrap_or(log::Level::Info)
}
