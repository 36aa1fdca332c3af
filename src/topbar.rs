//! Scroll-direction logic behind the auto-hiding topbar.

use crate::config::TopbarConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopbarAction {
    Show,
    Hide,
}

/// Two-sided hysteresis over the vertical scroll offset.
///
/// Small jitter in either direction never changes visibility; only a move
/// larger than the threshold does, and the bar never hides above the
/// minimum depth.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    config: TopbarConfig,
    last_scroll_y: f64,
    hidden: bool,
}

impl ScrollTracker {
    pub fn new(initial_scroll_y: f64, config: TopbarConfig) -> Self {
        Self {
            config,
            last_scroll_y: initial_scroll_y,
            hidden: false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y
    }

    /// Feeds the current offset and returns the visibility change to apply,
    /// if any.
    pub fn evaluate(&mut self, current_y: f64, menu_open: bool) -> Option<TopbarAction> {
        let TopbarConfig {
            scroll_threshold,
            min_scroll_depth,
        } = self.config;
        let last = self.last_scroll_y;
        self.last_scroll_y = current_y;

        if current_y <= 0.0 || menu_open {
            return Some(self.show());
        }

        if current_y > last + scroll_threshold && current_y > min_scroll_depth {
            if !self.hidden {
                return Some(self.hide());
            }
        } else if last - current_y > scroll_threshold
            && (self.hidden || current_y < min_scroll_depth)
        {
            return Some(self.show());
        }
        None
    }

    /// Unconditionally marks the bar visible.
    pub fn show(&mut self) -> TopbarAction {
        self.hidden = false;
        TopbarAction::Show
    }

    fn hide(&mut self) -> TopbarAction {
        self.hidden = true;
        TopbarAction::Hide
    }
}

/// Allows at most one queued evaluation per animation frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    ticking: bool,
}

impl FrameGate {
    /// Returns true when the caller should queue a frame callback.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// Called from the frame callback once the evaluation ran.
    pub fn release(&mut self) {
        self.ticking = false;
    }
}

/// Menu state as encoded in the button's `aria-expanded` attribute.
pub fn menu_expanded(aria_expanded: Option<&str>) -> bool {
    aria_expanded == Some("true")
}
