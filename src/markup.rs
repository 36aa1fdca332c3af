//! Names shared with the page markup and stylesheet.

// Consumed selectors.
pub const TOPBAR: &str = ".topbar";
pub const TOPBAR_NAV: &str = ".topbar__nav";
pub const TOPBAR_MENU: &str = ".topbar__menu";
pub const YEAR: &str = "#year";
pub const CAROUSEL_ITEM: &str = ".timeline__item--arduino";
pub const MEDIA_ITEM: &str = ".timeline__media-item";
pub const MEDIA_SLIDER: &str = ".timeline__media-slider";
pub const MEDIA_DOTS: &str = ".timeline__media-dots";
pub const MEDIA_DOT: &str = ".timeline__media-dot";
pub const MUTE_BUTTON: &str = ".timeline__mute";

// Produced classes.
pub const TOPBAR_HIDDEN: &str = "topbar--hidden";
pub const BODY_TOPBAR_HIDDEN: &str = "topbar-hidden";
pub const IS_OPEN: &str = "is-open";
pub const IS_ACTIVE: &str = "is-active";
pub const DOT_CLASS: &str = "timeline__media-dot";
pub const SLIDER_PORTRAIT: &str = "timeline__media-slider--portrait";
pub const SLIDER_SQUARE: &str = "timeline__media-slider--square";

pub const TOPBAR_HEIGHT_PROPERTY: &str = "--topbar-height";

// Attributes.
pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_PRESSED: &str = "aria-pressed";
pub const ARIA_LABEL: &str = "aria-label";

// `dataset` keys (camelCase, as the DOM exposes them).
pub const DATA_START: &str = "start";
pub const DATA_ORIENTATION: &str = "orientation";
pub const DATA_ADVANCE_MS: &str = "advanceMs";
pub const DATA_SEEK_TOLERANCE: &str = "seekTolerance";
pub const DATA_NARROW_QUERY: &str = "narrowQuery";

pub const LABEL_WHEN_MUTED: &str = "Unmute audio";
pub const LABEL_WHEN_UNMUTED: &str = "Mute audio";

/// Accessible label of the `n`th dot, counting from zero.
pub fn dot_label(index: usize) -> String {
    format!("Show Arduino video {}", index + 1)
}
