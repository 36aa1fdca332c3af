//! Page glue for the portfolio site: the auto-hiding topbar and the video
//! carousel of the Arduino timeline entry.
//!
//! Decision logic is plain Rust and builds on any target; DOM bindings are
//! compiled only for wasm32.

pub mod carousel;
pub mod config;
pub mod error;
pub mod markup;
pub mod topbar;

pub use error::{GlueError, Result};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
