use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures that can stop a unit from being wired up.
///
/// Missing markup is not an error: mount functions report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum GlueError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, GlueError>;

impl From<JsValue> for GlueError {
    fn from(value: JsValue) -> Self {
        GlueError::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<GlueError> for JsValue {
    fn from(err: GlueError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
