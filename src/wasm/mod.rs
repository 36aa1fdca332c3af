use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::{config, GlueError};

pub mod carousel;
mod dom;
pub mod footer;
pub mod topbar;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or(GlueError::NoWindow)?;
    let search = window.location().search().unwrap_or_default();
    console_log::init_with_level(config::log_level_from_query(&search)).ok();

    let document = window.document().ok_or(GlueError::NoDocument)?;
    if document.ready_state() == "loading" {
        let boot_later = {
            let window = window.clone();
            let document = document.clone();
            Closure::once_into_js(move || boot(&window, &document))
        };
        dom::listen_once_js(&document, "DOMContentLoaded", &boot_later)?;
    } else {
        boot(&window, &document);
    }
    Ok(())
}

/// Wires every unit whose markup is present; a failing unit never blocks
/// the others.
pub fn boot(window: &Window, document: &Document) {
    footer::stamp_year(document);

    match topbar::mount(window, document) {
        Ok(Some(_)) => log::info!("topbar wired"),
        Ok(None) => log::debug!("no topbar on this page"),
        Err(err) => log::warn!("topbar not wired: {err}"),
    }

    match carousel::mount(window, document) {
        Ok(Some(handle)) => log::info!(
            "carousel wired with {} videos",
            handle.borrow().surface().len()
        ),
        Ok(None) => log::debug!("no carousel on this page"),
        Err(err) => log::warn!("carousel not wired: {err}"),
    }
}
