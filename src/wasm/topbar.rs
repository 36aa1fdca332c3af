//! DOM side of the auto-hiding topbar.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlElement, Window};

use super::dom;
use crate::{
    config::TopbarConfig,
    markup,
    topbar::{self, FrameGate, ScrollTracker, TopbarAction},
    Result,
};

pub type TopbarHandle = Rc<RefCell<TopbarDom>>;

pub struct TopbarDom {
    window: Window,
    bar: HtmlElement,
    root: Option<HtmlElement>,
    body: Option<HtmlElement>,
    menu_button: Option<Element>,
    tracker: ScrollTracker,
    gate: FrameGate,
}

impl TopbarDom {
    pub fn is_hidden(&self) -> bool {
        self.tracker.is_hidden()
    }

    /// Publishes the bar's rendered height as `--topbar-height`.
    pub fn set_height(&self) {
        let Some(root) = &self.root else {
            return;
        };
        let height = self.bar.offset_height();
        if let Err(err) = root
            .style()
            .set_property(markup::TOPBAR_HEIGHT_PROPERTY, &format!("{height}px"))
        {
            log::debug!("could not publish topbar height: {err:?}");
        }
    }

    pub fn evaluate(&mut self) {
        let current_y = self.window.scroll_y().unwrap_or(0.0);
        let menu_open = self.menu_open();
        if let Some(action) = self.tracker.evaluate(current_y, menu_open) {
            self.apply(action);
        }
    }

    pub fn show(&mut self) {
        let action = self.tracker.show();
        self.apply(action);
    }

    fn ensure_height(&mut self) {
        self.set_height();
        self.evaluate();
    }

    fn menu_open(&self) -> bool {
        let expanded = self
            .menu_button
            .as_ref()
            .and_then(|button| button.get_attribute(markup::ARIA_EXPANDED));
        topbar::menu_expanded(expanded.as_deref())
    }

    fn apply(&self, action: TopbarAction) {
        let hidden = action == TopbarAction::Hide;
        dom::set_class(&self.bar, markup::TOPBAR_HIDDEN, hidden);
        if let Some(body) = &self.body {
            dom::set_class(body, markup::BODY_TOPBAR_HIDDEN, hidden);
        }
    }
}

/// Wires the topbar if the page has one.
pub fn mount(window: &Window, document: &Document) -> Result<Option<TopbarHandle>> {
    let Some(bar) = dom::query::<HtmlElement>(document, markup::TOPBAR) else {
        return Ok(None);
    };
    let menu_button = dom::query::<Element>(document, markup::TOPBAR_MENU);
    let nav = dom::query::<Element>(document, markup::TOPBAR_NAV);
    let root = document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let tracker = ScrollTracker::new(window.scroll_y().unwrap_or(0.0), TopbarConfig::default());
    let handle = Rc::new(RefCell::new(TopbarDom {
        window: window.clone(),
        bar,
        root,
        body: document.body(),
        menu_button: menu_button.clone(),
        tracker,
        gate: FrameGate::default(),
    }));

    if let (Some(button), Some(nav)) = (menu_button, nav) {
        wire_menu(window, &handle, button, nav)?;
    }

    handle.borrow_mut().ensure_height();

    {
        let handle = handle.clone();
        dom::listen(window, "load", move |_| handle.borrow_mut().ensure_height())?;
    }
    {
        let handle = handle.clone();
        dom::listen(window, "resize", move |_| handle.borrow().set_height())?;
    }
    wire_scroll(window, &handle)?;

    Ok(Some(handle))
}

fn wire_menu(window: &Window, handle: &TopbarHandle, button: Element, nav: Element) -> Result<()> {
    let target = button.clone();
    let window = window.clone();
    let handle = handle.clone();
    dom::listen(&target, "click", move |_| {
        let expanded = !topbar::menu_expanded(button.get_attribute(markup::ARIA_EXPANDED).as_deref());
        if let Err(err) = button.set_attribute(markup::ARIA_EXPANDED, &expanded.to_string()) {
            log::debug!("could not set aria-expanded: {err:?}");
        }
        dom::set_class(&nav, markup::IS_OPEN, expanded);
        handle.borrow_mut().show();

        // Re-measure once the opened/closed nav has been laid out.
        let settle = {
            let handle = handle.clone();
            Closure::once_into_js(move || handle.borrow_mut().ensure_height())
        };
        if let Err(err) = window.request_animation_frame(settle.unchecked_ref()) {
            log::debug!("requestAnimationFrame failed: {err:?}");
        }
    })?;
    Ok(())
}

fn wire_scroll(window: &Window, handle: &TopbarHandle) -> Result<()> {
    // `frame` is reused for every queued evaluation; the gate guarantees at
    // most one is pending.
    let frame = {
        let handle = handle.clone();
        Closure::wrap(Box::new(move || {
            let mut topbar = handle.borrow_mut();
            topbar.evaluate();
            topbar.gate.release();
        }) as Box<dyn FnMut()>)
    };

    let scheduler = window.clone();
    let handle = handle.clone();
    dom::listen_passive(window, "scroll", move |_| {
        let queue = handle.borrow_mut().gate.request();
        if !queue {
            return;
        }
        if let Err(err) = scheduler.request_animation_frame(frame.as_ref().unchecked_ref()) {
            log::debug!("requestAnimationFrame failed: {err:?}");
            handle.borrow_mut().gate.release();
        }
    })?;
    Ok(())
}
