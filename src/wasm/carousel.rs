//! DOM side of the timeline video carousel.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlMediaElement, HtmlVideoElement,
    MediaQueryListEvent, UiEvent, Window,
};

use super::dom;
use crate::{
    carousel::{self, CarouselController, CarouselSurface, Orientation},
    config::CarouselConfig,
    markup, Result,
};

pub type CarouselHandle = Rc<RefCell<CarouselController<DomCarousel>>>;

/// A `<video>` in the carousel with its configured start offset.
pub struct VideoEntry {
    pub element: HtmlVideoElement,
    pub start_offset: f64,
}

impl VideoEntry {
    fn new(element: HtmlVideoElement) -> Self {
        let start_offset =
            carousel::start_offset(element.dataset().get(markup::DATA_START).as_deref());
        Self {
            element,
            start_offset,
        }
    }

    fn has_metadata(&self) -> bool {
        self.element.ready_state() >= HtmlMediaElement::HAVE_METADATA
    }
}

pub struct DomCarousel {
    window: Window,
    slider: Element,
    dots: Option<Element>,
    mute_button: Option<HtmlElement>,
    videos: Vec<VideoEntry>,
    seek_tolerance: f64,
    /// Read by syncs still waiting for `loadedmetadata`, so a later toggle
    /// wins over the state at queue time.
    muted: Rc<Cell<bool>>,
    on_advance: Option<Closure<dyn FnMut()>>,
}

impl DomCarousel {
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn video(&self, index: usize) -> Option<&HtmlVideoElement> {
        self.videos.get(index).map(|entry| &entry.element)
    }

    fn dot_buttons(&self) -> Vec<HtmlElement> {
        self.dots
            .as_ref()
            .map(|dots| dom::query_all_within(dots, markup::MEDIA_DOT))
            .unwrap_or_default()
    }
}

impl CarouselSurface for DomCarousel {
    type Timer = i32;

    fn video_count(&self) -> usize {
        self.videos.len()
    }

    fn mark_active(&mut self, index: usize) {
        for (i, entry) in self.videos.iter().enumerate() {
            dom::set_class(&entry.element, markup::IS_ACTIVE, i == index);
        }
        for (i, dot) in self.dot_buttons().iter().enumerate() {
            dom::set_class(dot, markup::IS_ACTIVE, i == index);
        }
    }

    fn sync_video(&mut self, index: usize, play: bool) {
        let Some(entry) = self.videos.get(index) else {
            return;
        };
        let video = entry.element.clone();
        let start = entry.start_offset;
        let tolerance = self.seek_tolerance;
        let muted = Rc::clone(&self.muted);
        let apply = move || {
            if let Some(target) = carousel::seek_target(video.current_time(), start, tolerance) {
                video.set_current_time(target);
            }
            if play {
                video.set_muted(muted.get());
                dom::play_quietly(&video);
            } else if let Err(err) = video.pause() {
                log::debug!("pause failed: {err:?}");
            }
        };

        if entry.has_metadata() {
            apply();
            return;
        }
        let deferred = Closure::once_into_js(apply);
        if let Err(err) = dom::listen_once_js(&entry.element, "loadedmetadata", &deferred) {
            log::debug!("could not defer video sync: {err:?}");
        }
        if play {
            entry.element.load();
        }
    }

    fn orientation(&self, index: usize) -> Option<Orientation> {
        self.videos
            .get(index)?
            .element
            .dataset()
            .get(markup::DATA_ORIENTATION)?
            .parse()
            .ok()
    }

    fn apply_orientation(&mut self, orientation: Orientation) {
        dom::set_class(
            &self.slider,
            markup::SLIDER_PORTRAIT,
            orientation == Orientation::Portrait,
        );
        dom::set_class(
            &self.slider,
            markup::SLIDER_SQUARE,
            orientation == Orientation::Square,
        );
    }

    fn apply_mute(&mut self, muted: bool) {
        self.muted.set(muted);
        for entry in &self.videos {
            entry.element.set_muted(muted);
            if !muted {
                entry.element.set_volume(1.0);
            }
        }
        let Some(button) = &self.mute_button else {
            return;
        };
        let label = if muted {
            markup::LABEL_WHEN_MUTED
        } else {
            markup::LABEL_WHEN_UNMUTED
        };
        let pressed = (!muted).to_string();
        if let Err(err) = button
            .set_attribute(markup::ARIA_PRESSED, &pressed)
            .and_then(|_| button.set_attribute(markup::ARIA_LABEL, label))
        {
            log::debug!("could not update mute button: {err:?}");
        }
    }

    fn resume_if_paused(&mut self, index: usize) {
        if let Some(entry) = self.videos.get(index) {
            if entry.element.paused() {
                dom::play_quietly(&entry.element);
            }
        }
    }

    fn blur_controls(&mut self) {
        if let Some(dots) = &self.dots {
            for button in dom::query_all_within::<HtmlElement>(dots, "button") {
                dom::blur(&button);
            }
        }
        if let Some(button) = &self.mute_button {
            dom::blur(button);
        }
    }

    fn start_timer(&mut self, interval: Duration) -> Option<i32> {
        let tick = self.on_advance.as_ref()?;
        let millis = i32::try_from(interval.as_millis()).unwrap_or(i32::MAX);
        self.window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(|err| log::warn!("could not start carousel timer: {err:?}"))
            .ok()
    }

    fn clear_timer(&mut self, timer: i32) {
        self.window.clear_interval_with_handle(timer);
    }
}

/// Wires the carousel if the page has its timeline entry, videos and slider.
pub fn mount(window: &Window, document: &Document) -> Result<Option<CarouselHandle>> {
    let Some(item) = dom::query::<HtmlElement>(document, markup::CAROUSEL_ITEM) else {
        return Ok(None);
    };
    let videos: Vec<HtmlVideoElement> = dom::query_all_within(&item, markup::MEDIA_ITEM);
    let Some(slider) = dom::query_within::<Element>(&item, markup::MEDIA_SLIDER) else {
        return Ok(None);
    };
    let dots = dom::query_within::<Element>(&item, markup::MEDIA_DOTS);
    let mute_button = dom::query_within::<HtmlElement>(&slider, markup::MUTE_BUTTON);

    let dataset = item.dataset();
    let config = CarouselConfig::default().with_overrides(|key| dataset.get(key));
    log::debug!("carousel config: {config:?}");

    let surface = DomCarousel {
        window: window.clone(),
        slider,
        dots: dots.clone(),
        mute_button: mute_button.clone(),
        videos: videos.into_iter().map(VideoEntry::new).collect(),
        seek_tolerance: config.seek_tolerance,
        muted: Rc::new(Cell::new(true)),
        on_advance: None,
    };
    let Some(controller) = CarouselController::new(surface, config) else {
        return Ok(None);
    };
    let handle = Rc::new(RefCell::new(controller));

    install_advance(&handle);
    watch_orientation(&handle)?;
    if let Some(dots) = dots {
        build_dots(document, &handle, &dots)?;
    }
    if let Some(button) = mute_button {
        wire_mute(&handle, button)?;
    }

    handle.borrow_mut().initialize();

    {
        let handle = handle.clone();
        dom::listen(&item, "mouseenter", move |_| handle.borrow_mut().pointer_enter())?;
    }
    {
        let handle = handle.clone();
        dom::listen(&item, "mouseleave", move |_| handle.borrow_mut().pointer_leave())?;
    }
    watch_viewport(window, &handle)?;

    Ok(Some(handle))
}

fn install_advance(handle: &CarouselHandle) {
    let weak = Rc::downgrade(handle);
    let tick = Closure::wrap(Box::new(move || {
        let Some(handle) = weak.upgrade() else {
            return;
        };
        let Ok(mut controller) = handle.try_borrow_mut() else {
            log::debug!("carousel busy, skipping tick");
            return;
        };
        controller.advance();
    }) as Box<dyn FnMut()>);
    handle.borrow_mut().surface_mut().on_advance = Some(tick);
}

/// Records each video's orientation once its dimensions are known.
fn watch_orientation(handle: &CarouselHandle) -> Result<()> {
    let videos: Vec<HtmlVideoElement> = handle
        .borrow()
        .surface()
        .videos
        .iter()
        .map(|entry| entry.element.clone())
        .collect();

    for (index, video) in videos.into_iter().enumerate() {
        let ready = video.ready_state() >= HtmlMediaElement::HAVE_METADATA;
        let target = video.clone();
        let weak = Rc::downgrade(handle);
        let detect = move || {
            let Some(orientation) =
                Orientation::from_dimensions(video.video_width(), video.video_height())
            else {
                return;
            };
            if let Err(err) = video
                .dataset()
                .set(markup::DATA_ORIENTATION, orientation.as_str())
            {
                log::debug!("could not record orientation: {err:?}");
            }
            let Some(handle) = weak.upgrade() else {
                return;
            };
            let Ok(mut controller) = handle.try_borrow_mut() else {
                return;
            };
            if controller.current_index() == index {
                controller.refresh_orientation();
            }
        };

        if ready {
            detect();
        } else {
            let deferred = Closure::once_into_js(detect);
            dom::listen_once_js(&target, "loadedmetadata", &deferred)?;
        }
    }
    Ok(())
}

fn build_dots(document: &Document, handle: &CarouselHandle, container: &Element) -> Result<()> {
    container.set_inner_html("");
    let count = handle.borrow().surface().len();
    for index in 0..count {
        let dot: HtmlElement = document.create_element("button")?.unchecked_into();
        dot.set_attribute("type", "button")?;
        let class = if index == 0 {
            format!("{} {}", markup::DOT_CLASS, markup::IS_ACTIVE)
        } else {
            markup::DOT_CLASS.to_owned()
        };
        dot.set_class_name(&class);
        dot.set_attribute(markup::ARIA_LABEL, &markup::dot_label(index))?;

        let handle = handle.clone();
        let button = dot.clone();
        dom::listen(&dot, "click", move |event| {
            handle.borrow_mut().select(index);
            blur_after_pointer(&event, &button);
        })?;
        container.append_child(&dot)?;
    }
    Ok(())
}

fn wire_mute(handle: &CarouselHandle, button: HtmlElement) -> Result<()> {
    let handle = handle.clone();
    let target = button.clone();
    dom::listen(&target, "click", move |event| {
        handle.borrow_mut().toggle_mute();
        blur_after_pointer(&event, &button);
    })?;
    Ok(())
}

/// Drops focus after mouse clicks; keyboard activation (`detail == 0`)
/// keeps it.
fn blur_after_pointer(event: &Event, el: &HtmlElement) {
    let from_pointer = event
        .dyn_ref::<UiEvent>()
        .is_some_and(|ui| ui.detail() != 0);
    if from_pointer {
        dom::blur(el);
    }
}

fn watch_viewport(window: &Window, handle: &CarouselHandle) -> Result<()> {
    let query = handle.borrow().config().narrow_viewport_query.clone();
    let Some(list) = window.match_media(&query)? else {
        log::debug!("matchMedia returned nothing for {query}");
        return Ok(());
    };
    handle.borrow_mut().sync_viewport(list.matches());

    let on_change = {
        let handle = handle.clone();
        let list = list.clone();
        // Legacy `addListener` passes the list itself rather than an event.
        Closure::wrap(Box::new(move |event: Event| {
            let narrow = event
                .dyn_ref::<MediaQueryListEvent>()
                .map_or_else(|| list.matches(), MediaQueryListEvent::matches);
            handle.borrow_mut().sync_viewport(narrow);
        }) as Box<dyn FnMut(Event)>)
    };
    if list
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .is_err()
    {
        list.add_listener_with_opt_callback(Some(on_change.as_ref().unchecked_ref()))?;
    }
    on_change.forget();
    Ok(())
}
