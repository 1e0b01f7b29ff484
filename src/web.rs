//! Browser host: mounts the exploded view into a page element.
//!
//! [`mount`] appends a canvas and a label layer to the container, listens
//! to the window's `scroll` and `resize` events and drives the engine from
//! `requestAnimationFrame`. The GPU surface is created asynchronously; until
//! it arrives frames are computed but not drawn. Labels are positioned
//! `div`s (class `atelier-label`) that pages can style.
//!
//! Everything is torn down when the returned [`WebMount`] is dropped or
//! [`WebMount::unmount`] is called, including when mounting fails partway.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlCanvasElement, HtmlElement, Window,
};
use web_time::Instant;

use crate::{
    error::AtelierError,
    options::Options,
    overlay::{self, LabelAnnotation, LayerState, LAYERS},
    renderer::Renderer,
    schedule::{FrameLoop, FrameOutcome, Liveness},
    scroll::{ScrollSample, TrackingMode},
    ExplodedViewEngine,
};

type EventClosure = Closure<dyn FnMut(web_sys::Event)>;
type FrameClosure = Closure<dyn FnMut(f64)>;

fn js_error(err: &AtelierError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn unavailable(what: &str) -> JsValue {
    js_error(&AtelierError::MountUnavailable(what.to_owned()))
}

// ── Page geometry ────────────────────────────────────────────────────────

/// Read the scroll geometry the active tracking mode needs.
fn scroll_sample(
    mode: TrackingMode,
    window: &Window,
    document: &Document,
    container: &Element,
) -> ScrollSample {
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    match mode {
        TrackingMode::FullPage => {
            let scroll_top = window.scroll_y().unwrap_or(0.0) as f32;
            let document_height = document
                .document_element()
                .map_or(0, |root| root.scroll_height());
            ScrollSample::page(scroll_top, viewport_height, document_height as f32)
        }
        TrackingMode::Windowed => {
            let rect = container.get_bounding_client_rect();
            ScrollSample::element(
                rect.top() as f32,
                rect.height() as f32,
                viewport_height,
            )
        }
    }
}

/// Logical container size, falling back to the window when the container
/// has no layout yet.
fn container_size(window: &Window, container: &Element) -> (u32, u32) {
    let width = container.client_width();
    let height = container.client_height();
    if width > 0 && height > 0 {
        return (width as u32, height as u32);
    }
    let fallback = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (fallback(window.inner_width()), fallback(window.inner_height()))
}

fn sync_canvas(canvas: &HtmlCanvasElement, engine: &ExplodedViewEngine) {
    let size = engine.surface_size();
    canvas.set_width(size.width);
    canvas.set_height(size.height);
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

fn passive() -> AddEventListenerOptions {
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    options
}

// ── Labels ───────────────────────────────────────────────────────────────

/// Label elements laid over the canvas, one per annotation.
struct DomLabels {
    document: Document,
    root: HtmlElement,
    items: Vec<HtmlElement>,
    last: Vec<LabelAnnotation>,
}

impl DomLabels {
    fn new(document: &Document) -> Result<Self, JsValue> {
        let root: HtmlElement = document
            .create_element("div")?
            .dyn_into()
            .map_err(|_| unavailable("label layer"))?;
        root.set_class_name("atelier-labels");
        set_styles(
            &root,
            &[
                ("position", "absolute"),
                ("inset", "0"),
                ("pointer-events", "none"),
                ("overflow", "hidden"),
            ],
        )?;
        Ok(Self {
            document: document.clone(),
            root,
            items: Vec::new(),
            last: Vec::new(),
        })
    }

    fn item(&self, text: &str) -> Result<HtmlElement, JsValue> {
        let item: HtmlElement = self
            .document
            .create_element("div")?
            .dyn_into()
            .map_err(|_| unavailable("label"))?;
        item.set_class_name("atelier-label");
        item.set_text_content(Some(text));
        set_styles(
            &item,
            &[
                ("position", "absolute"),
                ("white-space", "nowrap"),
                ("transform", "translate(-50%, -50%)"),
                ("display", "none"),
            ],
        )?;
        let _ = self.root.append_child(&item)?;
        Ok(item)
    }

    /// Move, show and hide label elements to match `labels`.
    fn show(&mut self, labels: Vec<LabelAnnotation>) -> Result<(), JsValue> {
        while self.items.len() < labels.len() {
            let item = self.item(labels[self.items.len()].text)?;
            self.items.push(item);
        }
        for (i, item) in self.items.iter().enumerate() {
            let style = item.style();
            let Some(label) = labels.get(i) else {
                style.set_property("display", "none")?;
                continue;
            };
            if item.text_content().as_deref() != Some(label.text) {
                item.set_text_content(Some(label.text));
            }
            match label.placement() {
                Some(at) => {
                    style.set_property("left", &format!("{}px", at.x))?;
                    style.set_property("top", &format!("{}px", at.y))?;
                    style.set_property("display", "block")?;
                }
                None => style.set_property("display", "none")?,
            }
        }
        self.last = labels;
        Ok(())
    }
}

// ── Mount ────────────────────────────────────────────────────────────────

/// A live exploded view inside a page element.
///
/// Holds the canvas, the label layer, the event listeners and the
/// animation-frame callback; dropping it removes them, cancels the frame
/// loop and releases the GPU surface.
#[wasm_bindgen]
pub struct WebMount {
    engine: Rc<RefCell<ExplodedViewEngine>>,
    liveness: Liveness,
    window: Window,
    canvas: HtmlCanvasElement,
    labels: Rc<RefCell<DomLabels>>,
    positioned: Option<HtmlElement>,
    on_scroll: Option<EventClosure>,
    on_resize: Option<EventClosure>,
    frame: Rc<RefCell<Option<FrameClosure>>>,
    frame_handle: Rc<Cell<Option<i32>>>,
}

#[wasm_bindgen]
impl WebMount {
    /// Last published scroll progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.engine.borrow().progress().value()
    }

    /// Drive progress directly, bypassing page scroll.
    pub fn set_progress(&self, value: f32) -> f32 {
        self.engine.borrow_mut().set_progress(value).value()
    }

    /// Whether the view is still running.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Labels of the last drawn frame as a JSON array of
    /// `{text, x, y, visible}`.
    #[must_use]
    pub fn labels_json(&self) -> String {
        let labels = self.labels.borrow();
        serde_json::Value::Array(labels.last.iter().map(LabelAnnotation::to_json).collect())
            .to_string()
    }

    /// Layer indicator state as a JSON array of
    /// `{icon, name, description, active, current}`.
    #[must_use]
    pub fn layers_json(&self) -> String {
        let progress = self.engine.borrow().progress();
        let states = overlay::layer_states(&LAYERS, progress);
        serde_json::Value::Array(states.iter().map(LayerState::to_json).collect())
            .to_string()
    }

    /// Width of the progress bar in percent.
    #[must_use]
    pub fn progress_bar_percent(&self) -> f32 {
        overlay::progress_bar_percent(self.engine.borrow().progress())
    }

    /// Tear everything down. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        // Breaks the callback's reference to itself.
        drop(self.frame.borrow_mut().take());

        if let Some(cb) = self.on_scroll.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        }

        if self.liveness.is_alive() {
            self.engine.borrow_mut().unmount();
            self.canvas.remove();
            self.labels.borrow().root.remove();
            if let Some(container) = self.positioned.take() {
                let _ = container.style().remove_property("position");
            }
            log::info!("exploded view unmounted");
        }
    }
}

impl Drop for WebMount {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl WebMount {
    /// Put the canvas and label layer into `container`.
    fn attach_to(&mut self, container: &Element) -> Result<(), JsValue> {
        set_styles(
            &self.canvas,
            &[("display", "block"), ("width", "100%"), ("height", "100%")],
        )?;
        if let Some(host) = container.dyn_ref::<HtmlElement>() {
            let style = host.style();
            if style.get_property_value("position")?.is_empty() {
                style.set_property("position", "relative")?;
                self.positioned = Some(host.clone());
            }
        }
        let _ = container.append_child(&self.canvas)?;
        let _ = container.append_child(&self.labels.borrow().root)?;
        sync_canvas(&self.canvas, &self.engine.borrow());
        Ok(())
    }

    /// Register the `scroll` and `resize` listeners.
    fn listen(&mut self, document: &Document, container: &Element) -> Result<(), JsValue> {
        let on_scroll = {
            let engine = Rc::clone(&self.engine);
            let window = self.window.clone();
            let document = document.clone();
            let container = container.clone();
            self.on_scroll.insert(EventClosure::new(move |_: web_sys::Event| {
                let mut engine = engine.borrow_mut();
                let mode = engine.options().scroll.mode;
                let sample = scroll_sample(mode, &window, &document, &container);
                let _ = engine.handle_scroll(&sample);
            }))
        };
        self.window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &passive(),
        )?;

        let on_resize = {
            let engine = Rc::clone(&self.engine);
            let window = self.window.clone();
            let document = document.clone();
            let container = container.clone();
            let canvas = self.canvas.clone();
            self.on_resize.insert(EventClosure::new(move |_: web_sys::Event| {
                let (width, height) = container_size(&window, &container);
                let mut engine = engine.borrow_mut();
                engine.resize(width, height, window.device_pixel_ratio());
                sync_canvas(&canvas, &engine);
                // Layout moved, so the scroll geometry did too.
                let mode = engine.options().scroll.mode;
                let _ = engine.handle_scroll(&scroll_sample(mode, &window, &document, &container));
            }))
        };
        self.window.add_event_listener_with_callback_and_add_event_listener_options(
            "resize",
            on_resize.as_ref().unchecked_ref(),
            &passive(),
        )?;
        Ok(())
    }

    /// Start the `requestAnimationFrame` loop. The callback re-queues itself
    /// until the view is unmounted.
    fn start_frames(&self) -> Result<(), JsValue> {
        let engine = Rc::clone(&self.engine);
        let labels = Rc::clone(&self.labels);
        let mut frames = FrameLoop::new(self.liveness.clone(), move |_timestamp: f64| {
            let frame = engine.borrow_mut().render(Instant::now());
            if let Err(e) = labels.borrow_mut().show(frame.labels) {
                log::warn!("label update failed: {e:?}");
            }
        });

        let callback = {
            let slot = Rc::clone(&self.frame);
            let handle = Rc::clone(&self.frame_handle);
            let window = self.window.clone();
            FrameClosure::new(move |timestamp: f64| {
                handle.set(None);
                if frames.tick(timestamp) == FrameOutcome::Cancelled {
                    return;
                }
                let next = slot.borrow().as_ref().map(|cb| {
                    window.request_animation_frame(cb.as_ref().unchecked_ref())
                });
                handle.set(next.and_then(Result::ok));
            })
        };
        let first = self.window.request_animation_frame(callback.as_ref().unchecked_ref());
        *self.frame.borrow_mut() = Some(callback);
        self.frame_handle.set(Some(first?));
        Ok(())
    }
}

/// Mount the exploded view into the element with id `container_id`.
///
/// On error nothing is left behind in the page.
///
/// # Errors
///
/// Returns an error value if there is no window or document, the container
/// does not exist, or the canvas, labels or listeners cannot be created.
pub fn mount(container_id: &str, options: Options) -> Result<WebMount, JsValue> {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or_else(|| unavailable("window"))?;
    let document = window.document().ok_or_else(|| unavailable("document"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| unavailable(&format!("#{container_id}")))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| unavailable("canvas"))?;
    let labels = DomLabels::new(&document)?;

    let (width, height) = container_size(&window, &container);
    let mode = options.scroll.mode;
    let mut engine = ExplodedViewEngine::new(options, width, height);
    engine.resize(width, height, window.device_pixel_ratio());
    let _ = engine.handle_scroll(&scroll_sample(mode, &window, &document, &container));

    // From here on, an early return drops `view`, which undoes every step
    // taken so far.
    let mut view = WebMount {
        liveness: engine.liveness(),
        engine: Rc::new(RefCell::new(engine)),
        window,
        canvas,
        labels: Rc::new(RefCell::new(labels)),
        positioned: None,
        on_scroll: None,
        on_resize: None,
        frame: Rc::new(RefCell::new(None)),
        frame_handle: Rc::new(Cell::new(None)),
    };
    view.attach_to(&container)?;
    view.listen(&document, &container)?;
    view.start_frames()?;
    spawn_renderer(&view.engine, &view.canvas);

    log::info!("exploded view mounted in #{container_id} ({width}x{height})");
    Ok(view)
}

/// JS entry point: mount with options given as a JSON string (or defaults).
///
/// # Errors
///
/// Returns an error value if the options do not parse or [`mount`] fails.
#[wasm_bindgen(js_name = mount)]
pub fn mount_js(container_id: &str, options_json: Option<String>) -> Result<WebMount, JsValue> {
    let options = match options_json {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| js_error(&AtelierError::OptionsParse(e.to_string())))?,
        None => Options::default(),
    };
    mount(container_id, options)
}

/// Create the GPU renderer off the current task and attach it when ready.
///
/// Attaching after unmount is ignored by the engine.
fn spawn_renderer(engine: &Rc<RefCell<ExplodedViewEngine>>, canvas: &HtmlCanvasElement) {
    let (size, options, camera) = {
        let engine = engine.borrow();
        (engine.surface_size(), engine.options().clone(), engine.camera())
    };
    let target = wgpu::SurfaceTarget::Canvas(canvas.clone());
    let engine = Rc::clone(engine);
    spawn_local(async move {
        match Renderer::for_surface(target, size, &options, &camera).await {
            Ok(renderer) => engine.borrow_mut().attach(renderer),
            Err(e) => log::warn!("renderer inactive: {e}"),
        }
    });
}
