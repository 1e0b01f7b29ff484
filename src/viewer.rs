//! Standalone window backed by winit.
//!
//! There is no page to scroll in a native window, so the viewer scrolls a
//! virtual document `virtual_page_screens` viewports tall. The mouse wheel
//! and the usual paging keys move through it.
//!
//! Labels are reported in the log as they appear and disappear, and the
//! window title carries the progress percentage and the current layer.
//!
//! ```no_run
//! # use atelier::Viewer;
//! Viewer::builder()
//!     .with_title("Leather Jacket")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{cell::RefCell, rc::Rc, sync::Arc};

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    error::AtelierError,
    options::Options,
    overlay::{layer_states, progress_bar_percent, LabelVisibility, LAYERS},
    renderer::Renderer,
    schedule::{FrameLoop, FrameOutcome},
    scroll::{Progress, ScrollSample},
    ExplodedViewEngine,
};

// ── Virtual page ─────────────────────────────────────────────────────────

/// A scrollable document that exists only as numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualPage {
    scroll_top: f32,
    viewport_height: f32,
    screens: f32,
}

impl VirtualPage {
    /// Page `screens` viewports tall, scrolled to the top.
    #[must_use]
    pub fn new(viewport_height: f32, screens: f32) -> Self {
        Self {
            scroll_top: 0.0,
            viewport_height: viewport_height.max(1.0),
            screens: screens.max(1.0),
        }
    }

    /// Total document height.
    #[must_use]
    pub fn document_height(&self) -> f32 {
        self.viewport_height * self.screens
    }

    fn max_scroll(&self) -> f32 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    /// Scroll by `delta` pixels (positive = down), clamped to the document.
    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.scroll_top + delta);
    }

    /// Jump to an absolute offset, clamped to the document.
    pub fn scroll_to(&mut self, top: f32) {
        self.scroll_top = if top.is_finite() {
            top.clamp(0.0, self.max_scroll())
        } else {
            0.0
        };
    }

    /// Keep the relative position when the viewport changes height.
    pub fn set_viewport_height(&mut self, height: f32) {
        let max = self.max_scroll();
        let fraction = if max > 0.0 { self.scroll_top / max } else { 0.0 };
        self.viewport_height = height.max(1.0);
        self.scroll_to(fraction * self.max_scroll());
    }

    /// Page geometry for the tracker.
    ///
    /// The element fields describe a virtual element one viewport tall
    /// halfway down the document, so windowed tracking runs from 0 at the
    /// top of the page to 1 at the bottom.
    #[must_use]
    pub fn sample(&self) -> ScrollSample {
        let element_offset = self.max_scroll() / 2.0;
        ScrollSample {
            element_top: element_offset - self.scroll_top,
            element_height: self.viewport_height,
            ..ScrollSample::page(
                self.scroll_top,
                self.viewport_height,
                self.document_height(),
            )
        }
    }

    /// Scroll for a key press, if the key scrolls.
    fn key_delta(&self, code: KeyCode, line: f32) -> Option<f32> {
        match code {
            KeyCode::ArrowDown => Some(line),
            KeyCode::ArrowUp => Some(-line),
            KeyCode::PageDown | KeyCode::Space => Some(self.viewport_height),
            KeyCode::PageUp => Some(-self.viewport_height),
            KeyCode::Home => Some(-self.document_height()),
            KeyCode::End => Some(self.document_height()),
            _ => None,
        }
    }
}

/// Window title showing progress and the current layer.
fn status_title(base: &str, progress: Progress) -> String {
    let percent = progress_bar_percent(progress);
    let current = layer_states(&LAYERS, progress)
        .into_iter()
        .rev()
        .find(|state| state.current);
    match current {
        Some(state) => format!("{base} | {percent:.0}% | {}", state.layer.name),
        None => format!("{base} | {percent:.0}%"),
    }
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Builder with default options and title "Atelier".
    fn new() -> Self {
        Self {
            options: None,
            title: "Atelier".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the exploded view.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::Viewer`] if the event loop cannot be created
    /// or exits abnormally.
    pub fn run(self) -> Result<(), AtelierError> {
        let event_loop =
            EventLoop::new().map_err(|e| AtelierError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            frames: None,
            page: VirtualPage::new(1.0, self.options.scroll.virtual_page_screens),
            options: self.options,
            title: self.title,
            started: Instant::now(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| AtelierError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

type FrameFn = Box<dyn FnMut(f64)>;

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<Rc<RefCell<ExplodedViewEngine>>>,
    frames: Option<FrameLoop<FrameFn>>,
    page: VirtualPage,
    options: Options,
    title: String,
    started: Instant,
}

impl ViewerApp {
    fn logical_size(window: &Window) -> (u32, u32, f64) {
        let scale = window.scale_factor();
        let logical = window.inner_size().to_logical::<f64>(scale);
        (
            logical.width.round().max(1.0) as u32,
            logical.height.round().max(1.0) as u32,
            scale,
        )
    }

    fn unmount(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.borrow_mut().unmount();
        }
        self.frames = None;
    }

    fn publish_scroll(&mut self) {
        if let Some(engine) = &self.engine {
            let p = engine.borrow_mut().handle_scroll(&self.page.sample());
            log::trace!("virtual scroll -> {p}");
        }
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 800.0));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (width, height, scale) = Self::logical_size(&window);
        let mut engine = ExplodedViewEngine::new(self.options.clone(), width, height);
        engine.resize(width, height, scale);

        match pollster::block_on(Renderer::for_surface(
            window.clone(),
            engine.surface_size(),
            engine.options(),
            &engine.camera(),
        )) {
            Ok(renderer) => engine.attach(renderer),
            Err(e) => log::warn!("renderer inactive: {e}"),
        }

        self.page = VirtualPage::new(height as f32, self.options.scroll.virtual_page_screens);
        let _ = engine.handle_scroll(&self.page.sample());

        let liveness = engine.liveness();
        let engine = Rc::new(RefCell::new(engine));
        let target = Rc::clone(&engine);
        let title_window = Arc::clone(&window);
        let base_title = self.title.clone();
        let mut labels = LabelVisibility::default();
        let mut shown_title = String::new();
        let frame: FrameFn = Box::new(move |_| {
            let frame = target.borrow_mut().render(Instant::now());
            for (text, shown) in labels.update(&frame.labels) {
                log::info!("label {text:?} {}", if shown { "shown" } else { "hidden" });
            }
            let title = status_title(&base_title, frame.progress);
            if title != shown_title {
                title_window.set_title(&title);
                shown_title = title;
            }
        });

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.frames = Some(FrameLoop::new(liveness, frame));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.unmount();
            event_loop.exit();
            return;
        }

        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::Resized(_)
            | WindowEvent::ScaleFactorChanged { .. } => {
                let (width, height, scale) = Self::logical_size(&window);
                self.page.set_viewport_height(height as f32);
                if let Some(engine) = &self.engine {
                    engine.borrow_mut().resize(width, height, scale);
                }
                self.publish_scroll();
            }

            WindowEvent::RedrawRequested => {
                let Some(frames) = &mut self.frames else {
                    return;
                };
                let ms = Instant::now()
                    .saturating_duration_since(self.started)
                    .as_secs_f64()
                    * 1000.0;
                if frames.tick(ms) == FrameOutcome::Rendered {
                    window.request_redraw();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let line = self.options.scroll.wheel_line_pixels;
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * line,
                    MouseScrollDelta::PixelDelta(pos) => {
                        -(pos.y / window.scale_factor()) as f32
                    }
                };
                self.page.scroll_by(pixels);
                self.publish_scroll();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if code == KeyCode::Escape {
                    self.unmount();
                    event_loop.exit();
                    return;
                }
                let line = self.options.scroll.wheel_line_pixels;
                if let Some(delta) = self.page.key_delta(code, line) {
                    self.page.scroll_by(delta);
                    self.publish_scroll();
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::TrackingMode;

    #[test]
    fn windowed_tracking_runs_over_the_whole_virtual_page() {
        let mut options = Options::default();
        options.scroll.mode = TrackingMode::Windowed;
        let mut engine = ExplodedViewEngine::new(options, 1280, 800);
        let mut page = VirtualPage::new(800.0, 5.0);

        assert_eq!(engine.handle_scroll(&page.sample()).value(), 0.0);
        page.scroll_to(1600.0);
        let mid = engine.handle_scroll(&page.sample()).value();
        assert!((mid - 0.5).abs() < 1e-6);
        page.scroll_to(3200.0);
        assert_eq!(engine.handle_scroll(&page.sample()).value(), 1.0);
    }

    #[test]
    fn both_tracking_modes_agree_at_the_ends() {
        let mut page = VirtualPage::new(800.0, 5.0);
        for top in [0.0, 3200.0] {
            page.scroll_to(top);
            let sample = page.sample();
            assert_eq!(
                TrackingMode::FullPage.progress(&sample),
                TrackingMode::Windowed.progress(&sample)
            );
        }
    }

    #[test]
    fn title_names_the_current_layer() {
        assert_eq!(
            status_title("Atelier", Progress::START),
            "Atelier | 0% | Full-Grain Leather"
        );
        assert_eq!(
            status_title("Atelier", Progress::END),
            "Atelier | 100% | Double Stitching"
        );
        assert_eq!(
            status_title("Atelier", Progress::new(0.5)),
            "Atelier | 50% | Viscose Lining"
        );
        // Between the first layer's hold and the second's lead-in.
        assert_eq!(status_title("Atelier", Progress::new(0.21)), "Atelier | 21%");
    }

    #[test]
    fn wheel_scrolls_within_document() {
        let mut page = VirtualPage::new(800.0, 5.0);
        page.scroll_by(-100.0);
        assert_eq!(page.sample().scroll_top, 0.0);
        page.scroll_by(10_000.0);
        assert_eq!(page.sample().scroll_top, 3200.0);
        let p = TrackingMode::FullPage.progress(&page.sample());
        assert_eq!(p.value(), 1.0);
    }

    #[test]
    fn resize_keeps_relative_position() {
        let mut page = VirtualPage::new(800.0, 5.0);
        page.scroll_to(1600.0);
        page.set_viewport_height(400.0);
        assert_eq!(page.sample().scroll_top, 800.0);
        assert_eq!(page.document_height(), 2000.0);
    }

    #[test]
    fn paging_keys_move_by_a_screen() {
        let page = VirtualPage::new(800.0, 5.0);
        assert_eq!(page.key_delta(KeyCode::PageDown, 60.0), Some(800.0));
        assert_eq!(page.key_delta(KeyCode::ArrowUp, 60.0), Some(-60.0));
        assert_eq!(page.key_delta(KeyCode::KeyA, 60.0), None);
    }

    #[test]
    fn single_screen_page_cannot_scroll() {
        let mut page = VirtualPage::new(800.0, 1.0);
        page.scroll_by(500.0);
        assert_eq!(page.sample().scroll_top, 0.0);
    }
}
