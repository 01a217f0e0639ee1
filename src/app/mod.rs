//! Application shell.
//!
//! Owns the window, the wgpu context, and the run loop that drives the
//! viewer's `tick` entry point: `RedrawRequested` runs the optional update
//! callback, ticks the viewer with an `Instant`-derived monotonic
//! millisecond timestamp, then requests the next redraw.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::errors::Result;
use crate::render::WgpuContext;
use crate::scene::Node;
use crate::viewer::Viewer;

/// Per-frame host callback, run before the viewer ticks. Receives the
/// viewer and the seconds elapsed since the app started.
pub type UpdateFn = Box<dyn FnMut(&mut Viewer, f32)>;

pub struct App {
    window: Option<Arc<Window>>,
    context: Option<WgpuContext>,
    pub title: String,
    pub viewer: Viewer,

    update_fn: Option<UpdateFn>,
    start_time: Instant,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: None,
            context: None,
            title: "Tessera Viewer".into(),
            viewer: Viewer::new(),
            update_fn: None,
            start_time: Instant::now(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Queues a node; it is promoted on the next frame once the backend is
    /// up.
    pub fn enqueue(&mut self, node: impl Into<Node>) {
        self.viewer.enqueue(node);
    }

    pub fn set_update_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Viewer, f32) + 'static,
    {
        self.update_fn = Some(Box::new(f));
        self
    }

    /// Runs the event loop until the window is closed.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn redraw(&mut self) {
        let Some(context) = self.context.as_mut() else {
            return;
        };

        let elapsed = self.start_time.elapsed();
        if let Some(update_fn) = self.update_fn.as_mut() {
            update_fn(&mut self.viewer, elapsed.as_secs_f32());
        }

        self.viewer.tick(context, elapsed.as_secs_f64() * 1000.0);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("Initializing wgpu backend...");
        let size = window.inner_size();
        match pollster::block_on(WgpuContext::new(
            window,
            size.width.max(1),
            size.height.max(1),
        )) {
            Ok(context) => self.context = Some(context),
            Err(err) => {
                log::error!("Fatal renderer error: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(context) = self.context.as_mut() {
                    context.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
