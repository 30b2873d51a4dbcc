/// Winit-backed drawable size source

use aurora_present::aurora::present::{Extent2d, SurfaceSource};
use std::sync::Arc;
use winit::window::Window;

/// [`SurfaceSource`] reading the drawable size from a winit window
///
/// Holds the window by `Arc` so the orchestrator can own the source while
/// the event loop keeps driving the same window.
///
/// [`SurfaceSource`]: aurora_present::aurora::present::SurfaceSource
pub struct WindowSurfaceSource {
    window: Arc<Window>,
}

impl WindowSurfaceSource {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl SurfaceSource for WindowSurfaceSource {
    fn drawable_extent(&self) -> Extent2d {
        let size = self.window.inner_size();
        Extent2d::new(size.width, size.height)
    }
}
