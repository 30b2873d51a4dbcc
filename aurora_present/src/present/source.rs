/// SurfaceSource trait - injected drawable-size query

use crate::present::Extent2d;

/// Single entry point for the current drawable pixel size
///
/// Injected into the orchestrator at construction so staleness checks and
/// extent resolution never read window state through a side channel. A
/// degenerate extent (zero width or height) means the surface cannot be
/// presented to right now, e.g. a minimized window.
pub trait SurfaceSource {
    /// Current drawable size in pixels
    fn drawable_extent(&self) -> Extent2d;
}
