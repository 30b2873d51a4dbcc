/// Device-facing trait seams: command sequences, sync primitives, device context

use crate::error::Result;
use crate::present::{PresentationChain, PresentationConfig, SurfaceCaps, SurfaceFormat};

/// Device bootstrap configuration
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Enable validation/debug layers
    pub enable_validation: bool,
    /// Application name
    pub app_name: String,
    /// Application version (major, minor, patch)
    pub app_version: (u32, u32, u32),
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            app_name: "Aurora Application".to_string(),
            app_version: (1, 0, 0),
        }
    }
}

// ============================================================================
// Command sequence
// ============================================================================

/// Recordable command sequence bound to one frame slot
///
/// Recording always restarts from scratch: `begin` discards any previously
/// recorded contents, so a slot that ended a prior cycle in an error is safe
/// to reuse. Commands between `begin` and `end` are supplied by the
/// presentation chain (layout transitions) and the frame renderer (draw
/// work).
pub trait CommandSequence {
    /// Reset the sequence and begin recording
    ///
    /// # Errors
    ///
    /// Fails if the sequence is already recording.
    fn begin(&mut self) -> Result<()>;

    /// Finish recording, making the sequence submittable
    ///
    /// # Errors
    ///
    /// Fails if the sequence is not recording.
    fn end(&mut self) -> Result<()>;
}

// ============================================================================
// Synchronization primitives
// ============================================================================

/// Device-side ordering signal (semaphore-equivalent)
///
/// Only the device waits on or signals these; the host merely owns them.
/// Each frame slot carries one "image-acquired" and one "rendering-finished"
/// signal.
pub trait RenderSignal {}

/// Host-waitable completion gate (fence-equivalent)
///
/// Signaled by the device when a slot's submitted work completes; waited on
/// and reset by the host before the slot is reused. Cannot be re-signaled
/// from the host, which is why a surface rebuild replaces gates wholesale
/// instead of resetting them.
pub trait CompletionGate {
    /// Block until the gate is signaled or `timeout_ns` elapses
    fn wait(&self, timeout_ns: u64) -> Result<()>;

    /// Return the gate to the unsignaled state
    fn reset(&self) -> Result<()>;
}

// ============================================================================
// Device context
// ============================================================================

/// Device context trait - everything the presentation core needs from the GPU
///
/// Implemented by backend device wrappers (e.g. VulkanDeviceContext). The
/// context owns the logical device, one graphics-capable queue that also
/// supports presentation, and the native surface handle the capability
/// queries run against.
pub trait DeviceContext: Send + Sync {
    /// Index of the combined graphics + present queue family
    fn queue_family_index(&self) -> u32;

    /// Query the surface capability report (image counts, extents)
    fn surface_capabilities(&self) -> Result<SurfaceCaps>;

    /// Query the supported (format, color space) pairs, in reported order
    ///
    /// # Returns
    ///
    /// Only pairs expressible in the core types; a surface whose reported
    /// pairs are all exotic yields an empty list.
    fn surface_formats(&self) -> Result<Vec<SurfaceFormat>>;

    /// Allocate `count` command sequences in one batch
    fn allocate_command_sequences(&self, count: usize) -> Result<Vec<Box<dyn CommandSequence>>>;

    /// Create a device-side ordering signal
    fn create_render_signal(&self) -> Result<Box<dyn RenderSignal>>;

    /// Create a host-waitable completion gate
    ///
    /// # Arguments
    ///
    /// * `signaled` - Initial state; frame slots start signaled so the first
    ///   wait never blocks
    fn create_completion_gate(&self, signaled: bool) -> Result<Box<dyn CompletionGate>>;

    /// Create a presentation chain for the negotiated configuration
    fn create_presentation(
        &self,
        config: &PresentationConfig,
    ) -> Result<Box<dyn PresentationChain>>;

    /// Submit a recorded sequence to the graphics queue
    ///
    /// Execution waits for `wait_image_available` before touching the target
    /// image, signals `signal_render_finished` when the work completes, and
    /// signals `completion_gate` for the host's later slot-reuse wait.
    fn submit(
        &self,
        commands: &dyn CommandSequence,
        wait_image_available: &dyn RenderSignal,
        signal_render_finished: &dyn RenderSignal,
        completion_gate: &dyn CompletionGate,
    ) -> Result<()>;

    /// Block until the device has finished all outstanding work
    fn wait_idle(&self) -> Result<()>;
}
