/*!
# Aurora Presentation Engine

Core traits and types for the Aurora frame presentation engine.

This crate provides the platform-agnostic presentation state machine using
trait-based dynamic polymorphism. A backend implementation (Vulkan via
`aurora_present_vulkan`) provides the device-facing concrete types.

## Architecture

- **FrameOrchestrator**: Drives the per-frame acquire/record/submit/present cycle
- **FramePool**: Fixed ring of per-frame command sequences and sync primitives
- **SurfaceManager**: Surface negotiation, staleness detection, safe rebuild
- **DeviceContext**: Factory trait for backend device objects
- **PresentationChain**: Image acquire and present trait
- **SurfaceSource / FrameRenderer**: Traits the host application implements

Backend implementations provide concrete types that implement these traits.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod present;

// Main aurora namespace module
pub mod aurora {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine logging facade
    pub use crate::engine::Engine;

    // Orchestrator entry points
    pub use crate::present::{FrameOrchestrator, FrameOutcome, OrchestratorConfig};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Presentation sub-module with all presentation types
    pub mod present {
        pub use crate::present::*;
    }
}
