/// Presentation module - all presentation-related types and traits

// Module declarations
pub mod types;
pub mod device;
pub mod presentation;
pub mod source;
pub mod frame_renderer;
pub mod frame_pool;
pub mod surface_manager;
pub mod orchestrator;
pub mod mock_device;

// Re-export everything from types.rs
pub use types::*;

// Re-export from other modules
pub use device::*;
pub use presentation::*;
pub use source::*;
pub use frame_renderer::*;
pub use frame_pool::*;
pub use surface_manager::*;
pub use orchestrator::*;
