/*!
# Aurora Presentation Engine - Vulkan Backend

Vulkan implementation of the `aurora_present` device traits, built on the
Ash bindings.

[`VulkanDeviceContext`] owns the instance, logical device, window surface
and the combined graphics + present queue; each
[`VulkanPresentationChain`] wraps one swapchain generation. Enable the
`vulkan-validation` feature to compile in validation layer support.
*/

// Vulkan implementation modules
mod vulkan_command_sequence;
mod vulkan_device;
mod vulkan_format;
mod vulkan_presentation;
mod vulkan_sync;
mod window_source;

#[cfg(feature = "vulkan-validation")]
mod debug;

pub use vulkan_command_sequence::VulkanCommandSequence;
pub use vulkan_device::VulkanDeviceContext;
pub use vulkan_presentation::{record_clear_color, VulkanPresentImage, VulkanPresentationChain};
pub use vulkan_sync::{VulkanCompletionGate, VulkanRenderSignal};
pub use window_source::WindowSurfaceSource;
