//! Integration tests for the Vulkan device context
//!
//! These tests verify that VulkanDeviceContext correctly implements the
//! DeviceContext trait against a real driver. All tests require a GPU and
//! are marked with #[ignore].
//!
//! Run with: cargo test --test vulkan_device_tests -- --ignored

use aurora_present::aurora::present::{
    clamp_image_count, resolve_extent, select_surface_format, CommandSequence, DeviceConfig,
    DeviceContext, Extent2d, FrameOrchestrator, FrameRenderer, OrchestratorConfig, PixelFormat,
    PresentImage, PresentMode, PresentationConfig,
};
use aurora_present::aurora::Result;
use aurora_present_vulkan::{record_clear_color, VulkanDeviceContext, WindowSurfaceSource};
use std::sync::Arc;
use winit::event_loop::EventLoop;
use winit::window::Window;

/// Helper to create a test window for Vulkan
#[allow(deprecated)]
fn create_test_window() -> (Arc<Window>, EventLoop<()>) {
    let event_loop = EventLoop::new().unwrap();
    let window_attrs = Window::default_attributes()
        .with_title("Aurora Vulkan Test")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 600))
        .with_visible(false); // Hidden window for tests
    let window = event_loop.create_window(window_attrs).unwrap();
    (Arc::new(window), event_loop)
}

/// Renderer that clears every frame to a fixed color
struct SolidColorRenderer;

impl FrameRenderer for SolidColorRenderer {
    fn record_draw_commands(
        &mut self,
        commands: &mut dyn CommandSequence,
        target: &dyn PresentImage,
        _extent: Extent2d,
    ) -> Result<()> {
        record_clear_color(commands, target, [0.0, 0.2, 0.4, 1.0])
    }
}

// ============================================================================
// DEVICE CONTEXT TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_device_creation() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();

    device.wait_idle().unwrap();
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_surface_capabilities() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();

    let caps = device.surface_capabilities().unwrap();
    assert!(caps.min_image_count >= 1);
    assert!(!caps.max_image_extent.is_degenerate());
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_surface_formats_not_empty() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();

    let formats = device.surface_formats().unwrap();
    assert!(!formats.is_empty());
}

// ============================================================================
// COMMAND SEQUENCE TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_command_sequence_begin_end() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();

    let mut sequences = device.allocate_command_sequences(2).unwrap();
    assert_eq!(sequences.len(), 2);

    for sequence in &mut sequences {
        sequence.begin().unwrap();
        sequence.end().unwrap();
    }
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_command_sequence_double_begin_fails() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();

    let mut sequences = device.allocate_command_sequences(1).unwrap();
    sequences[0].begin().unwrap();
    assert!(sequences[0].begin().is_err());
    sequences[0].end().unwrap();
}

// ============================================================================
// SYNC PRIMITIVE TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_completion_gate_lifecycle() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();

    // A pre-signaled gate returns immediately
    let gate = device.create_completion_gate(true).unwrap();
    gate.wait(u64::MAX).unwrap();

    // After a reset the wait times out until the device signals it
    gate.reset().unwrap();
    assert!(gate.wait(1_000_000).is_err());
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_unsignaled_gate_times_out() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();

    let gate = device.create_completion_gate(false).unwrap();
    assert!(gate.wait(1_000_000).is_err());
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_render_signal_creation() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();

    let _image_available = device.create_render_signal().unwrap();
    let _render_finished = device.create_render_signal().unwrap();
}

// ============================================================================
// PRESENTATION CHAIN TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_presentation_chain_build() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();

    let caps = device.surface_capabilities().unwrap();
    let formats = device.surface_formats().unwrap();
    let format = select_surface_format(
        &formats,
        &[PixelFormat::B8G8R8A8_SRGB, PixelFormat::R8G8B8A8_SRGB],
    )
    .unwrap();

    let config = PresentationConfig {
        extent: resolve_extent(&caps, Extent2d::new(800, 600)),
        format,
        present_mode: PresentMode::Fifo,
        min_image_count: clamp_image_count(&caps),
    };

    let chain = device.create_presentation(&config).unwrap();
    assert!(chain.image_count() >= config.min_image_count as usize);
    assert_eq!(chain.extent(), config.extent);
    assert_eq!(chain.format(), format.format);
}

// ============================================================================
// FULL CYCLE TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_full_frame_cycle() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();
    let source = WindowSurfaceSource::new(window.clone());

    let mut orchestrator = FrameOrchestrator::new(
        Box::new(device),
        Box::new(source),
        OrchestratorConfig::default(),
    )
    .unwrap();

    let mut renderer = SolidColorRenderer;
    for _ in 0..3 {
        orchestrator.run_iteration(&mut renderer).unwrap();
    }

    orchestrator.shutdown().unwrap();
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_orchestrator_drop_without_shutdown() {
    let (window, _event_loop) = create_test_window();
    let device = VulkanDeviceContext::new(window.as_ref(), DeviceConfig::default()).unwrap();
    let source = WindowSurfaceSource::new(window.clone());

    let mut orchestrator = FrameOrchestrator::new(
        Box::new(device),
        Box::new(source),
        OrchestratorConfig::default(),
    )
    .unwrap();

    let mut renderer = SolidColorRenderer;
    orchestrator.run_iteration(&mut renderer).unwrap();

    // Dropping without shutdown must quiesce the device on its own
    drop(orchestrator);
}
