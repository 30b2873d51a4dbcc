//! Aurora demo: clears the window to a pulsing red
//!
//! Drives a FrameOrchestrator from a winit event loop with the Vulkan
//! backend. Resizing, minimizing and restoring the window exercise the
//! surface rebuild path.

use aurora_present::aurora::present::{
    CommandSequence, DeviceConfig, Extent2d, FrameOrchestrator, FrameRenderer,
    OrchestratorConfig, PresentImage, PresentMode,
};
use aurora_present::aurora::Result;
use aurora_present::{engine_error, engine_info};
use aurora_present_vulkan::{record_clear_color, VulkanDeviceContext, WindowSurfaceSource};
use glam::Vec3;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Clears each frame to a red that pulses over time
struct PulseRenderer {
    start: Instant,
}

impl PulseRenderer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl FrameRenderer for PulseRenderer {
    fn record_draw_commands(
        &mut self,
        commands: &mut dyn CommandSequence,
        target: &dyn PresentImage,
        _extent: Extent2d,
    ) -> Result<()> {
        let t = self.start.elapsed().as_secs_f32();
        let phase = 0.5 + 0.5 * (5.0 * t).sin();
        let color = Vec3::ZERO.lerp(Vec3::X, phase);
        record_clear_color(commands, target, [color.x, color.y, color.z, 1.0])
    }
}

struct App {
    window: Option<Arc<Window>>,
    orchestrator: Option<FrameOrchestrator>,
    renderer: PulseRenderer,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            orchestrator: None,
            renderer: PulseRenderer::new(),
        }
    }

    fn shutdown(&mut self) {
        if let Some(mut orchestrator) = self.orchestrator.take() {
            if let Err(e) = orchestrator.shutdown() {
                engine_error!("aurora::demo", "Shutdown failed: {}", e);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Aurora Demo")
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                engine_error!("aurora::demo", "Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let device_config = DeviceConfig {
            app_name: "Aurora Demo".to_string(),
            ..DeviceConfig::default()
        };
        let device = match VulkanDeviceContext::new(window.as_ref(), device_config) {
            Ok(device) => device,
            Err(e) => {
                engine_error!("aurora::demo", "Failed to create device: {}", e);
                event_loop.exit();
                return;
            }
        };

        let source = WindowSurfaceSource::new(window.clone());
        let config = OrchestratorConfig {
            present_mode: PresentMode::Mailbox,
            ..OrchestratorConfig::default()
        };
        match FrameOrchestrator::new(Box::new(device), Box::new(source), config) {
            Ok(orchestrator) => {
                engine_info!("aurora::demo", "Initialization complete, entering main loop");
                self.orchestrator = Some(orchestrator);
                self.window = Some(window);
            }
            Err(e) => {
                engine_error!("aurora::demo", "Failed to create orchestrator: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                engine_info!("aurora::demo", "Close requested, shutting down");
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                engine_info!(
                    "aurora::demo",
                    "Window resized to {}x{}",
                    size.width,
                    size.height
                );
                if let Some(ref mut orchestrator) = self.orchestrator {
                    orchestrator.notify_surface_changed();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(ref mut orchestrator) = self.orchestrator {
                    if let Err(e) = orchestrator.run_iteration(&mut self.renderer) {
                        engine_error!("aurora::demo", "Frame failed: {}", e);
                        self.shutdown();
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    engine_info!("aurora::demo", "Starting Aurora demo");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
