/// Frame Orchestrator - drives the acquire/record/submit/present cycle
///
/// Owns the frame pool and the surface manager and steps them through the
/// frame cycle. CPU/GPU overlap comes from the pool: with N slots the host
/// may be at most N frames ahead, throttled by each slot's completion
/// gate. The orchestrator is single-threaded by contract; one instance
/// drives one surface.

use crate::error::{Error, Result};
use crate::present::{
    AcquireOutcome, DeviceContext, Extent2d, FramePool, FrameRenderer, PixelFormat, PresentMode,
    PresentOutcome, RebuildOutcome, SurfaceManager, SurfaceSource,
};
use crate::{engine_debug, engine_info};

/// Tuning knobs for an orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// How many frames the host may work ahead of the device (N ≥ 1).
    /// 2 gives double buffering of frame state, 3 triple buffering.
    pub frames_in_flight: usize,
    /// Pixel formats in descending preference for surface negotiation
    pub preferred_formats: Vec<PixelFormat>,
    /// Requested presentation mode
    pub present_mode: PresentMode,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            frames_in_flight: 2,
            preferred_formats: vec![PixelFormat::B8G8R8A8_SRGB, PixelFormat::R8G8B8A8_SRGB],
            present_mode: PresentMode::Fifo,
        }
    }
}

/// What one frame iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A frame was recorded, submitted and presented
    Rendered,
    /// Nothing was rendered: the drawable area is degenerate (window
    /// minimized) or the surface is not ready to host a chain yet
    SkippedMinimized,
    /// The chain went out of date this iteration; the next iteration
    /// rebuilds it before rendering
    RebuildNeeded,
}

/// Drives frames through a presentation surface
///
/// # Example
///
/// ```no_run
/// use aurora_present::aurora::present::{FrameOrchestrator, OrchestratorConfig};
/// # fn demo(device: Box<dyn aurora_present::aurora::present::DeviceContext>,
/// #         source: Box<dyn aurora_present::aurora::present::SurfaceSource>,
/// #         renderer: &mut dyn aurora_present::aurora::present::FrameRenderer)
/// #         -> aurora_present::aurora::Result<()> {
/// let mut orchestrator = FrameOrchestrator::new(device, source, OrchestratorConfig::default())?;
/// loop {
///     orchestrator.run_iteration(renderer)?;
/// #   break;
/// }
/// orchestrator.shutdown()?;
/// # Ok(())
/// # }
/// ```
pub struct FrameOrchestrator {
    // Declaration order keeps destruction safe: pool and surface (and the
    // chain inside it) go before the device context they were made from
    pool: FramePool,
    surface: SurfaceManager,
    cursor: usize,
    retired: bool,
    source: Box<dyn SurfaceSource>,
    device: Box<dyn DeviceContext>,
}

impl FrameOrchestrator {
    /// Allocate the frame pool and set up surface management
    ///
    /// The presentation chain itself is built lazily by the first
    /// [`run_iteration`](FrameOrchestrator::run_iteration), so starting
    /// minimized is not an error.
    ///
    /// # Arguments
    ///
    /// * `device` - Backend device the orchestrator renders with
    /// * `source` - Where the drawable area size comes from
    /// * `config` - Frame count, format preferences and present mode
    ///
    /// # Errors
    ///
    /// Fails if `frames_in_flight` is zero or pool allocation fails.
    pub fn new(
        device: Box<dyn DeviceContext>,
        source: Box<dyn SurfaceSource>,
        config: OrchestratorConfig,
    ) -> Result<Self> {
        if config.frames_in_flight == 0 {
            return Err(Error::InitializationFailed(
                "frames_in_flight must be at least 1".to_string(),
            ));
        }

        let mut pool = FramePool::new();
        pool.initialize(device.as_ref(), config.frames_in_flight)?;
        let surface = SurfaceManager::new(config.preferred_formats, config.present_mode);

        engine_info!(
            "aurora::FrameOrchestrator",
            "Frame orchestrator ready ({} frames in flight, {:?})",
            config.frames_in_flight,
            config.present_mode
        );

        Ok(Self {
            pool,
            surface,
            cursor: 0,
            retired: false,
            source,
            device,
        })
    }

    /// Run one frame cycle
    ///
    /// The cycle for slot `cursor`:
    ///
    /// 1. Skip if the drawable area is degenerate; rebuild the chain first
    ///    if it is stale (re-arming the pool and restarting at slot 0)
    /// 2. Wait on the slot's completion gate, then reset it
    /// 3. Acquire an image; out-of-date aborts without advancing
    /// 4. Record: render transition, caller's draw commands, present
    ///    transition
    /// 5. Submit, gated on image availability and observed by the slot's
    ///    completion gate
    /// 6. Present, advance the cursor, and report device feedback
    ///
    /// # Arguments
    ///
    /// * `renderer` - Records the actual draw commands for this frame
    ///
    /// # Errors
    ///
    /// Any device error is fatal to the orchestrator's run and propagates;
    /// recoverable conditions (minimized, out of date) come back as
    /// [`FrameOutcome`] values instead.
    pub fn run_iteration(&mut self, renderer: &mut dyn FrameRenderer) -> Result<FrameOutcome> {
        if self.retired {
            return Err(Error::InvalidState(
                "frame orchestrator is shut down".to_string(),
            ));
        }

        if self.source.drawable_extent().is_degenerate() {
            return Ok(FrameOutcome::SkippedMinimized);
        }

        if self.surface.is_stale(self.source.as_ref()) {
            match self.surface.rebuild(self.device.as_ref(), self.source.as_ref())? {
                RebuildOutcome::NotReady => return Ok(FrameOutcome::SkippedMinimized),
                RebuildOutcome::Rebuilt => {
                    // Old sync primitives may reference the destroyed chain
                    // or hold a pending wait from an aborted cycle
                    self.pool.rearm(self.device.as_ref())?;
                    self.cursor = 0;
                }
            }
        }

        let frame_count = self.pool.frames_in_flight();

        // Throttle: reclaim this slot before reusing its resources
        {
            let slot = self.pool.slot(self.cursor)?;
            slot.in_flight.wait(u64::MAX)?;
            slot.in_flight.reset()?;
        }

        let acquired = {
            let slot = self.pool.slot(self.cursor)?;
            let chain = self.surface.chain_mut()?;
            chain.acquire_image(slot.image_available.as_ref())?
        };

        let mut stale_after_present = false;
        let image_index = match acquired {
            AcquireOutcome::OutOfDate => {
                engine_debug!(
                    "aurora::FrameOrchestrator",
                    "Acquire reported out-of-date, frame aborted"
                );
                // The cursor stays put; the rebuild re-arms this slot's
                // now-unsignalable gate before the cycle runs again
                self.surface.mark_out_of_date();
                return Ok(FrameOutcome::RebuildNeeded);
            }
            AcquireOutcome::Acquired {
                image_index,
                suboptimal,
            } => {
                if suboptimal {
                    // Still usable, render this frame and rebuild afterwards
                    self.surface.mark_out_of_date();
                    stale_after_present = true;
                }
                image_index
            }
        };

        {
            let slot = self.pool.slot_mut(self.cursor)?;
            let chain = self.surface.chain()?;
            slot.commands.begin()?;
            chain.record_render_transition(slot.commands.as_mut(), image_index)?;
            renderer.record_draw_commands(
                slot.commands.as_mut(),
                chain.image(image_index)?,
                chain.extent(),
            )?;
            chain.record_present_transition(slot.commands.as_mut(), image_index)?;
            slot.commands.end()?;
        }

        {
            let slot = self.pool.slot(self.cursor)?;
            self.device.submit(
                slot.commands.as_ref(),
                slot.image_available.as_ref(),
                slot.render_finished.as_ref(),
                slot.in_flight.as_ref(),
            )?;
        }

        let presented = {
            let slot = self.pool.slot(self.cursor)?;
            let chain = self.surface.chain_mut()?;
            chain.present(image_index, slot.render_finished.as_ref())?
        };

        // The frame was handed off, so the cycle advances even when the
        // device asks for a rebuild
        self.cursor = (self.cursor + 1) % frame_count;

        match presented {
            PresentOutcome::Presented => {
                if stale_after_present {
                    Ok(FrameOutcome::RebuildNeeded)
                } else {
                    Ok(FrameOutcome::Rendered)
                }
            }
            PresentOutcome::Suboptimal | PresentOutcome::OutOfDate => {
                engine_debug!(
                    "aurora::FrameOrchestrator",
                    "Present reported {:?}, chain marked for rebuild",
                    presented
                );
                self.surface.mark_out_of_date();
                Ok(FrameOutcome::RebuildNeeded)
            }
        }
    }

    /// Tell the orchestrator the surface changed behind its back
    ///
    /// Size changes are picked up automatically by comparing the drawable
    /// area against the chain; this covers platform notifications that do
    /// not change the size (monitor or scale-factor changes).
    pub fn notify_surface_changed(&mut self) {
        self.surface.mark_out_of_date();
    }

    /// Quiesce the device and release everything; idempotent
    ///
    /// Order matters: the device goes idle first, then per-frame resources,
    /// then the presentation chain.
    ///
    /// # Errors
    ///
    /// Fails only if quiescing the device fails; resources are not
    /// released in that case.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.retired {
            return Ok(());
        }

        self.device.wait_idle()?;
        self.pool.teardown();
        self.surface.retire();
        self.retired = true;

        engine_info!("aurora::FrameOrchestrator", "Frame orchestrator shut down");
        Ok(())
    }

    /// Slot the next iteration will use
    pub fn frame_cursor(&self) -> usize {
        self.cursor
    }

    pub fn frames_in_flight(&self) -> usize {
        self.pool.frames_in_flight()
    }

    /// Drawable size currently reported by the surface source
    pub fn drawable_extent(&self) -> Extent2d {
        self.source.drawable_extent()
    }
}

impl Drop for FrameOrchestrator {
    fn drop(&mut self) {
        // Dropping without shutdown still quiesces before the pool and
        // chain destructors run
        if !self.retired {
            self.device.wait_idle().ok();
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
