/// Mock device backend for unit tests (no GPU required)
///
/// Every object appends to a shared event journal so tests can assert on
/// ordering (wait-idle before destruction, destruction before creation)
/// as well as on counts. The mock also enforces the sync-primitive
/// contract: waiting on an unsignaled gate fails instead of deadlocking,
/// and submitting with a gate that was never reset fails loudly.

#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
use crate::engine_bail;
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::present::{
    AcquireOutcome, ColorSpace, CommandSequence, CompletionGate, DeviceContext, Extent2d,
    FrameRenderer, PixelFormat, PresentImage, PresentOutcome, PresentationChain,
    PresentationConfig, RenderSignal, SurfaceCaps, SurfaceFormat, SurfaceSource,
};

// ============================================================================
// Journal helpers
// ============================================================================

/// Snapshot of the shared event journal
#[cfg(test)]
pub fn events(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Position of the first journal entry equal to `entry`
#[cfg(test)]
pub fn event_index(log: &Arc<Mutex<Vec<String>>>, entry: &str) -> Option<usize> {
    log.lock().unwrap().iter().position(|e| e == entry)
}

/// Number of journal entries starting with `prefix`
#[cfg(test)]
pub fn count_with_prefix(log: &Arc<Mutex<Vec<String>>>, prefix: &str) -> usize {
    log.lock()
        .unwrap()
        .iter()
        .filter(|e| e.starts_with(prefix))
        .count()
}

// ============================================================================
// Mock CommandSequence
// ============================================================================

#[cfg(test)]
pub struct MockCommandSequence {
    pub id: u32,
    pub recording: bool,
    log: Arc<Mutex<Vec<String>>>,
}

#[cfg(test)]
impl MockCommandSequence {
    pub fn new(id: u32, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            id,
            recording: false,
            log,
        }
    }
}

#[cfg(test)]
impl CommandSequence for MockCommandSequence {
    fn begin(&mut self) -> Result<()> {
        if self.recording {
            engine_bail!("aurora::mock", "seq#{} begin while already recording", self.id);
        }
        self.recording = true;
        self.log.lock().unwrap().push(format!("seq#{} begin", self.id));
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if !self.recording {
            engine_bail!("aurora::mock", "seq#{} end without begin", self.id);
        }
        self.recording = false;
        self.log.lock().unwrap().push(format!("seq#{} end", self.id));
        Ok(())
    }
}

#[cfg(test)]
impl Drop for MockCommandSequence {
    fn drop(&mut self) {
        self.log.lock().unwrap().push(format!("seq#{} drop", self.id));
    }
}

// ============================================================================
// Mock sync primitives
// ============================================================================

#[cfg(test)]
pub struct MockRenderSignal {
    pub id: u32,
}

#[cfg(test)]
impl RenderSignal for MockRenderSignal {}

#[cfg(test)]
pub struct MockCompletionGate {
    pub id: u32,
    signaled: Mutex<bool>,
    log: Arc<Mutex<Vec<String>>>,
}

#[cfg(test)]
impl MockCompletionGate {
    pub fn new(id: u32, signaled: bool, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            id,
            signaled: Mutex::new(signaled),
            log,
        }
    }

    /// Device-side completion, called from [`MockDeviceContext::submit`]
    fn signal(&self) {
        *self.signaled.lock().unwrap() = true;
    }

    pub fn is_signaled(&self) -> bool {
        *self.signaled.lock().unwrap()
    }
}

#[cfg(test)]
impl CompletionGate for MockCompletionGate {
    /// Fails instead of blocking so a missing re-arm shows up as a test
    /// failure rather than a hang
    fn wait(&self, _timeout_ns: u64) -> Result<()> {
        if !*self.signaled.lock().unwrap() {
            engine_bail!(
                "aurora::mock",
                "gate#{} wait would deadlock (unsignaled)",
                self.id
            );
        }
        self.log.lock().unwrap().push(format!("gate#{} wait", self.id));
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        *self.signaled.lock().unwrap() = false;
        self.log.lock().unwrap().push(format!("gate#{} reset", self.id));
        Ok(())
    }
}

// ============================================================================
// Mock PresentImage
// ============================================================================

#[cfg(test)]
pub struct MockPresentImage {
    pub index: u32,
    pub extent: Extent2d,
}

#[cfg(test)]
impl PresentImage for MockPresentImage {
    fn extent(&self) -> Extent2d {
        self.extent
    }
}

// ============================================================================
// Mock PresentationChain
// ============================================================================

#[cfg(test)]
pub struct MockPresentationChain {
    pub id: u32,
    extent: Extent2d,
    format: PixelFormat,
    images: Vec<MockPresentImage>,
    next_image: u32,
    log: Arc<Mutex<Vec<String>>>,
    acquire_script: Arc<Mutex<VecDeque<AcquireOutcome>>>,
    present_script: Arc<Mutex<VecDeque<PresentOutcome>>>,
}

#[cfg(test)]
impl PresentationChain for MockPresentationChain {
    fn acquire_image(&mut self, _signal_image_available: &dyn RenderSignal) -> Result<AcquireOutcome> {
        if let Some(outcome) = self.acquire_script.lock().unwrap().pop_front() {
            let entry = match outcome {
                AcquireOutcome::Acquired {
                    image_index,
                    suboptimal: false,
                } => format!("chain#{} acquire -> img{}", self.id, image_index),
                AcquireOutcome::Acquired {
                    image_index,
                    suboptimal: true,
                } => format!("chain#{} acquire -> img{} suboptimal", self.id, image_index),
                AcquireOutcome::OutOfDate => format!("chain#{} acquire -> out_of_date", self.id),
            };
            self.log.lock().unwrap().push(entry);
            return Ok(outcome);
        }

        let index = self.next_image;
        self.next_image = (self.next_image + 1) % self.images.len() as u32;
        self.log
            .lock()
            .unwrap()
            .push(format!("chain#{} acquire -> img{}", self.id, index));
        Ok(AcquireOutcome::Acquired {
            image_index: index,
            suboptimal: false,
        })
    }

    fn image(&self, image_index: u32) -> Result<&dyn PresentImage> {
        match self.images.get(image_index as usize) {
            Some(image) => Ok(image),
            None => engine_bail!(
                "aurora::mock",
                "chain#{} has no image {} ({} images)",
                self.id,
                image_index,
                self.images.len()
            ),
        }
    }

    fn record_render_transition(
        &self,
        commands: &mut dyn CommandSequence,
        image_index: u32,
    ) -> Result<()> {
        let seq = unsafe { &*(commands as *const dyn CommandSequence as *const MockCommandSequence) };
        if !seq.recording {
            engine_bail!("aurora::mock", "render transition outside begin/end");
        }
        self.log
            .lock()
            .unwrap()
            .push(format!("chain#{} render_transition img{}", self.id, image_index));
        Ok(())
    }

    fn record_present_transition(
        &self,
        commands: &mut dyn CommandSequence,
        image_index: u32,
    ) -> Result<()> {
        let seq = unsafe { &*(commands as *const dyn CommandSequence as *const MockCommandSequence) };
        if !seq.recording {
            engine_bail!("aurora::mock", "present transition outside begin/end");
        }
        self.log
            .lock()
            .unwrap()
            .push(format!("chain#{} present_transition img{}", self.id, image_index));
        Ok(())
    }

    fn present(
        &mut self,
        image_index: u32,
        _wait_render_finished: &dyn RenderSignal,
    ) -> Result<PresentOutcome> {
        let outcome = self
            .present_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PresentOutcome::Presented);
        let entry = match outcome {
            PresentOutcome::Presented => {
                format!("chain#{} present img{} -> presented", self.id, image_index)
            }
            PresentOutcome::Suboptimal => {
                format!("chain#{} present img{} -> suboptimal", self.id, image_index)
            }
            PresentOutcome::OutOfDate => {
                format!("chain#{} present img{} -> out_of_date", self.id, image_index)
            }
        };
        self.log.lock().unwrap().push(entry);
        Ok(outcome)
    }

    fn image_count(&self) -> usize {
        self.images.len()
    }

    fn extent(&self) -> Extent2d {
        self.extent
    }

    fn format(&self) -> PixelFormat {
        self.format
    }
}

#[cfg(test)]
impl Drop for MockPresentationChain {
    fn drop(&mut self) {
        self.log.lock().unwrap().push(format!("destroy_chain#{}", self.id));
    }
}

// ============================================================================
// Mock SurfaceSource
// ============================================================================

/// Drawable size shared with the test through an `Arc` handle
#[cfg(test)]
pub struct MockSurfaceSource {
    drawable: Arc<Mutex<Extent2d>>,
}

#[cfg(test)]
impl MockSurfaceSource {
    pub fn new(drawable: Arc<Mutex<Extent2d>>) -> Self {
        Self { drawable }
    }
}

#[cfg(test)]
impl SurfaceSource for MockSurfaceSource {
    fn drawable_extent(&self) -> Extent2d {
        *self.drawable.lock().unwrap()
    }
}

// ============================================================================
// Mock FrameRenderer
// ============================================================================

#[cfg(test)]
pub struct MockFrameRenderer {
    log: Arc<Mutex<Vec<String>>>,
}

#[cfg(test)]
impl MockFrameRenderer {
    pub fn new(log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { log }
    }
}

#[cfg(test)]
impl FrameRenderer for MockFrameRenderer {
    fn record_draw_commands(
        &mut self,
        commands: &mut dyn CommandSequence,
        target: &dyn PresentImage,
        extent: Extent2d,
    ) -> Result<()> {
        let seq = unsafe { &*(commands as *const dyn CommandSequence as *const MockCommandSequence) };
        if !seq.recording {
            engine_bail!("aurora::mock", "draw recorded outside begin/end");
        }
        let image = unsafe { &*(target as *const dyn PresentImage as *const MockPresentImage) };
        self.log.lock().unwrap().push(format!(
            "draw img{} {}x{}",
            image.index, extent.width, extent.height
        ));
        Ok(())
    }
}

// ============================================================================
// Mock DeviceContext
// ============================================================================

/// Mock device whose knobs stay reachable after the device is boxed away
///
/// Clone the `Arc` fields before handing the device to an orchestrator;
/// the clones keep working. Scripted acquire/present outcomes are shared
/// with every chain this device creates, so a script survives a rebuild.
#[cfg(test)]
pub struct MockDeviceContext {
    /// Shared event journal
    pub log: Arc<Mutex<Vec<String>>>,
    /// Drawable size reported through capabilities (and by [`MockSurfaceSource`])
    pub drawable: Arc<Mutex<Extent2d>>,
    /// When set, capabilities report this instead of the drawable size
    pub caps_extent_override: Arc<Mutex<Option<Extent2d>>>,
    pub min_image_count: Arc<Mutex<u32>>,
    /// 0 means no upper bound
    pub max_image_count: Arc<Mutex<u32>>,
    pub formats: Arc<Mutex<Vec<SurfaceFormat>>>,
    /// Outcomes consumed before the default acquire behavior
    pub acquire_script: Arc<Mutex<VecDeque<AcquireOutcome>>>,
    /// Outcomes consumed before the default `Presented`
    pub present_script: Arc<Mutex<VecDeque<PresentOutcome>>>,
    /// One-shot failure injection for the next submit
    pub fail_next_submit: Arc<Mutex<bool>>,
    seq_counter: Mutex<u32>,
    signal_counter: Mutex<u32>,
    gate_counter: Mutex<u32>,
    chain_counter: Mutex<u32>,
}

#[cfg(test)]
impl MockDeviceContext {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            drawable: Arc::new(Mutex::new(Extent2d::new(800, 600))),
            caps_extent_override: Arc::new(Mutex::new(None)),
            min_image_count: Arc::new(Mutex::new(2)),
            max_image_count: Arc::new(Mutex::new(8)),
            formats: Arc::new(Mutex::new(vec![
                SurfaceFormat {
                    format: PixelFormat::B8G8R8A8_UNORM,
                    color_space: ColorSpace::SrgbNonlinear,
                },
                SurfaceFormat {
                    format: PixelFormat::B8G8R8A8_SRGB,
                    color_space: ColorSpace::SrgbNonlinear,
                },
                SurfaceFormat {
                    format: PixelFormat::R8G8B8A8_SRGB,
                    color_space: ColorSpace::SrgbNonlinear,
                },
            ])),
            acquire_script: Arc::new(Mutex::new(VecDeque::new())),
            present_script: Arc::new(Mutex::new(VecDeque::new())),
            fail_next_submit: Arc::new(Mutex::new(false)),
            seq_counter: Mutex::new(0),
            signal_counter: Mutex::new(0),
            gate_counter: Mutex::new(0),
            chain_counter: Mutex::new(0),
        }
    }

    /// Source backed by the same drawable handle as this device
    pub fn source(&self) -> MockSurfaceSource {
        MockSurfaceSource::new(self.drawable.clone())
    }
}

#[cfg(test)]
impl Default for MockDeviceContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl DeviceContext for MockDeviceContext {
    fn queue_family_index(&self) -> u32 {
        0
    }

    fn surface_capabilities(&self) -> Result<SurfaceCaps> {
        let current_extent = self
            .caps_extent_override
            .lock()
            .unwrap()
            .unwrap_or(*self.drawable.lock().unwrap());
        Ok(SurfaceCaps {
            min_image_count: *self.min_image_count.lock().unwrap(),
            max_image_count: *self.max_image_count.lock().unwrap(),
            current_extent,
            min_image_extent: Extent2d::new(1, 1),
            max_image_extent: Extent2d::new(16384, 16384),
        })
    }

    fn surface_formats(&self) -> Result<Vec<SurfaceFormat>> {
        Ok(self.formats.lock().unwrap().clone())
    }

    fn allocate_command_sequences(&self, count: usize) -> Result<Vec<Box<dyn CommandSequence>>> {
        let mut sequences: Vec<Box<dyn CommandSequence>> = Vec::with_capacity(count);
        for _ in 0..count {
            let mut counter = self.seq_counter.lock().unwrap();
            let id = *counter;
            *counter += 1;
            self.log.lock().unwrap().push(format!("create_seq#{}", id));
            sequences.push(Box::new(MockCommandSequence::new(id, self.log.clone())));
        }
        Ok(sequences)
    }

    fn create_render_signal(&self) -> Result<Box<dyn RenderSignal>> {
        let mut counter = self.signal_counter.lock().unwrap();
        let id = *counter;
        *counter += 1;
        self.log.lock().unwrap().push(format!("create_signal#{}", id));
        Ok(Box::new(MockRenderSignal { id }))
    }

    fn create_completion_gate(&self, signaled: bool) -> Result<Box<dyn CompletionGate>> {
        let mut counter = self.gate_counter.lock().unwrap();
        let id = *counter;
        *counter += 1;
        self.log.lock().unwrap().push(format!(
            "create_gate#{} {}",
            id,
            if signaled { "signaled" } else { "unsignaled" }
        ));
        Ok(Box::new(MockCompletionGate::new(id, signaled, self.log.clone())))
    }

    fn create_presentation(&self, config: &PresentationConfig) -> Result<Box<dyn PresentationChain>> {
        let mut counter = self.chain_counter.lock().unwrap();
        *counter += 1;
        let id = *counter;
        self.log.lock().unwrap().push(format!(
            "create_chain#{} {}x{}",
            id, config.extent.width, config.extent.height
        ));
        let images = (0..config.min_image_count)
            .map(|index| MockPresentImage {
                index,
                extent: config.extent,
            })
            .collect();
        Ok(Box::new(MockPresentationChain {
            id,
            extent: config.extent,
            format: config.format.format,
            images,
            next_image: 0,
            log: self.log.clone(),
            acquire_script: self.acquire_script.clone(),
            present_script: self.present_script.clone(),
        }))
    }

    fn submit(
        &self,
        commands: &dyn CommandSequence,
        _wait_image_available: &dyn RenderSignal,
        _signal_render_finished: &dyn RenderSignal,
        completion_gate: &dyn CompletionGate,
    ) -> Result<()> {
        if *self.fail_next_submit.lock().unwrap() {
            *self.fail_next_submit.lock().unwrap() = false;
            engine_bail!("aurora::mock", "injected submit failure");
        }
        let seq = unsafe { &*(commands as *const dyn CommandSequence as *const MockCommandSequence) };
        if seq.recording {
            engine_bail!("aurora::mock", "seq#{} submitted while still recording", seq.id);
        }
        let gate =
            unsafe { &*(completion_gate as *const dyn CompletionGate as *const MockCompletionGate) };
        if gate.is_signaled() {
            engine_bail!(
                "aurora::mock",
                "gate#{} submitted without being reset",
                gate.id
            );
        }
        gate.signal();
        self.log.lock().unwrap().push(format!("submit seq#{}", seq.id));
        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        self.log.lock().unwrap().push("wait_idle".to_string());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_device_tests.rs"]
mod tests;
