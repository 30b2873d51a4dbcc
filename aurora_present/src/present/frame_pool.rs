/// Frame Resource Pool - fixed ring of per-frame slots

use crate::engine_debug;
use crate::error::{Error, Result};
use crate::present::{CommandSequence, CompletionGate, DeviceContext, RenderSignal};

/// One in-flight frame's resources
///
/// The gate starts signaled so the slot's first wait never blocks. The two
/// signals order device work within one cycle: acquire → execute → present.
pub struct FrameSlot {
    /// Recordable command sequence, rebuilt from scratch each cycle
    pub commands: Box<dyn CommandSequence>,
    /// Signaled by the device when the acquired image is ready to write
    pub image_available: Box<dyn RenderSignal>,
    /// Signaled by the device when this slot's draw work completes
    pub render_finished: Box<dyn RenderSignal>,
    /// Host-waitable gate observing this slot's submission completion
    pub in_flight: Box<dyn CompletionGate>,
}

/// Pool lifecycle; slots exist only in `Ready`
enum PoolState {
    Empty,
    Ready(Vec<FrameSlot>),
    Retired,
}

/// Fixed-size ring of frame slots, allocated once per device lifetime
///
/// Slots are never destroyed individually. The pool moves `Empty → Ready`
/// on [`initialize`](FramePool::initialize) and `Ready → Retired` on
/// [`teardown`](FramePool::teardown); both transitions require the caller
/// to hold the documented device-idle preconditions.
pub struct FramePool {
    state: PoolState,
}

impl FramePool {
    pub fn new() -> Self {
        Self {
            state: PoolState::Empty,
        }
    }

    /// Allocate `count` slots: one command sequence plus three sync
    /// primitives each, gates pre-signaled
    ///
    /// # Arguments
    ///
    /// * `device` - Device context to allocate against
    /// * `count` - Number of frames in flight (N ≥ 1)
    ///
    /// # Errors
    ///
    /// Any allocation failure is fatal to the run and propagates. Calling
    /// on a non-empty pool is an invalid-state error.
    pub fn initialize(&mut self, device: &dyn DeviceContext, count: usize) -> Result<()> {
        if !matches!(self.state, PoolState::Empty) {
            return Err(Error::InvalidState(
                "frame pool is already initialized".to_string(),
            ));
        }
        if count == 0 {
            return Err(Error::InitializationFailed(
                "frame pool needs at least one slot".to_string(),
            ));
        }

        let sequences = device.allocate_command_sequences(count)?;

        let mut slots = Vec::with_capacity(count);
        for commands in sequences {
            slots.push(FrameSlot {
                commands,
                image_available: device.create_render_signal()?,
                render_finished: device.create_render_signal()?,
                in_flight: device.create_completion_gate(true)?,
            });
        }

        engine_debug!("aurora::FramePool", "Allocated {} frame slots", count);
        self.state = PoolState::Ready(slots);
        Ok(())
    }

    /// Number of frames in flight (0 unless ready)
    pub fn frames_in_flight(&self) -> usize {
        match &self.state {
            PoolState::Ready(slots) => slots.len(),
            _ => 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, PoolState::Ready(_))
    }

    pub fn is_retired(&self) -> bool {
        matches!(self.state, PoolState::Retired)
    }

    /// Slot at the given cursor
    ///
    /// The orchestrator's modulo invariant keeps the cursor in range; an
    /// out-of-range index or a non-ready pool is a contract violation
    /// surfaced as an invalid-state error.
    pub fn slot(&self, index: usize) -> Result<&FrameSlot> {
        match &self.state {
            PoolState::Ready(slots) => slots
                .get(index)
                .ok_or_else(|| Error::InvalidState(format!("no frame slot at index {}", index))),
            _ => Err(Error::InvalidState("frame pool is not ready".to_string())),
        }
    }

    /// Mutable slot at the given cursor
    pub fn slot_mut(&mut self, index: usize) -> Result<&mut FrameSlot> {
        match &mut self.state {
            PoolState::Ready(slots) => slots
                .get_mut(index)
                .ok_or_else(|| Error::InvalidState(format!("no frame slot at index {}", index))),
            _ => Err(Error::InvalidState("frame pool is not ready".to_string())),
        }
    }

    /// Batch-replace every slot's signals and gate (gates pre-signaled)
    ///
    /// Required after a surface rebuild: gates cannot be re-signaled from
    /// the host, and an acquire signal may hold a stale pending operation
    /// from an aborted cycle. Legal only while ready and with the device
    /// idle; command sequences are kept.
    pub fn rearm(&mut self, device: &dyn DeviceContext) -> Result<()> {
        let slots = match &mut self.state {
            PoolState::Ready(slots) => slots,
            _ => {
                return Err(Error::InvalidState(
                    "cannot rearm a frame pool that is not ready".to_string(),
                ))
            }
        };

        for slot in slots.iter_mut() {
            slot.image_available = device.create_render_signal()?;
            slot.render_finished = device.create_render_signal()?;
            slot.in_flight = device.create_completion_gate(true)?;
        }

        engine_debug!(
            "aurora::FramePool",
            "Rearmed sync primitives for {} slots",
            slots.len()
        );
        Ok(())
    }

    /// Release all slots as a single batch
    ///
    /// Legal only after the device is confirmed idle. Idempotent: a retired
    /// or never-initialized pool retires silently.
    pub fn teardown(&mut self) {
        if let PoolState::Ready(slots) = &self.state {
            engine_debug!("aurora::FramePool", "Releasing {} frame slots", slots.len());
        }
        self.state = PoolState::Retired;
    }
}

impl Default for FramePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "frame_pool_tests.rs"]
mod tests;
