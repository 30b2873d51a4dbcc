/// FrameRenderer trait - the external drawing collaborator

use crate::error::Result;
use crate::present::{CommandSequence, Extent2d, PresentImage};

/// Draw-work provider invoked once per frame cycle
///
/// Called during the Record state with the sequence already recording and
/// the target image already transitioned into the renderable layout. The
/// implementation records draw commands only: it must not record layout
/// transitions and must not touch synchronization primitives. The
/// orchestrator and chain own both boundaries.
pub trait FrameRenderer {
    /// Record this frame's draw commands
    ///
    /// # Arguments
    ///
    /// * `commands` - The recording command sequence
    /// * `target` - The acquired presentable image
    /// * `extent` - Current chain extent
    fn record_draw_commands(
        &mut self,
        commands: &mut dyn CommandSequence,
        target: &dyn PresentImage,
        extent: Extent2d,
    ) -> Result<()>;
}
