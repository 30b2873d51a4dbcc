/// PresentationChain trait - one generation of the platform swapchain

use crate::error::Result;
use crate::present::{
    AcquireOutcome, CommandSequence, Extent2d, PixelFormat, PresentOutcome, RenderSignal,
};

/// One presentable image owned by the chain
pub trait PresentImage {
    /// Pixel extent of the image (equals the chain extent)
    fn extent(&self) -> Extent2d;
}

/// One generation of the presentation chain
///
/// Created by [`DeviceContext::create_presentation`] from a negotiated
/// [`PresentationConfig`]; destroyed wholesale (never mutated) when the
/// surface goes stale. All images and their derived per-image resources are
/// owned by the chain and die with it.
///
/// [`DeviceContext::create_presentation`]: crate::present::DeviceContext::create_presentation
/// [`PresentationConfig`]: crate::present::PresentationConfig
pub trait PresentationChain {
    /// Request the next presentable image index
    ///
    /// Asynchronous: the image is not ready when this returns; the device
    /// signals `signal_image_available` once it is. Out-of-date is an
    /// ordinary outcome, not an error.
    fn acquire_image(
        &mut self,
        signal_image_available: &dyn RenderSignal,
    ) -> Result<AcquireOutcome>;

    /// Access an owned image by acquire index
    fn image(&self, image_index: u32) -> Result<&dyn PresentImage>;

    /// Record the transition of an image into the renderable layout
    ///
    /// Must be recorded before any draw work targets the image.
    fn record_render_transition(
        &self,
        commands: &mut dyn CommandSequence,
        image_index: u32,
    ) -> Result<()>;

    /// Record the transition of an image into the presentable layout
    ///
    /// Must be recorded after all draw work targeting the image.
    fn record_present_transition(
        &self,
        commands: &mut dyn CommandSequence,
        image_index: u32,
    ) -> Result<()>;

    /// Hand an image back to the platform for display
    ///
    /// Presentation waits for `wait_render_finished` on the device timeline.
    /// Out-of-date and suboptimal are ordinary outcomes, not errors.
    fn present(
        &mut self,
        image_index: u32,
        wait_render_finished: &dyn RenderSignal,
    ) -> Result<PresentOutcome>;

    /// Number of presentable images in this generation
    fn image_count(&self) -> usize;

    /// Extent this generation was built with
    fn extent(&self) -> Extent2d;

    /// Pixel format this generation was built with
    fn format(&self) -> PixelFormat;
}
