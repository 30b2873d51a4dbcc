/// Presentation Surface Manager - owns the presentation chain lifecycle
///
/// Wraps one presentation chain and the negotiation that produces it:
/// surface format selection, extent resolution and image-count clamping.
/// The manager never destroys a chain while work may still be in flight;
/// the rebuild path quiesces the device exactly once before tearing the
/// old chain down.

use crate::error::{Error, Result};
use crate::present::{
    ColorSpace, DeviceContext, Extent2d, PixelFormat, PresentMode, PresentationChain,
    PresentationConfig, SurfaceCaps, SurfaceFormat, SurfaceSource,
};
use crate::{engine_debug, engine_error, engine_info};

/// Observable lifecycle of the managed surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceLifecycle {
    /// No chain has been built yet
    Uninitialized,
    /// A chain exists and can serve acquire/present
    Live,
    /// The chain is gone for good; only teardown remains
    Retired,
}

/// Result of a rebuild attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// A fresh chain is live; in-flight bookkeeping must be re-armed
    Rebuilt,
    /// The surface cannot host a chain right now (degenerate extent);
    /// nothing was destroyed, try again later
    NotReady,
}

enum SurfaceState {
    Uninitialized,
    Live(Box<dyn PresentationChain>),
    Retired,
}

/// Owns the presentation chain and rebuilds it when it goes stale
pub struct SurfaceManager {
    state: SurfaceState,
    /// Sticky flag set by acquire/present feedback, cleared on rebuild
    out_of_date: bool,
    preferred_formats: Vec<PixelFormat>,
    present_mode: PresentMode,
}

impl SurfaceManager {
    /// # Arguments
    ///
    /// * `preferred_formats` - Pixel formats in descending preference,
    ///   matched against the surface's reported formats
    /// * `present_mode` - Requested presentation mode (the backend may
    ///   substitute a universally supported one)
    pub fn new(preferred_formats: Vec<PixelFormat>, present_mode: PresentMode) -> Self {
        Self {
            state: SurfaceState::Uninitialized,
            out_of_date: false,
            preferred_formats,
            present_mode,
        }
    }

    pub fn lifecycle(&self) -> SurfaceLifecycle {
        match self.state {
            SurfaceState::Uninitialized => SurfaceLifecycle::Uninitialized,
            SurfaceState::Live(_) => SurfaceLifecycle::Live,
            SurfaceState::Retired => SurfaceLifecycle::Retired,
        }
    }

    /// Build the initial presentation chain
    ///
    /// Negotiates format, extent and image count against the surface
    /// capabilities and creates the chain.
    ///
    /// # Errors
    ///
    /// Fails if a chain already exists or the manager is retired, if the
    /// resolved extent is degenerate, or if the surface reports no usable
    /// format. Runtime-tolerant variants of these conditions belong to
    /// [`rebuild`](SurfaceManager::rebuild).
    pub fn build(&mut self, device: &dyn DeviceContext, source: &dyn SurfaceSource) -> Result<()> {
        match self.state {
            SurfaceState::Uninitialized => {}
            SurfaceState::Live(_) => {
                return Err(Error::InvalidState(
                    "presentation chain already built".to_string(),
                ))
            }
            SurfaceState::Retired => {
                return Err(Error::InvalidState(
                    "surface manager is retired".to_string(),
                ))
            }
        }

        let caps = device.surface_capabilities()?;
        let extent = resolve_extent(&caps, source.drawable_extent());
        if extent.is_degenerate() {
            return Err(Error::InitializationFailed(
                "cannot build a presentation chain for a degenerate drawable area".to_string(),
            ));
        }

        let chain = self.negotiate(device, extent, &caps)?;
        self.state = SurfaceState::Live(chain);
        self.out_of_date = false;
        Ok(())
    }

    /// Whether the chain no longer matches the surface it presents to
    ///
    /// True when acquire/present flagged the chain out of date or when the
    /// drawable area diverged from the chain extent. An unbuilt surface is
    /// always stale; a retired one never is.
    pub fn is_stale(&self, source: &dyn SurfaceSource) -> bool {
        match &self.state {
            SurfaceState::Uninitialized => true,
            SurfaceState::Retired => false,
            SurfaceState::Live(chain) => {
                self.out_of_date || source.drawable_extent() != chain.extent()
            }
        }
    }

    /// Record device feedback that the chain went out of date
    pub fn mark_out_of_date(&mut self) {
        self.out_of_date = true;
    }

    /// Tear down the stale chain and negotiate a fresh one
    ///
    /// Capabilities are checked before anything is destroyed: if the
    /// surface cannot host a chain right now the old one stays untouched
    /// and the call reports [`RebuildOutcome::NotReady`]. Otherwise the
    /// device is quiesced exactly once, the old chain is destroyed, and
    /// negotiation runs again from scratch.
    ///
    /// After `Rebuilt` the caller must re-arm any sync bookkeeping tied to
    /// the old chain before acquiring again.
    ///
    /// # Errors
    ///
    /// Fails on a retired manager and on any device error during
    /// quiescing or chain creation.
    pub fn rebuild(
        &mut self,
        device: &dyn DeviceContext,
        source: &dyn SurfaceSource,
    ) -> Result<RebuildOutcome> {
        if matches!(self.state, SurfaceState::Retired) {
            return Err(Error::InvalidState(
                "surface manager is retired".to_string(),
            ));
        }

        let caps = device.surface_capabilities()?;
        let extent = resolve_extent(&caps, source.drawable_extent());
        if extent.is_degenerate() {
            engine_debug!(
                "aurora::SurfaceManager",
                "Surface not ready for a presentation chain (degenerate extent)"
            );
            return Ok(RebuildOutcome::NotReady);
        }

        if matches!(self.state, SurfaceState::Live(_)) {
            engine_debug!("aurora::SurfaceManager", "Rebuilding presentation chain");
            device.wait_idle()?;
            // Destroy before creating: the old chain keeps the surface
            // exclusively until it is gone
            self.state = SurfaceState::Uninitialized;
        }

        let chain = self.negotiate(device, extent, &caps)?;
        self.state = SurfaceState::Live(chain);
        self.out_of_date = false;
        Ok(RebuildOutcome::Rebuilt)
    }

    /// Destroy the chain for good; idempotent
    ///
    /// The caller must have quiesced the device first.
    pub fn retire(&mut self) {
        if matches!(self.state, SurfaceState::Live(_)) {
            engine_debug!("aurora::SurfaceManager", "Retiring presentation chain");
        }
        self.state = SurfaceState::Retired;
    }

    pub fn chain(&self) -> Result<&dyn PresentationChain> {
        match &self.state {
            SurfaceState::Live(chain) => Ok(chain.as_ref()),
            _ => Err(Error::InvalidState("no live presentation chain".to_string())),
        }
    }

    pub fn chain_mut(&mut self) -> Result<&mut dyn PresentationChain> {
        match &mut self.state {
            SurfaceState::Live(chain) => Ok(chain.as_mut()),
            _ => Err(Error::InvalidState("no live presentation chain".to_string())),
        }
    }

    /// Run format negotiation and create a chain for `extent`
    fn negotiate(
        &self,
        device: &dyn DeviceContext,
        extent: Extent2d,
        caps: &SurfaceCaps,
    ) -> Result<Box<dyn PresentationChain>> {
        let reported = device.surface_formats()?;
        let format = match select_surface_format(&reported, &self.preferred_formats) {
            Some(format) => format,
            None => {
                engine_error!("aurora::SurfaceManager", "Surface reports no usable formats");
                return Err(Error::InitializationFailed(
                    "surface reports no usable formats".to_string(),
                ));
            }
        };

        let config = PresentationConfig {
            extent,
            format,
            present_mode: self.present_mode,
            min_image_count: clamp_image_count(caps),
        };
        let chain = device.create_presentation(&config)?;

        engine_info!(
            "aurora::SurfaceManager",
            "Presentation chain ready: {}x{}, {:?}, {} images",
            extent.width,
            extent.height,
            format.format,
            chain.image_count()
        );
        Ok(chain)
    }
}

// ============================================================================
// Negotiation helpers
// ============================================================================

/// Pick a surface format, preferring sRGB-encoded formats in the sRGB
/// nonlinear color space
///
/// Walks `preferred` in order and returns the first entry the surface
/// reports with the sRGB nonlinear color space. When no preference
/// matches, the first reported sRGB-nonlinear pair wins; when the surface
/// reports no sRGB-nonlinear pair at all, the first reported pair wins.
/// Every tier is a deterministic first match, so the choice is stable
/// across runs. Returns `None` only for an empty report.
pub fn select_surface_format(
    reported: &[SurfaceFormat],
    preferred: &[PixelFormat],
) -> Option<SurfaceFormat> {
    for &want in preferred {
        if let Some(found) = reported
            .iter()
            .find(|f| f.format == want && f.color_space == ColorSpace::SrgbNonlinear)
        {
            return Some(*found);
        }
    }
    if let Some(found) = reported
        .iter()
        .find(|f| f.color_space == ColorSpace::SrgbNonlinear)
    {
        return Some(*found);
    }
    reported.first().copied()
}

/// Request one image more than the reported minimum, clamped to the
/// reported maximum when one exists (`max_image_count == 0` means the
/// surface imposes no upper bound)
pub fn clamp_image_count(caps: &SurfaceCaps) -> u32 {
    let count = caps.min_image_count + 1;
    if caps.max_image_count > 0 {
        count.min(caps.max_image_count)
    } else {
        count
    }
}

/// Resolve the chain extent from surface capabilities
///
/// A definite `current_extent` is used verbatim. The all-ones sentinel
/// means the surface takes its size from the chain, so the drawable size
/// is clamped into the supported extent range instead.
pub fn resolve_extent(caps: &SurfaceCaps, drawable: Extent2d) -> Extent2d {
    let sentinel =
        caps.current_extent.width == u32::MAX && caps.current_extent.height == u32::MAX;
    if !sentinel {
        return caps.current_extent;
    }
    Extent2d {
        width: drawable.width.clamp(caps.min_image_extent.width, caps.max_image_extent.width),
        height: drawable
            .height
            .clamp(caps.min_image_extent.height, caps.max_image_extent.height),
    }
}

#[cfg(test)]
#[path = "surface_manager_tests.rs"]
mod tests;
