/// Presentation value types: extents, formats, capabilities, outcomes

/// Pixel extent of a drawable or presentable image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent2d {
    pub width: u32,
    pub height: u32,
}

impl Extent2d {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (e.g. minimized window).
    /// A degenerate extent can never back a presentation surface.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Presentable image pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum PixelFormat {
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
}

/// Color space of a (format, color space) surface pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Canonical non-linear sRGB presentation color space
    SrgbNonlinear,
    /// Linear extended sRGB (scRGB), reported by HDR-capable surfaces
    ExtendedSrgbLinear,
}

/// One supported (pixel format, color space) pair reported by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFormat {
    pub format: PixelFormat,
    pub color_space: ColorSpace,
}

/// Surface capability report used for extent and image-count negotiation
///
/// `max_image_count == 0` means the surface imposes no upper bound.
/// `current_extent` of (u32::MAX, u32::MAX) is the platform sentinel for
/// "extent is decided by the client"; see
/// [`resolve_extent`](crate::present::surface_manager::resolve_extent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCaps {
    pub min_image_count: u32,
    pub max_image_count: u32,
    pub current_extent: Extent2d,
    pub min_image_extent: Extent2d,
    pub max_image_extent: Extent2d,
}

/// Presentation pacing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentMode {
    /// Queue-and-wait, always supported
    Fifo,
    /// Low-latency triple buffering where supported
    Mailbox,
    /// No pacing, may tear
    Immediate,
}

/// Fully negotiated parameters for one presentation chain generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationConfig {
    pub extent: Extent2d,
    pub format: SurfaceFormat,
    pub present_mode: PresentMode,
    pub min_image_count: u32,
}

/// Result of an acquire call against the presentation chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// An image is available; `suboptimal` means it is usable but the
    /// surface should be rebuilt soon
    Acquired { image_index: u32, suboptimal: bool },
    /// The chain no longer matches the surface; nothing was acquired
    OutOfDate,
}

/// Result of a present call against the presentation chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    /// Image handed to the platform
    Presented,
    /// Image handed to the platform, but the chain should be rebuilt
    Suboptimal,
    /// The platform refused the image; the chain must be rebuilt
    OutOfDate,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
