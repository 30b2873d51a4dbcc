/// Conversions between core presentation types and Vulkan enums

use ash::vk;
use aurora_present::aurora::present::{ColorSpace, PixelFormat, PresentMode};
use aurora_present::engine_warn;

pub(crate) fn pixel_format_to_vk(format: PixelFormat) -> vk::Format {
    match format {
        PixelFormat::B8G8R8A8_SRGB => vk::Format::B8G8R8A8_SRGB,
        PixelFormat::B8G8R8A8_UNORM => vk::Format::B8G8R8A8_UNORM,
        PixelFormat::R8G8B8A8_SRGB => vk::Format::R8G8B8A8_SRGB,
        PixelFormat::R8G8B8A8_UNORM => vk::Format::R8G8B8A8_UNORM,
    }
}

/// Returns `None` for Vulkan formats the core types do not model
pub(crate) fn vk_to_pixel_format(format: vk::Format) -> Option<PixelFormat> {
    match format {
        vk::Format::B8G8R8A8_SRGB => Some(PixelFormat::B8G8R8A8_SRGB),
        vk::Format::B8G8R8A8_UNORM => Some(PixelFormat::B8G8R8A8_UNORM),
        vk::Format::R8G8B8A8_SRGB => Some(PixelFormat::R8G8B8A8_SRGB),
        vk::Format::R8G8B8A8_UNORM => Some(PixelFormat::R8G8B8A8_UNORM),
        _ => None,
    }
}

pub(crate) fn color_space_to_vk(color_space: ColorSpace) -> vk::ColorSpaceKHR {
    match color_space {
        ColorSpace::SrgbNonlinear => vk::ColorSpaceKHR::SRGB_NONLINEAR,
        ColorSpace::ExtendedSrgbLinear => vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT,
    }
}

/// Returns `None` for Vulkan color spaces the core types do not model
pub(crate) fn vk_to_color_space(color_space: vk::ColorSpaceKHR) -> Option<ColorSpace> {
    match color_space {
        vk::ColorSpaceKHR::SRGB_NONLINEAR => Some(ColorSpace::SrgbNonlinear),
        vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT => Some(ColorSpace::ExtendedSrgbLinear),
        _ => None,
    }
}

pub(crate) fn present_mode_to_vk(mode: PresentMode) -> vk::PresentModeKHR {
    match mode {
        PresentMode::Fifo => vk::PresentModeKHR::FIFO,
        PresentMode::Mailbox => vk::PresentModeKHR::MAILBOX,
        PresentMode::Immediate => vk::PresentModeKHR::IMMEDIATE,
    }
}

/// Pick the requested present mode when the surface supports it
///
/// Falls back to FIFO, which every surface must support.
pub(crate) fn choose_present_mode(
    supported: &[vk::PresentModeKHR],
    requested: PresentMode,
) -> vk::PresentModeKHR {
    let wanted = present_mode_to_vk(requested);
    if supported.contains(&wanted) {
        wanted
    } else {
        engine_warn!(
            "aurora::vulkan",
            "Present mode {:?} unsupported, falling back to Fifo",
            requested
        );
        vk::PresentModeKHR::FIFO
    }
}

#[cfg(test)]
#[path = "vulkan_format_tests.rs"]
mod tests;
