//! Unit tests for Vulkan format conversions
//!
//! Pure conversion functions, no GPU required.

use super::*;

// ============================================================================
// PIXEL FORMAT TESTS
// ============================================================================

#[test]
fn test_pixel_format_to_vk_mapping() {
    assert_eq!(
        pixel_format_to_vk(PixelFormat::B8G8R8A8_SRGB),
        vk::Format::B8G8R8A8_SRGB
    );
    assert_eq!(
        pixel_format_to_vk(PixelFormat::B8G8R8A8_UNORM),
        vk::Format::B8G8R8A8_UNORM
    );
    assert_eq!(
        pixel_format_to_vk(PixelFormat::R8G8B8A8_SRGB),
        vk::Format::R8G8B8A8_SRGB
    );
    assert_eq!(
        pixel_format_to_vk(PixelFormat::R8G8B8A8_UNORM),
        vk::Format::R8G8B8A8_UNORM
    );
}

#[test]
fn test_vk_to_pixel_format_mapping() {
    assert_eq!(
        vk_to_pixel_format(vk::Format::B8G8R8A8_SRGB),
        Some(PixelFormat::B8G8R8A8_SRGB)
    );
    assert_eq!(
        vk_to_pixel_format(vk::Format::R8G8B8A8_UNORM),
        Some(PixelFormat::R8G8B8A8_UNORM)
    );
}

#[test]
fn test_vk_to_pixel_format_unknown_is_none() {
    assert_eq!(vk_to_pixel_format(vk::Format::R16G16B16A16_SFLOAT), None);
    assert_eq!(vk_to_pixel_format(vk::Format::D32_SFLOAT), None);
    assert_eq!(vk_to_pixel_format(vk::Format::A2B10G10R10_UNORM_PACK32), None);
}

// ============================================================================
// COLOR SPACE TESTS
// ============================================================================

#[test]
fn test_color_space_mapping() {
    assert_eq!(
        color_space_to_vk(ColorSpace::SrgbNonlinear),
        vk::ColorSpaceKHR::SRGB_NONLINEAR
    );
    assert_eq!(
        color_space_to_vk(ColorSpace::ExtendedSrgbLinear),
        vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT
    );
    assert_eq!(
        vk_to_color_space(vk::ColorSpaceKHR::SRGB_NONLINEAR),
        Some(ColorSpace::SrgbNonlinear)
    );
}

#[test]
fn test_vk_to_color_space_unknown_is_none() {
    assert_eq!(
        vk_to_color_space(vk::ColorSpaceKHR::DISPLAY_P3_NONLINEAR_EXT),
        None
    );
    assert_eq!(vk_to_color_space(vk::ColorSpaceKHR::HDR10_ST2084_EXT), None);
}

// ============================================================================
// PRESENT MODE TESTS
// ============================================================================

#[test]
fn test_present_mode_mapping() {
    assert_eq!(present_mode_to_vk(PresentMode::Fifo), vk::PresentModeKHR::FIFO);
    assert_eq!(
        present_mode_to_vk(PresentMode::Mailbox),
        vk::PresentModeKHR::MAILBOX
    );
    assert_eq!(
        present_mode_to_vk(PresentMode::Immediate),
        vk::PresentModeKHR::IMMEDIATE
    );
}

#[test]
fn test_choose_present_mode_prefers_requested() {
    let supported = [
        vk::PresentModeKHR::FIFO,
        vk::PresentModeKHR::MAILBOX,
        vk::PresentModeKHR::IMMEDIATE,
    ];
    assert_eq!(
        choose_present_mode(&supported, PresentMode::Mailbox),
        vk::PresentModeKHR::MAILBOX
    );
    assert_eq!(
        choose_present_mode(&supported, PresentMode::Immediate),
        vk::PresentModeKHR::IMMEDIATE
    );
}

#[test]
fn test_choose_present_mode_falls_back_to_fifo() {
    let supported = [vk::PresentModeKHR::FIFO];
    assert_eq!(
        choose_present_mode(&supported, PresentMode::Mailbox),
        vk::PresentModeKHR::FIFO
    );

    // Even an empty report falls back rather than failing
    assert_eq!(
        choose_present_mode(&[], PresentMode::Immediate),
        vk::PresentModeKHR::FIFO
    );
}
