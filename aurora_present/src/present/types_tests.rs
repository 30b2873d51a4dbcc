//! Unit tests for types.rs
//!
//! Tests Extent2d degeneracy, value-type equality, and outcome enums.

use crate::present::types::*;

// ============================================================================
// EXTENT TESTS
// ============================================================================

#[test]
fn test_extent_new() {
    let extent = Extent2d::new(800, 600);
    assert_eq!(extent.width, 800);
    assert_eq!(extent.height, 600);
}

#[test]
fn test_extent_degenerate_zero_width() {
    assert!(Extent2d::new(0, 600).is_degenerate());
}

#[test]
fn test_extent_degenerate_zero_height() {
    assert!(Extent2d::new(800, 0).is_degenerate());
}

#[test]
fn test_extent_degenerate_both_zero() {
    assert!(Extent2d::new(0, 0).is_degenerate());
}

#[test]
fn test_extent_not_degenerate() {
    assert!(!Extent2d::new(1, 1).is_degenerate());
    assert!(!Extent2d::new(800, 600).is_degenerate());
}

#[test]
fn test_extent_equality() {
    assert_eq!(Extent2d::new(800, 600), Extent2d::new(800, 600));
    assert_ne!(Extent2d::new(800, 600), Extent2d::new(1024, 768));
}

// ============================================================================
// SURFACE FORMAT TESTS
// ============================================================================

#[test]
fn test_surface_format_equality() {
    let a = SurfaceFormat {
        format: PixelFormat::B8G8R8A8_SRGB,
        color_space: ColorSpace::SrgbNonlinear,
    };
    let b = SurfaceFormat {
        format: PixelFormat::B8G8R8A8_SRGB,
        color_space: ColorSpace::SrgbNonlinear,
    };
    let c = SurfaceFormat {
        format: PixelFormat::R8G8B8A8_UNORM,
        color_space: ColorSpace::SrgbNonlinear,
    };

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_pixel_format_copy() {
    let f1 = PixelFormat::R8G8B8A8_SRGB;
    let f2 = f1; // Copy, not move
    assert_eq!(f1, f2);
}

// ============================================================================
// OUTCOME ENUM TESTS
// ============================================================================

#[test]
fn test_acquire_outcome_fields() {
    let acquired = AcquireOutcome::Acquired {
        image_index: 2,
        suboptimal: false,
    };

    match acquired {
        AcquireOutcome::Acquired {
            image_index,
            suboptimal,
        } => {
            assert_eq!(image_index, 2);
            assert!(!suboptimal);
        }
        AcquireOutcome::OutOfDate => panic!("expected Acquired"),
    }
}

#[test]
fn test_acquire_outcome_equality() {
    assert_eq!(AcquireOutcome::OutOfDate, AcquireOutcome::OutOfDate);
    assert_ne!(
        AcquireOutcome::Acquired {
            image_index: 0,
            suboptimal: false
        },
        AcquireOutcome::OutOfDate
    );
}

#[test]
fn test_present_outcome_equality() {
    assert_eq!(PresentOutcome::Presented, PresentOutcome::Presented);
    assert_ne!(PresentOutcome::Presented, PresentOutcome::Suboptimal);
    assert_ne!(PresentOutcome::Suboptimal, PresentOutcome::OutOfDate);
}

// ============================================================================
// PRESENTATION CONFIG TESTS
// ============================================================================

#[test]
fn test_presentation_config_copy_and_equality() {
    let config = PresentationConfig {
        extent: Extent2d::new(800, 600),
        format: SurfaceFormat {
            format: PixelFormat::B8G8R8A8_SRGB,
            color_space: ColorSpace::SrgbNonlinear,
        },
        present_mode: PresentMode::Fifo,
        min_image_count: 3,
    };

    let copy = config;
    assert_eq!(config, copy);
    assert_eq!(copy.min_image_count, 3);
    assert_eq!(copy.present_mode, PresentMode::Fifo);
}
