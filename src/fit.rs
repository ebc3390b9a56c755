//! Fit resolution: mapping an intrinsic SVG size to concrete raster pixels.
//!
//! An SVG declares a floating point intrinsic size; a caller asks for output
//! at some [`FitSpec`]. [`resolve`] turns the two into exact pixel
//! dimensions plus the per-axis scale factors the backend needs, preserving
//! the source aspect ratio for every spec except the trivial ones where it
//! is already implied.
//!
//! All dimensions are rounded to integer pixel edges independently per axis
//! using round-half-away-from-zero, so the resolved aspect ratio may deviate
//! from the source by up to one pixel of rounding. That is accepted rounding
//! error, not a bug.

use crate::error::{Error, Result};
use crate::geometry::{round_half_away_from_zero, PixelSize, Size};

/// How an intrinsic SVG size is mapped to output raster dimensions.
///
/// All variants produce proportional scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitSpec {
    /// Use the intrinsic size unchanged.
    Original,
    /// Scale both axes by a factor. Must be > 0.
    Zoom(f32),
    /// Fit to an exact output width; height follows from the source aspect
    /// ratio. Must be >= 1.
    FitWidth(f32),
    /// Fit to an exact output height; width follows from the source aspect
    /// ratio. Must be >= 1.
    FitHeight(f32),
    /// Fit inside a bounding box while preserving the source aspect ratio;
    /// the output never exceeds the box on either axis and may be smaller
    /// than it on one. Both bounds must be >= 1.
    FitBounds {
        /// Bounding box width in pixels
        width: f32,
        /// Bounding box height in pixels
        height: f32,
    },
}

/// The outcome of fit resolution: exact output dimensions plus the scale
/// factors relating them back to the intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFit {
    /// Output raster dimensions
    pub size: PixelSize,
    /// Horizontal scale from intrinsic units to output pixels
    pub scale_x: f32,
    /// Vertical scale from intrinsic units to output pixels
    pub scale_y: f32,
}

/// Resolve a fit specification against an intrinsic size.
///
/// Fit-direction tie-break for [`FitSpec::FitBounds`]: when the source
/// aspect ratio is less than or equal to the destination aspect ratio the
/// output is fit to the destination height (both directions produce the same
/// box at exact equality; the rule is fixed here so the behavior is
/// deterministic).
///
/// # Errors
///
/// - [`Error::EmptyScene`] for a zero-area intrinsic size under `Original`
///   or `Zoom`, or when rounding collapses the output to a zero pixel edge.
/// - [`Error::DegenerateAspectRatio`] when an aspect-derived spec meets an
///   intrinsic size with a zero dimension.
/// - [`Error::InvalidFitValue`] for a non-positive zoom factor or a fit
///   target below one pixel.
///
/// # Examples
///
/// ```
/// use svg_oxide::fit::{resolve, FitSpec};
/// use svg_oxide::geometry::Size;
///
/// let fit = resolve(Size::new(100.0, 50.0), FitSpec::FitWidth(50.0)).unwrap();
/// assert_eq!((fit.size.width, fit.size.height), (50, 25));
/// ```
pub fn resolve(intrinsic: Size, spec: FitSpec) -> Result<ResolvedFit> {
    match spec {
        FitSpec::Original => {
            if intrinsic.is_empty() {
                return Err(Error::EmptyScene {
                    width: 0,
                    height: 0,
                });
            }
            finish(intrinsic, intrinsic.width, intrinsic.height)
        },
        FitSpec::Zoom(factor) => {
            // The negated comparison also rejects NaN.
            if !(factor > 0.0) {
                return Err(Error::InvalidFitValue {
                    value: factor,
                    reason: "zoom factor must be positive",
                });
            }
            if intrinsic.is_empty() {
                return Err(Error::EmptyScene {
                    width: 0,
                    height: 0,
                });
            }
            let factor = f64::from(factor);
            finish(intrinsic, intrinsic.width * factor, intrinsic.height * factor)
        },
        FitSpec::FitWidth(px) => {
            let px = validate_target(px)?;
            let aspect = aspect_or_degenerate(intrinsic)?;
            finish(intrinsic, px, px / aspect)
        },
        FitSpec::FitHeight(px) => {
            let px = validate_target(px)?;
            let aspect = aspect_or_degenerate(intrinsic)?;
            finish(intrinsic, px * aspect, px)
        },
        FitSpec::FitBounds { width, height } => {
            let bounds_w = validate_target(width)?;
            let bounds_h = validate_target(height)?;
            let src_aspect = aspect_or_degenerate(intrinsic)?;
            let dst_aspect = bounds_w / bounds_h;

            if src_aspect <= dst_aspect {
                // Source is narrower than (or matches) the destination:
                // fit to height, derived width stays within bounds_w.
                finish(intrinsic, bounds_h * src_aspect, bounds_h)
            } else {
                // Source is wider: fit to width, derived height stays
                // within bounds_h.
                finish(intrinsic, bounds_w, bounds_w / src_aspect)
            }
        },
    }
}

/// Fit targets mirror the engine contract: a fit-to-width/height/bounds
/// value below one pixel is a caller error.
fn validate_target(px: f32) -> Result<f64> {
    if !(px >= 1.0) {
        return Err(Error::InvalidFitValue {
            value: px,
            reason: "fit target must be at least one pixel",
        });
    }
    Ok(f64::from(px))
}

fn aspect_or_degenerate(intrinsic: Size) -> Result<f64> {
    intrinsic.aspect_ratio().ok_or(Error::DegenerateAspectRatio {
        width: intrinsic.width,
        height: intrinsic.height,
    })
}

/// Round both axes to pixel edges and derive the scale hint.
fn finish(intrinsic: Size, width: f64, height: f64) -> Result<ResolvedFit> {
    let out_w = round_half_away_from_zero(width);
    let out_h = round_half_away_from_zero(height);

    if out_w > f64::from(u32::MAX) || out_h > f64::from(u32::MAX) {
        return Err(Error::InvalidDimensions {
            width: u32::MAX,
            height: u32::MAX,
        });
    }

    let size = PixelSize::new(out_w as u32, out_h as u32);
    if size.is_empty() {
        return Err(Error::EmptyScene {
            width: size.width,
            height: size.height,
        });
    }

    Ok(ResolvedFit {
        size,
        scale_x: (f64::from(size.width) / intrinsic.width) as f32,
        scale_y: (f64::from(size.height) / intrinsic.height) as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(fit: ResolvedFit) -> (u32, u32) {
        (fit.size.width, fit.size.height)
    }

    #[test]
    fn test_original_keeps_intrinsic_size() {
        let fit = resolve(Size::new(100.0, 50.0), FitSpec::Original).unwrap();
        assert_eq!(dims(fit), (100, 50));
        assert_eq!(fit.scale_x, 1.0);
        assert_eq!(fit.scale_y, 1.0);
    }

    #[test]
    fn test_original_rounds_fractional_intrinsic_size() {
        let fit = resolve(Size::new(100.5, 49.4), FitSpec::Original).unwrap();
        assert_eq!(dims(fit), (101, 49));
    }

    #[test]
    fn test_original_empty_scene() {
        let err = resolve(Size::new(0.0, 0.0), FitSpec::Original).unwrap_err();
        assert!(matches!(err, Error::EmptyScene { .. }));
    }

    #[test]
    fn test_identity_zoom_is_noop() {
        let fit = resolve(Size::new(100.0, 50.0), FitSpec::Zoom(1.0)).unwrap();
        assert_eq!(dims(fit), (100, 50));
    }

    #[test]
    fn test_zoom_scales_each_axis() {
        let fit = resolve(Size::new(100.0, 50.0), FitSpec::Zoom(2.5)).unwrap();
        assert_eq!(dims(fit), (250, 125));
    }

    #[test]
    fn test_zoom_rounds_half_away_from_zero() {
        // 33 * 1.5 = 49.5 on both axes
        let fit = resolve(Size::new(33.0, 33.0), FitSpec::Zoom(1.5)).unwrap();
        assert_eq!(dims(fit), (50, 50));
    }

    #[test]
    fn test_zoom_rejects_non_positive_factor() {
        for factor in [0.0, -1.0, f32::NAN] {
            let err = resolve(Size::new(100.0, 50.0), FitSpec::Zoom(factor)).unwrap_err();
            assert!(matches!(err, Error::InvalidFitValue { .. }));
        }
    }

    #[test]
    fn test_zoom_collapsing_to_zero_is_empty() {
        let err = resolve(Size::new(100.0, 50.0), FitSpec::Zoom(0.001)).unwrap_err();
        assert!(matches!(err, Error::EmptyScene { .. }));
    }

    #[test]
    fn test_fit_width_derives_height() {
        let fit = resolve(Size::new(100.0, 50.0), FitSpec::FitWidth(50.0)).unwrap();
        assert_eq!(dims(fit), (50, 25));
    }

    #[test]
    fn test_fit_height_derives_width() {
        let fit = resolve(Size::new(100.0, 50.0), FitSpec::FitHeight(40.0)).unwrap();
        assert_eq!(dims(fit), (80, 40));
    }

    #[test]
    fn test_fit_target_below_one_pixel_rejected() {
        let err = resolve(Size::new(100.0, 50.0), FitSpec::FitWidth(0.5)).unwrap_err();
        assert!(matches!(err, Error::InvalidFitValue { .. }));
        let err = resolve(Size::new(100.0, 50.0), FitSpec::FitHeight(0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidFitValue { .. }));
    }

    #[test]
    fn test_fit_bounds_wide_source_fits_to_width() {
        // Source aspect 2.0 > destination aspect 1.0
        let fit = resolve(
            Size::new(100.0, 50.0),
            FitSpec::FitBounds {
                width: 60.0,
                height: 60.0,
            },
        )
        .unwrap();
        assert_eq!(dims(fit), (60, 30));
    }

    #[test]
    fn test_fit_bounds_narrow_source_fits_to_height() {
        // Source aspect 0.5 < destination aspect 1.0
        let fit = resolve(
            Size::new(50.0, 100.0),
            FitSpec::FitBounds {
                width: 60.0,
                height: 60.0,
            },
        )
        .unwrap();
        assert_eq!(dims(fit), (30, 60));
    }

    #[test]
    fn test_fit_bounds_equal_aspect_fits_to_height() {
        // Equal aspect ratios: tie-break fits to destination height; either
        // direction yields the full box.
        let fit = resolve(
            Size::new(100.0, 50.0),
            FitSpec::FitBounds {
                width: 80.0,
                height: 40.0,
            },
        )
        .unwrap();
        assert_eq!(dims(fit), (80, 40));
    }

    #[test]
    fn test_fit_bounds_never_exceeds_box() {
        let fit = resolve(
            Size::new(123.0, 77.0),
            FitSpec::FitBounds {
                width: 300.0,
                height: 200.0,
            },
        )
        .unwrap();
        assert!(fit.size.width <= 300);
        assert!(fit.size.height <= 200);
    }

    #[test]
    fn test_degenerate_aspect_ratio() {
        for spec in [
            FitSpec::FitWidth(50.0),
            FitSpec::FitHeight(50.0),
            FitSpec::FitBounds {
                width: 50.0,
                height: 50.0,
            },
        ] {
            let err = resolve(Size::new(100.0, 0.0), spec).unwrap_err();
            assert!(matches!(err, Error::DegenerateAspectRatio { .. }));
            let err = resolve(Size::new(0.0, 100.0), spec).unwrap_err();
            assert!(matches!(err, Error::DegenerateAspectRatio { .. }));
        }
    }

    #[test]
    fn test_scale_hint_matches_resolved_dimensions() {
        let fit = resolve(Size::new(100.0, 50.0), FitSpec::FitWidth(50.0)).unwrap();
        assert!((fit.scale_x - 0.5).abs() < 1e-6);
        assert!((fit.scale_y - 0.5).abs() < 1e-6);
    }
}
