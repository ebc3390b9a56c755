//! Geometric primitives for fit resolution.
//!
//! Two size types flow through the render pipeline: [`Size`] is the
//! intrinsic, possibly non-integer size declared by an SVG document, and
//! [`PixelSize`] is a concrete raster size produced by fit resolution.

/// An intrinsic (floating point) size, as declared by or computed from an
/// SVG document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in user units
    pub width: f64,
    /// Height in user units
    pub height: f64,
}

impl Size {
    /// Create a new size.
    ///
    /// # Examples
    ///
    /// ```
    /// use svg_oxide::geometry::Size;
    ///
    /// let size = Size::new(100.0, 50.0);
    /// assert_eq!(size.width, 100.0);
    /// assert_eq!(size.height, 50.0);
    /// ```
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Width over height, or `None` when either dimension is zero or
    /// negative (the ratio is undefined, never NaN or infinite).
    ///
    /// # Examples
    ///
    /// ```
    /// use svg_oxide::geometry::Size;
    ///
    /// assert_eq!(Size::new(100.0, 50.0).aspect_ratio(), Some(2.0));
    /// assert_eq!(Size::new(100.0, 0.0).aspect_ratio(), None);
    /// ```
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.width / self.height)
        }
    }
}

/// A concrete raster size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelSize {
    /// Create a new pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Total number of pixels.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Round to the nearest integer, ties away from zero, applied independently
/// per axis during fit resolution.
///
/// This is `f64::round` semantics, named explicitly because the rounding
/// mode is part of the fit contract: it can make the resolved aspect ratio
/// deviate from the source by up to one pixel of rounding error.
#[inline]
pub(crate) fn round_half_away_from_zero(value: f64) -> f64 {
    value.round()
}
