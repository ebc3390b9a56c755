//! Owned raster pixel buffers.
//!
//! [`RasterBuffer`] is the unit exchanged between the render backend and the
//! consumer: a contiguous, explicitly-sized RGBA-family pixel array with a
//! declared row stride, channel order, and alpha mode. Buffers are created
//! per render call and ownership transfers to the caller; nothing is shared.

use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::PixelSize;
use crate::pixel::{self, AlphaMode, ChannelOrder, BYTES_PER_PIXEL};

/// An RGBA color value with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// A fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The color's bytes laid out in the given channel order.
    pub fn to_bytes(self, order: ChannelOrder) -> [u8; 4] {
        match order {
            ChannelOrder::Rgba => [self.r, self.g, self.b, self.a],
            ChannelOrder::Bgra => [self.b, self.g, self.r, self.a],
        }
    }
}

/// An owned, contiguous pixel buffer of `width * height` RGBA-family pixels.
///
/// The channel order and alpha mode are declared explicitly so a consumer
/// never has to guess the memory layout. Rows are contiguous: the stride is
/// always `width * 4` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    size: PixelSize,
    stride: usize,
    order: ChannelOrder,
    alpha: AlphaMode,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Allocate a zeroed buffer (fully transparent black).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] when either dimension is zero.
    pub fn new(size: PixelSize, order: ChannelOrder, alpha: AlphaMode) -> Result<Self> {
        if size.is_empty() {
            return Err(Error::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        let stride = size.width as usize * BYTES_PER_PIXEL;
        Ok(Self {
            size,
            stride,
            order,
            alpha,
            data: vec![0; stride * size.height as usize],
        })
    }

    /// Take ownership of an existing pixel array.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] when the dimensions are zero or the data
    /// length is not exactly `width * height * 4`.
    pub fn from_vec(
        data: Vec<u8>,
        size: PixelSize,
        order: ChannelOrder,
        alpha: AlphaMode,
    ) -> Result<Self> {
        let expected = size.area() as usize * BYTES_PER_PIXEL;
        if size.is_empty() || data.len() != expected {
            return Err(Error::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self {
            size,
            stride: size.width as usize * BYTES_PER_PIXEL,
            order,
            alpha,
            data,
        })
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Buffer dimensions.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Declared channel order.
    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    /// Declared alpha mode.
    pub fn alpha(&self) -> AlphaMode {
        self.alpha
    }

    /// Raw pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the pixel bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Fill every pixel with one color.
    ///
    /// The color is written as-is in the buffer's channel order; for a
    /// premultiplied buffer the caller supplies premultiplied values (fully
    /// opaque and fully transparent colors are identical in both modes).
    pub fn fill(&mut self, color: Rgba8) {
        let bytes = color.to_bytes(self.order);
        for pixel in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&bytes);
        }
    }

    /// The 4 bytes of one pixel, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        let mut out = [0; 4];
        out.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
        Some(out)
    }

    /// Overwrite one pixel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let offset = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes(self.order));
    }

    /// One row of pixel bytes.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.size.height {
            return None;
        }
        let offset = y as usize * self.stride;
        Some(&self.data[offset..offset + self.stride])
    }

    /// One mutable row of pixel bytes.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.size.height {
            return None;
        }
        let offset = y as usize * self.stride;
        Some(&mut self.data[offset..offset + self.stride])
    }

    /// Swap the red and blue channels in place, flipping the declared order.
    pub fn swap_channels(&mut self) {
        pixel::swap_red_blue(&mut self.data);
        self.order = self.order.swapped();
    }

    /// Convert the buffer into the given channel order, swapping only when
    /// the declared order differs.
    pub fn into_order(mut self, order: ChannelOrder) -> Self {
        if self.order != order {
            self.swap_channels();
        }
        self
    }

    /// Encode the buffer as a PNG image.
    ///
    /// The pixel data is normalized to straight-alpha RGBA first; the buffer
    /// itself is not modified.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut rgba = self.data.clone();
        pixel::convert(&mut rgba, self.order, ChannelOrder::Rgba);
        if self.alpha == AlphaMode::Premultiplied {
            pixel::unpremultiply(&mut rgba);
        }

        let img: image::RgbaImage =
            image::ImageBuffer::from_raw(self.size.width, self.size.height, rgba).ok_or(
                Error::InvalidDimensions {
                    width: self.size.width,
                    height: self.size.height,
                },
            )?;

        let mut output = std::io::Cursor::new(Vec::new());
        img.write_to(&mut output, image::ImageFormat::Png)
            .map_err(|e| Error::Encode(format!("PNG encoding failed: {}", e)))?;
        Ok(output.into_inner())
    }

    /// Encode as PNG and write to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let png = self.encode_png()?;
        std::fs::write(path.as_ref(), png)?;
        Ok(())
    }
}
