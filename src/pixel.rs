//! Pixel-format conversion between RGBA memory layouts.
//!
//! The scene engine produces premultiplied RGBA bytes; most consuming
//! toolkits want the red and blue channels in the opposite positions. The
//! conversion here is purely a memory-layout transform (a byte shuffle
//! within each 4-byte pixel), never a color-space transform.
//!
//! Two implementations exist:
//!
//! - a portable reference path iterating 4-byte pixel groups
//! - an SSSE3 fast path shuffling 16-byte lanes over the aligned middle of
//!   the buffer, with the portable path covering the unaligned prefix and
//!   suffix
//!
//! The fast path is a performance optimization only: it must produce
//! byte-for-byte identical output to the portable path for every input, and
//! is differential-tested against it.

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Memory order of the color channels within a 4-byte pixel.
///
/// Both orders keep alpha in the last byte; they differ only in the
/// positions of red and blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    /// Red, green, blue, alpha — the scene engine's native layout.
    #[default]
    Rgba,
    /// Blue, green, red, alpha — the common toolkit/framebuffer layout.
    Bgra,
}

impl ChannelOrder {
    /// The order with red and blue exchanged.
    pub fn swapped(self) -> Self {
        match self {
            Self::Rgba => Self::Bgra,
            Self::Bgra => Self::Rgba,
        }
    }
}

/// Alpha encoding of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaMode {
    /// Color channels are pre-scaled by alpha.
    #[default]
    Premultiplied,
    /// Color channels are independent of alpha.
    Straight,
}

/// Convert a pixel buffer between two channel orders in place.
///
/// A no-op when the orders already match. Operates on whole pixels; any
/// trailing bytes short of a full pixel are left untouched.
pub fn convert(data: &mut [u8], from: ChannelOrder, to: ChannelOrder) {
    if from != to {
        swap_red_blue(data);
    }
}

/// Swap the red and blue byte of every 4-byte pixel in place.
///
/// Applying the swap twice restores the original byte sequence.
pub fn swap_red_blue(data: &mut [u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        if std::arch::is_x86_feature_detected!("ssse3") {
            // SAFETY: SSSE3 support was just confirmed at runtime.
            unsafe { swap_red_blue_ssse3(data) };
            return;
        }
    }
    swap_red_blue_portable(data);
}

/// Portable reference implementation: one pixel at a time.
pub(crate) fn swap_red_blue_portable(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(BYTES_PER_PIXEL) {
        pixel.swap(0, 2);
    }
}

/// SSSE3 implementation: shuffle four pixels per 16-byte lane over the
/// aligned middle run, portable path for the ragged ends.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "ssse3")]
unsafe fn swap_red_blue_ssse3(data: &mut [u8]) {
    use core::arch::x86_64::{_mm_load_si128, _mm_set_epi8, _mm_shuffle_epi8, _mm_store_si128, __m128i};

    const LANE: usize = std::mem::size_of::<__m128i>();

    let prefix_len = data.as_ptr().align_offset(LANE);

    // A prefix that splits a pixel cannot be bridged by whole-pixel lane
    // shuffles; the entire buffer takes the portable path instead.
    if prefix_len % BYTES_PER_PIXEL != 0 || prefix_len >= data.len() {
        swap_red_blue_portable(data);
        return;
    }

    let (prefix, rest) = data.split_at_mut(prefix_len);
    swap_red_blue_portable(prefix);

    let vector_len = rest.len() - (rest.len() % LANE);
    let (middle, suffix) = rest.split_at_mut(vector_len);

    // Per 32-bit pixel: out[0]=in[2], out[1]=in[1], out[2]=in[0], out[3]=in[3]
    let mask = _mm_set_epi8(15, 12, 13, 14, 11, 8, 9, 10, 7, 4, 5, 6, 3, 0, 1, 2);

    for lane in middle.chunks_exact_mut(LANE) {
        let ptr = lane.as_mut_ptr().cast::<__m128i>();
        // SAFETY: `ptr` is 16-byte aligned by construction and the chunk
        // spans exactly one lane.
        let pixels = unsafe { _mm_load_si128(ptr) };
        unsafe { _mm_store_si128(ptr, _mm_shuffle_epi8(pixels, mask)) };
    }

    swap_red_blue_portable(suffix);
}

/// Convert premultiplied alpha to straight alpha in place.
///
/// Used when handing pixels to consumers that expect unassociated alpha
/// (PNG encoding). Rounds to nearest on the divide.
pub(crate) fn unpremultiply(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(BYTES_PER_PIXEL) {
        let alpha = pixel[3] as u16;
        if alpha == 0 || alpha == 255 {
            continue;
        }
        for channel in &mut pixel[..3] {
            let value = *channel as u16;
            *channel = ((value * 255 + alpha / 2) / alpha).min(255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_swapped(data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        swap_red_blue_portable(&mut out);
        out
    }

    #[test]
    fn test_portable_swaps_red_and_blue() {
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8];
        swap_red_blue_portable(&mut data);
        assert_eq!(data, vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn test_trailing_partial_pixel_untouched() {
        let mut data = vec![1, 2, 3, 4, 9, 9, 9];
        swap_red_blue(&mut data);
        assert_eq!(data, vec![3, 2, 1, 4, 9, 9, 9]);
    }

    #[test]
    fn test_swap_is_involution() {
        let original: Vec<u8> = (0..=255).collect();
        let mut data = original.clone();
        swap_red_blue(&mut data);
        assert_ne!(data, original);
        swap_red_blue(&mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn test_convert_noop_on_matching_order() {
        let original = vec![10, 20, 30, 40];
        let mut data = original.clone();
        convert(&mut data, ChannelOrder::Rgba, ChannelOrder::Rgba);
        assert_eq!(data, original);
        convert(&mut data, ChannelOrder::Rgba, ChannelOrder::Bgra);
        assert_eq!(data, vec![30, 20, 10, 40]);
    }

    #[test]
    fn test_channel_order_swapped() {
        assert_eq!(ChannelOrder::Rgba.swapped(), ChannelOrder::Bgra);
        assert_eq!(ChannelOrder::Bgra.swapped(), ChannelOrder::Rgba);
    }

    // Differential check of the dispatching path (vectorized on x86_64 with
    // SSSE3) against the portable reference, over every alignment offset a
    // 16-byte lane can meet and a spread of lengths around lane boundaries.
    #[test]
    fn test_accelerated_matches_portable_for_all_alignments() {
        let backing: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();

        for offset in 0..16 {
            for len in [0, 1, 3, 4, 8, 15, 16, 17, 31, 32, 33, 63, 64, 100, 1024, 4000] {
                if offset + len > backing.len() {
                    continue;
                }
                let slice = &backing[offset..offset + len];
                let expected = reference_swapped(slice);

                let mut actual = slice.to_vec();
                // Re-slice at the same offset within a fresh allocation so
                // the pointer alignment actually varies.
                let mut padded = vec![0u8; offset + len];
                padded[offset..].copy_from_slice(slice);
                swap_red_blue(&mut padded[offset..]);
                actual.copy_from_slice(&padded[offset..]);

                assert_eq!(actual, expected, "offset={offset} len={len}");
            }
        }
    }

    #[test]
    fn test_unpremultiply_half_alpha() {
        let mut data = vec![64, 32, 16, 128];
        unpremultiply(&mut data);
        assert_eq!(data[3], 128);
        assert_eq!(data[0], 128); // 64 * 255 / 128, rounded
        assert_eq!(data[1], 64);
        assert_eq!(data[2], 32);
    }

    #[test]
    fn test_unpremultiply_zero_and_full_alpha_unchanged() {
        let mut data = vec![10, 20, 30, 0, 40, 50, 60, 255];
        let expected = data.clone();
        unpremultiply(&mut data);
        assert_eq!(data, expected);
    }
}
