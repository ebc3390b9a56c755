//! Integration tests for pixel-format conversion.
//!
//! The dispatching `swap_red_blue` (vectorized on capable hardware) is
//! checked byte-for-byte against an independent scalar reference over every
//! lane alignment 0..16 and a range of buffer lengths, plus randomized
//! buffers via proptest. The optimization must be invisible.

use proptest::prelude::*;
use svg_oxide::pixel::{convert, swap_red_blue, ChannelOrder};

/// Independent scalar reference: swap bytes 0 and 2 of each 4-byte group.
fn reference_swap(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    for pixel in out.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }
    out
}

/// Run `swap_red_blue` on a copy of `data` placed at a given byte offset
/// inside a larger allocation, so the slice pointer's alignment varies.
fn swap_at_offset(data: &[u8], offset: usize) -> Vec<u8> {
    let mut padded = vec![0u8; offset + data.len()];
    padded[offset..].copy_from_slice(data);
    swap_red_blue(&mut padded[offset..]);
    padded[offset..].to_vec()
}

#[test]
fn test_all_alignments_and_lengths_match_reference() {
    let backing: Vec<u8> = (0..2048u32).map(|i| (i.wrapping_mul(97) % 256) as u8).collect();

    for offset in 0..16 {
        for len in 0..256 {
            let slice = &backing[..len];
            assert_eq!(
                swap_at_offset(slice, offset),
                reference_swap(slice),
                "offset={offset} len={len}"
            );
        }
        // A few lengths well past the lane threshold.
        for len in [512, 1000, 1024, 2000, 2048] {
            let slice = &backing[..len];
            assert_eq!(
                swap_at_offset(slice, offset),
                reference_swap(slice),
                "offset={offset} len={len}"
            );
        }
    }
}

#[test]
fn test_double_swap_restores_original() {
    let original: Vec<u8> = (0..1024u32).map(|i| (i % 256) as u8).collect();
    let mut data = original.clone();
    swap_red_blue(&mut data);
    swap_red_blue(&mut data);
    assert_eq!(data, original);
}

#[test]
fn test_convert_between_orders() {
    let mut data = vec![10, 20, 30, 40];
    convert(&mut data, ChannelOrder::Rgba, ChannelOrder::Bgra);
    assert_eq!(data, vec![30, 20, 10, 40]);
    convert(&mut data, ChannelOrder::Bgra, ChannelOrder::Rgba);
    assert_eq!(data, vec![10, 20, 30, 40]);
}

#[test]
fn test_empty_buffer() {
    let mut data: Vec<u8> = Vec::new();
    swap_red_blue(&mut data);
    assert!(data.is_empty());
}

proptest! {
    #[test]
    fn prop_swap_matches_reference(
        data in proptest::collection::vec(any::<u8>(), 0..600),
        offset in 0usize..16,
    ) {
        prop_assert_eq!(swap_at_offset(&data, offset), reference_swap(&data));
    }

    #[test]
    fn prop_swap_is_involution(
        data in proptest::collection::vec(any::<u8>(), 0..600),
        offset in 0usize..16,
    ) {
        let once = swap_at_offset(&data, offset);
        let twice = swap_at_offset(&once, offset);
        prop_assert_eq!(twice, data);
    }

    #[test]
    fn prop_green_and_alpha_untouched(data in proptest::collection::vec(any::<u8>(), 0..600)) {
        let swapped = swap_at_offset(&data, 0);
        for (before, after) in data.chunks_exact(4).zip(swapped.chunks_exact(4)) {
            prop_assert_eq!(before[1], after[1]);
            prop_assert_eq!(before[3], after[3]);
            prop_assert_eq!(before[0], after[2]);
            prop_assert_eq!(before[2], after[0]);
        }
    }
}
