/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Conversion of N64 texel formats to ARGB4444.
//!
//! Every destination texel is a little-endian 16-bit value with alpha in the
//! top nibble, then red, green and blue. Sources are read as little-endian
//! 32-bit words, which hold two 16-bit texels or four 8-bit texels, and every
//! word is converted with a few mask-and-shift operations. This is why the
//! texel count has to be a multiple of 2 or 4 respectively.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TexConvError {
    #[error("{texels} texels can't be converted {granularity} at a time")]
    Granularity { texels: usize, granularity: usize },
    #[error("{which} buffer has {actual} bytes but {needed} are needed")]
    BufferTooSmall {
        which: &'static str,
        needed: usize,
        actual: usize,
    },
}

/// Check the sizes, returning the number of source words.
fn check_sizes(
    src: &[u8],
    dst: &[u8],
    width: usize,
    height: usize,
    texels_per_word: usize,
) -> Result<usize, TexConvError> {
    let texels = width.saturating_mul(height);
    if texels % texels_per_word != 0 {
        return Err(TexConvError::Granularity {
            texels,
            granularity: texels_per_word,
        });
    }
    let words = texels / texels_per_word;
    let src_needed = words.saturating_mul(4);
    // Destination texels are always 16 bits.
    let dst_needed = texels.saturating_mul(2);
    if src.len() < src_needed {
        return Err(TexConvError::BufferTooSmall {
            which: "source",
            needed: src_needed,
            actual: src.len(),
        });
    }
    if dst.len() < dst_needed {
        return Err(TexConvError::BufferTooSmall {
            which: "destination",
            needed: dst_needed,
            actual: dst.len(),
        });
    }
    Ok(words)
}

/// Convert pairs of 16-bit texels, one 32-bit word at a time.
fn convert_16bit(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    convert: fn(u32) -> u32,
) -> Result<(), TexConvError> {
    let words = check_sizes(src, dst, width, height, 2)?;
    for (src, dst) in src
        .chunks_exact(4)
        .zip(dst.chunks_exact_mut(4))
        .take(words)
    {
        let v = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
        dst.copy_from_slice(&convert(v).to_le_bytes());
    }
    Ok(())
}

/// Convert groups of four 8-bit texels, one 32-bit word at a time.
fn convert_8bit(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    convert: fn(u8) -> u16,
) -> Result<(), TexConvError> {
    let words = check_sizes(src, dst, width, height, 4)?;
    for (src, dst) in src
        .chunks_exact(4)
        .zip(dst.chunks_exact_mut(8))
        .take(words)
    {
        for (texel, out) in src.iter().zip(dst.chunks_exact_mut(2)) {
            out.copy_from_slice(&convert(*texel).to_le_bytes());
        }
    }
    Ok(())
}

/// ARGB1555: the top four bits of each colour channel are kept, and the
/// alpha bit is replicated into all four alpha bits.
pub fn convert_argb1555_to_argb4444(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), TexConvError> {
    convert_16bit(src, dst, width, height, |v| {
        let alpha = v & 0x80008000;
        ((v & 0x001E001E) >> 1)
            | ((v & 0x03C003C0) >> 2)
            | ((v & 0x78007800) >> 3)
            | (alpha >> 3)
            | (alpha >> 2)
            | (alpha >> 1)
            | alpha
    })
}

/// AI88 (alpha in the high byte, intensity in the low byte): the top nibble
/// of the intensity goes into all three colour channels.
pub fn convert_ai88_to_argb4444(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), TexConvError> {
    convert_16bit(src, dst, width, height, |v| {
        let intensity = v & 0x00F000F0;
        ((intensity << 4) >> 8) | intensity | (intensity << 4) | (v & 0xF000F000)
    })
}

/// AI44 (alpha in the high nibble, intensity in the low nibble).
pub fn convert_ai44_to_argb4444(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), TexConvError> {
    convert_8bit(src, dst, width, height, |texel| {
        let texel = u16::from(texel);
        let intensity = texel & 0xF;
        ((texel & 0xF0) << 8) | (intensity << 8) | (intensity << 4) | intensity
    })
}

/// A8: the top nibble goes into all four channels.
pub fn convert_a8_to_argb4444(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), TexConvError> {
    convert_8bit(src, dst, width, height, |texel| {
        u16::from(texel >> 4) * 0x1111
    })
}
