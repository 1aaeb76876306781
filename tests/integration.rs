/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Tests of the public interface that need no OpenGL context.

use rdpgl::gles::VertexBatch;
use rdpgl::options::{FogMethod, Options};
use rdpgl::render::HardwareProfile;
use rdpgl::texconv::{self, TexConvError};

// A 4×2 ARGB1555 image as it would be copied out of N64 memory, with
// the rows already byte-swapped to little-endian.
fn red_gradient_1555() -> Vec<u8> {
    (0..8u16)
        .map(|i| 0x8000 | ((i * 4) << 10))
        .flat_map(|texel| texel.to_le_bytes())
        .collect()
}

#[test]
fn convert_image() {
    let src = red_gradient_1555();
    let mut dst = vec![0; src.len()];
    texconv::convert_argb1555_to_argb4444(&src, &mut dst, 4, 2).unwrap();
    let texels: Vec<u16> = dst
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    // Red keeps its top four bits, alpha is all ones.
    let expected: Vec<u16> = (0..8u16).map(|i| 0xF000 | (((i * 4) >> 1) << 8)).collect();
    assert_eq!(texels, expected);
}

#[test]
fn convert_odd_image() {
    let src = red_gradient_1555();
    let mut dst = vec![0; src.len()];
    let err = texconv::convert_argb1555_to_argb4444(&src, &mut dst, 7, 1).unwrap_err();
    assert!(matches!(err, TexConvError::Granularity { texels: 7, .. }));
    assert_eq!(err.to_string(), "7 texels can't be converted 2 at a time");
}

#[test]
fn per_rom_options() {
    // Options as a game database entry would give them.
    let mut options = Options::default();
    for arg in "--disable-hacks --fog-method=0 --force-depth-buffer --hardware-type=4"
        .split_ascii_whitespace()
    {
        assert_eq!(options.parse_argument(arg), Ok(true));
    }
    assert!(!options.enable_hacks);
    assert_eq!(options.fog_method, FogMethod::Disabled);
    assert!(options.force_depth_buffer);
    assert_eq!(options.hardware_override, Some(HardwareProfile::Imap));
}

#[test]
fn vertex_batch_validation() {
    let positions = [[0.0; 4]; 3];
    let colors = [[0; 4]; 3];
    let tex_coords = [[0.0; 2]; 3];
    assert!(VertexBatch::new(&positions, &colors, &tex_coords, &[0, 1, 2]).is_ok());
    assert!(VertexBatch::new(&positions, &colors, &tex_coords, &[0, 1, 3]).is_err());
    assert!(VertexBatch::new(&positions, &colors[..2], &tex_coords, &[0]).is_err());
}
