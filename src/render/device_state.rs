/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Cache of the OpenGL state the renderer has submitted.
//!
//! Redundant state changes are expensive on mobile drivers, so every setter in
//! the renderer compares against this cache first. The cache must only be
//! written right after the corresponding OpenGL call was made. [None] means
//! "unknown", which never compares equal, so the first call for any field
//! always goes through.

use super::hardware::PolygonOffset;
use super::texture::TextureFilter;
use crate::gles::gles2_raw::types::{GLenum, GLuint};

/// Number of texture units the renderer keeps track of.
pub const TEXTURE_UNITS: usize = 8;

/// Which of the two scissor rectangles is currently applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScissorSource {
    /// Set by the RDP's scissor command.
    Rdp,
    /// Derived from the RSP clip ratio.
    Rsp,
}

/// A rectangle in window co-ordinates, as passed to `glViewport` or
/// `glScissor`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GLRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<(i32, i32, i32, i32)> for GLRect {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        GLRect {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderDeviceState {
    /// Texture actually bound to each unit.
    pub bound_texture: [Option<GLuint>; TEXTURE_UNITS],
    /// Texture each unit shows while enabled. Disabled units have the
    /// placeholder bound instead, and get this back when re-enabled.
    pub unit_texture: [Option<GLuint>; TEXTURE_UNITS],
    pub unit_enabled: [Option<bool>; TEXTURE_UNITS],
    pub active_unit: Option<usize>,

    /// Texture the filters were last applied to.
    pub filter_texture: Option<GLuint>,
    pub min_filter: Option<TextureFilter>,
    pub mag_filter: Option<TextureFilter>,
    /// Texture and mode of the last wrap mode application, per axis.
    pub wrap_s: Option<(GLuint, GLenum)>,
    pub wrap_t: Option<(GLuint, GLenum)>,

    /// Viewport rectangle and the caller's flag, which is part of the key.
    pub viewport: Option<(GLRect, bool)>,

    pub scissor_source: Option<ScissorSource>,
    pub scissor_test: Option<bool>,
    pub scissor_rect: Option<GLRect>,

    pub polygon_offset: Option<PolygonOffset>,
    /// Logical z-bias, reapplied before each batch.
    pub z_bias: i32,
    /// Alpha test threshold in the range 0 to 255.
    pub alpha_ref: Option<u32>,
}

impl RenderDeviceState {
    /// Reset to the state of a fresh context.
    pub fn invalidate(&mut self) {
        *self = Default::default();
    }
}

/// Store `value` in `slot`, returning [true] if it differs from what was
/// there, i.e. if the OpenGL call must be made.
pub fn update<T: PartialEq + Copy>(slot: &mut Option<T>, value: T) -> bool {
    if *slot == Some(value) {
        false
    } else {
        *slot = Some(value);
        true
    }
}
