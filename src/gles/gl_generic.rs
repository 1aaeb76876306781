/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Generic interface over the OpenGL generations the renderer can run on.
//!
//! Only the subset of OpenGL that the renderer needs is exposed. State-setting
//! functions mirror their OpenGL counterparts; vertex submission is abstracted
//! because the two generations do it completely differently (fixed-function
//! client arrays and immediate mode vs. generic vertex attributes).
//!
//! The constants should be taken from [super::gles2_raw]. OpenGL 2.1 uses the
//! same values for everything in this subset.

use super::gles2_raw::types::*;
use super::vertex::{Vertex, VertexBatch};
use std::ffi::c_void;

/// Loader for OpenGL function pointers, e.g. `SDL_GL_GetProcAddress`.
pub type ProcLoader<'a> = &'a mut dyn FnMut(&'static str) -> *const c_void;

/// Trait representing an OpenGL implementation and context.
///
/// # Safety
/// It is the caller's responsibility to make the context active before using
/// any of the `unsafe` methods of this trait.
#[allow(clippy::upper_case_acronyms)]
#[allow(clippy::too_many_arguments)]
pub trait GL {
    /// Get a human-friendly description of this implementation.
    fn description() -> &'static str
    where
        Self: Sized;

    /// Load the function pointers for the current context and check that the
    /// context is suitable. This fails if the driver reports a version that
    /// is too old, for example.
    #[allow(clippy::new_ret_no_self)]
    unsafe fn new(loader: ProcLoader<'_>) -> Result<Self, String>
    where
        Self: Sized;

    /// Get some string describing the underlying driver. For OpenGL this is
    /// `GL_VENDOR`, `GL_RENDERER` and `GL_VERSION`.
    unsafe fn driver_description(&self) -> String;

    /// Check the `GL_EXTENSIONS` string for an extension.
    unsafe fn IsExtensionSupported(&mut self, name: &str) -> bool;

    // Generic state manipulation
    unsafe fn GetError(&mut self) -> GLenum;
    unsafe fn Enable(&mut self, cap: GLenum);
    unsafe fn Disable(&mut self, cap: GLenum);
    unsafe fn IsEnabled(&mut self, cap: GLenum) -> GLboolean;

    // Other state manipulation
    unsafe fn BlendFunc(&mut self, sfactor: GLenum, dfactor: GLenum);
    unsafe fn CullFace(&mut self, mode: GLenum);
    unsafe fn DepthFunc(&mut self, func: GLenum);
    unsafe fn DepthMask(&mut self, flag: GLboolean);
    unsafe fn PolygonOffset(&mut self, factor: GLfloat, units: GLfloat);
    unsafe fn Scissor(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    unsafe fn Viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);

    // Clearing
    unsafe fn ClearDepthf(&mut self, depth: GLfloat);
    unsafe fn Clear(&mut self, mask: GLbitfield);

    // Textures
    unsafe fn GenTextures(&mut self, textures: &mut [GLuint]);
    unsafe fn DeleteTextures(&mut self, textures: &[GLuint]);
    unsafe fn ActiveTexture(&mut self, texture: GLenum);
    unsafe fn BindTexture(&mut self, target: GLenum, texture: GLuint);
    unsafe fn TexParameteri(&mut self, target: GLenum, pname: GLenum, param: GLint);
    unsafe fn TexImage2D(
        &mut self,
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: &[u8],
    );

    // Drawing
    /// Draw a small primitive (`GL_TRIANGLES` or `GL_TRIANGLE_FAN`) from
    /// vertices given in NDC. If `textured` is false, texture co-ordinates are
    /// not submitted.
    unsafe fn DrawVertices(&mut self, mode: GLenum, vertices: &[Vertex], textured: bool);
    /// Draw the main triangle list.
    unsafe fn DrawBatch(&mut self, batch: &VertexBatch<'_>);
}
