/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Implementation of [GL] on OpenGL ES 2.0.
//!
//! There is no fixed-function vertex submission here. Everything goes through
//! generic vertex attributes at fixed locations, which the combiner's shader
//! programs must bind their inputs to (see [ATTRIB_POSITION] etc).

use super::gl_generic::ProcLoader;
use super::gles2_raw as gles2;
use super::gles2_raw::types::*;
use super::util::{gl_string, parse_version, split_extensions};
use super::vertex::{Vertex, VertexBatch};
use super::GL;

/// Attribute location of the `vec4` clip-space position.
pub const ATTRIB_POSITION: GLuint = 0;
/// Attribute location of the `vec4` vertex colour.
pub const ATTRIB_COLOR: GLuint = 1;
/// Attribute location of the `vec2` texture co-ordinates for unit 0.
pub const ATTRIB_TEXCOORD0: GLuint = 2;

pub struct GLES2 {
    extensions: Vec<String>,
    /// Scratch space for primitives, reused to avoid allocating every draw.
    positions: Vec<[GLfloat; 4]>,
    colors: Vec<[GLfloat; 4]>,
    tex_coords: Vec<[GLfloat; 2]>,
}

impl GL for GLES2 {
    fn description() -> &'static str {
        "OpenGL ES 2.0 (shader-based)"
    }

    unsafe fn new(loader: ProcLoader<'_>) -> Result<Self, String> {
        gles2::load_with(|s| loader(s));
        if !gles2::GetString::is_loaded() {
            return Err("glGetString could not be loaded".to_string());
        }

        let version = gl_string(gles2::GetString(gles2::VERSION))
            .ok_or_else(|| "No current OpenGL ES context".to_string())?;
        // OpenGL ES requires the version to be prefixed "OpenGL ES".
        let Some(number) = version.strip_prefix("OpenGL ES ") else {
            return Err(format!("Not an OpenGL ES context: {:?}", version));
        };
        match parse_version(number) {
            Some(v) if v >= (2, 0) => (),
            _ => return Err(format!("OpenGL ES 2.0 is required, driver has {:?}", version)),
        }
        let extensions = split_extensions(gl_string(gles2::GetString(gles2::EXTENSIONS)));

        Ok(GLES2 {
            extensions,
            positions: Vec::new(),
            colors: Vec::new(),
            tex_coords: Vec::new(),
        })
    }

    unsafe fn driver_description(&self) -> String {
        format!(
            "{} / {} / {}",
            gl_string(gles2::GetString(gles2::VERSION)).unwrap_or_default(),
            gl_string(gles2::GetString(gles2::VENDOR)).unwrap_or_default(),
            gl_string(gles2::GetString(gles2::RENDERER)).unwrap_or_default()
        )
    }

    unsafe fn IsExtensionSupported(&mut self, name: &str) -> bool {
        self.extensions.iter().any(|ext| ext == name)
    }

    // Generic state manipulation
    unsafe fn GetError(&mut self) -> GLenum {
        gles2::GetError()
    }
    unsafe fn Enable(&mut self, cap: GLenum) {
        gles2::Enable(cap)
    }
    unsafe fn Disable(&mut self, cap: GLenum) {
        gles2::Disable(cap)
    }
    unsafe fn IsEnabled(&mut self, cap: GLenum) -> GLboolean {
        gles2::IsEnabled(cap)
    }

    // Other state manipulation
    unsafe fn BlendFunc(&mut self, sfactor: GLenum, dfactor: GLenum) {
        gles2::BlendFunc(sfactor, dfactor)
    }
    unsafe fn CullFace(&mut self, mode: GLenum) {
        assert!([gles2::FRONT, gles2::BACK, gles2::FRONT_AND_BACK].contains(&mode));
        gles2::CullFace(mode)
    }
    unsafe fn DepthFunc(&mut self, func: GLenum) {
        gles2::DepthFunc(func)
    }
    unsafe fn DepthMask(&mut self, flag: GLboolean) {
        gles2::DepthMask(flag)
    }
    unsafe fn PolygonOffset(&mut self, factor: GLfloat, units: GLfloat) {
        gles2::PolygonOffset(factor, units)
    }
    unsafe fn Scissor(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        gles2::Scissor(x, y, width, height)
    }
    unsafe fn Viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        gles2::Viewport(x, y, width, height)
    }

    // Clearing
    unsafe fn ClearDepthf(&mut self, depth: GLfloat) {
        gles2::ClearDepthf(depth)
    }
    unsafe fn Clear(&mut self, mask: GLbitfield) {
        gles2::Clear(mask)
    }

    // Textures
    unsafe fn GenTextures(&mut self, textures: &mut [GLuint]) {
        gles2::GenTextures(textures.len() as GLsizei, textures.as_mut_ptr())
    }
    unsafe fn DeleteTextures(&mut self, textures: &[GLuint]) {
        gles2::DeleteTextures(textures.len() as GLsizei, textures.as_ptr())
    }
    unsafe fn ActiveTexture(&mut self, texture: GLenum) {
        gles2::ActiveTexture(texture)
    }
    unsafe fn BindTexture(&mut self, target: GLenum, texture: GLuint) {
        gles2::BindTexture(target, texture)
    }
    unsafe fn TexParameteri(&mut self, target: GLenum, pname: GLenum, param: GLint) {
        gles2::TexParameteri(target, pname, param)
    }
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
    ) {
        gles2::TexImage2D(
            target,
            level,
            internalformat,
            width,
            height,
            0,
            format,
            type_,
            pixels.as_ptr() as *const GLvoid,
        )
    }

    // Drawing
    unsafe fn DrawVertices(&mut self, mode: GLenum, vertices: &[Vertex], textured: bool) {
        assert!(mode == gles2::TRIANGLES || mode == gles2::TRIANGLE_FAN);

        self.positions.clear();
        self.colors.clear();
        self.tex_coords.clear();
        for vertex in vertices {
            self.positions.push(vertex.position);
            self.colors.push(vertex.color);
            self.tex_coords.push(vertex.tex_coord);
        }

        gles2::BindBuffer(gles2::ARRAY_BUFFER, 0);
        gles2::EnableVertexAttribArray(ATTRIB_POSITION);
        gles2::VertexAttribPointer(
            ATTRIB_POSITION,
            4,
            gles2::FLOAT,
            gles2::FALSE,
            0,
            self.positions.as_ptr() as *const GLvoid,
        );
        gles2::EnableVertexAttribArray(ATTRIB_COLOR);
        gles2::VertexAttribPointer(
            ATTRIB_COLOR,
            4,
            gles2::FLOAT,
            gles2::FALSE,
            0,
            self.colors.as_ptr() as *const GLvoid,
        );
        if textured {
            gles2::EnableVertexAttribArray(ATTRIB_TEXCOORD0);
            gles2::VertexAttribPointer(
                ATTRIB_TEXCOORD0,
                2,
                gles2::FLOAT,
                gles2::FALSE,
                0,
                self.tex_coords.as_ptr() as *const GLvoid,
            );
        } else {
            gles2::DisableVertexAttribArray(ATTRIB_TEXCOORD0);
        }

        gles2::DrawArrays(mode, 0, vertices.len() as GLsizei);

        if !textured {
            gles2::EnableVertexAttribArray(ATTRIB_TEXCOORD0);
        }
    }
    unsafe fn DrawBatch(&mut self, batch: &VertexBatch<'_>) {
        if batch.indices().is_empty() {
            return;
        }

        gles2::BindBuffer(gles2::ARRAY_BUFFER, 0);
        gles2::BindBuffer(gles2::ELEMENT_ARRAY_BUFFER, 0);

        gles2::EnableVertexAttribArray(ATTRIB_POSITION);
        gles2::VertexAttribPointer(
            ATTRIB_POSITION,
            4,
            gles2::FLOAT,
            gles2::FALSE,
            0,
            batch.positions().as_ptr() as *const GLvoid,
        );
        gles2::EnableVertexAttribArray(ATTRIB_COLOR);
        gles2::VertexAttribPointer(
            ATTRIB_COLOR,
            4,
            gles2::UNSIGNED_BYTE,
            gles2::TRUE,
            0,
            batch.colors().as_ptr() as *const GLvoid,
        );
        gles2::EnableVertexAttribArray(ATTRIB_TEXCOORD0);
        gles2::VertexAttribPointer(
            ATTRIB_TEXCOORD0,
            2,
            gles2::FLOAT,
            gles2::FALSE,
            0,
            batch.tex_coords().as_ptr() as *const GLvoid,
        );

        gles2::DrawElements(
            gles2::TRIANGLES,
            batch.indices().len() as GLsizei,
            gles2::UNSIGNED_SHORT,
            batch.indices().as_ptr() as *const GLvoid,
        );
    }
}
