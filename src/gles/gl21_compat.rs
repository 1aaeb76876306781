/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Implementation of [GL] on desktop OpenGL 2.1 compatibility profile.
//!
//! This is the fixed-function generation: small primitives are submitted in
//! immediate mode and the triangle batch through client-side arrays. The
//! projection and modelview matrices are left as identity, because every
//! vertex we submit is already in clip space.
//!
//! `GL_TEXTURE_2D` is enabled once at construction and never disabled. The
//! renderer binds a transparent placeholder texture instead, which is the only
//! option on the shader-based generation, so both behave the same.

use super::gl21compat_raw as gl21;
use super::gl21compat_raw::types::*;
use super::gl_generic::ProcLoader;
use super::util::{gl_string, parse_version, split_extensions};
use super::vertex::{Vertex, VertexBatch};
use super::GL;

pub struct GL21Compat {
    extensions: Vec<String>,
}

impl GL for GL21Compat {
    fn description() -> &'static str {
        "OpenGL 2.1 compatibility profile (fixed-function)"
    }

    unsafe fn new(loader: ProcLoader<'_>) -> Result<Self, String> {
        gl21::load_with(|s| loader(s));
        if !gl21::GetString::is_loaded() {
            return Err("glGetString could not be loaded".to_string());
        }

        let version = gl_string(gl21::GetString(gl21::VERSION))
            .ok_or_else(|| "No current OpenGL context".to_string())?;
        match parse_version(&version) {
            Some(v) if v >= (2, 1) => (),
            _ => return Err(format!("OpenGL 2.1 is required, driver has {:?}", version)),
        }
        let extensions = split_extensions(gl_string(gl21::GetString(gl21::EXTENSIONS)));

        gl21::MatrixMode(gl21::PROJECTION);
        gl21::LoadIdentity();
        gl21::MatrixMode(gl21::MODELVIEW);
        gl21::LoadIdentity();
        gl21::Enable(gl21::TEXTURE_2D);

        Ok(GL21Compat { extensions })
    }

    unsafe fn driver_description(&self) -> String {
        // OpenGL's version string is just a number, so let's contextualize it.
        format!(
            "OpenGL {} / {} / {}",
            gl_string(gl21::GetString(gl21::VERSION)).unwrap_or_default(),
            gl_string(gl21::GetString(gl21::VENDOR)).unwrap_or_default(),
            gl_string(gl21::GetString(gl21::RENDERER)).unwrap_or_default()
        )
    }

    unsafe fn IsExtensionSupported(&mut self, name: &str) -> bool {
        self.extensions.iter().any(|ext| ext == name)
    }

    // Generic state manipulation
    unsafe fn GetError(&mut self) -> GLenum {
        gl21::GetError()
    }
    unsafe fn Enable(&mut self, cap: GLenum) {
        gl21::Enable(cap)
    }
    unsafe fn Disable(&mut self, cap: GLenum) {
        gl21::Disable(cap)
    }
    unsafe fn IsEnabled(&mut self, cap: GLenum) -> GLboolean {
        gl21::IsEnabled(cap)
    }

    // Other state manipulation
    unsafe fn BlendFunc(&mut self, sfactor: GLenum, dfactor: GLenum) {
        gl21::BlendFunc(sfactor, dfactor)
    }
    unsafe fn CullFace(&mut self, mode: GLenum) {
        assert!([gl21::FRONT, gl21::BACK, gl21::FRONT_AND_BACK].contains(&mode));
        gl21::CullFace(mode)
    }
    unsafe fn DepthFunc(&mut self, func: GLenum) {
        gl21::DepthFunc(func)
    }
    unsafe fn DepthMask(&mut self, flag: GLboolean) {
        gl21::DepthMask(flag)
    }
    unsafe fn PolygonOffset(&mut self, factor: GLfloat, units: GLfloat) {
        gl21::PolygonOffset(factor, units)
    }
    unsafe fn Scissor(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        gl21::Scissor(x, y, width, height)
    }
    unsafe fn Viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        gl21::Viewport(x, y, width, height)
    }

    // Clearing
    unsafe fn ClearDepthf(&mut self, depth: GLfloat) {
        gl21::ClearDepth(depth.into())
    }
    unsafe fn Clear(&mut self, mask: GLbitfield) {
        gl21::Clear(mask)
    }

    // Textures
    unsafe fn GenTextures(&mut self, textures: &mut [GLuint]) {
        gl21::GenTextures(textures.len() as GLsizei, textures.as_mut_ptr())
    }
    unsafe fn DeleteTextures(&mut self, textures: &[GLuint]) {
        gl21::DeleteTextures(textures.len() as GLsizei, textures.as_ptr())
    }
    unsafe fn ActiveTexture(&mut self, texture: GLenum) {
        gl21::ActiveTexture(texture)
    }
    unsafe fn BindTexture(&mut self, target: GLenum, texture: GLuint) {
        gl21::BindTexture(target, texture)
    }
    unsafe fn TexParameteri(&mut self, target: GLenum, pname: GLenum, param: GLint) {
        gl21::TexParameteri(target, pname, param)
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
        gl21::TexImage2D(
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
        assert!(mode == gl21::TRIANGLES || mode == gl21::TRIANGLE_FAN);
        gl21::Begin(mode);
        for vertex in vertices {
            let [r, g, b, a] = vertex.color;
            gl21::Color4f(r, g, b, a);
            if textured {
                let [u, v] = vertex.tex_coord;
                gl21::TexCoord2f(u, v);
            }
            let [x, y, z, w] = vertex.position;
            gl21::Vertex4f(x, y, z, w);
        }
        gl21::End();
    }
    unsafe fn DrawBatch(&mut self, batch: &VertexBatch<'_>) {
        if batch.indices().is_empty() {
            return;
        }

        gl21::BindBuffer(gl21::ARRAY_BUFFER, 0);
        gl21::BindBuffer(gl21::ELEMENT_ARRAY_BUFFER, 0);

        gl21::EnableClientState(gl21::VERTEX_ARRAY);
        gl21::VertexPointer(4, gl21::FLOAT, 0, batch.positions().as_ptr() as *const GLvoid);
        gl21::EnableClientState(gl21::COLOR_ARRAY);
        gl21::ColorPointer(
            4,
            gl21::UNSIGNED_BYTE,
            0,
            batch.colors().as_ptr() as *const GLvoid,
        );
        gl21::ClientActiveTexture(gl21::TEXTURE0);
        gl21::EnableClientState(gl21::TEXTURE_COORD_ARRAY);
        gl21::TexCoordPointer(
            2,
            gl21::FLOAT,
            0,
            batch.tex_coords().as_ptr() as *const GLvoid,
        );

        gl21::DrawElements(
            gl21::TRIANGLES,
            batch.indices().len() as GLsizei,
            gl21::UNSIGNED_SHORT,
            batch.indices().as_ptr() as *const GLvoid,
        );

        // The pointers refer to borrowed memory, so don't leave them enabled.
        gl21::DisableClientState(gl21::TEXTURE_COORD_ARRAY);
        gl21::DisableClientState(gl21::COLOR_ARRAY);
        gl21::DisableClientState(gl21::VERTEX_ARRAY);
    }
}
