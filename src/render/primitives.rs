/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Vertex records for the fixed-geometry primitives, and the functions that
//! turn them into vertices for [crate::gles::GL::DrawVertices].
//!
//! The vertex orders here decide which corner of the texture ends up where,
//! so don't change them.

use crate::gles::Vertex;

/// A pre-transformed vertex of a texture rectangle, in window co-ordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TexRectVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rhw: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    /// Packed ARGB diffuse colour.
    pub dc_diffuse: u32,
    /// Packed ARGB specular colour.
    pub dc_specular: u32,
    pub u: f32,
    pub v: f32,
}

/// A corner of a rectangle, in window co-ordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

/// Unpack an ARGB colour into normalized RGBA.
pub fn unpack_argb(color: u32) -> [f32; 4] {
    let a = (color >> 24) as f32 / 255.0;
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    [r, g, b, a]
}

/// Conversion from window co-ordinates (origin top-left, in pixels) to
/// normalized device co-ordinates.
#[derive(Copy, Clone, Debug)]
pub struct Ndc {
    half_width: f32,
    half_height: f32,
}

impl Ndc {
    pub fn new(display_width: u32, display_height: u32) -> Ndc {
        Ndc {
            half_width: display_width as f32 / 2.0,
            half_height: display_height as f32 / 2.0,
        }
    }

    pub fn position(&self, x: f32, y: f32, z: f32) -> [f32; 4] {
        [-1.0 + x / self.half_width, 1.0 - y / self.half_height, z, 1.0]
    }
}

/// Fan for a texture rectangle. All vertices share the depth of the last one.
pub fn tex_rect_fan(vertices: &[TexRectVertex; 4], ndc: Ndc) -> [Vertex; 4] {
    let depth = -(vertices[3].z * 2.0 - 1.0);
    [3, 2, 1, 0].map(|i| {
        let vertex = &vertices[i];
        Vertex {
            position: ndc.position(vertex.x, vertex.y, depth),
            color: [vertex.r, vertex.g, vertex.b, vertex.a],
            tex_coord: [vertex.u, vertex.v],
        }
    })
}

/// Fan for a filled rectangle.
pub fn fill_rect_fan(corners: &[ScreenPoint; 2], color: u32, depth: f32, ndc: Ndc) -> [Vertex; 4] {
    let color = unpack_argb(color);
    let [p0, p1] = corners;
    [(p0.x, p1.y), (p1.x, p1.y), (p1.x, p0.y), (p0.x, p0.y)].map(|(x, y)| Vertex {
        position: ndc.position(x, y, depth),
        color,
        tex_coord: [0.0, 0.0],
    })
}

/// Vertices of a simple textured quad, before conversion.
#[allow(clippy::too_many_arguments)]
pub fn simple_2d_texture_vertices(
    (x0, y0, x1, y1): (f32, f32, f32, f32),
    (u0, v0, u1, v1): (f32, f32, f32, f32),
    dif: u32,
    spe: u32,
    z: f32,
    rhw: f32,
) -> [TexRectVertex; 4] {
    let [r, g, b, a] = unpack_argb(dif);
    [(x0, y0, u0, v0), (x1, y0, u1, v0), (x1, y1, u1, v1), (x0, y1, u0, v1)].map(|(x, y, u, v)| {
        TexRectVertex {
            x,
            y,
            z,
            rhw,
            r,
            g,
            b,
            a,
            dc_diffuse: dif,
            dc_specular: spe,
            u,
            v,
        }
    })
}

/// Two triangles for a simple textured quad, coloured by the first vertex.
pub fn simple_2d_texture_triangles(vertices: &[TexRectVertex; 4], ndc: Ndc) -> [Vertex; 6] {
    let color = unpack_argb(vertices[0].dc_diffuse);
    [0, 1, 2, 0, 2, 3].map(|i| {
        let vertex = &vertices[i];
        Vertex {
            position: ndc.position(vertex.x, vertex.y, -vertex.z),
            color,
            tex_coord: [vertex.u, vertex.v],
        }
    })
}

/// Fan for a simple coloured rectangle.
pub fn simple_rect_fan(corners: &[ScreenPoint; 2], color: u32, depth: f32, ndc: Ndc) -> [Vertex; 4] {
    let color = unpack_argb(color);
    let [p0, p1] = corners;
    [(p1.x, p0.y), (p1.x, p1.y), (p0.x, p1.y), (p0.x, p0.y)].map(|(x, y)| Vertex {
        position: ndc.position(x, y, -depth),
        color,
        tex_coord: [0.0, 0.0],
    })
}
