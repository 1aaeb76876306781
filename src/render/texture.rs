/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Tile texture records and the tables mapping N64 texture modes to OpenGL.

use crate::gles::gles2_raw as gl; // constants only
use crate::gles::gles2_raw::types::{GLenum, GLuint};

/// Number of tile descriptors the RDP has.
pub const TILE_COUNT: usize = 8;

/// View of a texture owned by the texture cache. Its identity is the OpenGL
/// texture name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextureHandler {
    pub name: GLuint,
    pub created_width: u32,
    pub created_height: u32,
    /// Whether this is a higher-resolution replacement for the original
    /// texture.
    pub is_enhanced: bool,
}

/// View of a texture cache entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextureCacheEntry {
    /// The texture created for the entry, if creation succeeded.
    pub texture: Option<TextureHandler>,
    pub width_to_create: u32,
    pub height_to_create: u32,
}

/// What the renderer knows about the texture of one tile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderTexture {
    pub handler: Option<TextureHandler>,
    pub entry: Option<TextureCacheEntry>,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Size of the texture that is actually bound, which texture co-ordinates
    /// are scaled against.
    pub tex_width: f32,
    pub tex_height: f32,
}

impl Default for RenderTexture {
    fn default() -> Self {
        RenderTexture {
            handler: None,
            entry: None,
            tile_width: 64,
            tile_height: 64,
            tex_width: 0.0,
            tex_height: 0.0,
        }
    }
}

impl RenderTexture {
    /// OpenGL name of the recorded texture.
    pub fn name(&self) -> Option<GLuint> {
        self.handler.map(|handler| handler.name)
    }

    /// Record a texture for this tile. Nothing but the entry changes if the
    /// same texture is already recorded.
    pub fn record(
        &mut self,
        handler: Option<TextureHandler>,
        tile_width: u32,
        tile_height: u32,
        entry: Option<TextureCacheEntry>,
    ) {
        self.entry = entry;

        let Some(handler) = handler else {
            return;
        };
        if self.name() == Some(handler.name) {
            return;
        }

        self.handler = Some(handler);
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        // An enhanced texture's own size is the replacement's size; the size
        // to scale against comes from the entry's texture.
        let sized_by = if handler.is_enhanced {
            entry.and_then(|entry| entry.texture).unwrap_or(handler)
        } else {
            handler
        };
        self.tex_width = sized_by.created_width as f32;
        self.tex_height = sized_by.created_height as f32;
    }
}

/// N64 texture addressing mode for one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextureUVFlag {
    #[default]
    Wrap,
    Mirror,
    Clamp,
}

/// Mapping from [TextureUVFlag] to the OpenGL wrap mode. The defaults work on
/// every supported context; [super::Renderer::initialize] may substitute
/// better ones once it knows the context.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UVFlagMap {
    pub wrap: GLenum,
    pub mirror: GLenum,
    pub clamp: GLenum,
}

impl Default for UVFlagMap {
    fn default() -> Self {
        UVFlagMap {
            wrap: gl::REPEAT,
            mirror: gl::MIRRORED_REPEAT,
            clamp: gl::CLAMP_TO_EDGE,
        }
    }
}

impl UVFlagMap {
    pub fn get(&self, flag: TextureUVFlag) -> GLenum {
        match flag {
            TextureUVFlag::Wrap => self.wrap,
            TextureUVFlag::Mirror => self.mirror,
            TextureUVFlag::Clamp => self.clamp,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextureFilter {
    #[default]
    Point,
    Linear,
}

impl TextureFilter {
    pub fn gl_filter(self) -> GLenum {
        match self {
            TextureFilter::Point => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(name: GLuint, width: u32, height: u32, is_enhanced: bool) -> TextureHandler {
        TextureHandler {
            name,
            created_width: width,
            created_height: height,
            is_enhanced,
        }
    }

    #[test]
    fn record_uses_handler_size() {
        let mut texture = RenderTexture::default();
        texture.record(Some(handler(3, 32, 16, false)), 30, 15, None);
        assert_eq!(texture.name(), Some(3));
        assert_eq!((texture.tile_width, texture.tile_height), (30, 15));
        assert_eq!((texture.tex_width, texture.tex_height), (32.0, 16.0));
    }

    #[test]
    fn record_enhanced_uses_entry_size() {
        let entry = TextureCacheEntry {
            texture: Some(handler(4, 64, 64, false)),
            width_to_create: 64,
            height_to_create: 64,
        };
        let mut texture = RenderTexture::default();
        texture.record(Some(handler(5, 256, 256, true)), 64, 64, Some(entry));
        assert_eq!(texture.name(), Some(5));
        assert_eq!((texture.tex_width, texture.tex_height), (64.0, 64.0));
    }

    #[test]
    fn record_same_texture_keeps_metrics() {
        let mut texture = RenderTexture::default();
        texture.record(Some(handler(3, 32, 16, false)), 30, 15, None);
        // Same name, different metrics: only the entry is replaced.
        texture.record(Some(handler(3, 128, 128, false)), 100, 100, None);
        assert_eq!((texture.tile_width, texture.tile_height), (30, 15));
        assert_eq!((texture.tex_width, texture.tex_height), (32.0, 16.0));
    }

    #[test]
    fn tables() {
        let map = UVFlagMap::default();
        assert_eq!(map.get(TextureUVFlag::Wrap), gl::REPEAT);
        assert_eq!(map.get(TextureUVFlag::Mirror), gl::MIRRORED_REPEAT);
        assert_eq!(map.get(TextureUVFlag::Clamp), gl::CLAMP_TO_EDGE);
        assert_eq!(TextureFilter::Point.gl_filter(), gl::NEAREST);
        assert_eq!(TextureFilter::Linear.gl_filter(), gl::LINEAR);
    }
}
