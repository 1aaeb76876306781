/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Translation of RDP/RSP render state into OpenGL state.
//!
//! The N64's rasterizer has a fixed-function pipeline with eight tile
//! descriptors, per-tile addressing modes, a z-bias, two kinds of scissor
//! rectangle and a handful of special-purpose rectangle primitives. The
//! [Renderer] maps all of that onto an abstract [GL] implementation, so the
//! same logic drives both the fixed-function and the shader-based generation
//! of OpenGL.
//!
//! Driver calls are expensive on the mobile GPUs this targets, so every state
//! change goes through the cache in [device_state] and is skipped if the value
//! is already current. Anything that talks to OpenGL directly behind the
//! renderer's back breaks that cache, so don't do it.
//!
//! The colour combiner is a separate component (see [Combiner]); the renderer
//! only pushes the alpha test threshold and fog switch to it.

pub mod device_state;
pub mod hardware;
pub mod pipeline;
pub mod primitives;
#[cfg(test)]
mod tests_support;
pub mod texture;

use crate::gles::gles2_raw as gl; // constants only
use crate::gles::gles2_raw::types::*;
use crate::gles::{Vertex, VertexBatch, GL};
use crate::options::Options;
use device_state::{update, GLRect, RenderDeviceState, ScissorSource, TEXTURE_UNITS};
use primitives::{Ndc, ScreenPoint, TexRectVertex};

pub use hardware::{HardwareProfile, PolygonOffset};
pub use pipeline::{Combiner, PipelineState};
pub use texture::{
    RenderTexture, TextureCacheEntry, TextureFilter, TextureHandler, TextureUVFlag, UVFlagMap,
    TILE_COUNT,
};

/// `glGetError` can report a backlog of errors, but a broken driver might
/// never stop reporting them.
const MAX_ERRORS_PER_CHECK: usize = 16;

pub struct Renderer {
    gl: Box<dyn GL>,
    combiner: Box<dyn Combiner>,
    state: RenderDeviceState,
    hardware: HardwareProfile,
    options: Options,
    /// State written by the command processor between calls.
    pub pipeline: PipelineState,
    textures: [RenderTexture; TILE_COUNT],
    tile_u_flags: [TextureUVFlag; TILE_COUNT],
    tile_v_flags: [TextureUVFlag; TILE_COUNT],
    uv_flag_map: UVFlagMap,
    min_filter: TextureFilter,
    mag_filter: TextureFilter,
    cull_front: bool,
    cull_back: bool,
    /// 1×1 transparent texture bound to disabled texture units.
    placeholder_texture: GLuint,
    /// Vertices for [Self::render_tex_rect], filled in by the caller.
    pub tex_rect_vertices: [TexRectVertex; 4],
    /// Corners for [Self::render_fill_rect], filled in by the caller.
    pub fill_rect_corners: [ScreenPoint; 2],
    /// Corners of the last [Self::draw_simple_rect].
    pub simple_rect_corners: [ScreenPoint; 2],
}

impl Renderer {
    /// Create a renderer for the current context. `detected_hardware` is the
    /// GPU family id reported by the platform, see [HardwareProfile].
    ///
    /// # Safety
    /// The context `gl` was created for must be current, and must still be
    /// current when the renderer is dropped.
    pub unsafe fn new(
        gl: Box<dyn GL>,
        combiner: Box<dyn Combiner>,
        detected_hardware: i32,
        options: Options,
    ) -> Renderer {
        let hardware = HardwareProfile::resolve(detected_hardware, options.hardware_override);
        log!("Using depth bias tuned for: {}", hardware.description());

        let mut renderer = Renderer {
            gl,
            combiner,
            state: RenderDeviceState::default(),
            hardware,
            options,
            pipeline: PipelineState::default(),
            textures: Default::default(),
            tile_u_flags: Default::default(),
            tile_v_flags: Default::default(),
            uv_flag_map: UVFlagMap::default(),
            min_filter: TextureFilter::default(),
            mag_filter: TextureFilter::default(),
            cull_front: false,
            cull_back: false,
            placeholder_texture: 0,
            tex_rect_vertices: Default::default(),
            fill_rect_corners: Default::default(),
            simple_rect_corners: Default::default(),
        };
        renderer.create_placeholder_texture();
        renderer
    }

    /// Rebuild everything after the context was lost and recreated. Textures
    /// recorded for tiles belonged to the old context, so they are forgotten.
    ///
    /// # Safety
    /// The context `gl` was created for must be current.
    pub unsafe fn reinitialize(&mut self, gl: Box<dyn GL>) {
        log!("Reinitializing after context loss");
        self.gl = gl;
        let z_bias = self.state.z_bias;
        let alpha_ref = self.state.alpha_ref;
        self.state.invalidate();
        self.state.z_bias = z_bias;
        self.state.alpha_ref = alpha_ref;
        self.textures = Default::default();
        self.create_placeholder_texture();
        self.initialize();
        self.init_device_objects();
        // A new context starts with culling off.
        self.set_cull_mode(self.cull_front, self.cull_back);
    }

    fn create_placeholder_texture(&mut self) {
        let mut name = [0];
        self.activate_unit(0);
        unsafe { self.gl.GenTextures(&mut name) };
        self.check_gl_errors("glGenTextures");
        unsafe { self.gl.BindTexture(gl::TEXTURE_2D, name[0]) };
        self.check_gl_errors("glBindTexture");
        // Without the min filter, the default mipmapped filter makes the
        // texture incomplete, and incomplete textures sample as opaque black.
        for pname in [gl::TEXTURE_MAG_FILTER, gl::TEXTURE_MIN_FILTER] {
            unsafe {
                self.gl
                    .TexParameteri(gl::TEXTURE_2D, pname, gl::LINEAR as _)
            };
            self.check_gl_errors("glTexParameteri");
        }
        unsafe {
            self.gl.TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as _,
                1,
                1,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                &[0, 0, 0, 0],
            )
        };
        self.check_gl_errors("glTexImage2D");
        self.placeholder_texture = name[0];
        self.state.bound_texture[0] = Some(name[0]);
    }

    /// Set up the viewport and pick the wrap modes the context supports.
    pub fn initialize(&mut self) {
        let viewport = self.pipeline.window.full_window_viewport();
        self.set_viewport(viewport, true);

        let mirror = unsafe {
            if self.gl.IsExtensionSupported("GL_IBM_texture_mirrored_repeat") {
                "GL_IBM_texture_mirrored_repeat"
            } else if self.gl.IsExtensionSupported("GL_ARB_texture_mirrored_repeat") {
                "GL_ARB_texture_mirrored_repeat"
            } else {
                "core"
            }
        };
        log_dbg!("Mirrored repeat from: {}", mirror);
        // The extensions and the core feature all use the same enum value.
        self.uv_flag_map.mirror = gl::MIRRORED_REPEAT;
        self.uv_flag_map.clamp = gl::CLAMP_TO_EDGE;
    }

    /// Default depth state.
    pub fn init_device_objects(&mut self) {
        self.zbuffer_enable(true);
        unsafe { self.gl.Enable(gl::DEPTH_TEST) };
        self.check_gl_errors("glEnable(GL_DEPTH_TEST)");
    }

    pub fn hardware(&self) -> HardwareProfile {
        self.hardware
    }
    pub fn options(&self) -> &Options {
        &self.options
    }
    /// For per-ROM settings that change when a game is loaded.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
    pub fn device_state(&self) -> &RenderDeviceState {
        &self.state
    }
    pub fn placeholder_texture(&self) -> GLuint {
        self.placeholder_texture
    }
    pub fn uv_flag_map(&self) -> &UVFlagMap {
        &self.uv_flag_map
    }

    /// Drain and log OpenGL errors. Errors are only ever diagnostic: they
    /// usually report misuse by some earlier call, not a failure of this one.
    fn check_gl_errors(&mut self, what: &str) {
        for _ in 0..MAX_ERRORS_PER_CHECK {
            let error = unsafe { self.gl.GetError() };
            if error == gl::NO_ERROR {
                return;
            }
            log!("OpenGL error {:#x} after {}", error, what);
        }
    }

    fn activate_unit(&mut self, unit: usize) {
        if update(&mut self.state.active_unit, unit) {
            unsafe { self.gl.ActiveTexture(gl::TEXTURE0 + unit as GLenum) };
            self.check_gl_errors("glActiveTexture");
        }
    }

    /// Bind a texture to a unit. While the unit is disabled, the texture is
    /// only remembered, and gets bound when the unit is enabled again.
    pub fn bind_texture(&mut self, texture: GLuint, unit: usize) {
        assert!(unit < TEXTURE_UNITS);
        self.state.unit_texture[unit] = Some(texture);
        if self.state.unit_enabled[unit] == Some(false) {
            return;
        }
        self.bind_on_unit(texture, unit);
    }

    fn bind_on_unit(&mut self, texture: GLuint, unit: usize) {
        if self.state.bound_texture[unit] == Some(texture) {
            return;
        }
        self.activate_unit(unit);
        unsafe { self.gl.BindTexture(gl::TEXTURE_2D, texture) };
        self.check_gl_errors("glBindTexture");
        self.state.bound_texture[unit] = Some(texture);
    }

    /// Turn texturing for a unit on or off. There is no "texturing off"
    /// switch in shader-based OpenGL, so a disabled unit gets the transparent
    /// placeholder texture, with blending on so that it is actually
    /// transparent.
    pub fn enable_tex_unit(&mut self, unit: usize, enabled: bool) {
        assert!(unit < TEXTURE_UNITS);
        if !update(&mut self.state.unit_enabled[unit], enabled) {
            return;
        }
        if enabled {
            if let Some(texture) = self.state.unit_texture[unit] {
                self.bind_on_unit(texture, unit);
            }
        } else {
            unsafe { self.gl.Enable(gl::BLEND) };
            self.check_gl_errors("glEnable(GL_BLEND)");
            self.bind_on_unit(self.placeholder_texture, unit);
        }
    }

    /// Leave only unit 0 enabled.
    pub fn disable_multi_texture(&mut self) {
        self.enable_tex_unit(1, false);
        self.enable_tex_unit(0, false);
        self.enable_tex_unit(0, true);
    }

    /// Record the texture for a tile. Texture metrics are only recomputed
    /// when the texture changes.
    pub fn set_tile_texture(
        &mut self,
        tile: usize,
        handler: Option<TextureHandler>,
        tile_width: u32,
        tile_height: u32,
        entry: Option<TextureCacheEntry>,
    ) {
        self.textures[tile].record(handler, tile_width, tile_height, entry);
    }

    /// Record the texture of a cache entry for a tile. Returns [false] if
    /// there is no texture, in which case the tile gets the default 64×64
    /// configuration with no texture, and texture co-ordinates computed for
    /// it will be meaningless.
    pub fn set_current_texture(&mut self, tile: usize, entry: Option<&TextureCacheEntry>) -> bool {
        match entry {
            Some(entry) if entry.texture.is_some() => {
                self.set_tile_texture(
                    tile,
                    entry.texture,
                    entry.width_to_create,
                    entry.height_to_create,
                    Some(*entry),
                );
                true
            }
            _ => {
                self.textures[tile] = RenderTexture::default();
                false
            }
        }
    }

    pub fn render_texture(&self, tile: usize) -> &RenderTexture {
        &self.textures[tile]
    }

    /// Set the horizontal addressing mode of a tile. Only one tile can be
    /// textured from at a time, so the mode is applied right away if the
    /// tile is the current one.
    pub fn set_texture_u_flag(&mut self, flag: TextureUVFlag, tile: usize) {
        self.tile_u_flags[tile] = flag;
        if tile == self.pipeline.rsp.cur_tile {
            self.bind_current_tile();
            self.set_tex_wrap_s(0, self.uv_flag_map.get(flag));
        }
    }

    /// Vertical counterpart of [Self::set_texture_u_flag].
    pub fn set_texture_v_flag(&mut self, flag: TextureUVFlag, tile: usize) {
        self.tile_v_flags[tile] = flag;
        if tile == self.pipeline.rsp.cur_tile {
            self.bind_current_tile();
            self.set_tex_wrap_t(0, self.uv_flag_map.get(flag));
        }
    }

    pub fn set_address_u_all_stages(&mut self, tile: usize, flag: TextureUVFlag) {
        self.set_texture_u_flag(flag, tile);
    }
    pub fn set_address_v_all_stages(&mut self, tile: usize, flag: TextureUVFlag) {
        self.set_texture_v_flag(flag, tile);
    }

    pub fn tile_uv_flags(&self, tile: usize) -> (TextureUVFlag, TextureUVFlag) {
        (self.tile_u_flags[tile], self.tile_v_flags[tile])
    }

    fn bind_current_tile(&mut self) {
        if let Some(texture) = self.textures[self.pipeline.rsp.cur_tile].name() {
            self.enable_tex_unit(0, true);
            self.bind_texture(texture, 0);
        }
    }

    pub fn set_tex_wrap_s(&mut self, unit: usize, flag: GLenum) {
        if unit != 0 {
            log!("Wrap mode for unit {} applied to unit 0", unit);
        }
        self.set_tex_wrap(gl::TEXTURE_WRAP_S, flag);
    }
    pub fn set_tex_wrap_t(&mut self, unit: usize, flag: GLenum) {
        if unit != 0 {
            log!("Wrap mode for unit {} applied to unit 0", unit);
        }
        self.set_tex_wrap(gl::TEXTURE_WRAP_T, flag);
    }

    /// Wrap modes are texture object state, so the cache is keyed on the
    /// bound texture as well as the mode.
    fn set_tex_wrap(&mut self, pname: GLenum, flag: GLenum) {
        let bound = self.state.bound_texture[0];
        let slot = if pname == gl::TEXTURE_WRAP_S {
            &mut self.state.wrap_s
        } else {
            &mut self.state.wrap_t
        };
        match bound {
            Some(texture) => {
                if !update(slot, (texture, flag)) {
                    return;
                }
            }
            None => *slot = None,
        }
        self.activate_unit(0);
        unsafe { self.gl.TexParameteri(gl::TEXTURE_2D, pname, flag as _) };
        self.check_gl_errors("glTexParameteri(GL_TEXTURE_WRAP_*)");
    }

    /// Set the filters [Self::apply_texture_filter] will apply.
    pub fn set_texture_filter(&mut self, min_filter: TextureFilter, mag_filter: TextureFilter) {
        self.min_filter = min_filter;
        self.mag_filter = mag_filter;
    }

    /// Apply the requested filters to the texture on unit 0, if that unit is
    /// enabled. Like wrap modes, filters are texture object state: a newly
    /// bound texture gets both, otherwise only the ones that changed are set.
    pub fn apply_texture_filter(&mut self) {
        if self.state.unit_enabled[0] != Some(true) {
            return;
        }
        let bound = self.state.bound_texture[0];
        let (min_filter, mag_filter) = (self.min_filter, self.mag_filter);

        if bound.is_none() || self.state.filter_texture != bound {
            self.state.filter_texture = bound;
            self.state.min_filter = Some(min_filter);
            self.state.mag_filter = Some(mag_filter);
            self.apply_filter(gl::TEXTURE_MIN_FILTER, min_filter);
            self.apply_filter(gl::TEXTURE_MAG_FILTER, mag_filter);
        } else {
            if update(&mut self.state.min_filter, min_filter) {
                self.apply_filter(gl::TEXTURE_MIN_FILTER, min_filter);
            }
            if update(&mut self.state.mag_filter, mag_filter) {
                self.apply_filter(gl::TEXTURE_MAG_FILTER, mag_filter);
            }
        }
    }

    fn apply_filter(&mut self, pname: GLenum, filter: TextureFilter) {
        self.activate_unit(0);
        unsafe {
            self.gl
                .TexParameteri(gl::TEXTURE_2D, pname, filter.gl_filter() as _)
        };
        self.check_gl_errors("glTexParameteri(GL_TEXTURE_*_FILTER)");
    }

    /// Set the z-bias and apply it.
    pub fn set_z_bias(&mut self, bias: i32) {
        self.state.z_bias = bias;
        self.apply_z_bias(bias);
    }

    /// Apply a z-bias. Only the sign matters: the offset for a positive bias
    /// is a fixed constant for the GPU family.
    pub fn apply_z_bias(&mut self, bias: i32) {
        let offset = self.hardware.polygon_offset(bias);
        if !update(&mut self.state.polygon_offset, offset) {
            return;
        }
        unsafe {
            if offset.enabled {
                self.gl.Enable(gl::POLYGON_OFFSET_FILL);
            } else {
                self.gl.Disable(gl::POLYGON_OFFSET_FILL);
            }
        }
        self.check_gl_errors("glEnable/glDisable(GL_POLYGON_OFFSET_FILL)");
        unsafe { self.gl.PolygonOffset(offset.factor, offset.units) };
        self.check_gl_errors("glPolygonOffset");
    }

    fn set_depth_mask(&mut self, enabled: bool) {
        unsafe {
            self.gl
                .DepthMask(if enabled { gl::TRUE } else { gl::FALSE })
        };
        self.check_gl_errors("glDepthMask");
    }

    fn set_depth_func(&mut self, enabled: bool) {
        unsafe {
            self.gl
                .DepthFunc(if enabled { gl::LEQUAL } else { gl::ALWAYS })
        };
        self.check_gl_errors("glDepthFunc");
    }

    /// Turn depth testing and depth writes on or off together. The game's
    /// request is recorded even if the ROM settings force depth on.
    pub fn zbuffer_enable(&mut self, enable: bool) {
        self.pipeline.rsp.zbuffer_enabled = enable;
        let enable = enable || self.options.force_depth_buffer;
        self.set_depth_mask(enable);
        self.set_depth_func(enable);
    }

    pub fn set_z_compare(&mut self, enable: bool) {
        let enable = enable || self.options.force_depth_buffer;
        self.pipeline.rsp.zbuffer_enabled = enable;
        self.set_depth_func(enable);
    }

    pub fn set_z_update(&mut self, enable: bool) {
        let enable = enable || self.options.force_depth_buffer;
        self.set_depth_mask(enable);
    }

    /// Clear the colour and/or depth buffer. The depth is taken from the RDP
    /// fill colour, which is how games clear the depth buffer.
    pub fn clear_buffer(&mut self, color: bool, depth: bool) {
        let mut mask = 0;
        if color {
            mask |= gl::COLOR_BUFFER_BIT;
        }
        if depth {
            mask |= gl::DEPTH_BUFFER_BIT;
        }
        let fill = self.pipeline.rdp.original_fill_color;
        let clear_depth = ((fill & 0xFFFF) >> 2) as f32 / 0x3FFF as f32;
        unsafe { self.gl.ClearDepthf(clear_depth) };
        self.check_gl_errors("glClearDepthf");
        unsafe { self.gl.Clear(mask) };
        self.check_gl_errors("glClear");
    }

    pub fn clear_z_buffer(&mut self, depth: f32) {
        unsafe { self.gl.ClearDepthf(depth) };
        self.check_gl_errors("glClearDepthf");
        unsafe { self.gl.Clear(gl::DEPTH_BUFFER_BIT) };
        self.check_gl_errors("glClear");
    }

    pub fn set_cull_mode(&mut self, cull_front: bool, cull_back: bool) {
        self.cull_front = cull_front;
        self.cull_back = cull_back;
        let mode = match (cull_front, cull_back) {
            (true, true) => Some(gl::FRONT_AND_BACK),
            (true, false) => Some(gl::FRONT),
            (false, true) => Some(gl::BACK),
            (false, false) => None,
        };
        if let Some(mode) = mode {
            unsafe { self.gl.CullFace(mode) };
            self.check_gl_errors("glCullFace");
            unsafe { self.gl.Enable(gl::CULL_FACE) };
            self.check_gl_errors("glEnable(GL_CULL_FACE)");
        } else {
            unsafe { self.gl.Disable(gl::CULL_FACE) };
            self.check_gl_errors("glDisable(GL_CULL_FACE)");
        }
    }

    pub fn cull_mode(&self) -> (bool, bool) {
        (self.cull_front, self.cull_back)
    }

    /// Set the alpha test threshold (0 to 255). Takes effect the next time
    /// the alpha test is enabled.
    pub fn set_alpha_ref(&mut self, alpha: u32) {
        if self.state.alpha_ref != Some(alpha) {
            self.force_alpha_ref(alpha);
        }
    }

    pub fn force_alpha_ref(&mut self, alpha: u32) {
        self.state.alpha_ref = Some(alpha);
    }

    /// The alpha test is done by the combiner's shader. A threshold of zero
    /// passes everything.
    pub fn set_alpha_test_enable(&mut self, enable: bool) {
        let alpha_ref = if enable {
            self.state.alpha_ref.unwrap_or(0) as f32 / 255.0
        } else {
            0.0
        };
        self.combiner.set_alpha_ref(alpha_ref);
    }

    /// Turn fog on or off, subject to the configured [crate::options::FogMethod].
    pub fn set_fog_enable(&mut self, enable: bool) {
        let enable = self.options.fog_method.apply(enable);
        self.pipeline.rsp.fog_enabled = enable;
        self.combiner.update_fog(enable);
    }

    /// Switch the combiner's fog without changing the logical fog state.
    pub fn turn_fog_on_off(&mut self, on: bool) {
        self.combiner.update_fog(on);
    }

    pub fn set_fog_min_max(&mut self, fog_min: f32, fog_max: f32) {
        self.pipeline.rsp.fog_min = fog_min;
        self.pipeline.rsp.fog_max = fog_max;
        self.combiner.update_fog(self.pipeline.rsp.fog_enabled);
    }

    /// Set the fog colour from 8-bit components.
    pub fn set_fog_color(&mut self, r: u32, g: u32, b: u32, a: u32) {
        let rdp = &mut self.pipeline.rdp;
        rdp.fog_color = ((a & 0xFF) << 24) | ((r & 0xFF) << 16) | ((g & 0xFF) << 8) | (b & 0xFF);
        rdp.fog_color_f = [r, g, b, a].map(|c| c as f32 / 255.0);
    }

    fn set_viewport(&mut self, rect: (i32, i32, i32, i32), flag: bool) {
        let rect = GLRect::from(rect);
        if update(&mut self.state.viewport, (rect, flag)) {
            unsafe { self.gl.Viewport(rect.x, rect.y, rect.width, rect.height) };
            self.check_gl_errors("glViewport");
        }
    }

    /// Set the viewport to the N64 viewport.
    pub fn set_viewport_render(&mut self) {
        let rect = self.pipeline.window.render_viewport();
        self.set_viewport(rect, true);
    }

    fn set_scissor_test(&mut self, enabled: bool) {
        if !update(&mut self.state.scissor_test, enabled) {
            return;
        }
        unsafe {
            if enabled {
                self.gl.Enable(gl::SCISSOR_TEST);
            } else {
                self.gl.Disable(gl::SCISSOR_TEST);
            }
        }
        self.check_gl_errors("glEnable/glDisable(GL_SCISSOR_TEST)");
    }

    fn set_scissor_rect(&mut self, rect: GLRect) {
        self.set_scissor_test(true);
        if update(&mut self.state.scissor_rect, rect) {
            unsafe { self.gl.Scissor(rect.x, rect.y, rect.width, rect.height) };
            self.check_gl_errors("glScissor");
        }
    }

    /// Resident Evil 2 renders into a 512-pixel-wide colour image with a
    /// matching scissor, while the video interface shows something narrower.
    /// The scissor has to be recomputed from the real output width.
    fn re2_scissor_workaround(&self) -> Option<GLRect> {
        if !self.options.enable_hacks {
            return None;
        }
        let pipeline = &self.pipeline;
        let width = pipeline.vi_width_reg & 0xFFF;
        if pipeline.color_image_width != 0x200
            || pipeline.rdp.scissor.right != 0x200
            || pipeline.color_image_width <= width
            || width == 0
        {
            return None;
        }
        let height = pipeline.rdp.scissor.right * pipeline.rdp.scissor.bottom / width;
        let window = &pipeline.window;
        Some(GLRect {
            x: window.xpos,
            y: (height as f32 * window.mult_y + window.ypos as f32) as i32,
            width: (width as f32 * window.mult_x) as i32,
            height: (height as f32 * window.mult_y) as i32,
        })
    }

    fn rdp_scissor_rect(&self) -> GLRect {
        let scissor = &self.pipeline.rdp.scissor;
        let window = &self.pipeline.window;
        let (left, top) = (scissor.left as f32, scissor.top as f32);
        let (right, bottom) = (scissor.right as f32, scissor.bottom as f32);
        GLRect {
            x: (left * window.mult_x + window.xpos as f32) as i32,
            y: ((window.vi_height as f32 - bottom) * window.mult_y + window.ypos as f32) as i32,
            width: ((right - left) * window.mult_x) as i32,
            height: ((bottom - top) * window.mult_y) as i32,
        }
    }

    /// Apply the RDP scissor rectangle, unless it is already applied.
    pub fn apply_rdp_scissor(&mut self, force: bool) {
        if !force && self.state.scissor_source == Some(ScissorSource::Rdp) {
            return;
        }
        let rect = self
            .re2_scissor_workaround()
            .unwrap_or_else(|| self.rdp_scissor_rect());
        self.set_scissor_rect(rect);
        self.state.scissor_source = Some(ScissorSource::Rdp);
    }

    /// Apply the scissor rectangle derived from the RSP clip ratio, unless it
    /// is already applied.
    pub fn apply_scissor_with_clip_ratio(&mut self, force: bool) {
        if !force && self.state.scissor_source == Some(ScissorSource::Rsp) {
            return;
        }
        let window = &self.pipeline.window;
        let bottom = self.pipeline.rsp.real_clip_scissor_bottom;
        let rect = GLRect {
            x: window.clipping.left + window.xpos,
            y: ((window.vi_height as f32 - bottom) * window.mult_y) as i32 + window.ypos,
            width: window.clipping.width,
            height: window.clipping.height,
        };
        self.set_scissor_rect(rect);
        self.state.scissor_source = Some(ScissorSource::Rsp);
    }

    pub fn update_scissor(&mut self) {
        if let Some(rect) = self.re2_scissor_workaround() {
            self.set_scissor_rect(rect);
        } else {
            self.apply_scissor_with_clip_ratio(true);
        }
    }

    fn ndc(&self) -> Ndc {
        Ndc::new(
            self.pipeline.window.display_width,
            self.pipeline.window.display_height,
        )
    }

    /// Draw a screen-space primitive. These are never culled, whatever the
    /// winding of the triangles is.
    fn draw_overlay(&mut self, mode: GLenum, vertices: &[Vertex], textured: bool) {
        let cull_face = unsafe { self.gl.IsEnabled(gl::CULL_FACE) } != gl::FALSE;
        self.check_gl_errors("glIsEnabled(GL_CULL_FACE)");
        unsafe { self.gl.Disable(gl::CULL_FACE) };
        self.check_gl_errors("glDisable(GL_CULL_FACE)");

        unsafe { self.gl.DrawVertices(mode, vertices, textured) };
        self.check_gl_errors("drawing primitive");

        if cull_face {
            unsafe { self.gl.Enable(gl::CULL_FACE) };
            self.check_gl_errors("glEnable(GL_CULL_FACE)");
        }
    }

    /// Draw a texture rectangle from [Self::tex_rect_vertices].
    pub fn render_tex_rect(&mut self) {
        let viewport = self.pipeline.window.full_window_viewport();
        self.set_viewport(viewport, true);
        let vertices = primitives::tex_rect_fan(&self.tex_rect_vertices, self.ndc());
        self.draw_overlay(gl::TRIANGLE_FAN, &vertices, true);
    }

    /// Draw a filled rectangle over [Self::fill_rect_corners]. The colour is
    /// packed ARGB.
    pub fn render_fill_rect(&mut self, color: u32, depth: f32) {
        let viewport = self.pipeline.window.full_window_viewport();
        self.set_viewport(viewport, true);
        let vertices = primitives::fill_rect_fan(&self.fill_rect_corners, color, depth, self.ndc());
        self.draw_overlay(gl::TRIANGLE_FAN, &vertices, false);
    }

    /// Draw a textured quad coloured with the packed ARGB colour `dif`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_simple_2d_texture(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        u0: f32,
        v0: f32,
        u1: f32,
        v1: f32,
        dif: u32,
        spe: u32,
        z: f32,
        rhw: f32,
    ) {
        self.tex_rect_vertices = primitives::simple_2d_texture_vertices(
            (x0, y0, x1, y1),
            (u0, v0, u1, v1),
            dif,
            spe,
            z,
            rhw,
        );
        let viewport = self.pipeline.window.full_window_viewport();
        self.set_viewport(viewport, true);
        let vertices = primitives::simple_2d_texture_triangles(&self.tex_rect_vertices, self.ndc());
        self.draw_overlay(gl::TRIANGLES, &vertices, true);
    }

    /// Draw an untextured rectangle in the current viewport. The colour is
    /// packed ARGB.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_simple_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: u32,
        depth: f32,
        _rhw: f32,
    ) {
        self.simple_rect_corners = [
            ScreenPoint {
                x: x0 as f32,
                y: y0 as f32,
            },
            ScreenPoint {
                x: x1 as f32,
                y: y1 as f32,
            },
        ];
        let vertices =
            primitives::simple_rect_fan(&self.simple_rect_corners, color, depth, self.ndc());
        self.draw_overlay(gl::TRIANGLE_FAN, &vertices, false);
    }

    /// Draw the batch of triangles the RSP produced.
    pub fn render_flush_tris(&mut self, batch: &VertexBatch<'_>) {
        // Fog the blender doesn't handle must not apply to the batch.
        let suspend_fog =
            !self.pipeline.rdp.fog_enable_in_blender && self.pipeline.rsp.fog_enabled;
        if suspend_fog {
            self.turn_fog_on_off(false);
        }

        self.apply_z_bias(self.state.z_bias);

        let viewport = self.pipeline.window.render_viewport();
        self.set_viewport(viewport, false);

        unsafe { self.gl.DrawBatch(batch) };
        self.check_gl_errors("glDrawElements");

        if suspend_fog {
            self.turn_fog_on_off(true);
        }
    }

    /// State for drawing simple rectangles: no texture, alpha blending.
    pub fn init_combiner_blender_for_simple_rect_draw(&mut self) {
        self.enable_tex_unit(0, false);
        unsafe { self.gl.Enable(gl::BLEND) };
        self.check_gl_errors("glEnable(GL_BLEND)");
        unsafe { self.gl.BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA) };
        self.check_gl_errors("glBlendFunc");
    }
}

impl Drop for Renderer {
    /// The context must still be current. Tile textures belong to the
    /// texture cache, so only the placeholder is deleted.
    fn drop(&mut self) {
        unsafe { self.gl.DeleteTextures(&[self.placeholder_texture]) };
        self.check_gl_errors("glDeleteTextures");
    }
}
