/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Frame state owned by the command processor, and the combiner interface.
//!
//! The renderer only reads this state, with a few documented exceptions where
//! it writes back an effective value (e.g. [RspState::zbuffer_enabled]). The
//! command processor is expected to update it between renderer calls through
//! [super::Renderer::pipeline].

/// The colour combiner, which is implemented as a shader by its owner. The
/// renderer only pushes the few parameters that it is responsible for.
pub trait Combiner {
    /// Set the alpha test threshold, in the range 0.0 to 1.0. Zero means the
    /// alpha test is off.
    fn set_alpha_ref(&mut self, alpha_ref: f32);
    /// Turn fog blending in the combiner on or off. This is also called when
    /// the fog range changes, so the combiner can pick up the new values.
    fn update_fog(&mut self, enabled: bool);
}

/// Signal processor state relevant to rendering.
#[derive(Clone, Debug, Default)]
pub struct RspState {
    /// Index of the tile that primitives are currently textured from.
    pub cur_tile: usize,
    pub zbuffer_enabled: bool,
    pub fog_enabled: bool,
    pub fog_min: f32,
    pub fog_max: f32,
    /// Bottom edge of the clip rectangle in N64 screen co-ordinates.
    pub real_clip_scissor_bottom: f32,
}

/// An RDP scissor rectangle, in N64 screen co-ordinates. The right and bottom
/// edges are exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScissorRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Rasterizer state relevant to rendering.
#[derive(Clone, Debug, Default)]
pub struct RdpState {
    pub scissor: ScissorRect,
    /// Whether the current blender mode already accounts for fog.
    pub fog_enable_in_blender: bool,
    /// Packed RGBA fog colour.
    pub fog_color: u32,
    pub fog_color_f: [f32; 4],
    /// The fill colour as the game set it, before any conversion.
    pub original_fill_color: u32,
}

/// Clip rectangle in window co-ordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Mapping from the N64 framebuffer to the window.
#[derive(Clone, Debug)]
pub struct WindowSetting {
    /// Offset of the rendering area within the window.
    pub xpos: i32,
    pub ypos: i32,
    pub display_width: u32,
    pub display_height: u32,
    /// Height of the N64 video output.
    pub vi_height: u32,
    /// Scale from N64 to window co-ordinates.
    pub mult_x: f32,
    pub mult_y: f32,
    /// The N64 viewport, already scaled to window co-ordinates.
    pub vp_left: i32,
    pub vp_top: i32,
    pub vp_width: i32,
    pub vp_height: i32,
    pub clipping: ClipRect,
}

impl Default for WindowSetting {
    fn default() -> Self {
        WindowSetting {
            xpos: 0,
            ypos: 0,
            display_width: 320,
            display_height: 240,
            vi_height: 240,
            mult_x: 1.0,
            mult_y: 1.0,
            vp_left: 0,
            vp_top: 0,
            vp_width: 320,
            vp_height: 240,
            clipping: ClipRect {
                left: 0,
                top: 0,
                width: 320,
                height: 240,
            },
        }
    }
}

impl WindowSetting {
    /// `glViewport` parameters covering the whole rendering area.
    pub fn full_window_viewport(&self) -> (i32, i32, i32, i32) {
        (
            self.xpos,
            self.ypos,
            self.display_width as i32,
            self.display_height as i32,
        )
    }

    /// `glViewport` parameters for the N64 viewport. OpenGL's origin is the
    /// bottom-left corner, the N64's is the top-left.
    pub fn render_viewport(&self) -> (i32, i32, i32, i32) {
        (
            self.vp_left + self.xpos,
            self.display_height as i32 - self.vp_top - self.vp_height + self.ypos,
            self.vp_width,
            self.vp_height,
        )
    }
}

/// Everything the renderer reads from the rest of the plugin.
#[derive(Clone, Debug, Default)]
pub struct PipelineState {
    pub rsp: RspState,
    pub rdp: RdpState,
    pub window: WindowSetting,
    /// Width of the current colour image (framebuffer) in pixels.
    pub color_image_width: u32,
    /// Raw value of the video interface's width register.
    pub vi_width_reg: u32,
}
