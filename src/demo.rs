/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Stand-alone demo that drives the renderer in a window of its own.
//!
//! The emulator core normally provides the context, the texture cache and the
//! colour combiner. Here, there is a window from [crate::window], two
//! hard-coded textures, and a trivial combiner that just modulates the vertex
//! colour with the texture.

use crate::gles::gles2::{ATTRIB_COLOR, ATTRIB_POSITION, ATTRIB_TEXCOORD0};
use crate::gles::gles2_raw as gl;
use crate::gles::gles2_raw::types::*;
use crate::gles::{self, GLImplementation, GL};
use crate::options::{Options, DOCUMENTATION};
use crate::render::primitives::ScreenPoint;
use crate::render::{
    Combiner, Renderer, TextureCacheEntry, TextureFilter, TextureHandler, TextureUVFlag,
};
use crate::window::{Event, Window};
use std::cell::Cell;
use std::rc::Rc;

const USAGE: &str = "\
Usage:
    rdpgl-demo [options]

Draws a few primitives through the renderer, then exits.

Special options:
    --help
        Display this help text.

    --frames=...
        Number of frames to draw before exiting. The default is 300.
";

/// The N64 framebuffer size the demo pretends to render.
const N64_WIDTH: u32 = 320;
const N64_HEIGHT: u32 = 240;

const CHECKER_SIZE: u32 = 8;

const VERTEX_SHADER_SRC: &str = "
#version 100
attribute vec4 position;
attribute vec4 color;
attribute vec2 texCoord0;
varying vec4 vColor;
varying vec2 vTexCoord;
void main() {
gl_Position = position;
vColor = color;
vTexCoord = texCoord0;
}
";

const FRAGMENT_SHADER_SRC: &str = "
#version 100
precision mediump float;
uniform sampler2D tex;
uniform float alphaRef;
varying vec4 vColor;
varying vec2 vTexCoord;
void main() {
vec4 c = vColor * texture2D(tex, vTexCoord);
if (c.a < alphaRef) {
    discard;
}
gl_FragColor = c;
}
";

/// Textures owned by the demo rather than the renderer.
struct DemoTextures {
    checker: TextureCacheEntry,
    /// 1×1 white texture, so that untextured primitives get their vertex
    /// colour with the modulating combiner.
    white: GLuint,
}

unsafe fn upload_texture(ctx: &mut dyn GL, width: u32, height: u32, pixels: &[u8]) -> GLuint {
    let mut name = [0];
    ctx.GenTextures(&mut name);
    ctx.BindTexture(gl::TEXTURE_2D, name[0]);
    ctx.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as _);
    ctx.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as _);
    ctx.TexImage2D(
        gl::TEXTURE_2D,
        0,
        gl::RGBA as _,
        width as _,
        height as _,
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        pixels,
    );
    name[0]
}

/// Upload the demo's textures. This must happen before the [GL] object is
/// handed to the renderer, since the renderer assumes it owns all state.
unsafe fn upload_textures(ctx: &mut dyn GL) -> DemoTextures {
    let mut pixels = Vec::with_capacity((CHECKER_SIZE * CHECKER_SIZE * 4) as usize);
    for y in 0..CHECKER_SIZE {
        for x in 0..CHECKER_SIZE {
            let texel: [u8; 4] = if (x + y) % 2 == 0 {
                [255, 255, 255, 255]
            } else {
                [64, 64, 160, 255]
            };
            pixels.extend_from_slice(&texel);
        }
    }
    let checker = upload_texture(ctx, CHECKER_SIZE, CHECKER_SIZE, &pixels);
    let white = upload_texture(ctx, 1, 1, &[255, 255, 255, 255]);

    let handler = TextureHandler {
        name: checker,
        created_width: CHECKER_SIZE,
        created_height: CHECKER_SIZE,
        is_enhanced: false,
    };
    DemoTextures {
        checker: TextureCacheEntry {
            texture: Some(handler),
            width_to_create: CHECKER_SIZE,
            height_to_create: CHECKER_SIZE,
        },
        white,
    }
}

/// Compile and link the modulating shader. Only needed for OpenGL ES 2.0;
/// the fixed-function pipeline modulates by default. Returns the location of
/// the alpha test uniform.
unsafe fn create_shader_program() -> Result<GLint, String> {
    let vertex_shader = gl::CreateShader(gl::VERTEX_SHADER);
    gl::ShaderSource(
        vertex_shader,
        1,
        &(VERTEX_SHADER_SRC.as_ptr() as *const _),
        &(VERTEX_SHADER_SRC.len() as _),
    );
    gl::CompileShader(vertex_shader);

    let fragment_shader = gl::CreateShader(gl::FRAGMENT_SHADER);
    gl::ShaderSource(
        fragment_shader,
        1,
        &(FRAGMENT_SHADER_SRC.as_ptr() as *const _),
        &(FRAGMENT_SHADER_SRC.len() as _),
    );
    gl::CompileShader(fragment_shader);

    let shader_program = gl::CreateProgram();
    gl::AttachShader(shader_program, vertex_shader);
    gl::AttachShader(shader_program, fragment_shader);
    // The GL implementation submits vertex data at fixed locations.
    gl::BindAttribLocation(
        shader_program,
        ATTRIB_POSITION,
        "position\0".as_ptr() as *const _,
    );
    gl::BindAttribLocation(shader_program, ATTRIB_COLOR, "color\0".as_ptr() as *const _);
    gl::BindAttribLocation(
        shader_program,
        ATTRIB_TEXCOORD0,
        "texCoord0\0".as_ptr() as *const _,
    );
    gl::LinkProgram(shader_program);
    gl::DeleteShader(vertex_shader);
    gl::DeleteShader(fragment_shader);

    let mut linked = 0;
    gl::GetProgramiv(shader_program, gl::LINK_STATUS, &mut linked);
    if linked == 0 {
        gl::DeleteProgram(shader_program);
        return Err("Demo shader program failed to link".to_string());
    }
    gl::UseProgram(shader_program);

    let tex_uniform = gl::GetUniformLocation(shader_program, "tex\0".as_ptr() as *const _);
    gl::Uniform1i(tex_uniform, 0);
    Ok(gl::GetUniformLocation(
        shader_program,
        "alphaRef\0".as_ptr() as *const _,
    ))
}

/// Location of the alpha test uniform, if there's a shader. Shared with the
/// main loop, which recreates the shader when the context is lost.
type AlphaRefUniform = Rc<Cell<Option<GLint>>>;

struct DemoCombiner {
    alpha_ref_uniform: AlphaRefUniform,
}

impl Combiner for DemoCombiner {
    fn set_alpha_ref(&mut self, alpha_ref: f32) {
        if let Some(location) = self.alpha_ref_uniform.get() {
            unsafe { gl::Uniform1f(location, alpha_ref) };
        }
    }
    fn update_fog(&mut self, enabled: bool) {
        log_dbg!("Fog is now {}", if enabled { "on" } else { "off" });
    }
}

/// Set up the shader side of the combiner for a new context.
fn init_combiner(
    implementation: GLImplementation,
    alpha_ref_uniform: &AlphaRefUniform,
) -> Result<(), String> {
    let location = match implementation {
        GLImplementation::GLES2 => Some(unsafe { create_shader_program()? }),
        GLImplementation::GL21Compat => None,
    };
    alpha_ref_uniform.set(location);
    Ok(())
}

/// Map the N64 framebuffer onto the whole window.
fn set_up_window_mapping(renderer: &mut Renderer, (width, height): (u32, u32)) {
    let window = &mut renderer.pipeline.window;
    window.display_width = width;
    window.display_height = height;
    window.vi_height = N64_HEIGHT;
    window.mult_x = width as f32 / N64_WIDTH as f32;
    window.mult_y = height as f32 / N64_HEIGHT as f32;
    window.vp_left = 0;
    window.vp_top = 0;
    window.vp_width = width as i32;
    window.vp_height = height as i32;
    window.clipping.width = width as i32;
    window.clipping.height = height as i32;
    renderer.pipeline.rsp.real_clip_scissor_bottom = N64_HEIGHT as f32;
    renderer.pipeline.rdp.scissor.right = N64_WIDTH;
    renderer.pipeline.rdp.scissor.bottom = N64_HEIGHT;
}

fn draw_frame(renderer: &mut Renderer, textures: &DemoTextures, frame: u32) {
    let (width, height) = {
        let window = &renderer.pipeline.window;
        (window.display_width as f32, window.display_height as f32)
    };

    renderer.apply_rdp_scissor(false);
    // Depth is cleared to the maximum, like games do with a 0xFFFC fill.
    renderer.pipeline.rdp.original_fill_color = 0xFFFC_FFFC;
    renderer.clear_buffer(true, true);

    // Background band, untextured.
    renderer.enable_tex_unit(0, true);
    renderer.bind_texture(textures.white, 0);
    renderer.fill_rect_corners = [
        ScreenPoint {
            x: 0.0,
            y: height * 0.75,
        },
        ScreenPoint {
            x: width,
            y: height,
        },
    ];
    renderer.render_fill_rect(0xFF20_6040, 0.0);

    // A checkerboard that slides to the right.
    renderer.pipeline.rsp.cur_tile = 0;
    renderer.set_current_texture(0, Some(&textures.checker));
    renderer.set_texture_u_flag(TextureUVFlag::Wrap, 0);
    renderer.set_texture_v_flag(TextureUVFlag::Mirror, 0);
    renderer.set_texture_filter(TextureFilter::Point, TextureFilter::Point);
    renderer.apply_texture_filter();
    let offset = (frame % 120) as f32 / 120.0 * width * 0.5;
    renderer.draw_simple_2d_texture(
        offset,
        height * 0.1,
        offset + width * 0.4,
        height * 0.6,
        0.0,
        0.0,
        4.0,
        4.0,
        0xFFFF_FFFF,
        0,
        0.0,
        1.0,
    );

    // A translucent rectangle over the top.
    renderer.init_combiner_blender_for_simple_rect_draw();
    renderer.enable_tex_unit(0, true);
    renderer.bind_texture(textures.white, 0);
    renderer.set_alpha_ref(16);
    renderer.set_alpha_test_enable(true);
    let (w, h) = (width as i32, height as i32);
    renderer.draw_simple_rect(w / 2, h / 4, w - w / 8, h / 2, 0x80FF_4000, 0.0, 1.0);
    renderer.set_alpha_test_enable(false);
}

pub fn main<T: Iterator<Item = String>>(mut args: T) -> Result<(), String> {
    echo!("rdpgl {} demo", crate::VERSION);
    echo!();

    let _ = args.next(); // skip argv[0]

    let mut options = Options::default();
    let mut frames: u32 = 300;
    for arg in args {
        if arg == "--help" {
            echo!("{}", USAGE);
            echo!("{}", DOCUMENTATION);
            return Ok(());
        } else if let Some(value) = arg.strip_prefix("--frames=") {
            frames = value
                .parse()
                .map_err(|_| format!("Invalid frame count: {:?}", value))?;
        } else if !options.parse_argument(&arg)? {
            echo!("{}", USAGE);
            echo!("{}", DOCUMENTATION);
            return Err(format!("Unexpected argument: {:?}", arg));
        }
    }

    let mut window = Window::new("rdpgl demo", N64_WIDTH * 2, N64_HEIGHT * 2)?;
    let (mut _gl_ctx, implementation, mut gl) = gles::create_gl_ctx(&mut window, &options)?;

    // A recreated context must be of the same kind.
    options.gl_implementation = Some(implementation);

    let mut textures = unsafe { upload_textures(&mut *gl) };
    let alpha_ref_uniform = AlphaRefUniform::default();
    init_combiner(implementation, &alpha_ref_uniform)?;
    let combiner = DemoCombiner {
        alpha_ref_uniform: alpha_ref_uniform.clone(),
    };
    // No platform detection here, so the profile is unknown unless the user
    // overrides it.
    let mut renderer = unsafe { Renderer::new(gl, Box::new(combiner), 0, options.clone()) };
    set_up_window_mapping(&mut renderer, window.size_in_pixels());
    renderer.initialize();
    renderer.init_device_objects();

    for frame in 0..frames {
        for event in window.poll_for_events() {
            match event {
                Event::Quit => {
                    echo!("User requested quit, exiting.");
                    return Ok(());
                }
                Event::ContextLost => {
                    echo!("Context may have been lost, recreating it.");
                    let (new_ctx, _, mut new_gl) = gles::create_gl_ctx(&mut window, &options)?;
                    init_combiner(implementation, &alpha_ref_uniform)?;
                    textures = unsafe { upload_textures(&mut *new_gl) };
                    unsafe { renderer.reinitialize(new_gl) };
                    set_up_window_mapping(&mut renderer, window.size_in_pixels());
                    _gl_ctx = new_ctx;
                }
            }
        }

        draw_frame(&mut renderer, &textures, frame);
        window.swap_window();
        std::thread::sleep(std::time::Duration::from_millis(16));
    }

    echo!("Drew {} frames, exiting.", frames);
    Ok(())
}

/// The demo's entry point on Android, where SDLActivity calls it after
/// initialization. On other platforms the entry point is in src/bin.rs.
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "C" fn SDL_main(
    _argc: std::ffi::c_int,
    _argv: *const *const std::ffi::c_char,
) -> std::ffi::c_int {
    match sdl2::filesystem::pref_path("rdpgl", "demo") {
        Ok(dir) => {
            let path = std::path::Path::new(&dir).join("log.txt");
            if let Err(e) = crate::log::setup_log_file(&path) {
                echo!("Couldn't create log file {}: {}", path.display(), e);
            }
        }
        Err(e) => echo!("Couldn't get a directory for the log file: {}", e),
    }

    // Rust's default panic handler prints to stderr, which is discarded on
    // Android.
    std::panic::set_hook(Box::new(|info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s
        } else {
            "(non-string payload)"
        };
        match info.location() {
            Some(location) => echo!("Panic at {}: {}", location, payload),
            None => echo!("Panic: {}", payload),
        }
    }));

    match main([String::new()].into_iter()) {
        Ok(()) => echo!("Demo finished"),
        Err(e) => echo!("Demo errored: {}", e),
    }
    0
}
