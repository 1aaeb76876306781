/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! OpenGL abstraction and implementations.
//!
//! The renderer targets two generations of OpenGL that have very little in
//! common beyond basic state setting: desktop OpenGL 2.1 with its
//! fixed-function pipeline, and OpenGL ES 2.0 where everything goes through
//! shaders. This module hides the difference:
//!
//! - [gl_generic] provides an abstraction over the OpenGL implementations.
//! - Two modules provide implementations:
//!   - [gl21_compat] uses OpenGL 2.1 compatibility profile.
//!   - [gles2] uses OpenGL ES 2.0.
//! - [gles2_raw] provides raw bindings for OpenGL ES 2.0 generated from the
//!   Khronos API headers. **The function bindings are only for use within this
//!   module** (and by code that owns the shader side, like a combiner). The
//!   constants and types can be used anywhere.
//!   - [gl21compat_raw] is the same thing, but for OpenGL 2.1 compatibility
//!     profile, which can't be used outside this module at all.
//!
//! Useful resources:
//! - [OpenGL 2.1 reference pages](https://registry.khronos.org/OpenGL-Refpages/gl2.1/)
//! - [OpenGL ES 2.0 reference pages](https://registry.khronos.org/OpenGL-Refpages/es2.0/)
//! - Extensions:
//!   - [ARB_texture_mirrored_repeat](https://registry.khronos.org/OpenGL/extensions/ARB/ARB_texture_mirrored_repeat.txt)
//!   - [IBM_texture_mirrored_repeat](https://registry.khronos.org/OpenGL/extensions/IBM/IBM_texture_mirrored_repeat.txt)

pub mod gl21_compat;
mod gl_generic;
pub mod gles2;
mod util;
mod vertex;

use rdpgl_gl_bindings::gl21compat as gl21compat_raw;
pub use rdpgl_gl_bindings::gles2 as gles2_raw;

use gl21_compat::GL21Compat;
pub use gl_generic::{ProcLoader, GL};
use gles2::GLES2;
pub use vertex::{Vertex, VertexBatch};

/// Labels for [GL] implementations and an abstraction for constructing them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GLImplementation {
    /// [GL21Compat].
    GL21Compat,
    /// [GLES2].
    GLES2,
}
impl GLImplementation {
    /// List of implementations in order of preference.
    pub const IMPLEMENTATIONS: &'static [Self] = &[Self::GL21Compat, Self::GLES2];
    /// Convert from short name used for command-line arguments. Returns [Err]
    /// if name is not recognized.
    pub fn from_short_name(name: &str) -> Result<Self, ()> {
        match name {
            "gl21_compat" => Ok(Self::GL21Compat),
            "gles2" => Ok(Self::GLES2),
            _ => Err(()),
        }
    }
    /// See [GL::description].
    pub fn description(self) -> &'static str {
        match self {
            Self::GL21Compat => GL21Compat::description(),
            Self::GLES2 => GLES2::description(),
        }
    }
    /// See [GL::new]. The matching kind of context must be current.
    pub unsafe fn construct(self, loader: ProcLoader<'_>) -> Result<Box<dyn GL>, String> {
        fn boxer<T: GL + 'static>(ctx: T) -> Box<dyn GL> {
            Box::new(ctx)
        }
        match self {
            Self::GL21Compat => GL21Compat::new(loader).map(boxer),
            Self::GLES2 => GLES2::new(loader).map(boxer),
        }
    }
    /// The kind of window system context this implementation needs.
    #[cfg(feature = "sdl")]
    pub fn gl_version(self) -> crate::window::GLVersion {
        match self {
            Self::GL21Compat => crate::window::GLVersion::GL21Compat,
            Self::GLES2 => crate::window::GLVersion::GLES2,
        }
    }
}

/// Try to create a context and [GL] implementation using the configured
/// strategies. The context is left current.
#[cfg(feature = "sdl")]
pub fn create_gl_ctx(
    window: &mut crate::window::Window,
    options: &crate::options::Options,
) -> Result<(crate::window::GLContext, GLImplementation, Box<dyn GL>), String> {
    log!("Creating an OpenGL context:");
    let list = if let Some(ref preference) = options.gl_implementation {
        std::slice::from_ref(preference)
    } else {
        GLImplementation::IMPLEMENTATIONS
    };
    for &implementation in list {
        log!("Trying: {}", implementation.description());
        let gl_ctx = match window.create_gl_context(implementation.gl_version()) {
            Ok(gl_ctx) => gl_ctx,
            Err(err) => {
                log!("=> Failed: {}.", err);
                continue;
            }
        };
        if let Err(err) = window.make_gl_context_current(&gl_ctx) {
            log!("=> Failed: {}.", err);
            continue;
        }
        let mut loader = |s: &'static str| window.gl_get_proc_address(s);
        match unsafe { implementation.construct(&mut loader) } {
            Ok(gl) => {
                log!("=> Success! {}", unsafe { gl.driver_description() });
                return Ok((gl_ctx, implementation, gl));
            }
            Err(err) => {
                log!("=> Failed: {}.", err);
            }
        }
    }
    Err("Couldn't create an OpenGL context!".to_string())
}
