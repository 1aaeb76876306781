/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Abstraction of window setup, OpenGL context creation and event handling.
//!
//! Implemented using the sdl2 crate (a Rust wrapper for SDL2). All usage of
//! SDL should be confined to this module. The renderer itself never creates
//! windows: as a plugin, it is handed a current context by its host. This is
//! only used by the demo binary.

use sdl2::video::GLProfile;
use std::env;
use std::ffi::c_void;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GLVersion {
    /// OpenGL 2.1 compatibility profile
    GL21Compat,
    /// OpenGL ES 2.0
    GLES2,
}

pub struct GLContext {
    gl_ctx: sdl2::video::GLContext,
}

#[derive(Debug)]
pub enum Event {
    Quit,
    /// The display surface changed in a way that may have lost the context
    /// contents, e.g. the app being backgrounded on Android.
    ContextLost,
}

pub struct Window {
    _sdl_ctx: sdl2::Sdl,
    video_ctx: sdl2::VideoSubsystem,
    window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
}
impl Window {
    /// Returns [true] if running on a device where we should always display
    /// fullscreen, i.e. Android devices.
    fn always_fullscreen() -> bool {
        env::consts::OS == "android"
    }

    pub fn new(title: &str, width: u32, height: u32) -> Result<Window, String> {
        let sdl_ctx = sdl2::init()?;
        let video_ctx = sdl_ctx.video()?;

        let window = if Self::always_fullscreen() {
            let (width, height) = video_ctx.display_bounds(0)?.size();
            video_ctx
                .window(title, width, height)
                .fullscreen()
                .opengl()
                .build()
        } else {
            video_ctx
                .window(title, width, height)
                .position_centered()
                .opengl()
                .build()
        }
        .map_err(|e| e.to_string())?;

        let event_pump = sdl_ctx.event_pump()?;

        Ok(Window {
            _sdl_ctx: sdl_ctx,
            video_ctx,
            window,
            event_pump,
        })
    }

    pub fn create_gl_context(&mut self, version: GLVersion) -> Result<GLContext, String> {
        let attr = self.video_ctx.gl_attr();
        match version {
            GLVersion::GL21Compat => {
                attr.set_context_version(2, 1);
                attr.set_context_profile(GLProfile::Compatibility);
            }
            GLVersion::GLES2 => {
                attr.set_context_version(2, 0);
                attr.set_context_profile(GLProfile::GLES);
            }
        }
        attr.set_depth_size(16);

        let gl_ctx = self.window.gl_create_context()?;

        Ok(GLContext { gl_ctx })
    }

    pub fn make_gl_context_current(&mut self, gl_ctx: &GLContext) -> Result<(), String> {
        self.window.gl_make_current(&gl_ctx.gl_ctx)
    }

    /// Look up an OpenGL function for the current context.
    pub fn gl_get_proc_address(&self, name: &str) -> *const c_void {
        self.video_ctx.gl_get_proc_address(name) as *const c_void
    }

    /// Size of the drawable area in pixels.
    pub fn size_in_pixels(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    /// Poll for events from the OS. This needs to be done reasonably often
    /// (60Hz is probably fine) so that the host OS doesn't consider the app
    /// to be unresponsive.
    pub fn poll_for_events(&mut self) -> Vec<Event> {
        use sdl2::event::{Event as E, WindowEvent};

        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                E::Quit { .. } => events.push(Event::Quit),
                E::AppDidEnterForeground { .. } => events.push(Event::ContextLost),
                E::Window {
                    win_event: WindowEvent::Restored,
                    ..
                } if Self::always_fullscreen() => events.push(Event::ContextLost),
                _ => (),
            }
        }
        events
    }

    /// Swap front-buffer and back-buffer so the result of OpenGL rendering is
    /// presented.
    pub fn swap_window(&mut self) {
        self.window.gl_swap_window();
    }
}
