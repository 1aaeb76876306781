/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! rdpgl translates the render state of the Nintendo 64's Reality Display
//! Processor (RDP) and Reality Signal Processor (RSP) into OpenGL calls.
//!
//! In various places, the terms "N64" and "host" are used to distinguish
//! between the emulated console's view of things and the real GPU's.
//! For example:
//! - N64 screen co-ordinates have their origin in the top-left corner and are
//!   in units of the console's framebuffer; window co-ordinates have their
//!   origin in the bottom-left corner and are in host pixels.
//! - A "tile" is one of the RDP's eight texture descriptors, while a "texture
//!   unit" is a host GPU texture unit.
//!
//! The main entry point is [render::Renderer]. The emulator core owns the
//! OpenGL context and hands the renderer a [gles::GL] implementation for it.

// This also allows items in the crate to have non-snake-case names, which the
// OpenGL-style method names need.
#![allow(non_snake_case)]
// The documentation for this crate is intended to include private items.
#![allow(rustdoc::private_intra_doc_links)]

#[macro_use]
mod log;
#[cfg(feature = "sdl")]
mod demo;
pub mod gles;
pub mod options;
pub mod render;
pub mod texconv;
#[cfg(feature = "sdl")]
pub mod window;

#[cfg(feature = "sdl")]
pub use demo::main;

/// Current version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
