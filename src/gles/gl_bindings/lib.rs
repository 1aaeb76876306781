/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! This package contains OpenGL bindings generated with the `gl_generator`
//! crate.

#![allow(non_snake_case)]

#[allow(warnings)]
pub mod gl21compat {
    include!(concat!(env!("OUT_DIR"), "/gl21compat.rs"));
}
#[allow(warnings)]
pub mod gles2 {
    include!(concat!(env!("OUT_DIR"), "/gles2.rs"));
}
