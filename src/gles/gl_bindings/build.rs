/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use gl_generator::{Api, Fallbacks, GlobalGenerator, Profile, Registry};
use std::fs::File;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());

    let mut file = File::create(out_dir.join("gl21compat.rs")).unwrap();
    Registry::new(
        Api::Gl,
        (2, 1),
        Profile::Compatibility,
        Fallbacks::None,
        [
            // Older drivers only expose mirrored repeat through one of these.
            "GL_ARB_texture_mirrored_repeat",
            "GL_IBM_texture_mirrored_repeat",
        ],
    )
    .write_bindings(GlobalGenerator, &mut file)
    .unwrap();

    let no_extensions: [&str; 0] = [];
    let mut file = File::create(out_dir.join("gles2.rs")).unwrap();
    Registry::new(
        Api::Gles2,
        (2, 0),
        Profile::Core,
        Fallbacks::None,
        no_extensions,
    )
    .write_bindings(GlobalGenerator, &mut file)
    .unwrap();
}
