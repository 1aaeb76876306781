/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Shared utilities.

use super::gles2_raw::types::GLubyte;
use std::ffi::CStr;

/// Copy a string returned by `glGetString`. Returns [None] for a null pointer,
/// which is what drivers return without a current context.
pub unsafe fn gl_string(ptr: *const GLubyte) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(
            CStr::from_ptr(ptr as *const std::ffi::c_char)
                .to_string_lossy()
                .into_owned(),
        )
    }
}

/// Parse the leading `major.minor` of a version string, ignoring whatever
/// vendor-specific information follows it.
pub fn parse_version(version: &str) -> Option<(u32, u32)> {
    let number = version.split(' ').next()?;
    let mut parts = number.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

/// Split a `GL_EXTENSIONS` string into its names.
pub fn split_extensions(extensions: Option<String>) -> Vec<String> {
    extensions
        .unwrap_or_default()
        .split_ascii_whitespace()
        .map(|ext| ext.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parsing() {
        assert_eq!(parse_version("2.1 Mesa 23.0.4"), Some((2, 1)));
        assert_eq!(parse_version("4.6.0 NVIDIA 535.54"), Some((4, 6)));
        assert_eq!(parse_version("2.0"), Some((2, 0)));
        assert_eq!(parse_version("OpenGL ES 2.0"), None);
        assert_eq!(parse_version(""), None);
    }

    #[test]
    fn extension_splitting() {
        let exts = split_extensions(Some(
            "GL_ARB_texture_mirrored_repeat  GL_EXT_foo\nGL_OES_bar ".to_string(),
        ));
        assert_eq!(
            exts,
            ["GL_ARB_texture_mirrored_repeat", "GL_EXT_foo", "GL_OES_bar"]
        );
        assert!(split_extensions(None).is_empty());
    }
}
