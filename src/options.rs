/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Parsing and management of user-configurable options.
//!
//! Some of these are per-ROM settings that the plugin's host looks up in its
//! game database, rather than something the user picks.

use crate::gles::GLImplementation;
use crate::render::HardwareProfile;

pub const DOCUMENTATION: &str = "\
Graphics options:
    --gl-implementation=...
        Use a particular OpenGL implementation. The options are:
        - gl21_compat: OpenGL 2.1 compatibility profile.
        - gles2: OpenGL ES 2.0.

        The default is to try them in the order above.

    --hardware-type=...
        Tune the depth bias for a particular GPU family instead of the one the
        platform reports. Use this if decals like shadows flicker or vanish.
        The options are:
        - 0: unknown
        - 1: TI OMAP
        - 2: TI OMAP (later models)
        - 3: Qualcomm Adreno
        - 4: Infotm iMAP
        - 5: Nvidia Tegra

Compatibility options:
    --enable-hacks
    --disable-hacks
        Turn game-specific workarounds on or off. They are on by default.

    --fog-method=...
        How to handle fog. The options are:
        - 0: never draw fog.
        - 1: draw fog when the game asks for it (default).
        - 2: always draw fog.

    --force-depth-buffer
        Keep depth testing and depth writes on even when the game turns them
        off. Some games need this to draw in the right order.
";

/// How fog requests from the game are handled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FogMethod {
    Disabled,
    #[default]
    Enabled,
    Forced,
}

impl FogMethod {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::Disabled),
            1 => Some(Self::Enabled),
            2 => Some(Self::Forced),
            _ => None,
        }
    }

    /// Whether fog ends up on when the game asks for `requested`.
    pub fn apply(self, requested: bool) -> bool {
        match self {
            Self::Disabled => false,
            Self::Enabled => requested,
            Self::Forced => true,
        }
    }
}

/// Struct containing all user-configurable options.
#[derive(Clone, Debug)]
pub struct Options {
    pub gl_implementation: Option<GLImplementation>,
    pub hardware_override: Option<HardwareProfile>,
    pub enable_hacks: bool,
    pub fog_method: FogMethod,
    pub force_depth_buffer: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            gl_implementation: None,
            hardware_override: None,
            enable_hacks: true,
            fog_method: FogMethod::Enabled,
            force_depth_buffer: false,
        }
    }
}

impl Options {
    /// Parse the command-line argument syntax for an option. Returns `Ok(true)`
    /// if the option was valid and has been applied, and `Ok(false)` if the
    /// option was not recognized.
    pub fn parse_argument(&mut self, arg: &str) -> Result<bool, String> {
        if let Some(value) = arg.strip_prefix("--gl-implementation=") {
            self.gl_implementation = Some(
                GLImplementation::from_short_name(value)
                    .map_err(|_| "Unrecognized OpenGL implementation".to_string())?,
            );
        } else if let Some(value) = arg.strip_prefix("--hardware-type=") {
            let id: i32 = value
                .parse()
                .map_err(|_| "Value for hardware type is invalid".to_string())?;
            self.hardware_override = Some(
                HardwareProfile::from_id(id)
                    .ok_or_else(|| "Value for hardware type is out of range".to_string())?,
            );
        } else if arg == "--enable-hacks" {
            self.enable_hacks = true;
        } else if arg == "--disable-hacks" {
            self.enable_hacks = false;
        } else if let Some(value) = arg.strip_prefix("--fog-method=") {
            let id: u32 = value
                .parse()
                .map_err(|_| "Value for fog method is invalid".to_string())?;
            self.fog_method = FogMethod::from_id(id)
                .ok_or_else(|| "Value for fog method is out of range".to_string())?;
        } else if arg == "--force-depth-buffer" {
            self.force_depth_buffer = true;
        } else {
            return Ok(false);
        };
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let mut options = Options::default();
        assert!(options.enable_hacks);
        assert_eq!(options.fog_method, FogMethod::Enabled);

        assert_eq!(options.parse_argument("--gl-implementation=gles2"), Ok(true));
        assert_eq!(options.gl_implementation, Some(GLImplementation::GLES2));
        assert_eq!(options.parse_argument("--hardware-type=5"), Ok(true));
        assert_eq!(options.hardware_override, Some(HardwareProfile::Tegra));
        assert_eq!(options.parse_argument("--disable-hacks"), Ok(true));
        assert!(!options.enable_hacks);
        assert_eq!(options.parse_argument("--fog-method=2"), Ok(true));
        assert_eq!(options.fog_method, FogMethod::Forced);
        assert_eq!(options.parse_argument("--force-depth-buffer"), Ok(true));
        assert!(options.force_depth_buffer);

        assert_eq!(options.parse_argument("--landscape-left"), Ok(false));
        assert!(options.parse_argument("--gl-implementation=vulkan").is_err());
        assert!(options.parse_argument("--hardware-type=6").is_err());
        assert!(options.parse_argument("--hardware-type=x").is_err());
        assert!(options.parse_argument("--fog-method=3").is_err());
    }

    #[test]
    fn fog_methods() {
        assert!(!FogMethod::Disabled.apply(true));
        assert!(FogMethod::Enabled.apply(true));
        assert!(!FogMethod::Enabled.apply(false));
        assert!(FogMethod::Forced.apply(false));
    }
}
