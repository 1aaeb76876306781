/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! GPU families with known depth-bias quirks.
//!
//! Coplanar decals (shadows, stars, road markings) z-fight unless they are
//! pushed towards the camera, but how far a given polygon offset actually
//! moves a fragment differs wildly between mobile GPUs. The constants here
//! were tuned by hand on real devices and are not derived from anything, so
//! keep them as they are.

/// A GPU family, identified by the platform glue. The numeric ids are shared
/// with the frontend's settings, so they must not change.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HardwareProfile {
    #[default]
    Unknown,
    /// TI OMAP (PowerVR SGX 530/540).
    Omap,
    /// Later TI OMAP.
    Omap2,
    /// Qualcomm Adreno.
    Qualcomm,
    /// Infotm iMAP.
    Imap,
    /// Nvidia Tegra.
    Tegra,
}

/// Polygon offset state for one z-bias value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PolygonOffset {
    /// Whether `GL_POLYGON_OFFSET_FILL` should be enabled.
    pub enabled: bool,
    pub factor: f32,
    pub units: f32,
}

impl HardwareProfile {
    pub const ALL: [Self; 6] = [
        Self::Unknown,
        Self::Omap,
        Self::Omap2,
        Self::Qualcomm,
        Self::Imap,
        Self::Tegra,
    ];

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(id).ok()?).copied()
    }

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Unknown => "unknown GPU",
            Self::Omap => "TI OMAP",
            Self::Omap2 => "TI OMAP (later models)",
            Self::Qualcomm => "Qualcomm Adreno",
            Self::Imap => "Infotm iMAP",
            Self::Tegra => "Nvidia Tegra",
        }
    }

    /// Pick the profile to use for the rest of the process. A user override
    /// always wins over detection. Ids the platform glue reports that aren't
    /// in the table fall back to [HardwareProfile::Unknown].
    pub fn resolve(detected_id: i32, user_override: Option<Self>) -> Self {
        if let Some(profile) = user_override {
            log_dbg!("Using hardware type override: {:?}", profile);
            return profile;
        }
        Self::from_id(detected_id).unwrap_or_else(|| {
            log!(
                "Unrecognized hardware type {}, treating it as unknown",
                detected_id
            );
            Self::Unknown
        })
    }

    /// The offset used for both the factor and the units.
    fn offset_constant(self) -> f32 {
        match self {
            Self::Unknown => -0.2,
            Self::Omap => 0.2,
            Self::Omap2 => -1.5,
            Self::Qualcomm => -0.2,
            Self::Imap => -0.001,
            Self::Tegra => -2.0,
        }
    }

    /// Get the polygon offset for a z-bias. Only the sign of the bias matters.
    pub fn polygon_offset(self, bias: i32) -> PolygonOffset {
        if bias > 0 {
            let offset = self.offset_constant();
            PolygonOffset {
                enabled: true,
                factor: offset,
                units: offset,
            }
        } else {
            PolygonOffset {
                enabled: false,
                factor: 0.0,
                units: 0.0,
            }
        }
    }
}
