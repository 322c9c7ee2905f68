use crate::model::page::Margins;
use serde::Deserialize;

/// How the device expects duplex backsides (`cupsBackSide`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum BacksideMode {
    /// Backsides are printed like front sides.
    #[default]
    Normal,
    ManualTumble,
    Rotated,
    Flipped,
}

impl From<&str> for BacksideMode {
    /// Attribute values are matched case-insensitively; anything unknown is `Normal`.
    fn from(value: &str) -> Self {
        [
            ("ManualTumble", BacksideMode::ManualTumble),
            ("Rotated", BacksideMode::Rotated),
            ("Flipped", BacksideMode::Flipped),
        ]
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map_or(BacksideMode::Normal, |(_, mode)| mode)
    }
}

impl From<String> for BacksideMode {
    fn from(value: String) -> Self {
        BacksideMode::from(value.as_str())
    }
}

/// A named media size with its imageable area, all in points.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MediaSize {
    pub name: String,
    pub width: f32,
    pub length: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl MediaSize {
    pub fn margins(&self) -> Margins {
        Margins {
            left: self.left,
            bottom: self.bottom,
            right: self.width - self.right,
            top: self.length - self.top,
        }
    }
}

/// Media sizes a device declares, plus the margins it applies to custom sizes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MediaCatalog {
    pub sizes: Vec<MediaSize>,
    pub custom_margins: Margins,
}

/// Device attributes that stay fixed for a whole job.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// `None` when the device does not declare a backside mode.
    pub backside: Option<BacksideMode>,
    /// Legacy duplex hint, read as `Rotated` when `backside` is absent.
    pub flip_duplex: bool,
    /// `APDuplexRequiresFlippedMargin`, when declared.
    pub flipped_margin: Option<bool>,
    /// The device takes PWG raster.
    pub pwg_raster: bool,
    /// `None` when there is no device description to match media against.
    pub media: Option<MediaCatalog>,
}

impl DeviceProfile {
    pub fn backside_mode(&self) -> BacksideMode {
        match (self.backside, self.flip_duplex) {
            (Some(mode), _) => mode,
            (None, true) => BacksideMode::Rotated,
            (None, false) => BacksideMode::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backside_mode_is_case_insensitive() {
        assert_eq!(BacksideMode::from("rotated"), BacksideMode::Rotated);
        assert_eq!(BacksideMode::from("MANUALTUMBLE"), BacksideMode::ManualTumble);
        assert_eq!(BacksideMode::from("Normal"), BacksideMode::Normal);
        assert_eq!(BacksideMode::from("sideways"), BacksideMode::Normal);
    }

    #[test]
    fn flip_duplex_falls_back_to_rotated() {
        let mut profile = DeviceProfile {
            flip_duplex: true,
            ..Default::default()
        };
        assert_eq!(profile.backside_mode(), BacksideMode::Rotated);
        profile.backside = Some(BacksideMode::Flipped);
        assert_eq!(profile.backside_mode(), BacksideMode::Flipped);
    }

    #[test]
    fn profile_deserializes_from_json() {
        let profile: DeviceProfile = serde_json::from_str(
            r#"{
                "backside": "flipped",
                "flipped_margin": false,
                "media": {
                    "sizes": [{
                        "name": "na_letter_8.5x11in",
                        "width": 612, "length": 792,
                        "left": 18, "bottom": 36, "right": 594, "top": 756
                    }],
                    "custom_margins": { "left": 9, "bottom": 9, "right": 9, "top": 9 }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(profile.backside, Some(BacksideMode::Flipped));
        assert_eq!(profile.flipped_margin, Some(false));
        assert!(!profile.pwg_raster);
        let media = profile.media.unwrap();
        assert_eq!(
            media.sizes[0].margins(),
            Margins::from((18.0, 36.0, 18.0, 36.0))
        );
        assert_eq!(media.custom_margins.top, 9.0);
    }
}
