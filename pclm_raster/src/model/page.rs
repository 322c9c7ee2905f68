//! Per-page input records delivered by the document reader.

use crate::error::PclmRasterError;
use derive_more::From;
use num_enum::TryFromPrimitive;
use serde::Deserialize;
use std::str::FromStr;

/// Color space of the decoded strip images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceColorSpace {
    Gray,
    Rgb,
    Cmyk,
}

impl SourceColorSpace {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            SourceColorSpace::Gray => 1,
            SourceColorSpace::Rgb => 3,
            SourceColorSpace::Cmyk => 4,
        }
    }

    /// Resolves an optional color space name. Untagged PCLm strips are RGB.
    pub fn from_name(name: Option<&str>) -> Result<Self, PclmRasterError> {
        name.map_or(Ok(SourceColorSpace::Rgb), str::parse)
    }
}

impl FromStr for SourceColorSpace {
    type Err = PclmRasterError;

    /// Accepts PDF names with or without the leading slash (`/DeviceRGB`, `DeviceRGB`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('/').unwrap_or(s) {
            "DeviceGray" => Ok(SourceColorSpace::Gray),
            "DeviceRGB" => Ok(SourceColorSpace::Rgb),
            "DeviceCMYK" => Ok(SourceColorSpace::Cmyk),
            _ => Err(PclmRasterError::UnsupportedColorSpace(s.to_string())),
        }
    }
}

/// Page rotation in degrees, clockwise, as carried by the page `/Rotate` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(i64)]
pub enum Rotation {
    Deg0 = 0,
    Deg90 = 90,
    Deg180 = 180,
    Deg270 = 270,
}

impl Rotation {
    pub fn degrees(self) -> i64 {
        self as i64
    }

    /// Whether the page axes are exchanged by this rotation.
    pub fn is_landscape(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    pub fn then(self, other: Rotation) -> Rotation {
        match (self.degrees() + other.degrees()) % 360 {
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            270 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg0,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg180,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }
}

/// The page `/MediaBox`: two opposite corners, `[x0, y0, x1, y1]` in points.
#[derive(Debug, Clone, Copy, PartialEq, From)]
pub struct MediaBox(pub [f32; 4]);

impl MediaBox {
    pub fn from_slice(corners: &[f32]) -> Option<Self> {
        <[f32; 4]>::try_from(corners).ok().map(MediaBox)
    }

    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    pub fn width(&self) -> f32 {
        (self.0[2] - self.0[0]).abs()
    }

    pub fn height(&self) -> f32 {
        (self.0[3] - self.0[1]).abs()
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

/// One decoded strip image of a page. Samples are 8 bits, packed, no row padding.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFragment {
    pub width: u32,
    pub height: u32,
    pub color_space: Option<String>,
    pub data: Vec<u8>,
}

impl PageFragment {
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }
}

/// A page as read from the document: rotation, media box and strips in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct PclmPage {
    pub rotate: i64,
    pub media_box: Option<MediaBox>,
    pub fragments: Vec<PageFragment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pdf_color_space_names() {
        assert_eq!(
            "/DeviceGray".parse::<SourceColorSpace>().unwrap(),
            SourceColorSpace::Gray
        );
        assert_eq!(
            "DeviceCMYK".parse::<SourceColorSpace>().unwrap(),
            SourceColorSpace::Cmyk
        );
        assert_eq!(
            SourceColorSpace::from_name(None).unwrap(),
            SourceColorSpace::Rgb
        );
        assert!(matches!(
            "/Indexed".parse::<SourceColorSpace>(),
            Err(PclmRasterError::UnsupportedColorSpace(name)) if name == "/Indexed"
        ));
    }

    #[test]
    fn rotation_accepts_only_quarter_turns() {
        assert_eq!(Rotation::try_from(270i64).unwrap(), Rotation::Deg270);
        assert!(Rotation::try_from(45i64).is_err());
        assert!(Rotation::try_from(-90i64).is_err());
        assert_eq!(Rotation::Deg270.then(Rotation::Deg180), Rotation::Deg90);
        for rotation in [
            Rotation::Deg0,
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
        ] {
            assert_eq!(rotation.then(rotation.inverse()), Rotation::Deg0);
        }
    }

    #[test]
    fn media_box_extent_ignores_corner_order() {
        let media_box = MediaBox::from([612.0, 792.0, 0.0, 0.0]);
        assert_eq!(media_box.width(), 612.0);
        assert_eq!(media_box.height(), 792.0);
        assert!(MediaBox::from_slice(&[0.0, 0.0, 1.0]).is_none());
        assert!(!MediaBox([0.0, f32::NAN, 1.0, 1.0]).is_valid());
    }
}
