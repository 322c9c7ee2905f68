//! Scanline transcoding from decoded page samples to the device pixel format.

mod bits;
mod color;
mod line;
mod table;

pub use bits::Quantizer;
pub use line::{LineConverter, LineFormat};
pub use table::ColorConversion;

use crate::model::cups::CupsColorSpace;

/// Device color spaces grouped by how samples are produced for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceColorFamily {
    /// `K`: one colorant, 255 is full ink.
    Black,
    /// `W` and `SW`: one channel, 255 is white.
    White,
    Cmy,
    Cmyk,
    /// `RGB`, `sRGB` and `AdobeRGB`.
    Rgb,
}

impl DeviceColorFamily {
    pub fn num_colors(&self) -> u32 {
        match self {
            DeviceColorFamily::Black | DeviceColorFamily::White => 1,
            DeviceColorFamily::Cmy | DeviceColorFamily::Rgb => 3,
            DeviceColorFamily::Cmyk => 4,
        }
    }
}

impl From<CupsColorSpace> for DeviceColorFamily {
    fn from(color_space: CupsColorSpace) -> Self {
        match color_space {
            CupsColorSpace::Black => DeviceColorFamily::Black,
            CupsColorSpace::Gray | CupsColorSpace::sGray => DeviceColorFamily::White,
            CupsColorSpace::CMY => DeviceColorFamily::Cmy,
            CupsColorSpace::CMYK => DeviceColorFamily::Cmyk,
            CupsColorSpace::RGB | CupsColorSpace::sRGB | CupsColorSpace::AdobeRGB => {
                DeviceColorFamily::Rgb
            }
        }
    }
}
