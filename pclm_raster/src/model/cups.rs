use super::RasterByteOrder;
use serde::Deserialize;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
/// The sync word is a 32-bit value that identifies the version and byte order of the raster.
/// # Note
/// The enum underlying value is in native endianness, so it can be different if you print
/// it out as a number on different target platforms. But if you convert it to a byte array
/// using `u32::to_ne_bytes`, it will always be the same.
pub enum CupsSyncWord {
    /// Compressed stream, also used for PWG raster (`RaS2`).
    V2BigEndian = u32::from_ne_bytes([b'R', b'a', b'S', b'2']),
    V2LittleEndian = u32::from_ne_bytes([b'2', b'S', b'a', b'R']),
    /// Uncompressed stream (`RaS3`).
    V3BigEndian = u32::from_ne_bytes([b'R', b'a', b'S', b'3']),
    V3LittleEndian = u32::from_ne_bytes([b'3', b'S', b'a', b'R']),
}

impl CupsSyncWord {
    pub fn byte_order(&self) -> RasterByteOrder {
        match self {
            CupsSyncWord::V2BigEndian | CupsSyncWord::V3BigEndian => RasterByteOrder::BigEndian,
            CupsSyncWord::V2LittleEndian | CupsSyncWord::V3LittleEndian => {
                RasterByteOrder::LittleEndian
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[repr(u32)]
pub enum CupsAdvance {
    #[default]
    Never = 0,
    AfterFile = 1,
    AfterJob = 2,
    AfterSet = 3,
    AfterPage = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[repr(u32)]
pub enum CupsCut {
    #[default]
    Never = 0,
    AfterFile = 1,
    AfterJob = 2,
    AfterSet = 3,
    AfterPage = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[repr(u32)]
pub enum CupsJog {
    #[default]
    Never = 0,
    AfterFile = 1,
    AfterJob = 2,
    AfterSet = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[repr(u32)]
pub enum CupsLeadingEdge {
    #[default]
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[repr(u32)]
pub enum CupsColorOrder {
    /// Chunky pixels (CMYK CMYK CMYK)
    #[default]
    Chunky = 0,
    /// Banded pixels (CCC MMM YYY KKK)
    Banded = 1,
    /// Planar pixels (CCC... MMM... YYY... KKK...)
    Planar = 2,
}

/// Device color spaces a composed page can be emitted in.
///
/// Discriminants are the CUPS `cupsColorSpace` codes, so a header built from
/// this enum is readable by any CUPS raster consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[repr(u32)]
pub enum CupsColorSpace {
    /// Luminance (DeviceGray, gamma 2.2 by default)
    Gray = 0,
    /// Red, green, blue (DeviceRGB, sRGB by default)
    #[default]
    RGB = 1,
    /// Black (DeviceK)
    Black = 3,
    /// Cyan, magenta, yellow (DeviceCMY)
    CMY = 4,
    /// Cyan, magenta, yellow, black (DeviceCMYK)
    CMYK = 6,
    /// Luminance (gamma 2.2)
    #[allow(non_camel_case_types)]
    sGray = 18,
    /// Red, green, blue (sRGB)
    #[allow(non_camel_case_types)]
    sRGB = 19,
    /// Red, green, blue (Adobe RGB)
    AdobeRGB = 20,
}

impl CupsColorSpace {
    /// Number of colorants a pixel carries in this space.
    pub fn num_colors(&self) -> u32 {
        match self {
            CupsColorSpace::Gray | CupsColorSpace::Black | CupsColorSpace::sGray => 1,
            CupsColorSpace::RGB
            | CupsColorSpace::CMY
            | CupsColorSpace::sRGB
            | CupsColorSpace::AdobeRGB => 3,
            CupsColorSpace::CMYK => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[repr(u32)]
pub enum CupsOrientation {
    #[default]
    Portrait = 0,
    Landscape = 1,
    ReversePortrait = 2,
    ReverseLandscape = 3,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(default)]
pub struct CupsResolution {
    pub cross_feed: u32,
    pub feed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(default)]
pub struct CupsImagingBoundingBox<T: Default> {
    pub left: T,
    pub bottom: T,
    pub right: T,
    pub top: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(default)]
pub struct CupsMargins {
    pub left: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(default)]
pub struct CupsPageSize<T: Default> {
    pub width: T,
    pub height: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(default)]
pub struct CupsPageHeaderV1 {
    pub media_class: String,
    pub media_color: String,
    pub media_type: String,
    pub output_type: String,
    pub advance_distance: u32,
    pub advance_media: CupsAdvance,
    pub collate: bool,
    pub cut_media: CupsCut,
    pub duplex: bool,
    pub resolution: CupsResolution,
    /// The left, bottom, right, and top positions of the page bounding box in points
    pub imaging_bbox: CupsImagingBoundingBox<u32>,
    pub insert_sheet: bool,
    pub jog: CupsJog,
    pub leading_edge: CupsLeadingEdge,
    /// Left and bottom origin of image in points
    pub margins: CupsMargins,
    /// Manually feed media
    pub manual_feed: bool,
    pub media_position: u32,
    /// Media weight in grams per meter squared, 0 = printer default
    pub media_weight: u32,
    /// Mirror prints
    pub mirror_print: bool,
    /// Invert prints
    pub negative_print: bool,
    /// 0 = printer default
    pub num_copies: u32,
    pub orientation: CupsOrientation,
    /// `false` = Output face down, `true`` = Output face up
    pub output_face_up: bool,
    /// Width and length in points
    pub page_size: CupsPageSize<u32>,
    /// Print color separations
    pub separations: bool,
    /// Change trays if selected tray is empty
    pub tray_switch: bool,
    /// Rotate even pages when duplexing
    pub tumble: bool,
    /// Width of page image in pixels
    pub width: u32,
    /// Height of page image in pixels
    pub height: u32,
    /// Driver-specific
    pub cups_media_type: u32,
    pub bits_per_color: u32,
    pub bits_per_pixel: u32,
    pub bytes_per_line: u32,
    pub color_order: CupsColorOrder,
    pub color_space: CupsColorSpace,
    /// Driver-specific
    pub cups_compression: u32,
    /// Driver-specific
    pub cups_row_count: u32,
    /// Driver-specific
    pub cups_row_feed: u32,
    /// Driver-specific
    pub cups_row_step: u32,
}

impl CupsPageHeaderV1 {
    pub fn num_colors(&self) -> u32 {
        self.color_space.num_colors()
    }

    /// Size of one page of content as announced by this header.
    ///
    /// Planar pages repeat `height` lines once per color.
    pub fn content_size(&self, num_colors: u32) -> Option<u64> {
        let page = self.bytes_per_line as u64 * self.height as u64;
        match self.color_order {
            CupsColorOrder::Chunky | CupsColorOrder::Banded => Some(page),
            CupsColorOrder::Planar => page.checked_mul(num_colors as u64),
        }
    }

    /// Bytes per run-length unit: one pixel when chunky, one sample otherwise.
    pub fn chunk_size(&self) -> Option<u8> {
        let bits = match self.color_order {
            CupsColorOrder::Chunky => self.bits_per_pixel,
            CupsColorOrder::Banded | CupsColorOrder::Planar => self.bits_per_color,
        };
        u8::try_from((bits as u64).div_ceil(8))
            .ok()
            .map(|size| size.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CupsPageHeaderV2 {
    pub v1: CupsPageHeaderV1,
    pub num_colors: u32,
    pub borderless_scaling_factor: f32,
    pub page_size_f32: CupsPageSize<f32>,
    pub imaging_bbox_f32: CupsImagingBoundingBox<f32>,
    pub vendor_u32: [u32; 16],
    pub vendor_f32: [f32; 16],
    pub vendor_str: [String; 16],
    pub marker_type: String,
    pub rendering_intent: String,
    pub page_size_name: String,
}

impl CupsPageHeaderV2 {
    pub fn num_colors(&self) -> u32 {
        match self.num_colors {
            0 => self.v1.num_colors(),
            _ => self.num_colors,
        }
    }

    pub fn content_size(&self) -> Option<u64> {
        self.v1.content_size(self.num_colors())
    }
}

impl From<CupsPageHeaderV1> for CupsPageHeaderV2 {
    fn from(v1: CupsPageHeaderV1) -> Self {
        CupsPageHeaderV2 {
            v1,
            ..Default::default()
        }
    }
}
