use arbitrary::Arbitrary;
use pclm_raster::model::cups::{CupsColorOrder, CupsColorSpace, CupsPageHeaderV2};
use pclm_raster::model::page::{MediaBox, PageFragment, PclmPage, SourceColorSpace};

const FRAGMENT_COLOR_SPACES: [Option<&str>; 4] =
    [None, Some("/DeviceGray"), Some("/DeviceRGB"), Some("/DeviceCMYK")];
const DEVICE_COLOR_SPACES: [CupsColorSpace; 8] = [
    CupsColorSpace::Gray,
    CupsColorSpace::RGB,
    CupsColorSpace::Black,
    CupsColorSpace::CMY,
    CupsColorSpace::CMYK,
    CupsColorSpace::sGray,
    CupsColorSpace::sRGB,
    CupsColorSpace::AdobeRGB,
];
const COLOR_ORDERS: [CupsColorOrder; 3] = [
    CupsColorOrder::Chunky,
    CupsColorOrder::Banded,
    CupsColorOrder::Planar,
];
const ROTATIONS: [i64; 5] = [0, 90, 180, 270, 45];

#[derive(Clone, Debug, Arbitrary)]
pub struct FuzzFragment {
    pub width: u8,
    pub height: u8,
    pub color_space: u8,
    pub data: Vec<u8>,
}

impl From<FuzzFragment> for PageFragment {
    /// The sample buffer is cycled to the size the fragment needs, so most inputs assemble.
    fn from(fragment: FuzzFragment) -> Self {
        let color_space = FRAGMENT_COLOR_SPACES
            [fragment.color_space as usize % FRAGMENT_COLOR_SPACES.len()]
        .map(str::to_string);
        let bytes_per_pixel = SourceColorSpace::from_name(color_space.as_deref())
            .map_or(1, |cs| cs.bytes_per_pixel());
        let len = fragment.width as usize * fragment.height as usize * bytes_per_pixel;
        let data = if fragment.data.is_empty() {
            vec![0; len]
        } else {
            fragment.data.iter().copied().cycle().take(len).collect()
        };
        PageFragment {
            width: fragment.width as u32,
            height: fragment.height as u32,
            color_space,
            data,
        }
    }
}

#[derive(Clone, Debug, Arbitrary)]
pub struct FuzzPage {
    pub rotate: u8,
    pub media_box: Option<[i16; 4]>,
    pub fragments: Vec<FuzzFragment>,
}

impl From<FuzzPage> for PclmPage {
    fn from(page: FuzzPage) -> Self {
        PclmPage {
            rotate: ROTATIONS[page.rotate as usize % ROTATIONS.len()],
            media_box: page.media_box.map(|corners| MediaBox(corners.map(f32::from))),
            fragments: page.fragments.into_iter().map(PageFragment::from).collect(),
        }
    }
}

#[derive(Clone, Debug, Arbitrary)]
pub struct FuzzRasterFormat {
    pub color_space: u8,
    pub color_order: u8,
    pub bits_per_color: u8,
    pub bits_per_pixel: u8,
    pub duplex: bool,
    pub tumble: bool,
}

impl From<FuzzRasterFormat> for CupsPageHeaderV2 {
    fn from(format: FuzzRasterFormat) -> Self {
        let mut header = CupsPageHeaderV2::default();
        header.v1.color_space =
            DEVICE_COLOR_SPACES[format.color_space as usize % DEVICE_COLOR_SPACES.len()];
        header.v1.color_order = COLOR_ORDERS[format.color_order as usize % COLOR_ORDERS.len()];
        header.v1.bits_per_color = format.bits_per_color as u32;
        header.v1.bits_per_pixel = format.bits_per_pixel as u32;
        header.v1.duplex = format.duplex;
        header.v1.tumble = format.tumble;
        header
    }
}

/// Expands a `RaS2` page content back into raw lines. `None` on malformed records.
pub fn decompress(mut input: &[u8], chunk_size: usize, bytes_per_line: usize) -> Option<Vec<u8>> {
    let mut output = Vec::new();
    while let Some((&line_repeat, rest)) = input.split_first() {
        input = rest;
        let mut line = Vec::with_capacity(bytes_per_line);
        while line.len() < bytes_per_line {
            let (&tag, rest) = input.split_first()?;
            input = rest;
            if tag < 0x80 {
                let chunk = input.get(..chunk_size)?;
                for _ in 0..=tag {
                    line.extend_from_slice(chunk);
                }
                input = &input[chunk_size..];
            } else {
                let len = (257 - tag as usize) * chunk_size;
                line.extend_from_slice(input.get(..len)?);
                input = &input[len..];
            }
        }
        if line.len() != bytes_per_line {
            return None;
        }
        for _ in 0..=line_repeat {
            output.extend_from_slice(&line);
        }
    }
    Some(output)
}
