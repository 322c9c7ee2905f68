use super::{color, DeviceColorFamily};
use crate::model::page::SourceColorSpace;

/// Per-pixel color transform from a source color space to a device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorConversion {
    /// Samples are already in the device space.
    Identity,
    GrayToBlack,
    GrayToRgb,
    GrayToCmy,
    GrayToCmyk,
    RgbToWhite,
    RgbToBlack,
    RgbToCmy,
    RgbToCmyk,
    CmykToWhite,
    CmykToBlack,
    CmykToRgb,
    CmykToCmy,
}

impl ColorConversion {
    pub fn select(source: SourceColorSpace, device: DeviceColorFamily) -> Self {
        use ColorConversion::*;
        use DeviceColorFamily as D;
        use SourceColorSpace as S;
        match (source, device) {
            (S::Gray, D::Black) => GrayToBlack,
            (S::Rgb, D::Black) => RgbToBlack,
            (S::Cmyk, D::Black) => CmykToBlack,
            (S::Rgb, D::White) => RgbToWhite,
            (S::Cmyk, D::White) => CmykToWhite,
            (S::Gray, D::Cmy) => GrayToCmy,
            (S::Rgb, D::Cmy) => RgbToCmy,
            (S::Cmyk, D::Cmy) => CmykToCmy,
            (S::Gray, D::Cmyk) => GrayToCmyk,
            (S::Rgb, D::Cmyk) => RgbToCmyk,
            (S::Gray, D::Rgb) => GrayToRgb,
            (S::Cmyk, D::Rgb) => CmykToRgb,
            (S::Gray, D::White) | (S::Rgb, D::Rgb) | (S::Cmyk, D::Cmyk) => Identity,
        }
    }

    /// Converts one pixel. `src` holds exactly the source samples of that pixel.
    pub fn convert_pixel(&self, src: &[u8], dst: &mut [u8]) {
        use ColorConversion::*;
        match self {
            Identity => dst[..src.len()].copy_from_slice(src),
            GrayToBlack => dst[0] = color::white_to_black(src[0]),
            GrayToRgb => color::white_to_rgb(src[0], dst),
            GrayToCmy => color::white_to_cmy(src[0], dst),
            GrayToCmyk => color::white_to_cmyk(src[0], dst),
            RgbToWhite => dst[0] = color::rgb_to_white(src),
            RgbToBlack => dst[0] = color::rgb_to_black(src),
            RgbToCmy => color::rgb_to_cmy(src, dst),
            RgbToCmyk => color::rgb_to_cmyk(src, dst),
            CmykToWhite => dst[0] = color::cmyk_to_white(src),
            CmykToBlack => dst[0] = color::cmyk_to_black(src),
            CmykToRgb => color::cmyk_to_rgb(src, dst),
            CmykToCmy => color::cmyk_to_cmy(src, dst),
        }
    }

    /// Converts `src` pixel by pixel into `dst`, `src_channels` samples in and
    /// `dst_channels` samples out per pixel.
    pub fn convert_run(
        &self,
        src: &[u8],
        src_channels: usize,
        dst: &mut [u8],
        dst_channels: usize,
    ) {
        if *self == ColorConversion::Identity {
            let len = src.len().min(dst.len());
            dst[..len].copy_from_slice(&src[..len]);
            return;
        }
        for (s, d) in src
            .chunks_exact(src_channels)
            .zip(dst.chunks_exact_mut(dst_channels))
        {
            self.convert_pixel(s, d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCES: [SourceColorSpace; 3] = [
        SourceColorSpace::Gray,
        SourceColorSpace::Rgb,
        SourceColorSpace::Cmyk,
    ];
    const FAMILIES: [DeviceColorFamily; 5] = [
        DeviceColorFamily::Black,
        DeviceColorFamily::White,
        DeviceColorFamily::Cmy,
        DeviceColorFamily::Cmyk,
        DeviceColorFamily::Rgb,
    ];

    #[test]
    fn identity_only_within_a_family() {
        for source in SOURCES {
            for family in FAMILIES {
                let conversion = ColorConversion::select(source, family);
                let same = matches!(
                    (source, family),
                    (SourceColorSpace::Gray, DeviceColorFamily::White)
                        | (SourceColorSpace::Rgb, DeviceColorFamily::Rgb)
                        | (SourceColorSpace::Cmyk, DeviceColorFamily::Cmyk)
                );
                assert_eq!(conversion == ColorConversion::Identity, same);
            }
        }
    }

    #[test]
    fn white_maps_to_no_ink() {
        let white = |source: SourceColorSpace| match source {
            SourceColorSpace::Gray => vec![255],
            SourceColorSpace::Rgb => vec![255, 255, 255],
            SourceColorSpace::Cmyk => vec![0, 0, 0, 0],
        };
        for source in SOURCES {
            for family in FAMILIES {
                let mut out = [0xaa; 4];
                ColorConversion::select(source, family).convert_pixel(&white(source), &mut out);
                let n = family.num_colors() as usize;
                let expected: &[u8] = match family {
                    DeviceColorFamily::White | DeviceColorFamily::Rgb => &[255, 255, 255],
                    _ => &[0, 0, 0, 0],
                };
                assert_eq!(&out[..n], &expected[..n], "{source:?} -> {family:?}");
            }
        }
    }

    #[test]
    fn run_conversion() {
        let mut out = [0; 6];
        ColorConversion::GrayToRgb.convert_run(&[1, 2], 1, &mut out, 3);
        assert_eq!(out, [1, 1, 1, 2, 2, 2]);
    }
}
