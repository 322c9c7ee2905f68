use super::bits::{put_bits, Quantizer};
use super::ColorConversion;
use crate::config::JobContext;
use crate::model::cups::CupsColorOrder;
use crate::model::page::SourceColorSpace;

/// Device pixel layout of one emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormat {
    pub num_colors: usize,
    pub bits_per_color: u32,
    pub bits_per_pixel: u32,
    pub color_order: CupsColorOrder,
    pub bi_level: bool,
}

impl LineFormat {
    pub fn from_context(ctx: &JobContext) -> Self {
        LineFormat {
            num_colors: ctx.num_colors(),
            bits_per_color: ctx.bits_per_color(),
            bits_per_pixel: ctx.bits_per_pixel(),
            color_order: ctx.color_order(),
            bi_level: ctx.bi_level(),
        }
    }

    /// Bytes of one emitted line (one band when banded) holding `pixels` pixels.
    pub fn line_bytes(&self, pixels: usize) -> usize {
        (self.bits_per_pixel as usize * pixels).div_ceil(8)
    }

    /// Layouts where whole lines convert without per-pixel packing.
    fn has_fast_path(&self) -> bool {
        match self.bits_per_color {
            1 => self.num_colors == 1 && self.bits_per_pixel == 1,
            8 => {
                self.color_order == CupsColorOrder::Chunky
                    && self.bits_per_pixel as usize == 8 * self.num_colors
            }
            _ => false,
        }
    }
}

/// Converts source rows of one page into device lines.
///
/// Chosen once per page. With `mirrored` set, output pixel `i` comes from source
/// pixel `pixels - 1 - i`; dithering still follows the source column so a mirrored
/// line is the forward line reversed.
#[derive(Debug)]
pub struct LineConverter {
    conversion: ColorConversion,
    source_channels: usize,
    format: LineFormat,
    quantizer: Quantizer,
    mirrored: bool,
    scratch: Vec<u8>,
}

impl LineConverter {
    pub fn new(
        source: SourceColorSpace,
        conversion: ColorConversion,
        format: LineFormat,
        mirrored: bool,
    ) -> Self {
        LineConverter {
            conversion,
            source_channels: source.bytes_per_pixel(),
            format,
            quantizer: Quantizer::new(format.bits_per_color, format.bi_level),
            mirrored,
            scratch: Vec::new(),
        }
    }

    pub fn format(&self) -> &LineFormat {
        &self.format
    }

    /// Converts source row `src` (page row `row`) into `dst`, which must be
    /// `format().line_bytes(pixels)` long. `plane` picks the channel for banded and
    /// planar output and is ignored when chunky.
    pub fn convert_line(&mut self, src: &[u8], dst: &mut [u8], row: usize, plane: usize) {
        if self.format.has_fast_path() {
            self.convert_fast(src, dst, row);
        } else {
            self.convert_slow(src, dst, row, plane);
        }
    }

    fn source_pixel(&self, i: usize, pixels: usize) -> usize {
        if self.mirrored {
            pixels - 1 - i
        } else {
            i
        }
    }

    fn convert_fast(&mut self, src: &[u8], dst: &mut [u8], row: usize) {
        let pixels = src.len() / self.source_channels;
        let channels = self.format.num_colors;
        if self.format.bits_per_color == 8 && !self.mirrored {
            self.conversion
                .convert_run(src, self.source_channels, dst, channels);
            return;
        }
        self.scratch.clear();
        self.scratch.resize(pixels * channels, 0);
        self.conversion
            .convert_run(src, self.source_channels, &mut self.scratch, channels);
        if self.format.bits_per_color == 8 {
            for (d, s) in dst
                .chunks_exact_mut(channels)
                .zip(self.scratch.chunks_exact(channels).rev())
            {
                d.copy_from_slice(s);
            }
            return;
        }
        dst.fill(0);
        for i in 0..pixels {
            let x = self.source_pixel(i, pixels);
            if self.quantizer.quantize(self.scratch[x], x, row) != 0 {
                dst[i / 8] |= 0x80 >> (i % 8);
            }
        }
    }

    fn convert_slow(&mut self, src: &[u8], dst: &mut [u8], row: usize, plane: usize) {
        let pixels = src.len() / self.source_channels;
        let LineFormat {
            num_colors,
            bits_per_color,
            bits_per_pixel,
            color_order,
            ..
        } = self.format;
        let bpc = bits_per_color as usize;
        let bpp = bits_per_pixel as usize;
        // samples sit at the low end of a padded chunky pixel
        let pad = bpp.saturating_sub(num_colors * bpc);
        dst.fill(0);
        let mut pixel = [0u8; 4];
        for i in 0..pixels {
            let x = self.source_pixel(i, pixels);
            let start = x * self.source_channels;
            self.conversion
                .convert_pixel(&src[start..start + self.source_channels], &mut pixel);
            match color_order {
                CupsColorOrder::Chunky => {
                    for (k, &sample) in pixel[..num_colors].iter().enumerate() {
                        let value = self.quantizer.quantize(sample, x, row);
                        put_bits(dst, i * bpp + pad + k * bpc, bits_per_color, value);
                    }
                }
                CupsColorOrder::Banded | CupsColorOrder::Planar => {
                    let value = self.quantizer.quantize(pixel[plane], x, row);
                    put_bits(dst, i * bpc, bits_per_color, value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::DeviceColorFamily;

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
    const ORDERS: [CupsColorOrder; 3] = [
        CupsColorOrder::Chunky,
        CupsColorOrder::Banded,
        CupsColorOrder::Planar,
    ];
    const PIXELS: usize = 37;

    fn source_row(source: SourceColorSpace, seed: usize) -> Vec<u8> {
        (0..PIXELS * source.bytes_per_pixel())
            .map(|i| ((i * 37 + seed * 11) % 256) as u8)
            .collect()
    }

    fn formats(family: DeviceColorFamily) -> Vec<LineFormat> {
        let num_colors = family.num_colors() as usize;
        let mut formats = Vec::new();
        for bits_per_color in [1, 2, 4, 8, 16] {
            for color_order in ORDERS {
                for bi_level in [false, true] {
                    let bits_per_pixel = match color_order {
                        CupsColorOrder::Chunky => bits_per_color * num_colors as u32,
                        _ => bits_per_color,
                    };
                    formats.push(LineFormat {
                        num_colors,
                        bits_per_color,
                        bits_per_pixel,
                        color_order,
                        bi_level,
                    });
                }
            }
        }
        formats
    }

    fn converter(
        source: SourceColorSpace,
        family: DeviceColorFamily,
        format: LineFormat,
        mirrored: bool,
    ) -> LineConverter {
        LineConverter::new(
            source,
            ColorConversion::select(source, family),
            format,
            mirrored,
        )
    }

    #[test]
    fn fast_and_slow_paths_agree() {
        for source in SOURCES {
            for family in FAMILIES {
                for format in formats(family) {
                    if !format.has_fast_path() {
                        continue;
                    }
                    for mirrored in [false, true] {
                        let mut conv = converter(source, family, format, mirrored);
                        for row in 0..3 {
                            let src = source_row(source, row);
                            let mut fast = vec![0xaa; format.line_bytes(PIXELS)];
                            let mut slow = vec![0x55; format.line_bytes(PIXELS)];
                            conv.convert_fast(&src, &mut fast, row);
                            conv.convert_slow(&src, &mut slow, row, 0);
                            assert_eq!(fast, slow, "{source:?} -> {family:?} {format:?}");
                        }
                    }
                }
            }
        }
    }

    /// Unpacks sample `k` of pixel `i` from a line produced in `format`.
    fn sample(format: &LineFormat, line: &[u8], i: usize, k: usize) -> u32 {
        let bpc = format.bits_per_color as usize;
        let offset = match format.color_order {
            CupsColorOrder::Chunky => {
                let bpp = format.bits_per_pixel as usize;
                i * bpp + bpp - format.num_colors * bpc + k * bpc
            }
            _ => i * bpc,
        };
        (0..bpc).fold(0, |acc, bit| {
            let pos = offset + bit;
            (acc << 1) | ((line[pos / 8] >> (7 - pos % 8)) & 1) as u32
        })
    }

    #[test]
    fn mirrored_equals_reversed_forward() {
        for source in SOURCES {
            for family in FAMILIES {
                for format in formats(family) {
                    let planes = match format.color_order {
                        CupsColorOrder::Chunky => 1,
                        _ => format.num_colors,
                    };
                    let samples = match format.color_order {
                        CupsColorOrder::Chunky => format.num_colors,
                        _ => 1,
                    };
                    let mut forward = converter(source, family, format, false);
                    let mut mirrored = converter(source, family, format, true);
                    let src = source_row(source, 5);
                    for plane in 0..planes {
                        let mut a = vec![0; format.line_bytes(PIXELS)];
                        let mut b = vec![0; format.line_bytes(PIXELS)];
                        forward.convert_line(&src, &mut a, 4, plane);
                        mirrored.convert_line(&src, &mut b, 4, plane);
                        for i in 0..PIXELS {
                            for k in 0..samples {
                                assert_eq!(
                                    sample(&format, &a, i, k),
                                    sample(&format, &b, PIXELS - 1 - i, k),
                                    "{source:?} -> {family:?} {format:?}"
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn bi_level_one_bit_is_black_or_white() {
        let format = LineFormat {
            num_colors: 1,
            bits_per_color: 1,
            bits_per_pixel: 1,
            color_order: CupsColorOrder::Chunky,
            bi_level: true,
        };
        let src: Vec<u8> = (0..16).map(|i| i * 16).collect();
        let mut conv = converter(SourceColorSpace::Gray, DeviceColorFamily::White, format, false);
        let mut line = [0u8; 2];
        conv.convert_line(&src, &mut line, 0, 0);
        // samples above 127 are set
        assert_eq!(line, [0x00, 0xff]);
    }

    #[test]
    fn padded_chunky_pixels() {
        // 1-bit RGB in 4-bit pixels: 0RGB
        let format = LineFormat {
            num_colors: 3,
            bits_per_color: 1,
            bits_per_pixel: 4,
            color_order: CupsColorOrder::Chunky,
            bi_level: true,
        };
        let src = [255, 0, 255, 0, 255, 0];
        let mut conv = converter(SourceColorSpace::Rgb, DeviceColorFamily::Rgb, format, false);
        let mut line = [0u8; 1];
        conv.convert_line(&src, &mut line, 0, 0);
        assert_eq!(line, [0b0101_0010]);
    }

    #[test]
    fn banded_planes_select_channels() {
        let format = LineFormat {
            num_colors: 4,
            bits_per_color: 8,
            bits_per_pixel: 8,
            color_order: CupsColorOrder::Banded,
            bi_level: false,
        };
        let src = [10, 20, 30, 40, 50, 60, 70, 80];
        let mut conv = converter(SourceColorSpace::Cmyk, DeviceColorFamily::Cmyk, format, false);
        let mut line = [0u8; 2];
        conv.convert_line(&src, &mut line, 0, 2);
        assert_eq!(line, [30, 70]);
    }

    #[test]
    fn sixteen_bit_samples_replicate_bytes() {
        let format = LineFormat {
            num_colors: 1,
            bits_per_color: 16,
            bits_per_pixel: 16,
            color_order: CupsColorOrder::Chunky,
            bi_level: false,
        };
        let mut conv = converter(SourceColorSpace::Gray, DeviceColorFamily::White, format, false);
        let mut line = [0u8; 4];
        conv.convert_line(&[0x12, 0xfe], &mut line, 0, 0);
        assert_eq!(line, [0x12, 0x12, 0xfe, 0xfe]);
    }
}
