//! Bit depth reduction and MSB-first sample packing.

const fn bayer<const N: usize>() -> [[u8; N]; N] {
    let mut matrix = [[0u8; N]; N];
    let levels = N.trailing_zeros();
    let mut y = 0;
    while y < N {
        let mut x = 0;
        while x < N {
            let mut value = 0usize;
            let mut i = 0;
            while i < levels {
                let xb = (x >> i) & 1;
                let yb = (y >> i) & 1;
                value = (value << 2) | ((xb ^ yb) << 1) | yb;
                i += 1;
            }
            matrix[y][x] = value as u8;
            x += 1;
        }
        y += 1;
    }
    matrix
}

/// Ordered dither matrices, values `0..N*N`.
const BAYER_4: [[u8; 4]; 4] = bayer::<4>();
const BAYER_8: [[u8; 8]; 8] = bayer::<8>();
const BAYER_16: [[u8; 16]; 16] = bayer::<16>();

const BI_LEVEL_THRESHOLD: u8 = 0x7f;

/// Reduces 8-bit samples to the device bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    bits_per_color: u32,
    bi_level: bool,
}

impl Quantizer {
    pub fn new(bits_per_color: u32, bi_level: bool) -> Self {
        Quantizer {
            bits_per_color,
            bi_level,
        }
    }

    /// Quantizes `sample` at page position (`x`, `y`); the position selects the dither cell.
    pub fn quantize(&self, sample: u8, x: usize, y: usize) -> u16 {
        match self.bits_per_color {
            1 => {
                let threshold = if self.bi_level {
                    BI_LEVEL_THRESHOLD
                } else {
                    (BAYER_16[y % 16][x % 16] as u16 * 255 / 256) as u8
                };
                u16::from(sample > threshold)
            }
            2 => (sample.saturating_add(BAYER_8[y % 8][x % 8]) >> 6) as u16,
            4 => (sample.saturating_add(BAYER_4[y % 4][x % 4]) >> 4) as u16,
            16 => sample as u16 * 257,
            _ => sample as u16,
        }
    }
}

/// Writes the low `width` bits of `value` at bit `offset` of `dst`, most significant bit
/// first. Target bits must be zero.
pub fn put_bits(dst: &mut [u8], offset: usize, width: u32, value: u16) {
    if offset % 8 == 0 && width % 8 == 0 {
        let start = offset / 8;
        let bytes = value.to_be_bytes();
        let n = width as usize / 8;
        dst[start..start + n].copy_from_slice(&bytes[2 - n..]);
        return;
    }
    for bit in 0..width as usize {
        if (value >> (width as usize - 1 - bit)) & 1 != 0 {
            let pos = offset + bit;
            dst[pos / 8] |= 0x80 >> (pos % 8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bayer_matrices_are_permutations() {
        assert_eq!(bayer::<2>(), [[0, 2], [3, 1]]);
        let mut seen = [false; 256];
        for row in BAYER_16 {
            for v in row {
                seen[v as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
        assert!(BAYER_8.iter().flatten().all(|&v| v < 64));
        assert!(BAYER_4.iter().flatten().all(|&v| v < 16));
    }

    #[test]
    fn extremes_survive_every_depth() {
        for bits in [1, 2, 4, 8, 16] {
            for bi_level in [false, true] {
                let quantizer = Quantizer::new(bits, bi_level);
                let max = if bits == 16 { u16::MAX } else { (1 << bits) - 1 };
                for y in 0..16 {
                    for x in 0..16 {
                        assert_eq!(quantizer.quantize(0, x, y), 0);
                        assert_eq!(quantizer.quantize(255, x, y), max);
                    }
                }
            }
        }
    }

    #[test]
    fn bi_level_is_a_fixed_threshold() {
        let quantizer = Quantizer::new(1, true);
        assert_eq!(quantizer.quantize(127, 3, 5), 0);
        assert_eq!(quantizer.quantize(128, 9, 1), 1);
    }

    #[test]
    fn dither_tracks_coverage() {
        let quantizer = Quantizer::new(1, false);
        let on: u32 = (0..16)
            .flat_map(|y| (0..16).map(move |x| (x, y)))
            .map(|(x, y)| quantizer.quantize(64, x, y) as u32)
            .sum();
        assert!((60..=68).contains(&on), "{on}");
    }

    #[test]
    fn packs_msb_first() {
        let mut line = [0u8; 2];
        put_bits(&mut line, 1, 1, 1);
        put_bits(&mut line, 6, 4, 0b1011);
        assert_eq!(line, [0b0100_0010, 0b1100_0000]);
        let mut wide = [0u8; 3];
        put_bits(&mut wide, 8, 16, 0xabcd);
        assert_eq!(wide, [0, 0xab, 0xcd]);
        put_bits(&mut wide, 0, 8, 0x12);
        assert_eq!(wide[0], 0x12);
    }
}
