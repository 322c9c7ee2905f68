//! 8-bit sample conversions between the source and device color spaces.

pub fn white_to_black(w: u8) -> u8 {
    255 - w
}

pub fn white_to_rgb(w: u8, out: &mut [u8]) {
    out[..3].fill(w);
}

pub fn white_to_cmy(w: u8, out: &mut [u8]) {
    out[..3].fill(255 - w);
}

pub fn white_to_cmyk(w: u8, out: &mut [u8]) {
    out[..3].fill(0);
    out[3] = 255 - w;
}

/// Luminance with the 31/61/8 weights.
pub fn rgb_to_white(rgb: &[u8]) -> u8 {
    let (r, g, b) = (rgb[0] as u32, rgb[1] as u32, rgb[2] as u32);
    ((31 * r + 61 * g + 8 * b) / 100) as u8
}

pub fn rgb_to_black(rgb: &[u8]) -> u8 {
    255 - rgb_to_white(rgb)
}

pub fn rgb_to_cmy(rgb: &[u8], out: &mut [u8]) {
    for (o, &s) in out[..3].iter_mut().zip(&rgb[..3]) {
        *o = 255 - s;
    }
}

/// CMY plus black generation: `k = min³ / max²`, removed from the other colorants.
pub fn rgb_to_cmyk(rgb: &[u8], out: &mut [u8]) {
    rgb_to_cmy(rgb, out);
    let min = out[..3].iter().copied().min().unwrap_or(0) as u32;
    let max = out[..3].iter().copied().max().unwrap_or(0) as u32;
    let k = if max > min {
        min * min * min / (max * max)
    } else {
        min
    };
    for c in &mut out[..3] {
        *c -= k as u8;
    }
    out[3] = k as u8;
}

pub fn cmyk_to_rgb(cmyk: &[u8], out: &mut [u8]) {
    let k = cmyk[3] as u32;
    for (o, &c) in out[..3].iter_mut().zip(&cmyk[..3]) {
        *o = 255 - (c as u32 + k).min(255) as u8;
    }
}

pub fn cmyk_to_white(cmyk: &[u8]) -> u8 {
    let mut rgb = [0u8; 3];
    cmyk_to_rgb(cmyk, &mut rgb);
    rgb_to_white(&rgb)
}

pub fn cmyk_to_black(cmyk: &[u8]) -> u8 {
    white_to_black(cmyk_to_white(cmyk))
}

pub fn cmyk_to_cmy(cmyk: &[u8], out: &mut [u8]) {
    let mut rgb = [0u8; 3];
    cmyk_to_rgb(cmyk, &mut rgb);
    rgb_to_cmy(&rgb, out);
}
