//! Quarter-turn rotation of whole page bitmaps.

use crate::assemble::PageBitmap;
use crate::error::PclmRasterError;
use crate::model::page::Rotation;

/// Rotates a packed bitmap of `width` x `height` pixels clockwise by `rotation`.
///
/// The result is `height` x `width` for 90 and 270 degrees. `Deg0` returns `src` untouched.
pub fn rotate_bitmap(
    src: Vec<u8>,
    rotation: Rotation,
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>, PclmRasterError> {
    if rotation == Rotation::Deg0 {
        return Ok(src);
    }
    let len = width * height * bytes_per_pixel;
    if src.len() != len {
        return Err(PclmRasterError::layout(format!(
            "{} bytes can't be rotated as {}x{}x{}",
            src.len(),
            width,
            height,
            bytes_per_pixel
        )));
    }
    let mut dst = Vec::new();
    dst.try_reserve_exact(len)
        .map_err(|_| PclmRasterError::layout("rotated bitmap too large"))?;
    dst.resize(len, 0);

    let pixel = |x: usize, y: usize| {
        let start = (y * width + x) * bytes_per_pixel;
        &src[start..start + bytes_per_pixel]
    };
    let out = dst.chunks_exact_mut(bytes_per_pixel.max(1));
    match rotation {
        Rotation::Deg0 => {}
        Rotation::Deg180 => {
            for (dp, sp) in out.zip(src.chunks_exact(bytes_per_pixel.max(1)).rev()) {
                dp.copy_from_slice(sp);
            }
        }
        // the output is `height` pixels wide
        Rotation::Deg90 => {
            for (n, dp) in out.enumerate() {
                let (i, h) = (n % height, n / height);
                dp.copy_from_slice(pixel(h, height - 1 - i));
            }
        }
        Rotation::Deg270 => {
            for (n, dp) in out.enumerate() {
                let (i, h) = (n % height, n / height);
                dp.copy_from_slice(pixel(width - 1 - h, i));
            }
        }
    }
    Ok(dst)
}

impl PageBitmap {
    /// Consumes the bitmap and returns it rotated. The source buffer is dropped.
    pub fn rotate(self, rotation: Rotation) -> Result<PageBitmap, PclmRasterError> {
        let (width, height) = self.rotated_size(rotation);
        let data = rotate_bitmap(
            self.data,
            rotation,
            self.width as usize,
            self.height as usize,
            self.color_space.bytes_per_pixel(),
        )?;
        Ok(PageBitmap {
            data,
            width,
            height,
            color_space: self.color_space,
        })
    }
}
