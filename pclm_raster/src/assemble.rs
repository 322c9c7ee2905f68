//! Joins the strip images of a page into one bitmap.

use crate::error::PclmRasterError;
use crate::model::page::{PageFragment, Rotation, SourceColorSpace};

/// A whole page of 8-bit samples, rows packed without padding.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBitmap {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub color_space: SourceColorSpace,
}

impl PageBitmap {
    /// Bytes per source row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.color_space.bytes_per_pixel()
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.stride();
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Page width and height once `rotation` is applied.
    pub fn rotated_size(&self, rotation: Rotation) -> (u32, u32) {
        if rotation.is_landscape() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// Collects fragments in scan order: heights add up, the widest fragment sets the width.
#[derive(Debug, Default)]
pub struct BitmapAssembler {
    data: Vec<u8>,
    width: u32,
    height: u32,
    color_space: Option<SourceColorSpace>,
}

impl BitmapAssembler {
    /// An assembler whose buffer already holds `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, PclmRasterError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| PclmRasterError::layout(format!("can't allocate {capacity} bytes")))?;
        Ok(BitmapAssembler {
            data,
            ..Default::default()
        })
    }

    /// Assembles all `fragments` of a page, presizing the buffer to their total size.
    pub fn assemble(fragments: Vec<PageFragment>) -> Result<PageBitmap, PclmRasterError> {
        let total = fragments.iter().map(PageFragment::byte_size).sum();
        let mut assembler = BitmapAssembler::with_capacity(total)?;
        for fragment in fragments {
            assembler.push(fragment)?;
        }
        assembler.finish()
    }

    pub fn push(&mut self, fragment: PageFragment) -> Result<(), PclmRasterError> {
        let color_space = SourceColorSpace::from_name(fragment.color_space.as_deref())?;
        match self.color_space {
            Some(previous) if previous != color_space => {
                return Err(PclmRasterError::layout(format!(
                    "page mixes {previous:?} and {color_space:?} fragments"
                )));
            }
            _ => self.color_space = Some(color_space),
        }
        self.data
            .try_reserve(fragment.byte_size())
            .map_err(|_| PclmRasterError::layout("page bitmap too large"))?;
        self.data.extend_from_slice(&fragment.data);
        self.height = self
            .height
            .checked_add(fragment.height)
            .ok_or_else(|| PclmRasterError::layout("page height overflows"))?;
        self.width = self.width.max(fragment.width);
        Ok(())
    }

    /// Checks that the collected bytes form a full `width` x `height` bitmap.
    pub fn finish(self) -> Result<PageBitmap, PclmRasterError> {
        let color_space = self.color_space.unwrap_or(SourceColorSpace::Rgb);
        let expected = self.width as u64 * self.height as u64 * color_space.bytes_per_pixel() as u64;
        if self.data.len() as u64 != expected {
            return Err(PclmRasterError::layout(format!(
                "{} bytes of {:?} samples don't make a {}x{} bitmap",
                self.data.len(),
                color_space,
                self.width,
                self.height
            )));
        }
        Ok(PageBitmap {
            data: self.data,
            width: self.width,
            height: self.height,
            color_space,
        })
    }
}
