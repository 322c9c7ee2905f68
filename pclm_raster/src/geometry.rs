//! Page size, margins and imaging box of a page, and the duplex swap flags.

use crate::config::{BacksideMode, JobContext, MediaCatalog};
use crate::error::PageSkip;
use crate::model::cups::{CupsImagingBoundingBox, CupsPageHeaderV2, CupsPageSize};
use crate::model::page::{MediaBox, Margins, Rotation};

/// Two sizes closer than this, in points, name the same media.
const MEDIA_SIZE_TOLERANCE: f32 = 5.0;

/// Which axes of a duplex backside are mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DuplexSwap {
    pub image_x: bool,
    pub image_y: bool,
    pub margin_x: bool,
    pub margin_y: bool,
}

impl DuplexSwap {
    const ALL: DuplexSwap = DuplexSwap {
        image_x: true,
        image_y: true,
        margin_x: true,
        margin_y: true,
    };

    /// Derives the flags from the device backside mode, the tumble setting and the
    /// flipped-margin attribute (`None` when the device doesn't declare it).
    pub fn derive(backside: BacksideMode, tumble: bool, flipped_margin: Option<bool>) -> Self {
        let mut swap = match (backside, tumble) {
            (BacksideMode::ManualTumble, true) | (BacksideMode::Rotated, false) => DuplexSwap::ALL,
            (BacksideMode::Flipped, true) => DuplexSwap {
                image_x: true,
                margin_x: true,
                margin_y: true,
                ..Default::default()
            },
            (BacksideMode::Flipped, false) => DuplexSwap {
                image_y: true,
                ..Default::default()
            },
            _ => DuplexSwap::default(),
        };
        match (backside, flipped_margin) {
            (BacksideMode::Flipped, Some(false)) => swap.margin_y = !swap.margin_y,
            (BacksideMode::ManualTumble | BacksideMode::Rotated, Some(true)) => {
                swap.margin_y = false
            }
            _ => {}
        }
        swap
    }
}

/// Resolved physical layout of one page, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub paper: CupsPageSize<f32>,
    pub margins: Margins,
    pub imaging_bbox: CupsImagingBoundingBox<f32>,
    pub media_name: Option<String>,
}

impl PageGeometry {
    /// Resolves the layout of page `page_index` (0-based).
    pub fn resolve(
        ctx: &JobContext,
        page_index: usize,
        rotation: Rotation,
        media_box: Option<&MediaBox>,
    ) -> Result<Self, PageSkip> {
        let media_box = media_box
            .filter(|media_box| media_box.is_valid())
            .ok_or(PageSkip::InvalidMediaBox {
                page: page_index + 1,
            })?;
        log::debug!("Media box = {:?}", media_box.0);

        let (mut width, mut length) = (media_box.width().trunc(), media_box.height().trunc());
        if rotation.is_landscape() {
            std::mem::swap(&mut width, &mut length);
        }

        let (paper, mut margins, media_name) = match ctx.media() {
            Some(catalog) => match_media(catalog, width, length),
            None => {
                let bbox = &ctx.header().imaging_bbox_f32;
                let margins = if bbox.top > 0.0 && !ctx.is_pwg() {
                    Margins {
                        left: bbox.left,
                        bottom: bbox.bottom,
                        right: width - bbox.right,
                        top: length - bbox.top,
                    }
                } else {
                    Margins::default()
                };
                ((width, length), margins, None)
            }
        };

        if ctx.is_pwg() {
            margins = Margins::default();
        }
        if ctx.is_backside(page_index) {
            let swap = ctx.swap();
            if swap.margin_x {
                std::mem::swap(&mut margins.left, &mut margins.right);
            }
            if swap.margin_y {
                std::mem::swap(&mut margins.bottom, &mut margins.top);
            }
        }

        let imaging_bbox = if ctx.is_pwg() {
            CupsImagingBoundingBox::default()
        } else {
            CupsImagingBoundingBox {
                left: margins.left,
                bottom: margins.bottom,
                right: paper.0 - margins.right,
                top: paper.1 - margins.top,
            }
        };
        let geometry = PageGeometry {
            paper: CupsPageSize {
                width: paper.0,
                height: paper.1,
            },
            margins,
            imaging_bbox,
            media_name,
        };
        log::debug!("Page {} geometry: {:?}", page_index + 1, geometry);
        Ok(geometry)
    }

    /// Writes page size, margins, imaging box and media name into `header`.
    pub fn apply_to(&self, header: &mut CupsPageHeaderV2) {
        header.page_size_f32 = self.paper.clone();
        header.v1.page_size.width = round(self.paper.width);
        header.v1.page_size.height = round(self.paper.height);
        header.v1.margins.left = round(self.margins.left);
        header.v1.margins.bottom = round(self.margins.bottom);
        header.imaging_bbox_f32 = self.imaging_bbox.clone();
        let bbox = &self.imaging_bbox;
        header.v1.imaging_bbox = CupsImagingBoundingBox {
            left: round(bbox.left),
            bottom: round(bbox.bottom),
            right: round(bbox.right),
            top: round(bbox.top),
        };
        if let Some(name) = &self.media_name {
            header.page_size_name = name.clone();
        }
    }
}

/// Point value to the nearest whole point. Negative values clamp to zero.
fn round(value: f32) -> u32 {
    (value + 0.5) as u32
}

fn within_tolerance(a: f32, b: f32) -> bool {
    (a - b).abs() < MEDIA_SIZE_TOLERANCE
}

/// Paper size, margins and name for a page of `width` x `length` points.
fn match_media(
    catalog: &MediaCatalog,
    width: f32,
    length: f32,
) -> ((f32, f32), Margins, Option<String>) {
    if let Some(size) = catalog
        .sizes
        .iter()
        .find(|size| within_tolerance(width, size.width) && within_tolerance(length, size.length))
    {
        return ((size.width, size.length), size.margins(), Some(size.name.clone()));
    }
    if let Some(size) = catalog
        .sizes
        .iter()
        .find(|size| within_tolerance(width, size.length) && within_tolerance(length, size.width))
    {
        let portrait = size.margins();
        let margins = Margins {
            left: portrait.bottom,
            bottom: portrait.right,
            right: portrait.top,
            top: portrait.left,
        };
        return ((size.length, size.width), margins, Some(size.name.clone()));
    }
    ((width, length), catalog.custom_margins, None)
}
