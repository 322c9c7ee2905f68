use super::{DeviceProfile, JobOptions, MediaCatalog};
use crate::convert::DeviceColorFamily;
use crate::error::PclmRasterError;
use crate::geometry::DuplexSwap;
use crate::model::cups::{CupsColorOrder, CupsPageHeaderV2};

const SUPPORTED_BITS_PER_COLOR: [u32; 5] = [1, 2, 4, 8, 16];

/// Everything about a job that is decided once, before the first page.
#[derive(Debug, Clone)]
pub struct JobContext {
    header: CupsPageHeaderV2,
    family: DeviceColorFamily,
    swap: DuplexSwap,
    bi_level: bool,
    pwg: bool,
    media: Option<MediaCatalog>,
}

impl JobContext {
    /// Validates the header template against the device and derives the job-wide flags.
    pub fn new(
        mut header: CupsPageHeaderV2,
        profile: &DeviceProfile,
        options: &JobOptions,
    ) -> Result<Self, PclmRasterError> {
        let bits_per_color = header.v1.bits_per_color;
        if !SUPPORTED_BITS_PER_COLOR.contains(&bits_per_color) {
            log::error!(
                "Specified color format is not supported: {} bits per color",
                bits_per_color
            );
            return Err(PclmRasterError::UnsupportedBitsPerColor(bits_per_color));
        }

        let family = DeviceColorFamily::from(header.v1.color_space);
        let num_colors = header.num_colors();
        if num_colors != family.num_colors() {
            return Err(log_layout(format!(
                "{:?} needs {} colors, header declares {}",
                header.v1.color_space,
                family.num_colors(),
                num_colors
            )));
        }
        header.num_colors = num_colors;

        let bits_per_pixel = header.v1.bits_per_pixel;
        let consistent = match header.v1.color_order {
            // chunky pixels either fill whole bytes or pack evenly into one
            CupsColorOrder::Chunky => {
                bits_per_pixel >= bits_per_color * num_colors
                    && (bits_per_pixel % 8 == 0 || 8 % bits_per_pixel == 0)
            }
            CupsColorOrder::Banded | CupsColorOrder::Planar => bits_per_pixel == bits_per_color,
        };
        if !consistent {
            return Err(log_layout(format!(
                "{} bits per pixel doesn't fit {} x {} bits in {:?} order",
                bits_per_pixel, num_colors, bits_per_color, header.v1.color_order
            )));
        }

        let swap = if header.v1.duplex {
            DuplexSwap::derive(
                profile.backside_mode(),
                header.v1.tumble,
                profile.flipped_margin,
            )
        } else {
            DuplexSwap::default()
        };
        let pwg = match profile.media {
            Some(_) => options.content_type_is_pwg() || profile.pwg_raster,
            None => options.media_class_is_pwg().unwrap_or(true),
        };
        log::debug!("Duplex swap: {:?}, PWG raster: {}", swap, pwg);

        Ok(JobContext {
            header,
            family,
            swap,
            bi_level: options.bi_level(),
            pwg,
            media: profile.media.clone(),
        })
    }

    /// Header template every page header starts from.
    pub fn header(&self) -> &CupsPageHeaderV2 {
        &self.header
    }

    pub fn family(&self) -> DeviceColorFamily {
        self.family
    }

    pub fn num_colors(&self) -> usize {
        self.header.num_colors as usize
    }

    pub fn bits_per_color(&self) -> u32 {
        self.header.v1.bits_per_color
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.header.v1.bits_per_pixel
    }

    pub fn color_order(&self) -> CupsColorOrder {
        self.header.v1.color_order
    }

    /// Separate passes over the page: one per color when planar.
    pub fn planes(&self) -> usize {
        match self.color_order() {
            CupsColorOrder::Planar => self.num_colors(),
            _ => 1,
        }
    }

    /// Lines written per row: one per color when banded.
    pub fn bands(&self) -> usize {
        match self.color_order() {
            CupsColorOrder::Banded => self.num_colors(),
            _ => 1,
        }
    }

    pub fn swap(&self) -> DuplexSwap {
        self.swap
    }

    pub fn bi_level(&self) -> bool {
        self.bi_level
    }

    pub fn is_pwg(&self) -> bool {
        self.pwg
    }

    pub fn media(&self) -> Option<&MediaCatalog> {
        self.media.as_ref()
    }

    /// Odd pages (0-based) of a duplex job.
    pub fn is_backside(&self, page_index: usize) -> bool {
        self.header.v1.duplex && page_index % 2 == 1
    }
}

fn log_layout(msg: String) -> PclmRasterError {
    log::error!("Inconsistent raster layout: {}", msg);
    PclmRasterError::layout(msg)
}
