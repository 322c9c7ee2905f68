use super::CupsRasterError;
use crate::model::page::Rotation;
use num_enum::TryFromPrimitiveError;
use thiserror::Error;

/// Fatal job-level failures. Any of these ends the whole job.
#[derive(Error, Debug)]
pub enum PclmRasterError {
    #[error("Specified color format is not supported: {0} bits per color")]
    UnsupportedBitsPerColor(u32),
    #[error("Colorspace {0} not supported")]
    UnsupportedColorSpace(String),
    #[error("Incorrect rotate value: {0}")]
    UnknownRotation(#[from] TryFromPrimitiveError<Rotation>),
    #[error("Inconsistent raster layout: {0}")]
    LayoutError(String),
    #[error("Can't write page {page} header")]
    HeaderWrite {
        page: usize,
        #[source]
        source: CupsRasterError,
    },
    #[error("Raster write error")]
    RasterError(#[from] CupsRasterError),
}

impl PclmRasterError {
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::LayoutError(msg.into())
    }
}

/// Why a page was left out of the output. The job carries on with the next page.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageSkip {
    #[error("page {page} doesn't contain a valid media box")]
    InvalidMediaBox { page: usize },
}
