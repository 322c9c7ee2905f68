use super::RasterPageSink;
use crate::error::CupsRasterError;
use crate::model::cups::CupsPageHeaderV2;

/// A page captured by [`MemoryRasterWriter`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPage {
    pub header: CupsPageHeaderV2,
    pub data: Vec<u8>,
}

impl CapturedPage {
    /// Content split into header lines. Planar pages yield `height` lines per color.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.data
            .chunks(self.header.v1.bytes_per_line.max(1) as usize)
    }

    pub fn is_complete(&self) -> bool {
        self.header.content_size() == Some(self.data.len() as u64)
    }
}

/// Keeps every page in memory instead of serializing it.
#[derive(Debug, Default)]
pub struct MemoryRasterWriter {
    pages: Vec<CapturedPage>,
}

impl MemoryRasterWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[CapturedPage] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<CapturedPage> {
        self.pages
    }
}

impl RasterPageSink for MemoryRasterWriter {
    type Header = CupsPageHeaderV2;
    type Error = CupsRasterError;

    async fn start_page(&mut self, header: &CupsPageHeaderV2) -> Result<(), CupsRasterError> {
        if self.pages.last().is_some_and(|page| !page.is_complete()) {
            return Err(CupsRasterError::IncompletePage);
        }
        self.pages.push(CapturedPage {
            header: header.clone(),
            data: Vec::new(),
        });
        Ok(())
    }

    async fn write_pixels(&mut self, data: &[u8]) -> Result<(), CupsRasterError> {
        let page = self
            .pages
            .last_mut()
            .ok_or(CupsRasterError::NoPageStarted)?;
        let limit = page
            .header
            .content_size()
            .ok_or(CupsRasterError::DataTooLarge)?;
        if (page.data.len() + data.len()) as u64 > limit {
            return Err(CupsRasterError::DataTooLarge);
        }
        page.data.extend_from_slice(data);
        Ok(())
    }

    async fn finish(self) -> Result<(), CupsRasterError> {
        match self.pages.last() {
            Some(page) if !page.is_complete() => Err(CupsRasterError::IncompletePage),
            _ => Ok(()),
        }
    }
}
