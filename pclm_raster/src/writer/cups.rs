use super::RasterPageSink;
use crate::encode::RasterEncoder;
use crate::error::CupsRasterError;
use crate::factory::{CupsPageFactoryV2, CupsPageFactoryV3, RasterPageFactory, WithCupsSyncWord};
use byteorder::{BigEndian, LittleEndian};
use futures::{AsyncWrite, AsyncWriteExt};
use std::marker::PhantomData;
use std::ops::DerefMut;
use std::pin::Pin;

/// Writes a CUPS raster stream: the sync word, then a header and content per page.
pub struct CupsRasterWriter<F, W>
where
    F: RasterPageFactory,
    W: DerefMut<Target: AsyncWrite>,
{
    writer: Option<Pin<W>>,
    content: Option<F::Encoder<W>>,
    _factory: PhantomData<F>,
}

impl<F, W> CupsRasterWriter<F, W>
where
    F: RasterPageFactory<Error = CupsRasterError> + WithCupsSyncWord,
    F::Encoder<W>: Unpin,
    W: DerefMut<Target: AsyncWrite>,
{
    pub async fn new(mut writer: Pin<W>) -> Result<Self, CupsRasterError> {
        let sync_word = F::sync_word();
        log::debug!("Starting {:?} raster stream", sync_word.byte_order());
        let buffer = (sync_word as u32).to_ne_bytes();
        writer.as_mut().write_all(&buffer).await?;
        Ok(CupsRasterWriter {
            writer: Some(writer),
            content: None,
            _factory: PhantomData,
        })
    }

    /// Completes the open page, if any, and hands back the underlying writer.
    async fn end_page(&mut self) -> Result<Pin<W>, CupsRasterError> {
        match self.content.take() {
            Some(mut content) => {
                if content.bytes_remaining() != 0 {
                    self.content = Some(content);
                    return Err(CupsRasterError::IncompletePage);
                }
                content.flush().await?;
                Ok(content.into_pin_mut())
            }
            None => self.writer.take().ok_or(CupsRasterError::StreamClosed),
        }
    }
}

impl<F, W> RasterPageSink for CupsRasterWriter<F, W>
where
    F: RasterPageFactory<Error = CupsRasterError> + WithCupsSyncWord,
    F::Encoder<W>: Unpin,
    W: DerefMut<Target: AsyncWrite>,
{
    type Header = F::Header;
    type Error = CupsRasterError;

    async fn start_page(&mut self, header: &F::Header) -> Result<(), CupsRasterError> {
        let mut writer = self.end_page().await?;
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(F::HEADER_SIZE).map_err(std::io::Error::from)?;
        buffer.resize(F::HEADER_SIZE, 0);
        if let Err(e) = F::header_to_bytes(&mut buffer, header) {
            self.writer = Some(writer);
            return Err(e);
        }
        writer.as_mut().write_all(&buffer).await?;
        self.content = Some(F::encode(header, writer)?);
        Ok(())
    }

    async fn write_pixels(&mut self, data: &[u8]) -> Result<(), CupsRasterError> {
        let content = self
            .content
            .as_mut()
            .ok_or(CupsRasterError::NoPageStarted)?;
        if (data.len() as u64) > content.bytes_remaining() {
            return Err(CupsRasterError::DataTooLarge);
        }
        content.write_all(data).await?;
        Ok(())
    }

    async fn finish(mut self) -> Result<(), CupsRasterError> {
        let mut writer = self.end_page().await?;
        writer.as_mut().close().await?;
        Ok(())
    }
}

pub type CupsRasterWriterV2BE<W> = CupsRasterWriter<CupsPageFactoryV2<BigEndian>, W>;
pub type CupsRasterWriterV2LE<W> = CupsRasterWriter<CupsPageFactoryV2<LittleEndian>, W>;
pub type CupsRasterWriterV3BE<W> = CupsRasterWriter<CupsPageFactoryV3<BigEndian>, W>;
pub type CupsRasterWriterV3LE<W> = CupsRasterWriter<CupsPageFactoryV3<LittleEndian>, W>;
