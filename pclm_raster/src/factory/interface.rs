use crate::encode::RasterEncoder;
use futures::AsyncWrite;
use std::{ops::DerefMut, pin::Pin};

/// Serializes page headers and picks the content encoder of one raster stream flavor.
///
/// [`CupsRasterWriter`](crate::writer::CupsRasterWriter) is generic over this, so the
/// stream version and byte order are fixed at the type level.
pub trait RasterPageFactory
where
    Self: Sized,
{
    type Header;
    type Error;
    const HEADER_SIZE: usize;
    /// Serializes `header` into `target`, which is exactly `HEADER_SIZE` bytes.
    fn header_to_bytes(target: &mut [u8], header: &Self::Header) -> Result<(), Self::Error>;

    type Encoder<W>: RasterEncoder<W>
    where
        W: DerefMut<Target: AsyncWrite>;
    /// Wraps `writer` in the encoder for the page content `header` announces.
    fn encode<W>(header: &Self::Header, writer: Pin<W>) -> Result<Self::Encoder<W>, Self::Error>
    where
        W: DerefMut<Target: AsyncWrite>;
}
