use futures::AsyncWrite;
use std::ops::DerefMut;
use std::pin::Pin;

/// Byte sink for one page of raster content.
///
/// An encoder accepts exactly the number of content bytes announced by the page
/// header and refuses anything beyond that (writes return `Ok(0)`).
pub trait RasterEncoder<W>: AsyncWrite
where
    W: DerefMut<Target: AsyncWrite>,
{
    fn bytes_remaining(&self) -> u64;
    fn into_pin_mut(self) -> Pin<W>;
}
