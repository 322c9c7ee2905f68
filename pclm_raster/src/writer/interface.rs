use std::future::Future;

/// Destination for composed raster pages.
///
/// A page is opened with [`start_page`](Self::start_page) and then receives exactly
/// the number of content bytes its header announces, in one or more
/// [`write_pixels`](Self::write_pixels) calls. Opening the next page closes the current one.
pub trait RasterPageSink {
    type Header;
    type Error;

    fn start_page(
        &mut self,
        header: &Self::Header,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    fn write_pixels(&mut self, data: &[u8]) -> impl Future<Output = Result<(), Self::Error>>;

    /// Ends the stream. The last page must be complete.
    fn finish(self) -> impl Future<Output = Result<(), Self::Error>>;
}
