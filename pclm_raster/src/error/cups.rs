use thiserror::Error;

#[derive(Error, Debug)]
pub enum CupsRasterError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("String too long")]
    StringTooLong,
    #[error("Data too large")]
    DataTooLarge,
    #[error("Not all bytes of the previous page are written")]
    IncompletePage,
    #[error("No page is started")]
    NoPageStarted,
    #[error("Raster stream is already closed")]
    StreamClosed,
}
