mod compressed;
mod encoder;
mod uncompressed;

pub use compressed::CompressedRasterEncoder;
pub use encoder::RasterEncoder;
pub use uncompressed::UncompressedRasterEncoder;
