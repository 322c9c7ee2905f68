mod cups;
mod interface;
mod memory;

pub use cups::{
    CupsRasterWriter, CupsRasterWriterV2BE, CupsRasterWriterV2LE, CupsRasterWriterV3BE,
    CupsRasterWriterV3LE,
};
pub use interface::RasterPageSink;
pub use memory::{CapturedPage, MemoryRasterWriter};
