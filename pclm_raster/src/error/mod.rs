mod cups;
mod job;

pub use cups::CupsRasterError;
pub use job::{PageSkip, PclmRasterError};
