mod cups;
mod interface;

pub use cups::{CupsPageFactoryV2, CupsPageFactoryV3, WithCupsSyncWord};
pub use interface::RasterPageFactory;
