//! Job configuration: device attributes, job options and the validated [`JobContext`].

mod context;
mod device;
mod options;

pub use context::JobContext;
pub use device::{BacksideMode, DeviceProfile, MediaCatalog, MediaSize};
pub use options::JobOptions;
