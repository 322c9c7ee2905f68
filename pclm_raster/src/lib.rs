//! A crate for compositing PCLm pages into CUPS/PWG raster streams in Rust.
//!
//! A PCLm page is a media box, a rotation and a stack of image strips. This crate glues the
//! strips into one bitmap, rotates it, converts every line to the device color space and bit
//! depth, and writes the result page by page through a [`RasterPageSink`](writer::RasterPageSink).
//!
//! # Example
//! First, describe the device raster format with a header template and build a
//! [`JobContext`](config::JobContext) from it. Then hand the pages to
//! [`run_job`](compositor::run_job) together with a writer. Call `finish` once the job is done.
//!
//! ```rust
//! use pclm_raster::{
//!     compositor::run_job,
//!     config::{DeviceProfile, JobContext, JobOptions},
//!     model::{
//!         cups::{CupsColorOrder, CupsColorSpace, CupsPageHeaderV2},
//!         page::{MediaBox, PageFragment, PclmPage},
//!     },
//!     writer::{CupsRasterWriterV2BE, RasterPageSink},
//! };
//! use std::pin::Pin;
//!
//! # futures::executor::block_on(async {
//! let mut header = CupsPageHeaderV2::default();
//! header.v1.color_space = CupsColorSpace::sRGB;
//! header.v1.color_order = CupsColorOrder::Chunky;
//! header.v1.bits_per_color = 8;
//! header.v1.bits_per_pixel = 24;
//! let ctx = JobContext::new(header, &DeviceProfile::default(), &JobOptions::default())?;
//!
//! let page = PclmPage {
//!     rotate: 0,
//!     media_box: Some(MediaBox([0.0, 0.0, 612.0, 792.0])),
//!     fragments: vec![PageFragment {
//!         width: 100,
//!         height: 50,
//!         color_space: Some("/DeviceGray".to_string()),
//!         data: vec![0x80; 100 * 50],
//!     }],
//! };
//!
//! let mut data = Vec::<u8>::new();
//! let mut writer = CupsRasterWriterV2BE::new(Pin::new(&mut data)).await?;
//! let summary = run_job(&ctx, vec![page], &mut writer).await?;
//! writer.finish().await?;
//! assert_eq!(summary.pages_emitted, 1);
//! assert_eq!(&data[..4], b"RaS2");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # }).unwrap();
//! ```
//!
//! [`MemoryRasterWriter`](writer::MemoryRasterWriter) keeps pages in memory instead, which
//! is handy for checking the converted lines.

pub mod assemble;
pub mod compositor;
pub mod config;
pub mod convert;
pub mod encode;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod model;
pub mod rotate;
pub mod writer;
// Re-export byteorder crate.
pub use byteorder;
