use arbitrary::Arbitrary;
use honggfuzz::fuzz;
use pclm_raster::compositor::run_job;
use pclm_raster::config::{BacksideMode, DeviceProfile, JobContext, JobOptions};
use pclm_raster::error::PclmRasterError;
use pclm_raster::model::page::PclmPage;
use pclm_raster::writer::{CupsRasterWriterV2BE, RasterPageSink};
use pclm_raster_fuzz::{FuzzPage, FuzzRasterFormat};
use std::pin::Pin;

#[derive(Clone, Debug, Arbitrary)]
pub struct JobInput {
    pub format: FuzzRasterFormat,
    pub backside: u8,
    pub bi_level: bool,
    pub pages: Vec<FuzzPage>,
}

const BACKSIDES: [BacksideMode; 4] = [
    BacksideMode::Normal,
    BacksideMode::ManualTumble,
    BacksideMode::Rotated,
    BacksideMode::Flipped,
];

fn main() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    loop {
        fuzz!(|input: JobInput| {
            let profile = DeviceProfile {
                backside: Some(BACKSIDES[input.backside as usize % BACKSIDES.len()]),
                ..Default::default()
            };
            let options = JobOptions {
                print_color_mode: input.bi_level.then(|| "bi-level".to_string()),
                ..Default::default()
            };
            let Ok(ctx) = JobContext::new(input.format.into(), &profile, &options) else {
                return;
            };
            let pages: Vec<PclmPage> = input.pages.into_iter().map(PclmPage::from).collect();

            rt.block_on(async move {
                let mut output = Vec::<u8>::new();
                let mut writer = CupsRasterWriterV2BE::new(Pin::new(&mut output))
                    .await
                    .unwrap();
                match run_job(&ctx, pages, &mut writer).await {
                    Ok(_) => writer.finish().await.unwrap(),
                    // every page that was started must still be complete
                    Err(PclmRasterError::LayoutError(_) | PclmRasterError::UnknownRotation(_)) => {
                        writer.finish().await.unwrap();
                    }
                    Err(e) => panic!("unexpected error: {e}"),
                }
            });
        });
    }
}
