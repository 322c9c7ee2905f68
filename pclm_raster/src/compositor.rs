//! Drives a whole job: per page geometry, assembly, rotation and scanline emission.

use crate::assemble::BitmapAssembler;
use crate::config::JobContext;
use crate::convert::{ColorConversion, LineConverter, LineFormat};
use crate::error::{CupsRasterError, PageSkip, PclmRasterError};
use crate::geometry::PageGeometry;
use crate::model::cups::CupsPageHeaderV2;
use crate::model::page::{PclmPage, Rotation};
use crate::writer::RasterPageSink;

/// Page counts of a finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobSummary {
    pub pages_emitted: usize,
    pub pages_skipped: usize,
}

enum PageOutcome {
    Emitted,
    Skipped(PageSkip),
}

/// Composes every page of `pages` into `sink`, in order.
///
/// Pages without a usable media box are logged and skipped. Any other failure ends
/// the job. `sink` is left open so the caller can finish or inspect it.
pub async fn run_job<S, I>(
    ctx: &JobContext,
    pages: I,
    sink: &mut S,
) -> Result<JobSummary, PclmRasterError>
where
    S: RasterPageSink<Header = CupsPageHeaderV2, Error = CupsRasterError>,
    I: IntoIterator<Item = PclmPage>,
{
    let mut summary = JobSummary::default();
    for (index, page) in pages.into_iter().enumerate() {
        match compose_page(ctx, index, page, sink).await {
            Ok(PageOutcome::Emitted) => summary.pages_emitted += 1,
            Ok(PageOutcome::Skipped(skip)) => {
                log::error!("{}", skip);
                summary.pages_skipped += 1;
            }
            Err(e) => {
                log::error!("Page {}: {}", index + 1, e);
                return Err(e);
            }
        }
    }
    log::info!(
        "Job done: {} pages written, {} skipped",
        summary.pages_emitted,
        summary.pages_skipped
    );
    Ok(summary)
}

async fn compose_page<S>(
    ctx: &JobContext,
    index: usize,
    page: PclmPage,
    sink: &mut S,
) -> Result<PageOutcome, PclmRasterError>
where
    S: RasterPageSink<Header = CupsPageHeaderV2, Error = CupsRasterError>,
{
    let mut rotation = Rotation::try_from(page.rotate)?;
    let geometry = match PageGeometry::resolve(ctx, index, rotation, page.media_box.as_ref()) {
        Ok(geometry) => geometry,
        Err(skip) => return Ok(PageOutcome::Skipped(skip)),
    };
    let bitmap = BitmapAssembler::assemble(page.fragments)?;

    let (width, height) = bitmap.rotated_size(rotation);
    let format = LineFormat::from_context(ctx);
    let line_bytes = format.line_bytes(width as usize);
    let mut header = ctx.header().clone();
    header.v1.width = width;
    header.v1.height = height;
    header.v1.bytes_per_line = u32::try_from(line_bytes * ctx.bands())
        .map_err(|_| PclmRasterError::layout(format!("{width} pixels don't fit a line")))?;
    geometry.apply_to(&mut header);
    log::info!(
        "Page {}: {}x{} pixels, {} bytes per line, rotate {}",
        index + 1,
        width,
        height,
        header.v1.bytes_per_line,
        rotation.degrees()
    );
    sink.start_page(&header)
        .await
        .map_err(|source| PclmRasterError::HeaderWrite {
            page: index + 1,
            source,
        })?;

    let backside = ctx.is_backside(index);
    let swap = ctx.swap();
    let (mut swap_x, mut swap_y) = (backside && swap.image_x, backside && swap.image_y);
    if swap_x && swap_y {
        rotation = rotation.then(Rotation::Deg180);
        swap_x = false;
        swap_y = false;
    }
    log::debug!(
        "Page {}: backside {}, mirror x {}, mirror y {}",
        index + 1,
        backside,
        swap_x,
        swap_y
    );

    let bitmap = bitmap.rotate(rotation)?;
    let conversion = ColorConversion::select(bitmap.color_space, ctx.family());
    let mut converter = LineConverter::new(bitmap.color_space, conversion, format, swap_x);

    let mut line = Vec::new();
    line.try_reserve_exact(line_bytes)
        .map_err(|_| PclmRasterError::layout("line buffer too large"))?;
    line.resize(line_bytes, 0);
    let height = bitmap.height as usize;
    for plane in 0..ctx.planes() {
        for y in 0..height {
            let row = if swap_y { height - 1 - y } else { y };
            for band in 0..ctx.bands() {
                converter.convert_line(bitmap.row(row), &mut line, row, plane + band);
                sink.write_pixels(&line).await?;
            }
        }
    }
    Ok(PageOutcome::Emitted)
}
