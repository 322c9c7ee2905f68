use pclm_raster::{
    compositor::{run_job, JobSummary},
    config::{DeviceProfile, JobContext, JobOptions},
    error::PclmRasterError,
    model::{
        cups::{CupsColorOrder, CupsColorSpace, CupsPageHeaderV2},
        page::{MediaBox, PageFragment, PclmPage},
    },
    writer::{CapturedPage, MemoryRasterWriter, RasterPageSink},
};

fn template(
    color_space: CupsColorSpace,
    color_order: CupsColorOrder,
    bits_per_color: u32,
    bits_per_pixel: u32,
) -> CupsPageHeaderV2 {
    let mut header = CupsPageHeaderV2::default();
    header.v1.color_space = color_space;
    header.v1.color_order = color_order;
    header.v1.bits_per_color = bits_per_color;
    header.v1.bits_per_pixel = bits_per_pixel;
    header
}

fn fragment(width: u32, height: u32, color_space: &str, data: Vec<u8>) -> PageFragment {
    PageFragment {
        width,
        height,
        color_space: Some(color_space.to_string()),
        data,
    }
}

fn letter_page(rotate: i64, fragments: Vec<PageFragment>) -> PclmPage {
    PclmPage {
        rotate,
        media_box: Some(MediaBox([0.0, 0.0, 612.0, 792.0])),
        fragments,
    }
}

async fn compose(ctx: &JobContext, pages: Vec<PclmPage>) -> (JobSummary, Vec<CapturedPage>) {
    let mut sink = MemoryRasterWriter::new();
    let summary = run_job(ctx, pages, &mut sink).await.unwrap();
    let pages = sink.into_pages();
    assert!(pages.iter().all(CapturedPage::is_complete));
    (summary, pages)
}

#[tokio::test]
async fn gray_strip_to_srgb() {
    let header = template(CupsColorSpace::sRGB, CupsColorOrder::Chunky, 8, 24);
    let ctx = JobContext::new(header, &DeviceProfile::default(), &JobOptions::default()).unwrap();
    let data = (0..50).flat_map(|_| 0..100u8).collect();
    let page = letter_page(0, vec![fragment(100, 50, "/DeviceGray", data)]);

    let (summary, pages) = compose(&ctx, vec![page]).await;
    assert_eq!(summary.pages_emitted, 1);
    let header = &pages[0].header;
    assert_eq!((header.v1.width, header.v1.height), (100, 50));
    assert_eq!(header.v1.bytes_per_line, 300);
    assert_eq!(header.num_colors, 3);
    assert_eq!(
        (header.v1.page_size.width, header.v1.page_size.height),
        (612, 792)
    );
    assert_eq!(pages[0].lines().count(), 50);
    for line in pages[0].lines() {
        assert_eq!(&line[..3], &[0, 0, 0]);
        assert_eq!(&line[21..24], &[7, 7, 7]);
        assert_eq!(&line[297..], &[99, 99, 99]);
    }
}

#[tokio::test]
async fn fragments_stack_and_rotate() {
    let header = template(CupsColorSpace::sGray, CupsColorOrder::Chunky, 8, 8);
    let ctx = JobContext::new(header, &DeviceProfile::default(), &JobOptions::default()).unwrap();
    let strips = || {
        vec![
            fragment(40, 30, "/DeviceGray", vec![1; 40 * 30]),
            fragment(40, 20, "/DeviceGray", vec![2; 40 * 20]),
        ]
    };

    let (_, pages) = compose(&ctx, vec![letter_page(0, strips()), letter_page(90, strips())]).await;
    let upright = &pages[0];
    assert_eq!((upright.header.v1.width, upright.header.v1.height), (40, 50));
    assert_eq!(upright.lines().nth(29).unwrap(), &[1; 40]);
    assert_eq!(upright.lines().nth(30).unwrap(), &[2; 40]);

    let turned = &pages[1];
    assert_eq!((turned.header.v1.width, turned.header.v1.height), (50, 40));
    assert_eq!(turned.header.v1.bytes_per_line, 50);
    assert_eq!(
        (
            turned.header.v1.page_size.width,
            turned.header.v1.page_size.height
        ),
        (792, 612)
    );
    // the bottom strip ends up on the left
    let mut expected = vec![2; 20];
    expected.extend([1; 30]);
    for line in turned.lines() {
        assert_eq!(line, expected.as_slice());
    }
}

#[tokio::test]
async fn bi_level_black() {
    let header = template(CupsColorSpace::Black, CupsColorOrder::Chunky, 1, 1);
    let options = JobOptions {
        print_color_mode: Some("bi-level".to_string()),
        ..Default::default()
    };
    let ctx = JobContext::new(header, &DeviceProfile::default(), &options).unwrap();
    let row = vec![0, 255, 0, 255, 0, 255, 0, 255, 0];
    let page = letter_page(0, vec![fragment(9, 2, "/DeviceGray", row.repeat(2))]);

    let (_, pages) = compose(&ctx, vec![page]).await;
    assert_eq!(pages[0].header.v1.bytes_per_line, 2);
    assert_eq!(pages[0].data, vec![0xaa, 0x80, 0xaa, 0x80]);
}

#[tokio::test]
async fn banded_cmyk_writes_a_line_per_color() {
    let header = template(CupsColorSpace::CMYK, CupsColorOrder::Banded, 8, 8);
    let ctx = JobContext::new(header, &DeviceProfile::default(), &JobOptions::default()).unwrap();
    let page = letter_page(0, vec![fragment(3, 2, "/DeviceGray", vec![200; 6])]);

    let (_, pages) = compose(&ctx, vec![page]).await;
    let page = &pages[0];
    assert_eq!(page.header.v1.bytes_per_line, 12);
    assert_eq!(page.data.len(), 24);
    let bands: Vec<&[u8]> = page.data.chunks(3).collect();
    assert_eq!(bands.len(), 8);
    for row in bands.chunks(4) {
        assert_eq!(row[0], &[0, 0, 0]);
        assert_eq!(row[1], &[0, 0, 0]);
        assert_eq!(row[2], &[0, 0, 0]);
        assert_eq!(row[3], &[55, 55, 55]);
    }
}

#[tokio::test]
async fn planar_rgb_writes_whole_planes() {
    let header = template(CupsColorSpace::RGB, CupsColorOrder::Planar, 8, 8);
    let ctx = JobContext::new(header, &DeviceProfile::default(), &JobOptions::default()).unwrap();
    let data = vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120];
    let page = letter_page(0, vec![fragment(2, 2, "/DeviceRGB", data)]);

    let (_, pages) = compose(&ctx, vec![page]).await;
    assert_eq!(pages[0].header.v1.bytes_per_line, 2);
    assert_eq!(
        pages[0].data,
        vec![10, 40, 70, 100, 20, 50, 80, 110, 30, 60, 90, 120]
    );
}

#[tokio::test]
async fn media_catalog_sets_margins() {
    let profile: DeviceProfile = serde_json::from_str(
        r#"{
            "media": {
                "sizes": [{
                    "name": "na_letter_8.5x11in",
                    "width": 612, "length": 792,
                    "left": 18, "bottom": 36, "right": 594, "top": 756
                }]
            }
        }"#,
    )
    .unwrap();
    let header = template(CupsColorSpace::sGray, CupsColorOrder::Chunky, 8, 8);
    let ctx = JobContext::new(header, &profile, &JobOptions::default()).unwrap();
    let page = letter_page(0, vec![fragment(2, 2, "/DeviceGray", vec![0; 4])]);

    let (_, pages) = compose(&ctx, vec![page]).await;
    let header = &pages[0].header;
    assert_eq!(header.page_size_name, "na_letter_8.5x11in");
    assert_eq!((header.v1.margins.left, header.v1.margins.bottom), (18, 36));
    let bbox = &header.v1.imaging_bbox;
    assert_eq!((bbox.left, bbox.bottom, bbox.right, bbox.top), (18, 36, 594, 756));
}

#[tokio::test]
async fn layout_errors_end_the_job() {
    let header = template(CupsColorSpace::sGray, CupsColorOrder::Chunky, 8, 8);
    let ctx = JobContext::new(header, &DeviceProfile::default(), &JobOptions::default()).unwrap();
    let good = letter_page(0, vec![fragment(2, 1, "/DeviceGray", vec![1, 2])]);
    let short = letter_page(0, vec![fragment(2, 2, "/DeviceGray", vec![1, 2, 3])]);

    let mut sink = MemoryRasterWriter::new();
    let result = run_job(&ctx, vec![good, short], &mut sink).await;
    assert!(matches!(result, Err(PclmRasterError::LayoutError(_))));
    assert_eq!(sink.pages().len(), 1);
    sink.finish().await.unwrap();
}

#[tokio::test]
async fn empty_page_has_no_lines() {
    let header = template(CupsColorSpace::sRGB, CupsColorOrder::Chunky, 8, 24);
    let ctx = JobContext::new(header, &DeviceProfile::default(), &JobOptions::default()).unwrap();

    let (summary, pages) = compose(&ctx, vec![letter_page(0, Vec::new())]).await;
    assert_eq!(summary.pages_emitted, 1);
    assert_eq!((pages[0].header.v1.width, pages[0].header.v1.height), (0, 0));
    assert!(pages[0].data.is_empty());
}
