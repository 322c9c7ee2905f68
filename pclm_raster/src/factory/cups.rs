use super::RasterPageFactory;
use crate::{
    encode::{CompressedRasterEncoder, UncompressedRasterEncoder},
    error::CupsRasterError,
    model::cups::{CupsPageHeaderV1, CupsPageHeaderV2, CupsSyncWord},
};
use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use futures::AsyncWrite;
use std::{
    io::{Cursor, Write},
    marker::PhantomData,
    ops::DerefMut,
    pin::Pin,
};

/// Every string field of the header is a NUL padded 64-byte array.
const C_STRING_SIZE: usize = 64;

type HeaderCursor<'a> = Cursor<&'a mut [u8]>;

fn write_c_string(out: &mut HeaderCursor, s: &str) -> Result<(), CupsRasterError> {
    if s.len() > C_STRING_SIZE {
        return Err(CupsRasterError::StringTooLong);
    }
    out.write_all(s.as_bytes())?;
    out.write_all(&[0u8; C_STRING_SIZE][s.len()..])?;
    Ok(())
}

fn write_bool<TOrder>(out: &mut HeaderCursor, b: bool) -> Result<(), CupsRasterError>
where
    TOrder: ByteOrder,
{
    out.write_u32::<TOrder>(u32::from(b))?;
    Ok(())
}

fn write_page_header_v1<TOrder>(
    out: &mut HeaderCursor,
    header: &CupsPageHeaderV1,
) -> Result<(), CupsRasterError>
where
    TOrder: ByteOrder,
{
    for s in [
        &header.media_class,
        &header.media_color,
        &header.media_type,
        &header.output_type,
    ] {
        write_c_string(out, s)?;
    }
    out.write_u32::<TOrder>(header.advance_distance)?;
    out.write_u32::<TOrder>(header.advance_media as u32)?;
    write_bool::<TOrder>(out, header.collate)?;
    out.write_u32::<TOrder>(header.cut_media as u32)?;
    write_bool::<TOrder>(out, header.duplex)?;
    out.write_u32::<TOrder>(header.resolution.cross_feed)?;
    out.write_u32::<TOrder>(header.resolution.feed)?;
    let bbox = &header.imaging_bbox;
    for v in [bbox.left, bbox.bottom, bbox.right, bbox.top] {
        out.write_u32::<TOrder>(v)?;
    }
    write_bool::<TOrder>(out, header.insert_sheet)?;
    out.write_u32::<TOrder>(header.jog as u32)?;
    out.write_u32::<TOrder>(header.leading_edge as u32)?;
    out.write_u32::<TOrder>(header.margins.left)?;
    out.write_u32::<TOrder>(header.margins.bottom)?;
    write_bool::<TOrder>(out, header.manual_feed)?;
    out.write_u32::<TOrder>(header.media_position)?;
    out.write_u32::<TOrder>(header.media_weight)?;
    write_bool::<TOrder>(out, header.mirror_print)?;
    write_bool::<TOrder>(out, header.negative_print)?;
    out.write_u32::<TOrder>(header.num_copies)?;
    out.write_u32::<TOrder>(header.orientation as u32)?;
    write_bool::<TOrder>(out, header.output_face_up)?;
    out.write_u32::<TOrder>(header.page_size.width)?;
    out.write_u32::<TOrder>(header.page_size.height)?;
    write_bool::<TOrder>(out, header.separations)?;
    write_bool::<TOrder>(out, header.tray_switch)?;
    write_bool::<TOrder>(out, header.tumble)?;
    for v in [
        header.width,
        header.height,
        header.cups_media_type,
        header.bits_per_color,
        header.bits_per_pixel,
        header.bytes_per_line,
        header.color_order as u32,
        header.color_space as u32,
        header.cups_compression,
        header.cups_row_count,
        header.cups_row_feed,
        header.cups_row_step,
    ] {
        out.write_u32::<TOrder>(v)?;
    }
    Ok(())
}

fn write_page_header_v2<TOrder>(
    target: &mut [u8],
    header: &CupsPageHeaderV2,
) -> Result<(), CupsRasterError>
where
    TOrder: ByteOrder,
{
    let out = &mut Cursor::new(target);
    write_page_header_v1::<TOrder>(out, &header.v1)?;
    out.write_u32::<TOrder>(header.num_colors)?;
    out.write_f32::<TOrder>(header.borderless_scaling_factor)?;
    out.write_f32::<TOrder>(header.page_size_f32.width)?;
    out.write_f32::<TOrder>(header.page_size_f32.height)?;
    let bbox = &header.imaging_bbox_f32;
    for v in [bbox.left, bbox.bottom, bbox.right, bbox.top] {
        out.write_f32::<TOrder>(v)?;
    }
    for &v in &header.vendor_u32 {
        out.write_u32::<TOrder>(v)?;
    }
    for &v in &header.vendor_f32 {
        out.write_f32::<TOrder>(v)?;
    }
    for s in &header.vendor_str {
        write_c_string(out, s)?;
    }
    write_c_string(out, &header.marker_type)?;
    write_c_string(out, &header.rendering_intent)?;
    write_c_string(out, &header.page_size_name)?;
    Ok(())
}

fn content_layout(header: &CupsPageHeaderV2) -> Result<(u8, u64, u64), CupsRasterError> {
    let chunk_size = header
        .v1
        .chunk_size()
        .ok_or(CupsRasterError::DataTooLarge)?;
    let num_bytes = header
        .content_size()
        .ok_or(CupsRasterError::DataTooLarge)?;
    Ok((chunk_size, header.v1.bytes_per_line as u64, num_bytes))
}

/// Compressed CUPS raster (`RaS2`). In big-endian order this is also the PWG raster stream.
pub struct CupsPageFactoryV2<TOrder>
where
    TOrder: ByteOrder,
{
    _phantom: PhantomData<TOrder>,
}

/// Uncompressed CUPS raster (`RaS3`).
pub struct CupsPageFactoryV3<TOrder>
where
    TOrder: ByteOrder,
{
    _phantom: PhantomData<TOrder>,
}

impl<TOrder> RasterPageFactory for CupsPageFactoryV2<TOrder>
where
    TOrder: ByteOrder,
{
    type Header = CupsPageHeaderV2;
    type Error = CupsRasterError;
    const HEADER_SIZE: usize = 1796;
    fn header_to_bytes(target: &mut [u8], header: &Self::Header) -> Result<(), Self::Error> {
        write_page_header_v2::<TOrder>(target, header)
    }

    type Encoder<W>
        = CompressedRasterEncoder<W>
    where
        W: DerefMut<Target: AsyncWrite>;
    fn encode<W>(header: &Self::Header, writer: Pin<W>) -> Result<Self::Encoder<W>, Self::Error>
    where
        W: DerefMut<Target: AsyncWrite>,
    {
        let (chunk_size, bytes_per_line, num_bytes) = content_layout(header)?;
        Ok(CompressedRasterEncoder::new(
            writer,
            chunk_size,
            bytes_per_line,
            num_bytes,
        )?)
    }
}

impl<TOrder> RasterPageFactory for CupsPageFactoryV3<TOrder>
where
    TOrder: ByteOrder,
{
    type Header = CupsPageHeaderV2;
    type Error = CupsRasterError;
    const HEADER_SIZE: usize = 1796;
    fn header_to_bytes(target: &mut [u8], header: &Self::Header) -> Result<(), Self::Error> {
        write_page_header_v2::<TOrder>(target, header)
    }

    type Encoder<W>
        = UncompressedRasterEncoder<W>
    where
        W: DerefMut<Target: AsyncWrite>;
    fn encode<W>(header: &Self::Header, writer: Pin<W>) -> Result<Self::Encoder<W>, Self::Error>
    where
        W: DerefMut<Target: AsyncWrite>,
    {
        let (_, _, num_bytes) = content_layout(header)?;
        Ok(UncompressedRasterEncoder::new(writer, num_bytes))
    }
}

pub trait WithCupsSyncWord {
    fn sync_word() -> CupsSyncWord;
}

impl WithCupsSyncWord for CupsPageFactoryV2<BigEndian> {
    fn sync_word() -> CupsSyncWord {
        CupsSyncWord::V2BigEndian
    }
}

impl WithCupsSyncWord for CupsPageFactoryV2<LittleEndian> {
    fn sync_word() -> CupsSyncWord {
        CupsSyncWord::V2LittleEndian
    }
}

impl WithCupsSyncWord for CupsPageFactoryV3<BigEndian> {
    fn sync_word() -> CupsSyncWord {
        CupsSyncWord::V3BigEndian
    }
}

impl WithCupsSyncWord for CupsPageFactoryV3<LittleEndian> {
    fn sync_word() -> CupsSyncWord {
        CupsSyncWord::V3LittleEndian
    }
}
