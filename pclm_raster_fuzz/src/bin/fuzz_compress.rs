use arbitrary::Arbitrary;
use futures::io::AsyncWriteExt;
use honggfuzz::fuzz;
use pclm_raster::encode::CompressedRasterEncoder;
use pclm_raster_fuzz::decompress;
use std::pin::Pin;

#[derive(Clone, Debug, Arbitrary)]
pub struct DataInput {
    pub data: Vec<u8>,
    pub chunk_size: u8,
    pub chunks_per_line: u8,
}

fn main() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    loop {
        fuzz!(|input: DataInput| {
            let bytes_per_line = input.chunk_size as usize * input.chunks_per_line as usize;
            if bytes_per_line == 0 {
                return;
            }
            let mut data = input.data;
            data.truncate(data.len() / bytes_per_line * bytes_per_line);

            let _ = rt.block_on(async move {
                let mut compressed = Vec::<u8>::new();
                let mut encoder = CompressedRasterEncoder::new(
                    Pin::new(&mut compressed),
                    input.chunk_size,
                    bytes_per_line as u64,
                    data.len() as u64,
                )?;
                // uneven writes exercise lines split across calls
                for piece in data.chunks(7) {
                    encoder.write_all(piece).await.unwrap();
                }
                encoder.close().await.unwrap();

                let decoded =
                    decompress(&compressed, input.chunk_size as usize, bytes_per_line).unwrap();
                assert_eq!(data, decoded);

                Ok::<(), Box<dyn std::error::Error>>(())
            });
        });
    }
}
