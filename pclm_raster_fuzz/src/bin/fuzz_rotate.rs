use arbitrary::Arbitrary;
use honggfuzz::fuzz;
use pclm_raster::model::page::Rotation;
use pclm_raster::rotate::rotate_bitmap;

#[derive(Clone, Debug, Arbitrary)]
pub struct RotateInput {
    pub width: u8,
    pub height: u8,
    pub bytes_per_pixel: u8,
    pub rotation: u8,
    pub data: Vec<u8>,
}

const ROTATIONS: [Rotation; 4] = [
    Rotation::Deg0,
    Rotation::Deg90,
    Rotation::Deg180,
    Rotation::Deg270,
];

fn main() {
    loop {
        fuzz!(|input: RotateInput| {
            let (width, height) = (input.width as usize, input.height as usize);
            let bytes_per_pixel = input.bytes_per_pixel as usize % 4 + 1;
            let rotation = ROTATIONS[input.rotation as usize % ROTATIONS.len()];
            let len = width * height * bytes_per_pixel;
            if input.data.len() < len {
                return;
            }
            let data = input.data[..len].to_vec();

            let turned =
                rotate_bitmap(data.clone(), rotation, width, height, bytes_per_pixel).unwrap();
            let (turned_width, turned_height) = if rotation.is_landscape() {
                (height, width)
            } else {
                (width, height)
            };
            let back = rotate_bitmap(
                turned,
                rotation.inverse(),
                turned_width,
                turned_height,
                bytes_per_pixel,
            )
            .unwrap();
            assert_eq!(data, back);
        });
    }
}
