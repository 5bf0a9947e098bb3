use super::*;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn checker(width: u32, height: u32) -> Raster {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = if (x + y) % 2 == 0 { 255 } else { 0 };
            data.extend_from_slice(&[v, 128, 255 - v, 200]);
        }
    }
    Raster::new(width, height, data).unwrap()
}

#[test]
fn output_is_png() {
    let bytes = encode_png(&checker(8, 8)).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
}

#[test]
fn encoding_is_lossless() {
    let raster = checker(9, 5);
    let bytes = encode_png(&raster).unwrap();
    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (9, 5));
    assert_eq!(back.into_raw(), raster.data());
}

#[test]
fn encoding_is_byte_stable() {
    let raster = checker(31, 17);
    assert_eq!(encode_png(&raster).unwrap(), encode_png(&raster).unwrap());
}

#[test]
fn export_uses_fixed_file_name() {
    let e = export(&checker(2, 2)).unwrap();
    assert_eq!(e.file_name, "meme.png");
    assert_eq!(&e.bytes[..8], &PNG_SIGNATURE);
}
