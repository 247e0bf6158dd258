//! Test fixtures: images and grids.

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use std::io::Cursor;

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format).expect("encode fixture");
    buf.into_inner()
}

/// Left-to-right grayscale ramp, black to white
pub fn horizontal_ramp_png(width: u32, height: u32) -> Vec<u8> {
    let img = GrayImage::from_fn(width, height, |x, _| {
        Luma([(x * 255 / (width - 1).max(1)) as u8])
    });
    encode(DynamicImage::ImageLuma8(img), ImageFormat::Png)
}

/// A single flat color
pub fn solid_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    let img = GrayImage::from_pixel(width, height, Luma([value]));
    encode(DynamicImage::ImageLuma8(img), ImageFormat::Png)
}

/// Colorful photo-like content as JPEG
pub fn photo_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) % 256) as u8,
        ])
    });
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

/// The reference grid `[[0, 6], [3, 6]]`
pub fn reference_grid_json() -> serde_json::Value {
    serde_json::json!([[0, 6], [3, 6]])
}

/// A `rows` x `cols` grid cycling through every bucket
pub fn cycling_grid(rows: usize, cols: usize) -> Vec<Vec<u8>> {
    (0..rows)
        .map(|r| (0..cols).map(|c| ((r + c) % 7) as u8).collect())
        .collect()
}
