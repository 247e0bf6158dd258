//! Contrast-limited adaptive histogram equalization (CLAHE).
//!
//! The image is cut into a `tiles_x` x `tiles_y` grid. Each tile gets its own
//! clipped, redistributed histogram and the resulting cumulative mapping.
//! Pixels are then remapped by bilinear interpolation between the mappings
//! of the four nearest tile centers, which hides tile seams.

use image::GrayImage;

use super::options::ClaheOptions;

const BINS: usize = 256;

/// Per-tile lookup table, `lut[v]` is the equalized value for input `v`.
type Lut = [u8; BINS];

/// Equalize `gray` tile by tile. Output has the same dimensions.
pub fn equalize(gray: &GrayImage, options: &ClaheOptions) -> GrayImage {
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    if width == 0 || height == 0 {
        return gray.clone();
    }
    // A tile is never narrower than one pixel
    let tiles_x = (options.tiles_x as usize).clamp(1, width);
    let tiles_y = (options.tiles_y as usize).clamp(1, height);
    let raw = gray.as_raw();

    let mut luts: Vec<Lut> = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        let (y0, y1) = tile_span(ty, height, tiles_y);
        for tx in 0..tiles_x {
            let (x0, x1) = tile_span(tx, width, tiles_x);
            let mut hist = [0u32; BINS];
            for row in y0..y1 {
                for &p in &raw[row * width + x0..row * width + x1] {
                    hist[p as usize] += 1;
                }
            }
            let pixels = ((y1 - y0) * (x1 - x0)) as u32;
            luts.push(tile_lut(hist, pixels, options.clip_limit));
        }
    }

    let tile_w = width as f32 / tiles_x as f32;
    let tile_h = height as f32 / tiles_y as f32;
    let mut out = Vec::with_capacity(raw.len());
    for y in 0..height {
        let (ty0, ty1, wy) = neighbours(y, tile_h, tiles_y);
        for x in 0..width {
            let (tx0, tx1, wx) = neighbours(x, tile_w, tiles_x);
            let v = raw[y * width + x] as usize;
            let at = |tx: usize, ty: usize| luts[ty * tiles_x + tx][v] as f32;
            let top = at(tx0, ty0) * (1.0 - wx) + at(tx1, ty0) * wx;
            let bottom = at(tx0, ty1) * (1.0 - wx) + at(tx1, ty1) * wx;
            let mapped = top * (1.0 - wy) + bottom * wy;
            out.push(mapped.round().clamp(0.0, 255.0) as u8);
        }
    }

    // Dimensions come from the source image, so the buffer always fits
    GrayImage::from_raw(gray.width(), gray.height(), out).unwrap_or_else(|| gray.clone())
}

/// Pixel range `[start, end)` of tile `i` out of `tiles` along an axis of `len`.
#[inline]
fn tile_span(i: usize, len: usize, tiles: usize) -> (usize, usize) {
    (i * len / tiles, (i + 1) * len / tiles)
}

/// The two tile indices whose centers bracket pixel `p`, and the weight of
/// the second one. Pixels before the first or after the last center snap to
/// the edge tile.
#[inline]
fn neighbours(p: usize, tile_len: f32, tiles: usize) -> (usize, usize, f32) {
    let pos = ((p as f32 + 0.5) / tile_len - 0.5).clamp(0.0, (tiles - 1) as f32);
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(tiles - 1);
    (lo, hi, pos - lo as f32)
}

/// Clip the histogram at `clip_limit` times the mean bin height, spread the
/// clipped excess evenly over all bins, and build the cumulative mapping.
fn tile_lut(mut hist: [u32; BINS], pixels: u32, clip_limit: f32) -> Lut {
    let limit = ((clip_limit * pixels as f32 / BINS as f32) as u32).max(1);

    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > limit {
            excess += *bin - limit;
            *bin = limit;
        }
    }
    let share = excess / BINS as u32;
    let remainder = (excess % BINS as u32) as usize;
    for bin in hist.iter_mut() {
        *bin += share;
    }
    if remainder > 0 {
        let step = (BINS / remainder).max(1);
        for bin in hist.iter_mut().step_by(step).take(remainder) {
            *bin += 1;
        }
    }

    let mut lut = [0u8; BINS];
    let mut cdf = 0u32;
    let scale = 255.0 / pixels.max(1) as f32;
    for (v, &count) in hist.iter().enumerate() {
        cdf += count;
        lut[v] = (cdf as f32 * scale).round().min(255.0) as u8;
    }
    lut
}
