//! Per-cell tone adjustments applied after the resize.

use super::intensity::IntensityMap;
use super::options::EnhanceOptions;

const MID_GREY: f32 = 128.0;

/// Smoothing kernel used as the "blurred" end of the sharpness blend,
/// `[1 1 1; 1 5 1; 1 1 1] / 13`.
const SMOOTH_CENTER: f32 = 5.0;
const SMOOTH_TOTAL: f32 = 13.0;

#[inline]
fn clamp_intensity(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

/// Apply brightness, contrast, sharpness and gamma in that order.
///
/// Factors equal to 1.0 are skipped. Options must already be validated.
pub fn enhance(map: &mut IntensityMap, options: &EnhanceOptions) {
    if options.brightness != 1.0 {
        let b = options.brightness;
        for v in map.values_mut() {
            *v = clamp_intensity(*v * b);
        }
    }

    if options.contrast != 1.0 {
        let c = options.contrast;
        for v in map.values_mut() {
            *v = clamp_intensity((*v - MID_GREY) * c + MID_GREY);
        }
    }

    if options.sharpness != 1.0 {
        sharpen(map, options.sharpness);
    }

    if options.gamma != 1.0 {
        let g = options.gamma;
        for v in map.values_mut() {
            *v = clamp_intensity(255.0 * (*v / 255.0).powf(g));
        }
    }
}

/// Blend between a smoothed copy (`factor = 0`) and the map itself
/// (`factor = 1`); factors above 1 extrapolate away from the smoothed copy.
///
/// Border cells have no full neighbourhood and keep their value.
fn sharpen(map: &mut IntensityMap, factor: f32) {
    let (w, h) = (map.width(), map.height());
    if w < 3 || h < 3 {
        return;
    }
    let src = map.values().to_vec();
    let out = map.values_mut();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut sum = 0.0;
            for dy in 0..3 {
                let row = (y + dy - 1) * w;
                sum += src[row + x - 1] + src[row + x] + src[row + x + 1];
            }
            let center = src[y * w + x];
            let smooth = (sum + (SMOOTH_CENTER - 1.0) * center) / SMOOTH_TOTAL;
            out[y * w + x] = clamp_intensity(smooth + factor * (center - smooth));
        }
    }
}
