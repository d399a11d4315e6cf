use image::Luma;
use image::imageops::FilterType;
use imageproc::contrast::otsu_level;
use imageproc::filter::median_filter;
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

use super::*;

const DESKEW_MAX_DEGREES: f32 = 5.0;
const DESKEW_STEP_DEGREES: f32 = 0.5;
const DESKEW_PROBE_MAX_DIM: u32 = 600;
const DARK_LEVEL: u8 = 128;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PreprocessOptions {
    pub resize_max_dim: u32,
    pub denoise: bool,
    pub threshold: bool,
    pub deskew: bool,
}

impl PreprocessOptions {
    pub fn from_args(args: &OcrArgs) -> Self {
        Self {
            resize_max_dim: args.resize_max_dim,
            denoise: !args.no_denoise,
            threshold: !args.no_threshold,
            deskew: args.deskew,
        }
    }
}

pub fn preprocess_page(
    image_path: &Path,
    options: &PreprocessOptions,
    output_path: &Path,
) -> Result<()> {
    let image = image::open(image_path)
        .with_context(|| format!("failed to decode image {}", image_path.display()))?;

    let processed = preprocess_image(image.to_luma8(), options);

    processed
        .save(output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    Ok(())
}

/// Grayscale pipeline: downscale, denoise, binarize, deskew, in that order.
pub fn preprocess_image(gray: GrayImage, options: &PreprocessOptions) -> GrayImage {
    let mut gray = downscale_to_max_dim(gray, options.resize_max_dim);

    if options.denoise {
        gray = median_filter(&gray, 1, 1);
    }

    if options.threshold {
        let level = otsu_level(&gray);
        binarize(&mut gray, level);
    }

    if options.deskew {
        let angle = estimate_skew_degrees(&gray);
        if angle != 0.0 {
            debug!(angle, "deskewing page");
            gray = rotate_about_center(
                &gray,
                angle.to_radians(),
                Interpolation::Bilinear,
                Luma([255u8]),
            );
        }
    }

    gray
}

pub fn downscale_to_max_dim(gray: GrayImage, max_dim: u32) -> GrayImage {
    let (width, height) = gray.dimensions();
    let longest = width.max(height);
    if max_dim == 0 || longest <= max_dim {
        return gray;
    }

    let scale = f64::from(max_dim) / f64::from(longest);
    let new_width = ((f64::from(width) * scale) as u32).max(1);
    let new_height = ((f64::from(height) * scale) as u32).max(1);

    image::imageops::resize(&gray, new_width, new_height, FilterType::Triangle)
}

pub fn binarize(gray: &mut GrayImage, level: u8) {
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > level { 255 } else { 0 };
    }
}

/// Pick the rotation that makes dark row profiles sharpest.
///
/// Text lines aligned with the pixel grid give the largest jumps between
/// neighbouring row sums. Zero wins ties.
pub fn estimate_skew_degrees(gray: &GrayImage) -> f32 {
    let probe = downscale_to_max_dim(gray.clone(), DESKEW_PROBE_MAX_DIM);

    let mut best_angle = 0.0f32;
    let mut best_score = row_profile_sharpness(&probe);

    let steps = (DESKEW_MAX_DEGREES / DESKEW_STEP_DEGREES) as i32;
    for step in (-steps..=steps).filter(|step| *step != 0) {
        let angle = step as f32 * DESKEW_STEP_DEGREES;
        let rotated = rotate_about_center(
            &probe,
            angle.to_radians(),
            Interpolation::Nearest,
            Luma([255u8]),
        );
        let score = row_profile_sharpness(&rotated);
        if score > best_score {
            best_score = score;
            best_angle = angle;
        }
    }

    best_angle
}

fn row_profile_sharpness(gray: &GrayImage) -> u64 {
    let (width, height) = gray.dimensions();
    let rows = (0..height)
        .map(|y| {
            (0..width)
                .filter(|x| gray.get_pixel(*x, y).0[0] < DARK_LEVEL)
                .count() as i64
        })
        .collect::<Vec<i64>>();

    rows.windows(2)
        .map(|pair| {
            let delta = pair[1] - pair[0];
            (delta * delta) as u64
        })
        .sum()
}
