//! Image preprocessing: desaturation and contrast normalization.

use image::{DynamicImage, GrayImage, Luma};

use crate::config::PreprocessConfig;
use crate::error::OmrError;

/// Scale intensities around mid-gray by `factor`, clamping to [0, 255].
pub fn adjust_contrast(gray: &GrayImage, factor: f32) -> GrayImage {
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        let x = v as f32 / 255.0;
        let y = ((x - 0.5) * factor + 0.5).clamp(0.0, 1.0);
        *out = (y * 255.0).round() as u8;
    }
    let (w, h) = gray.dimensions();
    GrayImage::from_fn(w, h, |x, y| Luma([lut[gray.get_pixel(x, y)[0] as usize]]))
}

/// Desaturate `image` and boost its contrast.
///
/// Fails with [`OmrError::ImageProcessingFailed`] when the image carries no
/// pixels.
pub fn preprocess(image: &DynamicImage, config: &PreprocessConfig) -> Result<GrayImage, OmrError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(OmrError::ImageProcessingFailed);
    }
    let gray = image.to_luma8();
    tracing::debug!(
        "preprocess: {}x{} contrast={}",
        gray.width(),
        gray.height(),
        config.contrast
    );
    Ok(adjust_contrast(&gray, config.contrast))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn output_is_grayscale_with_same_size() {
        let mut rgb = RgbImage::new(8, 6);
        rgb.put_pixel(1, 1, Rgb([255, 0, 0]));
        let out = preprocess(&DynamicImage::ImageRgb8(rgb), &PreprocessConfig::default()).unwrap();
        assert_eq!(out.dimensions(), (8, 6));
    }

    #[test]
    fn contrast_stretches_around_mid_gray() {
        let gray = GrayImage::from_fn(4, 1, |x, _| Luma([[0u8, 64, 191, 255][x as usize]]));
        let out = adjust_contrast(&gray, 1.5);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert!(out.get_pixel(1, 0)[0] < 64);
        assert!(out.get_pixel(2, 0)[0] > 191);
        assert_eq!(out.get_pixel(3, 0)[0], 255);
    }

    #[test]
    fn unit_factor_is_identity() {
        let gray = GrayImage::from_fn(16, 16, |x, y| Luma([(x * 16 + y) as u8]));
        assert_eq!(adjust_contrast(&gray, 1.0), gray);
    }

    #[test]
    fn empty_image_fails() {
        let empty = DynamicImage::new_rgb8(0, 0);
        assert_eq!(
            preprocess(&empty, &PreprocessConfig::default()),
            Err(OmrError::ImageProcessingFailed)
        );
    }

    #[test]
    fn input_is_not_modified() {
        let src = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 3, Luma([100])));
        let before = src.clone();
        let _ = preprocess(&src, &PreprocessConfig::default()).unwrap();
        assert_eq!(src, before);
    }
}
