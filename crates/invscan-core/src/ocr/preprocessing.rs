//! Image preprocessing ahead of OCR.

use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use tracing::debug;

use crate::error::PreprocessError;
use crate::models::config::PreprocessConfig;

/// Image preprocessor: downscale, grayscale, contrast stretch, binarize.
///
/// A pure image-to-image transform; it never looks at text.
pub struct ImagePreprocessor {
    /// Convert to grayscale.
    grayscale: bool,
    /// Stretch intensities to the full range.
    contrast_stretch: bool,
    /// Binarize to black and white.
    binarize: bool,
    /// Fixed threshold, or Otsu when `None`.
    threshold: Option<u8>,
    /// Maximum image dimension.
    max_size: u32,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self::from_config(&PreprocessConfig::default())
    }

    /// Create a preprocessor from configuration.
    pub fn from_config(config: &PreprocessConfig) -> Self {
        Self {
            grayscale: config.grayscale,
            contrast_stretch: config.contrast_stretch,
            binarize: config.binarize,
            threshold: config.threshold,
            max_size: config.max_image_size,
        }
    }

    /// Set maximum image dimension.
    pub fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size;
        self
    }

    /// Set a fixed binarization threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Run the configured steps.
    pub fn process(&self, image: &DynamicImage) -> Result<DynamicImage, PreprocessError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PreprocessError::EmptyImage);
        }

        let (new_width, new_height) = self.calculate_resize_dimensions(width, height);
        let resized = if (new_width, new_height) != (width, height) {
            debug!("Resizing {}x{} to {}x{}", width, height, new_width, new_height);
            image.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3)
        } else {
            image.clone()
        };

        if !self.grayscale && !self.contrast_stretch && !self.binarize {
            return Ok(resized);
        }

        // Contrast and thresholding operate on luminance.
        let mut gray = resized.to_luma8();

        if self.contrast_stretch {
            gray = stretch_contrast(&gray);
        }

        if self.binarize {
            let threshold = self.threshold.unwrap_or_else(|| otsu_threshold(&gray));
            debug!("Binarizing at threshold {}", threshold);
            gray = binarize(&gray, threshold);
        }

        Ok(DynamicImage::ImageLuma8(gray))
    }

    fn calculate_resize_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let max_dim = width.max(height);

        if self.max_size == 0 || max_dim <= self.max_size {
            return (width, height);
        }

        let scale = self.max_size as f32 / max_dim as f32;
        let new_width = (width as f32 * scale) as u32;
        let new_height = (height as f32 * scale) as u32;

        (new_width.max(1), new_height.max(1))
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Linearly map the darkest pixel to 0 and the brightest to 255.
///
/// Uniform images are returned unchanged.
pub fn stretch_contrast(image: &GrayImage) -> GrayImage {
    let (min, max) = image
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));

    if max <= min {
        return image.clone();
    }

    let range = (max - min) as u32;
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        let value = (pixel[0] - min) as u32 * 255 / range;
        *pixel = Luma([value as u8]);
    }
    result
}

/// Pixels above the threshold become white, the rest black.
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        let value = if pixel[0] > threshold { 255 } else { 0 };
        *pixel = Luma([value]);
    }
    result
}

/// Threshold maximizing between-class variance (Otsu's method).
pub fn otsu_threshold(image: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in image.pixels() {
        histogram[pixel[0] as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 127;
    }

    let weighted_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut background_weight = 0u64;
    let mut background_sum = 0f64;
    let mut best_variance = 0f64;
    let mut best_threshold = 0u8;

    for (value, &count) in histogram.iter().enumerate() {
        background_weight += count;
        if background_weight == 0 {
            continue;
        }
        let foreground_weight = total - background_weight;
        if foreground_weight == 0 {
            break;
        }

        background_sum += value as f64 * count as f64;
        let background_mean = background_sum / background_weight as f64;
        let foreground_mean = (weighted_sum - background_sum) / foreground_weight as f64;
        let diff = background_mean - foreground_mean;
        let variance = background_weight as f64 * foreground_weight as f64 * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_threshold = value as u8;
        }
    }

    best_threshold
}
