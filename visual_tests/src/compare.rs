use image::RgbaImage;
use image_compare::Algorithm;

use crate::{Result, VisualTestError};

/// Result of comparing two images
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
}

/// Compare two frames using SSIM
pub fn compare_images(a: &RgbaImage, b: &RgbaImage) -> Result<CompareResult> {
    if a.dimensions() != b.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Image dimensions don't match: {:?} vs {:?}",
            a.dimensions(),
            b.dimensions()
        )));
    }

    let a_rgb = image::DynamicImage::ImageRgba8(a.clone()).to_rgb8();
    let b_rgb = image::DynamicImage::ImageRgba8(b.clone()).to_rgb8();

    let result = image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &a_rgb, &b_rgb)
        .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {e}")))?;

    Ok(CompareResult {
        similarity: result.score,
    })
}

/// Byte-exact equality, including alpha.
pub fn images_identical(a: &RgbaImage, b: &RgbaImage) -> bool {
    a.dimensions() == b.dimensions() && a.as_raw() == b.as_raw()
}
