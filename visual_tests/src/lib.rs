//! In-process render comparisons for the shadow pipeline.
//!
//! The renderer is deterministic, so instead of golden files these tests
//! render two widget trees in the same process and compare the frames:
//! byte-exact where identity is the contract, SSIM where "visibly
//! different" is the claim.

mod compare;

pub use compare::{compare_images, images_identical, CompareResult};

use image::RgbaImage;
use thiserror::Error;
use umbra::prelude::*;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to render scene: {0}")]
    Render(String),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Render a widget tree into a straight-alpha RGBA image.
pub fn render_to_image(root: &mut dyn Widget, width: u32, height: u32) -> Result<RgbaImage> {
    let frame = render_root(root, width, height)
        .ok_or_else(|| VisualTestError::Render(format!("zero-sized frame {width}x{height}")))?;
    Ok(to_rgba_image(&frame))
}
