//! Pixel level change detection between two frames of the same scene.

use image::GrayImage;

use crate::utils::imgutils::{self, absdiff};

use self::contours::{find_regions, Region};

pub mod contours;
pub mod preproc;

/// How many times the thresholded difference is dilated with a 3x3 square, to merge
/// nearby specks into regions.
pub const DILATE_ITERATIONS: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ChangeError {
    #[error("the frames have different dimensions: {0:?} and {1:?}")]
    ShapeMismatch((u32, u32), (u32, u32)),
}

#[derive(Debug, Clone)]
pub struct Comparison {
    /// Total area of all regions large enough to count. Zero means no change.
    pub score: f64,
    /// The regions that contributed to `score`.
    pub regions: Vec<Region>,
    /// The dilated binary difference the regions were found in.
    pub threshold_image: GrayImage,
}

/// Compares two preprocessed frames. Regions smaller than `min_region_area` are
/// considered noise.
pub fn compare(
    prev: &GrayImage,
    next: &GrayImage,
    min_region_area: u64,
    diff_threshold: u8,
) -> Result<Comparison, ChangeError> {
    if !imgutils::same_dimensions(prev, next) {
        return Err(ChangeError::ShapeMismatch(
            prev.dimensions(),
            next.dimensions(),
        ));
    }

    let delta = imgutils::threshold(absdiff(prev, next), diff_threshold);
    let threshold_image = imgutils::dilate(&delta, DILATE_ITERATIONS);

    let regions: Vec<Region> = find_regions(&threshold_image)
        .into_iter()
        .filter(|region| region.area >= min_region_area)
        .collect();
    let score: f64 = regions.iter().map(|region| region.area as f64).sum();

    Ok(Comparison {
        score,
        regions,
        threshold_image,
    })
}
