use std::path::Path;

use framedup_common::bin_common::args::change::Change;
use image::{GrayImage, RgbImage};

use crate::dedup::{FrameComparer, FrameError};

/// Frames decoded from image files and compared with pixel level change detection.
pub struct DiskFrames {
    change: Change,
}

impl DiskFrames {
    pub fn new(change: Change) -> Self {
        Self { change }
    }
}

impl FrameComparer for DiskFrames {
    type Raw = RgbImage;
    type Prepared = GrayImage;

    fn decode(&self, path: &Path) -> Result<RgbImage, FrameError> {
        Ok(image::open(path)?.to_rgb8())
    }

    fn prepare(&self, raw: &RgbImage) -> GrayImage {
        self.change.prepare(raw)
    }

    fn score(
        &self,
        baseline: &GrayImage,
        current: &GrayImage,
    ) -> Result<f64, FrameError> {
        Ok(self.change.compare(baseline, current)?.score)
    }
}

#[cfg(test)]
mod test {
    use framedup_common::{change::preproc::ImageSize, utils::imgutils::filled};

    use super::*;

    #[test]
    fn different_sizes_are_comparable() {
        let frames =
            DiskFrames::new(Change::default().with_image_size(ImageSize::new(64, 48)));
        let a = frames.prepare(&filled(640, 480, 0, 0, 0));
        let b = frames.prepare(&filled(20, 10, 0, 0, 0));
        assert_eq!(0.0, frames.score(&a, &b).unwrap());
    }

    #[test]
    fn unprepared_frames_are_an_error() {
        let frames = DiskFrames::new(Change::default());
        let a = GrayImage::new(64, 48);
        let b = GrayImage::new(48, 64);
        assert!(matches!(frames.score(&a, &b), Err(FrameError::Change(_))));
    }

    #[test]
    fn missing_file() {
        let frames = DiskFrames::new(Change::default());
        assert!(frames
            .decode(Path::new("/this/file/does/not/exist.png"))
            .is_err());
    }
}
