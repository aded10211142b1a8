use image::{GrayImage, RgbImage};

use crate::change::{
    self,
    preproc::{self, BorderMask, ImageSize},
    ChangeError, Comparison,
};

use super::args_helper::args;

args! {
    #[derive(Clone, Debug)]
    Change {
        "Every frame is resized to this before being compared, WIDTHxHEIGHT"
        image_size: ImageSize = ImageSize::new(640, 480);

        "Regions of change with an area below this many pixels are ignored as noise"
        min_contour_area: u64 = 100;

        "A pixel whose brightness changed by more than this counts as changed"
        diff_threshold: u8 = 45;

        "Bands along the edges, in percent of the frame as left,top,right,bottom, \
         where changes are ignored"
        black_mask: BorderMask = BorderMask::new(5, 10, 5, 0);

        [] "Sizes of the gaussian blur kernels applied, in order, before comparing. \
            Should be odd"
        blur_kernels: Vec<u32> = [9];
    }
}

impl Change {
    /// Resizes and preprocesses a decoded frame so it can be compared with others
    pub fn prepare(&self, img: &RgbImage) -> GrayImage {
        let resized = preproc::resize(img, self.image_size);
        preproc::preprocess(&resized, &self.blur_kernels, self.black_mask)
    }

    pub fn compare(
        &self,
        prev: &GrayImage,
        next: &GrayImage,
    ) -> Result<Comparison, ChangeError> {
        change::compare(prev, next, self.min_contour_area, self.diff_threshold)
    }
}
