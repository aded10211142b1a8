use std::{fmt, str::FromStr};

use image::{
    imageops::{self, FilterType},
    GrayImage, RgbImage,
};

use crate::utils::imgutils::{self, grayscale};

/// The dimensions every frame is resized to before being compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(thiserror::Error, Debug)]
#[error("not a valid size, expected something like 640x480")]
pub struct ImageSizeError;

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FromStr for ImageSize {
    type Err = ImageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s.split_once(['x', 'X']).ok_or(ImageSizeError)?;
        let width: u32 = width.trim().parse().map_err(|_| ImageSizeError)?;
        let height: u32 = height.trim().parse().map_err(|_| ImageSizeError)?;
        if width == 0 || height == 0 {
            return Err(ImageSizeError);
        }
        Ok(Self::new(width, height))
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Bands along the edges, in percent of the width or height, that are painted black so
/// that changes there never count. Typically timestamps or logos burned into the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BorderMask {
    pub left: u8,
    pub top: u8,
    pub right: u8,
    pub bottom: u8,
}

#[derive(thiserror::Error, Debug)]
#[error("not a valid border mask, expected four percentages like 5,10,5,0")]
pub struct BorderMaskError;

impl BorderMask {
    pub const NONE: Self = Self::new(0, 0, 0, 0);

    pub const fn new(left: u8, top: u8, right: u8, bottom: u8) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn apply(&self, img: &mut GrayImage) {
        let (w, h) = img.dimensions();
        let part = |percent: u8, of: u32| (percent as u64 * of as u64 / 100) as u32;
        // the left and top bands include the pixel at their inner edge
        let inclusive = |percent: u8, of: u32| match percent {
            0 => 0,
            _ => part(percent, of) + 1,
        };

        let x_max = w.saturating_sub(part(self.right, w));
        let y_max = h.saturating_sub(part(self.bottom, h));

        imgutils::blacken(img, 0, 0, inclusive(self.left, w), h);
        imgutils::blacken(img, 0, 0, w, inclusive(self.top, h));
        imgutils::blacken(img, x_max, 0, w - x_max, h);
        imgutils::blacken(img, 0, y_max, w, h - y_max);
    }
}

impl FromStr for BorderMask {
    type Err = BorderMaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<u8> = s
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| BorderMaskError))
            .collect::<Result<_, _>>()?;

        match parts[..] {
            [left, top, right, bottom]
                if parts.iter().all(|&p| p <= 100) =>
            {
                Ok(Self::new(left, top, right, bottom))
            }
            _ => Err(BorderMaskError),
        }
    }
}

impl fmt::Display for BorderMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

/// Bilinear, like most video tools default to.
pub fn resize(img: &RgbImage, size: ImageSize) -> RgbImage {
    imageops::resize(img, size.width, size.height, FilterType::Triangle)
}

/// The standard deviation a gaussian kernel of this size gets when none is explicitly
/// given.
pub fn kernel_sigma(kernel: u32) -> f32 {
    0.3 * ((kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Grayscale, blur once per kernel size and mask away the borders.
pub fn preprocess(img: &RgbImage, kernels: &[u32], mask: BorderMask) -> GrayImage {
    let mut gray = grayscale(img);
    for &kernel in kernels {
        gray = imageops::blur(&gray, kernel_sigma(kernel));
    }
    mask.apply(&mut gray);
    gray
}
