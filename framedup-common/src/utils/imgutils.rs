use image::{GenericImageView, GrayImage, ImageBuffer, Luma, RgbImage};

pub use image::imageops::colorops::grayscale;

pub const WHITE: u8 = u8::MAX;
pub const BLACK: u8 = u8::MIN;

pub fn filled(width: u32, height: u32, red: u8, green: u8, blue: u8) -> RgbImage {
    let mut buf = ImageBuffer::new(width, height);
    buf.enumerate_pixels_mut()
        .for_each(|(_, _, pixel)| *pixel = image::Rgb([red, green, blue]));
    buf
}

pub fn construct_gray(raw: &[&[u8]]) -> GrayImage {
    assert!(raw.windows(2).all(|w| w[0].len() == w[1].len()));
    let height = raw.len() as u32;
    let width = raw.iter().next().map(|row| row.len()).unwrap_or(0) as u32;
    GrayImage::from_fn(width, height, |x, y| {
        image::Luma([raw[y as usize][x as usize]])
    })
}

pub fn is_img_empty<T>(img: &T) -> bool
where
    T: GenericImageView,
{
    img.width() == 0 || img.height() == 0
}

pub fn same_dimensions<A, B>(a: &A, b: &B) -> bool
where
    A: GenericImageView,
    B: GenericImageView,
{
    a.dimensions() == b.dimensions()
}

/// Per-pixel absolute difference. Both images must have the same dimensions.
pub fn absdiff(a: &GrayImage, b: &GrayImage) -> GrayImage {
    assert!(same_dimensions(a, b));
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y)[0].abs_diff(b.get_pixel(x, y)[0])])
    })
}

/// Everything strictly brighter than `threshold` becomes white, the rest black.
pub fn threshold(mut img: GrayImage, threshold: u8) -> GrayImage {
    img.pixels_mut()
        .for_each(|p| p[0] = if p[0] > threshold { WHITE } else { BLACK });
    img
}

/// Dilates with a square of side `2 * radius + 1`. Dilating `n` times with a 3x3 square
/// is the same as dilating once with radius `n`.
pub fn dilate(img: &GrayImage, radius: u32) -> GrayImage {
    if radius == 0 || is_img_empty(img) {
        return img.clone();
    }

    let (w, h) = img.dimensions();
    // max is separable for square kernels, so do rows then columns
    let horizontal = GrayImage::from_fn(w, h, |x, y| {
        let from = x.saturating_sub(radius);
        let to = (x + radius).min(w - 1);
        Luma([(from..=to).map(|xx| img.get_pixel(xx, y)[0]).max().unwrap_or(BLACK)])
    });

    GrayImage::from_fn(w, h, |x, y| {
        let from = y.saturating_sub(radius);
        let to = (y + radius).min(h - 1);
        Luma([(from..=to)
            .map(|yy| horizontal.get_pixel(x, yy)[0])
            .max()
            .unwrap_or(BLACK)])
    })
}

/// Paints the rectangle black, clipped to the image.
pub fn blacken(img: &mut GrayImage, x: u32, y: u32, width: u32, height: u32) {
    let x_end = x.saturating_add(width).min(img.width());
    let y_end = y.saturating_add(height).min(img.height());
    for yy in y..y_end {
        for xx in x..x_end {
            img.put_pixel(xx, yy, Luma([BLACK]));
        }
    }
}
