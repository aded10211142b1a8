use image::{math::Rect, GrayImage};

use crate::utils::imgutils::BLACK;

/// A connected blob of changed pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub bbox: Rect,
    /// Number of pixels in the blob.
    pub area: u64,
}

/// Finds all 8-connected regions of non-black pixels, in row-major order of their first
/// pixel.
pub fn find_regions(mask: &GrayImage) -> Vec<Region> {
    let (w, h) = mask.dimensions();
    let mut visited = vec![false; w as usize * h as usize];
    let index = |x: u32, y: u32| y as usize * w as usize + x as usize;

    let mut regions = Vec::new();
    let mut stack = Vec::new();

    for (x, y, p) in mask.enumerate_pixels() {
        if p[0] == BLACK || visited[index(x, y)] {
            continue;
        }

        visited[index(x, y)] = true;
        stack.push((x, y));

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
        let mut area = 0;

        while let Some((cx, cy)) = stack.pop() {
            area += 1;
            min_x = min_x.min(cx);
            min_y = min_y.min(cy);
            max_x = max_x.max(cx);
            max_y = max_y.max(cy);

            for ny in cy.saturating_sub(1)..=(cy + 1).min(h - 1) {
                for nx in cx.saturating_sub(1)..=(cx + 1).min(w - 1) {
                    let i = index(nx, ny);
                    if !visited[i] && mask.get_pixel(nx, ny)[0] != BLACK {
                        visited[i] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }

        regions.push(Region {
            bbox: Rect {
                x: min_x,
                y: min_y,
                width: max_x - min_x + 1,
                height: max_y - min_y + 1,
            },
            area,
        });
    }

    regions
}

#[cfg(test)]
mod test {
    use crate::utils::imgutils::{construct_gray, WHITE};

    use super::*;

    const W: u8 = WHITE;
    const B: u8 = BLACK;

    #[test]
    fn all_black() {
        let img = construct_gray(&[&[B, B], &[B, B]]);
        assert!(find_regions(&img).is_empty());
    }

    #[test]
    fn empty() {
        assert!(find_regions(&construct_gray(&[])).is_empty());
    }

    #[test]
    fn diagonal_is_connected() {
        let img = construct_gray(&[&[W, B, B], &[B, W, B], &[B, B, W]]);
        let regions = find_regions(&img);
        assert_eq!(1, regions.len());
        assert_eq!(3, regions[0].area);
        assert_eq!(
            Rect {
                x: 0,
                y: 0,
                width: 3,
                height: 3
            },
            regions[0].bbox
        );
    }

    #[test]
    fn separate_blobs() {
        let img = construct_gray(&[
            &[W, W, B, B, B],
            &[W, W, B, B, W],
            &[B, B, B, B, W],
            &[B, B, B, B, W],
        ]);
        let regions = find_regions(&img);
        assert_eq!(2, regions.len());
        assert_eq!(4, regions[0].area);
        assert_eq!(3, regions[1].area);
        assert_eq!(
            Rect {
                x: 4,
                y: 1,
                width: 1,
                height: 3
            },
            regions[1].bbox
        );
    }

    #[test]
    fn ring_area_excludes_hole() {
        let img = construct_gray(&[&[W, W, W], &[W, B, W], &[W, W, W]]);
        let regions = find_regions(&img);
        assert_eq!(1, regions.len());
        assert_eq!(8, regions[0].area);
    }
}
