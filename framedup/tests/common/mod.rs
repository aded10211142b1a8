// NOTE: every test will complain about the functions it doesn't use
#![allow(unused)]

use std::path::{Path, PathBuf};

use framedup_common::utils::imgutils::filled;
use image::{Rgb, RgbImage};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tempfile::TempDir;

/// Returns cargo's tmpdir
pub fn cargo_tmpdir() -> PathBuf {
    PathBuf::from(option_env!("CARGO_TARGET_TMPDIR").expect("no cargo tmpdir???"))
}

/// Returns a fresh directory inside cargo's tmpdir, removed when dropped
pub fn tmp_dir() -> TempDir {
    tempfile::tempdir_in(cargo_tmpdir()).expect("could not create temporary dir")
}

pub const WIDTH: u32 = 320;
pub const HEIGHT: u32 = 240;

/// A static gray scene
pub fn scene() -> RgbImage {
    filled(WIDTH, HEIGHT, 100, 100, 100)
}

/// The static scene with something large in the middle of it
pub fn scene_with_object() -> RgbImage {
    let mut img = scene();
    for y in 70..170 {
        for x in 110..210 {
            img.put_pixel(x, y, Rgb([250, 250, 250]));
        }
    }
    img
}

/// The static scene with some sensor noise
pub fn noisy_scene(seed: u64) -> RgbImage {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut img = scene();
    img.pixels_mut().for_each(|p| {
        let noise: u8 = rng.gen_range(0..20);
        p.0 = p.0.map(|c| c - 10 + noise);
    });
    img
}

pub fn save(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("could not save test image");
    path
}

pub fn save_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not a png").expect("could not write test file");
    path
}

pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .expect("has a file name")
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}
