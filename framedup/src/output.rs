use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{self, Context};
use rayon::prelude::*;

/// Name of the directory, inside the source directory, the kept frames are written to
pub const FILTERED_DIR: &str = "filtered";

pub fn filtered_dir(source: &Path) -> PathBuf {
    source.join(FILTERED_DIR)
}

/// Decodes every file and encodes it again into `dest`, under the same file name. The
/// format is decided by the extension. `dest` is created if needed.
pub fn write_clean_data(files: &[PathBuf], dest: &Path) -> eyre::Result<()> {
    fs::create_dir_all(dest)
        .wrap_err_with(|| format!("failed to create the dir: {}", dest.display()))?;

    files.par_iter().try_for_each(|file| -> eyre::Result<()> {
        let name = file
            .file_name()
            .ok_or_else(|| eyre::eyre!("'{}' has no file name", file.display()))?;
        let target = dest.join(name);

        let img = image::open(file)
            .wrap_err_with(|| format!("could not open {} as an image", file.display()))?;
        img.save(&target)
            .wrap_err_with(|| format!("could not write {}", target.display()))?;

        log::debug!("Wrote {}", target.display());
        Ok(())
    })
}
