use std::{
    io,
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{self, Context};
use framedup_common::{
    args,
    bin_common::{
        args::change::{Change, ChangeCli},
        termination,
    },
    utils::fsutils,
};
use rayon::prelude::*;

use crate::{
    dedup::{self, CameraSummary, FrameComparer},
    frames::DiskFrames,
    grouping,
};

args! {
    #[derive(Clone, Debug)]
    Prune {
        "A frame is kept if it changed more than this compared to the previous frame \
         from the same camera"
        score_min: f64 = 2000.0;

        "Only files with exactly this extension are considered"
        extension: String = "png".to_string();

        change: Change;
    }
}

#[derive(Debug, Default)]
pub struct PruneReport {
    /// How many files were considered
    pub candidates: usize,
    /// Ordered by camera id, then chronologically
    pub retained: Vec<PathBuf>,
    pub cameras: Vec<(String, CameraSummary)>,
}

impl PruneReport {
    pub fn removed(&self) -> usize {
        self.candidates - self.retained.len()
    }
}

/// Lists the candidate files in `dir`. A missing directory has no candidates.
pub fn list_candidates(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    match fsutils::files_with_extension(dir, extension) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("The directory '{}' does not exist", dir.display());
            Ok(vec![])
        }
        res => res,
    }
}

pub fn prune_dir(
    dir: &Path,
    args: &Prune,
    term_cookie: &termination::Cookie,
) -> eyre::Result<PruneReport> {
    log::info!("Finding all .{} files in: {}", args.extension(), dir.display());
    let candidates = list_candidates(dir, &args.extension())
        .wrap_err_with(|| format!("failed to list the files in: {}", dir.display()))?;
    log::info!("Found {} files", candidates.len());

    let frames = DiskFrames::new(args.change().clone());
    prune_files(candidates, &frames, args.score_min(), term_cookie)
}

/// Groups the files by camera and deduplicates every camera independently, in parallel.
pub fn prune_files<C>(
    files: Vec<PathBuf>,
    comparer: &C,
    score_min: f64,
    term_cookie: &termination::Cookie,
) -> eyre::Result<PruneReport>
where
    C: FrameComparer + Sync,
{
    let candidates = files.len();
    let groups = grouping::group_by_camera(files);
    log::info!("Found {} cameras", groups.len());

    let walks: Vec<(String, dedup::CameraWalk)> = groups
        .par_iter()
        .map(|(camera_id, frames)| {
            if term_cookie.is_terminating() {
                eyre::bail!("Termination signal received");
            }

            log::info!(
                "Removing duplicates for camera id: {camera_id} ({} frames)",
                frames.len()
            );
            let before = Instant::now();
            let walk = dedup::deduplicate(comparer, camera_id, frames, score_min);
            log::info!(
                "It took {} to keep {} out of {} frames from {camera_id}",
                humantime::Duration::from(before.elapsed()),
                walk.retained.len(),
                frames.len(),
            );

            Ok((camera_id.clone(), walk))
        })
        .collect::<eyre::Result<_>>()?;

    let mut report = PruneReport {
        candidates,
        ..PruneReport::default()
    };
    for (camera_id, walk) in walks {
        report.retained.extend(walk.retained);
        report.cameras.push((camera_id, walk.summary));
    }

    log::info!("Duplicates removed: {}", report.removed());
    Ok(report)
}
