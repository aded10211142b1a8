use std::{ffi::OsString, path::PathBuf, time::Instant};

use clap::Parser;
use color_eyre::eyre::{self, Context};
use framedup::{
    output,
    pipeline::{self, Prune, PruneCli},
};
use framedup_common::{
    bin_common::{
        init::{init_eyre, init_logger},
        termination,
    },
    utils::fsutils::read_optional_file,
};

#[derive(Parser, Debug)]
#[command()]
/// Removes near duplicate frames from a folder of images from several cameras.
///
/// The files must be named like `<camera id>_<timestamp>.png`, where the timestamp is
/// either `YYYY_MM_DD__HH_MM_SS` or milliseconds since the epoch. Hyphens work as well
/// as underscores. Each camera's frames are compared in chronological order and the
/// ones that changed enough since the previous frame are written to `<path>/filtered/`.
///
/// This uses rayon, so the `RAYON_NUM_THREADS` environment variable might be of interest.
struct Cli {
    /// Path to the folder of images
    #[arg(long, default_value = "dataset/")]
    path: PathBuf,

    #[command(flatten)]
    prune_args: PruneCli,

    /// Only print which files would be kept, don't write anything
    #[arg(long)]
    dry_run: bool,

    /// A file to additionally write the logs to
    #[arg(long)]
    logfile: Option<PathBuf>,
}

fn cli_arguments() -> eyre::Result<Cli> {
    const ARGS_FILE: &str = ".frameduprc";
    let mut args: Vec<OsString> = std::env::args_os().collect();

    if args.len() == 1 {
        if let Some(flags) = read_optional_file(ARGS_FILE)
            .wrap_err_with(|| format!("Could not read config file at: {ARGS_FILE}"))?
        {
            args.extend(
                flags
                    .split_whitespace()
                    .map(|s| std::ffi::OsStr::new(s).to_owned()),
            );
        }
    }

    Ok(Cli::parse_from(args))
}

fn main() -> eyre::Result<()> {
    init_eyre()?;
    let cli = cli_arguments()?;
    init_logger(cli.logfile.as_deref())?;

    log::debug!("CLI arguments: {cli:#?}");

    if !cli.path.is_dir() {
        log::warn!(
            "'{}' is not a directory, there is nothing to prune",
            cli.path.display()
        );
        return Ok(());
    }

    let prune_args = Prune::from(&cli.prune_args);
    let term_cookie =
        termination::Cookie::new().wrap_err("failed to create term cookie")?;

    let before = Instant::now();
    let report = pipeline::prune_dir(&cli.path, &prune_args, &term_cookie)
        .wrap_err("failed to prune the frames")?;
    log::info!(
        "It took {} to prune {} files",
        humantime::Duration::from(before.elapsed()),
        report.candidates
    );

    for (camera_id, summary) in &report.cameras {
        log::debug!("{camera_id}: {summary:?}");
    }

    if cli.dry_run {
        for file in &report.retained {
            println!("{}", file.display());
        }
        return Ok(());
    }

    let dest = output::filtered_dir(&cli.path);
    log::info!(
        "Writing {} clean frames to: {}",
        report.retained.len(),
        dest.display()
    );
    output::write_clean_data(&report.retained, &dest)
        .wrap_err("failed to write the clean data")?;
    log::info!("Done!");

    Ok(())
}
