use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{self, Context};
use framedup_common::bin_common::{
    args::change::{Change, ChangeCli},
    init::init_eyre,
};

#[derive(Parser)]
#[command()]
/// Scores how much two images differ, the same way consecutive frames are compared when
/// pruning
struct Cli {
    #[command(flatten)]
    change_args: ChangeCli,

    /// Save the thresholded difference image here
    #[arg(long)]
    threshold_out: Option<PathBuf>,

    /// The earlier frame
    prev: PathBuf,

    /// The later frame
    next: PathBuf,
}

fn main() -> eyre::Result<()> {
    init_eyre()?;
    let cli = Cli::parse();
    let change = Change::from(&cli.change_args);

    let [prev, next] = [&cli.prev, &cli.next].map(|input| {
        image::open(input)
            .wrap_err_with(|| format!("Could not open {:?}", input))
            .map(|img| change.prepare(&img.to_rgb8()))
    });

    let cmp = change
        .compare(&prev?, &next?)
        .wrap_err("failed to compare the frames")?;

    for region in &cmp.regions {
        let bbox = region.bbox;
        println!(
            "region at {},{} size {}x{}: area={}",
            bbox.x, bbox.y, bbox.width, bbox.height, region.area
        );
    }
    println!("score={}", cmp.score);

    if let Some(out) = cli.threshold_out {
        cmp.threshold_image
            .save(&out)
            .wrap_err_with(|| format!("Could not save {:?}", out))?;
    }

    Ok(())
}
