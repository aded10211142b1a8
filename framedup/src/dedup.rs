//! Walks one camera's frames in chronological order and keeps the ones that differ
//! enough from the frame before them.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use framedup_common::{change::ChangeError, utils::time::Every};

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
    #[error("change: {0}")]
    Change(#[from] ChangeError),
}

/// Everything the walk needs to know about frames.
pub trait FrameComparer {
    /// A decoded frame.
    type Raw;
    /// A frame ready to be compared.
    type Prepared;

    fn decode(&self, path: &Path) -> Result<Self::Raw, FrameError>;

    fn prepare(&self, raw: &Self::Raw) -> Self::Prepared;

    /// How much `current` changed since `baseline`. Larger is more.
    fn score(
        &self,
        baseline: &Self::Prepared,
        current: &Self::Prepared,
    ) -> Result<f64, FrameError>;
}

/// The frame the next one is compared against.
#[derive(Debug, Clone)]
pub enum Baseline<P> {
    /// No frame has been decoded yet
    Absent,
    Present(P),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Retained { score: f64 },
    Dropped { score: f64 },
    /// The previous frame was needed as the first baseline but could not be decoded
    NoBaseline,
    Undecodable,
    /// Both frames decoded, but they could not be compared
    Incomparable,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CameraSummary {
    pub frames: usize,
    pub retained: usize,
    pub dropped: usize,
    pub no_baseline: usize,
    pub undecodable: usize,
    pub incomparable: usize,
}

#[derive(Debug, Default, Clone)]
pub struct CameraWalk {
    pub retained: Vec<PathBuf>,
    pub summary: CameraSummary,
}

impl CameraSummary {
    fn count(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Retained { .. } => self.retained += 1,
            Verdict::Dropped { .. } => self.dropped += 1,
            Verdict::NoBaseline => self.no_baseline += 1,
            Verdict::Undecodable => self.undecodable += 1,
            Verdict::Incomparable => self.incomparable += 1,
        }
    }
}

/// Judges `current` against the baseline, establishing the baseline from `prev` first if
/// there is none. The returned baseline is `current` whenever it could be decoded and
/// compared, regardless of the verdict. Otherwise the old baseline stays.
pub fn step<C: FrameComparer>(
    comparer: &C,
    baseline: Baseline<C::Prepared>,
    prev: &Path,
    current: &Path,
    score_min: f64,
) -> (Baseline<C::Prepared>, Verdict) {
    let baseline = match baseline {
        Baseline::Present(frame) => frame,
        Baseline::Absent => match comparer.decode(prev) {
            Ok(raw) => comparer.prepare(&raw),
            Err(e) => {
                log::debug!("Could not decode '{}': {e}", prev.display());
                return (Baseline::Absent, Verdict::NoBaseline);
            }
        },
    };

    let current_frame = match comparer.decode(current) {
        Ok(raw) => comparer.prepare(&raw),
        Err(e) => {
            log::debug!("Could not decode '{}': {e}", current.display());
            return (Baseline::Present(baseline), Verdict::Undecodable);
        }
    };

    let score = match comparer.score(&baseline, &current_frame) {
        Ok(score) => score,
        Err(e) => {
            log::warn!(
                "Could not compare '{}' with its baseline: {e}",
                current.display()
            );
            return (Baseline::Present(baseline), Verdict::Incomparable);
        }
    };
    let verdict = if score > score_min {
        Verdict::Retained { score }
    } else {
        Verdict::Dropped { score }
    };

    (Baseline::Present(current_frame), verdict)
}

/// Returns the frames, in order, that changed more than `score_min` since the frame
/// before them. The very first frame only ever serves as a baseline, so it is never
/// retained.
pub fn deduplicate<C, P>(
    comparer: &C,
    camera_id: &str,
    frames: &[P],
    score_min: f64,
) -> CameraWalk
where
    C: FrameComparer,
    P: AsRef<Path>,
{
    let mut walk = CameraWalk::default();
    walk.summary.frames = frames.len();

    let mut log_every = Every::new(Duration::from_secs(10));
    let mut baseline = Baseline::Absent;

    for (i, pair) in frames.windows(2).enumerate() {
        let (prev, current) = (pair[0].as_ref(), pair[1].as_ref());

        let (next_baseline, verdict) = step(comparer, baseline, prev, current, score_min);
        baseline = next_baseline;
        log::debug!("{camera_id}: '{}' {verdict:?}", current.display());

        walk.summary.count(verdict);
        if let Verdict::Retained { .. } = verdict {
            walk.retained.push(current.to_owned());
        }

        log_every.perform(|| {
            log::info!("{camera_id}: progress {}/{} frames", i + 2, frames.len())
        });
    }

    walk
}

#[cfg(test)]
mod test {
    use std::{collections::HashMap, io};

    use super::*;

    /// Frames are named by a single letter. Each name maps to a frame id, or to nothing
    /// if it can't be decoded. Scores are looked up by pairs of frame ids.
    struct Fake {
        frames: HashMap<&'static str, u32>,
        scores: HashMap<(u32, u32), f64>,
    }

    impl Fake {
        fn new(frames: &[(&'static str, Option<u32>)], scores: &[((u32, u32), f64)]) -> Self {
            Self {
                frames: frames
                    .iter()
                    .filter_map(|&(name, id)| id.map(|id| (name, id)))
                    .collect(),
                scores: scores.iter().copied().collect(),
            }
        }
    }

    impl FrameComparer for Fake {
        type Raw = u32;
        type Prepared = u32;

        fn decode(&self, path: &Path) -> Result<u32, FrameError> {
            let name = path.to_str().expect("test paths are utf8");
            self.frames.get(name).copied().ok_or_else(|| {
                image::ImageError::IoError(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "corrupt",
                ))
                .into()
            })
        }

        fn prepare(&self, raw: &u32) -> u32 {
            *raw
        }

        fn score(&self, baseline: &u32, current: &u32) -> Result<f64, FrameError> {
            match self.scores.get(&(*baseline, *current)) {
                Some(&score) if score.is_nan() => {
                    Err(ChangeError::ShapeMismatch((1, 1), (2, 2)).into())
                }
                Some(&score) => Ok(score),
                None => panic!("unexpected comparison {baseline} -> {current}"),
            }
        }
    }

    fn run(fake: &Fake, frames: &[&str]) -> Vec<String> {
        deduplicate(fake, "cam", frames, 2000.0)
            .retained
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn baseline_advances_on_drop() {
        let fake = Fake::new(
            &[("a", Some(0)), ("b", Some(1)), ("c", Some(2)), ("d", Some(3))],
            &[((0, 1), 3000.0), ((1, 2), 500.0), ((2, 3), 2500.0)],
        );
        assert_eq!(vec!["b", "d"], run(&fake, &["a", "b", "c", "d"]));
    }

    #[test]
    fn threshold_is_strict() {
        let fake = Fake::new(
            &[("a", Some(0)), ("b", Some(1)), ("c", Some(2))],
            &[((0, 1), 2000.0), ((1, 2), 2000.1)],
        );
        assert_eq!(vec!["c"], run(&fake, &["a", "b", "c"]));
    }

    #[test]
    fn first_frame_is_never_retained() {
        let fake = Fake::new(&[("a", Some(0)), ("b", Some(1))], &[((0, 1), 1e9)]);
        assert_eq!(vec!["b"], run(&fake, &["a", "b"]));
        assert!(run(&fake, &["a"]).is_empty());
        assert!(run(&fake, &[]).is_empty());
    }

    #[test]
    fn undecodable_keeps_baseline() {
        let fake = Fake::new(
            &[("a", Some(0)), ("b", Some(1)), ("x", None), ("c", Some(2))],
            &[((0, 1), 100.0), ((1, 2), 5000.0)],
        );
        assert_eq!(vec!["c"], run(&fake, &["a", "b", "x", "c"]));
    }

    #[test]
    fn undecodable_first_frame_delays_baseline() {
        // "a" can't be a baseline, so "b" is skipped and becomes the baseline for "c"
        let fake = Fake::new(
            &[("x", None), ("b", Some(1)), ("c", Some(2))],
            &[((1, 2), 5000.0)],
        );
        let walk = deduplicate(&fake, "cam", &["x", "b", "c"], 2000.0);
        assert_eq!(vec![PathBuf::from("c")], walk.retained);
        assert_eq!(
            CameraSummary {
                frames: 3,
                retained: 1,
                dropped: 0,
                no_baseline: 1,
                undecodable: 0,
                incomparable: 0,
            },
            walk.summary
        );
    }

    #[test]
    fn incomparable_keeps_baseline() {
        // "b" can't be compared with "a", so "c" is compared with "a"
        let fake = Fake::new(
            &[("a", Some(0)), ("b", Some(1)), ("c", Some(2))],
            &[((0, 1), f64::NAN), ((0, 2), 5000.0)],
        );
        let walk = deduplicate(&fake, "cam", &["a", "b", "c"], 2000.0);
        assert_eq!(vec![PathBuf::from("c")], walk.retained);
        assert_eq!(1, walk.summary.incomparable);

        let (baseline, verdict) =
            step(&fake, Baseline::Present(0), Path::new("a"), Path::new("b"), 0.0);
        assert_eq!(Verdict::Incomparable, verdict);
        assert!(matches!(baseline, Baseline::Present(0)));
    }

    #[test]
    fn everything_after_first_undecodable() {
        let fake = Fake::new(&[("a", Some(0))], &[]);
        let walk = deduplicate(&fake, "cam", &["a", "x", "y", "z"], 2000.0);
        assert!(walk.retained.is_empty());
        assert_eq!(3, walk.summary.undecodable);
    }

    #[test]
    fn nothing_decodable() {
        let fake = Fake::new(&[], &[]);
        let walk = deduplicate(&fake, "cam", &["x", "y", "z"], 2000.0);
        assert!(walk.retained.is_empty());
        assert_eq!(2, walk.summary.no_baseline);
    }

    #[test]
    fn step_reports_baseline() {
        let fake = Fake::new(&[("a", Some(0)), ("b", Some(1))], &[((0, 1), 1.0)]);

        let (baseline, verdict) =
            step(&fake, Baseline::Absent, Path::new("a"), Path::new("b"), 2000.0);
        assert_eq!(Verdict::Dropped { score: 1.0 }, verdict);
        assert!(matches!(baseline, Baseline::Present(1)));

        let (baseline, verdict) =
            step(&fake, Baseline::Present(0), Path::new("b"), Path::new("x"), 0.0);
        assert_eq!(Verdict::Undecodable, verdict);
        assert!(matches!(baseline, Baseline::Present(0)));

        let (baseline, verdict) =
            step(&fake, Baseline::Absent, Path::new("x"), Path::new("a"), 0.0);
        assert_eq!(Verdict::NoBaseline, verdict);
        assert!(matches!(baseline, Baseline::Absent));
    }
}
