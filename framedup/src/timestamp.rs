//! Camera ids and capture times encoded in image file names, like
//! `cam1_2021_03_04__05_06_07.png` or `cam1-1616161616161.png`.

use std::{fmt, path::Path};

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};

/// Hyphens are treated as this
pub const SEPARATOR: char = '_';
pub const DATE_FORMAT: &str = "%Y_%m_%d__%H_%M_%S";

/// Milliseconds since the unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    millis: i64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("the path has no file name")]
    NoFileName,
    #[error("incorrect timestamp format: {0:?}")]
    Unparsable(String),
}

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    pub fn as_millis(self) -> i64 {
        self.millis
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp_millis(self.millis) {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d %H:%M:%S%.3f UTC")),
            None => write!(f, "{}ms", self.millis),
        }
    }
}

/// A file name split into the camera id and the, yet unparsed, timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    pub camera_id: String,
    pub token: String,
}

impl FileName {
    /// Everything from the first dot is dropped, then the rest is split on the first
    /// separator. A name without any separator is both the camera id and the token.
    pub fn from_path(path: &Path) -> Result<Self, TimestampError> {
        let name = path
            .file_name()
            .ok_or(TimestampError::NoFileName)?
            .to_string_lossy();

        let stem = name.split('.').next().unwrap_or_default();
        let normalized = stem.replace('-', &SEPARATOR.to_string());

        let (camera_id, token) = normalized
            .split_once(SEPARATOR)
            .unwrap_or((normalized.as_str(), normalized.as_str()));

        Ok(Self {
            camera_id: camera_id.to_string(),
            token: token.to_string(),
        })
    }

    pub fn timestamp(&self) -> Result<Timestamp, TimestampError> {
        parse_timestamp(&self.token)
    }
}

/// Tries [`DATE_FORMAT`] in local time first, then milliseconds since the epoch.
pub fn parse_timestamp(token: &str) -> Result<Timestamp, TimestampError> {
    parse_date(token)
        .or_else(|| parse_epoch_millis(token))
        .ok_or_else(|| TimestampError::Unparsable(token.to_string()))
}

fn parse_date(token: &str) -> Option<Timestamp> {
    let naive = NaiveDateTime::parse_from_str(token, DATE_FORMAT).ok()?;
    from_local(&Local, &naive)
}

/// Ambiguous local times resolve to the earliest instant. Local times skipped by a DST
/// jump are read with the offset in effect before the jump, i.e., 02:30 in a gap from
/// 02:00 to 03:00 is the same instant as 03:30 after it.
fn from_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<Timestamp> {
    let utc = match tz.from_local_datetime(naive) {
        LocalResult::Single(date) | LocalResult::Ambiguous(date, _) => date.naive_utc(),
        LocalResult::None => {
            let before = naive.checked_sub_signed(TimeDelta::try_days(1)?)?;
            let offset = tz.offset_from_utc_datetime(&before).fix();
            naive.checked_sub_signed(TimeDelta::try_seconds(
                offset.local_minus_utc().into(),
            )?)?
        }
    };
    Some(Timestamp::from_millis(utc.and_utc().timestamp_millis()))
}

/// Digits can be grouped with single underscores, like `1_616_161_616_161`.
fn parse_epoch_millis(token: &str) -> Option<Timestamp> {
    let mut groups = token.split(SEPARATOR);
    let first = groups.next()?;
    let mut rest = groups.peekable();
    if rest.peek().is_some() && !first.ends_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if rest.any(|group| group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    let millis: i64 = token.replace(SEPARATOR, "").parse().ok()?;
    let date = DateTime::from_timestamp_millis(millis)?;
    (1..=9999)
        .contains(&date.year())
        .then_some(Timestamp::from_millis(millis))
}
