use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::timestamp::{FileName, Timestamp};

/// One image file with a valid timestamp in its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    pub camera_id: String,
    pub timestamp: Timestamp,
}

impl AsRef<Path> for ImageRecord {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Camera id to its frames in chronological order.
pub type CameraGroups = BTreeMap<String, Vec<ImageRecord>>;

/// Partitions the files by camera id and sorts every camera's files by timestamp. Files
/// whose timestamp can't be parsed are logged and dropped for good. The sort is stable,
/// so files with equal timestamps keep the order they were given in.
pub fn group_by_camera(files: impl IntoIterator<Item = PathBuf>) -> CameraGroups {
    let mut partitions: BTreeMap<String, Vec<(PathBuf, FileName)>> = BTreeMap::new();
    for path in files {
        match FileName::from_path(&path) {
            Ok(name) => partitions
                .entry(name.camera_id.clone())
                .or_default()
                .push((path, name)),
            Err(e) => log::error!("Skipping '{}': {e}", path.display()),
        }
    }

    partitions
        .into_iter()
        .map(|(camera_id, files)| {
            let mut records: Vec<ImageRecord> = files
                .into_iter()
                .filter_map(|(path, name)| match name.timestamp() {
                    Ok(timestamp) => Some(ImageRecord {
                        path,
                        camera_id: name.camera_id,
                        timestamp,
                    }),
                    Err(e) => {
                        log::error!("Skipping '{}': {e}", path.display());
                        None
                    }
                })
                .collect();

            records.sort_by_key(|record| record.timestamp);
            if let (Some(first), Some(last)) = (records.first(), records.last()) {
                log::debug!(
                    "{camera_id}: {} frames from {} to {}",
                    records.len(),
                    first.timestamp,
                    last.timestamp
                );
            }
            (camera_id, records)
        })
        .collect()
}
