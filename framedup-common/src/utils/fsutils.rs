use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

/// Collects all regular files directly inside `dir` whose extension is exactly
/// `extension`, sorted by path. Directories are not walked recursively.
pub fn files_with_extension(
    dir: impl AsRef<Path>,
    extension: impl AsRef<OsStr>,
) -> io::Result<Vec<PathBuf>> {
    let extension = extension.as_ref();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension() == Some(extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Try to read the file, return None if it doesn't exist
pub fn read_optional_file(path: impl AsRef<Path>) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
        Ok(s) => Ok(Some(s)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_optional_file() {
        let res = read_optional_file("/this/file/does/not/exist.txt").unwrap();
        assert_eq!(None, res);
    }
}
