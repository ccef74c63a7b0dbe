use crate::error::TagError;
use crate::home::Home;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Opens `path` for reading unless it is larger than `max_size` bytes.
///
/// A leading `~` is expanded first. The size check runs on the metadata, so
/// an oversized file is never opened.
pub fn open_max_size(path: &Path, max_size: u64, home: &Home) -> Result<File, TagError> {
    let path = home.expand(path);
    let size = fs::metadata(&path)
        .map_err(|err| TagError::unavailable(&path, err))?
        .len();
    if size > max_size {
        return Err(TagError::FileTooLarge {
            path,
            size,
            max: max_size,
        });
    }
    File::open(&path).map_err(|err| TagError::unavailable(&path, err))
}

/// Reads the whole file through [`open_max_size`].
pub fn read_max_size(path: &Path, max_size: u64, home: &Home) -> Result<Vec<u8>, TagError> {
    let mut file = open_max_size(path, max_size, home)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|err| TagError::unavailable(home.expand(path), err))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DEFAULT_MAX: u64 = crate::settings::DEFAULT_MAX_FILE_SIZE;

    #[test]
    fn reads_files_within_the_limit() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("small.png");
        std::fs::write(&file, b"12345").unwrap();
        let data = read_max_size(&file, 5, &Home::default()).unwrap();
        assert_eq!(data, b"12345");
    }

    #[test]
    fn rejects_files_over_the_limit() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("big.png");
        std::fs::write(&file, b"123456").unwrap();
        match open_max_size(&file, 5, &Home::default()) {
            Err(TagError::FileTooLarge { path, size, max }) => {
                assert_eq!(path, file);
                assert_eq!(size, 6);
                assert_eq!(max, 5);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_not_a_size_failure() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("missing.png");
        let err = open_max_size(&file, 5, &Home::default()).unwrap_err();
        match err {
            TagError::FileUnavailable { path, source } => {
                assert_eq!(path, file);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected FileUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn directory_is_unavailable_not_read() {
        let dir = tempdir().unwrap();
        let err = read_max_size(dir.path(), DEFAULT_MAX, &Home::default()).unwrap_err();
        assert!(matches!(err, TagError::FileUnavailable { .. }));
        assert_eq!(err.path(), dir.path());
    }

    #[test]
    fn expands_home_shorthand() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.gif"), b"GIF").unwrap();
        let home = Home::new(dir.path().to_string_lossy().into_owned());
        let data = read_max_size(Path::new("~/a.gif"), 100, &home).unwrap();
        assert_eq!(data, b"GIF");
    }
}
