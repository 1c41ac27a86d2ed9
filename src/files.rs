//! Where import files live before they are consumed.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

pub(crate) trait FileStore {
    type Reader: Read;

    /// Turn a file reference into the path it names.
    fn resolve(&self, reference: &str) -> PathBuf;

    fn exists(&self, path: &Path) -> io::Result<bool>;

    fn open(&self, path: &Path) -> io::Result<Self::Reader>;

    fn delete(&self, path: &Path) -> io::Result<()>;
}

/// Files uploaded into a single directory, referenced by their name in it.
/// Absolute references are used as-is.
#[derive(Debug, Clone)]
pub(crate) struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileStore for UploadDir {
    type Reader = BufReader<File>;

    fn resolve(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn open(&self, path: &Path) -> io::Result<Self::Reader> {
        Ok(BufReader::new(File::open(path)?))
    }

    fn delete(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}
