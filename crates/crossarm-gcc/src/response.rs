//! Response files.
//!
//! Long argument lists are persisted to disk and referenced with a single
//! `@file` token to stay under OS command-line length limits. The adapter
//! only decides *when* to indirect; persisting the list is delegated to a
//! caller-supplied writer so the adapter itself performs no build-directory
//! management.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Which argument list a response file carries; determines its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFileKind {
    /// Include-path options for a compile or assemble step.
    Include,
    /// The full linker argument list.
    Link,
    /// The object list for an archive step.
    Archive,
}

/// Persists a token list to disk and returns the file's path.
pub trait ResponseFileWriter: Send + Sync {
    fn write_response_file(&self, kind: ResponseFileKind, tokens: &[String])
        -> io::Result<PathBuf>;
}

/// Response files written into a build directory.
///
/// Include files get a per-call counter suffix since one link of a project
/// involves many compiles; link and archive lists use fixed names.
#[derive(Debug)]
pub struct DiskResponseFiles {
    dir: PathBuf,
    include_counter: AtomicUsize,
}

impl DiskResponseFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            include_counter: AtomicUsize::new(0),
        }
    }

    /// The directory response files are written into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResponseFileWriter for DiskResponseFiles {
    fn write_response_file(
        &self,
        kind: ResponseFileKind,
        tokens: &[String],
    ) -> io::Result<PathBuf> {
        let name = match kind {
            ResponseFileKind::Include => {
                let n = self.include_counter.fetch_add(1, Ordering::Relaxed);
                format!(".includes_{n}.txt")
            }
            ResponseFileKind::Link => ".link_options.txt".to_string(),
            ResponseFileKind::Archive => ".archive_files.txt".to_string(),
        };
        let path = self.dir.join(name);
        let mut contents = tokens.join("\n");
        contents.push('\n');
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_token_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DiskResponseFiles::new(dir.path());
        let path = writer
            .write_response_file(
                ResponseFileKind::Link,
                &["-o".to_string(), "out.elf".to_string()],
            )
            .unwrap();
        assert_eq!(path.file_name().unwrap(), ".link_options.txt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "-o\nout.elf\n");
    }

    #[test]
    fn include_files_are_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DiskResponseFiles::new(dir.path());
        let a = writer
            .write_response_file(ResponseFileKind::Include, &["-Ia".to_string()])
            .unwrap();
        let b = writer
            .write_response_file(ResponseFileKind::Include, &["-Ib".to_string()])
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(a.file_name().unwrap(), ".includes_0.txt");
        assert_eq!(b.file_name().unwrap(), ".includes_1.txt");
    }

    #[test]
    fn archive_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DiskResponseFiles::new(dir.path());
        let path = writer
            .write_response_file(ResponseFileKind::Archive, &["a.o".to_string()])
            .unwrap();
        assert_eq!(path.file_name().unwrap(), ".archive_files.txt");
    }
}
