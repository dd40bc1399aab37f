//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use brisk_core::application::ports::Filesystem;

/// Production filesystem implementation using `std::fs`.
///
/// Modes are applied on unix (subject to the process umask) and ignored
/// elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        {
            let _ = mode;
        }
        builder.create(path)
    }

    fn create_file(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        {
            let _ = mode;
        }
        options.open(path).map(drop)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_dir_all_builds_intermediate_segments() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");

        LocalFilesystem::new().create_dir_all(&nested, 0o755).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn create_dir_all_on_existing_directory_is_ok() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_dir_all(temp.path(), 0o755).unwrap();
        fs.create_dir_all(temp.path(), 0o755).unwrap();
    }

    #[test]
    fn create_file_never_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "PORT=4000\n").unwrap();

        let err = LocalFilesystem::new().create_file(&path, 0o644).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "PORT=4000\n");
    }

    #[cfg(unix)]
    #[test]
    fn modes_are_applied() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = temp.path().join("views");
        let file = temp.path().join(".env");

        fs.create_dir_all(&dir, 0o755).unwrap();
        fs.create_file(&file, 0o644).unwrap();

        // Umask can only remove bits.
        let dir_mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        let file_mode = std::fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode & !0o755, 0);
        assert_eq!(file_mode & !0o644, 0);
        assert_ne!(dir_mode & 0o700, 0);
    }
}
