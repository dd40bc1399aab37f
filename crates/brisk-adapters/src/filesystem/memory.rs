//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use brisk_core::application::ports::Filesystem;

/// In-memory filesystem for testing.
///
/// Tracks directories, files and the mode each entry was created with.
/// Paths registered through [`MemoryFilesystem::deny`] reject every write at
/// or below them with `PermissionDenied`.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    modes: HashMap<PathBuf, u32>,
    denied: Vec<PathBuf>,
}

impl MemoryFilesystemInner {
    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.denied.iter().any(|denied| path.starts_with(denied)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

fn poisoned() -> io::Error {
    io::Error::other("memory filesystem lock poisoned")
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file with content, creating its parent directories.
    pub fn write_file(&self, path: &Path, content: impl Into<String>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent, 0o755)?;
        }
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        inner.files.insert(path.to_path_buf(), content.into());
        Ok(())
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Mode an entry was created with.
    pub fn mode_of(&self, path: &Path) -> Option<u32> {
        let inner = self.inner.read().ok()?;
        inner.modes.get(path).copied()
    }

    /// Reject writes at or below `path`.
    pub fn deny(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.denied.push(path.into());
        }
    }

    /// List all directories, sorted.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        let mut directories: Vec<PathBuf> = self
            .inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default();
        directories.sort();
        directories
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("not a directory: {}", current.display()),
                ));
            }
            if !inner.directories.contains(&current) {
                inner.check_writable(&current)?;
                inner.directories.insert(current.clone());
                inner.modes.insert(current.clone(), mode);
            }
        }

        Ok(())
    }

    fn create_file(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("already exists: {}", path.display()),
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !inner.directories.contains(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("parent directory missing: {}", parent.display()),
                ));
            }
        }
        inner.check_writable(path)?;

        inner.files.insert(path.to_path_buf(), String::new());
        inner.modes.insert(path.to_path_buf(), mode);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }
}
