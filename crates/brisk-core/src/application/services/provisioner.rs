//! Directory Provisioner - idempotent project layout creation.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{
        DirectorySet, ENV_FILE,
        layout::{DIR_MODE, FILE_MODE},
    },
    error::FilesystemError,
};

/// Ensures a project root contains its directories and env file.
///
/// Existing entries are left untouched, so running it twice is a no-op the
/// second time. The first failure stops provisioning; whatever was already
/// created stays in place.
pub struct DirectoryProvisioner<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> DirectoryProvisioner<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Ensure `root/<name>` is a directory for every name in `directories`.
    #[instrument(skip_all, fields(root = %root.display(), count = directories.len()))]
    pub fn provision_directories(
        &self,
        root: &Path,
        directories: &DirectorySet,
    ) -> Result<(), FilesystemError> {
        for path in directories.paths_under(root) {
            self.ensure_dir(&path)?;
        }
        Ok(())
    }

    /// Ensure `root/.env` exists, creating it empty if absent.
    ///
    /// Returns the env file path. An existing file keeps its content.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn provision_env_file(&self, root: &Path) -> Result<PathBuf, FilesystemError> {
        let path = root.join(ENV_FILE);

        if self.filesystem.is_dir(&path) {
            return Err(FilesystemError::new(
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "env file path is a directory"),
            ));
        }

        if self.filesystem.exists(&path) {
            debug!(path = %path.display(), "Env file already present");
            return Ok(path);
        }

        match self.filesystem.create_file(&path, FILE_MODE) {
            Ok(()) => {
                debug!(path = %path.display(), "Env file created");
                Ok(path)
            }
            // Created by someone else in between; content is theirs to keep.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(path),
            Err(e) => Err(FilesystemError::new(path, e)),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<(), FilesystemError> {
        if self.filesystem.is_dir(path) {
            return Ok(());
        }

        if self.filesystem.exists(path) {
            return Err(FilesystemError::new(
                path,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "path exists and is not a directory",
                ),
            ));
        }

        self.filesystem
            .create_dir_all(path, DIR_MODE)
            .map_err(|e| FilesystemError::new(path, e))?;
        debug!(path = %path.display(), "Directory created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::MockFilesystem;
    use mockall::predicate::{always, eq};

    #[test]
    fn creates_missing_directories_with_dir_mode() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .with(always(), eq(0o755))
            .times(2)
            .returning(|_, _| Ok(()));

        let provisioner = DirectoryProvisioner::new(&fs);
        provisioner
            .provision_directories(Path::new("/app"), &DirectorySet::new(["views", "logs"]))
            .unwrap();
    }

    #[test]
    fn existing_directories_are_left_alone() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_create_dir_all().never();

        let provisioner = DirectoryProvisioner::new(&fs);
        provisioner
            .provision_directories(Path::new("/app"), &DirectorySet::standard())
            .unwrap();
    }

    #[test]
    fn regular_file_in_the_way_fails() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        fs.expect_exists()
            .returning(|p| p == Path::new("/app/views"));
        fs.expect_create_dir_all().returning(|_, _| Ok(()));

        let provisioner = DirectoryProvisioner::new(&fs);
        let err = provisioner
            .provision_directories(Path::new("/app"), &DirectorySet::new(["handlers", "views", "data"]))
            .unwrap_err();

        assert_eq!(err.path, PathBuf::from("/app/views"));
        assert_eq!(err.source.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn stops_at_first_failure() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .times(1)
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

        let provisioner = DirectoryProvisioner::new(&fs);
        let err = provisioner
            .provision_directories(Path::new("/ro"), &DirectorySet::standard())
            .unwrap_err();

        assert_eq!(err.path, PathBuf::from("/ro/handlers"));
        assert_eq!(err.source.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn env_file_created_when_absent() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(false);
        fs.expect_create_file()
            .with(eq(Path::new("/app/.env")), eq(0o644))
            .times(1)
            .returning(|_, _| Ok(()));

        let provisioner = DirectoryProvisioner::new(&fs);
        let path = provisioner.provision_env_file(Path::new("/app")).unwrap();
        assert_eq!(path, PathBuf::from("/app/.env"));
    }

    #[test]
    fn existing_env_file_is_untouched() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(true);
        fs.expect_create_file().never();

        let provisioner = DirectoryProvisioner::new(&fs);
        provisioner.provision_env_file(Path::new("/app")).unwrap();
    }

    #[test]
    fn env_file_directory_collision_fails() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);

        let provisioner = DirectoryProvisioner::new(&fs);
        let err = provisioner.provision_env_file(Path::new("/app")).unwrap_err();
        assert_eq!(err.path, PathBuf::from("/app/.env"));
    }
}
