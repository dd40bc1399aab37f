//! Project layout: which directories and files a project root must contain.

use std::path::{Path, PathBuf};

/// Name of the environment file kept at the project root.
pub const ENV_FILE: &str = ".env";

/// Directory holding page templates for both engines.
pub const VIEWS_DIR: &str = "views";

/// Mode for provisioned directories (`rwxr-xr-x`).
pub const DIR_MODE: u32 = 0o755;

/// Mode for the provisioned environment file (`rw-r--r--`).
pub const FILE_MODE: u32 = 0o644;

const STANDARD_DIRECTORIES: [&str; 8] = [
    "handlers",
    "migrations",
    VIEWS_DIR,
    "data",
    "public",
    "tmp",
    "logs",
    "middleware",
];

/// Ordered relative directory names provisioned under a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySet {
    names: Vec<String>,
}

impl DirectorySet {
    /// Build a set from relative names, keeping their order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The directories every Brisk project has.
    pub fn standard() -> Self {
        Self::new(STANDARD_DIRECTORIES)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Absolute paths of every directory under `root`, in order.
    pub fn paths_under<'a>(&'a self, root: &'a Path) -> impl Iterator<Item = PathBuf> + 'a {
        self.names.iter().map(move |name| root.join(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for DirectorySet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_is_ordered() {
        let names: Vec<_> = DirectorySet::standard().names().map(str::to_owned).collect();
        assert_eq!(
            names,
            [
                "handlers",
                "migrations",
                "views",
                "data",
                "public",
                "tmp",
                "logs",
                "middleware"
            ]
        );
    }

    #[test]
    fn paths_are_joined_under_root() {
        let set = DirectorySet::new(["a", "b/c"]);
        let paths: Vec<_> = set.paths_under(Path::new("/srv/app")).collect();
        assert_eq!(
            paths,
            [PathBuf::from("/srv/app/a"), PathBuf::from("/srv/app/b/c")]
        );
    }
}
