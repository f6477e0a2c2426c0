//! Data directory scanning
//!
//! The database reads from two roots, a system directory of installed
//! definitions and a per-user directory of registered templates. Which files
//! are picked up is decided by [`DataFileKind`]; enumerating a directory goes
//! through [`DirectoryLister`] so hosts and tests can supply their own.

use std::io;
use std::path::{Path, PathBuf};

/// The two data directory roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDirs {
    pub system: PathBuf,
    pub user: PathBuf,
}

impl DataDirs {
    pub fn new(system: impl Into<PathBuf>, user: impl Into<PathBuf>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Directory enumeration primitive.
pub trait DirectoryLister: Send + Sync {
    /// True if `dir` exists and is a directory.
    fn exists(&self, dir: &Path) -> bool;

    /// Plain file names (not paths) of the entries in `dir`.
    fn file_names(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// [`DirectoryLister`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDirectoryLister;

impl DirectoryLister for FsDirectoryLister {
    fn exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn file_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            // Non UTF-8 names cannot match any data file pattern.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }
}

/// Kind of data file, by naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFileKind {
    Paper,
    Category,
    Vendor,
    Template,
}

impl DataFileKind {
    /// True if `file_name` holds definitions of this kind.
    pub fn matches(self, file_name: &str) -> bool {
        match self {
            Self::Paper => file_name.ends_with(".paper") || file_name == "paper-sizes.xml",
            Self::Category => file_name.ends_with(".category") || file_name == "categories.xml",
            Self::Vendor => file_name == "vendors.xml",
            Self::Template => {
                file_name.ends_with(".template") || file_name.ends_with("-templates.xml")
            }
        }
    }
}

/// Sorted paths of the data files of `kind` in `dir`.
///
/// A missing or unreadable directory yields no files.
pub fn data_files(lister: &dyn DirectoryLister, dir: &Path, kind: DataFileKind) -> Vec<PathBuf> {
    if !lister.exists(dir) {
        tracing::debug!(path = %dir.display(), "data directory does not exist");
        return Vec::new();
    }

    let mut names = match lister.file_names(dir) {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "cannot read data directory");
            return Vec::new();
        }
    };

    names.retain(|name| kind.matches(name));
    names.sort();
    names.into_iter().map(|name| dir.join(name)).collect()
}
