//! Paper, category and vendor registries
//!
//! Each registry is filled once from the data directories, in system then
//! user order. Papers and categories end with a synthetic catch-all entry.

pub mod categories;
pub mod papers;
pub mod vendors;

pub use categories::CategoryRegistry;
pub use papers::PaperRegistry;
pub use vendors::VendorRegistry;

use crate::error::XmlResult;
use crate::i18n::Translator;
use crate::source::{data_files, DataDirs, DataFileKind, DirectoryLister};
use std::path::Path;

/// Read every file of `kind` from the system then the user directory.
///
/// Unreadable or malformed files are logged and contribute nothing.
pub(crate) fn load_entries<T>(
    dirs: &DataDirs,
    lister: &dyn DirectoryLister,
    translator: &dyn Translator,
    kind: DataFileKind,
    read: fn(&Path, &dyn Translator) -> XmlResult<Vec<T>>,
) -> Vec<T> {
    let mut entries = Vec::new();
    for dir in [&dirs.system, &dirs.user] {
        for path in data_files(lister, dir, kind) {
            match read(&path, translator) {
                Ok(mut found) => {
                    tracing::debug!(path = %path.display(), count = found.len(), "read data file");
                    entries.append(&mut found);
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping data file"),
            }
        }
    }
    entries
}
