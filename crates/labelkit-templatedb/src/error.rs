//! Error types for the template database crate.
//!
//! Only three kinds of failure reach callers: configuration-fatal load
//! failures ([`DbError`]), template registration ([`RegisterError`]) and
//! template deletion ([`DeleteError`]). File and node level problems found
//! while scanning data directories are logged and skipped; [`XmlError`]
//! describes them for code that reads or writes a single file directly.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a single XML data file.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not well-formed XML.
    #[error("Not an XML file: {0}")]
    Parse(#[from] roxmltree::Error),

    /// The document root is not the element expected for this kind of file.
    #[error("Wrong root node: expected \"{expected}\", found \"{found}\"")]
    WrongRoot {
        expected: &'static str,
        found: String,
    },

    /// The file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Configuration-fatal errors raised while loading the database.
///
/// Each variant means both data directories were scanned and no definition
/// of that kind was found, so the database cannot serve its callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// No paper size definitions were found.
    #[error("Unable to locate paper size definitions in {system} or {user}")]
    NoPaperDefinitions { system: String, user: String },

    /// No category definitions were found.
    #[error("Unable to locate category definitions in {system} or {user}")]
    NoCategoryDefinitions { system: String, user: String },

    /// No template definitions were found.
    #[error("Unable to locate any template files in {system} or {user}")]
    NoTemplateDefinitions { system: String, user: String },
}

/// Reasons a template could not be registered.
#[derive(Error, Debug)]
pub enum RegisterError {
    /// A template, or an alias of one, already answers to this brand and part.
    #[error("Template already exists: {brand} {part}")]
    BrandPartExists { brand: String, part: String },

    /// The template's paper id is not in the paper registry.
    #[error("Unknown paper id: {0}")]
    BadPaperId(String),

    /// The template file could not be written to the user directory.
    #[error("Failed to write template file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The database could not be loaded.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Reasons a template could not be deleted.
#[derive(Error, Debug)]
pub enum DeleteError {
    /// No template answers to the given name.
    #[error("Template does not exist: {0}")]
    DoesNotExist(String),

    /// Only user-defined templates may be deleted.
    #[error("Template is not user-defined: {0}")]
    NotUserDefined(String),

    /// The database could not be loaded.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Result type alias for single-file XML operations.
pub type XmlResult<T> = Result<T, XmlError>;
