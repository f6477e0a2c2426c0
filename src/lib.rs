//! # LabelKit
//!
//! Label template model, sheet layout engine and template database.
//!
//! ## Architecture
//!
//! LabelKit is organized as a workspace with multiple crates:
//!
//! 1. **labelkit-core** - Physical units and string comparison helpers
//! 2. **labelkit-settings** - Configuration file handling
//! 3. **labelkit-templatedb** - Paper, category and template model, XML codec,
//!    origin generation and the template database
//! 4. **labelkit** - Re-exports, logging setup and a small host binary
//!
//! ## Features
//!
//! - **Template Database**: system and user data directories, user templates
//!   override installed ones, a generic full-page template for every paper size
//! - **Sheet Layout**: every label origin on a sheet, in reading order
//! - **XML Codec**: paper, category and template files with unit conversion

pub use labelkit_core::{format_length, parse_length, part_name_cmp, utf8_casecmp, utf8_eq, Units};
pub use labelkit_settings::{Config, DataSettings, SettingsError, XmlSettings};
pub use labelkit_templatedb::xml;
pub use labelkit_templatedb::{
    Category, DataDirs, DbError, DeleteError, FsDirectoryLister, Frame, FrameShape,
    GettextTranslator, Layout, Markup, MessageCatalog, NoTranslation, Origin, Paper,
    RegisterError, Template, TemplateAlias, TemplateDb, Translator, Vendor, XmlWriteOptions,
    TEXT_DOMAIN,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Open a template database over the directories and units in `config`.
///
/// Localizable names are translated through the `labelkit` gettext domain.
/// Nothing is read until the first query or an explicit `ensure_loaded`.
pub fn open_database(config: &Config) -> TemplateDb {
    TemplateDb::with_services(
        DataDirs::new(config.data.system_dir.clone(), config.data.user_dir.clone()),
        XmlWriteOptions::new(config.xml.default_units),
        Box::new(FsDirectoryLister),
        Box::new(GettextTranslator::default()),
    )
}

/// Select the message locale from the environment (`LANG`, `LC_ALL`, ...).
pub fn init_locale() {
    if gettextrs::setlocale(gettextrs::LocaleCategory::LcAll, "").is_none() {
        tracing::warn!("locale from the environment is not supported, names stay untranslated");
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(())
}
