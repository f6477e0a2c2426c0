//! Label template database for LabelKit
//!
//! Describes physical label media (paper sizes, categories, vendors and templates),
//! loads their XML definitions from a system and a user data directory, and
//! computes where each label sits on a sheet.

pub mod db;
pub mod error;
pub mod i18n;
pub mod model;
pub mod registry;
pub mod source;
pub mod xml;

pub use db::{user_template_file_name, TemplateDb};
pub use error::{DbError, DbResult, DeleteError, RegisterError, XmlError, XmlResult};
pub use i18n::{GettextTranslator, MessageCatalog, NoTranslation, Translator, TEXT_DOMAIN};
pub use model::{
    is_other_paper_id, Category, Frame, FrameShape, Layout, Markup, Origin, Paper, Template,
    TemplateAlias, Vendor, CATEGORY_ID_USER_DEFINED, PAPER_ID_OTHER,
};
pub use registry::{CategoryRegistry, PaperRegistry, VendorRegistry};
pub use source::{DataDirs, DataFileKind, DirectoryLister, FsDirectoryLister};
pub use xml::{TemplateParseContext, XmlWriteOptions};
