use super::load_entries;
use crate::i18n::Translator;
use crate::model::Vendor;
use crate::source::{DataDirs, DataFileKind, DirectoryLister};
use crate::xml::read_vendors_from_file;
use labelkit_core::utf8_eq;

/// Known label vendors, in load order.
///
/// Unlike papers and categories, an empty vendor list is not an error.
#[derive(Debug, Default, Clone)]
pub struct VendorRegistry {
    vendors: Vec<Vendor>,
    loaded: bool,
}

impl VendorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vendors(vendors: Vec<Vendor>) -> Self {
        Self {
            vendors,
            loaded: true,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load vendor definitions once. Later calls do nothing.
    pub fn ensure_loaded(
        &mut self,
        dirs: &DataDirs,
        lister: &dyn DirectoryLister,
        translator: &dyn Translator,
    ) {
        if self.loaded {
            return;
        }

        let vendors = load_entries(dirs, lister, translator, DataFileKind::Vendor, read_vendors_from_file);
        if vendors.is_empty() {
            tracing::debug!("no vendor definitions found");
        } else {
            tracing::info!(count = vendors.len(), "loaded vendors");
        }
        *self = Self::from_vendors(vendors);
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    /// Vendor by case-insensitive name; `None` asks for the first vendor.
    pub fn lookup_by_name(&self, name: Option<&str>) -> Option<Vendor> {
        match name {
            None => self.vendors.first().cloned(),
            Some(name) => self.vendors.iter().find(|v| utf8_eq(&v.name, name)).cloned(),
        }
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.vendors.iter().any(|v| utf8_eq(&v.name, name))
    }

    pub fn name_list(&self) -> Vec<String> {
        self.vendors.iter().map(|v| v.name.clone()).collect()
    }

    pub fn print_known(&self) {
        tracing::debug!("known vendors:");
        for vendor in &self.vendors {
            tracing::debug!(
                "  name=\"{}\", url=\"{}\"",
                vendor.name,
                vendor.url.as_deref().unwrap_or_default()
            );
        }
    }
}
