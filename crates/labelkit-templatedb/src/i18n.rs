//! Translation hook for localizable names
//!
//! Attributes written as `_name` or `_description` in data files are passed
//! through a [`Translator`] before they reach the registries. Hosts use
//! [`GettextTranslator`]; tests use [`MessageCatalog`].

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// Text domain holding the translated paper, category and vendor names.
pub const TEXT_DOMAIN: &str = "labelkit";

/// Looks up the display form of a literal message.
pub trait Translator: Send + Sync {
    /// Translate `msgid`, returning it unchanged when no translation exists.
    fn translate(&self, msgid: &str) -> String;
}

/// Identity translator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTranslation;

impl Translator for NoTranslation {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }
}

/// Translator backed by the system gettext catalogs of one text domain.
#[derive(Debug, Clone)]
pub struct GettextTranslator {
    domain: String,
}

impl GettextTranslator {
    /// Look messages up in `domain`, in the default locale directory.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Look messages up in `domain`, reading its catalogs from `locale_dir`.
    pub fn bind(domain: impl Into<String>, locale_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let domain = domain.into();
        gettextrs::bindtextdomain(domain.as_str(), locale_dir)?;
        gettextrs::bind_textdomain_codeset(domain.as_str(), "UTF-8")?;
        Ok(Self::new(domain))
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Default for GettextTranslator {
    fn default() -> Self {
        Self::new(TEXT_DOMAIN)
    }
}

impl Translator for GettextTranslator {
    fn translate(&self, msgid: &str) -> String {
        // gettext maps "" to the catalog header
        if msgid.is_empty() {
            return String::new();
        }
        gettextrs::dgettext(self.domain.as_str(), msgid)
    }
}

/// In-memory message catalog keyed by literal message id.
#[derive(Debug, Default, Clone)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, msgid: impl Into<String>, msgstr: impl Into<String>) {
        self.messages.insert(msgid.into(), msgstr.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl FromIterator<(String, String)> for MessageCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, msgid: &str) -> String {
        self.messages
            .get(msgid)
            .cloned()
            .unwrap_or_else(|| msgid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_falls_back_to_msgid() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("Other", "Autre");
        assert_eq!(catalog.translate("Other"), "Autre");
        assert_eq!(catalog.translate("User defined"), "User defined");
        assert_eq!(NoTranslation.translate("Other"), "Other");
    }

    #[test]
    fn test_gettext_without_catalog_returns_msgid() {
        let dir = tempfile::TempDir::new().unwrap();
        let translator = GettextTranslator::bind("labelkit-test", dir.path()).unwrap();
        assert_eq!(translator.domain(), "labelkit-test");
        assert_eq!(translator.translate("US Letter"), "US Letter");
        assert_eq!(translator.translate(""), "");
        assert_eq!(GettextTranslator::default().domain(), TEXT_DOMAIN);
    }
}
