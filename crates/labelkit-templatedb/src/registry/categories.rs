use super::load_entries;
use crate::error::{DbError, DbResult};
use crate::i18n::Translator;
use crate::model::Category;
use crate::source::{DataDirs, DataFileKind, DirectoryLister};
use crate::xml::read_categories_from_file;
use labelkit_core::utf8_eq;

/// Known template categories, in load order, ending with "user-defined".
#[derive(Debug, Default, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    loaded: bool,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an explicit list; "user-defined" is appended.
    pub fn from_categories(mut categories: Vec<Category>, translator: &dyn Translator) -> Self {
        categories.push(Category::user_defined(translator.translate("User defined")));
        Self {
            categories,
            loaded: true,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load category definitions once. Later calls do nothing.
    pub fn ensure_loaded(
        &mut self,
        dirs: &DataDirs,
        lister: &dyn DirectoryLister,
        translator: &dyn Translator,
    ) -> DbResult<()> {
        if self.loaded {
            return Ok(());
        }

        let categories = load_entries(
            dirs,
            lister,
            translator,
            DataFileKind::Category,
            read_categories_from_file,
        );
        if categories.is_empty() {
            let err = DbError::NoCategoryDefinitions {
                system: dirs.system.display().to_string(),
                user: dirs.user.display().to_string(),
            };
            tracing::error!("{}", err);
            return Err(err);
        }

        tracing::info!(count = categories.len(), "loaded categories");
        *self = Self::from_categories(categories, translator);
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category by exact id; `None` asks for the first category.
    pub fn lookup_by_id(&self, id: Option<&str>) -> Option<Category> {
        match id {
            None => self.categories.first().cloned(),
            Some(id) => self.categories.iter().find(|c| c.id == id).cloned(),
        }
    }

    /// Category by case-insensitive name; `None` asks for the first category.
    pub fn lookup_by_name(&self, name: Option<&str>) -> Option<Category> {
        match name {
            None => self.categories.first().cloned(),
            Some(name) => self.categories.iter().find(|c| utf8_eq(&c.name, name)).cloned(),
        }
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    pub fn id_list(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.id.clone()).collect()
    }

    pub fn name_list(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn lookup_id_from_name(&self, name: Option<&str>) -> Option<String> {
        self.lookup_by_name(name).map(|c| c.id)
    }

    pub fn lookup_name_from_id(&self, id: Option<&str>) -> Option<String> {
        self.lookup_by_id(id).map(|c| c.name)
    }

    pub fn print_known(&self) {
        tracing::debug!("known categories:");
        for category in &self.categories {
            tracing::debug!("  id=\"{}\", name=\"{}\"", category.id, category.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::MessageCatalog;
    use crate::model::CATEGORY_ID_USER_DEFINED;

    #[test]
    fn test_user_defined_is_last_and_translated() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("User defined", "Benutzerdefiniert");
        let registry = CategoryRegistry::from_categories(
            vec![Category::new("label", "Labels"), Category::new("card", "Cards")],
            &catalog,
        );

        assert_eq!(registry.id_list().last().map(String::as_str), Some(CATEGORY_ID_USER_DEFINED));
        assert_eq!(
            registry.lookup_name_from_id(Some(CATEGORY_ID_USER_DEFINED)).as_deref(),
            Some("Benutzerdefiniert")
        );
        assert_eq!(registry.lookup_id_from_name(Some("CARDS")).as_deref(), Some("card"));
        assert_eq!(registry.lookup_by_id(None).map(|c| c.id).as_deref(), Some("label"));
        assert!(registry.is_known("label"));
        assert!(!registry.is_known("Label"));
    }
}
