use super::load_entries;
use crate::error::{DbError, DbResult};
use crate::i18n::Translator;
use crate::model::{is_other_paper_id, Paper};
use crate::source::{DataDirs, DataFileKind, DirectoryLister};
use crate::xml::read_papers_from_file;
use labelkit_core::utf8_eq;

/// Known paper sizes, in load order, ending with "Other".
#[derive(Debug, Default, Clone)]
pub struct PaperRegistry {
    papers: Vec<Paper>,
    loaded: bool,
}

impl PaperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an explicit list; "Other" is appended.
    pub fn from_papers(mut papers: Vec<Paper>, translator: &dyn Translator) -> Self {
        papers.push(Paper::other(translator.translate("Other")));
        Self {
            papers,
            loaded: true,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load paper definitions once. Later calls do nothing.
    pub fn ensure_loaded(
        &mut self,
        dirs: &DataDirs,
        lister: &dyn DirectoryLister,
        translator: &dyn Translator,
    ) -> DbResult<()> {
        if self.loaded {
            return Ok(());
        }

        let papers = load_entries(dirs, lister, translator, DataFileKind::Paper, read_papers_from_file);
        if papers.is_empty() {
            let err = DbError::NoPaperDefinitions {
                system: dirs.system.display().to_string(),
                user: dirs.user.display().to_string(),
            };
            tracing::error!("{}", err);
            return Err(err);
        }

        tracing::info!(count = papers.len(), "loaded paper sizes");
        *self = Self::from_papers(papers, translator);
        Ok(())
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    /// Paper by exact id; `None` asks for the first paper.
    pub fn lookup_by_id(&self, id: Option<&str>) -> Option<Paper> {
        match id {
            None => self.papers.first().cloned(),
            Some(id) => self.papers.iter().find(|p| p.id == id).cloned(),
        }
    }

    /// Paper by case-insensitive name; `None` asks for the first paper.
    pub fn lookup_by_name(&self, name: Option<&str>) -> Option<Paper> {
        match name {
            None => self.papers.first().cloned(),
            Some(name) => self.papers.iter().find(|p| utf8_eq(&p.name, name)).cloned(),
        }
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.papers.iter().any(|p| p.id == id)
    }

    pub fn is_other(&self, id: &str) -> bool {
        is_other_paper_id(id)
    }

    pub fn id_list(&self) -> Vec<String> {
        self.papers.iter().map(|p| p.id.clone()).collect()
    }

    pub fn name_list(&self) -> Vec<String> {
        self.papers.iter().map(|p| p.name.clone()).collect()
    }

    pub fn lookup_id_from_name(&self, name: Option<&str>) -> Option<String> {
        self.lookup_by_name(name).map(|p| p.id)
    }

    pub fn lookup_name_from_id(&self, id: Option<&str>) -> Option<String> {
        self.lookup_by_id(id).map(|p| p.name)
    }

    pub fn print_known(&self) {
        tracing::debug!("known paper sizes:");
        for paper in &self.papers {
            tracing::debug!(
                "  id=\"{}\", name=\"{}\", width={}pts, height={}pts",
                paper.id,
                paper.name,
                paper.width,
                paper.height
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::NoTranslation;

    fn registry() -> PaperRegistry {
        PaperRegistry::from_papers(
            vec![
                Paper::new("US-Letter", "US Letter", 612.0, 792.0),
                Paper::new("A4", "A4", 595.0, 842.0),
            ],
            &NoTranslation,
        )
    }

    #[test]
    fn test_other_is_last() {
        let registry = registry();
        assert_eq!(registry.id_list(), vec!["US-Letter", "A4", "Other"]);
        assert!(registry.is_known("Other"));
        assert!(registry.is_other("Other"));
        assert!(!registry.is_other("other"));
    }

    #[test]
    fn test_lookups() {
        let registry = registry();
        assert_eq!(registry.lookup_by_id(Some("A4")).map(|p| p.height), Some(842.0));
        assert_eq!(registry.lookup_by_id(Some("a4")), None);
        assert_eq!(registry.lookup_by_id(None).map(|p| p.id), Some("US-Letter".to_string()));
        assert_eq!(registry.lookup_id_from_name(Some("us letter")).as_deref(), Some("US-Letter"));
        assert_eq!(registry.lookup_name_from_id(Some("US-Letter")).as_deref(), Some("US Letter"));
        assert_eq!(registry.lookup_by_name(None).map(|p| p.id), Some("US-Letter".to_string()));
        assert_eq!(registry.lookup_by_name(Some("Tabloid")), None);
    }
}
