//! Template database
//!
//! [`TemplateDb`] aggregates the paper, category and vendor registries and
//! every template found in the data directories. Loading happens once, on
//! the first query or on an explicit [`TemplateDb::ensure_loaded`]; a failed
//! load is not remembered, so the next call tries again.
//!
//! Every query hands out owned copies. Template lookups that can miss return
//! `Option`; callers wanting the old "always some template" behaviour fall
//! back to [`TemplateDb::first_template`] themselves.

use crate::error::{DbError, DbResult, DeleteError, RegisterError};
use crate::i18n::{NoTranslation, Translator};
use crate::model::{Category, Paper, Template, Vendor, CATEGORY_ID_USER_DEFINED};
use crate::registry::{CategoryRegistry, PaperRegistry, VendorRegistry};
use crate::source::{data_files, DataDirs, DataFileKind, DirectoryLister, FsDirectoryLister};
use crate::xml::{read_templates_from_file, write_templates_to_string, TemplateParseContext, XmlWriteOptions};
use labelkit_core::{part_name_cmp, utf8_casecmp, utf8_eq};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

const FULL_PAGE_BRAND: &str = "Generic";

/// File name under which a registered template is stored in the user directory.
pub fn user_template_file_name(brand: &str, part: &str) -> String {
    let sanitize = |s: &str| s.replace(['/', '\\'], "-");
    format!("{}_{}.template", sanitize(brand), sanitize(part))
}

/// Everything loaded from the data directories.
#[derive(Debug)]
struct Catalog {
    papers: PaperRegistry,
    categories: CategoryRegistry,
    vendors: VendorRegistry,
    templates: Vec<Template>,
    /// Case-folded "brand part" of every alias -> (template, alias) index
    names: HashMap<String, (usize, usize)>,
}

impl Catalog {
    fn new(
        papers: PaperRegistry,
        categories: CategoryRegistry,
        vendors: VendorRegistry,
        templates: Vec<Template>,
    ) -> Self {
        let mut catalog = Self {
            papers,
            categories,
            vendors,
            templates,
            names: HashMap::new(),
        };
        catalog.rebuild_names();
        catalog
    }

    fn rebuild_names(&mut self) {
        self.names.clear();
        for (t, template) in self.templates.iter().enumerate() {
            for (a, alias) in template.aliases().iter().enumerate() {
                self.names.entry(alias.name().to_lowercase()).or_insert((t, a));
            }
        }
    }

    fn find_by_name(&self, name: &str) -> Option<(usize, usize)> {
        self.names.get(&name.to_lowercase()).copied()
    }

    fn template_as_named(&self, (t, a): (usize, usize)) -> Template {
        let template = &self.templates[t];
        template.as_alias(&template.aliases()[a])
    }

    fn does_template_exist(&self, brand: &str, part: &str) -> bool {
        self.templates
            .iter()
            .any(|t| t.aliases().iter().any(|a| a.matches(brand, part)))
    }

    fn matching<'a>(
        &'a self,
        brand: Option<&'a str>,
        paper_id: Option<&'a str>,
        category_id: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Template> + 'a {
        self.templates.iter().filter(move |t| {
            brand.is_none_or(|b| t.brand() == b)
                && t.does_page_size_match(paper_id)
                && t.does_category_match(category_id)
        })
    }
}

/// Add `template` unless one of the already loaded templates answers to its name.
fn push_unique(templates: &mut Vec<Template>, template: Template) {
    let duplicate = templates
        .iter()
        .any(|t| t.aliases().iter().any(|a| a.matches(template.brand(), template.part())));
    if duplicate {
        tracing::info!(template = %template.name(), "duplicate template, keeping the first one");
    } else {
        templates.push(template);
    }
}

fn sort_names(names: &mut Vec<String>) {
    names.sort_by(|a, b| utf8_casecmp(a, b));
}

/// The template database.
pub struct TemplateDb {
    dirs: DataDirs,
    lister: Box<dyn DirectoryLister>,
    translator: Box<dyn Translator>,
    write_options: XmlWriteOptions,
    catalog: OnceLock<Catalog>,
}

impl std::fmt::Debug for TemplateDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateDb")
            .field("dirs", &self.dirs)
            .field("write_options", &self.write_options)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl TemplateDb {
    /// Database over `dirs`, reading the local filesystem without translation.
    pub fn new(dirs: DataDirs, write_options: XmlWriteOptions) -> Self {
        Self::with_services(
            dirs,
            write_options,
            Box::new(FsDirectoryLister),
            Box::new(NoTranslation),
        )
    }

    pub fn with_services(
        dirs: DataDirs,
        write_options: XmlWriteOptions,
        lister: Box<dyn DirectoryLister>,
        translator: Box<dyn Translator>,
    ) -> Self {
        Self {
            dirs,
            lister,
            translator,
            write_options,
            catalog: OnceLock::new(),
        }
    }

    pub fn dirs(&self) -> &DataDirs {
        &self.dirs
    }

    pub fn write_options(&self) -> XmlWriteOptions {
        self.write_options
    }

    pub fn set_write_options(&mut self, write_options: XmlWriteOptions) {
        self.write_options = write_options;
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// Load papers, categories and templates, in that order. Does nothing
    /// once a load has succeeded.
    pub fn ensure_loaded(&self) -> DbResult<()> {
        self.catalog().map(|_| ())
    }

    fn catalog(&self) -> DbResult<&Catalog> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog);
        }
        let catalog = self.load_catalog()?;
        Ok(self.catalog.get_or_init(|| catalog))
    }

    fn catalog_mut(&mut self) -> DbResult<&mut Catalog> {
        self.ensure_loaded()?;
        let missing = self.no_templates_error();
        self.catalog.get_mut().ok_or(missing)
    }

    fn no_templates_error(&self) -> DbError {
        DbError::NoTemplateDefinitions {
            system: self.dirs.system.display().to_string(),
            user: self.dirs.user.display().to_string(),
        }
    }

    fn load_catalog(&self) -> DbResult<Catalog> {
        let lister = self.lister.as_ref();
        let translator = self.translator.as_ref();

        let mut papers = PaperRegistry::new();
        papers.ensure_loaded(&self.dirs, lister, translator)?;

        let mut categories = CategoryRegistry::new();
        categories.ensure_loaded(&self.dirs, lister, translator)?;

        let mut vendors = VendorRegistry::new();
        vendors.ensure_loaded(&self.dirs, lister, translator);

        let mut templates: Vec<Template> = Vec::new();
        for (dir, user_defined) in [(&self.dirs.user, true), (&self.dirs.system, false)] {
            for path in data_files(lister, dir, DataFileKind::Template) {
                let ctx = TemplateParseContext::new(papers.papers(), &templates, translator);
                let found = match read_templates_from_file(&path, ctx) {
                    Ok(found) => found,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping template file");
                        continue;
                    }
                };
                tracing::debug!(path = %path.display(), count = found.len(), "read template file");
                for mut template in found {
                    if user_defined {
                        template.add_category(CATEGORY_ID_USER_DEFINED);
                    }
                    push_unique(&mut templates, template);
                }
            }
        }

        if templates.is_empty() {
            let err = self.no_templates_error();
            tracing::error!("{}", err);
            return Err(err);
        }
        let from_files = templates.len();

        for paper in papers.papers().iter().filter(|p| !p.is_other()) {
            push_unique(
                &mut templates,
                Template::full_page(
                    FULL_PAGE_BRAND,
                    format!("{}-Full-Page", paper.id),
                    format!("{} full page label", paper.name),
                    paper.id.clone(),
                    paper.width,
                    paper.height,
                ),
            );
        }

        tracing::info!(
            templates = from_files,
            full_page = templates.len() - from_files,
            "loaded templates"
        );
        Ok(Catalog::new(papers, categories, vendors, templates))
    }

    // Papers

    pub fn get_paper_id_list(&self) -> DbResult<Vec<String>> {
        Ok(self.catalog()?.papers.id_list())
    }

    pub fn get_paper_name_list(&self) -> DbResult<Vec<String>> {
        Ok(self.catalog()?.papers.name_list())
    }

    /// Paper by exact id; `None` gives the first paper.
    pub fn lookup_paper_from_id(&self, id: Option<&str>) -> DbResult<Option<Paper>> {
        Ok(self.catalog()?.papers.lookup_by_id(id))
    }

    /// Paper by case-insensitive name; `None` gives the first paper.
    pub fn lookup_paper_from_name(&self, name: Option<&str>) -> DbResult<Option<Paper>> {
        Ok(self.catalog()?.papers.lookup_by_name(name))
    }

    pub fn lookup_paper_id_from_name(&self, name: Option<&str>) -> DbResult<Option<String>> {
        Ok(self.catalog()?.papers.lookup_id_from_name(name))
    }

    pub fn lookup_paper_name_from_id(&self, id: Option<&str>) -> DbResult<Option<String>> {
        Ok(self.catalog()?.papers.lookup_name_from_id(id))
    }

    pub fn is_paper_id_known(&self, id: &str) -> DbResult<bool> {
        Ok(self.catalog()?.papers.is_known(id))
    }

    pub fn is_paper_id_other(&self, id: &str) -> bool {
        crate::model::is_other_paper_id(id)
    }

    // Categories

    pub fn get_category_id_list(&self) -> DbResult<Vec<String>> {
        Ok(self.catalog()?.categories.id_list())
    }

    pub fn get_category_name_list(&self) -> DbResult<Vec<String>> {
        Ok(self.catalog()?.categories.name_list())
    }

    pub fn lookup_category_from_id(&self, id: Option<&str>) -> DbResult<Option<Category>> {
        Ok(self.catalog()?.categories.lookup_by_id(id))
    }

    pub fn lookup_category_from_name(&self, name: Option<&str>) -> DbResult<Option<Category>> {
        Ok(self.catalog()?.categories.lookup_by_name(name))
    }

    pub fn lookup_category_id_from_name(&self, name: Option<&str>) -> DbResult<Option<String>> {
        Ok(self.catalog()?.categories.lookup_id_from_name(name))
    }

    pub fn lookup_category_name_from_id(&self, id: Option<&str>) -> DbResult<Option<String>> {
        Ok(self.catalog()?.categories.lookup_name_from_id(id))
    }

    pub fn is_category_id_known(&self, id: &str) -> DbResult<bool> {
        Ok(self.catalog()?.categories.is_known(id))
    }

    // Vendors

    pub fn get_vendor_name_list(&self) -> DbResult<Vec<String>> {
        Ok(self.catalog()?.vendors.name_list())
    }

    /// Vendor by case-insensitive name; `None` gives the first vendor.
    pub fn lookup_vendor_from_name(&self, name: Option<&str>) -> DbResult<Option<Vendor>> {
        Ok(self.catalog()?.vendors.lookup_by_name(name))
    }

    pub fn is_vendor_name_known(&self, name: &str) -> DbResult<bool> {
        Ok(self.catalog()?.vendors.is_known(name))
    }

    // Templates

    /// Every brand, from all aliases of the matching templates, deduplicated
    /// and sorted ignoring case.
    pub fn get_brand_list(
        &self,
        paper_id: Option<&str>,
        category_id: Option<&str>,
    ) -> DbResult<Vec<String>> {
        let catalog = self.catalog()?;
        let mut brands: Vec<String> = Vec::new();
        for template in catalog.matching(None, paper_id, category_id) {
            for alias in template.aliases() {
                if !brands.iter().any(|b| utf8_eq(b, &alias.brand)) {
                    brands.push(alias.brand.clone());
                }
            }
        }
        sort_names(&mut brands);
        Ok(brands)
    }

    /// One "brand part" per matching template, sorted ignoring case.
    pub fn get_template_name_list_unique(
        &self,
        brand: Option<&str>,
        paper_id: Option<&str>,
        category_id: Option<&str>,
    ) -> DbResult<Vec<String>> {
        let catalog = self.catalog()?;
        let mut names: Vec<String> = catalog
            .matching(brand, paper_id, category_id)
            .map(Template::name)
            .collect();
        sort_names(&mut names);
        Ok(names)
    }

    /// One "brand part" per alias of every matching template, sorted ignoring case.
    pub fn get_template_name_list_all(
        &self,
        brand: Option<&str>,
        paper_id: Option<&str>,
        category_id: Option<&str>,
    ) -> DbResult<Vec<String>> {
        let catalog = self.catalog()?;
        let mut names: Vec<String> = catalog
            .matching(brand, paper_id, category_id)
            .flat_map(|t| t.aliases().iter().map(|a| a.name()))
            .collect();
        sort_names(&mut names);
        Ok(names)
    }

    /// Names of all templates with the same paper and layout as `name`,
    /// excluding `name` itself, in part number order.
    pub fn get_similar_template_name_list(&self, name: &str) -> DbResult<Vec<String>> {
        let catalog = self.catalog()?;
        let Some((t, _)) = catalog.find_by_name(name) else {
            return Ok(Vec::new());
        };
        let reference = &catalog.templates[t];

        let mut names: Vec<String> = catalog
            .templates
            .iter()
            .filter(|other| reference.is_similar_to(other))
            .flat_map(|other| other.aliases().iter().map(|a| a.name()))
            .filter(|candidate| !utf8_eq(candidate, name))
            .collect();
        names.sort_by(|a, b| part_name_cmp(a, b));
        Ok(names)
    }

    /// The first template in load order.
    pub fn first_template(&self) -> DbResult<Option<Template>> {
        Ok(self.catalog()?.templates.first().cloned())
    }

    /// Template answering to `name` ("brand part", case-insensitive).
    ///
    /// `None` asks for the first template. A name that only matches an
    /// alias yields a copy carrying that alias's brand and part.
    pub fn lookup_template_from_name(&self, name: Option<&str>) -> DbResult<Option<Template>> {
        let catalog = self.catalog()?;
        Ok(match name {
            None => catalog.templates.first().cloned(),
            Some(name) => catalog.find_by_name(name).map(|idx| catalog.template_as_named(idx)),
        })
    }

    /// Template answering to `brand` and `part`; either being `None` asks
    /// for the first template.
    pub fn lookup_template_from_brand_part(
        &self,
        brand: Option<&str>,
        part: Option<&str>,
    ) -> DbResult<Option<Template>> {
        match (brand, part) {
            (Some(brand), Some(part)) => {
                self.lookup_template_from_name(Some(format!("{} {}", brand, part).as_str()))
            }
            _ => self.first_template(),
        }
    }

    pub fn does_template_exist(&self, brand: &str, part: &str) -> DbResult<bool> {
        Ok(self.catalog()?.does_template_exist(brand, part))
    }

    pub fn does_template_name_exist(&self, name: &str) -> DbResult<bool> {
        Ok(self.catalog()?.find_by_name(name).is_some())
    }

    /// Persist `template` to the user directory and add it to the database,
    /// tagged user-defined.
    ///
    /// Fails if any of its names is already taken. Nothing changes in
    /// memory unless the file was written.
    pub fn register_template(&mut self, template: &Template) -> Result<(), RegisterError> {
        let user_dir = self.dirs.user.clone();
        let options = self.write_options;
        let catalog = self.catalog_mut()?;

        // Every name the template answers to must be free, or a reload
        // would shadow the template that already owns it.
        if let Some(taken) = template
            .aliases()
            .iter()
            .find(|a| catalog.does_template_exist(&a.brand, &a.part))
        {
            return Err(RegisterError::BrandPartExists {
                brand: taken.brand.clone(),
                part: taken.part.clone(),
            });
        }
        if !catalog.papers.is_known(&template.paper_id) {
            tracing::warn!(paper = %template.paper_id, "cannot register template with unknown page size");
            return Err(RegisterError::BadPaperId(template.paper_id.clone()));
        }

        if let Err(e) = std::fs::create_dir_all(&user_dir) {
            tracing::warn!(path = %user_dir.display(), error = %e, "cannot create user template directory");
        }

        let path = user_dir.join(user_template_file_name(template.brand(), template.part()));
        let content = write_templates_to_string(std::slice::from_ref(template), options);
        std::fs::write(&path, content).map_err(|source| RegisterError::FileWrite {
            path: path.clone(),
            source,
        })?;

        let mut copy = template.clone();
        copy.add_category(CATEGORY_ID_USER_DEFINED);
        catalog.templates.push(copy);
        catalog.rebuild_names();

        tracing::info!(template = %template.name(), path = %path.display(), "registered template");
        Ok(())
    }

    /// Remove a user-defined template and its file.
    pub fn delete_template_by_name(&mut self, name: &str) -> Result<(), DeleteError> {
        let user_dir = self.dirs.user.clone();
        let catalog = self.catalog_mut()?;

        let Some((index, _)) = catalog.find_by_name(name) else {
            return Err(DeleteError::DoesNotExist(name.to_string()));
        };
        let template = &catalog.templates[index];
        if !template.is_user_defined() {
            return Err(DeleteError::NotUserDefined(name.to_string()));
        }

        let path: PathBuf = user_dir.join(user_template_file_name(template.brand(), template.part()));
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed template file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "template file already gone")
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "cannot remove template file"),
        }

        let removed = catalog.templates.remove(index);
        catalog.rebuild_names();
        tracing::info!(template = %removed.name(), "deleted template");
        Ok(())
    }

    pub fn delete_template_by_brand_part(&mut self, brand: &str, part: &str) -> Result<(), DeleteError> {
        self.delete_template_by_name(&format!("{} {}", brand, part))
    }

    // Debugging

    pub fn print_known_papers(&self) -> DbResult<()> {
        self.catalog()?.papers.print_known();
        Ok(())
    }

    pub fn print_known_categories(&self) -> DbResult<()> {
        self.catalog()?.categories.print_known();
        Ok(())
    }

    pub fn print_known_vendors(&self) -> DbResult<()> {
        self.catalog()?.vendors.print_known();
        Ok(())
    }

    pub fn print_known_templates(&self) -> DbResult<()> {
        let catalog = self.catalog()?;
        tracing::debug!("known templates:");
        for template in &catalog.templates {
            tracing::debug!(
                "  brand=\"{}\", part=\"{}\", description=\"{}\"",
                template.brand(),
                template.part(),
                template.description
            );
        }
        Ok(())
    }

    pub fn print_aliases(&self, template: &Template) {
        tracing::debug!("aliases of {}:", template.name());
        for alias in template.aliases() {
            tracing::debug!("  brand=\"{}\", part=\"{}\"", alias.brand, alias.part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_template_file_name() {
        assert_eq!(user_template_file_name("Acme", "100"), "Acme_100.template");
        assert_eq!(user_template_file_name("A/B", "1\\2"), "A-B_1-2.template");
    }

    #[test]
    fn test_push_unique_skips_alias_match() {
        let mut first = Template::new("Avery", "5160", "", "US-Letter", 612.0, 792.0);
        first.add_alias(crate::model::TemplateAlias::new("Avery", "8160"));
        let mut templates = vec![first];

        push_unique(&mut templates, Template::new("avery", "8160", "", "A4", 595.0, 842.0));
        push_unique(&mut templates, Template::new("Avery", "5161", "", "A4", 595.0, 842.0));
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[1].part(), "5161");
    }
}
