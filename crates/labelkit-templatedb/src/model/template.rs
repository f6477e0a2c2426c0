use super::category::CATEGORY_ID_USER_DEFINED;
use super::frame::{Frame, Layout, Markup};
use labelkit_core::utf8_eq;
use serde::{Deserialize, Serialize};

/// Alternate brand/part name under which a template is sold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateAlias {
    pub brand: String,
    pub part: String,
}

impl TemplateAlias {
    pub fn new(brand: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            part: part.into(),
        }
    }

    /// Display name, "brand part".
    pub fn name(&self) -> String {
        format!("{} {}", self.brand, self.part)
    }

    /// Case-insensitive match on both fields.
    pub fn matches(&self, brand: &str, part: &str) -> bool {
        utf8_eq(&self.brand, brand) && utf8_eq(&self.part, part)
    }
}

/// One label sheet product.
///
/// The first alias is always the template's own brand/part. The name can
/// only change through [`Template::set_brand_part`], which keeps that so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TemplateRecord")]
pub struct Template {
    brand: String,
    part: String,
    pub equiv_part: Option<String>,
    pub description: String,
    pub paper_id: String,
    pub page_width: f64,
    pub page_height: f64,
    pub product_url: Option<String>,
    pub categories: Vec<String>,
    pub frames: Vec<Frame>,
    aliases: Vec<TemplateAlias>,
}

/// Serialized form of a [`Template`], before the primary alias is restored.
#[derive(Deserialize)]
struct TemplateRecord {
    brand: String,
    part: String,
    #[serde(default)]
    equiv_part: Option<String>,
    #[serde(default)]
    description: String,
    paper_id: String,
    page_width: f64,
    page_height: f64,
    #[serde(default)]
    product_url: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    frames: Vec<Frame>,
    #[serde(default)]
    aliases: Vec<TemplateAlias>,
}

impl From<TemplateRecord> for Template {
    fn from(record: TemplateRecord) -> Self {
        let mut template = Template::new(
            record.brand,
            record.part,
            record.description,
            record.paper_id,
            record.page_width,
            record.page_height,
        );
        template.equiv_part = record.equiv_part;
        template.product_url = record.product_url;
        template.categories = record.categories;
        template.frames = record.frames;
        for alias in record.aliases {
            template.add_alias(alias);
        }
        template
    }
}

impl Template {
    pub fn new(
        brand: impl Into<String>,
        part: impl Into<String>,
        description: impl Into<String>,
        paper_id: impl Into<String>,
        page_width: f64,
        page_height: f64,
    ) -> Self {
        let brand = brand.into();
        let part = part.into();
        let primary = TemplateAlias::new(brand.clone(), part.clone());
        Self {
            brand,
            part,
            equiv_part: None,
            description: description.into(),
            paper_id: paper_id.into(),
            page_width,
            page_height,
            product_url: None,
            categories: Vec::new(),
            frames: Vec::new(),
            aliases: vec![primary],
        }
    }

    /// Single full-page rectangular label for the given paper, with a 9pt margin.
    pub fn full_page(
        brand: impl Into<String>,
        part: impl Into<String>,
        description: impl Into<String>,
        paper_id: impl Into<String>,
        page_width: f64,
        page_height: f64,
    ) -> Self {
        let mut template = Self::new(brand, part, description, paper_id, page_width, page_height);
        let mut frame = Frame::rect("0", page_width, page_height, 0.0, 0.0, 0.0);
        frame.add_layout(Layout::single());
        frame.add_markup(Markup::Margin { size: 9.0 });
        template.add_frame(frame);
        template
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn part(&self) -> &str {
        &self.part
    }

    /// "brand part"
    pub fn name(&self) -> String {
        format!("{} {}", self.brand, self.part)
    }

    /// All names this template answers to, primary first.
    pub fn aliases(&self) -> &[TemplateAlias] {
        &self.aliases
    }

    /// Add an alias unless an identical one is already present.
    pub fn add_alias(&mut self, alias: TemplateAlias) {
        if !self.aliases.iter().any(|a| a.matches(&alias.brand, &alias.part)) {
            self.aliases.push(alias);
        }
    }

    /// Add a category id unless already present.
    pub fn add_category(&mut self, category_id: impl Into<String>) {
        let category_id = category_id.into();
        if !self.categories.iter().any(|c| utf8_eq(c, &category_id)) {
            self.categories.push(category_id);
        }
    }

    pub fn add_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Rename the template. The primary alias follows; the other aliases are dropped.
    pub fn set_brand_part(&mut self, brand: impl Into<String>, part: impl Into<String>) {
        self.brand = brand.into();
        self.part = part.into();
        self.aliases = vec![TemplateAlias::new(self.brand.clone(), self.part.clone())];
    }

    /// The first frame, which describes the label in every stock template.
    pub fn first_frame(&self) -> Option<&Frame> {
        self.frames.first()
    }

    pub fn is_user_defined(&self) -> bool {
        self.categories
            .iter()
            .any(|c| c == CATEGORY_ID_USER_DEFINED)
    }

    pub fn does_brand_match(&self, brand: Option<&str>) -> bool {
        match brand {
            None => true,
            Some(brand) => self.aliases.iter().any(|a| utf8_eq(&a.brand, brand)),
        }
    }

    pub fn does_page_size_match(&self, paper_id: Option<&str>) -> bool {
        match paper_id {
            None => true,
            Some(paper_id) => utf8_eq(&self.paper_id, paper_id),
        }
    }

    pub fn does_category_match(&self, category_id: Option<&str>) -> bool {
        match category_id {
            None => true,
            Some(category_id) => self.categories.iter().any(|c| utf8_eq(c, category_id)),
        }
    }

    /// Same product: brand and part compare equal ignoring case.
    pub fn do_templates_match(&self, other: &Template) -> bool {
        utf8_eq(&self.brand, &other.brand) && utf8_eq(&self.part, &other.part)
    }

    /// Same paper and the same label geometry, so one could stand in for the other.
    pub fn is_similar_to(&self, other: &Template) -> bool {
        if !utf8_eq(&self.paper_id, &other.paper_id)
            || self.page_width != other.page_width
            || self.page_height != other.page_height
        {
            return false;
        }

        match (self.first_frame(), other.first_frame()) {
            (Some(a), Some(b)) => a.is_similar_to(b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Copy of this template answering to `alias` as its primary name.
    ///
    /// The other aliases are kept, with `alias` moved to the front.
    pub(crate) fn as_alias(&self, alias: &TemplateAlias) -> Template {
        let mut copy = self.clone();
        copy.brand = alias.brand.clone();
        copy.part = alias.part.clone();
        copy.aliases = std::iter::once(alias.clone())
            .chain(
                self.aliases
                    .iter()
                    .filter(|a| !a.matches(&alias.brand, &alias.part))
                    .cloned(),
            )
            .collect();
        copy
    }
}
