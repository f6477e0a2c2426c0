#![allow(dead_code)]

use labelkit_templatedb::{DataDirs, TemplateDb, XmlWriteOptions};
use std::path::Path;
use tempfile::TempDir;

pub const PAPER_SIZES: &str = r#"<?xml version="1.0"?>
<Glabels-paper-sizes>
  <Paper-size id="US-Letter" _name="US Letter" width="8.5in" height="11in"/>
  <Paper-size id="A4" _name="A4" width="210mm" height="297mm"/>
</Glabels-paper-sizes>
"#;

pub const CATEGORIES: &str = r#"<?xml version="1.0"?>
<Glabels-categories>
  <Category id="label" _name="Labels"/>
  <Category id="card" _name="Business cards"/>
  <Category id="mail" _name="Mailing labels"/>
</Glabels-categories>
"#;

pub const VENDORS: &str = r#"<?xml version="1.0"?>
<Glabels-vendors>
  <Vendor name="Avery" url="http://www.avery.com"/>
  <Vendor name="Zweckform" url="http://www.avery-zweckform.com"/>
</Glabels-vendors>
"#;

pub const AVERY_TEMPLATES: &str = r#"<?xml version="1.0"?>
<Glabels-templates>
  <Template brand="Avery" part="5160" size="US-Letter" _description="Address labels">
    <Meta category="label"/>
    <Meta category="mail"/>
    <Label-rectangle id="0" width="2.625in" height="1in" round="0.0625in" x_waste="0" y_waste="0">
      <Markup-margin size="0.0625in"/>
      <Layout nx="3" ny="10" x0="0.1875in" y0="0.5in" dx="2.75in" dy="1in"/>
    </Label-rectangle>
    <Alias brand="Avery" part="8160"/>
  </Template>
  <Template brand="Avery" part="5371" size="US-Letter" _description="Business cards">
    <Meta category="card"/>
    <Label-rectangle id="0" width="3.5in" height="2in" round="0" x_waste="0" y_waste="0">
      <Layout nx="2" ny="5" x0="0.75in" y0="0.5in" dx="3.5in" dy="2in"/>
    </Label-rectangle>
  </Template>
  <Template brand="Avery" part="15160" equiv="5160"/>
</Glabels-templates>
"#;

pub const ZWECKFORM_TEMPLATES: &str = r#"<?xml version="1.0"?>
<Glabels-templates>
  <Template brand="Zweckform" part="L7160" size="A4" description="Address labels">
    <Meta category="label"/>
    <Label-round id="0" radius="20mm" waste="1mm">
      <Markup-circle x0="20mm" y0="20mm" radius="18mm"/>
      <Layout nx="4" ny="6" x0="10mm" y0="10mm" dx="48mm" dy="46mm"/>
    </Label-round>
    <Alias brand="avery" part="L7160"/>
  </Template>
</Glabels-templates>
"#;

/// A system/user directory pair inside a temporary directory.
pub struct Fixture {
    pub root: TempDir,
    pub dirs: DataDirs,
}

impl Fixture {
    /// Empty system and user directories. The user directory is not created.
    pub fn empty() -> Self {
        let root = TempDir::new().unwrap();
        let dirs = DataDirs::new(root.path().join("system"), root.path().join("user"));
        std::fs::create_dir_all(&dirs.system).unwrap();
        Self { root, dirs }
    }

    /// Papers, categories, vendors and two template files in the system directory.
    pub fn standard() -> Self {
        let fixture = Self::empty();
        fixture.system_file("paper-sizes.xml", PAPER_SIZES);
        fixture.system_file("categories.xml", CATEGORIES);
        fixture.system_file("vendors.xml", VENDORS);
        fixture.system_file("avery-us-templates.xml", AVERY_TEMPLATES);
        fixture.system_file("zweckform-iso-templates.xml", ZWECKFORM_TEMPLATES);
        fixture
    }

    pub fn system_file(&self, name: &str, content: &str) {
        write(&self.dirs.system, name, content);
    }

    pub fn user_file(&self, name: &str, content: &str) {
        write(&self.dirs.user, name, content);
    }

    pub fn db(&self) -> TemplateDb {
        TemplateDb::new(self.dirs.clone(), XmlWriteOptions::default())
    }
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

pub fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
}
