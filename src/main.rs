use anyhow::Context;
use labelkit::{init_locale, init_logging, open_database, Config, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    tracing::info!(version = VERSION, build_date = BUILD_DATE, "labelkit starting");
    init_locale();

    let config_path = Config::default_path().context("locating configuration file")?;
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let db = open_database(&config);
    db.ensure_loaded().context("loading template database")?;

    let papers = db.get_paper_id_list()?;
    let categories = db.get_category_id_list()?;
    let templates = db.get_template_name_list_all(None, None, None)?;
    let brands = db.get_brand_list(None, None)?;
    let vendors = db.get_vendor_name_list()?;

    println!("system directory: {}", config.data.system_dir.display());
    println!("user directory:   {}", config.data.user_dir.display());
    println!("paper sizes:      {}", papers.len());
    println!("categories:       {}", categories.len());
    println!("brands:           {}", brands.len());
    println!("vendors:          {}", vendors.len());
    println!("template names:   {}", templates.len());

    db.print_known_papers()?;
    db.print_known_categories()?;
    db.print_known_vendors()?;
    db.print_known_templates()?;
    if let Some(template) = db.first_template()? {
        db.print_aliases(&template);
    }

    Ok(())
}
