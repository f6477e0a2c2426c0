use serde::{Deserialize, Serialize};

/// A label manufacturer. Template brands are looked up here by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Display name, matching the brand used in templates
    pub name: String,
    /// Home page
    #[serde(default)]
    pub url: Option<String>,
}

impl Vendor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
