use serde::{Deserialize, Serialize};

/// Id of the synthetic category given to every user-defined template.
pub const CATEGORY_ID_USER_DEFINED: &str = "user-defined";

/// A template classification tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique ASCII id, e.g. "business-cards"
    pub id: String,
    /// Display name
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn user_defined(name: impl Into<String>) -> Self {
        Self::new(CATEGORY_ID_USER_DEFINED, name)
    }
}
