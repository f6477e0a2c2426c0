use serde::{Deserialize, Serialize};

/// Id of the synthetic paper entry standing for user-supplied dimensions.
pub const PAPER_ID_OTHER: &str = "Other";

/// A known paper size. Dimensions are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Unique ASCII id, e.g. "US-Letter"
    pub id: String,
    /// Display name, translated when the definition asked for it
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// PWG 5101.1 media name, when known
    #[serde(default)]
    pub pwg_size: Option<String>,
}

impl Paper {
    pub fn new(id: impl Into<String>, name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width,
            height,
            pwg_size: None,
        }
    }

    pub fn with_pwg_size(mut self, pwg_size: impl Into<String>) -> Self {
        self.pwg_size = Some(pwg_size.into());
        self
    }

    /// The synthetic "Other" entry: zero size, dimensions come from the template.
    pub fn other(name: impl Into<String>) -> Self {
        Self::new(PAPER_ID_OTHER, name, 0.0, 0.0)
    }

    pub fn is_other(&self) -> bool {
        is_other_paper_id(&self.id)
    }
}

/// True only for the exact id "Other" (case-sensitive).
pub fn is_other_paper_id(id: &str) -> bool {
    id == PAPER_ID_OTHER
}
