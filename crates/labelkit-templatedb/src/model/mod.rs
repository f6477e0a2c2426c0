//! Label template data model.

pub mod category;
pub mod frame;
pub mod paper;
pub mod template;
pub mod vendor;

pub use category::{Category, CATEGORY_ID_USER_DEFINED};
pub use frame::{Frame, FrameShape, Layout, Markup, Origin};
pub use paper::{is_other_paper_id, Paper, PAPER_ID_OTHER};
pub use template::{Template, TemplateAlias};
pub use vendor::Vendor;
