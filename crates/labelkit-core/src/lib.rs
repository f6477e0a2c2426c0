//! # LabelKit Core
//!
//! Units and string utilities shared by the LabelKit crates.

pub mod error;
pub mod strings;
pub mod units;

pub use error::{UnitsError, UnitsResult};
pub use strings::{part_name_cmp, utf8_casecmp, utf8_eq};
pub use units::{format_length, parse_length, Units};
