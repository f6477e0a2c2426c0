//! Physical length units
//!
//! All geometry in LabelKit is stored in PostScript points (1/72 inch).
//! This module converts between points and the units accepted in template
//! files and user preferences: points, inches, millimeters, centimeters and
//! picas. Unit ids follow the absolute length units of CSS2.

use crate::error::UnitsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const POINTS_PER_POINT: f64 = 1.0;
const POINTS_PER_INCH: f64 = 72.0;
const POINTS_PER_MM: f64 = 2.83464566929;
const POINTS_PER_CM: f64 = 10.0 * POINTS_PER_MM;
const POINTS_PER_PICA: f64 = 1.0 / 12.0;

/// Length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    /// PostScript points
    #[serde(rename = "pt")]
    Point,
    /// Inches
    #[serde(rename = "in")]
    Inch,
    /// Millimeters
    #[serde(rename = "mm")]
    Mm,
    /// Centimeters
    #[serde(rename = "cm")]
    Cm,
    /// Picas
    #[serde(rename = "pc")]
    Pica,
}

impl Default for Units {
    fn default() -> Self {
        Self::Point
    }
}

impl Units {
    /// Every unit, in table order.
    pub const ALL: [Units; 5] = [
        Units::Point,
        Units::Inch,
        Units::Mm,
        Units::Cm,
        Units::Pica,
    ];

    /// Short id used as the suffix of length values ("pt", "in", ...).
    pub fn id(self) -> &'static str {
        match self {
            Self::Point => "pt",
            Self::Inch => "in",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::Pica => "pc",
        }
    }

    /// Untranslated display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "points",
            Self::Inch => "inches",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::Pica => "picas",
        }
    }

    pub fn points_per_unit(self) -> f64 {
        match self {
            Self::Point => POINTS_PER_POINT,
            Self::Inch => POINTS_PER_INCH,
            Self::Mm => POINTS_PER_MM,
            Self::Cm => POINTS_PER_CM,
            Self::Pica => POINTS_PER_PICA,
        }
    }

    pub fn units_per_point(self) -> f64 {
        1.0 / self.points_per_unit()
    }

    /// Resolve a unit from its id.
    ///
    /// An empty id means points. Ids are matched ASCII case-insensitively,
    /// then display names are tried as a fallback, which also accepts a few
    /// spellings found in legacy preference files.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        if id.is_empty() {
            return Some(Self::Point);
        }

        if let Some(units) = Self::ALL.iter().find(|u| u.id().eq_ignore_ascii_case(id)) {
            return Some(*units);
        }

        if let Some(units) = Self::ALL
            .iter()
            .find(|u| u.name().eq_ignore_ascii_case(id))
        {
            return Some(*units);
        }

        if id.eq_ignore_ascii_case("millimeters") {
            return Some(Self::Mm);
        }

        None
    }

    /// Convert a value expressed in these units to points.
    pub fn to_points(self, value: f64) -> f64 {
        match self {
            Self::Point => value,
            _ => value * self.points_per_unit(),
        }
    }

    /// Convert a value in points to these units.
    pub fn from_points(self, points: f64) -> f64 {
        match self {
            Self::Point => points,
            _ => points / self.points_per_unit(),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Units {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnitsError::UnknownUnit {
            value: 0.0,
            unit: s.to_string(),
        })
    }
}

/// Format a length given in points as `"<number><unit>"`.
///
/// The number uses the shortest representation that reads back to the
/// same `f64`, always with a `.` decimal separator.
pub fn format_length(points: f64, units: Units) -> String {
    format!("{}{}", units.from_points(points), units.id())
}

/// Parse a `"<number><unit>"` length into points.
///
/// A missing suffix means points. Input without a leading number reads as
/// zero. An unrecognized suffix yields [`UnitsError::UnknownUnit`] carrying
/// the bare number so callers can fall back to treating it as points.
pub fn parse_length(input: &str) -> Result<f64, UnitsError> {
    let (value, rest) = split_number(input);
    let Some(value) = value else {
        return Ok(0.0);
    };

    let unit = rest.trim();
    match Units::from_id(unit) {
        Some(units) => Ok(units.to_points(value)),
        None => Err(UnitsError::UnknownUnit {
            value,
            unit: unit.to_string(),
        }),
    }
}

/// Split the longest leading decimal number off `input`.
fn split_number(input: &str) -> (Option<f64>, &str) {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let frac_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
    }

    if digits == 0 {
        return (None, input);
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(value) => (Some(value), &s[end..]),
        Err(_) => (None, input),
    }
}
