//! Conditional formatting
//!
//! A rule applies a differential [`Style`] to every cell of a range whose
//! condition holds. Region-wide decoration (for example an outline border
//! on every data cell) is expressed as one always-true rule instead of one
//! explicit style per cell.
//!
//! ```rust
//! use gridform_core::{CellRange, ConditionalFormatRule};
//! use gridform_core::style::{BorderLineStyle, Color, Style};
//!
//! let rule = ConditionalFormatRule::always(CellRange::parse("A1:D20").unwrap())
//!     .with_format(Style::new().border(BorderLineStyle::Thin, Color::BLACK));
//! assert_eq!(rule.formula, "TRUE");
//! ```

use crate::cell::CellRange;
use crate::style::Style;

/// A conditional formatting rule
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalFormatRule {
    /// Cells the rule applies to
    pub range: CellRange,
    /// Boolean expression evaluated per cell
    pub formula: String,
    /// Priority (lower = evaluated first)
    pub priority: u32,
    /// Format to apply when the rule matches
    pub format: Option<Style>,
}

impl ConditionalFormatRule {
    /// Rule whose format applies when `formula` evaluates to TRUE
    pub fn expression(range: CellRange, formula: impl Into<String>) -> Self {
        Self {
            range,
            formula: formula.into(),
            priority: 1,
            format: None,
        }
    }

    /// Rule that always matches
    pub fn always(range: CellRange) -> Self {
        Self::expression(range, "TRUE")
    }

    /// Set the format applied on match
    pub fn with_format(mut self, format: Style) -> Self {
        self.format = Some(format);
        self
    }
}
