//! Column metadata

use crate::style::StyleId;

/// Per-column settings of a worksheet
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Custom width in characters (None = sheet default)
    pub width: Option<f64>,
    /// Column is hidden
    pub hidden: bool,
    /// Style applied to cells in this column that have no explicit style
    pub default_style: Option<StyleId>,
}

impl Column {
    /// Check if this column has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.width.is_some() || self.hidden || self.default_style.is_some()
    }
}
