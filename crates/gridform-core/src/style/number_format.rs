//! Number format types

/// Number format for cell display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Custom format string
    Custom(String),
}

impl NumberFormat {
    /// Format used for date cells written without an explicit style
    pub const DATE: &'static str = "yyyy-mm-dd";
    /// Format used for date-time cells written without an explicit style
    pub const DATETIME: &'static str = "yyyy-mm-dd hh:mm:ss";

    /// Create a number format from a format string
    pub fn from_string<S: Into<String>>(format: S) -> Self {
        NumberFormat::Custom(format.into())
    }

    /// Get the format string
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::Custom(s) => s,
        }
    }

    /// Heuristic: contains date/time placeholders and no literal text
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::General => false,
            NumberFormat::Custom(s) => {
                let lower = s.to_lowercase();
                lower.chars().any(|c| matches!(c, 'y' | 'm' | 'd' | 'h' | 's'))
                    && !lower.contains('"')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formats() {
        assert!(NumberFormat::from_string(NumberFormat::DATE).is_date_format());
        assert!(NumberFormat::from_string(NumberFormat::DATETIME).is_date_format());
        assert!(!NumberFormat::from_string("0.00").is_date_format());
        assert!(!NumberFormat::General.is_date_format());
        assert_eq!(NumberFormat::General.format_string(), "General");
    }
}
