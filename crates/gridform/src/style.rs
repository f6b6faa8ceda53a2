//! Declarative cell styles
//!
//! A [`StyleDescriptor`] names only the attributes a caller cares about.
//! [`StyleDescriptor::style_key`] renders every attribute, set or not, into
//! a fixed-order signature that the [`StyleCache`](crate::StyleCache) uses
//! to hand out one stored style per distinct look.

use std::fmt::Display;

use gridform_core::style::{
    BorderLineStyle, BorderStyle, Color, HorizontalAlignment, NumberFormat, Style,
    VerticalAlignment,
};

/// Signature placeholder for an unset attribute
const ABSENT: &str = "~";

/// Optional visual attributes of a cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDescriptor {
    /// Line style of all four borders
    pub border: Option<BorderLineStyle>,
    /// Horizontal alignment
    pub horizontal: Option<HorizontalAlignment>,
    /// Vertical alignment
    pub vertical: Option<VerticalAlignment>,
    /// Solid background colour
    pub background: Option<Color>,
    /// Number or date format string
    pub number_format: Option<String>,
    /// Wrap text
    pub wrap: Option<bool>,
    /// Font family
    pub font_name: Option<String>,
    /// Font size in points
    pub font_size: Option<f64>,
    /// Font colour
    pub font_color: Option<Color>,
    /// Bold font
    pub bold: Option<bool>,
}

impl StyleDescriptor {
    /// Descriptor with no attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border line style
    pub fn border(mut self, border: BorderLineStyle) -> Self {
        self.border = Some(border);
        self
    }

    /// Set horizontal alignment
    pub fn horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = Some(align);
        self
    }

    /// Set vertical alignment
    pub fn vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = Some(align);
        self
    }

    /// Set background colour
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set number format
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }

    /// Set text wrapping
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = Some(wrap);
        self
    }

    /// Set font family
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set font colour
    pub fn font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    /// Set bold font
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// True when no attribute is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Canonical signature of every attribute.
    ///
    /// Equal attribute values give equal keys however the descriptor was
    /// built. Free-text attributes are escaped so they cannot collide with
    /// the separator or the absent marker.
    ///
    /// ```
    /// use gridform::StyleDescriptor;
    /// use gridform_core::style::Color;
    ///
    /// let a = StyleDescriptor::new().bold(true).background(Color::RED);
    /// let b = StyleDescriptor::new().background(Color::RED).bold(true);
    /// assert_eq!(a.style_key(), b.style_key());
    /// ```
    pub fn style_key(&self) -> String {
        let parts = [
            part(self.border.map(|b| b.as_str())),
            part(self.horizontal.map(|h| h.as_str())),
            part(self.vertical.map(|v| v.as_str())),
            part(self.background.map(|c| c.to_hex())),
            text_part(self.number_format.as_deref()),
            part(self.wrap),
            text_part(self.font_name.as_deref()),
            part(self.font_size),
            part(self.font_color.map(|c| c.to_hex())),
            part(self.bold),
        ];
        parts.join("|")
    }

    /// Overlay the set attributes on a copy of `base`
    pub fn apply_to(&self, base: &Style) -> Style {
        let mut style = base.clone();
        if let Some(border) = self.border {
            style.border = BorderStyle::all(border, Color::BLACK);
        }
        if let Some(horizontal) = self.horizontal {
            style.alignment.horizontal = horizontal;
        }
        if let Some(vertical) = self.vertical {
            style.alignment.vertical = vertical;
        }
        if let Some(color) = self.background {
            style.fill = Some(color);
        }
        if let Some(format) = &self.number_format {
            style.number_format = NumberFormat::from_string(format.as_str());
        }
        if let Some(wrap) = self.wrap {
            style.alignment.wrap_text = wrap;
        }
        if let Some(name) = &self.font_name {
            style.font.name = name.clone();
        }
        if let Some(size) = self.font_size {
            style.font.size = size;
        }
        if let Some(color) = self.font_color {
            style.font.color = color;
        }
        if let Some(bold) = self.bold {
            style.font.bold = bold;
        }
        style
    }
}

fn part<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

fn text_part(value: Option<&str>) -> String {
    match value {
        None => ABSENT.to_string(),
        Some(text) => {
            let mut escaped = String::with_capacity(text.len());
            for c in text.chars() {
                if matches!(c, '\\' | '|' | '~') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped
        }
    }
}
