//! Column descriptors
//!
//! A [`Column<R, V>`] is built with closures that read and write a field of
//! type `V` on records of type `R`. Adding it to a sheet erases `V`, giving a
//! [`ColumnDescriptor<R>`] so columns of different value types live in one
//! list.
//!
//! ```
//! use gridform::{Column, ColumnDescriptor};
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! let age: ColumnDescriptor<Person> = Column::new("Details#Age")
//!     .getter(|p: &Person| p.age)
//!     .setter(|p: &mut Person, v| p.age = v)
//!     .max(150)
//!     .into();
//! assert_eq!(age.row_titles(), ["Details", "Age"]);
//! ```

use std::fmt::Display;

use gridform_core::CellValue;

use crate::style::StyleDescriptor;
use crate::value::CellType;

/// Separator between stacked header titles
pub const TITLE_SEPARATOR: char = '#';

/// Result of importing one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    /// Value stored on the record
    Accepted,
    /// Value stored; the column takes part in the row's uniqueness key.
    /// `None` means the cell was empty.
    KeyPart(Option<String>),
    /// Value refused with a message
    Rejected(String),
}

type Getter<R, V> = Box<dyn Fn(&R) -> Option<V> + Send + Sync>;
type Setter<R, V> = Box<dyn Fn(&mut R, Option<V>) + Send + Sync>;
type Validator<V> = Box<dyn Fn(&V) -> Result<(), String> + Send + Sync>;
type RangeCheck<V> = fn(&V, Option<&V>, Option<&V>) -> Result<(), String>;

/// Typed column builder
pub struct Column<R, V: CellType> {
    title: String,
    width: Option<f64>,
    hidden: bool,
    style: StyleDescriptor,
    binding: TypedBinding<R, V>,
}

struct TypedBinding<R, V> {
    getter: Option<Getter<R, V>>,
    setter: Option<Setter<R, V>>,
    required: bool,
    unique_key: bool,
    validator: Option<Validator<V>>,
    min: Option<V>,
    max: Option<V>,
    range_check: Option<RangeCheck<V>>,
}

impl<R, V: CellType> Column<R, V> {
    /// Column with a title; `#` separates stacked header rows
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            width: None,
            hidden: false,
            style: StyleDescriptor::default(),
            binding: TypedBinding {
                getter: None,
                setter: None,
                required: false,
                unique_key: false,
                validator: None,
                min: None,
                max: None,
                range_check: None,
            },
        }
    }

    /// Column width in characters
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Hide the column
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Style of the column's data cells
    pub fn style(mut self, style: StyleDescriptor) -> Self {
        self.style = style;
        self
    }

    /// Value written for a record on export
    pub fn getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&R) -> Option<V> + Send + Sync + 'static,
    {
        self.binding.getter = Some(Box::new(getter));
        self
    }

    /// Store an imported value on a record; `None` for an empty cell
    pub fn setter<F>(mut self, setter: F) -> Self
    where
        F: Fn(&mut R, Option<V>) + Send + Sync + 'static,
    {
        self.binding.setter = Some(Box::new(setter));
        self
    }

    /// Reject empty cells on import
    pub fn required(mut self, required: bool) -> Self {
        self.binding.required = required;
        self
    }

    /// Include the column in the row's duplicate-detection key
    pub fn unique_key(mut self, unique_key: bool) -> Self {
        self.binding.unique_key = unique_key;
        self
    }

    /// Extra check run on non-empty imported values
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&V) -> Result<(), String> + Send + Sync + 'static,
    {
        self.binding.validator = Some(Box::new(validator));
        self
    }
}

impl<R, V: CellType + PartialOrd + Display> Column<R, V> {
    /// Smallest accepted value
    pub fn min(mut self, min: V) -> Self {
        self.binding.min = Some(min);
        self.binding.range_check = Some(check_range::<V>);
        self
    }

    /// Largest accepted value
    pub fn max(mut self, max: V) -> Self {
        self.binding.max = Some(max);
        self.binding.range_check = Some(check_range::<V>);
        self
    }
}

fn check_range<V: PartialOrd + Display>(
    value: &V,
    min: Option<&V>,
    max: Option<&V>,
) -> Result<(), String> {
    if let Some(min) = min {
        if value < min {
            return Err(format!("must be >= {min}"));
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(format!("must be <= {max}"));
        }
    }
    Ok(())
}

trait Binding<R>: Send + Sync {
    fn export(&self, record: &R) -> CellValue;
    fn import(&self, record: &mut R, raw: &CellValue) -> CellOutcome;
    fn is_required(&self) -> bool;
    fn is_unique_key(&self) -> bool;
}

impl<R, V: CellType> Binding<R> for TypedBinding<R, V> {
    fn export(&self, record: &R) -> CellValue {
        self.getter
            .as_ref()
            .and_then(|getter| getter(record))
            .map_or(CellValue::Empty, |v| v.to_cell())
    }

    fn import(&self, record: &mut R, raw: &CellValue) -> CellOutcome {
        // Export-only columns are not read back
        let Some(setter) = &self.setter else {
            return CellOutcome::Accepted;
        };

        let value = match V::from_cell(raw) {
            Ok(value) => value,
            Err(detail) => return CellOutcome::Rejected(format!("type conversion error: {detail}")),
        };

        let Some(value) = value else {
            if self.required {
                return CellOutcome::Rejected("must not be empty".to_string());
            }
            setter(record, None);
            return if self.unique_key {
                CellOutcome::KeyPart(None)
            } else {
                CellOutcome::Accepted
            };
        };

        if let Some(check) = self.range_check {
            if let Err(message) = check(&value, self.min.as_ref(), self.max.as_ref()) {
                return CellOutcome::Rejected(message);
            }
        }
        if let Some(validator) = &self.validator {
            if let Err(message) = validator(&value) {
                return CellOutcome::Rejected(message);
            }
        }

        let key = self.unique_key.then(|| value.to_cell().to_string());
        setter(record, Some(value));
        match key {
            Some(key) => CellOutcome::KeyPart(Some(key)),
            None => CellOutcome::Accepted,
        }
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn is_unique_key(&self) -> bool {
        self.unique_key
    }
}

/// A column of a sheet, independent of its value type
pub struct ColumnDescriptor<R> {
    title: String,
    row_titles: Vec<String>,
    width: Option<f64>,
    hidden: bool,
    style: StyleDescriptor,
    column_index: u16,
    binding: Box<dyn Binding<R>>,
}

impl<R: 'static, V: CellType> From<Column<R, V>> for ColumnDescriptor<R> {
    fn from(column: Column<R, V>) -> Self {
        let row_titles = column
            .title
            .split(TITLE_SEPARATOR)
            .map(str::to_string)
            .collect();
        Self {
            title: column.title,
            row_titles,
            width: column.width,
            hidden: column.hidden,
            style: column.style,
            column_index: 0,
            binding: Box::new(column.binding),
        }
    }
}

impl<R> ColumnDescriptor<R> {
    /// Full title, segments joined by `#`
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Header titles from top to bottom
    pub fn row_titles(&self) -> &[String] {
        &self.row_titles
    }

    /// Title shown in the bottom header row
    pub fn last_title(&self) -> &str {
        self.row_titles.last().map_or("", String::as_str)
    }

    /// Titles for `rows` header rows, repeating the last segment
    pub fn padded_row_titles(&self, rows: usize) -> Vec<&str> {
        let mut titles: Vec<&str> = self.row_titles.iter().map(String::as_str).collect();
        let last = self.last_title();
        while titles.len() < rows {
            titles.push(last);
        }
        titles
    }

    /// Custom width
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Column is hidden
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Data cell style
    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    /// Grid column, assigned by the owning sheet
    pub fn column_index(&self) -> u16 {
        self.column_index
    }

    pub(crate) fn set_column_index(&mut self, index: u16) {
        self.column_index = index;
    }

    /// Empty cells are rejected on import
    pub fn is_required(&self) -> bool {
        self.binding.is_required()
    }

    /// Column takes part in duplicate detection
    pub fn is_unique_key(&self) -> bool {
        self.binding.is_unique_key()
    }

    /// Cell value for a record
    pub fn export(&self, record: &R) -> CellValue {
        self.binding.export(record)
    }

    /// Convert, validate and store a cell value on a record
    pub fn import(&self, record: &mut R, raw: &CellValue) -> CellOutcome {
        self.binding.import(record, raw)
    }
}

impl<R> std::fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("title", &self.title)
            .field("column_index", &self.column_index)
            .field("width", &self.width)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}
