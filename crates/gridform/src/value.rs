//! Conversions between cell values and typed record fields

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use gridform_core::cell::{DATETIME_DISPLAY_FORMAT, DATE_DISPLAY_FORMAT};
use gridform_core::CellValue;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// A field type that can be written to and read from a cell.
///
/// `from_cell` returns `Ok(None)` for blank cells: `Empty`, or text that is
/// empty after trimming. `Err` carries a short description of why the cell
/// could not be converted.
pub trait CellType: Sized + Send + Sync + 'static {
    /// Cell value written on export
    fn to_cell(&self) -> CellValue;

    /// Typed value read on import
    fn from_cell(value: &CellValue) -> Result<Option<Self>, String>;
}

fn unexpected(expected: &str, value: &CellValue) -> String {
    format!("expected {expected}, found {} '{value}'", value.type_name())
}

impl CellType for String {
    fn to_cell(&self) -> CellValue {
        CellValue::String(self.clone())
    }

    fn from_cell(value: &CellValue) -> Result<Option<Self>, String> {
        match value {
            v if v.is_blank() => Ok(None),
            CellValue::String(s) | CellValue::Formula(s) => Ok(Some(s.clone())),
            CellValue::Number(_) | CellValue::Boolean(_) | CellValue::Date(_) => {
                Ok(Some(value.to_string()))
            }
            other => Err(unexpected("text", other)),
        }
    }
}

impl CellType for bool {
    fn to_cell(&self) -> CellValue {
        CellValue::Boolean(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Option<Self>, String> {
        match value {
            v if v.is_blank() => Ok(None),
            CellValue::Boolean(b) => Ok(Some(*b)),
            CellValue::Number(n) if *n == 0.0 || *n == 1.0 => Ok(Some(*n == 1.0)),
            CellValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Some(true)),
                "false" | "no" | "0" => Ok(Some(false)),
                _ => Err(format!("'{s}' is not a boolean")),
            },
            other => Err(unexpected("a boolean", other)),
        }
    }
}

/// Largest magnitude an `f64` holds without skipping integers (2^53)
const MAX_EXACT_INTEGER: u128 = 1 << 53;

macro_rules! impl_integer_cell_type {
    ($($ty:ty),*) => {
        $(
            impl CellType for $ty {
                fn to_cell(&self) -> CellValue {
                    // Wider values are written as text so no digit is lost
                    if (*self as i128).unsigned_abs() <= MAX_EXACT_INTEGER {
                        CellValue::Number(*self as f64)
                    } else {
                        CellValue::String(self.to_string())
                    }
                }

                fn from_cell(value: &CellValue) -> Result<Option<Self>, String> {
                    match value {
                        v if v.is_blank() => Ok(None),
                        CellValue::Number(n) => {
                            if n.fract() != 0.0 || !n.is_finite() {
                                return Err(format!("{n} is not a whole number"));
                            }
                            // MAX + 1 is a power of two, so the float bound is exact
                            let past_max = <$ty>::MAX as f64 + 1.0;
                            if *n < <$ty>::MIN as f64 || *n >= past_max {
                                return Err(format!(
                                    "{n} is out of range for {}",
                                    stringify!($ty)
                                ));
                            }
                            Ok(Some(*n as $ty))
                        }
                        CellValue::String(s) => s
                            .trim()
                            .parse::<$ty>()
                            .map(Some)
                            .map_err(|e| format!("'{s}': {e}")),
                        other => Err(unexpected("a whole number", other)),
                    }
                }
            }
        )*
    };
}

impl_integer_cell_type!(i32, i64, u32, u64);

impl CellType for f64 {
    fn to_cell(&self) -> CellValue {
        CellValue::Number(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Option<Self>, String> {
        match value {
            v if v.is_blank() => Ok(None),
            CellValue::Number(n) => Ok(Some(*n)),
            CellValue::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| format!("'{s}': {e}")),
            other => Err(unexpected("a number", other)),
        }
    }
}

impl CellType for Decimal {
    fn to_cell(&self) -> CellValue {
        // Only values whose float rendering parses back unchanged become numbers
        match self.to_f64() {
            Some(n) if n.to_string().parse::<Decimal>().ok() == Some(*self) => {
                CellValue::Number(n)
            }
            _ => CellValue::String(self.to_string()),
        }
    }

    fn from_cell(value: &CellValue) -> Result<Option<Self>, String> {
        // Parse the shortest rendering of the float, so 0.1 stays 0.1
        let text = match value {
            v if v.is_blank() => return Ok(None),
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.trim().to_string(),
            other => return Err(unexpected("a decimal", other)),
        };
        text.parse::<Decimal>()
            .map(Some)
            .map_err(|e| format!("'{text}': {e}"))
    }
}

impl CellType for NaiveDate {
    fn to_cell(&self) -> CellValue {
        CellValue::from(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Option<Self>, String> {
        match value {
            v if v.is_blank() => Ok(None),
            CellValue::Date(dt) => Ok(Some(dt.date())),
            CellValue::String(s) => NaiveDate::parse_from_str(s.trim(), DATE_DISPLAY_FORMAT)
                .map(Some)
                .map_err(|e| format!("'{s}': {e}")),
            other => Err(unexpected("a date", other)),
        }
    }
}

impl CellType for NaiveDateTime {
    fn to_cell(&self) -> CellValue {
        CellValue::Date(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Option<Self>, String> {
        match value {
            v if v.is_blank() => Ok(None),
            CellValue::Date(dt) => Ok(Some(*dt)),
            CellValue::String(s) => {
                let text = s.trim();
                NaiveDateTime::parse_from_str(text, DATETIME_DISPLAY_FORMAT)
                    .or_else(|_| {
                        NaiveDate::parse_from_str(text, DATE_DISPLAY_FORMAT)
                            .map(|d| d.and_time(NaiveTime::MIN))
                    })
                    .map(Some)
                    .map_err(|e| format!("'{s}': {e}"))
            }
            other => Err(unexpected("a date-time", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_cells_are_none() {
        assert_eq!(String::from_cell(&CellValue::string("  ")), Ok(None));
        assert_eq!(i32::from_cell(&CellValue::Empty), Ok(None));
        assert_eq!(NaiveDate::from_cell(&CellValue::string("")), Ok(None));
    }

    #[test]
    fn test_integers() {
        assert_eq!(i64::from_cell(&CellValue::Number(42.0)), Ok(Some(42)));
        assert_eq!(u32::from_cell(&CellValue::string(" 7 ")), Ok(Some(7)));
        assert!(i32::from_cell(&CellValue::Number(1.5)).is_err());
        assert!(u32::from_cell(&CellValue::Number(-1.0)).is_err());
        assert!(i32::from_cell(&CellValue::Boolean(true)).is_err());
        assert_eq!(12u64.to_cell(), CellValue::Number(12.0));
    }

    #[test]
    fn test_wide_integers_keep_every_digit() {
        let id: i64 = 9_007_199_254_740_993;
        assert_eq!(id.to_cell(), CellValue::string("9007199254740993"));
        assert_eq!(i64::from_cell(&id.to_cell()), Ok(Some(id)));
        assert_eq!(i64::from_cell(&i64::MIN.to_cell()), Ok(Some(i64::MIN)));
        assert_eq!(u64::from_cell(&u64::MAX.to_cell()), Ok(Some(u64::MAX)));
        assert_eq!((1i64 << 53).to_cell(), CellValue::Number(9_007_199_254_740_992.0));
        assert_eq!(i32::from_cell(&i32::MAX.to_cell()), Ok(Some(i32::MAX)));
    }

    #[test]
    fn test_integer_bounds_are_exclusive() {
        assert!(i64::from_cell(&CellValue::Number(9_223_372_036_854_775_808.0)).is_err());
        assert!(u64::from_cell(&CellValue::Number(18_446_744_073_709_551_616.0)).is_err());
        assert!(i32::from_cell(&CellValue::Number(2_147_483_648.0)).is_err());
        assert_eq!(
            i64::from_cell(&CellValue::Number(-9_223_372_036_854_775_808.0)),
            Ok(Some(i64::MIN))
        );
    }

    #[test]
    fn test_text_accepts_scalars() {
        assert_eq!(String::from_cell(&CellValue::Number(7.0)), Ok(Some("7".into())));
        assert_eq!(String::from_cell(&CellValue::string(" a ")), Ok(Some(" a ".into())));
        assert_eq!(
            String::from_cell(&CellValue::formula("total")),
            Ok(Some("=total".into()))
        );
    }

    #[test]
    fn test_booleans() {
        assert_eq!(bool::from_cell(&CellValue::string("Yes")), Ok(Some(true)));
        assert_eq!(bool::from_cell(&CellValue::Number(0.0)), Ok(Some(false)));
        assert!(bool::from_cell(&CellValue::Number(2.0)).is_err());
        assert!(bool::from_cell(&CellValue::string("maybe")).is_err());
    }

    #[test]
    fn test_decimal() {
        let price: Decimal = "19.99".parse().unwrap();
        assert_eq!(Decimal::from_cell(&price.to_cell()), Ok(Some(price)));
        assert_eq!(
            Decimal::from_cell(&CellValue::Number(0.1)),
            Ok(Some("0.1".parse().unwrap()))
        );
        assert!(Decimal::from_cell(&CellValue::string("abc")).is_err());

        let long: Decimal = "12345678901234567.89".parse().unwrap();
        assert_eq!(long.to_cell(), CellValue::string("12345678901234567.89"));
        assert_eq!(Decimal::from_cell(&long.to_cell()), Ok(Some(long)));
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let dt = date.and_hms_opt(13, 45, 10).unwrap();

        assert_eq!(NaiveDate::from_cell(&date.to_cell()), Ok(Some(date)));
        assert_eq!(NaiveDateTime::from_cell(&dt.to_cell()), Ok(Some(dt)));
        assert_eq!(
            NaiveDate::from_cell(&CellValue::string("2024-02-29")),
            Ok(Some(date))
        );
        assert_eq!(
            NaiveDateTime::from_cell(&CellValue::string("2024-02-29 13:45:10")),
            Ok(Some(dt))
        );
        assert_eq!(
            NaiveDateTime::from_cell(&CellValue::string("2024-02-29")),
            Ok(Some(date.and_time(NaiveTime::MIN)))
        );
        assert!(NaiveDate::from_cell(&CellValue::Number(45000.0)).is_err());
    }
}
