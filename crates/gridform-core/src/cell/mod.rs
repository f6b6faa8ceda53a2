//! Cell-related types
//!
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] / [`CellRange`] - Positions and rectangular blocks
//! - [`CellData`] - Value plus explicit style

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub use storage::{CellData, CellStorage};
pub use value::{CellValue, DATETIME_DISPLAY_FORMAT, DATE_DISPLAY_FORMAT};
