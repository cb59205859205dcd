//! Column-oriented table model used by every pipeline stage.

mod column;
mod table;
mod types;

pub use column::{Categorical, Column, ColumnData};
pub use table::Table;
pub use types::{Cell, CellKey, ColumnType};
