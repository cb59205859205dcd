//! Rendering tables back to delimited text.

mod writer;

pub use writer::{render_cell, write_csv};
