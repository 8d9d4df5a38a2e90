//! Data types for the grid.

mod column;
mod menu;
mod options;
mod row;
mod selection;

pub use column::*;
pub use menu::*;
pub use options::*;
pub use row::*;
pub use selection::*;
