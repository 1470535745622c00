//! Domain types shared by every courtside crate: seasons, data categories,
//! tabular record sets and the column projections applied before loading.

pub mod category;
pub mod error;
pub mod minutes;
pub mod projection;
pub mod season;
pub mod table;

pub use category::{BoxscoreCategory, CategoryParseError};
pub use error::TableError;
pub use minutes::parse_minutes;
pub use projection::{ColumnKind, ColumnSpec, Projection, RawTable, RowFilter};
pub use season::{Season, SeasonParseError, SeasonType};
pub use table::Table;
