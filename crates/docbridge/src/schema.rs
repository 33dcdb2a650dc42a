//! Table metadata.
//!
//! Descriptors are read from the catalog on every lookup and widened in
//! memory while one request compiles its statement. Nothing here is cached
//! or shared between requests.

mod catalog;
pub use catalog::Catalog;

mod column;
pub use column::Column;

mod table;
pub use table::Table;

mod table_name;
pub use table_name::TableName;
