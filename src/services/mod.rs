// Service exports
pub mod catalog;
pub mod export;
pub mod session;

pub use catalog::{find_city, load_catalog, load_catalog_from, CatalogError};
pub use export::{to_csv_string, write_csv, ExportError};
pub use session::{decode_snapshot, encode_snapshot, SessionStore, SnapshotError};
