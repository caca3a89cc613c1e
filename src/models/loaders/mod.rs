pub mod json_loader;

pub use json_loader::{discover_collection_files, load_collection, parse_collection};
