pub mod collection;
pub mod loaders;
pub mod problem_type;
pub mod quiz;
pub mod record;

pub use collection::Collection;
pub use loaders::{discover_collection_files, load_collection};
pub use problem_type::ProblemType;
pub use quiz::OptionSet;
pub use record::{CollectionEntry, Record, Step};
