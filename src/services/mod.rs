pub mod answer_resolver;
pub mod collection_store;
pub mod explanation;
pub mod option_extractor;

pub use answer_resolver::{AnswerResolver, AnswerSource, ResolvedAnswer};
pub use collection_store::{CollectionSink, CollectionStore, FsSink, SaveReport};
pub use explanation::ExplanationSynthesizer;
pub use option_extractor::{Extraction, OptionExtractor};
