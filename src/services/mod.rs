pub mod normalize;
pub use normalize::{RawManga, normalize};

pub mod ingest;
pub use ingest::{IngestPipeline, IngestReport};

pub mod query;
pub use query::{MangaListing, QueryService, build_filter};

pub mod catalog;
pub use catalog::{CatalogError, CatalogService, IngestSource, SearchOutcome, SourceReport};
