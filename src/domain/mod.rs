pub mod content;
pub mod criteria;
pub mod error;
pub mod file_walker;
pub mod outcome;
pub mod searcher;

pub use content::{ContentQuery, FileText, FileTypes, DEFAULT_FILE_TYPES};
pub use criteria::SizeQuery;
pub use error::SearchError;
pub use file_walker::{FileErrorPolicy, WalkOptions};
pub use outcome::{MatchRecord, PathStyle, SearchOutcome};
pub use searcher::DirectorySearcher;
