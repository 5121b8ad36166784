//! 目录树搜索工具
//!
//! 给定根路径，按后缀、文件名、文件大小或文件内容递归查找文件，
//! 并返回每次搜索的耗时。
//!
//! ```no_run
//! use dirsearch::{DirectorySearcher, PathStyle};
//!
//! let searcher = DirectorySearcher::new("C:/Games").unwrap();
//! let outcome = searcher.search_by_suffix("db", PathStyle::Text).unwrap();
//! for record in &outcome.matches {
//!     println!("{}", record);
//! }
//! println!("{:?}", searcher.last_search_time());
//! ```

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

// 重新导出主要类型
pub use domain::{
    DirectorySearcher, FileErrorPolicy, FileText, FileTypes, MatchRecord, PathStyle, SearchError,
    SearchOutcome, WalkOptions,
};
pub use application::Config;
pub use infrastructure::{ErrorLogger, ErrorType, Logger, LoggerTrait};
pub use presentation::SearchSummary;
