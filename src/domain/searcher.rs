use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::content::{ContentQuery, FileTypes};
use crate::domain::criteria::{self, SizeQuery};
use crate::domain::error::SearchError;
use crate::domain::file_walker::{self, WalkOptions};
use crate::domain::outcome::{MatchRecord, PathStyle, SearchOutcome};
use crate::infrastructure::{ErrorLogger, Logger, LoggerTrait};

/// 绑定到一个根路径的目录搜索器
///
/// 每次搜索都从头遍历整个目录树，不缓存任何结果。
/// 上一次搜索的耗时保存在 `Cell` 中，因此搜索器不能在线程间共享。
pub struct DirectorySearcher {
    root: PathBuf,
    options: WalkOptions,
    logger: Arc<dyn LoggerTrait>,
    error_logger: Arc<ErrorLogger>,
    last_search: Cell<Option<Duration>>,
}

impl DirectorySearcher {
    /// 创建搜索器，根路径不存在时返回 `PathNotFound`
    ///
    /// 不检查根路径是否为目录；以文件为根时搜索结果总是为空。
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SearchError> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(SearchError::PathNotFound(root.to_path_buf()));
        }

        Ok(Self {
            root: root.to_path_buf(),
            options: WalkOptions::default(),
            logger: Arc::new(Logger::disabled()),
            error_logger: Arc::new(ErrorLogger::disabled()),
            last_search: Cell::new(None),
        })
    }

    pub fn with_walk_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn LoggerTrait>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_error_logger(mut self, error_logger: Arc<ErrorLogger>) -> Self {
        self.error_logger = error_logger;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 最近一次成功完成的搜索耗时，还没有搜索过时为 `None`
    pub fn last_search_time(&self) -> Option<Duration> {
        self.last_search.get()
    }

    /// 按后缀搜索，不区分大小写；空后缀匹配没有扩展名的文件
    pub fn search_by_suffix(&self, suffix: &str, style: PathStyle) -> Result<SearchOutcome, SearchError> {
        let suffix = criteria::normalize_suffix(suffix);
        self.run(&format!("按后缀搜索: {:?}", suffix), style, |path| {
            Ok(criteria::file_suffix(path) == suffix)
        })
    }

    /// 按完整文件名搜索（包括扩展名，区分大小写）
    pub fn search_by_name(&self, name: &str, style: PathStyle) -> Result<SearchOutcome, SearchError> {
        self.run(&format!("按文件名搜索: {}", name), style, |path| {
            Ok(criteria::name_matches(path, name))
        })
    }

    /// 按字节大小搜索
    pub fn search_by_size(
        &self,
        size: f64,
        round_sizes: bool,
        style: PathStyle,
    ) -> Result<SearchOutcome, SearchError> {
        let query = SizeQuery::new(size, round_sizes);
        self.run(&format!("按大小搜索: {} 字节 (取整: {})", size, round_sizes), style, |path| {
            let metadata = fs::metadata(path).map_err(|err| SearchError::metadata(path, err))?;
            Ok(query.matches(metadata.len()))
        })
    }

    /// 按文件内容搜索，只打开扩展名在 `file_types` 中的文件
    ///
    /// `content` 为 `None` 时不匹配任何文件，也不会遍历目录。
    pub fn search_by_content(
        &self,
        content: Option<&str>,
        file_types: &FileTypes,
        style: PathStyle,
    ) -> Result<SearchOutcome, SearchError> {
        let query = ContentQuery::new(content, file_types.clone());
        let label = format!(
            "按内容搜索: {:?} (类型: {})",
            content,
            file_types.iter().collect::<Vec<_>>().join(",")
        );

        if query.is_absent() {
            let start = Instant::now();
            if self.logger.is_enabled() {
                let _ = self.logger.log_message(&format!("{} - 没有搜索内容，跳过遍历", label));
            }
            return Ok(self.finish(Vec::new(), 0, start));
        }

        self.run(&label, style, |path| query.matches_file(path))
    }

    /// 遍历根目录，收集满足 `predicate` 的文件
    fn run<P>(&self, label: &str, style: PathStyle, mut predicate: P) -> Result<SearchOutcome, SearchError>
    where
        P: FnMut(&Path) -> Result<bool, SearchError>,
    {
        let start = Instant::now();
        let logger = self.logger.as_ref();

        if logger.is_enabled() {
            let _ = logger.log_message(&format!("{} | 根目录: {}", label, self.root.display()));
        }

        let mut matches = Vec::new();
        let scanned = file_walker::walk_files(
            &self.root,
            &self.options,
            logger,
            &self.error_logger,
            |path| {
                if predicate(path)? {
                    if logger.is_enabled() {
                        let _ = logger.log_file(path, None, "匹配");
                    }
                    matches.push(MatchRecord::new(path, style));
                }
                Ok(())
            },
        );

        let scanned = match scanned {
            Ok(scanned) => scanned,
            Err(err) => {
                if logger.is_enabled() {
                    let _ = logger.log_message(&format!("搜索中止: {}", err));
                }
                return Err(err);
            }
        };

        Ok(self.finish(matches, scanned, start))
    }

    fn finish(&self, matches: Vec<MatchRecord>, scanned_files: u64, start: Instant) -> SearchOutcome {
        let duration = start.elapsed();
        self.last_search.set(Some(duration));

        if self.logger.is_enabled() {
            let _ = self.logger.finalize(scanned_files, matches.len() as u64, duration);
        }

        SearchOutcome {
            matches,
            duration,
            scanned_files,
        }
    }
}
