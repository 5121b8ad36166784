use std::path::Path;

use ignore::{DirEntry, WalkBuilder};
use serde::{Deserialize, Serialize};

use crate::domain::error::SearchError;
use crate::infrastructure::{ErrorLogger, ErrorType, LoggerTrait};

/// 单个文件检查失败时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileErrorPolicy {
    /// 中止整个搜索，不返回部分结果
    #[default]
    Abort,
    /// 记录到错误日志后继续
    Skip,
}

/// 遍历选项
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub follow_links: bool,
    pub include_hidden: bool,
    pub respect_gitignore: bool,
    /// 同一目录下的条目按文件名排序，保证遍历顺序可复现
    pub sort_by_name: bool,
    pub max_depth: Option<usize>,
    pub on_file_error: FileErrorPolicy,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            follow_links: false,
            include_hidden: true,
            respect_gitignore: false,
            sort_by_name: true,
            max_depth: None,
            on_file_error: FileErrorPolicy::Abort,
        }
    }
}

/// 判断遍历条目是否按文件处理
///
/// 目录和指向目录的符号链接不算文件；失效的符号链接算文件。
fn is_file_entry(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => false,
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        Some(_) => true,
        None => false,
    }
}

/// 按遍历顺序访问根目录下的每个文件，返回访问过的文件数
///
/// 根路径本身是文件时不产生任何条目。目录列举错误总是跳过并记录；
/// 回调返回的错误按 `on_file_error` 处理。
pub fn walk_files<F>(
    root: &Path,
    options: &WalkOptions,
    logger: &dyn LoggerTrait,
    error_logger: &ErrorLogger,
    mut visit: F,
) -> Result<u64, SearchError>
where
    F: FnMut(&Path) -> Result<(), SearchError>,
{
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(!options.include_hidden)
        .follow_links(options.follow_links)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .ignore(options.respect_gitignore)
        .parents(options.respect_gitignore)
        .max_depth(options.max_depth);

    if options.sort_by_name {
        builder.sort_by_file_name(|a, b| a.cmp(b));
    }

    let mut visited = 0u64;

    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                if logger.is_enabled() {
                    let _ = logger.log_message(&format!("遍历错误: {}", err));
                }
                let _ = error_logger.log_error(ErrorType::WalkListing, None, &err.to_string());
                continue;
            }
        };

        if entry.depth() == 0 || !is_file_entry(&entry) {
            continue;
        }

        visited += 1;

        if let Err(err) = visit(entry.path()) {
            if options.on_file_error == FileErrorPolicy::Skip && err.is_recoverable() {
                let error_type = match err {
                    SearchError::Metadata { .. } => ErrorType::FileMetadata,
                    _ => ErrorType::FileRead,
                };
                if logger.is_enabled() {
                    let _ = logger.log_file(entry.path(), None, "已跳过(读取失败)");
                }
                let _ = error_logger.log_error(error_type, Some(entry.path()), &err.to_string());
                continue;
            }
            return Err(err);
        }
    }

    Ok(visited)
}
