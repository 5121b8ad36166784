use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 搜索结果中路径的表示形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathStyle {
    /// 普通字符串
    #[default]
    Text,
    /// 结构化路径 (`PathBuf`)
    Structured,
}

/// 单个匹配文件；一次搜索的结果只会使用同一种表示形式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRecord {
    Text(String),
    Structured(PathBuf),
}

impl MatchRecord {
    pub fn new(path: &Path, style: PathStyle) -> Self {
        match style {
            PathStyle::Text => MatchRecord::Text(path.to_string_lossy().into_owned()),
            PathStyle::Structured => MatchRecord::Structured(path.to_path_buf()),
        }
    }

    pub fn as_path(&self) -> &Path {
        match self {
            MatchRecord::Text(text) => Path::new(text),
            MatchRecord::Structured(path) => path,
        }
    }

    pub fn style(&self) -> PathStyle {
        match self {
            MatchRecord::Text(_) => PathStyle::Text,
            MatchRecord::Structured(_) => PathStyle::Structured,
        }
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRecord::Text(text) => f.write_str(text),
            MatchRecord::Structured(path) => write!(f, "{}", path.display()),
        }
    }
}

/// 一次搜索的结果：按遍历顺序排列的匹配文件和本次耗时
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub matches: Vec<MatchRecord>,
    pub duration: Duration,
    pub scanned_files: u64,
}

impl SearchOutcome {
    /// 耗时（秒）
    pub fn elapsed_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.matches.iter().map(MatchRecord::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
