use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// 搜索过程中的错误类型
#[derive(Error, Debug)]
pub enum SearchError {
    /// 根路径不存在（构造时检查）
    #[error("路径不存在: {}", .0.display())]
    PathNotFound(PathBuf),

    /// 无法获取文件元数据（例如失效的符号链接）
    #[error("无法获取文件元数据 {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 无法读取文件内容
    #[error("无法读取文件 {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SearchError {
    pub(crate) fn metadata(path: &Path, source: io::Error) -> Self {
        Self::Metadata { path: path.to_path_buf(), source }
    }

    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read { path: path.to_path_buf(), source }
    }

    /// 出错的路径
    pub fn path(&self) -> &Path {
        match self {
            Self::PathNotFound(p) | Self::Metadata { path: p, .. } | Self::Read { path: p, .. } => p,
        }
    }

    /// 单个文件的错误可以跳过，构造错误不行
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Metadata { .. } | Self::Read { .. })
    }
}
