use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use bstr::{BStr, ByteSlice};

use crate::domain::error::SearchError;

/// 内容搜索默认打开的文件类型
pub const DEFAULT_FILE_TYPES: [&str; 4] = ["txt", "md", "py", "sol"];

/// 允许进行内容搜索的扩展名集合（不带前导点，不区分大小写）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypes(BTreeSet<String>);

impl FileTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            types
                .into_iter()
                .map(|t| t.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        )
    }

    /// 检查文件扩展名是否在集合中
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| self.0.contains(&ext.to_string_lossy().to_lowercase()))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FileTypes {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_TYPES)
    }
}

/// 解码后的文件内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileText {
    /// 合法的 UTF-8 文本
    Utf8(String),
    /// 解码失败时的字节串转义表示
    ///
    /// 使用 bstr 的调试格式：带双引号，非法字节写成大写十六进制，
    /// 例如 `"caf\xE9"`。针对转义字节本身的搜索要按这个格式书写。
    Raw(String),
}

impl FileText {
    /// 先按 UTF-8 解码，失败则退回到字节串的转义表示
    pub fn decode(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => FileText::Utf8(text),
            Err(err) => FileText::Raw(format!("{:?}", BStr::new(err.as_bytes()))),
        }
    }

    /// 读取文件并解码
    pub fn read(path: &Path) -> Result<Self, SearchError> {
        let bytes = fs::read(path).map_err(|err| SearchError::read(path, err))?;
        Ok(Self::decode(bytes))
    }

    pub fn as_str(&self) -> &str {
        match self {
            FileText::Utf8(text) | FileText::Raw(text) => text,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, FileText::Raw(_))
    }
}

/// 内容搜索条件
#[derive(Debug, Clone)]
pub struct ContentQuery {
    /// 为空表示没有搜索内容，此时不匹配任何文件
    needle: Option<String>,
    file_types: FileTypes,
}

impl ContentQuery {
    pub fn new(content: Option<&str>, file_types: FileTypes) -> Self {
        Self {
            needle: content.map(str::to_string),
            file_types,
        }
    }

    /// 没有搜索内容时不必遍历目录
    pub fn is_absent(&self) -> bool {
        self.needle.is_none()
    }

    pub fn file_types(&self) -> &FileTypes {
        &self.file_types
    }

    /// 检查文本中是否包含搜索内容（按字面量查找子串）
    pub fn matches_text(&self, text: &FileText) -> bool {
        match &self.needle {
            Some(needle) => text.as_str().as_bytes().contains_str(needle),
            None => false,
        }
    }

    /// 检查文件是否匹配：扩展名不在集合中的文件不会被打开
    pub fn matches_file(&self, path: &Path) -> Result<bool, SearchError> {
        if self.is_absent() || !self.file_types.accepts(path) {
            return Ok(false);
        }
        let text = FileText::read(path)?;
        Ok(self.matches_text(&text))
    }
}
