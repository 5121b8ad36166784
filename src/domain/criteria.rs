use std::path::Path;

/// 规范化后缀：空字符串表示“无扩展名”，否则转为小写并补上前导点
pub fn normalize_suffix(suffix: &str) -> String {
    if suffix.is_empty() {
        return String::new();
    }

    let lower = suffix.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}

/// 获取文件的小写后缀（带点），没有扩展名时返回空字符串
///
/// `.bashrc` 这类点文件和以点结尾的文件名都视为没有扩展名。
pub fn file_suffix(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy().to_lowercase()),
        _ => String::new(),
    }
}

/// 检查文件名是否完全相等（区分大小写）
pub fn name_matches(path: &Path, name: &str) -> bool {
    path.file_name().map_or(false, |file_name| file_name == name)
}

/// 按文件大小搜索的条件
#[derive(Debug, Clone, Copy)]
pub struct SizeQuery {
    pub target: f64,
    pub round: bool,
}

impl SizeQuery {
    pub fn new(target: f64, round: bool) -> Self {
        Self { target, round }
    }

    /// 检查文件大小是否匹配
    ///
    /// 开启取整时两边都四舍五入（银行家舍入）后再比较，
    /// 否则按浮点数精确比较，带小数的目标值永远不会匹配。
    pub fn matches(&self, size: u64) -> bool {
        let size = size as f64;
        if self.round {
            size.round_ties_even() == self.target.round_ties_even()
        } else {
            size == self.target
        }
    }
}
