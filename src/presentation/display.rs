use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use humansize::{format_size, BINARY};

use crate::domain::{MatchRecord, SearchOutcome};

/// 格式化文件大小
pub fn format_file_size(size: u64) -> String {
    format_size(size, BINARY)
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}.{:03}s", secs, duration.subsec_millis())
    }
}

/// 渲染单条匹配结果（不含颜色）
///
/// 结构化路径分开显示所在目录和文件名。
pub fn render_match(record: &MatchRecord, size: Option<u64>) -> String {
    let mut line = match record {
        MatchRecord::Text(text) => text.clone(),
        MatchRecord::Structured(path) => {
            let parent = path.parent().map(|p| p.display().to_string()).unwrap_or_default();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{}  [{}]", name, parent)
        }
    };

    if let Some(size) = size {
        line.push_str(&format!("  ({})", format_file_size(size)));
    }

    line
}

/// 输出单条匹配结果
pub fn print_match(record: &MatchRecord, show_size: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();

    let size = if show_size {
        std::fs::metadata(record.as_path()).ok().map(|m| m.len())
    } else {
        None
    };

    writeln!(stdout, "\x1b[1;32m{}\x1b[0m", render_match(record, size))?;

    Ok(())
}

/// 搜索摘要
pub struct SearchSummary {
    pub kind: String,
    pub duration: Duration,
    pub scanned_files: u64,
    pub matched_files: u64,
}

impl SearchSummary {
    pub fn new(kind: &str, outcome: &SearchOutcome) -> Self {
        Self {
            kind: kind.to_string(),
            duration: outcome.duration,
            scanned_files: outcome.scanned_files,
            matched_files: outcome.matches.len() as u64,
        }
    }

    pub fn print(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();

        writeln!(stdout, "\n搜索摘要 ({}):", self.kind)?;
        writeln!(stdout, "----------------------------")?;
        writeln!(stdout, "总用时: {}", format_duration(self.duration))?;
        writeln!(stdout, "扫描文件: {}", self.scanned_files)?;
        writeln!(stdout, "匹配文件: {}", self.matched_files)?;

        Ok(())
    }
}
