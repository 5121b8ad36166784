use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{FileErrorPolicy, FileTypes, PathStyle, WalkOptions, DEFAULT_FILE_TYPES};

/// 应用程序配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 遍历相关配置
    pub walk: WalkConfig,
    /// 内容搜索配置
    pub content: ContentConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 显示相关配置
    pub display: DisplayConfig,
}

/// 遍历配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkConfig {
    /// 是否跟随符号链接
    pub follow_links: bool,
    /// 是否包含隐藏文件
    pub include_hidden: bool,
    /// 是否遵循 .gitignore 规则
    pub respect_gitignore: bool,
    /// 是否按文件名排序遍历
    pub sort_by_name: bool,
    /// 最大遍历深度，不设置表示不限
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// 单个文件读取失败时: "abort" 或 "skip"
    pub on_file_error: FileErrorPolicy,
}

/// 内容搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// 默认搜索的文件类型（不带点）
    pub default_file_types: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 是否写调试日志
    pub debug_log: bool,
    /// 是否写错误日志
    pub error_log: bool,
    /// 日志文件目录
    pub log_dir: PathBuf,
}

/// 显示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 以结构化路径返回结果
    pub structured_paths: bool,
    /// 输出结果时显示文件大小
    pub show_sizes: bool,
}

impl Default for Config {
    fn default() -> Self {
        let walk = WalkOptions::default();
        Self {
            walk: WalkConfig {
                follow_links: walk.follow_links,
                include_hidden: walk.include_hidden,
                respect_gitignore: walk.respect_gitignore,
                sort_by_name: walk.sort_by_name,
                max_depth: walk.max_depth,
                on_file_error: walk.on_file_error,
            },
            content: ContentConfig {
                default_file_types: DEFAULT_FILE_TYPES.iter().map(|t| t.to_string()).collect(),
            },
            logging: LoggingConfig {
                debug_log: false,
                error_log: false,
                log_dir: PathBuf::from("."),
            },
            display: DisplayConfig {
                structured_paths: false,
                show_sizes: true,
            },
        }
    }
}

impl Config {
    /// 从配置文件加载配置，如果文件不存在则创建默认配置文件
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            let config = Self::default();
            config.save_to_file(config_path)?;
            println!("已创建默认配置文件: {}", config_path.display());
            Ok(config)
        }
    }

    /// 加载配置：指定了路径时按 `load_or_create` 处理，
    /// 否则读取程序目录下的 config.toml，不存在时使用默认配置
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_or_create(path),
            None => {
                let path = Self::default_config_path()?;
                if path.exists() {
                    Self::load_from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// 从文件加载配置
    pub fn load_from_file(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("无法读取配置文件: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", config_path.display()))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("无法序列化配置")?;

        fs::write(config_path, content)
            .with_context(|| format!("无法写入配置文件: {}", config_path.display()))?;

        Ok(())
    }

    /// 获取配置文件的默认路径（程序所在目录下的 config.toml）
    pub fn default_config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("无法获取程序路径")?;

        let exe_dir = exe_path.parent().context("无法获取程序目录")?;

        Ok(exe_dir.join("config.toml"))
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.content.default_file_types.is_empty() {
            anyhow::bail!("default_file_types 不能为空");
        }

        if let Some(bad) = self
            .content
            .default_file_types
            .iter()
            .find(|t| t.is_empty() || t.starts_with('.'))
        {
            anyhow::bail!("文件类型不能为空或以点开头: {:?}", bad);
        }

        if self.walk.max_depth == Some(0) {
            anyhow::bail!("max_depth 必须大于 0");
        }

        Ok(())
    }

    /// 转换为遍历选项
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            follow_links: self.walk.follow_links,
            include_hidden: self.walk.include_hidden,
            respect_gitignore: self.walk.respect_gitignore,
            sort_by_name: self.walk.sort_by_name,
            max_depth: self.walk.max_depth,
            on_file_error: self.walk.on_file_error,
        }
    }

    /// 内容搜索的默认文件类型
    pub fn file_types(&self) -> FileTypes {
        FileTypes::new(&self.content.default_file_types)
    }

    pub fn path_style(&self) -> PathStyle {
        if self.display.structured_paths {
            PathStyle::Structured
        } else {
            PathStyle::Text
        }
    }
}
