use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use dirsearch::presentation::{print_match, SearchSummary};
use dirsearch::{
    Config, DirectorySearcher, ErrorLogger, FileErrorPolicy, FileTypes, Logger, LoggerTrait,
    SearchOutcome,
};

/// 按后缀、文件名、大小或内容查找文件的命令行工具
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// 要搜索的目录路径
    root: PathBuf,

    #[clap(subcommand)]
    command: Command,

    /// 配置文件路径，不存在时会创建默认配置；省略时读取程序目录下的 config.toml
    #[clap(long)]
    config: Option<PathBuf>,

    /// 启用调试日志
    #[clap(long)]
    log: bool,

    /// 启用错误日志
    #[clap(long)]
    error_log: bool,

    /// 以结构化路径输出结果
    #[clap(long)]
    structured: bool,

    /// 文件读取失败时跳过而不是中止
    #[clap(long)]
    skip_errors: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 按后缀搜索 (例如 "db" 或 ".db")，不区分大小写
    Suffix {
        /// 为空时匹配没有扩展名的文件
        #[clap(default_value = "")]
        suffix: String,
    },
    /// 按完整文件名搜索，区分大小写
    Name { name: String },
    /// 按字节大小搜索
    Size {
        size: f64,
        /// 不对大小取整，精确比较
        #[clap(long)]
        exact: bool,
    },
    /// 按文件内容搜索
    Content {
        /// 要搜索的内容，省略时不匹配任何文件
        text: Option<String>,
        /// 要打开的文件类型，逗号分隔 (例如 "txt,md")
        #[clap(long, value_delimiter = ',')]
        types: Vec<String>,
    },
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load_or_default(args.config.as_deref())?;

    config.logging.debug_log |= args.log;
    config.logging.error_log |= args.error_log;
    config.display.structured_paths |= args.structured;
    if args.skip_errors {
        config.walk.on_file_error = FileErrorPolicy::Skip;
    }

    config.validate().context("配置无效")?;
    Ok(config)
}

/// 执行子命令对应的搜索，返回搜索类型和结果
fn run_search(
    searcher: &DirectorySearcher,
    command: &Command,
    config: &Config,
) -> Result<(&'static str, SearchOutcome)> {
    let style = config.path_style();

    let result = match command {
        Command::Suffix { suffix } => ("后缀", searcher.search_by_suffix(suffix, style)?),
        Command::Name { name } => ("文件名", searcher.search_by_name(name, style)?),
        Command::Size { size, exact } => ("大小", searcher.search_by_size(*size, !exact, style)?),
        Command::Content { text, types } => {
            let file_types = if types.is_empty() {
                config.file_types()
            } else {
                FileTypes::new(types)
            };
            ("内容", searcher.search_by_content(text.as_deref(), &file_types, style)?)
        }
    };

    Ok(result)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    // 初始化日志记录器
    let log_dir = &config.logging.log_dir;
    let logger = Arc::new(Logger::new(config.logging.debug_log, log_dir)?);
    let error_logger = Arc::new(ErrorLogger::new(config.logging.error_log, log_dir)?);

    let searcher = DirectorySearcher::new(&args.root)
        .with_context(|| format!("无法搜索 {}", args.root.display()))?
        .with_walk_options(config.walk_options())
        .with_logger(logger.clone())
        .with_error_logger(error_logger.clone());

    println!("在 {} 中搜索", args.root.display());
    println!("结构化路径: {}", config.display.structured_paths);
    println!("读取失败时: {:?}", config.walk.on_file_error);
    if logger.is_enabled() {
        println!("调试日志: {}", logger.log_path().display());
    }
    println!();

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("无效的进度条模板")?,
    );
    progress.set_message("正在遍历目录...");
    progress.enable_steady_tick(Duration::from_millis(100));

    let result = run_search(&searcher, &args.command, &config);
    progress.finish_and_clear();
    let (kind, outcome) = result?;

    if outcome.is_empty() {
        println!("没有找到匹配的文件");
    }
    for record in &outcome.matches {
        print_match(record, config.display.show_sizes)?;
    }

    SearchSummary::new(kind, &outcome).print()?;

    error_logger.print_error_summary();
    error_logger.finalize()?;

    Ok(())
}
