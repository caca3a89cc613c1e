use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use quiz_convert::utils::logger;
use quiz_convert::{App, Config};

#[derive(Parser)]
#[command(
    name = "quiz-convert",
    version,
    about = "把题干中的 A./B./C./D. 选项转换为选择题"
)]
struct Cli {
    /// 单个集合文件，或要递归扫描的目录
    path: PathBuf,

    /// 目录模式下匹配的文件后缀
    #[arg(long)]
    suffix: Option<String>,

    /// 只统计，不写回文件
    #[arg(long)]
    dry_run: bool,

    /// 写入成功后删除备份
    #[arg(long)]
    discard_backup: bool,

    /// 同时处理的文件数量
    #[arg(long)]
    concurrency: Option<usize>,

    /// TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// 命令行参数优先级最高
    fn apply_to(&self, config: &mut Config) {
        if let Some(suffix) = &self.suffix {
            config.collection_suffix = suffix.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent_files = concurrency;
        }
        config.dry_run |= self.dry_run;
        config.verbose_logging |= self.verbose;
        if self.discard_backup {
            config.keep_backup = false;
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    // 加载配置
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let summary = App::initialize(config, cli.path).run().await?;

    Ok(!summary.has_failures())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("错误: {e:#}");
            process::exit(1);
        }
    }
}
