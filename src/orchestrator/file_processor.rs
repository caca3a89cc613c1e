//! 单个文件处理器 - 编排层
//!
//! 遍历一个题目集合的所有题目，统计结果，按需写回

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{load_collection, CollectionEntry};
use crate::services::CollectionStore;
use crate::utils::logging::{log_file_start, log_file_stats};
use crate::workflow::{ConversionOutcome, RecordCtx, RecordFlow};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use tracing::info;

/// 转换统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// 集合项总数
    pub total: usize,
    /// 本次新转换为选择题
    pub converted: usize,
    /// 标记为开放题
    pub open: usize,
    /// 之前已经是选择题
    pub already_quiz: usize,
    /// 不是对象的集合项
    pub skipped: usize,
    /// 本次写入了答案
    pub answered: usize,
    /// 内容发生变化的题目
    pub changed: usize,
}

impl AddAssign for ConversionStats {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.converted += other.converted;
        self.open += other.open;
        self.already_quiz += other.already_quiz;
        self.skipped += other.skipped;
        self.answered += other.answered;
        self.changed += other.changed;
    }
}

/// 单个文件的处理报告
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub stats: ConversionStats,
    /// 是否写回了文件
    pub saved: bool,
    /// 保留下来的备份
    pub backup: Option<PathBuf>,
}

/// 转换集合中的全部题目（原地修改）
///
/// 单道题无论结果如何都不会中断整批处理。
pub fn convert_all(entries: &mut [CollectionEntry], flow: &RecordFlow, file_index: usize) -> ConversionStats {
    let mut stats = ConversionStats {
        total: entries.len(),
        ..Default::default()
    };

    for (i, entry) in entries.iter_mut().enumerate() {
        let record = match entry {
            CollectionEntry::Record(record) => record,
            CollectionEntry::Other(_) => {
                stats.skipped += 1;
                continue;
            }
        };

        let ctx = RecordCtx::new(file_index, i + 1, record.id());
        let before = record.clone();

        match flow.run(record, &ctx) {
            ConversionOutcome::Converted { answer, .. } => {
                stats.converted += 1;
                if answer.is_some() {
                    stats.answered += 1;
                }
            }
            ConversionOutcome::Open => stats.open += 1,
            ConversionOutcome::AlreadyQuiz { answer_filled } => {
                stats.already_quiz += 1;
                if answer_filled {
                    stats.answered += 1;
                }
            }
        }

        if *record != before {
            stats.changed += 1;
        }
    }

    stats
}

/// 处理单个文件：加载 → 转换 → 写回
///
/// # 参数
/// - `path`: 集合文件路径
/// - `file_index`: 文件索引（从1开始，用于日志）
/// - `total_files`: 本次处理的文件总数
/// - `config`: 配置
pub async fn process_file(
    path: &Path,
    file_index: usize,
    total_files: usize,
    config: &Config,
) -> AppResult<FileReport> {
    let mut collection = load_collection(path).await?;
    log_file_start(file_index, total_files, path, collection.len());

    let flow = RecordFlow::new();
    let stats = convert_all(&mut collection.entries, &flow, file_index);
    log_file_stats(file_index, &stats);

    let mut report = FileReport {
        path: path.to_path_buf(),
        stats,
        saved: false,
        backup: None,
    };

    if stats.changed == 0 {
        info!("[文件 {}] ℹ️ 没有需要写回的改动", file_index);
        return Ok(report);
    }

    if config.dry_run {
        info!(
            "[文件 {}] 🧪 试运行：{} 道题目有改动，未写回",
            file_index, stats.changed
        );
        return Ok(report);
    }

    let saved = CollectionStore::new(config.keep_backup)
        .save(&collection)
        .await?;
    info!("[文件 {}] ✅ 已保存: {}", file_index, collection.file_name());

    report.saved = true;
    report.backup = saved.backup;
    Ok(report)
}
