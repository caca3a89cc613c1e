//! 批量文件处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文件的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：记录启动信息
//! 2. **文件发现**：单个文件直接处理；目录则递归查找 `*_multistep.json`
//! 3. **并发控制**：使用 Semaphore 限制同时处理的文件数量
//! 4. **错误隔离**：单个文件失败只记录，不影响其他文件
//! 5. **全局统计**：汇总所有文件的处理结果
//!
//! 同一个文件只由一个任务处理，文件内的题目严格按顺序转换。

use crate::config::Config;
use crate::error::FileError;
use crate::models::discover_collection_files;
use crate::orchestrator::file_processor::{self, ConversionStats, FileReport};
use crate::utils::logging::{log_file_failed, log_files_found, log_startup, print_final_stats};
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, warn};

/// 应用主结构
pub struct App {
    config: Config,
    target: PathBuf,
}

/// 处理失败的文件
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
    /// 解析失败或顶层不是数组
    pub structural: bool,
}

/// 一次运行的汇总结果
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
    pub stats: ConversionStats,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn files_saved(&self) -> usize {
        self.reports.iter().filter(|r| r.saved).count()
    }
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, target: impl Into<PathBuf>) -> Self {
        let target = target.into();
        log_startup(&config, &target);
        Self { config, target }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        let files = self.collect_files().await?;

        if files.is_empty() {
            warn!(
                "⚠️ 没有找到 *{} 文件，程序结束",
                self.config.collection_suffix
            );
            return Ok(RunSummary::default());
        }
        log_files_found(files.len(), &self.config.collection_suffix);

        let summary = self.process_all_files(files).await;

        print_final_stats(
            &summary.stats,
            summary.reports.len(),
            summary.failures.len(),
            summary.files_saved(),
        );

        Ok(summary)
    }

    /// 确定要处理的文件列表
    async fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let metadata = tokio::fs::metadata(&self.target)
            .await
            .map_err(|_| FileError::NotFound {
                path: self.target.display().to_string(),
            })?;

        if metadata.is_file() {
            return Ok(vec![self.target.clone()]);
        }

        discover_collection_files(&self.target, &self.config.collection_suffix)
            .await
            .with_context(|| format!("无法扫描目录: {}", self.target.display()))
    }

    /// 处理所有文件
    async fn process_all_files(&self, files: Vec<PathBuf>) -> RunSummary {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_files));
        let total_files = files.len();

        let handles = files.into_iter().enumerate().map(|(idx, path)| {
            let semaphore = semaphore.clone();
            let config = self.config.clone();
            let file_index = idx + 1;

            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let result =
                    file_processor::process_file(&path, file_index, total_files, &config).await;
                (file_index, path, result)
            })
        });

        let mut summary = RunSummary::default();

        for joined in join_all(handles).await {
            match joined {
                Ok((_, _, Ok(report))) => {
                    summary.stats += report.stats;
                    summary.reports.push(report);
                }
                Ok((file_index, path, Err(e))) => {
                    log_file_failed(file_index, &path, &e);
                    summary.failures.push(FileFailure {
                        structural: e.is_structural(),
                        message: e.to_string(),
                        path,
                    });
                }
                Err(e) => {
                    error!("任务执行失败: {}", e);
                    summary.failures.push(FileFailure {
                        path: PathBuf::new(),
                        message: e.to_string(),
                        structural: false,
                    });
                }
            }
        }

        summary
    }
}
