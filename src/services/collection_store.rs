//! 题目集合写回服务 - 业务能力层
//!
//! 只负责"安全地把集合写回文件"：备份 → 写入 → 校验 → 释放/恢复

use crate::error::{AppResult, CollectionError, PersistError};
use crate::infrastructure::BackupGuard;
use crate::models::{Collection, CollectionEntry};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// 实际写文件的能力
pub trait CollectionSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> impl Future<Output = io::Result<()>> + Send;
}

/// 直接写文件系统
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl CollectionSink for FsSink {
    async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, bytes).await
    }
}

/// 写回结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// 保留下来的备份
    pub backup: Option<PathBuf>,
    pub bytes_written: usize,
}

/// 题目集合写回服务
///
/// 职责：
/// - 写入前创建带时间戳的备份
/// - 写入后读回校验
/// - 任一步失败都先从备份恢复，再返回错误
pub struct CollectionStore<S = FsSink> {
    sink: S,
    keep_backup: bool,
}

impl CollectionStore<FsSink> {
    pub fn new(keep_backup: bool) -> Self {
        Self::with_sink(FsSink, keep_backup)
    }
}

impl<S: CollectionSink + Sync> CollectionStore<S> {
    pub fn with_sink(sink: S, keep_backup: bool) -> Self {
        Self { sink, keep_backup }
    }

    /// 把集合写回它的来源文件
    pub async fn save(&self, collection: &Collection) -> AppResult<SaveReport> {
        let bytes = to_json_bytes(&collection.entries)?;
        let path = collection.path();

        let guard = BackupGuard::create(path)
            .await
            .map_err(|source| PersistError::BackupFailed {
                path: path.display().to_string(),
                source,
            })?;
        info!("💾 已创建备份: {}", guard.backup_path().display());

        if let Err(source) = self.sink.write(path, &bytes).await {
            error!("❌ 写入失败: {}", source);
            restore(guard).await?;
            return Err(PersistError::WriteFailed {
                path: path.display().to_string(),
                source,
            }
            .into());
        }

        let written_ok = matches!(tokio::fs::read(path).await, Ok(read_back) if read_back == bytes);
        if !written_ok {
            error!("❌ 写入校验失败: {}", path.display());
            restore(guard).await?;
            return Err(PersistError::VerifyFailed {
                path: path.display().to_string(),
            }
            .into());
        }

        let backup = match guard.release(self.keep_backup).await {
            Ok(backup) => backup,
            Err(e) => {
                // 写入已经成功，删备份失败不影响结果
                tracing::warn!("删除备份失败: {}", e);
                None
            }
        };

        debug!("写入 {} 字节到 {}", bytes.len(), path.display());
        Ok(SaveReport {
            backup,
            bytes_written: bytes.len(),
        })
    }
}

async fn restore(guard: BackupGuard) -> AppResult<()> {
    let path = guard.original_path().display().to_string();
    let backup = guard.backup_path().display().to_string();
    guard
        .restore()
        .await
        .map_err(|source| PersistError::RestoreFailed {
            path: path.clone(),
            backup,
            source,
        })?;
    info!("↩️ 已从备份恢复: {}", path);
    Ok(())
}

/// 序列化为 2 空格缩进的 JSON，非 ASCII 字符原样输出
pub fn to_json_bytes(entries: &[CollectionEntry]) -> AppResult<Vec<u8>> {
    serde_json::to_vec_pretty(entries)
        .map_err(|source| CollectionError::SerializeFailed { source }.into())
}
