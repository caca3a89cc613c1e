//! 备份守卫 - 基础设施层
//!
//! 持有"改写前的文件副本"这一资源，只暴露恢复和释放能力

use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// 备份守卫
///
/// 职责：
/// - 改写前把原文件复制为 `<文件>.backup_<时间戳>`
/// - 失败时把备份移回原位置（恢复后内容与原文件逐字节一致）
/// - 成功时按配置保留或删除备份
/// - 不认识题目，也不关心写入内容
#[derive(Debug)]
pub struct BackupGuard {
    original: PathBuf,
    backup: PathBuf,
    settled: bool,
}

impl BackupGuard {
    /// 为 `original` 创建带时间戳的备份
    pub async fn create(original: &Path) -> io::Result<Self> {
        let backup = next_free_backup_path(original, Local::now()).await;
        fs::copy(original, &backup).await?;
        debug!("已创建备份: {}", backup.display());

        Ok(Self {
            original: original.to_path_buf(),
            backup,
            settled: false,
        })
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    pub fn original_path(&self) -> &Path {
        &self.original
    }

    /// 用备份覆盖原文件，备份随之消失
    pub async fn restore(mut self) -> io::Result<()> {
        self.settled = true;
        if fs::rename(&self.backup, &self.original).await.is_ok() {
            return Ok(());
        }

        // rename 失败时退回复制
        fs::copy(&self.backup, &self.original).await?;
        if let Err(e) = fs::remove_file(&self.backup).await {
            warn!("恢复后删除备份失败 {}: {}", self.backup.display(), e);
        }
        Ok(())
    }

    /// 写入已确认成功：保留或删除备份
    ///
    /// 返回保留下来的备份路径。
    pub async fn release(mut self, keep: bool) -> io::Result<Option<PathBuf>> {
        self.settled = true;
        if keep {
            return Ok(Some(self.backup.clone()));
        }
        fs::remove_file(&self.backup).await?;
        Ok(None)
    }
}

impl Drop for BackupGuard {
    fn drop(&mut self) {
        if !self.settled {
            warn!(
                "备份未被释放或恢复，保留在: {}",
                self.backup.display()
            );
        }
    }
}

/// 备份文件名：`<文件名>.backup_<YYYYmmdd_HHMMSS>`
pub fn backup_path_for(original: &Path, at: DateTime<Local>) -> PathBuf {
    let file_name = original
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    original.with_file_name(format!("{}.backup_{}", file_name, at.format("%Y%m%d_%H%M%S")))
}

/// 同一秒内多次备份时追加序号
async fn next_free_backup_path(original: &Path, at: DateTime<Local>) -> PathBuf {
    let base = backup_path_for(original, at);
    if !fs::try_exists(&base).await.unwrap_or(false) {
        return base;
    }

    let mut n = 1;
    loop {
        let candidate = PathBuf::from(format!("{}_{}", base.display(), n));
        if !fs::try_exists(&candidate).await.unwrap_or(false) {
            return candidate;
        }
        n += 1;
    }
}
