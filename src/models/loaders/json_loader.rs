use crate::error::{AppError, AppResult, FileError};
use crate::models::collection::Collection;
use crate::models::record::CollectionEntry;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 JSON 文件加载题目集合
///
/// 顶层必须是数组，否则返回结构错误。
pub async fn load_collection(path: &Path) -> AppResult<Collection> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let entries = parse_collection(&content, path)?;
    Ok(Collection::new(path, entries))
}

/// 解析 JSON 文本为集合项列表
pub fn parse_collection(content: &str, path: &Path) -> AppResult<Vec<CollectionEntry>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AppError::parse_failed(path.display().to_string(), e))?;

    match value {
        Value::Array(items) => Ok(items.into_iter().map(CollectionEntry::from).collect()),
        other => Err(AppError::not_a_sequence(path.display().to_string(), &other)),
    }
}

/// 递归扫描目录，收集文件名以 `suffix` 结尾的文件
///
/// 结果按路径排序，保证每次运行的处理顺序一致。
pub async fn discover_collection_files(root: &Path, suffix: &str) -> AppResult<Vec<PathBuf>> {
    if !fs::try_exists(root).await.unwrap_or(false) {
        return Err(FileError::NotFound {
            path: root.display().to_string(),
        }
        .into());
    }

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(&dir).await.map_err(|source| FileError::ReadDirFailed {
            path: dir.display().to_string(),
            source,
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|source| {
            FileError::ReadDirFailed {
                path: dir.display().to_string(),
                source,
            }
        })? {
            let path = entry.path();
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(e) => {
                    tracing::warn!("无法读取文件类型 {}: {}", path.display(), e);
                    continue;
                }
            };

            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(suffix))
            {
                tracing::debug!("发现文件: {}", path.display());
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}
