use crate::models::record::{CollectionEntry, Record};
use std::path::{Path, PathBuf};

/// 从一个文件加载的题目集合
#[derive(Debug, Clone)]
pub struct Collection {
    pub path: PathBuf,
    pub entries: Vec<CollectionEntry>,
}

impl Collection {
    pub fn new(path: impl Into<PathBuf>, entries: Vec<CollectionEntry>) -> Self {
        Self {
            path: path.into(),
            entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 文件名，用于日志
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().filter_map(|entry| match entry {
            CollectionEntry::Record(record) => Some(record),
            CollectionEntry::Other(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
