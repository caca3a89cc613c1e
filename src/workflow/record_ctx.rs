//! 题目处理上下文
//!
//! 封装"我正在处理哪个文件的第几题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct RecordCtx {
    /// 文件索引（仅用于日志显示）
    pub file_index: usize,

    /// 题目在文件中的索引（从1开始）
    pub record_index: usize,

    /// 题目ID，缺失时为 None
    pub record_id: Option<String>,
}

impl RecordCtx {
    /// 创建新的题目上下文
    pub fn new(file_index: usize, record_index: usize, record_id: Option<String>) -> Self {
        Self {
            file_index,
            record_index,
            record_id,
        }
    }
}

impl Display for RecordCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.record_id {
            Some(id) => write!(f, "[文件 {}] {}. {}", self.file_index, self.record_index, id),
            None => write!(f, "[文件 {}] {}. <无ID>", self.file_index, self.record_index),
        }
    }
}
