use thiserror::Error;

/// 应用程序错误类型
///
/// 只覆盖"文件级"的错误：单条题目的抽取、匹配失败都不是错误，
/// 由流程层记为 `open` 或"未找到答案"。
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 题目集合结构错误
    #[error("数据结构错误: {0}")]
    Collection(#[from] CollectionError),
    /// 写回失败（已回滚）
    #[error("写入错误: {0}")]
    Persist(#[from] PersistError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 路径不存在
    #[error("路径不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 读取目录失败
    #[error("读取目录失败 ({path}): {source}")]
    ReadDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 题目集合结构错误
#[derive(Debug, Error)]
pub enum CollectionError {
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 顶层不是题目数组
    #[error("文件不包含题目列表 ({path}): 顶层类型为 {found}")]
    NotASequence { path: String, found: &'static str },
    /// 序列化失败
    #[error("JSON序列化失败: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },
}

/// 写回错误
///
/// 出现这些错误时，原文件已经从备份恢复。
#[derive(Debug, Error)]
pub enum PersistError {
    /// 创建备份失败（原文件未被改动）
    #[error("创建备份失败 ({path}): {source}")]
    BackupFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入失败，已从备份恢复
    #[error("写入失败 ({path})，已从备份恢复: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入后校验不一致，已从备份恢复
    #[error("写入校验失败 ({path})，已从备份恢复")]
    VerifyFailed { path: String },
    /// 恢复备份也失败了
    #[error("恢复备份失败 ({path} <- {backup}): {source}")]
    RestoreFailed {
        path: String,
        backup: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("无法读取配置文件 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值非法
    #[error("配置值非法: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 解析错误
    pub fn parse_failed(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Collection(CollectionError::ParseFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建"顶层不是数组"错误
    pub fn not_a_sequence(path: impl Into<String>, value: &serde_json::Value) -> Self {
        AppError::Collection(CollectionError::NotASequence {
            path: path.into(),
            found: json_type_name(value),
        })
    }

    /// 是否为结构性错误（解析失败或顶层类型不对）
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AppError::Collection(CollectionError::ParseFailed { .. })
                | AppError::Collection(CollectionError::NotASequence { .. })
        )
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_a_sequence_reports_found_type() {
        let err = AppError::not_a_sequence("a.json", &json!({"id": 1}));
        assert!(err.is_structural());
        assert!(err.to_string().contains("object"));
        assert!(err.to_string().contains("a.json"));
    }

    #[test]
    fn test_persist_error_is_not_structural() {
        let err: AppError = PersistError::VerifyFailed {
            path: "a.json".to_string(),
        }
        .into();
        assert!(!err.is_structural());
    }
}
