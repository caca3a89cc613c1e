use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 程序配置
///
/// 优先级：命令行参数 > 环境变量 > 配置文件 > 默认值
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 目录模式下需要处理的文件名后缀
    pub collection_suffix: String,
    /// 同时处理的文件数量
    pub max_concurrent_files: usize,
    /// 写入成功后是否保留备份
    pub keep_backup: bool,
    /// 只转换和统计，不写回文件
    pub dry_run: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection_suffix: "_multistep.json".to_string(),
            max_concurrent_files: 4,
            keep_backup: true,
            dry_run: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从默认值和环境变量构建配置
    pub fn from_env() -> AppResult<Self> {
        Self::default().apply_env()
    }

    /// 加载配置：可选的 TOML 文件，再叠加环境变量
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        match config_file {
            Some(path) => Self::from_toml_file(path)?.apply_env(),
            None => Self::from_env(),
        }
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(self) -> AppResult<Self> {
        let config = Self {
            collection_suffix: std::env::var("QUIZ_SUFFIX").unwrap_or(self.collection_suffix),
            max_concurrent_files: env_parse("MAX_CONCURRENT_FILES", "usize")?
                .unwrap_or(self.max_concurrent_files),
            keep_backup: env_parse("KEEP_BACKUP", "bool")?.unwrap_or(self.keep_backup),
            dry_run: env_parse("DRY_RUN", "bool")?.unwrap_or(self.dry_run),
            verbose_logging: env_parse("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
        };
        config.validate()?;
        Ok(config)
    }

    /// 校验配置取值
    pub fn validate(&self) -> AppResult<()> {
        if self.max_concurrent_files == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrent_files".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.collection_suffix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "collection_suffix".to_string(),
                value: format!("{:?}", self.collection_suffix),
            }
            .into());
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}
