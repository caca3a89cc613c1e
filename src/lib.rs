//! # Quiz Convert
//!
//! 把题目集合里嵌在题干中的 A./B./C./D. 选项抽取成独立的选择题
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 文件系统上的底层能力
//! - `BackupGuard` - 写入前的备份，失败时负责恢复
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，互相之间没有依赖
//! - `OptionExtractor` - 从题干中抽取选项
//! - `AnswerResolver` - 根据解答和步骤确定正确选项
//! - `ExplanationSynthesizer` - 由步骤生成简短解析
//! - `CollectionStore` - 安全写回集合文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整转换流程
//! - `RecordCtx` - 上下文封装（file_index + record_index + id）
//! - `RecordFlow` - 流程编排（extract → resolve → explain → rewrite）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文件处理器，管理并发和统计
//! - `orchestrator/file_processor` - 单个文件处理器，遍历题目并写回
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::BackupGuard;
pub use models::{Collection, CollectionEntry, OptionSet, ProblemType, Record};
pub use orchestrator::{process_file, App, ConversionStats, RunSummary};
pub use workflow::{ConversionOutcome, RecordCtx, RecordFlow};
