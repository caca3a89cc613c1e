//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文件处理器
//! - 管理应用生命周期（初始化、运行）
//! - 查找题目集合文件（单个文件或递归扫描目录）
//! - 控制并发数量（Semaphore）
//! - 隔离单个文件的失败
//! - 输出全局统计信息
//!
//! ### `file_processor` - 单个文件处理器
//! - 加载单个题目集合（Vec<CollectionEntry>）
//! - 创建并复用 RecordFlow
//! - 统计转换结果
//! - 有改动时通过 CollectionStore 安全写回
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PathBuf>)
//!     ↓
//! file_processor (处理 Vec<CollectionEntry>)
//!     ↓
//! workflow::RecordFlow (处理单个 Record)
//!     ↓
//! services (能力层：extract / resolve / explain / store)
//!     ↓
//! infrastructure (基础设施：BackupGuard)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，file_processor 管单个
//! 2. **顺序写入**：同一个文件只由一个任务读写
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod batch_processor;
pub mod file_processor;

// 重新导出主要类型
pub use batch_processor::{App, FileFailure, RunSummary};
pub use file_processor::{convert_all, process_file, ConversionStats, FileReport};
