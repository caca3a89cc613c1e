/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::orchestrator::ConversionStats;
use std::path::Path;
use tracing::{error, info};

/// 记录程序启动信息
pub fn log_startup(config: &Config, target: &Path) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 选择题格式转换");
    info!("📂 目标路径: {}", target.display());
    info!("📊 最大并发文件数: {}", config.max_concurrent_files);
    if config.dry_run {
        info!("🧪 试运行模式：不会写回任何文件");
    }
    info!("{}", "=".repeat(60));
}

/// 记录文件扫描结果
pub fn log_files_found(total: usize, suffix: &str) {
    info!("✓ 找到 {} 个 *{} 文件", total, suffix);
}

/// 记录单个文件开始处理
pub fn log_file_start(file_index: usize, total: usize, path: &Path, record_count: usize) {
    info!("\n{}", "─".repeat(60));
    info!("[文件 {}/{}] 🔍 {}", file_index, total, path.display());
    info!("[文件 {}/{}] 题目总数: {}", file_index, total, record_count);
}

/// 记录单个文件的转换统计
pub fn log_file_stats(file_index: usize, stats: &ConversionStats) {
    info!(
        "[文件 {}] 📊 选择题: {} (新转换 {}, 已有 {}), 开放题: {}, 找到答案: {}, 跳过: {}",
        file_index,
        stats.converted + stats.already_quiz,
        stats.converted,
        stats.already_quiz,
        stats.open,
        stats.answered,
        stats.skipped
    );
}

/// 记录单个文件处理失败
pub fn log_file_failed(file_index: usize, path: &Path, err: &dyn std::fmt::Display) {
    error!("[文件 {}] ❌ 处理失败 {}: {}", file_index, path.display(), err);
}

/// 打印最终统计信息
pub fn print_final_stats(
    stats: &ConversionStats,
    files_ok: usize,
    files_failed: usize,
    files_saved: usize,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 文件成功: {}/{}", files_ok, files_ok + files_failed);
    info!("❌ 文件失败: {}", files_failed);
    info!("💾 已写回: {}", files_saved);
    info!("📝 题目总数: {}", stats.total);
    info!("   • 选择题: {}", stats.converted + stats.already_quiz);
    info!("   • 其中新转换: {}", stats.converted);
    info!("   • 开放题: {}", stats.open);
    info!("   • 找到答案: {}", stats.answered);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("żółć", 4), "żółć");
        assert_eq!(truncate_text("żółćab", 4), "żółć...");
    }
}
