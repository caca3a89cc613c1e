//! 解析生成服务 - 业务能力层

use crate::models::record::Step;

/// 参与拼接的步骤数
const EXPLANATION_STEPS: usize = 3;

/// 用前几步的表达式拼出简短解析
///
/// 只是近似的说明，不是完整证明。
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationSynthesizer;

impl ExplanationSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// 前三步中带表达式的步骤，按原顺序用空格连接
    ///
    /// 没有步骤，或前三步都没有表达式时返回 `None`。
    pub fn synthesize(&self, steps: &[Step]) -> Option<String> {
        let parts: Vec<&str> = steps
            .iter()
            .take(EXPLANATION_STEPS)
            .filter_map(|step| step.expression.as_deref())
            .map(str::trim)
            .filter(|expr| !expr.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}
