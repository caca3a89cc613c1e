//! 答案匹配服务 - 业务能力层
//!
//! 只负责"判断哪个选项是正确答案"，比较只在字符串层面进行

use crate::models::quiz::OptionSet;
use crate::models::record::Step;
use tracing::debug;

/// 数学公式分隔符，比较前去掉
const MATH_DELIMITER: char = '$';

/// 包含匹配时两边字符串都必须超过的长度
const MIN_CONTAINMENT_LEN: usize = 2;

/// 答案来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// 最终答案完全相等
    SolutionExact,
    /// 最终答案包含匹配
    SolutionContainment,
    /// 最后一步表达式等号右边
    LastStep,
}

/// 匹配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAnswer {
    pub label: char,
    pub source: AnswerSource,
}

/// 答案匹配服务
///
/// 职责：
/// - 先用 `solutions` 的最后一项比较（完全相等优先，其次包含匹配）
/// - 再用最后一步表达式等号右边的值比较（只接受完全相等）
/// - 都找不到时返回 `None`，不算错误
///
/// 包含匹配是宽松的启发式规则：短的数字答案可能是另一个选项的子串，
/// 所以两边都必须超过 [`MIN_CONTAINMENT_LEN`] 个字符。
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerResolver;

impl AnswerResolver {
    pub fn new() -> Self {
        Self
    }

    /// 返回正确选项的标签
    pub fn resolve<S: AsRef<str>>(&self, options: &OptionSet, solutions: &[S], steps: &[Step]) -> Option<char> {
        self.resolve_detailed(options, solutions, steps)
            .map(|answer| answer.label)
    }

    /// 同 [`AnswerResolver::resolve`]，额外返回答案来源
    pub fn resolve_detailed<S: AsRef<str>>(
        &self,
        options: &OptionSet,
        solutions: &[S],
        steps: &[Step],
    ) -> Option<ResolvedAnswer> {
        // 只看最后一项，前面的答案不参与匹配
        if let Some(last_solution) = solutions.last().map(AsRef::as_ref) {
            if let Some(answer) = self.match_solution(options, last_solution) {
                return Some(answer);
            }
        }

        let value = steps
            .last()
            .and_then(|step| step.expression.as_deref())
            .and_then(final_value)?;

        let label = self.match_exact(options, &normalize(value))?;
        debug!("根据最后一步 `{}` 匹配到选项 {}", value, label);
        Some(ResolvedAnswer {
            label,
            source: AnswerSource::LastStep,
        })
    }

    fn match_solution(&self, options: &OptionSet, solution: &str) -> Option<ResolvedAnswer> {
        let normalized = normalize(solution);
        if normalized.is_empty() {
            return None;
        }

        if let Some(label) = self.match_exact(options, &normalized) {
            return Some(ResolvedAnswer {
                label,
                source: AnswerSource::SolutionExact,
            });
        }

        let solution_len = normalized.chars().count();
        if solution_len <= MIN_CONTAINMENT_LEN {
            return None;
        }

        options.iter().find_map(|(label, text)| {
            let option = normalize(text);
            let long_enough = option.chars().count() > MIN_CONTAINMENT_LEN;
            let contained = normalized.contains(&option) || option.contains(&normalized);
            (long_enough && contained).then(|| {
                debug!("包含匹配: 答案 `{}` ~ 选项 {} `{}`", solution, label, text);
                ResolvedAnswer {
                    label,
                    source: AnswerSource::SolutionContainment,
                }
            })
        })
    }

    fn match_exact(&self, options: &OptionSet, normalized: &str) -> Option<char> {
        if normalized.is_empty() {
            return None;
        }
        options
            .iter()
            .find(|(_, text)| normalize(text) == normalized)
            .map(|(label, _)| label)
    }
}

/// 去掉所有空白和 `$`
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != MATH_DELIMITER)
        .collect()
}

/// 表达式最后一个 `=` 右边的值
fn final_value(expression: &str) -> Option<&str> {
    let (_, rhs) = expression.rsplit_once('=')?;
    let rhs = rhs.trim();
    (!rhs.is_empty()).then_some(rhs)
}
