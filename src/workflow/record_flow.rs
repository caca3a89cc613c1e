//! 题目转换流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整转换流程
//!
//! 流程顺序：
//! 1. 已有 quiz 字段 → 跳过（必要时补全答案）
//! 2. 预检查 A./B./C./D. 标记 → 不全则标记为 open
//! 3. 抽取选项 → 匹配答案 → 生成解析 → 改写题目

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{OptionSet, ProblemType, Record};
use crate::services::{AnswerResolver, ExplanationSynthesizer, OptionExtractor};
use crate::utils::logging::truncate_text;
use crate::workflow::record_ctx::RecordCtx;

/// 单道题的转换结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// 转换为选择题
    Converted {
        answer: Option<char>,
        explanation: bool,
    },
    /// 标记为开放题
    Open,
    /// 之前已经是选择题
    AlreadyQuiz { answer_filled: bool },
}

/// 题目转换流程
///
/// - 编排 抽取 → 匹配 → 解析 的顺序
/// - 只改写自己负责的字段，已有的 answer / explanation 不覆盖
/// - 不做 IO，单题失败不会影响其他题目
#[derive(Debug, Clone, Default)]
pub struct RecordFlow {
    extractor: OptionExtractor,
    resolver: AnswerResolver,
    synthesizer: ExplanationSynthesizer,
}

impl RecordFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&self, record: &mut Record, ctx: &RecordCtx) -> ConversionOutcome {
        if record.quiz().is_some() {
            return self.revisit_quiz(record, ctx);
        }

        let statement = record.statement();
        if !OptionExtractor::has_all_label_tokens(statement) {
            debug!("{} → OPEN (无 ABCD 标记)", ctx);
            record.set_type(ProblemType::Open);
            return ConversionOutcome::Open;
        }

        let Some(extraction) = self.extractor.extract(statement) else {
            info!(
                "{} ⚠ → OPEN (无法抽取选项): {}",
                ctx,
                truncate_text(statement, 80)
            );
            record.set_type(ProblemType::Open);
            return ConversionOutcome::Open;
        };

        let steps = record.steps();
        let answer = self
            .resolver
            .resolve(&extraction.options, &record.solutions(), &steps);
        let explanation = self.synthesizer.synthesize(&steps);

        record.set_type(ProblemType::Quiz);
        record.set_statement(extraction.statement);
        record.insert_after(
            "statement",
            "quiz",
            Value::String(extraction.options.to_quiz_block()),
        );

        let answer = answer.filter(|label| self.set_answer(record, *label, &extraction.options, ctx));
        let explanation = explanation
            .map(|text| record.set_if_absent("explanation", Value::String(text)))
            .unwrap_or(false);

        match answer {
            Some(label) => info!("{} ✓ → QUIZ (答案 {})", ctx, label),
            None => info!("{} ✓ → QUIZ (未能确定答案)", ctx),
        }

        ConversionOutcome::Converted {
            answer,
            explanation,
        }
    }

    /// 已经有 quiz 字段的题目：只补全缺失的 type / answer
    fn revisit_quiz(&self, record: &mut Record, ctx: &RecordCtx) -> ConversionOutcome {
        if !record.has_field("type") {
            record.set_type(ProblemType::Quiz);
        }

        let mut answer_filled = false;
        if !record.has_field("answer") {
            let resolved = record.quiz().and_then(OptionSet::parse_quiz_block).and_then(|options| {
                let label = self
                    .resolver
                    .resolve(&options, &record.solutions(), &record.steps())?;
                Some((label, options))
            });
            if let Some((label, options)) = resolved {
                answer_filled = self.set_answer(record, label, &options, ctx);
            }
        }

        debug!("{} 已是选择题，跳过", ctx);
        ConversionOutcome::AlreadyQuiz { answer_filled }
    }

    /// 写入答案（不覆盖已有答案），返回是否写入
    fn set_answer(&self, record: &mut Record, label: char, options: &OptionSet, ctx: &RecordCtx) -> bool {
        if let Some(existing) = record.answer() {
            let known = existing
                .chars()
                .next()
                .is_some_and(|c| existing.chars().count() == 1 && options.contains(c));
            if !known {
                warn!("{} 已有答案 `{}` 不在选项中，保持不变", ctx, existing);
            }
            return false;
        }
        record.set_if_absent("answer", Value::String(label.to_string()))
    }
}
