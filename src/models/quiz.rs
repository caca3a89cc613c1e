//! 选择题选项集合

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static QUIZ_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-D])\.\s*(.+)$").expect("quiz line pattern is valid"));

/// 一组带标签的选项
///
/// 标签唯一，且从 A 开始连续（A、B、C 或 A、B、C、D）。
/// 迭代顺序总是标签顺序，和原文出现顺序无关。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    options: BTreeMap<char, String>,
}

impl OptionSet {
    /// 从 (标签, 文本) 对构建选项集合
    ///
    /// 标签重复、不从 A 开始或不连续时返回 `None`。
    pub fn from_pairs<I, S>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut options = BTreeMap::new();
        for (label, text) in pairs {
            if options.insert(label, text.into()).is_some() {
                return None;
            }
        }

        if options.is_empty() {
            return None;
        }

        let consecutive = options
            .keys()
            .zip('A'..='Z')
            .all(|(label, expected)| *label == expected);
        if !consecutive {
            return None;
        }

        Some(Self { options })
    }

    /// 解析已保存的 `quiz` 字段（每行一个 `X. 文本`）
    pub fn parse_quiz_block(block: &str) -> Option<Self> {
        let pairs = block.lines().filter_map(|line| {
            let caps = QUIZ_LINE.captures(line.trim())?;
            let label = caps.get(1)?.as_str().chars().next()?;
            let text = caps.get(2)?.as_str().trim().to_string();
            Some((label, text))
        });
        Self::from_pairs(pairs)
    }

    /// 按 `A. 文本\nB. 文本` 格式输出
    pub fn to_quiz_block(&self) -> String {
        self.options
            .iter()
            .map(|(label, text)| format!("{}. {}", label, text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn get(&self, label: char) -> Option<&str> {
        self.options.get(&label).map(String::as_str)
    }

    pub fn contains(&self, label: char) -> bool {
        self.options.contains_key(&label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.options.iter().map(|(label, text)| (*label, text.as_str()))
    }

    pub fn labels(&self) -> Vec<char> {
        self.options.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
