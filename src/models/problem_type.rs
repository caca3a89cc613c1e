use serde::{Deserialize, Serialize};

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    /// 开放题（解答题）
    Open,
    /// 选择题
    Quiz,
}

impl ProblemType {
    /// 获取写入 JSON 的标准名称
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemType::Open => "open",
            ProblemType::Quiz => "quiz",
        }
    }

    /// 尝试从字符串解析题目类型（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(ProblemType::Open),
            "quiz" => Some(ProblemType::Quiz),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
