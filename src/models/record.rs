use crate::models::problem_type::ProblemType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 一道题目
///
/// 字段原样保存在有序 map 中：写回文件时未知字段和字段顺序都不变，
/// 只有流程层显式改写的字段会变化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

/// 题目集合中的一项
///
/// 顶层数组里不是对象的元素原样保留，不参与转换。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CollectionEntry {
    Record(Record),
    Other(Value),
}

/// 一个解题步骤
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub expression: Option<String>,
}

impl Step {
    pub fn with_expression(expression: impl Into<String>) -> Self {
        Self {
            expression: Some(expression.into()),
        }
    }

    fn from_value(value: &Value) -> Self {
        Self {
            expression: value
                .get("expression")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Value> for CollectionEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => CollectionEntry::Record(Record::from(map)),
            other => CollectionEntry::Other(other),
        }
    }
}

impl Record {
    /// 题目 ID（字符串或数字）
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// 题干，缺失或不是字符串时为空
    pub fn statement(&self) -> &str {
        self.str_field("statement").unwrap_or_default()
    }

    pub fn problem_type(&self) -> Option<ProblemType> {
        self.str_field("type").and_then(ProblemType::from_str)
    }

    pub fn quiz(&self) -> Option<&str> {
        self.str_field("quiz")
    }

    pub fn answer(&self) -> Option<&str> {
        self.str_field("answer")
    }

    pub fn explanation(&self) -> Option<&str> {
        self.str_field("explanation")
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// 最终答案列表，保持原位置
    ///
    /// 数字转成字符串；其他类型的项变成空串，不会匹配任何选项。
    pub fn solutions(&self) -> Vec<String> {
        self.fields
            .get("solutions")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(solution_text).collect())
            .unwrap_or_default()
    }

    /// 解题步骤
    pub fn steps(&self) -> Vec<Step> {
        self.fields
            .get("steps")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Step::from_value).collect())
            .unwrap_or_default()
    }

    pub fn set_type(&mut self, problem_type: ProblemType) {
        self.fields
            .insert("type".to_string(), Value::String(problem_type.as_str().to_string()));
    }

    pub fn set_statement(&mut self, statement: impl Into<String>) {
        self.fields
            .insert("statement".to_string(), Value::String(statement.into()));
    }

    /// 把 `key` 放在 `anchor` 字段之后
    ///
    /// `key` 已存在时原位替换；`anchor` 不存在时追加到末尾。
    pub fn insert_after(&mut self, anchor: &str, key: &str, value: Value) {
        if self.fields.contains_key(key) || !self.fields.contains_key(anchor) {
            self.fields.insert(key.to_string(), value);
            return;
        }

        let old = std::mem::take(&mut self.fields);
        let mut value = Some(value);
        for (k, v) in old {
            let is_anchor = k == anchor;
            self.fields.insert(k, v);
            if is_anchor {
                if let Some(value) = value.take() {
                    self.fields.insert(key.to_string(), value);
                }
            }
        }
    }

    /// 字段不存在时才写入，返回是否写入
    pub fn set_if_absent(&mut self, key: &str, value: Value) -> bool {
        if self.fields.contains_key(key) {
            return false;
        }
        self.fields.insert(key.to_string(), value);
        true
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

fn solution_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
