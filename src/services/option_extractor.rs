//! 选项抽取服务 - 业务能力层
//!
//! 只负责"从题干里拆出 ABCD 选项"，不修改题目

use crate::models::quiz::OptionSet;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// 四个选项：`A. …, B. …, C. …, D. …`，锚定在题干末尾（允许一个句号或问号）
static FOUR_OPTIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(?P<da>\$?)\bA\.\s*(?P<a>.+?)\s*,\s*(?P<db>\$?)B\.\s*(?P<b>.+?)\s*,\s*(?P<dc>\$?)C\.\s*(?P<c>.+?)\s*,\s*(?P<dd>\$?)D\.\s*(?P<d>.+?)\s*[.?]?\s*$",
    )
    .expect("four-option pattern is valid")
});

/// 三个选项：`A. …, B. …, C. …`
static THREE_OPTIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(?P<da>\$?)\bA\.\s*(?P<a>.+?)\s*,\s*(?P<db>\$?)B\.\s*(?P<b>.+?)\s*,\s*(?P<dc>\$?)C\.\s*(?P<c>.+?)\s*[.?]?\s*$",
    )
    .expect("three-option pattern is valid")
});

/// A 标签（可带 `$`），用于在 A 的文本里找更靠后的起点
static A_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\bA\.\s*").expect("label pattern is valid"));

/// 任意位置的 D 标签（用于拒绝被三选项模式吞掉的 D）
static D_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bD\.").expect("label pattern is valid"));

const FOUR_LABELS: [(char, &str, &str); 4] =
    [('A', "a", "da"), ('B', "b", "db"), ('C', "c", "dc"), ('D', "d", "dd")];

/// 抽取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// 去掉选项后的题干
    pub statement: String,
    /// 选项（按标签排序）
    pub options: OptionSet,
}

/// 选项抽取服务
///
/// 职责：
/// - 在题干末尾定位 `A. …, B. …, C. …, D. …`（或只有 A–C）的选项串
/// - 按标签切分（不按逗号，选项本身可能含逗号）
/// - 返回干净的题干和选项集合
/// - 找不到完整、连续的选项串时返回 `None`，不猜测
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionExtractor;

impl OptionExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 题干中是否同时出现 `A.`、`B.`、`C.`、`D.` 四个标记
    ///
    /// 只是廉价的预检查，通过后仍需 [`OptionExtractor::extract`] 确认。
    pub fn has_all_label_tokens(statement: &str) -> bool {
        ["A.", "B.", "C.", "D."]
            .iter()
            .all(|token| statement.contains(token))
    }

    /// 从题干中抽取选项
    pub fn extract(&self, statement: &str) -> Option<Extraction> {
        if let Some(caps) = FOUR_OPTIONS.captures(statement) {
            return self.build(statement, &caps, &FOUR_LABELS);
        }

        let caps = THREE_OPTIONS.captures(statement)?;
        let span = caps.get(0)?.as_str();
        if D_LABEL.is_match(span) {
            // D 标签存在但四选项模式没匹配上：选项串残缺，不退化成三选项
            debug!("三选项模式命中但包含 D 标签，放弃抽取");
            return None;
        }
        self.build(statement, &caps, &FOUR_LABELS[..3])
    }

    fn build(
        &self,
        statement: &str,
        caps: &Captures<'_>,
        labels: &[(char, &str, &str)],
    ) -> Option<Extraction> {
        let (run_start, first) = run_start(statement, caps)?;

        let mut pairs = Vec::with_capacity(labels.len());
        // `$` 出现在 A 之前但没有在 A 的文本里闭合：整个选项串被一对 `$` 包住
        let mut block_open = false;
        for (i, (label, text_group, delimiter_group)) in labels.iter().enumerate() {
            let (raw, own_dollar) = if i == 0 {
                first
            } else {
                let dollar = caps
                    .name(delimiter_group)
                    .is_some_and(|m| !m.as_str().is_empty());
                (caps.name(text_group)?.as_str(), dollar)
            };
            let is_last = i + 1 == labels.len();

            let (text, closed) = clean_option_text(raw, own_dollar || (is_last && block_open));
            if i == 0 && own_dollar && !closed {
                block_open = true;
            }
            if text.is_empty() {
                return None;
            }
            pairs.push((*label, text));
        }

        let options = OptionSet::from_pairs(pairs)?;
        let clean = clean_statement(&statement[..run_start]);

        debug!(
            "抽取到 {} 个选项，题干剩余 {} 个字符",
            options.len(),
            clean.chars().count()
        );

        Some(Extraction {
            statement: clean,
            options,
        })
    }
}

/// 选项串的起点，以及 A 的原始文本和它前面是否有 `$`
///
/// 匹配从最左边的 `A.` 开始，但题干里可能先出现一个普通的 `A.`（如"点 A."）。
/// A 的文本里如果还有 `A.` 标记，选项串从最后一个开始，之前的内容都属于题干。
fn run_start<'h>(statement: &'h str, caps: &Captures<'h>) -> Option<(usize, (&'h str, bool))> {
    let whole = caps.get(0)?;
    let a = caps.name("a")?;

    let inner = A_LABEL
        .captures_iter(&statement[..a.end()])
        .filter(|c| c.get(0).is_some_and(|m| m.start() >= a.start()))
        .last();

    match inner {
        Some(inner) => {
            let token = inner.get(0)?;
            let dollar = inner.get(1).is_some_and(|m| !m.as_str().is_empty());
            debug!("A 的文本里出现 A. 标记，选项串从位置 {} 开始", token.start());
            Some((token.start(), (&statement[token.end()..a.end()], dollar)))
        }
        None => {
            let dollar = caps.name("da").is_some_and(|m| !m.as_str().is_empty());
            Some((whole.start(), (a.as_str(), dollar)))
        }
    }
}

/// 去掉选项文本两端空白和末尾的逗号/句号
///
/// `strip_dollar` 为真时，文本末尾落单的 `$`（与标签前的 `$` 配对）一并去掉，
/// 返回值第二项表示是否去掉了。
fn clean_option_text(raw: &str, strip_dollar: bool) -> (String, bool) {
    let mut text = raw.trim().trim_end_matches([',', '.']).trim_end();
    let mut stripped = false;

    if strip_dollar && text.ends_with('$') && text.matches('$').count() % 2 == 1 {
        text = text[..text.len() - 1].trim_end();
        stripped = true;
    }

    (text.to_string(), stripped)
}

/// 题干去掉末尾空白；以冒号结尾时，多余的冒号合并为一个
fn clean_statement(prefix: &str) -> String {
    let trimmed = prefix.trim();
    if trimmed.ends_with(':') {
        let mut clean = trimmed.trim_end_matches(|c: char| c == ':' || c.is_whitespace()).to_string();
        clean.push(':');
        clean
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(statement: &str) -> Option<Extraction> {
        OptionExtractor::new().extract(statement)
    }

    #[test]
    fn test_simple_four_options() {
        let ex = extract("Rozwiąż: A. 2, B. 3, C. 4, D. 5").unwrap();
        assert_eq!(ex.statement, "Rozwiąż:");
        assert_eq!(ex.options.to_quiz_block(), "A. 2\nB. 3\nC. 4\nD. 5");
    }

    #[test]
    fn test_options_with_commas_inside_math() {
        let statement = "Wierzchołek paraboli ma współrzędne: A. $(1, 2)$, B. $(-1, 2)$, C. $(2, 1)$, D. $(0, 0)$.";
        let ex = extract(statement).unwrap();
        assert_eq!(ex.statement, "Wierzchołek paraboli ma współrzędne:");
        assert_eq!(ex.options.get('A'), Some("$(1, 2)$"));
        assert_eq!(ex.options.get('B'), Some("$(-1, 2)$"));
        assert_eq!(ex.options.get('D'), Some("$(0, 0)$"));
    }

    #[test]
    fn test_parenthesised_options() {
        let ex = extract("Punkt leży na prostej: A. (1, 3), B. (2, 5), C. (0, 1), D. (3, 7)").unwrap();
        assert_eq!(ex.options.get('A'), Some("(1, 3)"));
        assert_eq!(ex.options.get('D'), Some("(3, 7)"));
    }

    #[test]
    fn test_dollar_wrapped_block() {
        let ex = extract("Wartość wyrażenia jest równa: $A. 6, B. 8, C. 9, D. 12$").unwrap();
        assert_eq!(ex.statement, "Wartość wyrażenia jest równa:");
        assert_eq!(ex.options.get('A'), Some("6"));
        assert_eq!(ex.options.get('D'), Some("12"));
    }

    #[test]
    fn test_each_option_wrapped_in_dollars() {
        let ex = extract("Oblicz: $A. \\frac{1}{2}$, $B. 2$, $C. 3$, $D. 4$").unwrap();
        assert_eq!(ex.options.get('A'), Some("\\frac{1}{2}"));
        assert_eq!(ex.options.get('B'), Some("2"));
        assert_eq!(ex.options.get('D'), Some("4"));
    }

    #[test]
    fn test_decimal_in_last_option_is_kept() {
        let ex = extract("Średnia wynosi: A. 1.5, B. 2, C. 2.5, D. 3.25.").unwrap();
        assert_eq!(ex.options.get('C'), Some("2.5"));
        assert_eq!(ex.options.get('D'), Some("3.25"));
    }

    #[test]
    fn test_trailing_question_mark() {
        let ex = extract("Która liczba jest pierwsza? A. 4, B. 6, C. 7, D. 9?").unwrap();
        assert_eq!(ex.statement, "Która liczba jest pierwsza?");
        assert_eq!(ex.options.get('D'), Some("9"));
    }

    #[test]
    fn test_repeated_colons_collapse() {
        let ex = extract("Wynik to :: A. 1, B. 2, C. 3, D. 4").unwrap();
        assert_eq!(ex.statement, "Wynik to:");
    }

    #[test]
    fn test_statement_without_colon_is_kept() {
        let ex = extract("Liczba $\\sqrt{16}$ jest równa A. 2, B. 4, C. 8, D. 16").unwrap();
        assert_eq!(ex.statement, "Liczba $\\sqrt{16}$ jest równa");
    }

    #[test]
    fn test_three_options() {
        let ex = extract("Wybierz: A. tak, B. nie, C. nie wiadomo").unwrap();
        assert_eq!(ex.options.labels(), vec!['A', 'B', 'C']);
        assert_eq!(ex.options.get('C'), Some("nie wiadomo"));
    }

    #[test]
    fn test_missing_labels_fail() {
        assert!(extract("Wybierz: A. x, B. y").is_none());
        assert!(extract("Wybierz: A. x, B. y, D. z").is_none());
        assert!(extract("Wybierz: B. x, C. y, D. z").is_none());
    }

    #[test]
    fn test_truncated_d_is_not_swallowed_by_three_options() {
        assert!(extract("Wybierz: A. 1, B. 2, C. 3, D.").is_none());
    }

    #[test]
    fn test_trailing_text_stays_in_last_option() {
        let ex = extract("Wybierz: A. 1, B. 2, C. 3, D. 4. Uzasadnij odpowiedź").unwrap();
        assert_eq!(ex.options.get('D'), Some("4. Uzasadnij odpowiedź"));
    }

    #[test]
    fn test_label_inside_word_is_not_a_label() {
        assert!(extract("Drużyna NBA. gra, B. x, C. y, D. z").is_none());
    }

    #[test]
    fn test_no_text_loss() {
        let statement = "Dla jakiego $x$ zachodzi $2x + 1 = 7$: A. $x = 1$, B. $x = 2$, C. $x = 3$, D. $x = 4$";
        let ex = extract(statement).unwrap();
        assert!(statement.starts_with(ex.statement.as_str()));
        for (label, text) in ex.options.iter() {
            assert!(statement.contains(&format!("{}. {}", label, text)), "lost option {}", label);
        }
    }

    #[test]
    fn test_point_named_a_stays_in_statement() {
        let ex = extract("Okrąg ma środek w punkcie A. Promień okręgu jest równy: A. 2, B. 3, C. 4, D. 5").unwrap();
        assert_eq!(ex.statement, "Okrąg ma środek w punkcie A. Promień okręgu jest równy:");
        assert_eq!(ex.options.to_quiz_block(), "A. 2\nB. 3\nC. 4\nD. 5");

        let answer = crate::services::AnswerResolver::new().resolve(&ex.options, &["2"], &[]);
        assert_eq!(answer, Some('A'));
    }

    #[test]
    fn test_leading_point_a_with_dollar_options() {
        let ex = extract("Przez punkt A. prowadzimy prostą. Jej współczynnik kierunkowy to: $A. 1$, $B. 2$, $C. 3$, $D. 4$").unwrap();
        assert_eq!(ex.statement, "Przez punkt A. prowadzimy prostą. Jej współczynnik kierunkowy to:");
        assert_eq!(ex.options.get('A'), Some("1"));
        assert_eq!(ex.options.get('D'), Some("4"));
    }

    #[test]
    fn test_label_like_tokens_inside_option_text() {
        let ex = extract("Wskaż zdanie prawdziwe: A. punkt B. leży na osi, B. punkt C. leży na osi, C. oba, D. żaden").unwrap();
        assert_eq!(ex.statement, "Wskaż zdanie prawdziwe:");
        assert_eq!(ex.options.get('A'), Some("punkt B. leży na osi"));
        assert_eq!(ex.options.get('B'), Some("punkt C. leży na osi"));
        assert_eq!(ex.options.get('C'), Some("oba"));
        assert_eq!(ex.options.get('D'), Some("żaden"));
    }

    #[test]
    fn test_label_token_precheck() {
        assert!(OptionExtractor::has_all_label_tokens("A. 1, B. 2, C. 3, D. 4"));
        assert!(!OptionExtractor::has_all_label_tokens("A. x, B. y"));
    }
}
