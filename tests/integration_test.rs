use quiz_convert::config::Config;
use quiz_convert::services::OptionExtractor;
use quiz_convert::{App, ProblemType};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn collection() -> Value {
    json!([
        {
            "id": "m1",
            "statement": "Rozwiąż: A. 2, B. 3, C. 4, D. 5",
            "type": "open",
            "solutions": ["4"],
            "steps": [{"description": "Dodajemy", "expression": "2 + 2 = 4"}]
        },
        {
            "id": "m2",
            "statement": "Liczba $\\sqrt{16}$ jest równa $A. 2$, $B. 4$, $C. 8$, $D. 16$",
            "solutions": ["$4$"]
        },
        {
            "id": "m3",
            "statement": "Wykaż, że suma kątów trójkąta wynosi $180^\\circ$."
        },
        42
    ])
}

#[tokio::test]
async fn test_directory_conversion_end_to_end() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("matura");
    std::fs::create_dir(&sub).unwrap();
    let path = sub.join("maj_multistep.json");
    write_json(&path, &collection());
    std::fs::write(dir.path().join("notes.json"), "[]").unwrap();

    let config = Config {
        keep_backup: false,
        ..Config::default()
    };
    let summary = App::initialize(config, dir.path()).run().await.unwrap();

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.stats.total, 4);
    assert_eq!(summary.stats.converted, 2);
    assert_eq!(summary.stats.open, 1);
    assert_eq!(summary.stats.skipped, 1);
    assert_eq!(summary.stats.answered, 2);

    let written = read_json(&path);
    assert_eq!(written[0]["statement"], json!("Rozwiąż:"));
    assert_eq!(written[0]["quiz"], json!("A. 2\nB. 3\nC. 4\nD. 5"));
    assert_eq!(written[0]["answer"], json!("C"));
    assert_eq!(written[0]["explanation"], json!("2 + 2 = 4"));
    assert_eq!(written[0]["type"], json!(ProblemType::Quiz.as_str()));

    assert_eq!(written[1]["quiz"], json!("A. 2\nB. 4\nC. 8\nD. 16"));
    assert_eq!(written[1]["answer"], json!("B"));

    assert_eq!(written[2]["type"], json!("open"));
    assert!(written[2].get("quiz").is_none());
    assert_eq!(written[3], json!(42));

    let keys: Vec<&String> = written[0].as_object().unwrap().keys().collect();
    assert_eq!(keys[..3], ["id", "statement", "quiz"]);

    // 未匹配后缀的文件不会被动到
    assert_eq!(std::fs::read_to_string(dir.path().join("notes.json")).unwrap(), "[]");
}

#[tokio::test]
async fn test_second_run_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a_multistep.json");
    write_json(&path, &collection());

    App::initialize(Config::default(), dir.path()).run().await.unwrap();
    let first = std::fs::read(&path).unwrap();

    let summary = App::initialize(Config::default(), dir.path()).run().await.unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), first);
    assert_eq!(summary.stats.changed, 0);
    assert_eq!(summary.stats.already_quiz, 2);
    assert_eq!(summary.files_saved(), 0);
}

#[tokio::test]
async fn test_malformed_file_is_left_untouched() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad_multistep.json");
    let good = dir.path().join("good_multistep.json");
    std::fs::write(&bad, "[{\"statement\": ").unwrap();
    write_json(&good, &collection());

    let summary = App::initialize(Config::default(), dir.path()).run().await.unwrap();

    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].structural);
    assert_eq!(std::fs::read_to_string(&bad).unwrap(), "[{\"statement\": ");
    assert_eq!(read_json(&good)[0]["answer"], json!("C"));
}

/// 去掉空白、`$` 和逗号后的文本，用来比较内容是否丢失
fn content(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '$' | ',' | ':' | '.' | '?'))
        .collect()
}

#[test]
fn test_extraction_keeps_all_text() {
    let statements = [
        "Rozwiąż: A. 2, B. 3, C. 4, D. 5",
        "Wierzchołek paraboli to: A. $(1, 2)$, B. $(-1, 2)$, C. $(2, 1)$, D. $(0, 0)$.",
        "Wartość wyrażenia jest równa: $A. 6, B. 8, C. 9, D. 12$",
        "Oblicz: $A. \\frac{1}{2}$, $B. 2$, $C. 3$, $D. 4$",
        "Która liczba jest pierwsza? A. 4, B. 6, C. 7, D. 9?",
        "Okrąg ma środek w punkcie A. Promień jest równy: A. 2, B. 3, C. 4, D. 5",
        "Wskaż zdanie prawdziwe: A. punkt B. leży na osi, B. punkt C. leży na osi, C. oba, D. żaden",
        "Wybierz: A. tak, B. nie, C. nie wiadomo",
        "Wybierz: A. 1, B. 2, C. 3, D. 4. Uzasadnij odpowiedź",
    ];
    let extractor = OptionExtractor::new();

    for statement in statements {
        let ex = extractor
            .extract(statement)
            .unwrap_or_else(|| panic!("no options in {statement:?}"));

        let mut reassembled = ex.statement.clone();
        for (label, text) in ex.options.iter() {
            reassembled.push_str(&format!(" {label}. {text}"));
        }
        assert_eq!(content(&reassembled), content(statement), "text lost in {statement:?}");

        let labels: Vec<char> = ex.options.labels();
        assert_eq!(labels, ['A', 'B', 'C', 'D'][..labels.len()], "labels out of order in {statement:?}");
    }
}
