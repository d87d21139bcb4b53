//! Running actions described in JSON.

use pdfops::actions::execute_all;
use pdfops::{Action, ActionSpec, AnyAction};

use crate::common::{fixture_pdf, page_labels, temp_dir};

#[tokio::test]
async fn test_spec_file_merge_then_split() {
    let dir = temp_dir();
    fixture_pdf(dir.path(), "a.pdf", "a", 2);
    fixture_pdf(dir.path(), "b.pdf", "b", 3);

    let merged = dir.path().join("ab.pdf");
    let out_dir = dir.path().join("pages");
    let spec = serde_json::json!([
        {
            "action": "merge",
            "inputs": [dir.path().join("a.pdf"), dir.path().join("b.pdf")],
            "output": merged,
        },
        {
            "action": "split",
            "inputs": merged,
            "outputDir": out_dir,
            "pageLength": 2,
            "options": { "compression": "maximum" },
        },
    ]);
    let spec_path = dir.path().join("actions.json");
    std::fs::write(&spec_path, spec.to_string()).unwrap();

    let specs = ActionSpec::load(&spec_path).await.unwrap();
    let reports = execute_all(specs).await.unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].action, "merge");
    assert_eq!(reports[1].outputs.len(), 3);

    assert_eq!(page_labels(&out_dir.join("ab_page_1.pdf")), vec!["a-1", "a-2"]);
    assert_eq!(page_labels(&out_dir.join("ab_page_2.pdf")), vec!["b-1", "b-2"]);
    assert_eq!(page_labels(&out_dir.join("ab_page_3.pdf")), vec!["b-3"]);
}

#[tokio::test]
async fn test_spec_with_glob_inputs() {
    let dir = temp_dir();
    let src = dir.path().join("src");
    std::fs::create_dir(&src).unwrap();
    fixture_pdf(&src, "02.pdf", "second", 1);
    fixture_pdf(&src, "01.pdf", "first", 1);

    let output = dir.path().join("joined.pdf");
    let json = serde_json::json!({
        "action": "merge",
        "inputs": src.join("*.pdf"),
        "output": output,
        "options": { "expandGlobs": true, "jobs": 1 },
    })
    .to_string();

    let action = ActionSpec::from_json_str(&json).unwrap().into_action().unwrap();
    assert!(matches!(action, AnyAction::Merge(_)));
    action.execute().await.unwrap();

    assert_eq!(page_labels(&output), vec!["first-1", "second-1"]);
}

#[test]
fn test_spec_round_trips_through_json() {
    let spec = ActionSpec::from_json_str(
        r#"{ "action": "split", "inputs": ["a.pdf", "b.pdf"], "outputDir": "out", "pageLength": 4 }"#,
    )
    .unwrap();

    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["action"], "split");
    assert_eq!(json["outputDir"], "out");
    assert_eq!(json["inputs"], serde_json::json!(["a.pdf", "b.pdf"]));

    let reparsed: ActionSpec = serde_json::from_value(json).unwrap();
    assert_eq!(reparsed, spec);
}
