//! End-to-end merges of generated PDFs.

use pdfops::{Action, ActionOptions, CompressionLevel, MergePdfAction};
use rstest::rstest;

use crate::common::{expected_labels, fixture_pdf, page_labels, temp_dir};

#[tokio::test]
async fn test_merge_three_files_in_order() {
    let dir = temp_dir();
    let inputs = vec![
        fixture_pdf(dir.path(), "intro.pdf", "intro", 1),
        fixture_pdf(dir.path(), "body.pdf", "body", 4),
        fixture_pdf(dir.path(), "outro.pdf", "outro", 2),
    ];
    let output = dir.path().join("book.pdf");

    let report = MergePdfAction::new(inputs, &output)
        .execute()
        .await
        .unwrap();

    assert_eq!(report.inputs_processed, 3);
    assert_eq!(report.outputs.len(), 1);
    assert_eq!(report.outputs[0].page_count, 7);
    assert!(report.total_size() > 0);

    let expected: Vec<String> = [("intro", 1), ("body", 4), ("outro", 2)]
        .into_iter()
        .flat_map(|(tag, pages)| expected_labels(tag, pages))
        .collect();
    assert_eq!(page_labels(&output), expected);
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let dir = temp_dir();
    let input = fixture_pdf(dir.path(), "a.pdf", "a", 2);
    let output = dir.path().join("twice.pdf");

    MergePdfAction::new(vec![input.clone(), input], &output)
        .execute()
        .await
        .unwrap();

    assert_eq!(page_labels(&output), vec!["a-1", "a-2", "a-1", "a-2"]);
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_merge_with_compression(#[case] compression: CompressionLevel) {
    let dir = temp_dir();
    let inputs = vec![
        fixture_pdf(dir.path(), "a.pdf", "a", 3),
        fixture_pdf(dir.path(), "b.pdf", "b", 3),
    ];
    let output = dir.path().join("merged.pdf");

    MergePdfAction::new(inputs, &output)
        .with_options(ActionOptions {
            compression,
            ..Default::default()
        })
        .execute()
        .await
        .unwrap();

    let mut expected = expected_labels("a", 3);
    expected.extend(expected_labels("b", 3));
    assert_eq!(page_labels(&output), expected);
}

#[tokio::test]
async fn test_merge_overwrites_existing_output() {
    let dir = temp_dir();
    let input = fixture_pdf(dir.path(), "a.pdf", "a", 1);
    let output = fixture_pdf(dir.path(), "out.pdf", "old", 5);

    MergePdfAction::new(input.as_path(), &output)
        .execute()
        .await
        .unwrap();

    assert_eq!(page_labels(&output), vec!["a-1"]);
}
