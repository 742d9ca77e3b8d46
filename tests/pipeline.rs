//! End-to-end pipeline tests against a mock books API

mod common;

use book_extractor::{Error, FetchError, Stage, ToExitCode};
use common::*;
use tempfile::tempdir;
use wiremock::ResponseTemplate;

#[tokio::test]
async fn two_matching_books_make_two_groups() {
    let server = mock_api_with_body(TWO_MATCHING_BOOKS).await;
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.txt");

    let mut pipeline = pipeline_for(&server, &output);
    let mut rx = pipeline.subscribe();
    let summary = pipeline.run().await.expect("pipeline should succeed");

    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.filtered, 2);
    assert_eq!(summary.groups, 2);

    let lines = progress_lines(&mut rx);
    assert!(lines.contains(&"Fetched 2 books successfully.".to_string()));
    assert!(lines.contains(&"Filtered 2 books.".to_string()));
    assert!(lines.contains(&"2 groups made.".to_string()));
    assert_eq!(
        lines.last().map(String::as_str),
        Some(format!("Result has been saved to '{}'", output.display()).as_str())
    );

    let report = std::fs::read_to_string(&output).unwrap();
    assert_eq!(report, "Parent1\nBook1 NJ\n\nParent2\nBook2 CO\n\n");
}

#[tokio::test]
async fn non_matching_book_writes_empty_report() {
    let server = mock_api_with_body(ONE_NON_MATCHING_BOOK).await;
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.txt");

    let mut pipeline = pipeline_for(&server, &output);
    let mut rx = pipeline.subscribe();
    let summary = pipeline.run().await.expect("pipeline should succeed");

    assert_eq!(summary.fetched, 1);
    assert_eq!(summary.filtered, 0);
    assert_eq!(summary.groups, 0);

    let lines = progress_lines(&mut rx);
    assert!(lines.contains(&"Fetched 1 books successfully.".to_string()));
    assert!(lines.contains(&"Filtered 0 books.".to_string()));
    assert!(!lines.iter().any(|l| l.contains("groups made")));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

#[tokio::test]
async fn empty_book_list_skips_filter_and_group_messages() {
    let server = mock_api_with_body(NO_BOOKS).await;
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.txt");

    let mut pipeline = pipeline_for(&server, &output);
    let mut rx = pipeline.subscribe();
    let summary = pipeline.run().await.expect("pipeline should succeed");

    assert_eq!(summary.fetched, 0);

    let lines = progress_lines(&mut rx);
    assert!(lines.contains(&"Fetched 0 books successfully.".to_string()));
    assert!(!lines.iter().any(|l| l.starts_with("Filter")));
    assert!(!lines.iter().any(|l| l.starts_with("Grouping") || l.contains("groups made")));
    assert!(output.exists());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

#[tokio::test]
async fn non_json_body_fails_with_parse_error() {
    let server = mock_api(ResponseTemplate::new(200).set_body_string("Invalid JSON")).await;
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.txt");

    let mut pipeline = pipeline_for(&server, &output);
    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, Error::Parse { .. }), "got {err:?}");
    assert_eq!(err.exit_code(), 4);
    assert_eq!(pipeline.stage(), Stage::Failed);
    assert!(!output.exists());
}

#[tokio::test]
async fn server_error_fails_with_status_500() {
    let server = mock_api(ResponseTemplate::new(500)).await;
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.txt");

    let mut pipeline = pipeline_for(&server, &output);
    let mut rx = pipeline.subscribe();
    let err = pipeline.run().await.unwrap_err();

    match &err {
        Error::Fetch(FetchError::Status { code, .. }) => assert_eq!(*code, 500),
        other => panic!("Expected Fetch status error, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Failed to fetch books. Status code: 500 - Internal Server Error"
    );

    let lines = progress_lines(&mut rx);
    assert_eq!(
        lines.last().map(String::as_str),
        Some("An error occurred: Failed to fetch books. Status code: 500 - Internal Server Error")
    );
    assert!(!output.exists());
}

#[tokio::test]
async fn mixed_books_are_filtered_sorted_and_grouped() {
    let server = mock_api_with_body(MIXED_BOOKS).await;
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.txt");

    let mut pipeline = pipeline_for(&server, &output);
    let summary = pipeline.run().await.expect("pipeline should succeed");

    assert_eq!(summary.fetched, 7);
    assert_eq!(summary.filtered, 4);
    assert_eq!(summary.groups, 2);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Alpha\nAlpha Guide NJ\nAlpha Map CO\n\nZeta\nZeta Atlas CO, UT\nZeta Annex NJ, NY\n\n"
    );
}

#[tokio::test]
async fn rerun_overwrites_previous_report() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("result.txt");

    let first = mock_api_with_body(TWO_MATCHING_BOOKS).await;
    pipeline_for(&first, &output).run().await.expect("first run");
    assert!(!std::fs::read_to_string(&output).unwrap().is_empty());

    let second = mock_api_with_body(NO_BOOKS).await;
    pipeline_for(&second, &output).run().await.expect("second run");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}
