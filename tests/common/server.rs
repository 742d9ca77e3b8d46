//! Mock API server and pipeline construction helpers

use book_extractor::{Config, Event, Pipeline};
use std::path::Path;
use tokio::sync::broadcast;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock API serves books on
pub const BOOKS_PATH: &str = "/api/books";

/// Start a mock API answering `GET /api/books` with the given response
pub async fn mock_api(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BOOKS_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

/// Start a mock API answering 200 with the given JSON body
pub async fn mock_api_with_body(body: &str) -> MockServer {
    mock_api(
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/json")
            .set_body_string(body),
    )
    .await
}

/// Build a pipeline against the mock server, writing the report to `output`
pub fn pipeline_for(server: &MockServer, output: &Path) -> Pipeline {
    let mut config = Config::new(format!("{}{}", server.uri(), BOOKS_PATH));
    config.report.output_path = output.to_path_buf();
    Pipeline::from_config(&config).expect("pipeline should build")
}

/// Collect every event already sent, rendered as progress lines
pub fn progress_lines(rx: &mut broadcast::Receiver<Event>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(event) = rx.try_recv() {
        lines.push(event.to_string());
    }
    lines
}
