//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small knowledge base and forum and
//! run the full crawl cycle end-to-end into a temporary storage directory.

use kb_harvest::config::{Config, CrawlerConfig, SelectorConfig, UserAgentConfig};
use kb_harvest::crawler::Coordinator;
use kb_harvest::CrawlReport;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, kb: &[&str], forum: &[&str], storage: &Path) -> Config {
    Config {
        kb_entry_points: kb.iter().map(|s| s.to_string()).collect(),
        forum_entry_points: forum.iter().map(|s| s.to_string()).collect(),
        base_url: base_url.to_string(),
        html_storage_path: storage.to_str().unwrap().to_string(),
        crawler: CrawlerConfig {
            max_concurrent: 4,
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        user_agent: UserAgentConfig {
            name: "TestBot".to_string(),
            version: "1.0.0".to_string(),
        },
        selectors: SelectorConfig::default(),
    }
}

async fn mount_page(server: &MockServer, at: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn crawl(config: Config) -> CrawlReport {
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    coordinator.run().await
}

fn read_metadata(dir: &Path, id: u64) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.join(format!("{}.json", id)))
        .unwrap_or_else(|e| panic!("missing metadata for {}: {}", id, e));
    serde_json::from_str(&raw).expect("metadata is valid JSON")
}

#[tokio::test]
async fn test_knowledge_base_crawl_writes_articles() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/kb/toc",
        200,
        r#"<html><body><div class="toc-main">
            <a href="/kb/install">Installing the agent</a>
            <a href="/kb/upgrade">Upgrading</a>
        </div></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/kb/install",
        200,
        r#"<html><head><title>Install</title></head><body>
            <div class="article-content"><h2>Setup</h2><p>Run the installer.</p></div>
        </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/kb/upgrade",
        200,
        r#"<html><body><div class="article-content"><p>Stop the service first.</p></div></body></html>"#,
    )
    .await;

    let config = create_test_config(&base_url, &["/kb/toc"], &[], dir.path());
    let report = crawl(config).await;

    assert_eq!(report.rounds, 2);
    assert_eq!(report.tasks_admitted, 3);
    assert_eq!(report.artifacts_written, 2);
    assert!(report.is_complete());

    let install = std::fs::read_to_string(dir.path().join("1.md")).unwrap();
    assert!(install.contains("Setup"));
    assert!(install.contains("Run the installer."));
    let upgrade = std::fs::read_to_string(dir.path().join("2.md")).unwrap();
    assert!(upgrade.contains("Stop the service first."));

    let metadata = read_metadata(dir.path(), 1);
    assert_eq!(metadata["id"], 1);
    assert_eq!(metadata["type"], "detail_kb");
    assert_eq!(metadata["source_url"], format!("{}/kb/install", base_url));
    assert_eq!(metadata["source_url_title"], "Installing the agent");
}

#[tokio::test]
async fn test_forum_crawl_follows_pagination() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    // Mounted first so it takes precedence over the unqualified listing
    Mock::given(method("GET"))
        .and(path("/forum/solved"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <div class="thread-solved"><a class="thread-title" href="/t/3">VPN drops</a></div>
            </body></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forum/solved"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <div class="thread-solved"><a class="thread-title" href="/t/1">Printer offline</a></div>
                <div class="thread-open"><a class="thread-title" href="/t/2">Unsolved</a></div>
                <a class="next-page" href="/forum/solved?page=2">Next</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    for (at, question, answer) in [
        ("/t/1", "Printer shows offline.", "Restart the spooler."),
        ("/t/3", "VPN drops hourly.", "Update the client."),
    ] {
        let body = format!(
            r#"<html><body>
                <div class="question-body"><p>{}</p></div>
                <ul class="answer-list"><li><div class="answer-body">{}</div></li></ul>
            </body></html>"#,
            question, answer
        );
        mount_page(&server, at, 200, &body).await;
    }

    let config = create_test_config(&base_url, &[], &["/forum/solved"], dir.path());
    let report = crawl(config).await;

    // listing page 1, then thread 1 with page 2, then thread 3
    assert_eq!(report.rounds, 3);
    assert_eq!(report.tasks_admitted, 4);
    assert_eq!(report.artifacts_written, 2);
    assert!(report.is_complete());

    let first = std::fs::read_to_string(dir.path().join("1.md")).unwrap();
    assert_eq!(
        first,
        "## Question\nPrinter shows offline.\n\n## Answers\nRestart the spooler."
    );
    let second = std::fs::read_to_string(dir.path().join("2.md")).unwrap();
    assert!(second.contains("VPN drops hourly."));

    let metadata = read_metadata(dir.path(), 2);
    assert_eq!(metadata["type"], "detail_forum");
    assert_eq!(metadata["source_url_title"], "VPN drops");
}

#[tokio::test]
async fn test_error_status_page_is_still_extracted() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/kb/toc",
        200,
        r#"<div class="toc-main"><a href="/kb/moved">Moved article</a></div>"#,
    )
    .await;
    mount_page(
        &server,
        "/kb/moved",
        404,
        r#"<div class="article-content"><p>This article has moved.</p></div>"#,
    )
    .await;

    let config = create_test_config(&base_url, &["/kb/toc"], &[], dir.path());
    let report = crawl(config).await;

    assert_eq!(report.artifacts_written, 1);
    assert_eq!(report.tasks_failed, 0);
    let markdown = std::fs::read_to_string(dir.path().join("1.md")).unwrap();
    assert!(markdown.contains("This article has moved."));
}

#[tokio::test]
async fn test_failed_task_does_not_stop_crawl() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/kb/toc",
        200,
        r#"<div class="toc-main">
            <a href="/kb/empty">No article body</a>
            <a href="/kb/good">Good article</a>
        </div>"#,
    )
    .await;
    mount_page(&server, "/kb/empty", 200, "<html><body><p>Nothing</p></body></html>").await;
    mount_page(
        &server,
        "/kb/good",
        200,
        r#"<div class="article-content"><p>Still written.</p></div>"#,
    )
    .await;

    let config = create_test_config(&base_url, &["/kb/toc"], &[], dir.path());
    let report = crawl(config).await;

    assert_eq!(report.tasks_admitted, 3);
    assert_eq!(report.tasks_failed, 1);
    assert_eq!(report.artifacts_written, 1);
    assert!(!report.is_complete());

    // The sequence id drawn for the failed article leaves a gap
    assert!(!dir.path().join("1.md").exists());
    assert!(dir.path().join("2.md").exists());
}

#[tokio::test]
async fn test_invalid_entry_points_are_rejected() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    let base_with_slash = format!("{}/", base_url);
    let config = create_test_config(
        &base_url,
        &["/", base_with_slash.as_str()],
        &["x"],
        dir.path(),
    );
    let report = crawl(config).await;

    assert_eq!(report.rounds, 0);
    assert_eq!(report.tasks_admitted, 0);
    assert_eq!(report.tasks_rejected, 3);
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_empty_configuration_runs_no_rounds() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let config = create_test_config(&server.uri(), &[], &[], dir.path());
    let report = crawl(config).await;

    assert_eq!(report.rounds, 0);
    assert_eq!(report.artifacts_written, 0);
    assert!(report.is_complete());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
