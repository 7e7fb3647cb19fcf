//! Command-line tests for the `blogcheck` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn blogcheck() -> Command {
    let mut cmd = Command::cargo_bin("blogcheck").unwrap();
    cmd.env_remove("BLOGCHECK_API_URL")
        .env_remove("BLOGCHECK_TIMEOUT_SECS")
        .env_remove("BLOGCHECK_RESET_SECS")
        .env("NO_COLOR", "1");
    cmd
}

fn docx() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
    file.write_all(b"PK\x03\x04 fake docx").unwrap();
    file
}

#[test]
fn test_help_lists_commands() {
    blogcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("submit"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("view"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_missing_api_url_is_reported() {
    blogcheck()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("BLOGCHECK_API_URL"));
}

#[test]
fn test_unsupported_scheme_is_reported() {
    blogcheck()
        .args(["--api-url", "ftp://example.com", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme"));
}

#[test]
fn test_invalid_category_is_rejected_by_parser() {
    blogcheck()
        .args([
            "submit",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--category",
            "cooking",
            "--title",
            "Soup",
            "--file",
            "soup.docx",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn test_list_filters_and_counts() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/published")
        .with_status(200)
        .with_body(
            r#"[
                {"_id": "1", "title": "Rust in production", "authorName": "Ada",
                 "category": "technology", "publishedAt": "2024-03-01T10:00:00Z",
                 "status": "published", "wordCount": 1000},
                {"_id": "2", "title": "Slow mornings", "authorName": "Grace",
                 "category": "lifestyle", "publishedAt": "2024-03-05T10:00:00Z",
                 "status": "published", "wordCount": 850}
            ]"#,
        )
        .create();

    blogcheck()
        .args(["--api-url", server.url().as_str(), "list", "--search", "rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 of 2 blogs"))
        .stdout(predicate::str::contains("technology (1), lifestyle (1)"))
        .stdout(predicate::str::contains("Rust in production"))
        .stdout(predicate::str::contains("5 min read"))
        .stdout(predicate::str::contains("Slow mornings").not());
}

#[test]
fn test_dashboard_shows_shares() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/all")
        .with_status(200)
        .with_body(
            r#"[
                {"_id": "1", "title": "A", "status": "published"},
                {"_id": "2", "title": "B", "status": "pending"},
                {"_id": "3", "title": "C", "status": "rejected"},
                {"_id": "4", "title": "D", "status": "published"}
            ]"#,
        )
        .create();

    blogcheck()
        .args(["--api-url", server.url().as_str(), "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total      4"))
        .stdout(predicate::str::contains("(50.0%)"))
        .stdout(predicate::str::contains("(25.0%)"))
        .stdout(predicate::str::contains("Latest submissions"));
}

#[test]
fn test_view_missing_blog_fails() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/nope").with_status(404).create();

    blogcheck()
        .args(["--api-url", server.url().as_str(), "view", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Blog not found: nope"));
}

#[cfg(not(feature = "review-gate"))]
#[test]
fn test_submit_publishes_with_yes() {
    let mut server = mockito::Server::new();
    let upload = server
        .mock("POST", "/submit")
        .with_status(200)
        .with_body(
            r#"{"wordCount": 950, "isPlagiarized": false, "blogId": "b-9",
                "publishedUrl": "https://blogs.example.com/b-9"}"#,
        )
        .create();
    let file = docx();

    blogcheck()
        .args([
            "--api-url",
            server.url().as_str(),
            "submit",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--category",
            "technology",
            "--title",
            "Engines",
            "--yes",
            "--file",
        ])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("950 words"))
        .stdout(predicate::str::contains("Published"))
        .stdout(predicate::str::contains("https://blogs.example.com/b-9"));

    upload.assert();
}

#[cfg(not(feature = "review-gate"))]
#[test]
fn test_submit_short_document_is_refused() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/submit")
        .with_status(200)
        .with_body(
            r#"{"wordCount": 120, "isPlagiarized": false, "blogId": "b-1",
                "publishedUrl": "https://blogs.example.com/b-1"}"#,
        )
        .create();
    let file = docx();

    blogcheck()
        .args([
            "--api-url",
            server.url().as_str(),
            "submit",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--category",
            "business",
            "--title",
            "Short",
            "--yes",
            "--file",
        ])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 800 are required"));
}

#[test]
fn test_submit_prompt_without_terminal_fails() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/submit")
        .with_status(200)
        .with_body(
            r#"{"wordCount": 950, "isPlagiarized": false, "blogId": "b-3",
                "publishedUrl": "https://blogs.example.com/b-3"}"#,
        )
        .create();
    let publish = server
        .mock("POST", mockito::Matcher::Regex("/publish$".to_string()))
        .expect(0)
        .create();
    let file = docx();

    blogcheck()
        .args([
            "--api-url",
            server.url().as_str(),
            "submit",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--category",
            "technology",
            "--title",
            "Engines",
            "--file",
        ])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"))
        .stdout(predicate::str::contains("Published").not());

    publish.assert();
}

#[cfg(feature = "review-gate")]
#[test]
fn test_submit_fails_when_publish_fails_after_review() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/submit")
        .with_status(200)
        .with_body(r#"{"wordCount": 950, "isPlagiarized": false, "blogId": "b-1"}"#)
        .create();
    let publish = server
        .mock("POST", "/b-1/publish")
        .with_status(500)
        .with_body(r#"{"message": "db down"}"#)
        .create();
    let file = docx();

    blogcheck()
        .args([
            "--api-url",
            server.url().as_str(),
            "submit",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--category",
            "technology",
            "--title",
            "Engines",
            "--yes",
            "--file",
        ])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("db down"))
        .stderr(predicate::str::contains("did not publish"));

    publish.assert();
}
