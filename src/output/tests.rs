//! Tests for output module

use super::*;
use crate::pagination::Cursor;
use crate::types::{Entry, Post};
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_post() -> Post {
    Post::from_value(json!({
        "id": 2,
        "blog_name": "other",
        "reblog_key": "Kx9",
        "note_count": 17,
        "photos": [
            {"original_size": {"url": "https://64.media.example/b.jpg"}},
            {"original_size": {"url": "https://64.media.example/c.jpg"}}
        ]
    }))
    .unwrap()
}

fn output(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

// ============================================================================
// SimpleFormatter Tests
// ============================================================================

#[test]
fn test_simple_one_url_per_line() {
    let post = sample_post();
    let mut formatter = SimpleFormatter::new(Vec::new());

    formatter
        .emit(&Entry::new("https://64.media.example/b.jpg", &post, 0))
        .unwrap();
    formatter
        .emit(&Entry::new("https://64.media.example/c.jpg", &post, 1))
        .unwrap();
    formatter.emit_cursor(&Cursor::BeforeId(2)).unwrap();
    formatter.emit_error("ignored").unwrap();
    formatter.flush().unwrap();

    assert_eq!(
        output(formatter.into_inner()),
        "https://64.media.example/b.jpg\nhttps://64.media.example/c.jpg\n"
    );
}

// ============================================================================
// CommandFormatter Tests
// ============================================================================

#[test]
fn test_command_push_url_line() {
    let post = sample_post();
    let mut formatter = CommandFormatter::new(Vec::new());

    formatter
        .emit(&Entry::new("https://64.media.example/c.jpg", &post, 1))
        .unwrap();

    assert_eq!(
        output(formatter.into_inner()),
        "push-url --as image --meta id=2 --meta blog_name=other --meta reblog_key=Kx9 \
         --meta note_count=17 --meta index=1 https://64.media.example/c.jpg\n"
    );
}

#[test]
fn test_command_cursor_lines() {
    let mut formatter = CommandFormatter::new(Vec::new());
    formatter.emit_cursor(&Cursor::BeforeId(12345)).unwrap();
    formatter.emit_cursor(&Cursor::Offset(40)).unwrap();

    assert_eq!(
        output(formatter.into_inner()),
        "set-env before_id 12345\nset-env offset 40\n"
    );
}

#[test]
fn test_command_error_line() {
    let mut formatter = CommandFormatter::new(Vec::new());
    formatter.emit_error("blocked").unwrap();
    formatter.emit_error("two\nlines").unwrap();

    assert_eq!(
        output(formatter.into_inner()),
        "message blocked\nmessage two lines\n"
    );
}

#[test]
fn test_shell_quote() {
    assert_eq!(shell_quote("blog_name=other"), "blog_name=other");
    assert_eq!(shell_quote("https://x/a.jpg"), "https://x/a.jpg");
    assert_eq!(shell_quote("a b"), "'a b'");
    assert_eq!(
        shell_quote("https://x/a.jpg?w=1&h=2"),
        "'https://x/a.jpg?w=1&h=2'"
    );
    assert_eq!(shell_quote("it's"), r"'it'\''s'");
    assert_eq!(shell_quote(""), "''");
}

#[test]
fn test_command_quotes_unsafe_meta() {
    let post =
        Post::from_value(json!({"id": 3, "blog_name": "we ird", "reblog_key": "k"})).unwrap();
    let mut formatter = CommandFormatter::new(Vec::new());
    formatter.emit(&Entry::new("https://x/a.jpg", &post, 0)).unwrap();

    let line = output(formatter.into_inner());
    assert!(line.contains("--meta 'blog_name=we ird'"));
}

// ============================================================================
// DumpFormatter Tests
// ============================================================================

#[test]
fn test_dump_separates_entries_with_blank_line() {
    let post = sample_post();
    let mut formatter = DumpFormatter::new(Vec::new());

    formatter
        .emit(&Entry::new("https://64.media.example/b.jpg", &post, 0))
        .unwrap();
    formatter
        .emit(&Entry::new("https://64.media.example/c.jpg", &post, 1))
        .unwrap();
    formatter.flush().unwrap();

    let text = output(formatter.into_inner());
    let documents: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(documents.len(), 2);

    let first: serde_yaml::Value = serde_yaml::from_str(documents[0]).unwrap();
    assert_eq!(
        first["url"].as_str(),
        Some("https://64.media.example/b.jpg")
    );
    assert_eq!(first["index"].as_u64(), Some(0));
    assert_eq!(first["post"]["reblog_key"].as_str(), Some("Kx9"));
    assert_eq!(first["post"]["note_count"].as_u64(), Some(17));

    let second: serde_yaml::Value = serde_yaml::from_str(documents[1]).unwrap();
    assert_eq!(second["index"].as_u64(), Some(1));
}

// ============================================================================
// build_formatter Tests
// ============================================================================

#[test]
fn test_build_formatter_dispatch() {
    let post = sample_post();
    let entry = Entry::new("https://64.media.example/b.jpg", &post, 0);

    let mut buffer = Vec::new();
    {
        let mut formatter = build_formatter(OutputFormat::Structured, &mut buffer);
        formatter.emit(&entry).unwrap();
        formatter.emit_cursor(&Cursor::Offset(1)).unwrap();
        formatter.flush().unwrap();
    }
    let text = output(buffer);
    assert!(text.starts_with("push-url --as image"));
    assert!(text.ends_with("set-env offset 1\n"));

    let mut buffer = Vec::new();
    {
        let mut formatter = build_formatter(OutputFormat::Simple, &mut buffer);
        formatter.emit(&entry).unwrap();
        formatter.emit_cursor(&Cursor::Offset(1)).unwrap();
    }
    assert_eq!(output(buffer), "https://64.media.example/b.jpg\n");
}
