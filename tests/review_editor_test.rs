//! Integration tests for `EditorReviewer` using scripted editors.
//!
//! Each "editor" is a small shell script that receives the review file path
//! as its last argument.
#![cfg(unix)]

mod common;

use common::write_script;
use gitaissist::review::{EditorReviewer, Review, Reviewer};

#[tokio::test]
async fn test_saved_edit_is_approved_with_new_text() {
    let dir = tempfile::tempdir().unwrap();
    let editor = write_script(dir.path(), "edit.sh", r#"printf '✨ [feat]: add login flow\n' > "$1""#);

    let review = EditorReviewer::new(editor.display().to_string())
        .review("✨ [feat]: add login")
        .await;

    assert_eq!(review, Review::approved("✨ [feat]: add login flow\n"));
}

#[tokio::test]
async fn test_save_without_changes_approves_original_text() {
    let dir = tempfile::tempdir().unwrap();
    // Only the modification time moves, as when saving an untouched buffer.
    let editor = write_script(dir.path(), "touch.sh", r#"sleep 1; touch "$1""#);

    let review = EditorReviewer::new(editor.display().to_string())
        .review("🐛 [fix]: guard null")
        .await;

    assert!(review.approved);
    assert_eq!(review.text, "🐛 [fix]: guard null");
}

#[tokio::test]
async fn test_quit_without_saving_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let editor = write_script(dir.path(), "quit.sh", "exit 0");

    let review = EditorReviewer::new(editor.display().to_string())
        .review("🐛 [fix]: guard null")
        .await;

    assert_eq!(review, Review::rejected());
}

#[tokio::test]
async fn test_emptied_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let editor = write_script(dir.path(), "empty.sh", r#"printf '  \n\n' > "$1""#);

    let review = EditorReviewer::new(editor.display().to_string())
        .review("🐛 [fix]: guard null")
        .await;

    assert!(!review.approved);
}

#[tokio::test]
async fn test_editor_failure_is_rejected_even_after_writing() {
    let dir = tempfile::tempdir().unwrap();
    let editor = write_script(dir.path(), "fail.sh", r#"printf 'changed' > "$1"; exit 3"#);

    let review = EditorReviewer::new(editor.display().to_string())
        .review("original")
        .await;

    assert!(!review.approved);
}

#[tokio::test]
async fn test_editor_command_with_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "append.sh", r#"printf '%s' "$1" > "$2""#);

    // `sh <script> <word>` then the review file path.
    let command = format!("sh {} replaced", script.display());
    let review = EditorReviewer::new(command).review("original").await;

    assert_eq!(review, Review::approved("replaced"));
}

#[tokio::test]
async fn test_review_file_is_scoped_and_removed() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("seen-path");
    let editor = write_script(
        dir.path(),
        "record.sh",
        &format!(r#"printf '%s' "$1" > '{}'; cat "$1" >> '{}.content'; printf 'ok' > "$1""#,
            record.display(),
            record.display()),
    );

    let review = EditorReviewer::new(editor.display().to_string())
        .review("initial text")
        .await;
    assert!(review.approved);

    let seen = std::fs::read_to_string(&record).unwrap();
    let seen = std::path::Path::new(&seen);
    let name = seen.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("gai-"), "unexpected name {name}");
    assert!(name.ends_with(".txt"), "unexpected name {name}");
    assert!(!seen.exists(), "review file should be removed");

    let content = std::fs::read_to_string(format!("{}.content", record.display())).unwrap();
    assert_eq!(content, "initial text");
}

#[tokio::test]
async fn test_unknown_editor_is_rejected() {
    let review = EditorReviewer::new("nonexistent_editor_12345 --wait")
        .review("text")
        .await;
    assert!(!review.approved);
}

#[tokio::test]
async fn test_editor_path_with_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("Sublime Text.app");
    std::fs::create_dir(&app).unwrap();
    let editor = write_script(&app, "subl", r#"printf 'from spaced path' > "$1""#);

    // Unquoted, as `EDITOR` is often set on macOS.
    let review = EditorReviewer::new(editor.display().to_string())
        .review("original")
        .await;
    assert_eq!(review, Review::approved("from spaced path"));

    // Quoted with arguments, as git accepts it.
    let script = write_script(&app, "append.sh", r#"printf '%s' "$1" > "$2""#);
    let command = format!("'{}' quoted", script.display());
    let review = EditorReviewer::new(command).review("original").await;
    assert_eq!(review, Review::approved("quoted"));
}
