//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Oid, Repository, RepositoryInitOptions, Signature};

use gitaissist::error::CommandError;
use gitaissist::github::{PrHost, PullRequestRecord};
use gitaissist::review::{Review, Reviewer};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new repository on branch `main` in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init git repo");

        // The git CLI needs an identity to commit, and must not try to sign.
        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write `content` to `name` in the working tree without staging it.
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content).expect("Failed to write test file");
    }

    /// Stage `name` in the index.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write, stage and commit `name`. Returns the commit OID.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Oid {
        self.write_file(name, content);
        self.stage(name);

        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a commit with the given message, touching `test.txt`.
    pub fn commit(&self, message: &str) -> Oid {
        let content = format!(
            "{}\n{}",
            message,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        self.commit_file("test.txt", &content, message)
    }

    /// Create a branch at HEAD and check it out.
    pub fn checkout_new_branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        self.repo.branch(name, &head, false).expect("Failed to create branch");
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Failed to set HEAD");
        self.repo
            .checkout_head(Some(git2::build::CheckoutBuilder::new().force()))
            .expect("Failed to checkout");
    }

    /// Subject of the commit at HEAD.
    pub fn head_subject(&self) -> String {
        let commit = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        commit.summary().unwrap_or_default().to_string()
    }

    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.push_head().expect("Failed to push HEAD");
        walk.count()
    }

    /// Messages of all stash entries, newest first.
    pub fn stash_messages(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        self.repo
            .stash_foreach(|_, message, _| {
                messages.push(message.to_string());
                true
            })
            .expect("Failed to list stashes");
        messages
    }

    /// Add a bare repository as remote `origin` and return it.
    pub fn add_bare_remote(&self) -> BareRemote {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let bare = Repository::init_bare(dir.path()).expect("Failed to init bare repo");
        let url = dir.path().to_str().expect("temp path is UTF-8").to_string();
        self.repo
            .remote("origin", &url)
            .expect("Failed to add remote");
        BareRemote { dir, repo: bare }
    }

    /// Push `main` to origin with the git CLI, setting its upstream.
    pub fn publish_main(&self) {
        let status = std::process::Command::new("git")
            .args(["push", "--quiet", "--set-upstream", "origin", "main"])
            .current_dir(self.path())
            .status()
            .expect("Failed to run git push");
        assert!(status.success(), "git push origin main failed");
    }
}

/// A bare repository standing in for the hosted remote.
pub struct BareRemote {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl BareRemote {
    pub fn has_branch(&self, name: &str) -> bool {
        self.repo
            .find_reference(&format!("refs/heads/{}", name))
            .is_ok()
    }
}

/// Reviewer that approves whatever it is shown, recording each text.
#[derive(Default)]
pub struct ApproveAll {
    pub seen: Mutex<Vec<String>>,
}

#[async_trait]
impl Reviewer for ApproveAll {
    async fn review(&self, initial: &str) -> Review {
        self.seen.lock().unwrap().push(initial.to_string());
        Review::approved(initial)
    }
}

/// Reviewer that rejects everything.
pub struct RejectAll;

#[async_trait]
impl Reviewer for RejectAll {
    async fn review(&self, _initial: &str) -> Review {
        Review::rejected()
    }
}

/// A draft pull request held by [`FakePrHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakePr {
    pub number: u64,
    pub title: String,
    pub body: String,
}

/// In-memory pull request host.
#[derive(Default)]
pub struct FakePrHost {
    pub prs: Mutex<Vec<(String, FakePr)>>,
    pub opened: Mutex<Vec<u64>>,
    /// Branch that `create_draft` files the next PR under.
    pub current_branch: Mutex<String>,
}

impl FakePrHost {
    pub fn for_branch(branch: &str) -> Self {
        Self {
            current_branch: Mutex::new(branch.to_string()),
            ..Self::default()
        }
    }

    pub fn pr(&self, branch: &str) -> Option<FakePr> {
        self.prs
            .lock()
            .unwrap()
            .iter()
            .find(|(b, _)| b == branch)
            .map(|(_, pr)| pr.clone())
    }
}

#[async_trait]
impl PrHost for FakePrHost {
    async fn find_open_pr(&self, branch: &str) -> Result<Option<PullRequestRecord>, CommandError> {
        Ok(self.pr(branch).map(|pr| PullRequestRecord { number: pr.number }))
    }

    async fn create_draft(&self, title: &str, body: &str) -> Result<(), CommandError> {
        let mut prs = self.prs.lock().unwrap();
        let number = prs.len() as u64 + 1;
        let branch = self.current_branch.lock().unwrap().clone();
        prs.push((
            branch,
            FakePr {
                number,
                title: title.to_string(),
                body: body.to_string(),
            },
        ));
        Ok(())
    }

    async fn update_body(&self, number: u64, body: &str) -> Result<(), CommandError> {
        let mut prs = self.prs.lock().unwrap();
        match prs.iter_mut().find(|(_, pr)| pr.number == number) {
            Some((_, pr)) => {
                pr.body = body.to_string();
                Ok(())
            }
            None => Err(CommandError::InvalidOutput {
                command: "gh pr edit".to_string(),
                detail: format!("no pull request #{}", number),
            }),
        }
    }

    async fn open_in_browser(&self, number: u64) -> Result<(), CommandError> {
        self.opened.lock().unwrap().push(number);
        Ok(())
    }
}

/// Write an executable shell script to `dir` and return its path.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to chmod script");
    path
}

/// Chat-completions response body with a single choice.
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}
