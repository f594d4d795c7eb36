//! Instruction templates sent to the text-generation service.
//!
//! Each template can be overridden by a Markdown file in the gai config
//! directory; missing files fall back to the built-in text.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

pub const SYSTEM_FILE: &str = "systemInstructions.md";
pub const COMMIT_FILE: &str = "commitFormattingInstructions.md";
pub const PR_TITLE_FILE: &str = "prTitleFormattingInstructions.md";
pub const PR_BODY_FILE: &str = "prBodyFormattingInstructions.md";

pub const DEFAULT_SYSTEM_INSTRUCTIONS: &str = r#"
You are an expert software developer who helps generate concise, high-quality
Git-related messages. Provide brief, clear outputs with an imperative mood.
Avoid disclaimers, personal references, or mention of AI.
Stay consistent with the style across this repository.

You must use exactly one of the allowed Gitmojis from this set:
- 🎨 → Improve structure / format of the code
- ⚡️ → Improve performance
- 🔥 → Remove code or files
- 🐛 → Fix a bug
- 🚑️ → Critical hotfix
- ✨ → Introduce new features
- 📝 → Add or update documentation
- 🚀 → Deploy stuff
- 💄 → Add or update the UI and style files
- 🎉 → Begin a project
- ✅ → Add, update, or pass tests
- 🔒️ → Fix security or privacy issues
- 🔐 → Add or update secrets
- 🔖 → Release / Version tags
- 🚨 → Fix compiler / linter warnings
- 🚧 → Work in progress
- 💚 → Fix CI Build
- ⬇️ → Downgrade dependencies
- ⬆️ → Upgrade dependencies
- 📌 → Pin dependencies to specific versions
- 👷 → Add or update CI build system
- 📈 → Add or update analytics or track code
- ♻️ → Refactor code
- ➕ → Add a dependency
- ➖ → Remove a dependency
- 🔧 → Add or update configuration files
- 🔨 → Add or update development scripts
- 🌐 → Internationalization and localization
- ✏️ → Fix typos
- 💩 → Write bad code that needs to be improved
- ⏪️ → Revert changes
- 🔀 → Merge branches
- 📦️ → Add or update compiled files or packages
- 👽️ → Update code due to external API changes
- 🚚 → Move or rename resources (e.g.: files, paths, routes)
- 💥 → Introduce breaking changes
- 🍱 → Add or update assets
- ♿️ → Improve accessibility
- 💡 → Add or update comments in source code
- 🍻 → Write code drunkenly
- 💬 → Add or update text and literals
- 🗃️ → Perform database related changes
- 🔊 → Add or update logs
- 🔇 → Remove logs
- 👥 → Add or update contributor(s)
- 🚸 → Improve user experience / usability
- 🏗️ → Make architectural changes
- 📱 → Work on responsive design
- 🤡 → Mock things
- 🥚 → Add or update an easter egg
- 🙈 → Add or update a .gitignore file
- 📸 → Add or update snapshots
- ⚗️ → Perform experiments
- 🔍️ → Improve SEO
- 🏷️ → Add or update types
- 🌱 → Add or update seed files
- 🚩 → Add, update, or remove feature flags
- 🥅 → Catch errors
- 💫 → Add or update animations and transitions
- 🗑️ → Deprecate code that needs to be cleaned up
- 🛂 → Work on code related to authorization, roles and permissions
- 🩹 → Simple fix for a non-critical issue
- 🧐 → Data exploration/inspection
- ⚰️ → Remove dead code
- 🧪 → Add a failing test
- 👔 → Add or update business logic
- 🩺 → Add or update healthcheck
- 🧱 → Infrastructure related changes
- 🧑‍💻 → Improve developer experience
- 💸 → Add sponsorships or money related infrastructure
- 🧵 → Add or update code related to multithreading or concurrency
- 🦺 → Add or update code related to validation
"#;

pub const DEFAULT_COMMIT_INSTRUCTIONS: &str = r#"
As an expert developer, generate a Git commit message following Conventional Commits:
Requirements:
- Use the format: <gitmoji> [type]: <description>
- The entire line must stay under 80 characters
- Use imperative mood (e.g., "add" not "added")
- Do not end with a period
- Condense multiple changes into a single descriptive line if needed
- Do not add disclaimers or references to yourself or AI
- Output exactly one line

OUTPUT FORMAT:
<gitmoji> [type]: <description>
"#;

pub const DEFAULT_PR_TITLE_INSTRUCTIONS: &str = r#"
As an expert software developer, generate a clear pull request title. Requirements:
- If a ticket number is provided, place it at the start in brackets
- Summarize the main purpose
- Keep under 140 characters
- Use imperative mood
- Do not end with a period
- Must be a complete thought
- Maintain consistency across all PR titles
- Do not add disclaimers or AI references
- Keep style aligned with repository standards

OUTPUT FORMAT:
[<ticket number>] <pull request title>
"#;

pub const DEFAULT_PR_BODY_INSTRUCTIONS: &str = r#"
As an expert software developer, write a concise Pull Request body. Requirements:
- Summarize the main purpose in a few sentences, imperative mood
- Include a bullet list of key changes
- If a ticket is present, link it under "Ticket links"
- Keep sentences short
- Maintain style consistency: do not add disclaimers or AI references

OUTPUT FORMAT:
### Description
(Summary of changes in a few sentences)

### Changes
* Bullet points of key changes

### Ticket links // Skip if no ticket found
* [TICKET-0000]
"#;

/// Where a template's text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    File(PathBuf),
    Builtin,
}

impl fmt::Display for PromptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptSource::File(path) => write!(f, "{}", path.display()),
            PromptSource::Builtin => f.write_str("built-in default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub content: String,
    pub source: PromptSource,
}

impl PromptTemplate {
    pub fn builtin(content: &str) -> Self {
        Self {
            content: content.to_string(),
            source: PromptSource::Builtin,
        }
    }

    /// Read `path`, falling back to `default` when it is missing or unreadable.
    pub fn load(path: &Path, default: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loaded prompt from {}", path.display());
                Self {
                    content,
                    source: PromptSource::File(path.to_path_buf()),
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Prompt file not found at {}. Using default.", path.display());
                Self::builtin(default)
            }
            Err(e) => {
                error!(
                    "Error reading prompt file at {}: {}. Using default.",
                    path.display(),
                    e
                );
                Self::builtin(default)
            }
        }
    }
}

/// The four templates used by the commit, stash and pull request flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    pub system: PromptTemplate,
    pub commit: PromptTemplate,
    pub pr_title: PromptTemplate,
    pub pr_body: PromptTemplate,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            system: PromptTemplate::builtin(DEFAULT_SYSTEM_INSTRUCTIONS),
            commit: PromptTemplate::builtin(DEFAULT_COMMIT_INSTRUCTIONS),
            pr_title: PromptTemplate::builtin(DEFAULT_PR_TITLE_INSTRUCTIONS),
            pr_body: PromptTemplate::builtin(DEFAULT_PR_BODY_INSTRUCTIONS),
        }
    }
}

impl PromptSet {
    /// Load every template from `dir`, using built-ins for missing files.
    pub fn load(dir: &Path) -> Self {
        Self {
            system: PromptTemplate::load(&dir.join(SYSTEM_FILE), DEFAULT_SYSTEM_INSTRUCTIONS),
            commit: PromptTemplate::load(&dir.join(COMMIT_FILE), DEFAULT_COMMIT_INSTRUCTIONS),
            pr_title: PromptTemplate::load(&dir.join(PR_TITLE_FILE), DEFAULT_PR_TITLE_INSTRUCTIONS),
            pr_body: PromptTemplate::load(&dir.join(PR_BODY_FILE), DEFAULT_PR_BODY_INSTRUCTIONS),
        }
    }

    /// `(file name, template)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, &PromptTemplate); 4] {
        [
            (SYSTEM_FILE, &self.system),
            (COMMIT_FILE, &self.commit),
            (PR_TITLE_FILE, &self.pr_title),
            (PR_BODY_FILE, &self.pr_body),
        ]
    }
}
