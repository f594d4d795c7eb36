//! Ticket reference detection from branch names.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

/// Placeholder used when a branch name carries no ticket.
pub const NO_TICKET: &str = "NO-TICKET";

static TICKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+-\d+").expect("ticket pattern is valid"));

/// An issue-tracker identifier such as `ABC-123`, or no ticket at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketReference {
    Ticket(String),
    None,
}

impl TicketReference {
    pub fn as_str(&self) -> &str {
        match self {
            TicketReference::Ticket(id) => id,
            TicketReference::None => NO_TICKET,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TicketReference::None)
    }
}

impl fmt::Display for TicketReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return the first `[A-Z]+-\d+` match in `branch`, or the sentinel.
pub fn detect(branch: &str) -> TicketReference {
    debug!("Detecting ticket pattern in branch name: {}", branch);
    match TICKET_PATTERN.find(branch) {
        Some(m) => TicketReference::Ticket(m.as_str().to_string()),
        None => TicketReference::None,
    }
}
