//! Git operations via the system `git` binary.

pub mod actions;
pub mod changes;
pub mod cli;
pub mod ticket;

pub use actions::ActionExecutor;
pub use changes::{ChangeCollector, ChangeSet, parse_subjects};
pub use cli::GitCli;
pub use ticket::{NO_TICKET, TicketReference, detect};
