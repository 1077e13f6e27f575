//! Domain logic - pure data types independent of git and network access

pub mod branch;
pub mod commit;
pub mod ticket;

pub use branch::BranchRef;
pub use commit::{BranchHistory, CommitRecord, ShortHash, UnreleasedCommit, SHORT_HASH_LEN};
pub use ticket::TicketId;
