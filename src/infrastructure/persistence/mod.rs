//! SQLite implementations of the domain repositories.

pub mod sqlite_event_repository;
pub mod sqlite_link_repository;

pub use sqlite_event_repository::SqliteEventRepository;
pub use sqlite_link_repository::SqliteLinkRepository;
