//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete
//! implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`ShortLinkRepository`] - Short link storage with store-enforced
//!   code uniqueness
//! - [`RedirectEventRepository`] - The append-only click log

pub mod event_repository;
pub mod link_repository;

pub use event_repository::RedirectEventRepository;
pub use link_repository::ShortLinkRepository;

#[cfg(test)]
pub use event_repository::MockRedirectEventRepository;
#[cfg(test)]
pub use link_repository::MockShortLinkRepository;
