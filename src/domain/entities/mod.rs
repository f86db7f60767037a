//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Session`] - One user's in-progress or completed questionnaire
//! - [`ShortLink`] - A tracked short link issued for a product article
//! - [`RedirectEvent`] - A logged resolution (click) of a short code
//! - [`CatalogEntry`] - A combination-to-product mapping
//!
//! Persisted entities follow the "New Type" pattern with separate structs
//! for creation (`NewShortLink`, `NewRedirectEvent`).

pub mod catalog;
pub mod redirect_event;
pub mod session;
pub mod short_link;

pub use catalog::CatalogEntry;
pub use redirect_event::{NewRedirectEvent, RedirectEvent};
pub use session::{Session, SessionPhase};
pub use short_link::{NewShortLink, ShortLink};
