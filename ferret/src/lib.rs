//! Ferret: a search-widget core for precomputed site indexes.
//!
//! Fetches a JSON document index once per session, scores documents against
//! free-text queries (title-over-body, first-occurrence position), and
//! drives an accessible autocomplete dropdown through a host-implemented
//! surface. The matcher and highlighter are pure; everything
//! environment-facing goes through `interface`.

pub mod controller;
mod debounce;
pub mod highlight;
pub mod interface;
pub mod models;
pub mod navigation;
pub mod search;
pub mod source;
mod store;

pub use controller::Autocomplete;
pub use interface::*;
pub use models::Document;
pub use store::{IndexStore, LoadState};
