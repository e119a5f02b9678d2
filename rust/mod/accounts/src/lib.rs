//! Account selection model for the SSO account management screen.
//!
//! Three fixed permission trees (Standard, Unix, and Database Security
//! accounts) share one flat node store. This crate seeds the trees,
//! coordinates tri-state propagation on every toggle, and derives the
//! selection summary and search views consumed by the display layer.

pub mod catalog;
pub mod service;

pub use catalog::Catalog;
pub use service::{AccountSelection, SearchResults};
