//! Domain records exchanged with the portfolio API.
//!
//! # Responsibility
//! - Define wire-compatible shapes for portfolios, projects, achievements,
//!   posts, contact messages and owner account updates.
//! - Define the editable rich-text document model.
//!
//! # Invariants
//! - Rich-text fields on records stay encoded payload strings; decoding is
//!   the codec's job so legacy plain text is never rejected at this layer.

pub mod account;
pub mod contact;
pub mod dates;
pub mod portfolio;
pub mod post;
pub mod rich_text;
