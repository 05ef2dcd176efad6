//! # smartmarket
//!
//! Client library for the SmartMarket product-research backend.
//!
//! The backend scrapes reviews, scores sentiment and compares prices. This
//! crate is the thin layer in front of it: a typed REST client that turns
//! every response into either a parsed payload or a readable error, the
//! data records it returns, and the views that render those records for a
//! terminal.

pub mod api;
pub mod config;
pub mod session;
pub mod types;
pub mod views;
