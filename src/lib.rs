//! Localized routing and navigation state for a multi-language site.
//!
//! The `routing` module turns a language-neutral route catalog into
//! per-language URLs and validates incoming ones. The `navigation` module's
//! coordinator drives every URL change: section jumps, language switches and
//! incoming URLs, keeping the active language, the router and the scroll
//! position consistent.

pub mod config;
pub mod error;
pub mod i18n;
pub mod metrics;
pub mod navigation;
pub mod retry;
pub mod routing;
