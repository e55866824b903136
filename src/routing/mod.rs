//! Localized routing: the language-neutral catalog, its per-language
//! materialization, and the pure functions that resolve and validate URLs
//! against it.
//!
//! - `catalog`: the route list every other part reads from
//! - `localizer`: catalog + translation table -> `LocalizedRoutes`
//! - `url`: the one URL parser, and `NavigationTarget`
//! - `resolver`: equivalent target after a language change
//! - `validator`: canonical-form checks and redirects for incoming URLs

mod catalog;
mod localizer;
mod resolver;
mod url;
mod validator;

pub use catalog::{RouteCatalog, RouteEntry, RouteKind};
pub use localizer::{localize, LocalizedRoute, LocalizedRouteTable, LocalizedRoutes};
pub use resolver::resolve_after_language_change;
pub use url::{NavigationTarget, ParsedUrl};
pub use validator::{validate, Validation};
