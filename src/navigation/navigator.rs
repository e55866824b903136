//! Navigator collaborator: the router that owns the address bar.

use crate::error::RoutingError;
use crate::routing::{LocalizedRouteTable, NavigationTarget};
use async_trait::async_trait;
use std::sync::Arc;

/// One outgoing navigation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Path segments, language code first.
    pub segments: Vec<String>,
    pub fragment: Option<String>,
    /// Replace the current history entry instead of pushing a new one.
    pub replace_url: bool,
    /// Whether the router may restore scroll on its own. The coordinator
    /// manages scrolling, so requests it builds always disable this.
    pub scroll_restoration: bool,
}

impl NavigationRequest {
    pub fn to_target(target: &NavigationTarget, replace_url: bool) -> Self {
        Self {
            segments: target.segments(),
            fragment: target.fragment.clone(),
            replace_url,
            scroll_restoration: false,
        }
    }

    /// The URL this request leads to, e.g. `/en/about-me#about-me-id`.
    pub fn url(&self) -> String {
        let path = format!("/{}", self.segments.join("/"));
        match &self.fragment {
            Some(fragment) => format!("{}#{}", path, fragment),
            None => path,
        }
    }
}

#[async_trait]
pub trait Navigator: Send + Sync {
    /// URL currently displayed, path and fragment included.
    fn current_url(&self) -> String;

    async fn navigate(&self, request: NavigationRequest) -> Result<(), RoutingError>;

    /// Change only the fragment of the current URL, without a navigation.
    fn update_fragment(&self, fragment: Option<&str>);

    /// Hand a rebuilt route table to the router. Routers without a language
    /// slot to mount it under answer `RouteTableMissing`.
    fn install_routes(&self, table: Arc<LocalizedRouteTable>) -> Result<(), RoutingError>;
}
