//! Navigation: the coordinator that owns every URL change, the
//! collaborators it drives, and the active-language state it publishes.
//!
//! - `coordinator`: section jumps, language switches and incoming URLs
//! - `navigator`: the router that owns the address bar
//! - `viewport`: scrolling and the fixed header offset
//! - `state`: single-writer active language with change notification
//! - `memory`: in-memory navigator and viewport for headless runs

mod coordinator;
mod memory;
mod navigator;
mod state;
mod viewport;

pub use coordinator::{
    NavPhase, NavigationCoordinator, NavigationReport, NavigationSettings, ScrollAction,
    Transition, UrlReport,
};
pub use memory::{MemoryNavigator, MemoryViewport, NavigationRecord, ScrollEvent};
pub use navigator::{NavigationRequest, Navigator};
pub use state::ActiveLanguage;
pub use viewport::{HeaderLayout, HeaderVariant, ScrollPosition, Viewport};
