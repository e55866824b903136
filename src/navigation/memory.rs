//! In-memory navigator and viewport.
//!
//! Used for headless runs and pre-rendering, where there is no address bar
//! and nothing to scroll, and to observe what the coordinator asked for.

use crate::error::RoutingError;
use crate::navigation::{HeaderVariant, NavigationRequest, Navigator, ScrollPosition, Viewport};
use crate::routing::LocalizedRouteTable;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRecord {
    Navigated(NavigationRequest),
    FragmentUpdated(Option<String>),
}

#[derive(Debug)]
pub struct MemoryNavigator {
    current: Mutex<String>,
    records: Mutex<Vec<NavigationRecord>>,
    failing: AtomicBool,
    language_slot: AtomicBool,
    installed: Mutex<Option<Arc<LocalizedRouteTable>>>,
}

impl MemoryNavigator {
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(initial_url.into()),
            records: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            language_slot: AtomicBool::new(true),
            installed: Mutex::new(None),
        }
    }

    /// A router whose configuration lacks the language slot.
    pub fn without_language_slot(self) -> Self {
        self.set_language_slot(false);
        self
    }

    /// Add or remove the language slot, e.g. to simulate a router
    /// reconfigured after start-up.
    pub fn set_language_slot(&self, present: bool) {
        self.language_slot.store(present, Ordering::SeqCst);
    }

    /// Make every following `navigate` call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Simulate the user editing the address bar.
    pub fn set_current_url(&self, url: impl Into<String>) {
        *lock(&self.current) = url.into();
    }

    pub fn records(&self) -> Vec<NavigationRecord> {
        lock(&self.records).clone()
    }

    /// Number of real navigations performed (fragment updates excluded).
    pub fn navigation_count(&self) -> usize {
        lock(&self.records)
            .iter()
            .filter(|record| matches!(record, NavigationRecord::Navigated(_)))
            .count()
    }

    pub fn installed_routes(&self) -> Option<Arc<LocalizedRouteTable>> {
        lock(&self.installed).clone()
    }
}

#[async_trait]
impl Navigator for MemoryNavigator {
    fn current_url(&self) -> String {
        lock(&self.current).clone()
    }

    async fn navigate(&self, request: NavigationRequest) -> Result<(), RoutingError> {
        let url = request.url();
        if self.failing.load(Ordering::SeqCst) {
            return Err(RoutingError::NavigationFailure {
                url,
                reason: "navigation rejected".to_string(),
            });
        }

        *lock(&self.current) = url;
        lock(&self.records).push(NavigationRecord::Navigated(request));
        Ok(())
    }

    fn update_fragment(&self, fragment: Option<&str>) {
        let mut current = lock(&self.current);
        let path = current.split('#').next().unwrap_or_default().to_string();
        *current = match fragment {
            Some(fragment) => format!("{}#{}", path, fragment),
            None => path,
        };
        lock(&self.records).push(NavigationRecord::FragmentUpdated(
            fragment.map(str::to_string),
        ));
    }

    fn install_routes(&self, table: Arc<LocalizedRouteTable>) -> Result<(), RoutingError> {
        if !self.language_slot.load(Ordering::SeqCst) {
            return Err(RoutingError::RouteTableMissing);
        }
        *lock(&self.installed) = Some(table);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScrollEvent {
    Position(ScrollPosition),
    Offset(ScrollPosition),
    Anchor(String),
}

#[derive(Debug)]
pub struct MemoryViewport {
    browser: bool,
    width: AtomicU32,
    position: Mutex<ScrollPosition>,
    events: Mutex<Vec<ScrollEvent>>,
    header_heights: Option<(f64, f64)>,
}

impl MemoryViewport {
    /// A browser-like viewport of the given width.
    pub fn browser(width: u32) -> Self {
        Self {
            browser: true,
            width: AtomicU32::new(width),
            position: Mutex::new(ScrollPosition::TOP),
            events: Mutex::new(Vec::new()),
            header_heights: None,
        }
    }

    /// A non-browser context; the coordinator leaves it alone.
    pub fn headless() -> Self {
        Self {
            browser: false,
            ..Self::browser(0)
        }
    }

    /// Report measured header heights instead of relying on configuration.
    pub fn with_header_heights(mut self, desktop: f64, mobile: f64) -> Self {
        self.header_heights = Some((desktop, mobile));
        self
    }

    pub fn set_width(&self, width: u32) {
        self.width.store(width, Ordering::SeqCst);
    }

    /// Simulate the user scrolling; not recorded as an event.
    pub fn set_scroll_position(&self, position: ScrollPosition) {
        *lock(&self.position) = position;
    }

    pub fn events(&self) -> Vec<ScrollEvent> {
        lock(&self.events).clone()
    }
}

impl Viewport for MemoryViewport {
    fn is_browser(&self) -> bool {
        self.browser
    }

    fn scroll_position(&self) -> ScrollPosition {
        *lock(&self.position)
    }

    fn scroll_to_position(&self, position: ScrollPosition) {
        *lock(&self.position) = position;
        lock(&self.events).push(ScrollEvent::Position(position));
    }

    fn set_offset(&self, offset: ScrollPosition) {
        lock(&self.events).push(ScrollEvent::Offset(offset));
    }

    fn scroll_to_anchor(&self, id: &str) {
        lock(&self.events).push(ScrollEvent::Anchor(id.to_string()));
    }

    fn viewport_width(&self) -> u32 {
        self.width.load(Ordering::SeqCst)
    }

    fn header_height(&self, variant: HeaderVariant) -> Option<f64> {
        self.header_heights.map(|(desktop, mobile)| match variant {
            HeaderVariant::Desktop => desktop,
            HeaderVariant::Mobile => mobile,
        })
    }
}
