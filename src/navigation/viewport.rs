//! Viewport collaborator: scroll position, anchor scrolling and the fixed
//! header the anchor scroll has to clear.

/// A scroll offset in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

impl ScrollPosition {
    pub const TOP: ScrollPosition = ScrollPosition { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which fixed header layout is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVariant {
    Desktop,
    Mobile,
}

/// Scrolling surface the coordinator drives.
///
/// In a non-browser context (pre-rendering, headless runs) `is_browser`
/// returns false and the coordinator makes none of the other calls.
pub trait Viewport: Send + Sync {
    fn is_browser(&self) -> bool;

    fn scroll_position(&self) -> ScrollPosition;

    fn scroll_to_position(&self, position: ScrollPosition);

    /// Offset applied to subsequent anchor scrolls.
    fn set_offset(&self, offset: ScrollPosition);

    fn scroll_to_anchor(&self, id: &str);

    fn viewport_width(&self) -> u32;

    /// Measured height of the header, when the surface can measure it.
    fn header_height(&self, _variant: HeaderVariant) -> Option<f64> {
        None
    }
}

/// Configured header geometry, used when the viewport cannot measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderLayout {
    pub desktop_height: f64,
    pub mobile_height: f64,
    /// Widths up to and including this value use the mobile header.
    pub mobile_breakpoint: u32,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self {
            desktop_height: 80.0,
            mobile_height: 60.0,
            mobile_breakpoint: 768,
        }
    }
}

impl HeaderLayout {
    pub fn variant_for(&self, width: u32) -> HeaderVariant {
        if width <= self.mobile_breakpoint {
            HeaderVariant::Mobile
        } else {
            HeaderVariant::Desktop
        }
    }

    /// Vertical offset that keeps anchored content clear of the header.
    pub fn offset_for(&self, viewport: &dyn Viewport) -> ScrollPosition {
        let variant = self.variant_for(viewport.viewport_width());
        let height = viewport
            .header_height(variant)
            .unwrap_or(match variant {
                HeaderVariant::Desktop => self.desktop_height,
                HeaderVariant::Mobile => self.mobile_height,
            });
        ScrollPosition::new(0.0, height)
    }
}
