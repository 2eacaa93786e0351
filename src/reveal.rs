//! Scroll-triggered reveal of content panels.
//!
//! Every scroll event rescans all panels. A panel whose top edge sits more
//! than `REVEAL_OFFSET_PX` above the bottom of the viewport gains the
//! visible class. Revealing is one-way: nothing here ever removes it.

use crate::config::REVEAL_OFFSET_PX;
use log::debug;

/// A page element eligible for reveal.
pub trait Panel {
    /// Distance from the top of the viewport to the panel's top edge.
    fn top(&self) -> f64;
    fn is_revealed(&self) -> bool;
    fn reveal(&self);
}

/// Whether a panel with its top edge at `top` is far enough into view.
pub fn in_reveal_zone(top: f64, viewport_height: f64) -> bool {
    top < viewport_height - REVEAL_OFFSET_PX
}

/// Reveal every panel inside the reveal zone. Returns how many were newly revealed.
pub fn reveal_panels<P: Panel>(panels: &[P], viewport_height: f64) -> usize {
    let mut newly_revealed = 0;
    for panel in panels {
        if in_reveal_zone(panel.top(), viewport_height) && !panel.is_revealed() {
            panel.reveal();
            newly_revealed += 1;
        }
    }
    if newly_revealed > 0 {
        debug!(
            "Revealed {} of {} panels (viewport {}px)",
            newly_revealed,
            panels.len(),
            viewport_height
        );
    }
    newly_revealed
}
