//! Client-side interactivity for the Axis landing page: count-up statistics,
//! scroll-revealed panels, the asynchronous feedback form and the upcoming
//! AI features teaser.
//!
//! The behaviour lives in DOM-independent modules (`counter`, `reveal`,
//! `feedback`, `page`) written against small traits. `dom` implements those traits
//! for `web_sys` types and registers the event handlers.

pub mod config;
pub mod counter;
pub mod dom;
pub mod feedback;
pub mod page;
pub mod reveal;
pub mod upcoming;

pub use dom::{initialize, on_dom_ready};
