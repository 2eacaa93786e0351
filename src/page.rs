//! Page wiring, written against a `Page` surface so the start-up sequence
//! runs the same way against the browser and against a fake document.
//!
//! Each behaviour is optional. A missing counter element or feedback form
//! only disables that piece; the rest of the page is still wired.

use crate::counter::{configured_counters, CounterSpec};
use log::debug;

/// Everything start-up needs from the hosting page.
pub trait Page {
    type CounterTarget;
    type Form;

    fn counter_target(&self, id: &str) -> Option<Self::CounterTarget>;
    fn start_counter(&self, spec: CounterSpec, target: Self::CounterTarget);
    fn install_scroll_reveal(&self);
    fn feedback_form(&self) -> Option<Self::Form>;
    fn install_feedback(&self, form: Self::Form);
    fn mount_upcoming_ai(&self);
}

/// What `wire_page` actually hooked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wiring {
    pub counters_started: Vec<&'static str>,
    pub feedback_installed: bool,
}

pub fn wire_page<P: Page + ?Sized>(page: &P) -> Wiring {
    let mut wiring = Wiring::default();

    for spec in configured_counters() {
        match page.counter_target(spec.id) {
            Some(target) => {
                page.start_counter(spec, target);
                wiring.counters_started.push(spec.id);
            }
            None => debug!("Counter #{} not on page, skipping", spec.id),
        }
    }

    page.install_scroll_reveal();

    match page.feedback_form() {
        Some(form) => {
            page.install_feedback(form);
            wiring.feedback_installed = true;
        }
        None => debug!("No feedback form on page"),
    }

    page.mount_upcoming_ai();
    wiring
}
