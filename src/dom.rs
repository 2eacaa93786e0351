//! Browser bindings: `web_sys` implementations of the component traits and
//! the event wiring that connects them to the page.

use crate::config::{
    COUNTER_TICK_MS, FEEDBACK_FORM_SELECTOR, PANEL_CLASS, UPCOMING_AI_MOUNT_ID, VISIBLE_CLASS,
};
use crate::counter::{run_counter, CounterAnimation, CounterSpec, TextTarget};
use crate::feedback::{submit_feedback, FeedbackError, FeedbackForm, Notifier, Transport};
use crate::page::{wire_page, Page};
use crate::reveal::{reveal_panels, Panel};
use crate::upcoming::UpcomingAi;
use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use gloo_timers::future::IntervalStream;
use js_sys::Array;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, FormData, HtmlFormElement, Window};

// ──────────────────────────────────────────────────────────────────────────────
// Component traits for web_sys types

impl TextTarget for Element {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

impl Panel for Element {
    fn top(&self) -> f64 {
        self.get_bounding_client_rect().top()
    }

    fn is_revealed(&self) -> bool {
        self.class_list().contains(VISIBLE_CLASS)
    }

    fn reveal(&self) {
        if let Err(e) = self.class_list().add_1(VISIBLE_CLASS) {
            warn!("Failed to mark panel visible: {:?}", e);
        }
    }
}

impl FeedbackForm for HtmlFormElement {
    fn fields(&self) -> Vec<(String, String)> {
        let data = match FormData::new_with_form(self) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to read feedback form: {:?}", e);
                return Vec::new();
            }
        };
        let entries = match js_sys::try_iter(&data) {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                warn!("Feedback form data is not iterable");
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to iterate feedback form data: {:?}", e);
                return Vec::new();
            }
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let pair = Array::from(&entry);
                // File inputs yield Blob values, which have no string form
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn reset(&self) {
        HtmlFormElement::reset(self);
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Network and alerts

/// Posts through the browser's fetch via `gloo-net`.
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, Result<String, FeedbackError>> {
        async move {
            let response = Request::post(url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body)
                .send()
                .await
                .map_err(|e| FeedbackError::Network(e.to_string()))?;
            response
                .text()
                .await
                .map_err(|e| FeedbackError::Network(e.to_string()))
        }
        .boxed_local()
    }
}

impl Notifier for Window {
    fn notify(&self, message: &str) {
        if let Err(e) = self.alert_with_message(message) {
            warn!("Failed to show alert {:?}: {:?}", message, e);
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Page wiring

fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

fn elements_by_selector(document: &Document, selector: &str) -> Vec<Element> {
    let nodes = match document.query_selector_all(selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            warn!("Bad selector {:?}: {:?}", selector, e);
            return Vec::new();
        }
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The live document and window, as seen by `wire_page`.
pub struct BrowserPage {
    pub window: Window,
    pub document: Document,
}

impl Page for BrowserPage {
    type CounterTarget = Element;
    type Form = HtmlFormElement;

    fn counter_target(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn start_counter(&self, spec: CounterSpec, element: Element) {
        spawn_local(async move {
            run_counter(
                CounterAnimation::new(spec.end),
                &element,
                IntervalStream::new(COUNTER_TICK_MS),
            )
            .await;
        });
    }

    /// Reveal panels on every scroll event for the rest of the page's life.
    fn install_scroll_reveal(&self) {
        let selector = format!(".{}", PANEL_CLASS);
        let window = self.window.clone();
        let document = self.document.clone();
        let on_scroll = Closure::<dyn FnMut()>::new(move || {
            let panels = elements_by_selector(&document, &selector);
            reveal_panels(&panels, viewport_height(&window));
        });

        if let Err(e) = self
            .window
            .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
        {
            warn!("Failed to register scroll listener: {:?}", e);
            return;
        }
        on_scroll.forget();
    }

    fn feedback_form(&self) -> Option<HtmlFormElement> {
        let element = self.document.query_selector(FEEDBACK_FORM_SELECTOR).ok()??;
        match element.dyn_into::<HtmlFormElement>() {
            Ok(form) => Some(form),
            Err(_) => {
                warn!("{} is not a form", FEEDBACK_FORM_SELECTOR);
                None
            }
        }
    }

    /// Take over submission of the feedback form.
    fn install_feedback(&self, form: HtmlFormElement) {
        let submit_form = form.clone();
        let window = self.window.clone();
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let form = submit_form.clone();
            let window = window.clone();
            spawn_local(async move {
                submit_feedback(&form, &FetchTransport, &window).await;
            });
        });

        if let Err(e) =
            form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        {
            warn!("Failed to register submit listener: {:?}", e);
            return;
        }
        on_submit.forget();
    }

    /// Render the upcoming-features list into its mount point, if present.
    fn mount_upcoming_ai(&self) {
        match self.document.get_element_by_id(UPCOMING_AI_MOUNT_ID) {
            Some(root) => {
                yew::Renderer::<UpcomingAi>::with_root(root).render();
            }
            None => debug!("No #{} mount point, skipping", UPCOMING_AI_MOUNT_ID),
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Entry points

/// Wire every interactive behaviour of the page. Call once, after the
/// document structure is available.
pub fn initialize(window: &Window, document: &Document) {
    let page = BrowserPage {
        window: window.clone(),
        document: document.clone(),
    };
    let wiring = wire_page(&page);
    info!(
        "Page interactivity initialized ({} counters, feedback form: {})",
        wiring.counters_started.len(),
        wiring.feedback_installed
    );
}

/// Run `f` once the document has been parsed.
pub fn on_dom_ready<F>(document: &Document, f: F)
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let callback = Closure::once_into_js(f);
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        warn!("Failed to register DOMContentLoaded listener: {:?}", e);
    }
}

/// Entry point for pages that load the module from their own script.
#[wasm_bindgen(js_name = initializePage)]
pub fn initialize_page() {
    let window = gloo_utils::window();
    let document = gloo_utils::document();
    initialize(&window, &document);
}
