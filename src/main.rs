//! Entry point: sets up panic and log output, then wires the page once its
//! structure has been parsed.

use axis_site::{initialize, on_dom_ready};
use log::{info, Level};

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting page scripts");
    let window = gloo_utils::window();
    let document = gloo_utils::document();
    on_dom_ready(&document.clone(), move || initialize(&window, &document));
}
