//! Application-level configuration constants.

// Counters
pub const COUNTER_TICK_MS: u32 = 18;
pub const COUNTER_FRAMES: u32 = 60;
pub const PLUS_SUFFIX_THRESHOLD: u32 = 100;

/// (element id, end value) for every count-up on the page.
pub const COUNTERS: &[(&str, u32)] = &[
    ("cnt-users", 500),
    ("cnt-drivers", 40),
    ("cnt-rides", 3000),
];

// Scroll reveal
pub const PANEL_CLASS: &str = "panel";
pub const VISIBLE_CLASS: &str = "visible";
pub const REVEAL_OFFSET_PX: f64 = 80.0;

// Feedback form
pub const FEEDBACK_FORM_SELECTOR: &str = "#feedbackForm";
pub const FEEDBACK_ENDPOINT: &str = "/feedback";
pub const FEEDBACK_SUCCESS_STATUS: &str = "success";
pub const MSG_FEEDBACK_RECEIVED: &str = "Thanks — feedback received!";
pub const MSG_FEEDBACK_REJECTED: &str = "There was an error.";
pub const MSG_NETWORK_ERROR: &str = "Network error.";

// Upcoming AI features panel
pub const UPCOMING_AI_ENDPOINT: &str = "/api/upcoming-ai";
pub const UPCOMING_AI_MOUNT_ID: &str = "upcoming-ai";
